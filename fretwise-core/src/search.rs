//! Backtracking search for playable voicings
//!
//! The search assigns each required note to a free string, one formula index
//! at a time, and undoes the assignment on the way back up. Every placement
//! is checked against the hand-span limits, which prunes the tree hard enough
//! that an 18-fret, 6-string board with a 7-note formula stays cheap.

use crate::config::SearchLimits;
use crate::types::chord::ChordSpec;
use crate::types::fretboard::{FretPosition, Fretboard, MAX_STRINGS};
use crate::types::pitch::PitchClass;
use crate::types::voicing::Voicing;
use tracing::debug;

/// Default minimum note count for a formula of `len` notes.
///
/// Five-note and larger formulas may drop notes, down to
/// `max(3, min(4, len - 1))`; smaller formulas must be complete.
pub fn partial_minimum(len: usize) -> usize {
    if len >= 5 {
        (len - 1).clamp(3, 4)
    } else {
        len
    }
}

/// Enumerate voicings of `notes` on `fretboard` with the default limits
pub fn search(fretboard: &Fretboard, notes: &[PitchClass], minimum: Option<usize>) -> Vec<Voicing> {
    VoicingSearch::new(fretboard).search(notes, minimum)
}

/// Voicing search over one fretboard
#[derive(Debug, Clone)]
pub struct VoicingSearch<'a> {
    fretboard: &'a Fretboard,
    limits: SearchLimits,
}

/// Mutable backtracking state: one optional fret per string
struct Arena {
    frets: [Option<usize>; MAX_STRINGS],
    placed: usize,
}

impl Arena {
    fn new() -> Self {
        Arena {
            frets: [None; MAX_STRINGS],
            placed: 0,
        }
    }

    fn set(&mut self, string: usize, fret: usize) {
        self.frets[string] = Some(fret);
        self.placed += 1;
    }

    fn clear(&mut self, string: usize) {
        self.frets[string] = None;
        self.placed -= 1;
    }

    fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.frets
            .iter()
            .enumerate()
            .filter_map(|(string, fret)| fret.map(|f| (string, f)))
    }

    fn to_voicing(&self) -> Voicing {
        Voicing::new(
            self.occupied()
                .map(|(string, fret)| FretPosition::new(string, fret))
                .collect(),
        )
    }
}

impl<'a> VoicingSearch<'a> {
    /// Panics if the fretboard has more strings than the search supports.
    pub fn new(fretboard: &'a Fretboard) -> Self {
        assert!(
            fretboard.string_count() <= MAX_STRINGS,
            "fretboard has {} strings, search supports at most {}",
            fretboard.string_count(),
            MAX_STRINGS
        );
        VoicingSearch {
            fretboard,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// All voicings of a chord, allowing omitted notes for large formulas
    pub fn for_chord(&self, chord: &ChordSpec) -> Vec<Voicing> {
        let notes = chord.notes();
        self.search(&notes, Some(partial_minimum(notes.len())))
    }

    /// All voicings that play `notes` in order of discovery.
    ///
    /// `minimum` defaults to the number of distinct notes. A smaller value
    /// lets the search skip notes as long as enough can still be placed.
    pub fn search(&self, notes: &[PitchClass], minimum: Option<usize>) -> Vec<Voicing> {
        let mut targets: Vec<PitchClass> = Vec::with_capacity(notes.len());
        for &note in notes {
            if !targets.contains(&note) {
                targets.push(note);
            }
        }

        let mut found = Vec::new();
        if targets.is_empty() {
            return found;
        }

        let minimum = minimum.unwrap_or(targets.len()).clamp(1, targets.len());
        if minimum > self.limits.max_notes {
            return found;
        }

        let mut arena = Arena::new();
        self.place(&targets, 0, minimum, &mut arena, &mut found);

        debug!(
            notes = ?targets,
            minimum,
            found = found.len(),
            "voicing search finished"
        );
        found
    }

    fn place(
        &self,
        targets: &[PitchClass],
        index: usize,
        minimum: usize,
        arena: &mut Arena,
        found: &mut Vec<Voicing>,
    ) {
        if index == targets.len() {
            if arena.placed >= minimum && arena.placed <= self.limits.max_notes {
                found.push(arena.to_voicing());
            }
            return;
        }

        let target = targets[index];
        if arena.placed < self.limits.max_notes {
            for string in 0..self.fretboard.string_count() {
                if arena.frets[string].is_some() {
                    continue;
                }
                for fret in self.fretboard.frets_for(string, target) {
                    if self.fits(arena, string, fret) {
                        arena.set(string, fret);
                        self.place(targets, index + 1, minimum, arena, found);
                        arena.clear(string);
                    }
                }
            }
        }

        // Leave this note out if the rest can still reach the minimum
        let remaining = targets.len() - index - 1;
        if minimum < targets.len() && arena.placed + remaining >= minimum {
            self.place(targets, index + 1, minimum, arena, found);
        }
    }

    /// Hand-span check for adding `(string, fret)` to the current placement
    fn fits(&self, arena: &Arena, string: usize, fret: usize) -> bool {
        let mut low = string;
        let mut high = string;
        for (placed_string, placed_fret) in arena.occupied() {
            if placed_fret.abs_diff(fret) > self.limits.max_fret_span {
                return false;
            }
            low = low.min(placed_string);
            high = high.max(placed_string);
        }
        high - low <= self.limits.max_string_span
    }
}
