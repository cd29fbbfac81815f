//! Playable stand-ins for chords the regular search could not voice
//!
//! Tried in order, each nearest `target_fret`:
//! 1. any three chord tones, searched with the wide hand limits
//! 2. a root and fifth dyad
//! 3. the root alone

use super::closest_voicing;
use crate::config::SearchLimits;
use crate::search::VoicingSearch;
use crate::types::chord::ChordSpec;
use crate::types::fretboard::Fretboard;
use crate::types::voicing::Voicing;
use tracing::debug;

/// Fret span allowed when picking among fallback shapes
const FALLBACK_MAX_SPAN: usize = 4;

/// Something playable for `chord` near `target_fret`.
///
/// Empty only when the board cannot sound the chord's root at all, which
/// needs a board shorter than an octave.
pub fn fallback_voicing(fretboard: &Fretboard, chord: &ChordSpec, target_fret: f32) -> Voicing {
    let search = VoicingSearch::new(fretboard).with_limits(SearchLimits::wide());

    let notes = chord.notes();
    let shapes = search.search(&notes, Some(notes.len().min(3)));
    if let Some(shape) = closest_voicing(&shapes, target_fret, FALLBACK_MAX_SPAN) {
        debug!(chord = %chord, voicing = %shape, "fallback shape");
        return shape.clone();
    }

    let dyads = search.search(&[chord.root, chord.root + 7], None);
    if let Some(dyad) = closest_voicing(&dyads, target_fret, FALLBACK_MAX_SPAN) {
        debug!(chord = %chord, voicing = %dyad, "fallback dyad");
        return dyad.clone();
    }

    let mut best = None;
    for position in fretboard.positions_of(chord.root) {
        let distance = (position.fret as f32 - target_fret).abs();
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((position, distance));
        }
    }
    match best {
        Some((position, _)) => {
            debug!(chord = %chord, position = %position, "fallback root");
            Voicing::new(vec![position])
        }
        None => Voicing::empty(),
    }
}
