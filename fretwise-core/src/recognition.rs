//! Chord and interval recognition from tapped positions or note names
//!
//! Matching works on interval sets relative to a candidate root, encoded as
//! 12-bit masks, so the result never depends on absolute pitch.

use crate::types::chord_type::ChordType;
use crate::types::fretboard::{FretPosition, Fretboard};
use crate::types::pitch::PitchClass;
use std::fmt;
use tracing::trace;

/// Interval names from unison up to the major ninth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntervalName {
    PerfectUnison,
    MinorSecond,
    MajorSecond,
    MinorThird,
    MajorThird,
    PerfectFourth,
    Tritone,
    PerfectFifth,
    MinorSixth,
    MajorSixth,
    MinorSeventh,
    MajorSeventh,
    Octave,
    MinorNinth,
    MajorNinth,
}

impl IntervalName {
    const TABLE: [IntervalName; 15] = [
        IntervalName::PerfectUnison,
        IntervalName::MinorSecond,
        IntervalName::MajorSecond,
        IntervalName::MinorThird,
        IntervalName::MajorThird,
        IntervalName::PerfectFourth,
        IntervalName::Tritone,
        IntervalName::PerfectFifth,
        IntervalName::MinorSixth,
        IntervalName::MajorSixth,
        IntervalName::MinorSeventh,
        IntervalName::MajorSeventh,
        IntervalName::Octave,
        IntervalName::MinorNinth,
        IntervalName::MajorNinth,
    ];

    /// Name for a span of 0..=14 semitones
    pub fn from_semitones(semitones: u8) -> Option<Self> {
        Self::TABLE.get(semitones as usize).copied()
    }

    pub fn semitones(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            IntervalName::PerfectUnison => "perfect unison",
            IntervalName::MinorSecond => "minor 2nd",
            IntervalName::MajorSecond => "major 2nd",
            IntervalName::MinorThird => "minor 3rd",
            IntervalName::MajorThird => "major 3rd",
            IntervalName::PerfectFourth => "perfect 4th",
            IntervalName::Tritone => "tritone",
            IntervalName::PerfectFifth => "perfect 5th",
            IntervalName::MinorSixth => "minor 6th",
            IntervalName::MajorSixth => "major 6th",
            IntervalName::MinorSeventh => "minor 7th",
            IntervalName::MajorSeventh => "major 7th",
            IntervalName::Octave => "octave",
            IntervalName::MinorNinth => "minor 9th",
            IntervalName::MajorNinth => "major 9th",
        }
    }
}

impl fmt::Display for IntervalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What a set of notes was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Recognition {
    /// Fewer than two distinct notes, or no catalog match
    None,
    Interval {
        root: PitchClass,
        name: IntervalName,
        semitones: u8,
    },
    Chord {
        root: PitchClass,
        chord_type: ChordType,
    },
}

impl Recognition {
    pub fn is_none(&self) -> bool {
        matches!(self, Recognition::None)
    }

    pub fn root(&self) -> Option<PitchClass> {
        match self {
            Recognition::None => None,
            Recognition::Interval { root, .. } | Recognition::Chord { root, .. } => Some(*root),
        }
    }
}

impl fmt::Display for Recognition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recognition::None => write!(f, "no match"),
            Recognition::Interval {
                root,
                name,
                semitones,
            } => write!(f, "{} + {} ({} semitones)", root, name, semitones),
            Recognition::Chord { root, chord_type } => {
                write!(f, "{}{} ({} {})", root, chord_type.symbol(), root, chord_type.name())
            }
        }
    }
}

/// Recognize the notes under a set of fretboard positions.
///
/// Panics if a position lies off the board.
pub fn recognize(positions: &[FretPosition], fretboard: &Fretboard) -> Recognition {
    let pitches: Vec<PitchClass> = positions.iter().map(|&p| fretboard.pitch_at(p)).collect();
    recognize_pitches(&pitches)
}

/// Recognize a list of note names such as `["C", "E", "G"]`.
///
/// Names that fail to parse are skipped.
pub fn recognize_names(names: &[&str]) -> Recognition {
    let pitches: Vec<PitchClass> = names.iter().filter_map(|n| n.parse().ok()).collect();
    recognize_pitches(&pitches)
}

/// Recognize a list of pitch classes. Order matters only for intervals
/// (the first note is the root) and for tie-breaking between roots.
pub fn recognize_pitches(pitches: &[PitchClass]) -> Recognition {
    let distinct = distinct_in_order(pitches);

    match distinct.len() {
        0 | 1 => Recognition::None,
        2 => {
            let (root, other) = (distinct[0], distinct[1]);
            let semitones = other.interval_from(root);
            match IntervalName::from_semitones(semitones) {
                Some(name) => Recognition::Interval {
                    root,
                    name,
                    semitones,
                },
                None => Recognition::None,
            }
        }
        _ => match_chord(&distinct),
    }
}

fn distinct_in_order(pitches: &[PitchClass]) -> Vec<PitchClass> {
    let mut distinct: Vec<PitchClass> = Vec::with_capacity(pitches.len());
    for &pitch in pitches {
        if !distinct.contains(&pitch) {
            distinct.push(pitch);
        }
    }
    distinct
}

/// Bit `i` set when the interval `i` semitones above `root` is present
fn interval_mask(pitches: &[PitchClass], root: PitchClass) -> u16 {
    pitches
        .iter()
        .fold(0u16, |mask, p| mask | (1 << p.interval_from(root)))
}

fn formula_mask(chord_type: ChordType) -> u16 {
    chord_type
        .formula()
        .iter()
        .fold(0u16, |mask, &offset| mask | (1 << offset))
}

/// Candidate roots: the notes present, ascending from the first one supplied
fn candidate_roots(distinct: &[PitchClass]) -> impl Iterator<Item = PitchClass> + '_ {
    let first = distinct[0];
    (0..12)
        .map(move |step| first + step)
        .filter(move |root| distinct.contains(root))
}

fn match_chord(distinct: &[PitchClass]) -> Recognition {
    // Exact pass over every root before any omission is tolerated
    for root in candidate_roots(distinct) {
        let mask = interval_mask(distinct, root);
        if let Some(&chord_type) = ChordType::ALL.iter().find(|&&t| formula_mask(t) == mask) {
            trace!(%root, ?chord_type, "exact chord match");
            return Recognition::Chord { root, chord_type };
        }
    }

    for root in candidate_roots(distinct) {
        let mask = interval_mask(distinct, root);
        let found = ChordType::OMISSION_TOLERANT.iter().find(|&&t| {
            let formula = formula_mask(t);
            mask != formula && mask & formula == mask
        });
        if let Some(&chord_type) = found {
            trace!(%root, ?chord_type, "partial chord match");
            return Recognition::Chord { root, chord_type };
        }
    }

    Recognition::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fretboard::Tuning;

    fn toy_board() -> Fretboard {
        let tuning = Tuning::new("toy", vec![PitchClass::C, PitchClass::E, PitchClass::G]).unwrap();
        Fretboard::new(tuning, 5).unwrap()
    }

    fn chord(root: &str, chord_type: ChordType) -> Recognition {
        Recognition::Chord {
            root: root.parse().unwrap(),
            chord_type,
        }
    }

    #[test]
    fn test_toy_interval() {
        let board = toy_board();
        let result = recognize(&[FretPosition::new(0, 0), FretPosition::new(2, 0)], &board);
        assert_eq!(
            result,
            Recognition::Interval {
                root: PitchClass::C,
                name: IntervalName::PerfectFifth,
                semitones: 7,
            }
        );
    }

    #[test]
    fn test_interval_root_is_first_note() {
        let result = recognize_names(&["G", "C"]);
        assert_eq!(
            result,
            Recognition::Interval {
                root: PitchClass::G,
                name: IntervalName::PerfectFourth,
                semitones: 5,
            }
        );
    }

    #[test]
    fn test_too_few_notes() {
        assert!(recognize_names(&[]).is_none());
        assert!(recognize_names(&["C"]).is_none());
        assert!(recognize_names(&["C", "C", "C"]).is_none());
    }

    #[test]
    fn test_duplicates_collapse_to_interval() {
        let result = recognize_names(&["C", "E", "C", "E"]);
        assert!(matches!(result, Recognition::Interval { semitones: 4, .. }));
    }

    #[test]
    fn test_triads_and_sevenths() {
        assert_eq!(recognize_names(&["C", "E", "G"]), chord("C", ChordType::Major));
        assert_eq!(recognize_names(&["E", "G", "C"]), chord("C", ChordType::Major));
        assert_eq!(recognize_names(&["A", "C", "E"]), chord("A", ChordType::Minor));
        assert_eq!(recognize_names(&["G", "B", "D", "F"]), chord("G", ChordType::Dominant7));
        assert_eq!(recognize_names(&["B", "D", "F", "A"]), chord("B", ChordType::HalfDiminished7));
    }

    #[test]
    fn test_first_note_breaks_symmetry() {
        // C6 and Am7 share notes; the scan starts at the first note supplied
        assert_eq!(recognize_names(&["C", "E", "G", "A"]), chord("C", ChordType::Major6));
        assert_eq!(recognize_names(&["A", "C", "E", "G"]), chord("A", ChordType::Minor7));
    }

    #[test]
    fn test_partial_match_after_exact_pass() {
        // C E Bb D F: no exact formula for any root, but a subset of C13(no5)
        assert_eq!(
            recognize_names(&["C", "E", "A#", "D", "F"]),
            chord("C", ChordType::Dominant13No5)
        );
        assert_eq!(
            recognize_names(&["C", "E", "A#", "D"]),
            chord("C", ChordType::Dominant9No5)
        );
        assert_eq!(
            recognize_names(&["C", "E", "A#", "A"]),
            chord("C", ChordType::Dominant13No5)
        );
    }

    #[test]
    fn test_unmatched_cluster() {
        assert!(recognize_names(&["C", "C#", "D"]).is_none());
    }

    #[test]
    fn test_interval_names() {
        assert_eq!(IntervalName::from_semitones(12), Some(IntervalName::Octave));
        assert_eq!(IntervalName::from_semitones(14).map(|n| n.name()), Some("major 9th"));
        assert_eq!(IntervalName::from_semitones(15), None);
        assert_eq!(IntervalName::Tritone.semitones(), 6);
    }
}
