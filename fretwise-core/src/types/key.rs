//! Key context: a tonic plus a seven-note mode

use crate::types::chord::ChordSpec;
use crate::types::chord_type::ChordType;
use crate::types::pitch::PitchClass;
use crate::types::roman_numeral::{RomanNumeral, ScaleDegree};
use std::fmt;

/// Seven-note scales used for degree lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    #[default]
    Major,
    Minor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
}

impl Mode {
    /// Semitone offsets of the seven scale degrees from the tonic
    pub const fn intervals(self) -> [u8; 7] {
        match self {
            Mode::Major => [0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => [0, 2, 3, 5, 7, 8, 10],
            Mode::Dorian => [0, 2, 3, 5, 7, 9, 10],
            Mode::Phrygian => [0, 1, 3, 5, 7, 8, 10],
            Mode::Lydian => [0, 2, 4, 6, 7, 9, 11],
            Mode::Mixolydian => [0, 2, 4, 5, 7, 9, 10],
        }
    }

    /// Whether the mode has a minor third above the tonic
    pub fn is_minor(self) -> bool {
        self.intervals()[2] == 3
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
            Mode::Dorian => "dorian",
            Mode::Phrygian => "phrygian",
            Mode::Lydian => "lydian",
            Mode::Mixolydian => "mixolydian",
        }
    }

    /// Parse mode from string (case-insensitive)
    pub fn from_name(s: &str) -> Option<Mode> {
        match s.to_lowercase().as_str() {
            "major" | "maj" | "ionian" => Some(Mode::Major),
            "minor" | "min" | "m" | "aeolian" => Some(Mode::Minor),
            "dorian" => Some(Mode::Dorian),
            "phrygian" => Some(Mode::Phrygian),
            "lydian" => Some(Mode::Lydian),
            "mixolydian" | "mixo" => Some(Mode::Mixolydian),
            _ => None,
        }
    }
}

/// A tonic and the mode its degrees are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyContext {
    pub tonic: PitchClass,
    pub mode: Mode,
}

impl KeyContext {
    pub fn new(tonic: PitchClass, mode: Mode) -> Self {
        KeyContext { tonic, mode }
    }

    /// Infer the key from a seed chord: its root is the tonic, and a
    /// minor-family quality selects the minor mode.
    pub fn infer(seed: &ChordSpec) -> Self {
        let mode = if seed.chord_type.is_minor_family() {
            Mode::Minor
        } else {
            Mode::Major
        };
        KeyContext::new(seed.root, mode)
    }

    pub fn is_minor(&self) -> bool {
        self.mode.is_minor()
    }

    /// Same tonic, different mode
    pub fn with_mode(&self, mode: Mode) -> Self {
        KeyContext::new(self.tonic, mode)
    }

    /// Root of scale degree `degree` (0-6, wraps above 6)
    pub fn degree_root(&self, degree: u8) -> PitchClass {
        let intervals = self.mode.intervals();
        self.tonic + intervals[(degree % 7) as usize] as i32
    }

    /// The triad built by stacking scale thirds on a degree
    pub fn triad_quality(&self, degree: u8) -> ChordType {
        let root = self.degree_root(degree);
        let third = self.degree_root(degree + 2).interval_from(root);
        let fifth = self.degree_root(degree + 4).interval_from(root);

        match (third, fifth) {
            (4, 7) => ChordType::Major,
            (3, 7) => ChordType::Minor,
            (3, 6) => ChordType::Diminished,
            (4, 8) => ChordType::Augmented,
            // Unreachable for the seven-note modes above
            _ => ChordType::Major,
        }
    }

    /// Label any chord by its root's distance from the tonic. Roots outside
    /// the scale are spelled as the degree above, lowered.
    pub fn analyze(&self, chord: &ChordSpec) -> RomanNumeral {
        let interval = chord.root.interval_from(self.tonic);
        let intervals = self.mode.intervals();
        let degree_of = |target: u8| {
            intervals
                .iter()
                .position(|&i| i == target % 12)
                .map(|d| ScaleDegree::from_index(d as u8))
        };

        if let Some(degree) = degree_of(interval) {
            RomanNumeral::diatonic(degree, chord.chord_type)
        } else if let Some(degree) = degree_of(interval + 1) {
            RomanNumeral::altered(degree, -1, chord.chord_type)
        } else {
            let degree = degree_of(interval + 11).unwrap_or(ScaleDegree::I);
            RomanNumeral::altered(degree, 1, chord.chord_type)
        }
    }

    /// The seven diatonic triads with their numerals
    pub fn diatonic_chords(&self) -> Vec<(RomanNumeral, ChordSpec)> {
        (0..7)
            .map(|degree| {
                let chord_type = self.triad_quality(degree);
                let spec = ChordSpec::new(self.degree_root(degree), chord_type);
                let numeral = RomanNumeral::diatonic(ScaleDegree::from_index(degree), chord_type);
                (numeral, spec)
            })
            .collect()
    }
}

impl fmt::Display for KeyContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.mode.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_key() {
        let seed = ChordSpec::new(PitchClass::A, ChordType::Minor7);
        assert_eq!(KeyContext::infer(&seed).mode, Mode::Minor);

        let seed = ChordSpec::new(PitchClass::G, ChordType::Dominant7);
        let key = KeyContext::infer(&seed);
        assert_eq!(key.mode, Mode::Major);
        assert_eq!(key.tonic, PitchClass::G);
    }

    #[test]
    fn test_degree_roots() {
        let key = KeyContext::new(PitchClass::C, Mode::Major);
        assert_eq!(key.degree_root(4), PitchClass::G);
        assert_eq!(key.degree_root(6), PitchClass::B);
        assert_eq!(key.degree_root(7), PitchClass::C);

        let phrygian = key.with_mode(Mode::Phrygian);
        assert_eq!(phrygian.degree_root(1).index(), 1);
    }

    #[test]
    fn test_major_diatonic_chords() {
        let key = KeyContext::new(PitchClass::C, Mode::Major);
        let labels: Vec<String> = key
            .diatonic_chords()
            .iter()
            .map(|(numeral, _)| numeral.to_string())
            .collect();
        assert_eq!(labels, vec!["I", "ii", "iii", "IV", "V", "vi", "vii°"]);
    }

    #[test]
    fn test_minor_diatonic_chords() {
        let key = KeyContext::new(PitchClass::A, Mode::Minor);
        let chords = key.diatonic_chords();
        let labels: Vec<String> = chords.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(labels, vec!["i", "ii°", "III", "iv", "v", "VI", "VII"]);
        assert_eq!(chords[2].1, ChordSpec::new(PitchClass::C, ChordType::Major));
    }

    #[test]
    fn test_analyze_borrowed_chords() {
        let key = KeyContext::new(PitchClass::C, Mode::Major);
        let label = |root: i32, chord_type| {
            key.analyze(&ChordSpec::new(PitchClass::new(root), chord_type))
                .to_string()
        };
        assert_eq!(label(2, ChordType::Minor7), "ii7");
        assert_eq!(label(10, ChordType::Dominant7), "bVII7");
        assert_eq!(label(8, ChordType::Major), "bVI");
        assert_eq!(label(7, ChordType::Dominant7), "V7");
    }

    #[test]
    fn test_mode_is_minor() {
        assert!(Mode::Dorian.is_minor());
        assert!(Mode::Phrygian.is_minor());
        assert!(!Mode::Lydian.is_minor());
        assert!(!Mode::Mixolydian.is_minor());
        assert_eq!(Mode::from_name("Mixo"), Some(Mode::Mixolydian));
        assert_eq!(Mode::from_name("locrian"), None);
    }
}
