//! Scale-degree slots and their resolution to concrete chords

use crate::types::chord::ChordSpec;
use crate::types::chord_type::ChordType;
use crate::types::key::KeyContext;
use crate::types::pitch::PitchClass;
use crate::types::roman_numeral::{RomanNumeral, ScaleDegree};

/// Where a template chord's root comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegreeSpec {
    /// Scale degree 0-6, shifted by -1, 0 or +1 semitones for borrowed chords
    Normal { degree: u8, alteration: i8 },
    /// The dominant of `target`: a perfect fifth above the target's root
    SecondaryDominant { target: u8 },
    /// The tritone substitute for `target`'s secondary dominant
    TritoneSub { target: u8 },
}

impl DegreeSpec {
    /// Root pitch class of this slot in `key`
    pub fn resolve(self, key: &KeyContext) -> PitchClass {
        match self {
            DegreeSpec::Normal { degree, alteration } => {
                key.degree_root(degree) + alteration as i32
            }
            DegreeSpec::SecondaryDominant { target } => key.degree_root(target) + 7,
            DegreeSpec::TritoneSub { target } => key.degree_root(target) + 7 + 6,
        }
    }

    /// Whether the slot acts as a dominant, so a major triad there takes a
    /// minor seventh when extended
    pub fn is_dominant_position(self) -> bool {
        match self {
            DegreeSpec::Normal { degree, alteration } => degree == 4 && alteration == 0,
            DegreeSpec::SecondaryDominant { .. } | DegreeSpec::TritoneSub { .. } => true,
        }
    }

    /// Roman numeral label for a chord of `chord_type` in this slot
    pub fn numeral(self, key: &KeyContext, chord_type: ChordType) -> RomanNumeral {
        match self {
            DegreeSpec::Normal { degree, alteration } => {
                RomanNumeral::altered(ScaleDegree::from_index(degree), alteration, chord_type)
            }
            DegreeSpec::SecondaryDominant { target } => {
                RomanNumeral::secondary_dominant(&target_numeral(key, target), chord_type)
            }
            DegreeSpec::TritoneSub { target } => {
                RomanNumeral::tritone_sub(&target_numeral(key, target), chord_type)
            }
        }
    }
}

fn target_numeral(key: &KeyContext, target: u8) -> RomanNumeral {
    RomanNumeral::diatonic(ScaleDegree::from_index(target), key.triad_quality(target))
}

/// One chord of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub degree: DegreeSpec,
    pub chord_type: ChordType,
}

impl Step {
    /// The chord type after extension propagation
    pub fn chord_type(&self, extend: bool) -> ChordType {
        if extend {
            self.chord_type.with_seventh(self.degree.is_dominant_position())
        } else {
            self.chord_type
        }
    }

    /// Resolve to a chord and its label in `key`
    pub fn realize(&self, key: &KeyContext, extend: bool) -> (ChordSpec, RomanNumeral) {
        let chord_type = self.chord_type(extend);
        let chord = ChordSpec::new(self.degree.resolve(key), chord_type);
        (chord, self.degree.numeral(key, chord_type))
    }
}

/// Diatonic degree
pub const fn on(degree: u8, chord_type: ChordType) -> Step {
    Step {
        degree: DegreeSpec::Normal {
            degree,
            alteration: 0,
        },
        chord_type,
    }
}

/// Degree lowered a semitone (borrowed chord)
pub const fn flat(degree: u8, chord_type: ChordType) -> Step {
    Step {
        degree: DegreeSpec::Normal {
            degree,
            alteration: -1,
        },
        chord_type,
    }
}

/// Secondary dominant of `target`
pub const fn sec(target: u8, chord_type: ChordType) -> Step {
    Step {
        degree: DegreeSpec::SecondaryDominant { target },
        chord_type,
    }
}

/// Tritone substitute resolving to `target`
pub const fn sub(target: u8, chord_type: ChordType) -> Step {
    Step {
        degree: DegreeSpec::TritoneSub { target },
        chord_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::key::Mode;

    fn c_major() -> KeyContext {
        KeyContext::new(PitchClass::C, Mode::Major)
    }

    #[test]
    fn test_resolve_normal_and_borrowed() {
        let key = c_major();
        assert_eq!(on(4, ChordType::Major).degree.resolve(&key), PitchClass::G);
        assert_eq!(flat(5, ChordType::Major).degree.resolve(&key).index(), 8);
        assert_eq!(flat(6, ChordType::Major).degree.resolve(&key).index(), 10);
    }

    #[test]
    fn test_resolve_secondary_and_tritone() {
        let key = c_major();
        // V7/vi in C is E7
        assert_eq!(sec(5, ChordType::Dominant7).degree.resolve(&key), PitchClass::E);
        // subV7/I in C is Db7
        assert_eq!(sub(0, ChordType::Dominant7).degree.resolve(&key).index(), 1);
        // subV7/ii in C is Eb7
        assert_eq!(sub(1, ChordType::Dominant7).degree.resolve(&key).index(), 3);
    }

    #[test]
    fn test_extension_propagation() {
        assert_eq!(on(4, ChordType::Major).chord_type(true), ChordType::Dominant7);
        assert_eq!(on(0, ChordType::Major).chord_type(true), ChordType::Major7);
        assert_eq!(flat(6, ChordType::Major).chord_type(true), ChordType::Major7);
        assert_eq!(on(1, ChordType::Minor).chord_type(true), ChordType::Minor7);
        assert_eq!(on(6, ChordType::Diminished).chord_type(true), ChordType::HalfDiminished7);
        assert_eq!(sec(5, ChordType::Major).chord_type(true), ChordType::Dominant7);
        assert_eq!(on(4, ChordType::Major).chord_type(false), ChordType::Major);
    }

    #[test]
    fn test_numerals() {
        let key = c_major();
        let (chord, numeral) = sec(5, ChordType::Dominant7).realize(&key, false);
        assert_eq!(chord.symbol(), "E7");
        assert_eq!(numeral.to_string(), "V7/vi");

        let (chord, numeral) = flat(5, ChordType::Major).realize(&key, false);
        assert_eq!(chord.symbol(), "G#");
        assert_eq!(numeral.to_string(), "bVI");

        let (_, numeral) = sub(0, ChordType::Dominant7).realize(&key, false);
        assert_eq!(numeral.to_string(), "subV7/I");
    }
}
