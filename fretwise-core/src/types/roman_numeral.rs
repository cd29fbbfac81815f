// Roman numeral labels for chords in a key
use crate::types::chord_type::ChordType;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleDegree {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
}

impl ScaleDegree {
    /// Degree from a zero-based index (wraps above 6)
    pub fn from_index(index: u8) -> Self {
        match index % 7 {
            0 => ScaleDegree::I,
            1 => ScaleDegree::II,
            2 => ScaleDegree::III,
            3 => ScaleDegree::IV,
            4 => ScaleDegree::V,
            5 => ScaleDegree::VI,
            _ => ScaleDegree::VII,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    fn upper(self) -> &'static str {
        match self {
            ScaleDegree::I => "I",
            ScaleDegree::II => "II",
            ScaleDegree::III => "III",
            ScaleDegree::IV => "IV",
            ScaleDegree::V => "V",
            ScaleDegree::VI => "VI",
            ScaleDegree::VII => "VII",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Accidental {
    Flat,
    Sharp,
}

impl Accidental {
    /// Accidental for a semitone alteration, `None` for 0
    pub fn from_alteration(alteration: i8) -> Option<Self> {
        match alteration.signum() {
            -1 => Some(Accidental::Flat),
            1 => Some(Accidental::Sharp),
            _ => None,
        }
    }
}

/// How the labelled chord relates to the key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumeralFunction {
    Diatonic,
    /// Dominant of the labelled target, e.g. "V7/vi"
    SecondaryDominant(String),
    /// Tritone substitute for the target's dominant, e.g. "subV7/ii"
    TritoneSub(String),
}

/// A Roman numeral label such as "bVI", "iiø7" or "V7/vi"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RomanNumeral {
    pub degree: ScaleDegree,
    pub accidental: Option<Accidental>,
    pub chord_type: ChordType,
    pub function: NumeralFunction,
}

impl RomanNumeral {
    pub fn diatonic(degree: ScaleDegree, chord_type: ChordType) -> Self {
        RomanNumeral {
            degree,
            accidental: None,
            chord_type,
            function: NumeralFunction::Diatonic,
        }
    }

    pub fn altered(degree: ScaleDegree, alteration: i8, chord_type: ChordType) -> Self {
        RomanNumeral {
            degree,
            accidental: Accidental::from_alteration(alteration),
            chord_type,
            function: NumeralFunction::Diatonic,
        }
    }

    /// "V<quality>/<target>"
    pub fn secondary_dominant(target: &RomanNumeral, chord_type: ChordType) -> Self {
        RomanNumeral {
            degree: ScaleDegree::V,
            accidental: None,
            chord_type,
            function: NumeralFunction::SecondaryDominant(target.to_string()),
        }
    }

    /// "subV<quality>/<target>"
    pub fn tritone_sub(target: &RomanNumeral, chord_type: ChordType) -> Self {
        RomanNumeral {
            degree: ScaleDegree::V,
            accidental: None,
            chord_type,
            function: NumeralFunction::TritoneSub(target.to_string()),
        }
    }

    fn is_lowercase(&self) -> bool {
        self.chord_type.is_minor_family() && !self.chord_type.is_dominant()
    }

    /// Quality suffix that follows the numeral
    fn suffix(&self) -> String {
        match self.chord_type {
            ChordType::Major | ChordType::Minor => String::new(),
            ChordType::Diminished => "°".to_string(),
            ChordType::Diminished7 => "°7".to_string(),
            ChordType::HalfDiminished7 => "ø7".to_string(),
            ChordType::Augmented => "+".to_string(),
            other => {
                let symbol = other.symbol();
                // Lowercase numerals already say "minor"
                if self.is_lowercase() && symbol.starts_with('m') && !symbol.starts_with("maj") {
                    symbol[1..].to_string()
                } else {
                    symbol.to_string()
                }
            }
        }
    }
}

impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = if self.is_lowercase() {
            self.degree.upper().to_lowercase()
        } else {
            self.degree.upper().to_string()
        };

        match &self.function {
            NumeralFunction::Diatonic => {
                if let Some(accidental) = self.accidental {
                    match accidental {
                        Accidental::Flat => write!(f, "b")?,
                        Accidental::Sharp => write!(f, "#")?,
                    }
                }
                write!(f, "{}{}", base, self.suffix())
            }
            NumeralFunction::SecondaryDominant(target) => {
                write!(f, "{}{}/{}", base, self.suffix(), target)
            }
            NumeralFunction::TritoneSub(target) => {
                write!(f, "sub{}{}/{}", base, self.suffix(), target)
            }
        }
    }
}
