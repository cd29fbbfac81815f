//! Generated chord progressions

use crate::types::chord::ChordSpec;
use crate::types::key::KeyContext;
use crate::types::roman_numeral::RomanNumeral;
use std::fmt;

#[cfg(feature = "colored")]
use colored::Colorize;

/// The musical job a progression does, which also bounds its length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    Loop,
    Phrase,
    Turnaround,
    Cinematic,
    Vamp,
}

impl Intent {
    /// Chord count a progression with this intent is cut to, if any
    pub fn max_length(self) -> Option<usize> {
        match self {
            Intent::Loop | Intent::Vamp | Intent::Turnaround => Some(4),
            Intent::Phrase | Intent::Cinematic => None,
        }
    }

    /// Whether templates with this intent are truncated
    pub fn is_truncated(self) -> bool {
        self.max_length().is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            Intent::Loop => "loop",
            Intent::Phrase => "phrase",
            Intent::Turnaround => "turnaround",
            Intent::Cinematic => "cinematic",
            Intent::Vamp => "vamp",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An ordered list of chords plus a description of where it came from
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    pub chords: Vec<ChordSpec>,
    pub name: String,
    pub description: String,
    pub intent: Intent,
    pub key: KeyContext,
    /// Where the seed chord sits in `chords`, when it appears at all
    pub selected_chord_index: Option<usize>,
    /// One label per chord, relative to `key`
    pub numerals: Vec<RomanNumeral>,
}

impl Progression {
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// The seed chord, if it is part of the progression
    pub fn selected_chord(&self) -> Option<&ChordSpec> {
        self.selected_chord_index.and_then(|i| self.chords.get(i))
    }

    /// Chord symbols joined with dashes, e.g. "C - G - Am - F"
    pub fn symbols(&self) -> String {
        self.chords
            .iter()
            .map(|c| c.symbol())
            .collect::<Vec<_>>()
            .join(" - ")
    }

    /// Numerals joined with dashes, e.g. "I - V - vi - IV"
    pub fn numeral_string(&self) -> String {
        self.numerals
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" - ")
    }
}

impl fmt::Display for Progression {
    #[cfg(feature = "colored")]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} in {}",
            self.name.bold(),
            format!("({})", self.intent).dimmed(),
            self.key
        )?;
        let chords: Vec<String> = self
            .chords
            .iter()
            .enumerate()
            .map(|(i, chord)| {
                if Some(i) == self.selected_chord_index {
                    chord.symbol().green().bold().to_string()
                } else {
                    chord.symbol()
                }
            })
            .collect();
        writeln!(f, "  {}", chords.join(" - "))?;
        write!(f, "  {}", self.numeral_string().cyan())
    }

    #[cfg(not(feature = "colored"))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}) in {}", self.name, self.intent, self.key)?;
        writeln!(f, "  {}", self.symbols())?;
        write!(f, "  {}", self.numeral_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::chord_type::ChordType;
    use crate::types::key::Mode;
    use crate::types::pitch::PitchClass;
    use crate::types::roman_numeral::ScaleDegree;

    #[test]
    fn test_intent_lengths() {
        assert_eq!(Intent::Loop.max_length(), Some(4));
        assert_eq!(Intent::Turnaround.max_length(), Some(4));
        assert!(Intent::Vamp.is_truncated());
        assert!(!Intent::Phrase.is_truncated());
        assert!(!Intent::Cinematic.is_truncated());
    }

    #[test]
    fn test_symbols_and_selection() {
        let c = ChordSpec::new(PitchClass::C, ChordType::Major);
        let g = ChordSpec::new(PitchClass::G, ChordType::Major);
        let progression = Progression {
            chords: vec![c, g],
            name: "Test".to_string(),
            description: String::new(),
            intent: Intent::Loop,
            key: KeyContext::new(PitchClass::C, Mode::Major),
            selected_chord_index: Some(1),
            numerals: vec![
                RomanNumeral::diatonic(ScaleDegree::I, ChordType::Major),
                RomanNumeral::diatonic(ScaleDegree::V, ChordType::Major),
            ],
        };
        assert_eq!(progression.symbols(), "C - G");
        assert_eq!(progression.numeral_string(), "I - V");
        assert_eq!(progression.selected_chord(), Some(&g));
        assert_eq!(progression.len(), 2);
    }
}
