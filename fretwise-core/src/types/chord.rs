use crate::error::{FretwiseError, Result};
use crate::types::chord_type::ChordType;
use crate::types::key::KeyContext;
use crate::types::pitch::PitchClass;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// A chord named by its root and quality. Fully determines the required notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordSpec {
    pub root: PitchClass,
    pub chord_type: ChordType,
}

impl ChordSpec {
    pub fn new(root: PitchClass, chord_type: ChordType) -> Self {
        ChordSpec { root, chord_type }
    }

    /// Required pitch classes in formula order, root first
    pub fn notes(&self) -> Vec<PitchClass> {
        self.chord_type
            .formula()
            .iter()
            .map(|&offset| self.root + offset as i32)
            .collect()
    }

    /// Check whether a pitch class belongs to this chord
    pub fn contains(&self, pitch: PitchClass) -> bool {
        self.chord_type
            .formula()
            .contains(&pitch.interval_from(self.root))
    }

    /// Required notes with an optional added seventh and ninth.
    ///
    /// The seventh is flat when the chord is minor or diminished, is already a
    /// minor/dominant/diminished seventh, or is a major triad on the key's
    /// dominant (V in major, VII in minor). Otherwise it is a major seventh.
    pub fn notes_with_extensions(
        &self,
        key: &KeyContext,
        seventh: bool,
        ninth: bool,
    ) -> Vec<PitchClass> {
        let mut notes = self.notes();

        if seventh {
            let offset = if self.uses_flat_seventh(key) { 10 } else { 11 };
            push_unique(&mut notes, self.root + offset);
        }
        if ninth {
            push_unique(&mut notes, self.root + 14);
        }

        notes
    }

    fn uses_flat_seventh(&self, key: &KeyContext) -> bool {
        let dominant_root = if key.is_minor() {
            key.tonic + 10
        } else {
            key.tonic + 7
        };

        match self.chord_type {
            ChordType::Minor7 | ChordType::Dominant7 | ChordType::Diminished7 => true,
            ChordType::Minor | ChordType::Diminished => true,
            ChordType::Major => self.root == dominant_root,
            _ => false,
        }
    }

    /// Chord symbol, e.g. "F#m7"
    pub fn symbol(&self) -> String {
        format!("{}{}", self.root, self.chord_type.symbol())
    }
}

fn push_unique(notes: &mut Vec<PitchClass>, pitch: PitchClass) {
    if !notes.contains(&pitch) {
        notes.push(pitch);
    }
}

impl fmt::Display for ChordSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.chord_type.symbol())
    }
}

/// Transpose the root, keeping the quality
impl Add<i32> for ChordSpec {
    type Output = ChordSpec;

    fn add(self, semitones: i32) -> Self::Output {
        ChordSpec::new(self.root + semitones, self.chord_type)
    }
}

impl FromStr for ChordSpec {
    type Err = FretwiseError;

    /// Parse "C", "F#m7", "Bbmaj7#11" or "A minor7"
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.char_indices();
        chars.next();

        // Root is the letter plus any accidentals directly after it
        let mut split = trimmed.len();
        for (index, c) in chars {
            if !matches!(c, '#' | 'b' | '♯' | '♭') {
                split = index;
                break;
            }
        }

        let (root_part, type_part) = trimmed.split_at(split);
        let root: PitchClass = root_part.parse()?;
        let type_part = type_part.trim();
        let chord_type = if type_part.is_empty() {
            ChordType::Major
        } else {
            type_part.parse()?
        };

        Ok(ChordSpec::new(root, chord_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::key::Mode;

    fn pcs(names: &[&str]) -> Vec<PitchClass> {
        names.iter().map(|n| n.parse().unwrap()).collect()
    }

    #[test]
    fn test_notes_in_formula_order() {
        let d_minor9 = ChordSpec::new("D".parse().unwrap(), ChordType::Minor9);
        assert_eq!(d_minor9.notes(), pcs(&["D", "F", "A", "C", "E"]));
    }

    #[test]
    fn test_contains() {
        let g7 = ChordSpec::new(PitchClass::G, ChordType::Dominant7);
        assert!(g7.contains(PitchClass::F));
        assert!(!g7.contains(PitchClass::C));
    }

    #[test]
    fn test_parse() {
        let spec: ChordSpec = "F#m7".parse().unwrap();
        assert_eq!(spec, ChordSpec::new(PitchClass::new(6), ChordType::Minor7));

        let spec: ChordSpec = "Bbmaj7#11".parse().unwrap();
        assert_eq!(spec.root.index(), 10);
        assert_eq!(spec.chord_type, ChordType::Major7Sharp11);

        let spec: ChordSpec = "C".parse().unwrap();
        assert_eq!(spec.chord_type, ChordType::Major);

        let spec: ChordSpec = "A minor7".parse().unwrap();
        assert_eq!(spec, ChordSpec::new(PitchClass::A, ChordType::Minor7));

        // "b" right after the letter is a flat, so "Bb" is B-flat major
        let spec: ChordSpec = "Bb".parse().unwrap();
        assert_eq!(spec.chord_type, ChordType::Major);

        assert!("Xm".parse::<ChordSpec>().is_err());
        assert!("Cfoo".parse::<ChordSpec>().is_err());
    }

    #[test]
    fn test_flat_seventh_on_dominant() {
        let c_major = KeyContext::new(PitchClass::C, Mode::Major);
        let g = ChordSpec::new(PitchClass::G, ChordType::Major);
        assert_eq!(
            g.notes_with_extensions(&c_major, true, false),
            pcs(&["G", "B", "D", "F"])
        );

        let c = ChordSpec::new(PitchClass::C, ChordType::Major);
        assert_eq!(
            c.notes_with_extensions(&c_major, true, true),
            pcs(&["C", "E", "G", "B", "D"])
        );
    }

    #[test]
    fn test_flat_seventh_in_minor_key() {
        let a_minor = KeyContext::new(PitchClass::A, Mode::Minor);
        let g = ChordSpec::new(PitchClass::G, ChordType::Major);
        assert!(g.notes_with_extensions(&a_minor, true, false).contains(&PitchClass::F));

        let d_minor = ChordSpec::new(PitchClass::D, ChordType::Minor);
        assert!(d_minor
            .notes_with_extensions(&a_minor, true, false)
            .contains(&PitchClass::C));
    }

    #[test]
    fn test_extension_does_not_duplicate() {
        let key = KeyContext::new(PitchClass::C, Mode::Major);
        let g7 = ChordSpec::new(PitchClass::G, ChordType::Dominant7);
        assert_eq!(g7.notes_with_extensions(&key, true, false).len(), 4);
    }

    #[test]
    fn test_transpose_and_display() {
        let spec = ChordSpec::new(PitchClass::A, ChordType::Minor7) + 3;
        assert_eq!(spec.to_string(), "Cm7");
        assert_eq!(spec.symbol(), "Cm7");
    }
}
