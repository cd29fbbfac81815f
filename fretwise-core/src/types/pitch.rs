use crate::error::{FretwiseError, Result};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A chromatic pitch class (0-11), with no octave.
/// 0=C, 1=C#/Db, 2=D, 3=D#/Eb, 4=E, 5=F, 6=F#/Gb, 7=G, 8=G#/Ab, 9=A, 10=A#/Bb, 11=B
///
/// All arithmetic wraps modulo 12, so transposition never leaves the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchClass(u8);

/// Canonical display names (sharp spelling)
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const D: PitchClass = PitchClass(2);
    pub const E: PitchClass = PitchClass(4);
    pub const F: PitchClass = PitchClass(5);
    pub const G: PitchClass = PitchClass(7);
    pub const A: PitchClass = PitchClass(9);
    pub const B: PitchClass = PitchClass(11);

    /// Create a pitch class from any integer, reducing it modulo 12
    pub const fn new(value: i32) -> Self {
        PitchClass(value.rem_euclid(12) as u8)
    }

    /// Get the chromatic index (0-11)
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Transpose by a signed number of semitones
    pub const fn transpose(self, semitones: i32) -> Self {
        PitchClass::new(self.0 as i32 + semitones)
    }

    /// Ascending distance from `root` up to this pitch class (0-11)
    pub const fn interval_from(self, root: PitchClass) -> u8 {
        (self.0 + 12 - root.0) % 12
    }

    /// Sharp spelling, e.g. "C#"
    pub fn name(self) -> &'static str {
        SHARP_NAMES[self.0 as usize]
    }

    /// Flat spelling, e.g. "Db"
    pub fn flat_name(self) -> &'static str {
        FLAT_NAMES[self.0 as usize]
    }

    /// Check whether this is a white-key note
    pub fn is_natural(self) -> bool {
        matches!(self.0, 0 | 2 | 4 | 5 | 7 | 9 | 11)
    }

    /// All twelve pitch classes, ascending from C
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..12).map(PitchClass::new)
    }
}

impl FromStr for PitchClass {
    type Err = FretwiseError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();

        let base = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(FretwiseError::InvalidNote(s.to_string())),
        };

        // Any number of accidentals may follow: "C#", "Bb", "Ebb", "F♯"
        let mut offset = 0i32;
        for c in chars {
            match c {
                '#' | '♯' | 's' | 'S' => offset += 1,
                'b' | '♭' => offset -= 1,
                _ => return Err(FretwiseError::InvalidNote(s.to_string())),
            }
        }

        Ok(PitchClass::new(base + offset))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<u8> for PitchClass {
    fn from(value: u8) -> Self {
        PitchClass::new(value as i32)
    }
}

impl Add<i32> for PitchClass {
    type Output = PitchClass;

    fn add(self, semitones: i32) -> Self::Output {
        self.transpose(semitones)
    }
}

impl Sub<i32> for PitchClass {
    type Output = PitchClass;

    fn sub(self, semitones: i32) -> Self::Output {
        self.transpose(-semitones)
    }
}

/// Interval in semitones from `other` up to `self`
impl Sub<PitchClass> for PitchClass {
    type Output = u8;

    fn sub(self, other: PitchClass) -> Self::Output {
        self.interval_from(other)
    }
}

/// Parse a whitespace or comma separated list of note names
pub fn parse_note_list(input: &str) -> Result<Vec<PitchClass>> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}
