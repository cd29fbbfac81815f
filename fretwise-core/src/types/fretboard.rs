//! The instrument grid: strings × frets → pitch class

use crate::error::{FretwiseError, Result};
use crate::types::pitch::{parse_note_list, PitchClass};
use std::fmt;
use std::str::FromStr;

/// Largest number of strings the voicing search arena supports
pub const MAX_STRINGS: usize = 8;

/// Largest number of fret columns a fretboard may have
pub const MAX_FRETS: usize = 30;

/// A single finger placement. Fret 0 is the open string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FretPosition {
    pub string: usize,
    pub fret: usize,
}

impl FretPosition {
    pub fn new(string: usize, fret: usize) -> Self {
        FretPosition { string, fret }
    }
}

impl fmt::Display for FretPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.string, self.fret)
    }
}

impl FromStr for FretPosition {
    type Err = FretwiseError;

    /// Parse "string:fret", e.g. "2:5"
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || FretwiseError::InvalidPosition(s.to_string());
        let (string, fret) = s.trim().split_once(':').ok_or_else(invalid)?;
        let string = string.trim().parse().map_err(|_| invalid())?;
        let fret = fret.trim().parse().map_err(|_| invalid())?;
        Ok(FretPosition::new(string, fret))
    }
}

/// Open-string pitch classes, listed from string 0 upwards
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tuning {
    name: String,
    open_strings: Vec<PitchClass>,
}

impl Tuning {
    /// Build a tuning from open-string pitch classes
    pub fn new(name: &str, open_strings: Vec<PitchClass>) -> Result<Self> {
        if open_strings.is_empty() {
            return Err(FretwiseError::InvalidTuning("no strings".to_string()));
        }
        if open_strings.len() > MAX_STRINGS {
            return Err(FretwiseError::InvalidTuning(format!(
                "{} strings exceeds the maximum of {}",
                open_strings.len(),
                MAX_STRINGS
            )));
        }
        Ok(Tuning {
            name: name.to_string(),
            open_strings,
        })
    }

    fn preset(name: &str, notes: [u8; 6]) -> Self {
        Tuning {
            name: name.to_string(),
            open_strings: notes.iter().map(|&n| PitchClass::from(n)).collect(),
        }
    }

    /// Six-string standard tuning, high E on string 0: E B G D A E
    pub fn standard() -> Self {
        Self::preset("standard", [4, 11, 7, 2, 9, 4])
    }

    /// Standard with the low string dropped to D: E B G D A D
    pub fn drop_d() -> Self {
        Self::preset("drop-d", [4, 11, 7, 2, 9, 2])
    }

    /// D A D G A D (high to low)
    pub fn dadgad() -> Self {
        Self::preset("dadgad", [2, 9, 7, 2, 9, 2])
    }

    /// Open G: D B G D G D (high to low)
    pub fn open_g() -> Self {
        Self::preset("open-g", [2, 11, 7, 2, 7, 2])
    }

    /// Open D: D A F# D A D (high to low)
    pub fn open_d() -> Self {
        Self::preset("open-d", [2, 9, 6, 2, 9, 2])
    }

    /// Every string a semitone down: Eb Bb Gb Db Ab Eb
    pub fn half_step_down() -> Self {
        Self::preset("half-step-down", [3, 10, 6, 1, 8, 3])
    }

    /// Look up a named preset (case-insensitive)
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "standard" | "std" | "e" => Some(Self::standard()),
            "drop-d" | "dropd" | "drop_d" => Some(Self::drop_d()),
            "dadgad" => Some(Self::dadgad()),
            "open-g" | "openg" | "open_g" => Some(Self::open_g()),
            "open-d" | "opend" | "open_d" => Some(Self::open_d()),
            "half-step-down" | "eb" => Some(Self::half_step_down()),
            _ => None,
        }
    }

    pub fn preset_names() -> &'static [&'static str] {
        &["standard", "drop-d", "dadgad", "open-g", "open-d", "half-step-down"]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn open_strings(&self) -> &[PitchClass] {
        &self.open_strings
    }

    pub fn string_count(&self) -> usize {
        self.open_strings.len()
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromStr for Tuning {
    type Err = FretwiseError;

    /// A preset name, or a list of open-string notes ("E B G D A E")
    fn from_str(s: &str) -> Result<Self> {
        if let Some(preset) = Tuning::from_preset(s.trim()) {
            return Ok(preset);
        }
        let notes = parse_note_list(s).map_err(|_| FretwiseError::InvalidTuning(s.to_string()))?;
        Tuning::new("custom", notes)
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notes: Vec<&str> = self.open_strings.iter().map(|p| p.name()).collect();
        write!(f, "{} ({})", self.name, notes.join(" "))
    }
}

/// Immutable pitch-class grid, indexed `[string][fret]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fretboard {
    tuning: Tuning,
    grid: Vec<Vec<PitchClass>>,
}

impl Fretboard {
    /// Build the grid for `frets` fret columns (frets `0..frets`)
    pub fn new(tuning: Tuning, frets: usize) -> Result<Self> {
        if frets == 0 || frets > MAX_FRETS {
            return Err(FretwiseError::InvalidFretCount(frets));
        }

        let grid = tuning
            .open_strings()
            .iter()
            .map(|&open| (0..frets).map(|fret| open + fret as i32).collect())
            .collect();

        Ok(Fretboard { tuning, grid })
    }

    /// Standard six-string guitar with `frets` fret columns
    pub fn standard(frets: usize) -> Result<Self> {
        Fretboard::new(Tuning::standard(), frets)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn string_count(&self) -> usize {
        self.grid.len()
    }

    /// Number of fret columns, including the open string
    pub fn fret_count(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    /// Pitch class at a position. Panics when the position is off the board.
    pub fn pitch_at(&self, position: FretPosition) -> PitchClass {
        self.grid[position.string][position.fret]
    }

    /// Pitch class at a position, or `None` when it is off the board
    pub fn get(&self, position: FretPosition) -> Option<PitchClass> {
        self.grid
            .get(position.string)
            .and_then(|row| row.get(position.fret))
            .copied()
    }

    pub fn contains(&self, position: FretPosition) -> bool {
        self.get(position).is_some()
    }

    /// Check that a user-supplied position lies on the board
    pub fn validate(&self, position: FretPosition) -> Result<FretPosition> {
        if self.contains(position) {
            Ok(position)
        } else {
            Err(FretwiseError::PositionOutOfRange {
                string: position.string,
                fret: position.fret,
                strings: self.string_count(),
                frets: self.fret_count(),
            })
        }
    }

    /// Frets on `string` that sound `pitch`, ascending
    pub fn frets_for(&self, string: usize, pitch: PitchClass) -> impl Iterator<Item = usize> + '_ {
        self.grid[string]
            .iter()
            .enumerate()
            .filter(move |(_, p)| **p == pitch)
            .map(|(fret, _)| fret)
    }

    /// Every position on the board that sounds `pitch`
    pub fn positions_of(&self, pitch: PitchClass) -> Vec<FretPosition> {
        (0..self.string_count())
            .flat_map(|string| {
                self.frets_for(string, pitch)
                    .map(move |fret| FretPosition::new(string, fret))
            })
            .collect()
    }
}
