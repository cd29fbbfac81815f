//! Error types for fretwise
//!
//! Only text parsing and instrument validation can fail. The search,
//! recognition, generation and voice-leading routines report "nothing
//! found" through `Option` and empty collections instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FretwiseError {
    #[error("Invalid note name: '{0}'")]
    InvalidNote(String),
    #[error("Unknown chord type: '{0}'")]
    UnknownChordType(String),
    #[error("Invalid fret position '{0}' (expected string:fret)")]
    InvalidPosition(String),
    #[error("Position string {string}, fret {fret} is outside a {strings}x{frets} fretboard")]
    PositionOutOfRange {
        string: usize,
        fret: usize,
        strings: usize,
        frets: usize,
    },
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),
    #[error("Invalid fret count {0}: must be between 1 and {max}", max = crate::types::fretboard::MAX_FRETS)]
    InvalidFretCount(usize),
}

pub type Result<T> = std::result::Result<T, FretwiseError>;
