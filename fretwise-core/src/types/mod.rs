// fretwise-core/src/types/mod.rs

pub mod chord;
pub mod chord_type;
pub mod fretboard;
pub mod key;
pub mod pitch;
pub mod progression;
pub mod roman_numeral;
pub mod voicing;

pub use chord::ChordSpec;
pub use chord_type::ChordType;
pub use fretboard::{FretPosition, Fretboard, Tuning, MAX_FRETS, MAX_STRINGS};
pub use key::{KeyContext, Mode};
pub use pitch::{parse_note_list, PitchClass};
pub use progression::{Intent, Progression};
pub use roman_numeral::*;
pub use voicing::Voicing;
