//! # Fretwise Core
//!
//! Chord theory for fretted instruments: name what is under the fingers,
//! find every way to play a chord, write progressions around a chord and
//! connect their voicings smoothly.
//!
//! ## Features
//!
//! - **serde**: Serialize and deserialize the data types and configs
//! - **colored**: Colored terminal output for progressions (default)
//!
//! ## Example
//!
//! ```ignore
//! use fretwise_core::{generate, recognize, Fretboard, ChordSpec, VoiceLeadingOptimizer};
//!
//! let board = Fretboard::standard(18)?;
//! let seed: ChordSpec = "G maj7".parse()?;
//! let progression = generate(&seed, None, &mut fastrand::Rng::with_seed(7));
//! let voicings = VoiceLeadingOptimizer::default()
//!     .realize_progression(&board, &progression, None, Some(5.0));
//! println!("{}", recognize(voicings[0].positions(), &board));
//! ```

pub mod config;
pub mod error;
pub mod progression;
pub mod recognition;
pub mod search;
pub mod types;
pub mod voice_leading;

pub use config::{
    Complexity, FallbackConfig, GeneratorConfig, InstrumentConfig, SearchLimits, Strategy,
    VoiceLeadingWeights,
};
pub use error::{FretwiseError, Result};
pub use progression::{generate, ProgressionGenerator};
pub use recognition::{recognize, recognize_names, recognize_pitches, IntervalName, Recognition};
pub use search::{search, VoicingSearch};
pub use types::{
    ChordSpec, ChordType, FretPosition, Fretboard, Intent, KeyContext, Mode, PitchClass,
    Progression, Tuning, Voicing,
};
pub use voice_leading::{optimize, VoiceLeadingOptimizer};
