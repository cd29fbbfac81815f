//! # Fretwise
//!
//! Interactive shell over `fretwise-core`: list chord voicings, name the
//! notes under your fingers, print the chords of a key and generate
//! voice-led progressions around a seed chord.
//!
//! ## Modules
//!
//! - `commands`: The command registry, session context and one handler per
//!   REPL command.
//! - `logging`: The tracing filter, from `RUST_LOG` or the defaults.
//! - `repl`: The Read-Eval-Print Loop driving the registry.

pub mod commands;
pub mod logging;
pub mod repl;
