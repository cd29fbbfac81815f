//! Command registry for REPL commands
//!
//! Each command is a plain function taking its argument text and the shared
//! session context. The registry matches the longest registered prefix.

pub mod chords;
pub mod general;
pub mod instrument;
pub mod progression;

use fastrand::Rng;
use fretwise_core::{Fretboard, GeneratorConfig, InstrumentConfig, SearchLimits};

/// Seed used until the user picks one with `seed`
pub const DEFAULT_SEED: u64 = 42;

/// Result of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// No registered command matched
    NotACommand,
    /// Error occurred
    Error(String),
}

/// Session state shared by all command handlers
pub struct CommandContext {
    pub instrument: InstrumentConfig,
    pub fretboard: Fretboard,
    pub limits: SearchLimits,
    pub generator: GeneratorConfig,
    pub seed: u64,
    pub rng: Rng,
    /// Most voicings printed by `chord`
    pub voicing_limit: usize,
}

impl CommandContext {
    pub fn new(instrument: InstrumentConfig) -> fretwise_core::Result<Self> {
        let fretboard = instrument.build()?;
        Ok(CommandContext {
            instrument,
            fretboard,
            limits: SearchLimits::default(),
            generator: GeneratorConfig::default(),
            seed: DEFAULT_SEED,
            rng: Rng::with_seed(DEFAULT_SEED),
            voicing_limit: 12,
        })
    }

    /// Swap the instrument, keeping the old one if the new one is invalid
    pub fn set_instrument(&mut self, instrument: InstrumentConfig) -> fretwise_core::Result<()> {
        self.fretboard = instrument.build()?;
        self.instrument = instrument;
        Ok(())
    }

    /// Restart the random stream from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Rng::with_seed(seed);
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by_key(|(prefix, _)| std::cmp::Reverse(prefix.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = input[prefix.len()..].trim();
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);
    registry.register("seed", general::cmd_seed);
    registry.register("complexity", general::cmd_complexity);
    registry.register("strategy", general::cmd_strategy);

    registry.register("tuning", instrument::cmd_tuning);
    registry.register("frets", instrument::cmd_frets);
    registry.register("hand", instrument::cmd_hand);

    registry.register("chord", chords::cmd_chord);
    registry.register("recognize", chords::cmd_recognize);
    registry.register("name", chords::cmd_name);
    registry.register("key", chords::cmd_key);
    registry.register("types", chords::cmd_types);

    registry.register("progression", progression::cmd_progression);

    registry
}
