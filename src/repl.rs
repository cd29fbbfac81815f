//! REPL (Read-Eval-Print Loop) for Fretwise

use crate::commands::{chords, create_registry, CommandContext, CommandRegistry, CommandResult};
use anyhow::Result;
use colored::*;
use fretwise_core::{ChordSpec, InstrumentConfig};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, info};

/// Interactive REPL over the command registry
pub struct Repl {
    editor: DefaultEditor,
    registry: CommandRegistry,
    ctx: CommandContext,
}

impl Repl {
    /// Create a new REPL instance with the given instrument
    pub fn new(instrument: InstrumentConfig) -> Result<Self> {
        let editor = DefaultEditor::new()?;
        let ctx = CommandContext::new(instrument)?;
        info!(tuning = %ctx.instrument.tuning, frets = ctx.instrument.frets, "session ready");

        Ok(Repl {
            editor,
            registry: create_registry(),
            ctx,
        })
    }

    /// Handle one input line; `false` means the session should end
    pub fn handle_line(&mut self, line: &str) -> bool {
        match dispatch(&self.registry, line, &mut self.ctx) {
            CommandResult::Success => {}
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::Exit => {
                println!("{} 🎸", "Goodbye!".bright_cyan());
                return false;
            }
            CommandResult::Error(e) => {
                println!("{} {}", "Error:".bright_red().bold(), e.red());
            }
            CommandResult::NotACommand => println!(
                "{} Unknown command or chord '{}'. Type '{}' for a list of commands.",
                "Error:".bright_red().bold(),
                line,
                "help".bright_green()
            ),
        }
        true
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🎸".bright_yellow(),
            "Fretwise chord explorer".bright_cyan().bold()
        );
        println!(
            "Try: {}, {}, {}",
            "chord Am7".cyan(),
            "recognize 4:3 3:2 2:0".cyan(),
            "progression G maj7".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        loop {
            let prompt = format!("{} ", "fretwise>".bright_magenta().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    self.editor.add_history_entry(line)?;
                    if !self.handle_line(line) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("{} 🎸", "Goodbye!".bright_cyan());
                    break;
                }
                Err(err) => {
                    println!(
                        "{} {}",
                        "Error reading input:".bright_red().bold(),
                        err.to_string().red()
                    );
                }
            }
        }

        Ok(())
    }
}

/// Run a registered command, or treat a bare chord symbol as `chord <symbol>`
pub fn dispatch(registry: &CommandRegistry, line: &str, ctx: &mut CommandContext) -> CommandResult {
    match registry.execute(line, ctx) {
        CommandResult::NotACommand => match line.parse::<ChordSpec>() {
            Ok(chord) => {
                debug!(chord = %chord, "bare chord symbol");
                chords::show_chord(&chord, ctx)
            }
            Err(_) => CommandResult::NotACommand,
        },
        result => result,
    }
}

/// Convenience function to start the REPL with the default instrument
pub fn start() -> Result<()> {
    let mut repl = Repl::new(InstrumentConfig::default())
        .map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
    repl.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> CommandContext {
        CommandContext::new(InstrumentConfig::default()).unwrap()
    }

    #[test]
    fn test_bare_chord_symbol() {
        let registry = create_registry();
        let mut ctx = context();
        assert!(matches!(
            dispatch(&registry, "F#m7", &mut ctx),
            CommandResult::Message(_)
        ));
        assert_eq!(
            dispatch(&registry, "play something", &mut ctx),
            CommandResult::NotACommand
        );
    }

    #[test]
    fn test_commands_take_priority() {
        let registry = create_registry();
        let mut ctx = context();
        assert_eq!(dispatch(&registry, "quit", &mut ctx), CommandResult::Exit);
        assert!(matches!(
            dispatch(&registry, "seed 5", &mut ctx),
            CommandResult::Message(_)
        ));
        assert_eq!(ctx.seed, 5);
    }
}
