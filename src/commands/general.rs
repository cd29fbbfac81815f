//! General REPL commands (help, quit, seed, generator settings)

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use fretwise_core::{Complexity, Strategy};
use tracing::info;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `seed [n]` command
pub fn cmd_seed(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Current seed: {}", ctx.seed));
    }

    match args.parse::<u64>() {
        Ok(seed) => {
            ctx.reseed(seed);
            info!(seed, "reseeded generator");
            CommandResult::Message(format!("🎲 Seed set to {}", seed).bright_green().to_string())
        }
        Err(_) => CommandResult::Error("Invalid seed. Use a non-negative integer".to_string()),
    }
}

/// Handle `complexity [simple|moderate|rich]` command
pub fn cmd_complexity(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Current complexity: {}",
            ctx.generator.complexity.name()
        ));
    }

    match Complexity::from_name(args) {
        Some(complexity) => {
            ctx.generator.complexity = complexity;
            CommandResult::Message(
                format!("Complexity set to {}", complexity.name())
                    .bright_green()
                    .to_string(),
            )
        }
        None => CommandResult::Error(format!(
            "Unknown complexity '{}'. Use simple, moderate or rich",
            args
        )),
    }
}

/// Handle `strategy [pattern|position|rules]` command
pub fn cmd_strategy(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Current strategy: {}",
            ctx.generator.strategy.name()
        ));
    }

    match Strategy::from_name(args) {
        Some(strategy) => {
            ctx.generator.strategy = strategy;
            CommandResult::Message(
                format!("Strategy set to {}", strategy.name())
                    .bright_green()
                    .to_string(),
            )
        }
        None => CommandResult::Error(format!(
            "Unknown strategy '{}'. Use pattern, position or rules",
            args
        )),
    }
}

/// Print help information
fn print_help() {
    println!("{}", "🎸 Fretwise Help".bold());
    println!("{}", "================".bold());
    println!();
    println!("{}", "Chords:".green());
    println!("  {}        - List voicings of a chord", "chord C m7".cyan());
    println!("  {}                   - Same, as a bare symbol", "Cm7".cyan());
    println!(
        "  {}  - Name the notes under string:fret positions",
        "recognize 0:3 1:5 2:5".cyan()
    );
    println!("  {}         - Name a set of notes", "name C E G Bb".cyan());
    println!("  {}                 - List every chord type", "types".cyan());
    println!();
    println!("{}", "Keys and progressions:".green());
    println!("  {}          - Diatonic chords of a key", "key A minor".cyan());
    println!(
        "  {}  - Generate and voice-lead a progression",
        "progression G maj7".cyan()
    );
    println!(
        "  {}  - pattern, position or rules",
        "strategy <name>".cyan()
    );
    println!(
        "  {} - simple, moderate or rich",
        "complexity <level>".cyan()
    );
    println!("  {}              - Show or set the random seed", "seed [n]".cyan());
    println!();
    println!("{}", "Instrument:".green());
    println!(
        "  {}  - Preset name or open-string notes",
        "tuning [drop-d | E B G D A E]".cyan()
    );
    println!("  {}             - Show or set the fret count", "frets [n]".cyan());
    println!("  {}     - Show or set the hand stretch", "hand [normal | wide]".cyan());
    println!();
    println!("{}", "Other Commands:".green());
    println!("  {}              - Show this help", "help".bright_green());
    println!("  {}              - Exit the REPL", "quit".bright_red());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::context;

    #[test]
    fn test_seed() {
        let mut ctx = context();
        assert!(matches!(cmd_seed("", &mut ctx), CommandResult::Message(_)));
        assert!(matches!(cmd_seed("99", &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.seed, 99);
        assert!(matches!(cmd_seed("-1", &mut ctx), CommandResult::Error(_)));
        assert_eq!(ctx.seed, 99);
    }

    #[test]
    fn test_generator_settings() {
        let mut ctx = context();
        cmd_complexity("rich", &mut ctx);
        assert_eq!(ctx.generator.complexity, Complexity::Rich);
        cmd_strategy("rules", &mut ctx);
        assert_eq!(ctx.generator.strategy, Strategy::RuleGraph);

        assert!(matches!(cmd_strategy("dice", &mut ctx), CommandResult::Error(_)));
        assert_eq!(ctx.generator.strategy, Strategy::RuleGraph);
    }

    #[test]
    fn test_quit() {
        assert_eq!(cmd_quit("", &mut context()), CommandResult::Exit);
    }
}
