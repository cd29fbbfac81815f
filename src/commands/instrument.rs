//! Instrument commands (tuning, frets, hand)

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use fretwise_core::{InstrumentConfig, SearchLimits, Tuning};
use tracing::info;

/// Handle `tuning [preset | notes...]` command
pub fn cmd_tuning(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Current tuning: {}\nPresets: {}",
            ctx.instrument.tuning,
            Tuning::preset_names().join(", ")
        ));
    }

    let tuning: Tuning = match args.parse() {
        Ok(tuning) => tuning,
        Err(e) => return CommandResult::Error(e.to_string()),
    };

    let instrument = InstrumentConfig::new(tuning, ctx.instrument.frets);
    match ctx.set_instrument(instrument) {
        Ok(()) => {
            info!(tuning = %ctx.instrument.tuning, "tuning changed");
            CommandResult::Message(
                format!("Tuning set to {}", ctx.instrument.tuning)
                    .bright_green()
                    .to_string(),
            )
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `frets [n]` command
pub fn cmd_frets(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Fret columns: {} (frets 0-{})",
            ctx.instrument.frets,
            ctx.instrument.frets - 1
        ));
    }

    let frets = match args.parse::<usize>() {
        Ok(frets) => frets,
        Err(_) => return CommandResult::Error("Invalid fret count".to_string()),
    };

    let instrument = InstrumentConfig::new(ctx.instrument.tuning.clone(), frets);
    match ctx.set_instrument(instrument) {
        Ok(()) => {
            info!(frets, "fret count changed");
            CommandResult::Message(format!("Fret count set to {}", frets).bright_green().to_string())
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn hand_name(limits: &SearchLimits) -> &'static str {
    if *limits == SearchLimits::default() {
        "normal"
    } else if *limits == SearchLimits::wide() {
        "wide"
    } else {
        "custom"
    }
}

/// Handle `hand [normal | wide]` command
pub fn cmd_hand(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let limits = match args.to_lowercase().as_str() {
        "" => {
            return CommandResult::Message(format!(
                "Hand: {} (string span {}, fret span {}, up to {} notes)",
                hand_name(&ctx.limits),
                ctx.limits.max_string_span,
                ctx.limits.max_fret_span,
                ctx.limits.max_notes
            ))
        }
        "normal" => SearchLimits::default(),
        "wide" => SearchLimits::wide(),
        other => {
            return CommandResult::Error(format!(
                "Unknown hand '{}', expected normal or wide",
                other
            ))
        }
    };

    ctx.limits = limits;
    info!(hand = hand_name(&limits), "hand limits changed");
    CommandResult::Message(
        format!("Hand set to {}", hand_name(&limits))
            .bright_green()
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::context;
    use fretwise_core::PitchClass;

    #[test]
    fn test_tuning_preset_and_custom() {
        let mut ctx = context();
        assert!(matches!(cmd_tuning("drop-d", &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.instrument.tuning.name(), "drop-d");

        assert!(matches!(cmd_tuning("G D G B D", &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.fretboard.string_count(), 5);
        assert_eq!(ctx.fretboard.tuning().open_strings()[0], PitchClass::G);
    }

    #[test]
    fn test_bad_tuning_keeps_board() {
        let mut ctx = context();
        assert!(matches!(cmd_tuning("H Q", &mut ctx), CommandResult::Error(_)));
        assert_eq!(ctx.fretboard.string_count(), 6);
    }

    #[test]
    fn test_frets() {
        let mut ctx = context();
        assert!(matches!(cmd_frets("12", &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.fretboard.fret_count(), 12);

        assert!(matches!(cmd_frets("0", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_frets("lots", &mut ctx), CommandResult::Error(_)));
        assert_eq!(ctx.instrument.frets, 12);
    }

    #[test]
    fn test_hand() {
        colored::control::set_override(false);
        let mut ctx = context();
        assert_eq!(
            cmd_hand("", &mut ctx),
            CommandResult::Message(
                "Hand: normal (string span 3, fret span 3, up to 6 notes)".to_string()
            )
        );

        assert!(matches!(cmd_hand("WIDE", &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.limits, SearchLimits::wide());

        assert!(matches!(cmd_hand("giant", &mut ctx), CommandResult::Error(_)));
        assert_eq!(ctx.limits, SearchLimits::wide());

        assert!(matches!(cmd_hand("normal", &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.limits, SearchLimits::default());
    }
}
