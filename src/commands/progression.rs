//! Progression command: generate around a seed chord and voice-lead it

use crate::commands::chords::tab;
use crate::commands::{CommandContext, CommandResult};
use colored::*;
use fretwise_core::voice_leading::{closest_voicing, total_cost};
use fretwise_core::{
    ChordSpec, FallbackConfig, ProgressionGenerator, VoiceLeadingOptimizer, VoicingSearch,
};
use tracing::debug;

/// Handle `progression <root> <type>` command
pub fn cmd_progression(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error(
            "Usage: progression <root> <type>  (e.g. progression G maj7)".to_string(),
        );
    }
    let seed: ChordSpec = match args.parse() {
        Ok(seed) => seed,
        Err(e) => return CommandResult::Error(e.to_string()),
    };

    let progression = ProgressionGenerator::new(ctx.generator).generate(&seed, None, &mut ctx.rng);

    // Hold the seed near the middle of the neck when it appears in the result
    let center = FallbackConfig::default().default_target_fret as f32;
    let optimizer = VoiceLeadingOptimizer::default().with_limits(ctx.limits);
    let seed_voicings = VoicingSearch::new(&ctx.fretboard)
        .with_limits(ctx.limits)
        .for_chord(&seed);
    let anchor = progression
        .selected_chord_index
        .and_then(|_| closest_voicing(&seed_voicings, center, optimizer.weights().closest_max_span));
    debug!(anchor = ?anchor.map(|v| v.to_string()), "progression anchor");

    let voicings = optimizer.realize_progression(&ctx.fretboard, &progression, anchor, Some(center));

    let strings = ctx.fretboard.string_count();
    let mut out = format!("{}\n", progression);
    for ((chord, numeral), voicing) in progression
        .chords
        .iter()
        .zip(&progression.numerals)
        .zip(&voicings)
    {
        let shape = if voicing.is_empty() {
            "(no voicing)".to_string()
        } else {
            tab(voicing, strings)
        };
        out.push_str(&format!(
            "  {:<8} {:<10} {}\n",
            chord.symbol(),
            numeral.to_string().cyan(),
            shape
        ));
    }
    out.push_str(
        &format!(
            "  movement cost {:.2}",
            total_cost(&voicings, optimizer.weights())
        )
        .dimmed()
        .to_string(),
    );
    CommandResult::Message(out)
}
