//! Chord commands (chord, recognize, name, key, types)

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use fretwise_core::types::parse_note_list;
use fretwise_core::{
    recognize, recognize_pitches, ChordSpec, ChordType, FretPosition, KeyContext, Mode, Voicing,
    VoicingSearch,
};

/// Tab-style layout from the lowest string up, `x` for unused strings
pub fn tab(voicing: &Voicing, strings: usize) -> String {
    (0..strings)
        .rev()
        .map(|string| match voicing.fret_on(string) {
            Some(fret) => fret.to_string(),
            None => "x".to_string(),
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Handle `chord <root> <type>` command
pub fn cmd_chord(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: chord <root> <type>  (e.g. chord F# m7)".to_string());
    }
    match args.parse::<ChordSpec>() {
        Ok(chord) => show_chord(&chord, ctx),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// List the voicings of `chord`, lowest on the neck first
pub fn show_chord(chord: &ChordSpec, ctx: &CommandContext) -> CommandResult {
    let search = VoicingSearch::new(&ctx.fretboard).with_limits(ctx.limits);
    let mut voicings = search.for_chord(chord);
    if voicings.is_empty() {
        return CommandResult::Message(format!("No playable voicings of {} on this tuning", chord));
    }
    voicings.sort_by(|a, b| a.average_fret().total_cmp(&b.average_fret()));

    let notes: Vec<String> = chord.notes().iter().map(|n| n.to_string()).collect();
    let mut out = format!(
        "{} {}  [{}]  {} voicings\n",
        chord.symbol().bold(),
        format!("({})", chord.chord_type.name()).dimmed(),
        notes.join(", "),
        voicings.len()
    );

    let strings = ctx.fretboard.string_count();
    for voicing in voicings.iter().take(ctx.voicing_limit) {
        out.push_str(&format!(
            "  {:<20} {}\n",
            tab(voicing, strings).cyan(),
            format!("{} notes, span {}", voicing.len(), voicing.fret_span()).dimmed()
        ));
    }
    if voicings.len() > ctx.voicing_limit {
        out.push_str(&format!("  ... {} more", voicings.len() - ctx.voicing_limit));
    }
    CommandResult::Message(out.trim_end().to_string())
}

/// Handle `recognize <string:fret> ...` command
pub fn cmd_recognize(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: recognize <string:fret> ...  (e.g. recognize 0:0 2:0)".to_string());
    }

    let mut positions = Vec::new();
    for part in args.split_whitespace() {
        let position = part
            .parse::<FretPosition>()
            .and_then(|p| ctx.fretboard.validate(p));
        match position {
            Ok(position) => positions.push(position),
            Err(e) => return CommandResult::Error(e.to_string()),
        }
    }

    let recognition = recognize(&positions, &ctx.fretboard);
    if recognition.is_none() {
        return CommandResult::Message("No chord or interval matches those notes".yellow().to_string());
    }
    CommandResult::Message(format!("🎸 {}", recognition))
}

/// Handle `name <notes...>` command
pub fn cmd_name(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    let notes = match parse_note_list(args) {
        Ok(notes) if !notes.is_empty() => notes,
        Ok(_) => return CommandResult::Error("Usage: name <notes...>  (e.g. name C E G Bb)".to_string()),
        Err(e) => return CommandResult::Error(e.to_string()),
    };

    let recognition = recognize_pitches(&notes);
    if recognition.is_none() {
        return CommandResult::Message("No chord or interval matches those notes".yellow().to_string());
    }
    CommandResult::Message(format!("🎵 {}", recognition))
}

/// Handle `key <root> [mode]` command
pub fn cmd_key(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    let mut parts = args.split_whitespace();
    let Some(root) = parts.next() else {
        return CommandResult::Error("Usage: key <root> [major|minor|dorian|...]".to_string());
    };
    let tonic = match root.parse() {
        Ok(tonic) => tonic,
        Err(e) => return CommandResult::Error(format!("{}", e)),
    };
    let mode = match parts.next() {
        None => Mode::Major,
        Some(name) => match Mode::from_name(name) {
            Some(mode) => mode,
            None => return CommandResult::Error(format!("Unknown mode '{}'", name)),
        },
    };

    let key = KeyContext::new(tonic, mode);
    let mut out = format!("{}\n", key.to_string().bold());
    for (numeral, chord) in key.diatonic_chords() {
        out.push_str(&format!("  {:<6} {}\n", numeral.to_string().cyan(), chord));
    }
    CommandResult::Message(out.trim_end().to_string())
}

/// Handle `types` command
pub fn cmd_types(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    let mut out = format!("{}\n", "Chord types".bold());
    for chord_type in ChordType::ALL {
        let symbol = if chord_type.symbol().is_empty() {
            "(major)"
        } else {
            chord_type.symbol()
        };
        out.push_str(&format!(
            "  {:<12} {:<22} {:?}\n",
            symbol.cyan(),
            chord_type.name(),
            chord_type.formula()
        ));
    }
    CommandResult::Message(out.trim_end().to_string())
}
