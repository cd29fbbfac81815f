//! Tunable settings for the search, voice-leading and generator stages
//!
//! These are plain data types with defaults and a few named presets. They
//! carry no behaviour of their own; the algorithm modules read them.

use crate::error::Result;
use crate::types::fretboard::{Fretboard, Tuning};

/// Hand-span limits applied to every placement during voicing search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchLimits {
    /// Largest allowed distance between the lowest and highest string index
    pub max_string_span: usize,
    /// Largest allowed distance between any two placed frets (open strings included)
    pub max_fret_span: usize,
    /// Most notes a single voicing may hold
    pub max_notes: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_string_span: 3,
            max_fret_span: 3,
            max_notes: 6,
        }
    }
}

impl SearchLimits {
    /// A wider hand, for stretch voicings
    pub fn wide() -> Self {
        SearchLimits {
            max_string_span: 4,
            max_fret_span: 4,
            ..Self::default()
        }
    }
}

/// Weights used to score one voicing against the previously chosen one
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoiceLeadingWeights {
    /// Cost added for a string sounded by only one of the two voicings
    pub string_mismatch_penalty: f32,
    /// Multiplier on the candidate's own fret span
    pub span_weight: f32,
    /// Multiplier on the jump between average frets
    pub center_weight: f32,
    /// Subtracted for candidates with three or more notes
    pub three_note_bonus: f32,
    /// Further subtracted for candidates with four or more notes
    pub four_note_bonus: f32,
    /// Fret span under which `closest_voicing` prefers a candidate
    pub closest_max_span: usize,
}

impl Default for VoiceLeadingWeights {
    fn default() -> Self {
        VoiceLeadingWeights {
            string_mismatch_penalty: 5.0,
            span_weight: 0.2,
            center_weight: 0.3,
            three_note_bonus: 0.25,
            four_note_bonus: 0.25,
            closest_max_span: 4,
        }
    }
}

impl VoiceLeadingWeights {
    /// Ignore position on the neck and judge only finger movement
    pub fn movement_only() -> Self {
        VoiceLeadingWeights {
            span_weight: 0.0,
            center_weight: 0.0,
            three_note_bonus: 0.0,
            four_note_bonus: 0.0,
            ..Self::default()
        }
    }
}

/// Settings for fallback voicing synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FallbackConfig {
    /// Fret to aim for when neither an anchor nor a preferred center is known
    pub default_target_fret: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        FallbackConfig {
            default_target_fret: 5,
        }
    }
}

/// How the progression generator picks its chords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Pick a template and realize it from the seed's root
    #[default]
    PatternAnchored,
    /// Pick a template that places the seed in a fixed slot
    PositionAnchored,
    /// Random walk over a graph of diatonic functions
    RuleGraph,
}

impl Strategy {
    /// Parse strategy from string (case-insensitive)
    pub fn from_name(s: &str) -> Option<Strategy> {
        match s.to_lowercase().as_str() {
            "pattern" | "pattern-anchored" | "template" => Some(Strategy::PatternAnchored),
            "position" | "position-anchored" | "anchored" => Some(Strategy::PositionAnchored),
            "rules" | "rule-graph" | "graph" | "walk" => Some(Strategy::RuleGraph),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::PatternAnchored => "pattern",
            Strategy::PositionAnchored => "position",
            Strategy::RuleGraph => "rules",
        }
    }
}

/// How adventurous the generated harmony should be
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Complexity {
    #[default]
    Simple,
    Moderate,
    Rich,
}

impl Complexity {
    /// Parse complexity from string (case-insensitive)
    pub fn from_name(s: &str) -> Option<Complexity> {
        match s.to_lowercase().as_str() {
            "simple" | "low" | "0" => Some(Complexity::Simple),
            "moderate" | "medium" | "1" => Some(Complexity::Moderate),
            "rich" | "high" | "2" => Some(Complexity::Rich),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Rich => "rich",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    pub strategy: Strategy,
    pub complexity: Complexity,
}

/// Tuning and fret count, the inputs needed to build a [`Fretboard`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstrumentConfig {
    pub tuning: Tuning,
    /// Number of fret columns, including the open string
    pub frets: usize,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        InstrumentConfig {
            tuning: Tuning::standard(),
            frets: 18,
        }
    }
}

impl InstrumentConfig {
    pub fn new(tuning: Tuning, frets: usize) -> Self {
        InstrumentConfig { tuning, frets }
    }

    pub fn build(&self) -> Result<Fretboard> {
        Fretboard::new(self.tuning.clone(), self.frets)
    }
}
