//! Chord progression generation
//!
//! A [`ProgressionGenerator`] turns a seed chord into a [`Progression`] with
//! one of three strategies:
//!
//! - **pattern-anchored** (default): pick a template from the library for the
//!   seed's key family, weighted by complexity, and realize every degree from
//!   the seed's root.
//! - **position-anchored**: classify the seed by role and pick a template
//!   that reserves a slot for it, so the seed is always part of the result.
//! - **rule graph**: a random walk over diatonic function rules.
//!
//! All randomness comes from the caller's [`fastrand::Rng`]. Generation
//! never fails; when nothing applies the default I-IV-V-I (or i-iv-v-i)
//! loop is used.

pub mod anchored;
pub mod degree;
pub mod rules;
pub mod templates;

use crate::config::{Complexity, GeneratorConfig, Strategy};
use crate::types::chord::ChordSpec;
use crate::types::key::KeyContext;
use crate::types::progression::{Intent, Progression};
use crate::types::roman_numeral::RomanNumeral;
use anchored::{AnchoredTemplate, SeedRole};
use degree::Step;
use fastrand::Rng;
use rules::RuleGraph;
use templates::Template;
use tracing::debug;

/// Generate a progression with the default pattern-anchored strategy
pub fn generate(seed: &ChordSpec, complexity: Option<Complexity>, rng: &mut Rng) -> Progression {
    ProgressionGenerator::default().generate(seed, complexity, rng)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressionGenerator {
    config: GeneratorConfig,
}

impl ProgressionGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        ProgressionGenerator { config }
    }

    pub fn with_strategy(strategy: Strategy) -> Self {
        ProgressionGenerator {
            config: GeneratorConfig {
                strategy,
                ..GeneratorConfig::default()
            },
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build a progression around `seed`. `complexity` overrides the
    /// configured complexity for this call.
    pub fn generate(
        &self,
        seed: &ChordSpec,
        complexity: Option<Complexity>,
        rng: &mut Rng,
    ) -> Progression {
        let complexity = complexity.unwrap_or(self.config.complexity);
        let progression = match self.config.strategy {
            Strategy::PatternAnchored => pattern_anchored(seed, complexity, rng),
            Strategy::PositionAnchored => position_anchored(seed, complexity, rng),
            Strategy::RuleGraph => rule_graph(seed, rng),
        };

        debug!(
            seed = %seed,
            strategy = self.config.strategy.name(),
            complexity = complexity.name(),
            name = %progression.name,
            chords = %progression.symbols(),
            "generated progression"
        );
        progression
    }
}

/// Weighted pick; `None` only for an empty pool
fn pick_weighted<'t, T>(
    items: &'t [T],
    weight: impl Fn(&T) -> u32,
    rng: &mut Rng,
) -> Option<&'t T> {
    let total: u32 = items.iter().map(&weight).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.u32(..total);
    for item in items {
        let w = weight(item);
        if roll < w {
            return Some(item);
        }
        roll -= w;
    }
    None
}

/// Cut to the intent's maximum length
fn apply_length_policy<T>(items: &mut Vec<T>, intent: Intent) {
    if let Some(max) = intent.max_length() {
        items.truncate(max);
    }
}

fn realize_steps(
    steps: &[Step],
    key: &KeyContext,
    extend: bool,
) -> (Vec<ChordSpec>, Vec<RomanNumeral>) {
    steps.iter().map(|step| step.realize(key, extend)).unzip()
}

fn from_template(seed: &ChordSpec, template: &Template) -> Progression {
    let base = KeyContext::infer(seed);
    let key = template.mode.map_or(base, |mode| base.with_mode(mode));
    let (mut chords, mut numerals) =
        realize_steps(template.steps, &key, seed.chord_type.is_extended());
    apply_length_policy(&mut chords, template.intent);
    apply_length_policy(&mut numerals, template.intent);
    // Modal colour reads against the parallel major or minor, so Mixolydian's
    // seventh comes out as bVII rather than VII
    if template.mode.is_some() {
        numerals = chords.iter().map(|chord| base.analyze(chord)).collect();
    }

    let selected_chord_index = chords.iter().position(|c| c == seed);
    Progression {
        chords,
        name: template.name.to_string(),
        description: template.description.to_string(),
        intent: template.intent,
        key,
        selected_chord_index,
        numerals,
    }
}

fn default_progression(seed: &ChordSpec) -> Progression {
    let minor = KeyContext::infer(seed).is_minor();
    from_template(seed, templates::default_template(minor))
}

fn pattern_anchored(seed: &ChordSpec, complexity: Complexity, rng: &mut Rng) -> Progression {
    let minor = KeyContext::infer(seed).is_minor();
    let pool = templates::library(minor);
    match pick_weighted(pool, |t| templates::weight(complexity.index(), t.richness), rng) {
        Some(template) => from_template(seed, template),
        None => default_progression(seed),
    }
}

fn from_anchored(seed: &ChordSpec, template: &AnchoredTemplate) -> Progression {
    let key = template.key(seed);
    let mut chords = template.realize(seed);
    apply_length_policy(&mut chords, template.intent);
    let numerals = chords.iter().map(|chord| key.analyze(chord)).collect();

    let selected_chord_index = (template.seed_slot < chords.len()).then_some(template.seed_slot);
    Progression {
        chords,
        name: template.name.to_string(),
        description: template.description.to_string(),
        intent: template.intent,
        key,
        selected_chord_index,
        numerals,
    }
}

fn position_anchored(seed: &ChordSpec, complexity: Complexity, rng: &mut Rng) -> Progression {
    let role = SeedRole::classify(seed.chord_type);
    let pool = anchored::for_role(role);
    match pick_weighted(pool, |t| templates::weight(complexity.index(), t.richness), rng) {
        Some(template) => from_anchored(seed, template),
        None => default_progression(seed),
    }
}

fn rule_graph(seed: &ChordSpec, rng: &mut Rng) -> Progression {
    let key = KeyContext::infer(seed);
    let graph = RuleGraph::for_key(key.is_minor());

    let Some(steps) = graph.generate(rng) else {
        debug!("rule walk never reached an accepted length, using default loop");
        return default_progression(seed);
    };

    let (chords, numerals) = realize_steps(&steps, &key, seed.chord_type.is_extended());
    let intent = if chords.len() >= 5 {
        Intent::Phrase
    } else {
        Intent::Loop
    };
    let selected_chord_index = chords.iter().position(|c| c == seed);
    Progression {
        chords,
        name: "Rule Walk".to_string(),
        description: "Random walk over diatonic function rules".to_string(),
        intent,
        key,
        selected_chord_index,
        numerals,
    }
}
