//! Voice-leading optimization across a sequence of voicing candidates
//!
//! The optimizer walks the steps greedily: each step keeps the candidate
//! that scores lowest against the voicing chosen before it. This is not a
//! global optimum, but it is deterministic and linear in
//! candidates × steps.
//!
//! A step with no candidates comes out silent. When every step is silent the
//! pipeline helpers ([`VoiceLeadingOptimizer::realize_progression`] and
//! [`VoiceLeadingOptimizer::optimize_with_fallback`]) synthesize something
//! playable with [`fallback::fallback_voicing`].

pub mod fallback;

use crate::config::{FallbackConfig, SearchLimits, VoiceLeadingWeights};
use crate::search::VoicingSearch;
use crate::types::chord::ChordSpec;
use crate::types::fretboard::Fretboard;
use crate::types::progression::Progression;
use crate::types::voicing::Voicing;
use tracing::{debug, trace};

/// Finger movement between two voicings, averaged over the strings either uses.
///
/// Strings used by both add their fret distance, strings used by only one add
/// `penalty`. Infinite when neither voicing uses any string.
pub fn pair_cost(a: &Voicing, b: &Voicing, penalty: f32) -> f32 {
    let strings = a.string_extent().max(b.string_extent());
    let mut total = 0.0;
    let mut compared = 0usize;

    for string in 0..strings {
        match (a.fret_on(string), b.fret_on(string)) {
            (Some(x), Some(y)) => {
                total += x.abs_diff(y) as f32;
                compared += 1;
            }
            (Some(_), None) | (None, Some(_)) => {
                total += penalty;
                compared += 1;
            }
            (None, None) => {}
        }
    }

    if compared == 0 {
        f32::INFINITY
    } else {
        total / compared as f32
    }
}

/// Pick the candidate whose average fret is nearest `target`, preferring
/// candidates whose fretted span is at most `max_span`
pub fn closest_voicing(candidates: &[Voicing], target: f32, max_span: usize) -> Option<&Voicing> {
    let compact: Vec<&Voicing> = candidates
        .iter()
        .filter(|v| v.fret_span() <= max_span)
        .collect();
    let pool: Vec<&Voicing> = if compact.is_empty() {
        candidates.iter().collect()
    } else {
        compact
    };

    let mut best: Option<(&Voicing, f32)> = None;
    for voicing in pool {
        let distance = (voicing.average_fret() - target).abs();
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((voicing, distance));
        }
    }
    best.map(|(v, _)| v)
}

/// How well two voicings connect, lower is better: movement cost, minus 2 for
/// each shared position, plus half the jump in average fret. 100 when either
/// is silent.
pub fn connection_score(a: &Voicing, b: &Voicing) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 100.0;
    }
    let common = a
        .iter()
        .filter(|p| b.fret_on(p.string) == Some(p.fret))
        .count();
    let jump = (a.average_fret() - b.average_fret()).abs();
    pair_cost(a, b, VoiceLeadingWeights::default().string_mismatch_penalty) - 2.0 * common as f32
        + 0.5 * jump
}

/// Total pairwise cost along a sequence, skipping silent steps
pub fn total_cost(voicings: &[Voicing], weights: &VoiceLeadingWeights) -> f32 {
    let sounding: Vec<&Voicing> = voicings.iter().filter(|v| !v.is_empty()).collect();
    sounding
        .windows(2)
        .map(|pair| pair_cost(pair[0], pair[1], weights.string_mismatch_penalty))
        .sum()
}

/// Greedy voice-leading optimizer
#[derive(Debug, Clone, Copy, Default)]
pub struct VoiceLeadingOptimizer {
    weights: VoiceLeadingWeights,
    fallback: FallbackConfig,
    limits: SearchLimits,
}

impl VoiceLeadingOptimizer {
    pub fn new(weights: VoiceLeadingWeights) -> Self {
        VoiceLeadingOptimizer {
            weights,
            fallback: FallbackConfig::default(),
            limits: SearchLimits::default(),
        }
    }

    /// Hand limits used when the optimizer searches candidates itself
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackConfig) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn weights(&self) -> &VoiceLeadingWeights {
        &self.weights
    }

    /// Score `candidate` as the successor of `previous`; lower is better
    pub fn score(&self, candidate: &Voicing, previous: &Voicing) -> f32 {
        let w = &self.weights;
        let mut score = pair_cost(previous, candidate, w.string_mismatch_penalty)
            + w.span_weight * candidate.fret_span() as f32
            + w.center_weight * (candidate.average_fret() - previous.average_fret()).abs();
        if candidate.len() >= 3 {
            score -= w.three_note_bonus;
        }
        if candidate.len() >= 4 {
            score -= w.four_note_bonus;
        }
        score
    }

    /// The lowest-scoring candidate after `previous`, first wins ties
    pub fn best_successor<'c>(&self, candidates: &'c [Voicing], previous: &Voicing) -> Option<&'c Voicing> {
        let mut best: Option<(&Voicing, f32)> = None;
        for candidate in candidates {
            let score = self.score(candidate, previous);
            if best.is_none_or(|(_, s)| score < s) {
                best = Some((candidate, score));
            }
        }
        best.map(|(v, _)| v)
    }

    /// Reference choice for a step with nothing before it
    fn initial_choice<'c>(&self, candidates: &'c [Voicing], preferred_center: Option<f32>) -> Option<&'c Voicing> {
        match preferred_center {
            Some(center) => closest_voicing(candidates, center, self.weights.closest_max_span),
            None => {
                let mut best: Option<&Voicing> = None;
                for candidate in candidates {
                    if best.is_none_or(|b| candidate.len() > b.len()) {
                        best = Some(candidate);
                    }
                }
                best
            }
        }
    }

    /// Fill `out[i]` for each `i` in `order`, each step scored against the
    /// most recent sounding choice
    fn sweep(
        &self,
        candidates: &[Vec<Voicing>],
        order: impl Iterator<Item = usize>,
        mut reference: Option<Voicing>,
        preferred_center: Option<f32>,
        out: &mut [Voicing],
    ) {
        for step in order {
            let options = &candidates[step];
            let chosen = match &reference {
                Some(previous) => self.best_successor(options, previous),
                None => self.initial_choice(options, preferred_center),
            };

            match chosen {
                Some(voicing) => {
                    trace!(step, voicing = %voicing, "voice leading choice");
                    out[step] = voicing.clone();
                    reference = Some(voicing.clone());
                }
                None => out[step] = Voicing::empty(),
            }
        }
    }

    /// Choose one voicing per step.
    ///
    /// `anchor`, when given, is kept unchanged as step 0. Otherwise step 0 is
    /// the candidate nearest `preferred_center`, or the fullest candidate.
    /// Steps with no candidates are silent.
    pub fn optimize(
        &self,
        candidates: &[Vec<Voicing>],
        anchor: Option<&Voicing>,
        preferred_center: Option<f32>,
    ) -> Vec<Voicing> {
        match anchor {
            Some(anchor) if !candidates.is_empty() => {
                self.optimize_around(candidates, 0, anchor, preferred_center)
            }
            _ => {
                let mut out = vec![Voicing::empty(); candidates.len()];
                self.sweep(candidates, 0..candidates.len(), None, preferred_center, &mut out);
                out
            }
        }
    }

    /// Choose one voicing per step with `anchor` fixed at `anchor_index`.
    ///
    /// Earlier steps are chosen walking backward from the anchor, later steps
    /// walking forward, as two independent sweeps.
    ///
    /// Panics if `anchor_index` is out of range.
    pub fn optimize_around(
        &self,
        candidates: &[Vec<Voicing>],
        anchor_index: usize,
        anchor: &Voicing,
        preferred_center: Option<f32>,
    ) -> Vec<Voicing> {
        assert!(
            anchor_index < candidates.len(),
            "anchor index {} out of range for {} steps",
            anchor_index,
            candidates.len()
        );

        let mut out = vec![Voicing::empty(); candidates.len()];
        out[anchor_index] = anchor.clone();
        let reference = (!anchor.is_empty()).then(|| anchor.clone());

        self.sweep(
            candidates,
            (0..anchor_index).rev(),
            reference.clone(),
            preferred_center,
            &mut out,
        );
        self.sweep(
            candidates,
            anchor_index + 1..candidates.len(),
            reference,
            preferred_center,
            &mut out,
        );
        out
    }

    /// Optimize, then replace an all-silent result with fallback voicings
    /// for `chords` near the anchor, the preferred center, or the default
    /// target fret.
    pub fn optimize_with_fallback(
        &self,
        fretboard: &Fretboard,
        chords: &[ChordSpec],
        candidates: &[Vec<Voicing>],
        anchor: Option<(usize, &Voicing)>,
        preferred_center: Option<f32>,
    ) -> Vec<Voicing> {
        let voicings = match anchor {
            Some((index, voicing)) if index < candidates.len() => {
                self.optimize_around(candidates, index, voicing, preferred_center)
            }
            _ => self.optimize(candidates, anchor.map(|(_, v)| v), preferred_center),
        };

        if voicings.iter().any(|v| !v.is_empty()) {
            return voicings;
        }

        let target = anchor
            .map(|(_, v)| v)
            .filter(|v| !v.is_empty())
            .map(|v| v.average_fret())
            .or(preferred_center)
            .unwrap_or(self.fallback.default_target_fret as f32);
        debug!(target, steps = chords.len(), "every step silent, synthesizing fallback voicings");

        chords
            .iter()
            .map(|chord| fallback::fallback_voicing(fretboard, chord, target))
            .collect()
    }

    /// Search voicings for every chord of `progression` and voice-lead them.
    ///
    /// When `anchor` is given it is held at the progression's selected chord
    /// (or the first chord when none is selected).
    pub fn realize_progression(
        &self,
        fretboard: &Fretboard,
        progression: &Progression,
        anchor: Option<&Voicing>,
        preferred_center: Option<f32>,
    ) -> Vec<Voicing> {
        let index = progression.selected_chord_index.unwrap_or(0);
        self.realize_chords(
            fretboard,
            &progression.chords,
            anchor.map(|v| (index, v)),
            preferred_center,
        )
    }

    /// Search voicings for `chords` within the optimizer's hand limits and
    /// voice-lead them
    pub fn realize_chords(
        &self,
        fretboard: &Fretboard,
        chords: &[ChordSpec],
        anchor: Option<(usize, &Voicing)>,
        preferred_center: Option<f32>,
    ) -> Vec<Voicing> {
        let search = VoicingSearch::new(fretboard).with_limits(self.limits);
        let candidates: Vec<Vec<Voicing>> = chords.iter().map(|c| search.for_chord(c)).collect();
        self.optimize_with_fallback(fretboard, chords, &candidates, anchor, preferred_center)
    }
}

/// Optimize with the default weights
pub fn optimize(
    candidates: &[Vec<Voicing>],
    anchor: Option<&Voicing>,
    preferred_center: Option<f32>,
) -> Vec<Voicing> {
    VoiceLeadingOptimizer::default().optimize(candidates, anchor, preferred_center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fretboard::FretPosition;

    fn voicing(pairs: &[(usize, usize)]) -> Voicing {
        Voicing::new(pairs.iter().map(|&(s, f)| FretPosition::new(s, f)).collect())
    }

    #[test]
    fn test_pair_cost() {
        let a = voicing(&[(0, 3), (1, 5)]);
        let b = voicing(&[(0, 5), (2, 4)]);
        // string 0: 2, string 1: penalty, string 2: penalty
        assert!((pair_cost(&a, &b, 5.0) - 4.0).abs() < 1e-6);
        assert_eq!(pair_cost(&a, &a, 5.0), 0.0);
        assert!(pair_cost(&Voicing::empty(), &Voicing::empty(), 5.0).is_infinite());
    }

    #[test]
    fn test_closest_voicing_prefers_compact() {
        let wide = voicing(&[(0, 1), (1, 7)]);
        let near = voicing(&[(0, 8), (1, 9)]);
        let far = voicing(&[(0, 12), (1, 13)]);
        let candidates = vec![wide, near.clone(), far];
        // `wide` averages 4.0 but spans 6 frets
        assert_eq!(closest_voicing(&candidates, 4.0, 4), Some(&near));
        assert_eq!(closest_voicing(&[], 4.0, 4), None);
    }

    #[test]
    fn test_step_zero_choice() {
        let low = voicing(&[(0, 1), (1, 1)]);
        let full = voicing(&[(0, 5), (1, 5), (2, 5)]);
        let high = voicing(&[(0, 10), (1, 10)]);
        let steps = vec![vec![low.clone(), full.clone(), high.clone()]];

        assert_eq!(optimize(&steps, None, None), vec![full]);
        assert_eq!(optimize(&steps, None, Some(9.0)), vec![high]);

        let anchor = voicing(&[(3, 3)]);
        assert_eq!(optimize(&steps, Some(&anchor), None), vec![anchor]);
    }

    #[test]
    fn test_greedy_follows_smallest_move() {
        let start = voicing(&[(0, 3), (1, 3), (2, 4)]);
        let close = voicing(&[(0, 3), (1, 4), (2, 5)]);
        let far = voicing(&[(0, 10), (1, 10), (2, 11)]);
        let steps = vec![vec![start.clone()], vec![far, close.clone()]];
        assert_eq!(optimize(&steps, None, None), vec![start, close]);
    }

    #[test]
    fn test_silent_step_uses_last_sounding_reference() {
        let a = voicing(&[(0, 7), (1, 8), (2, 7)]);
        let low = voicing(&[(0, 0), (1, 1), (2, 0)]);
        let high = voicing(&[(0, 7), (1, 7), (2, 7)]);
        let steps = vec![vec![a.clone()], vec![], vec![low, high.clone()]];
        let result = optimize(&steps, None, None);
        assert_eq!(result, vec![a, Voicing::empty(), high]);
    }

    #[test]
    fn test_interior_anchor_sweeps_both_ways() {
        let anchor = voicing(&[(0, 5), (1, 5), (2, 6)]);
        let near = voicing(&[(0, 5), (1, 6), (2, 6)]);
        let far = voicing(&[(0, 12), (1, 12), (2, 13)]);
        let steps = vec![
            vec![far.clone(), near.clone()],
            vec![far.clone()],
            vec![far, near.clone()],
        ];
        let result = VoiceLeadingOptimizer::default().optimize_around(&steps, 1, &anchor, None);
        assert_eq!(result, vec![near.clone(), anchor, near]);
    }

    #[test]
    fn test_connection_score() {
        let a = voicing(&[(0, 3), (1, 5)]);
        assert_eq!(connection_score(&a, &Voicing::empty()), 100.0);
        // identical: no movement, two shared positions
        assert!((connection_score(&a, &a) + 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_realize_chords_honours_limits() {
        let board = Fretboard::standard(18).unwrap();
        let chords: Vec<ChordSpec> = ["C", "Am", "F", "G"]
            .iter()
            .map(|c| c.parse().unwrap())
            .collect();
        let tight = SearchLimits {
            max_string_span: 2,
            max_fret_span: 2,
            max_notes: 3,
        };
        let voicings = VoiceLeadingOptimizer::default()
            .with_limits(tight)
            .realize_chords(&board, &chords, None, Some(7.0));

        assert_eq!(voicings.len(), chords.len());
        for (voicing, chord) in voicings.iter().zip(&chords) {
            assert!(!voicing.is_empty(), "{}", chord);
            assert!(voicing.len() <= 3, "{} gave {}", chord, voicing);
            assert!(voicing.fret_span() <= 2, "{} gave {}", chord, voicing);
            for pitch in voicing.pitch_classes(&board) {
                assert!(chord.contains(pitch));
            }
        }
    }

    #[test]
    fn test_total_cost_skips_silence() {
        let a = voicing(&[(0, 3)]);
        let b = voicing(&[(0, 5)]);
        let weights = VoiceLeadingWeights::default();
        let cost = total_cost(&[a, Voicing::empty(), b], &weights);
        assert!((cost - 2.0).abs() < 1e-6);
    }
}
