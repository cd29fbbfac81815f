//! Rule-graph random walk
//!
//! Each diatonic chord lists the chords it may move to. A walk starts on a
//! tonic-ish chord, follows random edges until it has at least three chords
//! and stands on an ending chord, and is retried until its length is usable.
//! Both the walk and the retries are capped.

use super::degree::{on, Step};
use crate::types::chord_type::ChordType::*;
use fastrand::Rng;
use tracing::trace;

/// Longest a single walk may run before an ending is forced
pub const MAX_WALK_STEPS: usize = 12;

/// Walks tried before giving up on the length window
pub const MAX_ATTEMPTS: usize = 64;

/// Accepted walk lengths
pub const LENGTH_RANGE: std::ops::RangeInclusive<usize> = 4..=7;

/// A chord graph over one key family
pub struct RuleGraph {
    pub nodes: &'static [Step],
    pub edges: &'static [&'static [usize]],
    pub starts: &'static [usize],
    pub endings: &'static [usize],
}

// I ii iii IV V vi vii°
pub const MAJOR: RuleGraph = RuleGraph {
    nodes: &[
        on(0, Major),
        on(1, Minor),
        on(2, Minor),
        on(3, Major),
        on(4, Major),
        on(5, Minor),
        on(6, Diminished),
    ],
    edges: &[
        &[1, 2, 3, 4, 5, 6],
        &[4, 6],
        &[5, 3],
        &[1, 4, 6],
        &[0, 6, 5],
        &[3],
        &[0, 5, 4],
    ],
    starts: &[0, 1],
    endings: &[0, 4, 3],
};

// i ii° III iv V VI VII vii°; V is major, vii° sits on the natural seventh
pub const MINOR: RuleGraph = RuleGraph {
    nodes: &[
        on(0, Minor),
        on(1, Diminished),
        on(2, Major),
        on(3, Minor),
        on(4, Major),
        on(5, Major),
        on(6, Major),
        on(6, Diminished),
    ],
    edges: &[
        &[1, 2, 3, 4, 5, 6, 7],
        &[4, 7],
        &[3, 1, 5],
        &[1, 4, 7],
        &[0, 7, 5],
        &[3, 1],
        &[2, 3, 1],
        &[0, 5, 4],
    ],
    starts: &[0, 1],
    endings: &[6, 2, 3],
};

impl RuleGraph {
    pub fn for_key(minor: bool) -> &'static RuleGraph {
        if minor {
            &MINOR
        } else {
            &MAJOR
        }
    }

    fn choose(&self, options: &[usize], rng: &mut Rng) -> usize {
        options[rng.usize(..options.len())]
    }

    /// One unconstrained walk, as node indices
    pub fn walk(&self, rng: &mut Rng) -> Vec<usize> {
        let mut current = self.choose(self.starts, rng);
        let mut path = vec![current];

        let mut steps = 0;
        while (path.len() < 3 || !self.endings.contains(&current)) && steps < MAX_WALK_STEPS {
            let next = self.edges[current];
            if next.is_empty() {
                break;
            }
            current = self.choose(next, rng);
            path.push(current);
            steps += 1;
        }

        if !self.endings.contains(&current) {
            path.push(self.choose(self.endings, rng));
        }
        path
    }

    /// Retry walks until one lands in [`LENGTH_RANGE`]
    pub fn generate(&self, rng: &mut Rng) -> Option<Vec<Step>> {
        for attempt in 0..MAX_ATTEMPTS {
            let path = self.walk(rng);
            if LENGTH_RANGE.contains(&path.len()) {
                trace!(attempt, length = path.len(), "rule walk accepted");
                return Some(path.into_iter().map(|i| self.nodes[i]).collect());
            }
        }
        None
    }
}
