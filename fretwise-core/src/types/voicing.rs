use crate::types::fretboard::{FretPosition, Fretboard};
use crate::types::pitch::PitchClass;
use std::collections::BTreeSet;
use std::fmt;

/// A set of finger placements, at most one per string, kept sorted by string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voicing {
    positions: Vec<FretPosition>,
}

impl Voicing {
    /// Build a voicing. Panics if two positions share a string.
    pub fn new(mut positions: Vec<FretPosition>) -> Self {
        positions.sort_by_key(|p| p.string);
        assert!(
            positions.windows(2).all(|pair| pair[0].string != pair[1].string),
            "voicing places two notes on one string: {:?}",
            positions
        );
        Voicing { positions }
    }

    /// The silent voicing
    pub fn empty() -> Self {
        Voicing::default()
    }

    pub fn positions(&self) -> &[FretPosition] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Fret played on `string`, if any
    pub fn fret_on(&self, string: usize) -> Option<usize> {
        self.positions
            .iter()
            .find(|p| p.string == string)
            .map(|p| p.fret)
    }

    /// Highest string index used, plus one (0 when empty)
    pub fn string_extent(&self) -> usize {
        self.positions.last().map_or(0, |p| p.string + 1)
    }

    /// Average fret, the voicing's "center" on the neck (0 when empty)
    pub fn average_fret(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let total: usize = self.positions.iter().map(|p| p.fret).sum();
        total as f32 / self.len() as f32
    }

    /// Fretted span, ignoring open strings
    pub fn fret_span(&self) -> usize {
        let fretted = self.positions.iter().map(|p| p.fret).filter(|&f| f > 0);
        match (fretted.clone().min(), fretted.max()) {
            (Some(low), Some(high)) => high - low,
            _ => 0,
        }
    }

    /// Span of strings covered, lowest to highest index
    pub fn string_span(&self) -> usize {
        match (self.positions.first(), self.positions.last()) {
            (Some(low), Some(high)) => high.string - low.string,
            _ => 0,
        }
    }

    /// Distinct pitch classes sounded, looked up on `fretboard`
    pub fn pitch_classes(&self, fretboard: &Fretboard) -> BTreeSet<PitchClass> {
        self.positions.iter().map(|&p| fretboard.pitch_at(p)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FretPosition> {
        self.positions.iter()
    }
}

impl From<Vec<FretPosition>> for Voicing {
    fn from(positions: Vec<FretPosition>) -> Self {
        Voicing::new(positions)
    }
}

impl fmt::Display for Voicing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.positions.iter().map(|p| p.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voicing(pairs: &[(usize, usize)]) -> Voicing {
        Voicing::new(pairs.iter().map(|&(s, f)| FretPosition::new(s, f)).collect())
    }

    #[test]
    fn test_sorted_by_string() {
        let v = voicing(&[(3, 2), (0, 0), (1, 1)]);
        let strings: Vec<usize> = v.iter().map(|p| p.string).collect();
        assert_eq!(strings, vec![0, 1, 3]);
        assert_eq!(v.fret_on(3), Some(2));
        assert_eq!(v.fret_on(2), None);
    }

    #[test]
    #[should_panic(expected = "two notes on one string")]
    fn test_duplicate_string_panics() {
        voicing(&[(1, 1), (1, 3)]);
    }

    #[test]
    fn test_metrics() {
        let c_shape = voicing(&[(0, 0), (1, 1), (2, 0), (3, 2), (4, 3)]);
        assert_eq!(c_shape.fret_span(), 2);
        assert_eq!(c_shape.string_span(), 4);
        assert!((c_shape.average_fret() - 1.2).abs() < 1e-6);

        assert_eq!(Voicing::empty().fret_span(), 0);
        assert_eq!(Voicing::empty().average_fret(), 0.0);
        assert_eq!(voicing(&[(0, 0), (1, 0)]).fret_span(), 0);
    }

    #[test]
    fn test_pitch_classes() {
        let board = Fretboard::standard(18).unwrap();
        let c_shape = voicing(&[(0, 0), (1, 1), (2, 0), (3, 2), (4, 3)]);
        let pcs = c_shape.pitch_classes(&board);
        assert_eq!(pcs.len(), 3);
        assert!(pcs.contains(&PitchClass::C));
        assert!(pcs.contains(&PitchClass::E));
        assert!(pcs.contains(&PitchClass::G));
    }

    #[test]
    fn test_display() {
        assert_eq!(voicing(&[(1, 3), (0, 2)]).to_string(), "[0:2, 1:3]");
    }
}
