//! The declarative progression library
//!
//! Each template lists its chords as scale-degree steps. Degrees are read
//! from the key's own scale unless the template names a mode. `richness`
//! (0-2) is how adventurous the harmony is, and drives the complexity
//! weighting when a template is picked.

use super::degree::{flat, on, sec, sub, Step};
use crate::types::chord_type::ChordType::*;
use crate::types::key::Mode;
use crate::types::progression::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    pub intent: Intent,
    pub richness: u8,
    /// Scale used for degree lookup in place of the key's major/minor scale
    pub mode: Option<Mode>,
    pub steps: &'static [Step],
}

const fn template(
    name: &'static str,
    description: &'static str,
    intent: Intent,
    richness: u8,
    steps: &'static [Step],
) -> Template {
    Template {
        name,
        description,
        intent,
        richness,
        mode: None,
        steps,
    }
}

const fn modal(
    name: &'static str,
    description: &'static str,
    intent: Intent,
    richness: u8,
    mode: Mode,
    steps: &'static [Step],
) -> Template {
    Template {
        name,
        description,
        intent,
        richness,
        mode: Some(mode),
        steps,
    }
}

pub const MAJOR: &[Template] = &[
    template(
        "Pop Axis",
        "The four-chord loop behind countless pop songs",
        Intent::Loop,
        0,
        &[on(0, Major), on(4, Major), on(5, Minor), on(3, Major)],
    ),
    template(
        "Doo-Wop",
        "Fifties ballad changes",
        Intent::Loop,
        0,
        &[on(0, Major), on(5, Minor), on(3, Major), on(4, Major)],
    ),
    template(
        "Three-Chord",
        "Tonic, subdominant, dominant, home",
        Intent::Loop,
        0,
        &[on(0, Major), on(3, Major), on(4, Major), on(0, Major)],
    ),
    template(
        "Deceptive Cadence",
        "The dominant resolves to vi instead of home",
        Intent::Loop,
        0,
        &[on(0, Major), on(3, Major), on(4, Major), on(5, Minor)],
    ),
    modal(
        "Mixolydian Vamp",
        "Rock vamp over the flat seventh",
        Intent::Vamp,
        1,
        Mode::Mixolydian,
        &[on(0, Major), on(6, Major), on(3, Major), on(0, Major)],
    ),
    modal(
        "Lydian Float",
        "Raised fourth gives a major II that never resolves",
        Intent::Vamp,
        1,
        Mode::Lydian,
        &[on(0, Major), on(1, Major)],
    ),
    template(
        "Soul Vamp",
        "Two major sevenths rocking back and forth",
        Intent::Vamp,
        1,
        &[on(0, Major7), on(3, Major7)],
    ),
    template(
        "Jazz ii-V-I",
        "The standard cadence",
        Intent::Turnaround,
        1,
        &[on(1, Minor7), on(4, Dominant7), on(0, Major7)],
    ),
    template(
        "Rhythm Turnaround",
        "I-vi-ii-V with sevenths",
        Intent::Turnaround,
        1,
        &[on(0, Major7), on(5, Minor7), on(1, Minor7), on(4, Dominant7)],
    ),
    template(
        "Royal Road",
        "J-pop staple, starts away from home",
        Intent::Loop,
        1,
        &[on(3, Major7), on(4, Dominant7), on(2, Minor7), on(5, Minor7)],
    ),
    template(
        "Modal Interchange",
        "Borrowed bVI and bVII from the parallel minor",
        Intent::Loop,
        1,
        &[on(0, Major), flat(5, Major), flat(6, Major), on(0, Major)],
    ),
    template(
        "Backdoor",
        "Minor iv and bVII7 sneak back to the tonic",
        Intent::Turnaround,
        2,
        &[on(3, Minor7), flat(6, Dominant7), on(0, Major7)],
    ),
    template(
        "Tritone Turnaround",
        "Secondary dominant into ii, tritone sub back home",
        Intent::Turnaround,
        2,
        &[
            on(0, Major7),
            sec(1, Dominant7),
            on(1, Minor7),
            sub(0, Dominant7),
        ],
    ),
    template(
        "Rhythm Changes",
        "Bebop A-section turnaround",
        Intent::Turnaround,
        2,
        &[
            on(0, Major7),
            on(5, Minor7),
            on(1, Minor7),
            on(4, Dominant7),
            on(2, Minor7),
            on(5, Minor7),
            on(1, Minor7),
            on(4, Dominant7),
        ],
    ),
    template(
        "Canon",
        "Descending bass ground in the manner of Pachelbel",
        Intent::Phrase,
        1,
        &[
            on(0, Major),
            on(4, Major),
            on(5, Minor),
            on(2, Minor),
            on(3, Major),
            on(0, Major),
            on(3, Major),
            on(4, Major),
        ],
    ),
    template(
        "Secondary Lift",
        "V7/vi pulls the ear toward the relative minor",
        Intent::Phrase,
        1,
        &[
            on(0, Major),
            sec(5, Dominant7),
            on(5, Minor),
            on(3, Major),
            on(4, Major),
        ],
    ),
    template(
        "Gospel Plagal",
        "I7 into IV, then the minor iv on the way home",
        Intent::Phrase,
        1,
        &[
            on(0, Major),
            sec(3, Dominant7),
            on(3, Major),
            on(3, Minor),
            on(0, Major),
        ],
    ),
    template(
        "Blues Phrase",
        "Condensed twelve-bar changes",
        Intent::Phrase,
        1,
        &[
            on(0, Dominant7),
            on(3, Dominant7),
            on(0, Dominant7),
            on(4, Dominant7),
            on(3, Dominant7),
            on(0, Dominant7),
        ],
    ),
    template(
        "Heroic Ascent",
        "Borrowed chords climbing back to a triumphant tonic",
        Intent::Cinematic,
        1,
        &[
            on(0, Major),
            flat(5, Major),
            flat(6, Major),
            on(0, Major),
            on(3, Major),
            flat(6, Major),
            on(0, Major),
        ],
    ),
    template(
        "Circle of Fifths",
        "Every diatonic seventh chord, root motion by fourths",
        Intent::Phrase,
        2,
        &[
            on(0, Major7),
            on(3, Major7),
            on(6, HalfDiminished7),
            on(2, Minor7),
            on(5, Minor7),
            on(1, Minor7),
            on(4, Dominant7),
            on(0, Major7),
        ],
    ),
    template(
        "Extended Turnaround",
        "iii-vi-ii-V-I with a secondary dominant",
        Intent::Phrase,
        2,
        &[
            on(2, Minor7),
            sec(1, Dominant7),
            on(1, Minor7),
            on(4, Dominant7),
            on(0, Major7),
        ],
    ),
    template(
        "Chromatic Mediants",
        "Film-score major chords a third apart",
        Intent::Cinematic,
        2,
        &[
            on(0, Major),
            on(2, Major),
            flat(5, Major),
            on(3, Major),
            flat(2, Major),
            on(0, Major),
        ],
    ),
];

pub const MINOR: &[Template] = &[
    template(
        "Aeolian Loop",
        "Natural minor, down through the relative major",
        Intent::Loop,
        0,
        &[on(0, Minor), on(5, Major), on(2, Major), on(6, Major)],
    ),
    template(
        "Andalusian Cadence",
        "Stepwise descent to a major dominant",
        Intent::Loop,
        0,
        &[on(0, Minor), on(6, Major), on(5, Major), on(4, Major)],
    ),
    template(
        "Minor Plagal",
        "Tonic and subdominant with a harmonic-minor V",
        Intent::Loop,
        0,
        &[on(0, Minor), on(3, Minor), on(0, Minor), on(4, Major)],
    ),
    template(
        "Minor Drift",
        "Aeolian loop with a minor v",
        Intent::Loop,
        0,
        &[on(0, Minor), on(4, Minor), on(5, Major), on(3, Minor)],
    ),
    template(
        "Picardy Loop",
        "Minor loop that ends on a major tonic",
        Intent::Loop,
        1,
        &[on(0, Minor), on(3, Minor), on(4, Dominant7), on(0, Major)],
    ),
    modal(
        "Dorian Groove",
        "Minor tonic against the bright Dorian IV",
        Intent::Vamp,
        1,
        Mode::Dorian,
        &[on(0, Minor), on(3, Major)],
    ),
    modal(
        "Phrygian Shadow",
        "The half-step bII gives a Spanish colour",
        Intent::Vamp,
        1,
        Mode::Phrygian,
        &[on(0, Minor), on(1, Major), on(2, Major), on(1, Major)],
    ),
    template(
        "Minor ii-V-i",
        "Half-diminished cadence",
        Intent::Turnaround,
        1,
        &[on(1, HalfDiminished7), on(4, Dominant7), on(0, Minor7)],
    ),
    template(
        "Minor Tritone",
        "subV7 slides down a semitone to the tonic",
        Intent::Turnaround,
        2,
        &[on(0, Minor7), on(3, Minor7), sub(0, Dominant7), on(0, Minor7)],
    ),
    template(
        "Minor Secondary",
        "i7 tonicizes iv before the cadence",
        Intent::Phrase,
        1,
        &[
            on(0, Minor),
            sec(3, Dominant7),
            on(3, Minor),
            on(4, Dominant7),
            on(0, Minor),
        ],
    ),
    template(
        "Epic Minor",
        "Trailer-style natural minor swell",
        Intent::Cinematic,
        1,
        &[
            on(0, Minor),
            on(5, Major),
            on(2, Major),
            on(6, Major),
            on(0, Minor),
            on(5, Major),
            on(6, Major),
        ],
    ),
    template(
        "Harmonic Lament",
        "Minor circle of fifths with a half-diminished ii",
        Intent::Phrase,
        2,
        &[
            on(0, Minor7),
            on(3, Minor7),
            on(6, Dominant7),
            on(2, Major7),
            on(5, Major7),
            on(1, HalfDiminished7),
            on(4, Dominant7),
            on(0, Minor7),
        ],
    ),
    template(
        "Noir Cue",
        "Neapolitan bII darkens the approach to V",
        Intent::Cinematic,
        2,
        &[
            on(0, Minor),
            on(3, Minor),
            flat(1, Major),
            on(4, Dominant7),
            on(0, Minor),
            on(5, Major),
        ],
    ),
];

/// Used when nothing else applies: I-IV-V-I, or i-iv-v-i in minor
pub const DEFAULT_MAJOR: Template = template(
    "Default Loop",
    "Tonic, subdominant, dominant, tonic",
    Intent::Loop,
    0,
    &[on(0, Major), on(3, Major), on(4, Major), on(0, Major)],
);

pub const DEFAULT_MINOR: Template = template(
    "Default Loop",
    "Minor tonic, subdominant, dominant, tonic",
    Intent::Loop,
    0,
    &[on(0, Minor), on(3, Minor), on(4, Minor), on(0, Minor)],
);

/// The template pool for a key family
pub fn library(minor: bool) -> &'static [Template] {
    if minor {
        MINOR
    } else {
        MAJOR
    }
}

pub fn default_template(minor: bool) -> &'static Template {
    if minor {
        &DEFAULT_MINOR
    } else {
        &DEFAULT_MAJOR
    }
}

/// Pick weight by complexity (row) and template richness (column)
const WEIGHTS: [[u32; 3]; 3] = [[6, 2, 1], [3, 4, 2], [1, 3, 5]];

pub fn weight(complexity: usize, richness: u8) -> u32 {
    WEIGHTS[complexity.min(2)][(richness as usize).min(2)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::degree::DegreeSpec;

    fn all() -> impl Iterator<Item = &'static Template> {
        MAJOR.iter().chain(MINOR.iter()).chain([&DEFAULT_MAJOR, &DEFAULT_MINOR])
    }

    #[test]
    fn test_full_length_templates_are_five_to_eight() {
        for template in all() {
            if !template.intent.is_truncated() {
                let len = template.steps.len();
                assert!((5..=8).contains(&len), "{} has {} chords", template.name, len);
            }
        }
    }

    #[test]
    fn test_templates_well_formed() {
        for template in all() {
            assert!(!template.steps.is_empty(), "{}", template.name);
            assert!(template.richness <= 2, "{}", template.name);
            for step in template.steps {
                let degree = match step.degree {
                    DegreeSpec::Normal { degree, alteration } => {
                        assert!((-1..=1).contains(&alteration), "{}", template.name);
                        degree
                    }
                    DegreeSpec::SecondaryDominant { target } => target,
                    DegreeSpec::TritoneSub { target } => target,
                };
                assert!(degree < 7, "{}", template.name);
            }
        }
    }

    #[test]
    fn test_library_has_truncated_long_template() {
        assert!(MAJOR
            .iter()
            .any(|t| t.intent.is_truncated() && t.steps.len() > 4));
    }

    #[test]
    fn test_weights_favour_richness_with_complexity() {
        assert!(weight(0, 0) > weight(0, 2));
        assert!(weight(2, 2) > weight(2, 0));
        assert_eq!(weight(1, 1), 4);
    }
}
