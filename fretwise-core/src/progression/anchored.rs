//! Position-anchored templates
//!
//! The seed chord is classified by role, and each role has a handful of
//! templates that reserve a slot for it. Every other chord is a fixed
//! semitone offset from the seed's root, so the seed always sits exactly
//! where the template says.

use crate::types::chord::ChordSpec;
use crate::types::chord_type::ChordType::{self, *};
use crate::types::key::{KeyContext, Mode};
use crate::types::progression::Intent;

/// What job the seed chord most naturally does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedRole {
    MajorTonic,
    MinorTonic,
    Dominant,
    Diminished,
    Extended { minor: bool },
}

impl SeedRole {
    pub fn classify(chord_type: ChordType) -> Self {
        if chord_type.is_dominant() {
            SeedRole::Dominant
        } else if chord_type.is_diminished() {
            SeedRole::Diminished
        } else if chord_type.is_extended() {
            SeedRole::Extended {
                minor: chord_type.is_minor_family(),
            }
        } else if chord_type.is_minor_family() {
            SeedRole::MinorTonic
        } else {
            SeedRole::MajorTonic
        }
    }
}

/// One chord relative to the seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Semitones above the seed's root
    pub offset: u8,
    /// `None` repeats the seed's own quality
    pub chord_type: Option<ChordType>,
    /// Dominant function, for extension propagation
    pub dominant: bool,
}

const fn seed() -> Slot {
    Slot {
        offset: 0,
        chord_type: None,
        dominant: false,
    }
}

const fn at(offset: u8, chord_type: ChordType) -> Slot {
    Slot {
        offset,
        chord_type: Some(chord_type),
        dominant: false,
    }
}

const fn dom(offset: u8, chord_type: ChordType) -> Slot {
    Slot {
        offset,
        chord_type: Some(chord_type),
        dominant: true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchoredTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub intent: Intent,
    pub richness: u8,
    /// Index of the seed in `slots`
    pub seed_slot: usize,
    /// Semitones from the seed's root up to the key's tonic
    pub tonic_offset: u8,
    pub mode: Mode,
    pub slots: &'static [Slot],
}

impl AnchoredTemplate {
    pub fn key(&self, seed: &ChordSpec) -> KeyContext {
        KeyContext::new(seed.root + self.tonic_offset as i32, self.mode)
    }

    /// The chords this template produces around `seed`
    pub fn realize(&self, seed: &ChordSpec) -> Vec<ChordSpec> {
        let extend = seed.chord_type.is_extended();
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                if index == self.seed_slot {
                    return *seed;
                }
                let chord_type = match slot.chord_type {
                    Some(t) if extend => t.with_seventh(slot.dominant),
                    Some(t) => t,
                    None => seed.chord_type,
                };
                ChordSpec::new(seed.root + slot.offset as i32, chord_type)
            })
            .collect()
    }
}

#[allow(clippy::too_many_arguments)]
const fn anchored(
    name: &'static str,
    description: &'static str,
    intent: Intent,
    richness: u8,
    seed_slot: usize,
    tonic_offset: u8,
    mode: Mode,
    slots: &'static [Slot],
) -> AnchoredTemplate {
    AnchoredTemplate {
        name,
        description,
        intent,
        richness,
        seed_slot,
        tonic_offset,
        mode,
        slots,
    }
}

const MAJOR_TONIC: &[AnchoredTemplate] = &[
    anchored(
        "Three-Chord",
        "The seed as I of I-IV-V-I",
        Intent::Loop,
        0,
        0,
        0,
        Mode::Major,
        &[seed(), at(5, Major), dom(7, Major), at(0, Major)],
    ),
    anchored(
        "Plagal Lift",
        "The seed as IV of I-IV-V-I",
        Intent::Loop,
        0,
        1,
        7,
        Mode::Major,
        &[at(7, Major), seed(), dom(2, Major), at(7, Major)],
    ),
    anchored(
        "Pop Axis",
        "The seed as V of I-V-vi-IV",
        Intent::Loop,
        1,
        1,
        5,
        Mode::Major,
        &[at(5, Major), seed(), at(2, Minor), at(10, Major)],
    ),
    anchored(
        "Doo-Wop",
        "The seed as IV of I-vi-IV-V",
        Intent::Loop,
        1,
        2,
        7,
        Mode::Major,
        &[at(7, Major), at(4, Minor), seed(), dom(2, Major)],
    ),
];

const MINOR_TONIC: &[AnchoredTemplate] = &[
    anchored(
        "Minor Three-Chord",
        "The seed as i of i-iv-v-i",
        Intent::Loop,
        0,
        0,
        0,
        Mode::Minor,
        &[seed(), at(5, Minor), at(7, Minor), at(0, Minor)],
    ),
    anchored(
        "Relative Axis",
        "The seed as vi of I-V-vi-IV",
        Intent::Loop,
        0,
        2,
        3,
        Mode::Major,
        &[at(3, Major), dom(10, Major), seed(), at(8, Major)],
    ),
    anchored(
        "Andalusian Cadence",
        "The seed as i of i-VII-VI-V",
        Intent::Loop,
        1,
        0,
        0,
        Mode::Minor,
        &[seed(), at(10, Major), at(8, Major), dom(7, Major)],
    ),
    anchored(
        "Supertonic Cadence",
        "The seed as ii of ii-V-I",
        Intent::Turnaround,
        1,
        0,
        10,
        Mode::Major,
        &[seed(), dom(5, Major), at(10, Major)],
    ),
];

const DOMINANT: &[AnchoredTemplate] = &[
    anchored(
        "ii-V-I",
        "The seed as V7 of a major ii-V-I",
        Intent::Turnaround,
        0,
        1,
        5,
        Mode::Major,
        &[at(7, Minor7), seed(), at(5, Major7)],
    ),
    anchored(
        "Minor ii-V-i",
        "The seed as V7 of a minor ii-V-i",
        Intent::Turnaround,
        1,
        1,
        5,
        Mode::Minor,
        &[at(7, HalfDiminished7), seed(), at(5, Minor7)],
    ),
    anchored(
        "Blues Turnaround",
        "The seed as I7 of the blues",
        Intent::Turnaround,
        1,
        0,
        0,
        Mode::Mixolydian,
        &[seed(), dom(5, Dominant7), seed(), dom(7, Dominant7)],
    ),
    anchored(
        "Secondary Chain",
        "V7/V into the seed as V7, then home",
        Intent::Turnaround,
        2,
        1,
        5,
        Mode::Major,
        &[dom(7, Dominant7), seed(), at(5, Major7)],
    ),
    anchored(
        "Backdoor",
        "The seed as bVII7 between iv7 and I",
        Intent::Turnaround,
        2,
        1,
        2,
        Mode::Major,
        &[at(7, Minor7), seed(), at(2, Major7)],
    ),
];

const DIMINISHED: &[AnchoredTemplate] = &[
    anchored(
        "Leading Tone",
        "The seed as vii° resolving up a semitone",
        Intent::Loop,
        0,
        0,
        1,
        Mode::Major,
        &[seed(), at(1, Major), at(6, Major), dom(8, Major)],
    ),
    anchored(
        "Cadential vii°",
        "The seed between IV and I",
        Intent::Turnaround,
        0,
        1,
        1,
        Mode::Major,
        &[at(6, Major), seed(), at(1, Major)],
    ),
    anchored(
        "Minor Supertonic",
        "The seed as ii° of a minor ii-V-i",
        Intent::Turnaround,
        1,
        0,
        10,
        Mode::Minor,
        &[seed(), dom(5, Major), at(10, Minor)],
    ),
];

const EXTENDED_MAJOR: &[AnchoredTemplate] = &[
    anchored(
        "Jazz Tonic",
        "The seed as Imaj7 of I-vi-ii-V",
        Intent::Loop,
        0,
        0,
        0,
        Mode::Major,
        &[seed(), at(9, Minor7), at(2, Minor7), dom(7, Dominant7)],
    ),
    anchored(
        "Soul Vamp",
        "The seed rocking to IVmaj7",
        Intent::Vamp,
        0,
        0,
        0,
        Mode::Major,
        &[seed(), at(5, Major7)],
    ),
    anchored(
        "Royal Road",
        "The seed as IVmaj7 of IV-V-iii-vi",
        Intent::Loop,
        1,
        0,
        7,
        Mode::Major,
        &[seed(), dom(2, Dominant7), at(11, Minor7), at(4, Minor7)],
    ),
    anchored(
        "Long Circle",
        "Diatonic sevenths around the circle, starting from the seed",
        Intent::Phrase,
        2,
        0,
        0,
        Mode::Major,
        &[
            seed(),
            at(5, Major7),
            at(11, HalfDiminished7),
            at(4, Minor7),
            at(9, Minor7),
            at(2, Minor7),
            dom(7, Dominant7),
            seed(),
        ],
    ),
];

const EXTENDED_MINOR: &[AnchoredTemplate] = &[
    anchored(
        "ii7-V7-I",
        "The seed as ii7 of a major cadence",
        Intent::Turnaround,
        0,
        0,
        10,
        Mode::Major,
        &[seed(), dom(5, Dominant7), at(10, Major7)],
    ),
    anchored(
        "Dorian Vamp",
        "The seed against a Dorian IV7",
        Intent::Vamp,
        1,
        0,
        0,
        Mode::Dorian,
        &[seed(), at(5, Dominant7)],
    ),
    anchored(
        "vi7 Turnaround",
        "The seed as vi7 of Imaj7-vi7-ii7-V7",
        Intent::Loop,
        1,
        1,
        3,
        Mode::Major,
        &[at(3, Major7), seed(), at(5, Minor7), dom(10, Dominant7)],
    ),
    anchored(
        "Minor Circle",
        "Minor-key sevenths around the circle, starting from the seed",
        Intent::Phrase,
        2,
        0,
        0,
        Mode::Minor,
        &[
            seed(),
            at(5, Minor7),
            dom(10, Dominant7),
            at(3, Major7),
            at(8, Major7),
            at(2, HalfDiminished7),
            dom(7, Dominant7),
            seed(),
        ],
    ),
];

/// Templates available to a seed of the given role
pub fn for_role(role: SeedRole) -> &'static [AnchoredTemplate] {
    match role {
        SeedRole::MajorTonic => MAJOR_TONIC,
        SeedRole::MinorTonic => MINOR_TONIC,
        SeedRole::Dominant => DOMINANT,
        SeedRole::Diminished => DIMINISHED,
        SeedRole::Extended { minor: false } => EXTENDED_MAJOR,
        SeedRole::Extended { minor: true } => EXTENDED_MINOR,
    }
}

/// Every anchored template, for exhaustive checks
pub fn all() -> impl Iterator<Item = &'static AnchoredTemplate> {
    [
        MAJOR_TONIC,
        MINOR_TONIC,
        DOMINANT,
        DIMINISHED,
        EXTENDED_MAJOR,
        EXTENDED_MINOR,
    ]
    .into_iter()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pitch::PitchClass;

    #[test]
    fn test_classify() {
        assert_eq!(SeedRole::classify(Major), SeedRole::MajorTonic);
        assert_eq!(SeedRole::classify(Sus4), SeedRole::MajorTonic);
        assert_eq!(SeedRole::classify(Minor), SeedRole::MinorTonic);
        assert_eq!(SeedRole::classify(Dominant7), SeedRole::Dominant);
        assert_eq!(SeedRole::classify(Dominant7Sus4), SeedRole::Dominant);
        assert_eq!(SeedRole::classify(Diminished), SeedRole::Diminished);
        assert_eq!(SeedRole::classify(HalfDiminished7), SeedRole::Diminished);
        assert_eq!(SeedRole::classify(Major7), SeedRole::Extended { minor: false });
        assert_eq!(SeedRole::classify(Minor9), SeedRole::Extended { minor: true });
    }

    #[test]
    fn test_seed_slot_is_valid_and_kept_by_truncation() {
        for template in all() {
            assert!(template.seed_slot < template.slots.len(), "{}", template.name);
            assert_eq!(template.slots[template.seed_slot], seed(), "{}", template.name);
            if let Some(max) = template.intent.max_length() {
                assert!(template.seed_slot < max, "{}", template.name);
            } else {
                assert!((5..=8).contains(&template.slots.len()), "{}", template.name);
            }
        }
    }

    #[test]
    fn test_ii_v_i_around_g7() {
        let g7 = ChordSpec::new(PitchClass::G, Dominant7);
        let template = &DOMINANT[0];
        let chords: Vec<String> = template.realize(&g7).iter().map(|c| c.symbol()).collect();
        assert_eq!(chords, vec!["Dm7", "G7", "Cmaj7"]);
        assert_eq!(template.key(&g7).tonic, PitchClass::C);
    }

    #[test]
    fn test_slot_keys_put_seed_on_its_degree() {
        // Plagal Lift: F as IV puts the tonic on C
        let f = ChordSpec::new(PitchClass::F, Major);
        let template = &MAJOR_TONIC[1];
        let key = template.key(&f);
        assert_eq!(key.tonic, PitchClass::C);
        let chords: Vec<String> = template.realize(&f).iter().map(|c| c.symbol()).collect();
        assert_eq!(chords, vec!["C", "F", "G", "C"]);
    }

    #[test]
    fn test_extension_propagates_from_seed() {
        let cmaj7 = ChordSpec::new(PitchClass::C, Major7);
        // A plain triad seed leaves the template's triads alone
        let b_dim = ChordSpec::new(PitchClass::B, Diminished);
        let chords = DIMINISHED[0].realize(&b_dim);
        assert_eq!(chords[1], ChordSpec::new(PitchClass::C, Major));

        let bm7b5 = ChordSpec::new(PitchClass::B, HalfDiminished7);
        let chords = DIMINISHED[0].realize(&bm7b5);
        assert_eq!(chords[1], ChordSpec::new(PitchClass::C, Major7));
        assert_eq!(chords[3], ChordSpec::new(PitchClass::G, Dominant7));

        let chords = EXTENDED_MAJOR[0].realize(&cmaj7);
        assert_eq!(chords[0], cmaj7);
    }
}
