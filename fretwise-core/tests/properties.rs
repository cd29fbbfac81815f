// Cross-module behaviour checks, run against the public API only

use fastrand::Rng;
use fretwise_core::progression::{anchored, templates};
use fretwise_core::voice_leading::total_cost;
use fretwise_core::{
    recognize, recognize_pitches, search, ChordSpec, ChordType, Complexity, FretPosition,
    Fretboard, Intent, IntervalName, PitchClass, ProgressionGenerator, Recognition, Strategy,
    Tuning, VoiceLeadingOptimizer, VoiceLeadingWeights, Voicing, VoicingSearch,
};

fn toy_board() -> Fretboard {
    let tuning = Tuning::new("toy", vec![PitchClass::C, PitchClass::E, PitchClass::G]).unwrap();
    Fretboard::new(tuning, 5).unwrap()
}

fn shift(recognition: &Recognition, k: i32) -> Recognition {
    match *recognition {
        Recognition::None => Recognition::None,
        Recognition::Interval {
            root,
            name,
            semitones,
        } => Recognition::Interval {
            root: root + k,
            name,
            semitones,
        },
        Recognition::Chord { root, chord_type } => Recognition::Chord {
            root: root + k,
            chord_type,
        },
    }
}

#[test]
fn recognition_is_transposition_invariant() {
    let board = Fretboard::standard(18).unwrap();
    let search = VoicingSearch::new(&board);

    let mut shapes: Vec<Vec<FretPosition>> = Vec::new();
    for chord in ["C", "Am7", "G7", "Dm7b5", "Fmaj7", "E7#9", "Bbsus4", "C13"] {
        let chord: ChordSpec = chord.parse().unwrap();
        shapes.extend(
            search
                .for_chord(&chord)
                .into_iter()
                .filter(|v| v.iter().all(|p| p.fret <= 5))
                .take(5)
                .map(|v| v.positions().to_vec()),
        );
    }
    shapes.push(vec![FretPosition::new(0, 0), FretPosition::new(1, 1)]);
    shapes.push(vec![
        FretPosition::new(2, 0),
        FretPosition::new(3, 1),
        FretPosition::new(4, 2),
    ]);
    assert!(shapes.len() > 20);

    for shape in &shapes {
        let base = recognize(shape, &board);
        for k in 0..12 {
            let moved: Vec<FretPosition> = shape
                .iter()
                .map(|p| FretPosition::new(p.string, p.fret + k))
                .collect();
            assert_eq!(recognize(&moved, &board), shift(&base, k as i32), "{:?} +{}", shape, k);
        }
    }
}

#[test]
fn every_chord_type_transposes_cleanly() {
    for chord_type in ChordType::ALL {
        let notes = ChordSpec::new(PitchClass::C, chord_type).notes();
        let base = recognize_pitches(&notes);
        assert!(!base.is_none(), "{:?}", chord_type);
        for k in 1..12 {
            let moved: Vec<PitchClass> = notes.iter().map(|&n| n + k).collect();
            assert_eq!(recognize_pitches(&moved), shift(&base, k));
        }
    }
}

#[test]
fn two_distinct_notes_are_always_an_interval() {
    for a in PitchClass::all() {
        for b in PitchClass::all().filter(|&b| b != a) {
            match recognize_pitches(&[a, b, a]) {
                Recognition::Interval { root, .. } => assert_eq!(root, a),
                other => panic!("{} {} gave {:?}", a, b, other),
            }
        }
    }
}

#[test]
fn search_is_sound() {
    let board = Fretboard::standard(18).unwrap();
    let search = VoicingSearch::new(&board);
    for root in [PitchClass::C, PitchClass::F + 1, PitchClass::A] {
        for chord_type in [
            ChordType::Major,
            ChordType::Minor7,
            ChordType::Dominant9,
            ChordType::HalfDiminished7,
        ] {
            let chord = ChordSpec::new(root, chord_type);
            let voicings = search.for_chord(&chord);
            assert!(!voicings.is_empty(), "{}", chord);

            for voicing in &voicings {
                let strings: Vec<usize> = voicing.iter().map(|p| p.string).collect();
                let frets: Vec<usize> = voicing.iter().map(|p| p.fret).collect();

                let mut unique = strings.clone();
                unique.dedup();
                assert_eq!(unique.len(), strings.len());

                assert!(strings.iter().max().unwrap() - strings.iter().min().unwrap() <= 3);
                assert!(frets.iter().max().unwrap() - frets.iter().min().unwrap() <= 3);
                for pitch in voicing.pitch_classes(&board) {
                    assert!(chord.contains(pitch), "{} in {}", pitch, voicing);
                }
            }
        }
    }
}

#[test]
fn toy_board_open_triad_and_fifth() {
    let board = toy_board();
    let voicings = search(&board, &ChordSpec::new(PitchClass::C, ChordType::Major).notes(), None);
    let open = Voicing::new(vec![
        FretPosition::new(0, 0),
        FretPosition::new(1, 0),
        FretPosition::new(2, 0),
    ]);
    assert!(voicings.contains(&open));

    let fifth = recognize(&[FretPosition::new(0, 0), FretPosition::new(2, 0)], &board);
    assert_eq!(
        fifth,
        Recognition::Interval {
            root: PitchClass::C,
            name: IntervalName::PerfectFifth,
            semitones: 7,
        }
    );
    if let Recognition::Interval { name, .. } = fifth {
        assert_eq!(name.name(), "perfect 5th");
    }
}

#[test]
fn progression_lengths_follow_intent() {
    let seeds = [
        ChordSpec::new(PitchClass::C, ChordType::Major),
        ChordSpec::new(PitchClass::A, ChordType::Minor),
        ChordSpec::new(PitchClass::G, ChordType::Dominant7),
        ChordSpec::new(PitchClass::D, ChordType::Minor7),
        ChordSpec::new(PitchClass::F, ChordType::Major7),
        ChordSpec::new(PitchClass::B, ChordType::Diminished),
        ChordSpec::new(PitchClass::E, ChordType::Minor9),
    ];
    let mut rng = Rng::with_seed(2024);

    for strategy in [Strategy::PatternAnchored, Strategy::PositionAnchored, Strategy::RuleGraph] {
        let generator = ProgressionGenerator::with_strategy(strategy);
        for seed in &seeds {
            for complexity in [Complexity::Simple, Complexity::Moderate, Complexity::Rich] {
                for _ in 0..30 {
                    let progression = generator.generate(seed, Some(complexity), &mut rng);
                    let len = progression.len();
                    match progression.intent {
                        Intent::Loop | Intent::Vamp | Intent::Turnaround => {
                            assert!((1..=4).contains(&len), "{}", progression.name)
                        }
                        Intent::Phrase | Intent::Cinematic => {
                            assert!((5..=8).contains(&len), "{}", progression.name)
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn template_tables_respect_intent_lengths() {
    for template in templates::MAJOR.iter().chain(templates::MINOR) {
        if !template.intent.is_truncated() {
            assert!((5..=8).contains(&template.steps.len()), "{}", template.name);
        }
    }
    for template in anchored::all() {
        if !template.intent.is_truncated() {
            assert!((5..=8).contains(&template.slots.len()), "{}", template.name);
        }
    }
}

#[test]
fn identical_candidates_cost_nothing() {
    let shared = Voicing::new(vec![
        FretPosition::new(1, 5),
        FretPosition::new(2, 5),
        FretPosition::new(3, 6),
    ]);
    let other = Voicing::new(vec![FretPosition::new(0, 8), FretPosition::new(1, 10)]);
    let candidates = vec![
        vec![shared.clone(), other.clone()],
        vec![other.clone(), shared.clone()],
        vec![shared.clone()],
        vec![other, shared.clone()],
    ];

    let optimizer = VoiceLeadingOptimizer::default();
    let chosen = optimizer.optimize(&candidates, Some(&shared), None);
    assert!(chosen.iter().all(|v| *v == shared));
    assert_eq!(total_cost(&chosen, &VoiceLeadingWeights::default()), 0.0);
}

#[test]
fn fallback_fills_all_empty_candidates() {
    let board = Fretboard::standard(18).unwrap();
    let chords: Vec<ChordSpec> = ["C", "Am", "F", "G7"]
        .iter()
        .map(|c| c.parse().unwrap())
        .collect();
    let candidates = vec![Vec::new(); chords.len()];

    let optimizer = VoiceLeadingOptimizer::default();
    assert!(optimizer
        .optimize(&candidates, None, None)
        .iter()
        .all(Voicing::is_empty));

    let voicings = optimizer.optimize_with_fallback(&board, &chords, &candidates, None, Some(7.0));
    assert_eq!(voicings.len(), chords.len());
    for (voicing, chord) in voicings.iter().zip(&chords) {
        assert!(!voicing.is_empty());
        for pitch in voicing.pitch_classes(&board) {
            assert!(chord.contains(pitch));
        }
    }
}

#[test]
fn realized_progression_keeps_anchor() {
    let board = Fretboard::standard(18).unwrap();
    let seed = ChordSpec::new(PitchClass::G, ChordType::Dominant7);
    let generator = ProgressionGenerator::with_strategy(Strategy::PositionAnchored);
    let progression = generator.generate(&seed, None, &mut Rng::with_seed(3));
    let index = progression.selected_chord_index.unwrap();

    let anchor = VoicingSearch::new(&board).for_chord(&seed)[0].clone();
    let voicings = VoiceLeadingOptimizer::default().realize_progression(
        &board,
        &progression,
        Some(&anchor),
        None,
    );

    assert_eq!(voicings.len(), progression.len());
    assert_eq!(voicings[index], anchor);
    for (voicing, chord) in voicings.iter().zip(&progression.chords) {
        for pitch in voicing.pitch_classes(&board) {
            assert!(chord.contains(pitch));
        }
    }
}
