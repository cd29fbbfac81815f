//! The closed chord-type catalog
//!
//! Every chord quality the library knows about is a variant of [`ChordType`].
//! Each variant carries an ordered formula of semitone offsets from the root
//! (offset 0 is always first). Declaration order in [`ChordType::ALL`] is the
//! order recognition tries formulas in, so it is part of the public contract.

use crate::error::{FretwiseError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChordType {
    // Triads
    Major,
    Minor,
    Augmented,
    Diminished,
    // Sevenths
    Major7,
    Minor7,
    Dominant7,
    Diminished7,
    // Ninths and add9
    Minor9,
    MinorAdd9,
    Major9,
    MajorAdd9,
    // Suspended
    Sus2,
    Sus4,
    // Sixths
    Major6,
    Minor6,
    // Omitted notes
    Major7No5,
    Dominant7No5,
    Major6No3,
    // Extended dominants
    Dominant7Sus4,
    Dominant13,
    Dominant13No5,
    Dominant13No11,
    // Further sevenths
    HalfDiminished7,
    MinorMajor7,
    Augmented7,
    AugmentedMajor7,
    DiminishedMajor7,
    Dominant7Flat5,
    // Dominant extensions and alterations
    Dominant9,
    Dominant7Flat9,
    Dominant7Sharp9,
    Dominant7Sharp11,
    Dominant7Flat13,
    Dominant7Alt,
    Augmented9,
    Dominant9Sus4,
    Dominant7Sus2,
    Dominant13Flat9,
    // Elevenths and thirteenths
    Minor11,
    Dominant11,
    Major11,
    Minor13,
    Major13,
    Major7Sharp11,
    Minor9Flat5,
    // Six-nine and added tones
    Major6Add9,
    Minor6Add9,
    Add11,
    MinorAdd11,
    Sus2Sus4,
    Major7Sus4,
    // More omissions
    Minor7No5,
    Dominant7No3,
    Major7No3,
    Dominant9No5,
    Minor9No5,
    Major9No5,
    Minor11No5,
}

/// Static description of one catalog entry
struct ChordInfo {
    symbol: &'static str,
    key: &'static str,
    name: &'static str,
    formula: &'static [u8],
}

const fn info(
    symbol: &'static str,
    key: &'static str,
    name: &'static str,
    formula: &'static [u8],
) -> ChordInfo {
    ChordInfo {
        symbol,
        key,
        name,
        formula,
    }
}

impl ChordType {
    /// Every chord type, in recognition order
    pub const ALL: [ChordType; 59] = [
        ChordType::Major,
        ChordType::Minor,
        ChordType::Augmented,
        ChordType::Diminished,
        ChordType::Major7,
        ChordType::Minor7,
        ChordType::Dominant7,
        ChordType::Diminished7,
        ChordType::Minor9,
        ChordType::MinorAdd9,
        ChordType::Major9,
        ChordType::MajorAdd9,
        ChordType::Sus2,
        ChordType::Sus4,
        ChordType::Major6,
        ChordType::Minor6,
        ChordType::Major7No5,
        ChordType::Dominant7No5,
        ChordType::Major6No3,
        ChordType::Dominant7Sus4,
        ChordType::Dominant13,
        ChordType::Dominant13No5,
        ChordType::Dominant13No11,
        ChordType::HalfDiminished7,
        ChordType::MinorMajor7,
        ChordType::Augmented7,
        ChordType::AugmentedMajor7,
        ChordType::DiminishedMajor7,
        ChordType::Dominant7Flat5,
        ChordType::Dominant9,
        ChordType::Dominant7Flat9,
        ChordType::Dominant7Sharp9,
        ChordType::Dominant7Sharp11,
        ChordType::Dominant7Flat13,
        ChordType::Dominant7Alt,
        ChordType::Augmented9,
        ChordType::Dominant9Sus4,
        ChordType::Dominant7Sus2,
        ChordType::Dominant13Flat9,
        ChordType::Minor11,
        ChordType::Dominant11,
        ChordType::Major11,
        ChordType::Minor13,
        ChordType::Major13,
        ChordType::Major7Sharp11,
        ChordType::Minor9Flat5,
        ChordType::Major6Add9,
        ChordType::Minor6Add9,
        ChordType::Add11,
        ChordType::MinorAdd11,
        ChordType::Sus2Sus4,
        ChordType::Major7Sus4,
        ChordType::Minor7No5,
        ChordType::Dominant7No3,
        ChordType::Major7No3,
        ChordType::Dominant9No5,
        ChordType::Minor9No5,
        ChordType::Major9No5,
        ChordType::Minor11No5,
    ];

    /// Types that may be recognized from a strict subset of their formula,
    /// tried in this order after no exact match was found
    pub const OMISSION_TOLERANT: [ChordType; 11] = [
        ChordType::Dominant7No5,
        ChordType::Major7No5,
        ChordType::Major6No3,
        ChordType::Minor7No5,
        ChordType::Dominant7No3,
        ChordType::Major7No3,
        ChordType::Dominant9No5,
        ChordType::Minor9No5,
        ChordType::Major9No5,
        ChordType::Minor11No5,
        ChordType::Dominant13No5,
    ];

    fn info(self) -> ChordInfo {
        use ChordType::*;
        match self {
            Major => info("", "major", "major", &[0, 4, 7]),
            Minor => info("m", "minor", "minor", &[0, 3, 7]),
            Augmented => info("aug", "augmented", "augmented", &[0, 4, 8]),
            Diminished => info("dim", "diminished", "diminished", &[0, 3, 6]),
            Major7 => info("maj7", "major7", "major 7th", &[0, 4, 7, 11]),
            Minor7 => info("m7", "minor7", "minor 7th", &[0, 3, 7, 10]),
            Dominant7 => info("7", "dominant7", "dominant 7th", &[0, 4, 7, 10]),
            Diminished7 => info("dim7", "diminished7", "diminished 7th", &[0, 3, 6, 9]),
            Minor9 => info("m9", "minor9", "minor 9th", &[0, 3, 7, 10, 2]),
            MinorAdd9 => info("m(add9)", "minoradd9", "minor add 9", &[0, 3, 7, 2]),
            Major9 => info("maj9", "major9", "major 9th", &[0, 4, 7, 11, 2]),
            MajorAdd9 => info("add9", "majoradd9", "major add 9", &[0, 4, 7, 2]),
            Sus2 => info("sus2", "sus2", "suspended 2nd", &[0, 2, 7]),
            Sus4 => info("sus4", "sus4", "suspended 4th", &[0, 5, 7]),
            Major6 => info("6", "major6", "major 6th", &[0, 4, 7, 9]),
            Minor6 => info("m6", "minor6", "minor 6th", &[0, 3, 7, 9]),
            Major7No5 => info("maj7(no5)", "maj7no5", "major 7th no 5th", &[0, 4, 11]),
            Dominant7No5 => info("7(no5)", "7no5", "dominant 7th no 5th", &[0, 4, 10]),
            Major6No3 => info("6(no3)", "6no3", "6th no 3rd", &[0, 7, 9]),
            Dominant7Sus4 => info("7sus4", "7sus4", "dominant 7th sus 4", &[0, 5, 7, 10]),
            Dominant13 => info("13", "13", "dominant 13th", &[0, 4, 7, 10, 2, 5, 9]),
            Dominant13No5 => info("13(no5)", "13no5", "13th no 5th", &[0, 4, 10, 2, 5, 9]),
            Dominant13No11 => info("13(no11)", "13no11", "13th no 11th", &[0, 4, 7, 10, 2, 9]),
            HalfDiminished7 => info("m7b5", "halfdiminished7", "half-diminished 7th", &[0, 3, 6, 10]),
            MinorMajor7 => info("m(maj7)", "minormajor7", "minor major 7th", &[0, 3, 7, 11]),
            Augmented7 => info("aug7", "augmented7", "augmented 7th", &[0, 4, 8, 10]),
            AugmentedMajor7 => info("maj7#5", "augmentedmajor7", "augmented major 7th", &[0, 4, 8, 11]),
            DiminishedMajor7 => info("dim(maj7)", "diminishedmajor7", "diminished major 7th", &[0, 3, 6, 11]),
            Dominant7Flat5 => info("7b5", "7b5", "dominant 7th flat 5", &[0, 4, 6, 10]),
            Dominant9 => info("9", "dominant9", "dominant 9th", &[0, 4, 7, 10, 2]),
            Dominant7Flat9 => info("7b9", "7b9", "dominant 7th flat 9", &[0, 4, 7, 10, 1]),
            Dominant7Sharp9 => info("7#9", "7#9", "dominant 7th sharp 9", &[0, 4, 7, 10, 3]),
            Dominant7Sharp11 => info("7#11", "7#11", "dominant 7th sharp 11", &[0, 4, 7, 10, 6]),
            Dominant7Flat13 => info("7b13", "7b13", "dominant 7th flat 13", &[0, 4, 7, 10, 8]),
            Dominant7Alt => info("7alt", "7alt", "altered dominant", &[0, 4, 10, 1, 3, 8]),
            Augmented9 => info("9#5", "augmented9", "augmented 9th", &[0, 4, 8, 10, 2]),
            Dominant9Sus4 => info("9sus4", "9sus4", "dominant 9th sus 4", &[0, 5, 7, 10, 2]),
            Dominant7Sus2 => info("7sus2", "7sus2", "dominant 7th sus 2", &[0, 2, 7, 10]),
            Dominant13Flat9 => info("13b9", "13b9", "13th flat 9", &[0, 4, 7, 10, 1, 9]),
            Minor11 => info("m11", "minor11", "minor 11th", &[0, 3, 7, 10, 2, 5]),
            Dominant11 => info("11", "dominant11", "dominant 11th", &[0, 4, 7, 10, 2, 5]),
            Major11 => info("maj11", "major11", "major 11th", &[0, 4, 7, 11, 2, 5]),
            Minor13 => info("m13", "minor13", "minor 13th", &[0, 3, 7, 10, 2, 5, 9]),
            Major13 => info("maj13", "major13", "major 13th", &[0, 4, 7, 11, 2, 9]),
            Major7Sharp11 => info("maj7#11", "major7#11", "major 7th sharp 11", &[0, 4, 7, 11, 6]),
            Minor9Flat5 => info("m9b5", "minor9b5", "minor 9th flat 5", &[0, 3, 6, 10, 2]),
            Major6Add9 => info("6/9", "major69", "six-nine", &[0, 4, 7, 9, 2]),
            Minor6Add9 => info("m6/9", "minor69", "minor six-nine", &[0, 3, 7, 9, 2]),
            Add11 => info("add11", "majoradd11", "major add 11", &[0, 4, 7, 5]),
            MinorAdd11 => info("m(add11)", "minoradd11", "minor add 11", &[0, 3, 7, 5]),
            Sus2Sus4 => info("sus2sus4", "sus2sus4", "suspended 2nd and 4th", &[0, 2, 5, 7]),
            Major7Sus4 => info("maj7sus4", "maj7sus4", "major 7th sus 4", &[0, 5, 7, 11]),
            Minor7No5 => info("m7(no5)", "m7no5", "minor 7th no 5th", &[0, 3, 10]),
            Dominant7No3 => info("7(no3)", "7no3", "dominant 7th no 3rd", &[0, 7, 10]),
            Major7No3 => info("maj7(no3)", "maj7no3", "major 7th no 3rd", &[0, 7, 11]),
            Dominant9No5 => info("9(no5)", "9no5", "dominant 9th no 5th", &[0, 4, 10, 2]),
            Minor9No5 => info("m9(no5)", "m9no5", "minor 9th no 5th", &[0, 3, 10, 2]),
            Major9No5 => info("maj9(no5)", "maj9no5", "major 9th no 5th", &[0, 4, 11, 2]),
            Minor11No5 => info("m11(no5)", "m11no5", "minor 11th no 5th", &[0, 3, 10, 2, 5]),
        }
    }

    /// Semitone offsets from the root, in formula order (root first)
    pub fn formula(self) -> &'static [u8] {
        self.info().formula
    }

    /// Formula offsets sorted ascending, for set comparison
    pub fn sorted_formula(self) -> Vec<u8> {
        let mut intervals = self.formula().to_vec();
        intervals.sort_unstable();
        intervals
    }

    /// Chord symbol suffix, e.g. "m7" (empty for a major triad)
    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }

    /// Stable lookup key, e.g. "dominant7" or "maj7no5"
    pub fn key(self) -> &'static str {
        self.info().key
    }

    /// Human readable quality, e.g. "half-diminished 7th"
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Number of distinct notes in the formula
    pub fn note_count(self) -> usize {
        self.formula().len()
    }

    pub fn is_omission_tolerant(self) -> bool {
        Self::OMISSION_TOLERANT.contains(&self)
    }

    /// Qualities that put a key context into minor
    pub fn is_minor_family(self) -> bool {
        use ChordType::*;
        matches!(
            self,
            Minor
                | Diminished
                | Minor7
                | Diminished7
                | Minor9
                | MinorAdd9
                | Minor6
                | HalfDiminished7
                | MinorMajor7
                | DiminishedMajor7
                | Minor11
                | Minor13
                | Minor9Flat5
                | Minor6Add9
                | MinorAdd11
                | Minor7No5
                | Minor9No5
                | Minor11No5
        )
    }

    /// Major third with a minor seventh, or a suspended/altered variant of it
    pub fn is_dominant(self) -> bool {
        use ChordType::*;
        matches!(
            self,
            Dominant7
                | Dominant7No5
                | Dominant7Sus4
                | Dominant13
                | Dominant13No5
                | Dominant13No11
                | Augmented7
                | Dominant7Flat5
                | Dominant9
                | Dominant7Flat9
                | Dominant7Sharp9
                | Dominant7Sharp11
                | Dominant7Flat13
                | Dominant7Alt
                | Augmented9
                | Dominant9Sus4
                | Dominant7Sus2
                | Dominant13Flat9
                | Dominant11
                | Dominant7No3
                | Dominant9No5
        )
    }

    pub fn is_diminished(self) -> bool {
        use ChordType::*;
        matches!(
            self,
            Diminished | Diminished7 | HalfDiminished7 | DiminishedMajor7 | Minor9Flat5
        )
    }

    /// Whether the chord already implies a seventh, sixth or upper extension
    pub fn is_extended(self) -> bool {
        use ChordType::*;
        !matches!(
            self,
            Major | Minor | Augmented | Diminished | Sus2 | Sus4 | Sus2Sus4
        )
    }

    /// The seventh-chord counterpart of a plain triad.
    ///
    /// `dominant` selects a dominant seventh over a major seventh for major
    /// triads that sit in a dominant function. Anything that is not a plain
    /// major, minor or diminished triad is returned unchanged.
    pub fn with_seventh(self, dominant: bool) -> ChordType {
        match self {
            ChordType::Major if dominant => ChordType::Dominant7,
            ChordType::Major => ChordType::Major7,
            ChordType::Minor => ChordType::Minor7,
            ChordType::Diminished => ChordType::HalfDiminished7,
            other => other,
        }
    }
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for ChordType {
    type Err = FretwiseError;

    /// Accepts a chord symbol ("m7", "maj7#11"), a lookup key ("dominant7")
    /// or a few common aliases ("maj", "min", "ø7")
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(found) = ChordType::ALL.iter().find(|t| t.symbol() == trimmed) {
            return Ok(*found);
        }

        let lowered = trimmed.to_lowercase();
        if let Some(found) = ChordType::ALL
            .iter()
            .find(|t| t.key() == lowered || t.name() == lowered)
        {
            return Ok(*found);
        }

        match lowered.as_str() {
            "maj" => Ok(ChordType::Major),
            "min" | "-" => Ok(ChordType::Minor),
            "+" => Ok(ChordType::Augmented),
            "°" | "o" => Ok(ChordType::Diminished),
            "°7" | "o7" => Ok(ChordType::Diminished7),
            "ø" | "ø7" | "min7b5" => Ok(ChordType::HalfDiminished7),
            "dom7" => Ok(ChordType::Dominant7),
            "min7" | "-7" => Ok(ChordType::Minor7),
            _ => Err(FretwiseError::UnknownChordType(s.to_string())),
        }
    }
}
