//! Chord Templates
//!
//! Interval shapes of every supported chord quality in every inversion, and
//! the fixed order in which the matcher tries them.
//!
//! A template lists the semitone distances from the lowest sounding note (the
//! bass) to the other chord members, plus the root offset: the distance from
//! the bass *up* to the root, modulo the octave. Root position always has an
//! offset of 0.

use crate::chord_analyser::ChordError;
use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of triad qualities
pub const NUM_TRIADS: usize = 4;

/// Number of tetrad qualities
pub const NUM_TETRADS: usize = 10;

/// Number of chord qualities
pub const NUM_QUALITIES: usize = NUM_TRIADS + NUM_TETRADS;

const TRIAD_INVERSIONS: usize = 3;
const TETRAD_INVERSIONS: usize = 4;

/// Number of entries in `MATCH_ORDER`
pub const NUM_RULES: usize = NUM_TETRADS * TETRAD_INVERSIONS + NUM_TRIADS * TRIAD_INVERSIONS;

/// Supported chord qualities. Triads come first, numbered 0..=3, then
/// tetrads, numbered 4..=13.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChordQuality {
    /// Major triad (e.g., C-E-G)
    MajorTriad,
    /// Minor triad (e.g., C-Eb-G)
    MinorTriad,
    /// Augmented triad (e.g., C-E-G#)
    AugmentedTriad,
    /// Diminished triad (e.g., C-Eb-Gb)
    DiminishedTriad,
    /// Major sixth (e.g., C-E-G-A)
    MajorSixth,
    /// Minor sixth (e.g., C-Eb-G-A)
    MinorSixth,
    /// Dominant seventh (e.g., C-E-G-Bb)
    DominantSeventh,
    /// Major seventh (e.g., C-E-G-B)
    MajorSeventh,
    /// Minor seventh (e.g., C-Eb-G-Bb)
    MinorSeventh,
    /// Minor-major seventh (e.g., C-Eb-G-B)
    MinorMajorSeventh,
    /// Augmented-major seventh (e.g., C-E-G#-B)
    AugmentedMajorSeventh,
    /// Augmented-minor seventh (e.g., C-E-G#-Bb)
    AugmentedMinorSeventh,
    /// Diminished seventh (e.g., C-Eb-Gb-A)
    DiminishedSeventh,
    /// Half-diminished seventh (e.g., C-Eb-Gb-Bb)
    HalfDiminishedSeventh,
}

/// Triad qualities in table order
const TRIAD_QUALITIES: [ChordQuality; NUM_TRIADS] = [
    ChordQuality::MajorTriad,
    ChordQuality::MinorTriad,
    ChordQuality::AugmentedTriad,
    ChordQuality::DiminishedTriad,
];

/// Tetrad qualities in table order
const TETRAD_QUALITIES: [ChordQuality; NUM_TETRADS] = [
    ChordQuality::MajorSixth,
    ChordQuality::MinorSixth,
    ChordQuality::DominantSeventh,
    ChordQuality::MajorSeventh,
    ChordQuality::MinorSeventh,
    ChordQuality::MinorMajorSeventh,
    ChordQuality::AugmentedMajorSeventh,
    ChordQuality::AugmentedMinorSeventh,
    ChordQuality::DiminishedSeventh,
    ChordQuality::HalfDiminishedSeventh,
];

impl ChordQuality {
    /// Every quality, ordered by its numeric index.
    pub const ALL: [ChordQuality; NUM_QUALITIES] = [
        ChordQuality::MajorTriad,
        ChordQuality::MinorTriad,
        ChordQuality::AugmentedTriad,
        ChordQuality::DiminishedTriad,
        ChordQuality::MajorSixth,
        ChordQuality::MinorSixth,
        ChordQuality::DominantSeventh,
        ChordQuality::MajorSeventh,
        ChordQuality::MinorSeventh,
        ChordQuality::MinorMajorSeventh,
        ChordQuality::AugmentedMajorSeventh,
        ChordQuality::AugmentedMinorSeventh,
        ChordQuality::DiminishedSeventh,
        ChordQuality::HalfDiminishedSeventh,
    ];

    /// Numeric index (0..=13).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Whether this is a three-note chord.
    pub const fn is_triad(self) -> bool {
        (self as usize) < NUM_TRIADS
    }

    /// Number of notes a voicing of this quality has (3 or 4).
    pub const fn note_count(self) -> usize {
        if self.is_triad() {
            3
        } else {
            4
        }
    }

    /// Number of valid inversions, root position included.
    pub const fn inversion_count(self) -> usize {
        if self.is_triad() {
            TRIAD_INVERSIONS
        } else {
            TETRAD_INVERSIONS
        }
    }

    /// Template of this quality in `inversion`, or `None` for a triad in
    /// third inversion.
    pub fn template(self, inversion: Inversion) -> Option<&'static ChordTemplate> {
        let inv = inversion as usize;
        if inv >= self.inversion_count() {
            return None;
        }
        let q = self as usize;
        if self.is_triad() {
            Some(&TRIAD_TABLE[q][inv])
        } else {
            Some(&TETRAD_TABLE[q - NUM_TRIADS][inv])
        }
    }
}

impl Display for ChordQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl TryFrom<u8> for ChordQuality {
    type Error = ChordError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ChordQuality::ALL
            .get(value as usize)
            .copied()
            .ok_or(ChordError::InvalidQuality { index: value })
    }
}

/// Which chord member sounds lowest.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Inversion {
    /// The root is the bass.
    Root,
    /// The third is the bass.
    First,
    /// The fifth is the bass.
    Second,
    /// The seventh (or sixth) is the bass. Tetrads only.
    Third,
}

impl Inversion {
    /// Every inversion in ascending order.
    pub const ALL: [Inversion; TETRAD_INVERSIONS] = [
        Inversion::Root,
        Inversion::First,
        Inversion::Second,
        Inversion::Third,
    ];

    /// Numeric index (0..=3).
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl Display for Inversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl TryFrom<u8> for Inversion {
    type Error = ChordError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Inversion::ALL
            .get(value as usize)
            .copied()
            .ok_or(ChordError::InvalidInversion { index: value })
    }
}

/// Interval shape of one chord quality in one inversion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ChordTemplate {
    intervals: &'static [u8],
    root_offset: u8,
}

impl ChordTemplate {
    const fn new(intervals: &'static [u8], root_offset: u8) -> Self {
        ChordTemplate {
            intervals,
            root_offset,
        }
    }

    /// Semitones from the bass to each other chord member, ascending.
    pub const fn intervals(&self) -> &'static [u8] {
        self.intervals
    }

    /// Semitones from the bass up to the root, modulo the octave.
    pub const fn root_offset(&self) -> u8 {
        self.root_offset
    }
}

/// (A, B; O) -- A+B: intervals, O: root offset
#[rustfmt::skip]
const TRIADS: [[ChordTemplate; TRIAD_INVERSIONS]; NUM_TRIADS] = [
    // major triad
    [ChordTemplate::new(&[4, 7], 0), ChordTemplate::new(&[3, 8], 8), ChordTemplate::new(&[5, 9], 5)],
    // minor triad
    [ChordTemplate::new(&[3, 7], 0), ChordTemplate::new(&[4, 9], 9), ChordTemplate::new(&[5, 8], 5)],
    // augmented triad, symmetric: every inversion is root position
    [ChordTemplate::new(&[4, 8], 0), ChordTemplate::new(&[4, 8], 0), ChordTemplate::new(&[4, 8], 0)],
    // diminished triad
    [ChordTemplate::new(&[3, 6], 0), ChordTemplate::new(&[3, 9], 9), ChordTemplate::new(&[6, 9], 6)],
];

/// (A, B, C; O) -- A-C: intervals, O: root offset
#[rustfmt::skip]
const TETRADS: [[ChordTemplate; TETRAD_INVERSIONS]; NUM_TETRADS] = [
    // major sixth, same shapes as minor seventh rotated by one inversion
    [
        ChordTemplate::new(&[4, 7, 9], 0),
        ChordTemplate::new(&[3, 5, 8], 8),
        ChordTemplate::new(&[2, 5, 9], 5),
        ChordTemplate::new(&[3, 7, 10], 3),
    ],
    // minor sixth, same shapes as half-diminished seventh rotated by one inversion
    [
        ChordTemplate::new(&[3, 7, 9], 0),
        ChordTemplate::new(&[4, 6, 9], 9),
        ChordTemplate::new(&[2, 5, 8], 5),
        ChordTemplate::new(&[3, 6, 10], 3),
    ],
    // dominant seventh
    [
        ChordTemplate::new(&[4, 7, 10], 0),
        ChordTemplate::new(&[3, 6, 8], 8),
        ChordTemplate::new(&[3, 5, 9], 5),
        ChordTemplate::new(&[2, 6, 9], 2),
    ],
    // major seventh
    [
        ChordTemplate::new(&[4, 7, 11], 0),
        ChordTemplate::new(&[3, 7, 8], 8),
        ChordTemplate::new(&[4, 5, 9], 5),
        ChordTemplate::new(&[1, 5, 8], 1),
    ],
    // minor seventh
    [
        ChordTemplate::new(&[3, 7, 10], 0),
        ChordTemplate::new(&[4, 7, 9], 9),
        ChordTemplate::new(&[3, 5, 8], 5),
        ChordTemplate::new(&[2, 5, 9], 2),
    ],
    // minor-major seventh
    [
        ChordTemplate::new(&[3, 7, 11], 0),
        ChordTemplate::new(&[4, 8, 9], 9),
        ChordTemplate::new(&[4, 5, 8], 5),
        ChordTemplate::new(&[1, 4, 8], 1),
    ],
    // augmented-major seventh
    [
        ChordTemplate::new(&[4, 8, 11], 0),
        ChordTemplate::new(&[4, 7, 8], 8),
        ChordTemplate::new(&[3, 4, 8], 4),
        ChordTemplate::new(&[1, 5, 9], 1),
    ],
    // augmented-minor seventh
    [
        ChordTemplate::new(&[4, 8, 10], 0),
        ChordTemplate::new(&[4, 6, 8], 8),
        ChordTemplate::new(&[2, 4, 8], 4),
        ChordTemplate::new(&[2, 6, 10], 2),
    ],
    // diminished seventh, symmetric: every inversion is root position
    [
        ChordTemplate::new(&[3, 6, 9], 0),
        ChordTemplate::new(&[3, 6, 9], 0),
        ChordTemplate::new(&[3, 6, 9], 0),
        ChordTemplate::new(&[3, 6, 9], 0),
    ],
    // half-diminished seventh
    [
        ChordTemplate::new(&[3, 6, 10], 0),
        ChordTemplate::new(&[3, 7, 9], 9),
        ChordTemplate::new(&[4, 6, 9], 6),
        ChordTemplate::new(&[2, 5, 8], 2),
    ],
];

static TRIAD_TABLE: [[ChordTemplate; TRIAD_INVERSIONS]; NUM_TRIADS] = TRIADS;
static TETRAD_TABLE: [[ChordTemplate; TETRAD_INVERSIONS]; NUM_TETRADS] = TETRADS;

/// One entry of the matcher's priority list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MatchRule {
    /// Quality reported when this rule fires.
    pub quality: ChordQuality,
    /// Inversion reported when this rule fires.
    pub inversion: Inversion,
    /// Shape the held notes must contain.
    pub template: ChordTemplate,
}

/// Rules in the order the matcher tries them: every tetrad before any
/// triad, then table order, then inversion order. The first rule whose
/// shape is held wins, so of two rules with the same interval set only the
/// earlier one is ever reported.
pub static MATCH_ORDER: [MatchRule; NUM_RULES] = build_match_order();

const fn build_match_order() -> [MatchRule; NUM_RULES] {
    let mut rules = [MatchRule {
        quality: ChordQuality::MajorTriad,
        inversion: Inversion::Root,
        template: TRIADS[0][0],
    }; NUM_RULES];
    let mut i = 0;

    let mut q = 0;
    while q < NUM_TETRADS {
        let mut inv = 0;
        while inv < TETRAD_INVERSIONS {
            rules[i] = MatchRule {
                quality: TETRAD_QUALITIES[q],
                inversion: Inversion::ALL[inv],
                template: TETRADS[q][inv],
            };
            i += 1;
            inv += 1;
        }
        q += 1;
    }

    let mut q = 0;
    while q < NUM_TRIADS {
        let mut inv = 0;
        while inv < TRIAD_INVERSIONS {
            rules[i] = MatchRule {
                quality: TRIAD_QUALITIES[q],
                inversion: Inversion::ALL[inv],
                template: TRIADS[q][inv],
            };
            i += 1;
            inv += 1;
        }
        q += 1;
    }

    rules
}
