//! Pitch classes and MIDI pitch numbering.
//!
//! MIDI pitch 60 is C4: octave numbers run from -1 (pitches 0..=11) upwards.

use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of semitones in an octave, and so the number of pitch classes.
pub const SEMITONES: u8 = 12;

/// Highest valid MIDI pitch number.
pub const MAX_PITCH: u8 = 127;

/// Number of distinct MIDI pitches (0..=127).
pub const NUM_PITCHES: usize = MAX_PITCH as usize + 1;

/// Sharp spelling of every pitch class, indexed by `PitchClass::index`.
pub(crate) const NAMES_SHARPS: [&str; SEMITONES as usize] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spelling of every pitch class, indexed by `PitchClass::index`.
pub(crate) const NAMES_FLATS: [&str; SEMITONES as usize] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Twelve chromatic pitch classes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PitchClass {
    /// C
    C,
    /// C sharp / D flat
    Cs,
    /// D
    D,
    /// D sharp / E flat
    Ds,
    /// E
    E,
    /// F
    F,
    /// F sharp / G flat
    Fs,
    /// G
    G,
    /// G sharp / A flat
    Gs,
    /// A
    A,
    /// A sharp / B flat
    As,
    /// B
    B,
}

impl PitchClass {
    /// All pitch classes in ascending order from C.
    pub const ALL: [PitchClass; SEMITONES as usize] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Pitch class of `idx` semitones above C, wrapping at the octave.
    pub const fn from_index(idx: u8) -> PitchClass {
        Self::ALL[(idx % SEMITONES) as usize]
    }

    /// Pitch class of a MIDI pitch number.
    pub const fn of_pitch(pitch: u8) -> PitchClass {
        Self::from_index(pitch)
    }

    /// Semitones above C (0 = C, 11 = B).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Sharp-spelled name, e.g. `"F#"`.
    pub const fn sharp_name(self) -> &'static str {
        NAMES_SHARPS[self as usize]
    }

    /// Flat-spelled name, e.g. `"Gb"`.
    pub const fn flat_name(self) -> &'static str {
        NAMES_FLATS[self as usize]
    }
}

impl Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sharp_name())
    }
}

/// Octave number of a MIDI pitch (60 is in octave 4).
pub const fn octave_of(pitch: u8) -> i8 {
    (pitch / SEMITONES) as i8 - 1
}

/// Sharp-spelled letter name of a raw MIDI pitch, independent of any chord.
///
/// ```
/// assert_eq!(chord_analyser::note_string(61), "C#");
/// assert_eq!(chord_analyser::note_string(72), "C");
/// ```
pub const fn note_string(pitch: u8) -> &'static str {
    PitchClass::of_pitch(pitch).sharp_name()
}
