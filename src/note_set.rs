//! Note Set
//!
//! Membership of held MIDI pitches, and the single-octave fold used for
//! pseudo-chord matching.

use crate::pitch::{PitchClass, MAX_PITCH, NUM_PITCHES, SEMITONES};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors when mutating a `NoteSet`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NoteSetError {
    /// The pitch does not fit in the MIDI range.
    #[error("pitch {pitch} is outside the MIDI range 0..={max}")]
    PitchOutOfRange {
        /// The rejected pitch.
        pitch: u8,
        /// The highest accepted pitch (127).
        max: u8,
    },
}

fn check_pitch(pitch: u8) -> Result<(), NoteSetError> {
    if pitch > MAX_PITCH {
        return Err(NoteSetError::PitchOutOfRange {
            pitch,
            max: MAX_PITCH,
        });
    }
    Ok(())
}

/// Slots a chord shape can be matched against.
///
/// A slot outside `0..SLOTS` is never active, so interval lookups near the
/// top of the range need no guard region.
pub(crate) trait ActiveSlots {
    /// Number of candidate bass slots.
    const SLOTS: u8;

    /// Whether `slot` is held.
    fn is_active(&self, slot: u8) -> bool;
}

/// Set of currently held MIDI pitches (0..=127).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoteSet {
    bits: u128,
}

impl NoteSet {
    /// Create an empty set.
    pub const fn new() -> Self {
        NoteSet { bits: 0 }
    }

    /// Build a set from pitches, rejecting the first one outside the MIDI range.
    pub fn from_pitches<I>(pitches: I) -> Result<Self, NoteSetError>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut set = NoteSet::new();
        for pitch in pitches {
            set.add(pitch)?;
        }
        Ok(set)
    }

    /// Mark `pitch` as held. Adding a held pitch again is a no-op.
    pub fn add(&mut self, pitch: u8) -> Result<(), NoteSetError> {
        check_pitch(pitch)?;
        self.bits |= 1u128 << pitch;
        Ok(())
    }

    /// Mark `pitch` as released. Removing a pitch that is not held is a no-op.
    pub fn remove(&mut self, pitch: u8) -> Result<(), NoteSetError> {
        check_pitch(pitch)?;
        self.bits &= !(1u128 << pitch);
        Ok(())
    }

    /// Whether `pitch` is held. Pitches outside the MIDI range never are.
    pub const fn contains(&self, pitch: u8) -> bool {
        pitch <= MAX_PITCH && self.bits & (1u128 << pitch) != 0
    }

    /// Release every pitch.
    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Number of held pitches.
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Whether no pitch is held.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Held pitches in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..NUM_PITCHES as u8).filter(move |&p| self.contains(p))
    }

    /// Fold every held pitch into its pitch class.
    pub fn fold(&self) -> PitchClassSet {
        let mut folded = PitchClassSet::new();
        for pitch in self.iter() {
            folded.insert(PitchClass::of_pitch(pitch));
        }
        folded
    }
}

impl ActiveSlots for NoteSet {
    const SLOTS: u8 = MAX_PITCH + 1;

    fn is_active(&self, slot: u8) -> bool {
        self.contains(slot)
    }
}

/// Set of pitch classes, the octave-folded view of a `NoteSet`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PitchClassSet {
    bits: u16,
}

impl PitchClassSet {
    /// Create an empty set.
    pub const fn new() -> Self {
        PitchClassSet { bits: 0 }
    }

    /// Add a pitch class.
    pub fn insert(&mut self, pc: PitchClass) {
        self.bits |= 1u16 << pc.index();
    }

    /// Whether the pitch class is present.
    pub const fn contains(&self, pc: PitchClass) -> bool {
        self.bits & (1u16 << pc.index()) != 0
    }

    /// Number of distinct pitch classes.
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Whether the set is empty.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Pitch classes in ascending order from C.
    pub fn iter(&self) -> impl Iterator<Item = PitchClass> + '_ {
        PitchClass::ALL
            .into_iter()
            .filter(move |&pc| self.contains(pc))
    }
}

impl ActiveSlots for PitchClassSet {
    const SLOTS: u8 = SEMITONES;

    // Slots 12..=23 stay empty: the fold is not repeated into a second octave.
    fn is_active(&self, slot: u8) -> bool {
        slot < SEMITONES && self.bits & (1u16 << slot) != 0
    }
}

impl FromIterator<PitchClass> for PitchClassSet {
    fn from_iter<T: IntoIterator<Item = PitchClass>>(iter: T) -> Self {
        let mut set = PitchClassSet::new();
        for pc in iter {
            set.insert(pc);
        }
        set
    }
}
