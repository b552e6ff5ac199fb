//! Chord Analyser
//!
//! Recognition of a chord (root, quality, inversion) from a set of held MIDI
//! notes, by walking the template rules against the held pitches.
//!
//! Matching is first-match, not best-match: the lowest held note is tried as
//! the bass against every rule in `MATCH_ORDER`, then the next held note, and
//! so on. Acoustically ambiguous voicings (a major sixth and a minor seventh
//! share every interval set) therefore always resolve to the earlier rule.

use std::fmt::Display;
use thiserror::Error;

use crate::generator::{self, voice};
use crate::naming::{chord_name, ChordName};
use crate::note_set::{ActiveSlots, NoteSet, NoteSetError};
use crate::pitch::{octave_of, PitchClass};
use crate::templates::{ChordQuality, Inversion, MatchRule, MATCH_ORDER};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of notes in a chord voicing
pub const MAX_CHORD_NOTES: usize = 4;

/// Where a recognised chord sits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Voicing {
    /// The chord was found among the literal held pitches.
    Exact {
        /// Which chord member is the bass.
        inversion: Inversion,
        /// Octave of the bass note (MIDI 60 is octave 4).
        octave: i8,
    },
    /// The chord was only found after folding every held pitch into one
    /// octave; inversion and octave are unknown.
    Pseudo,
}

/// A chord recognised from held notes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chord {
    /// The root of the chord.
    pub root: PitchClass,
    /// The quality (e.g., major triad, dominant seventh) of the chord.
    pub quality: ChordQuality,
    /// Inversion and octave, or the pseudo-chord marker.
    pub voicing: Voicing,
}

impl Chord {
    /// Construct a chord whose bass is in `octave`.
    pub const fn new(
        root: PitchClass,
        quality: ChordQuality,
        inversion: Inversion,
        octave: i8,
    ) -> Self {
        Chord {
            root,
            quality,
            voicing: Voicing::Exact { inversion, octave },
        }
    }

    /// Construct a pseudo-chord, one spread over several octaves.
    pub const fn pseudo(root: PitchClass, quality: ChordQuality) -> Self {
        Chord {
            root,
            quality,
            voicing: Voicing::Pseudo,
        }
    }

    /// Inversion, unless this is a pseudo-chord.
    pub const fn inversion(&self) -> Option<Inversion> {
        match self.voicing {
            Voicing::Exact { inversion, .. } => Some(inversion),
            Voicing::Pseudo => None,
        }
    }

    /// Octave of the bass note, unless this is a pseudo-chord.
    pub const fn octave(&self) -> Option<i8> {
        match self.voicing {
            Voicing::Exact { octave, .. } => Some(octave),
            Voicing::Pseudo => None,
        }
    }

    /// Whether the chord was only found after octave folding.
    pub const fn is_pseudo(&self) -> bool {
        matches!(self.voicing, Voicing::Pseudo)
    }

    /// Display-ready name of the chord.
    pub fn name(&self) -> ChordName {
        chord_name(self)
    }
}

/// Concrete pitches of a chord, lowest first.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Notes {
    pitches: [u8; MAX_CHORD_NOTES],
    len: u8,
    pseudo_chord: bool,
}

impl Notes {
    /// No notes.
    pub const fn empty() -> Self {
        Notes {
            pitches: [0; MAX_CHORD_NOTES],
            len: 0,
            pseudo_chord: false,
        }
    }

    pub(crate) fn push(&mut self, pitch: u8) {
        debug_assert!((self.len as usize) < MAX_CHORD_NOTES);
        self.pitches[self.len as usize] = pitch;
        self.len += 1;
    }

    pub(crate) fn with_pseudo_chord(mut self, pseudo_chord: bool) -> Self {
        self.pseudo_chord = pseudo_chord;
        self
    }

    /// The pitches, lowest first.
    pub fn as_slice(&self) -> &[u8] {
        &self.pitches[..self.len as usize]
    }

    /// Iterate over the pitches, lowest first.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.as_slice().iter().copied()
    }

    /// Number of pitches (0, 3 or 4).
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether there are no pitches.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the pitches came from an octave-folded match. Such pitches are
    /// pitch-class offsets (0..=22), not the absolute pitches that were held.
    pub const fn is_pseudo_chord(&self) -> bool {
        self.pseudo_chord
    }
}

/// A chord together with the notes that explain it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ChordMatch {
    /// The recognised chord.
    pub chord: Chord,
    /// Which pitches the matched rule accounts for.
    pub notes: Notes,
}

/// Errors when converting raw chord descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChordError {
    /// The quality index is not one of the 14 known qualities.
    #[error("unknown chord quality index {index}, expected 0..=13")]
    InvalidQuality {
        /// The rejected index.
        index: u8,
    },

    /// The inversion index is not valid.
    #[error("unknown inversion index {index}, expected 0..=3")]
    InvalidInversion {
        /// The rejected index.
        index: u8,
    },

    /// A held note could not be added or removed.
    #[error(transparent)]
    Note(#[from] NoteSetError),
}

/// Whether every member of `rule` is held above `bass`.
#[inline(always)]
fn shape_held<S: ActiveSlots>(slots: &S, bass: u8, rule: &MatchRule) -> bool {
    rule.template
        .intervals()
        .iter()
        .all(|&interval| slots.is_active(bass + interval))
}

/// Find the lowest held bass with a matching rule, trying rules in priority
/// order for each bass.
fn find_match<S: ActiveSlots>(slots: &S) -> Option<(u8, &'static MatchRule)> {
    (0..S::SLOTS)
        .filter(|&bass| slots.is_active(bass))
        .find_map(|bass| {
            MATCH_ORDER
                .iter()
                .find(|rule| shape_held(slots, bass, rule))
                .map(|rule| (bass, rule))
        })
}

/// Recognise a chord among the literal held pitches.
pub fn analyse_exact(held: &NoteSet) -> Option<ChordMatch> {
    let (bass, rule) = find_match(held)?;
    let root = PitchClass::from_index(bass + rule.template.root_offset());
    log::trace!(
        "matched {} {} on bass {bass}, root {root}",
        rule.quality,
        rule.inversion
    );
    Some(ChordMatch {
        chord: Chord::new(root, rule.quality, rule.inversion, octave_of(bass)),
        notes: voice(bass, &rule.template)?,
    })
}

/// Recognise a chord after folding every held pitch into a single octave.
pub fn analyse_pseudo(held: &NoteSet) -> Option<ChordMatch> {
    let folded = held.fold();
    let (bass, rule) = find_match(&folded)?;
    let root = PitchClass::from_index(bass + rule.template.root_offset());
    log::trace!(
        "matched pseudo-chord {} on pitch class {bass}, root {root}",
        rule.quality
    );
    Some(ChordMatch {
        chord: Chord::pseudo(root, rule.quality),
        notes: voice(bass, &rule.template)?.with_pseudo_chord(true),
    })
}

/// Recognise a chord, falling back to octave folding when `allow_pseudo_chord`
/// is set and no chord sits among the literal pitches.
pub fn analyse(held: &NoteSet, allow_pseudo_chord: bool) -> Option<ChordMatch> {
    analyse_exact(held).or_else(|| {
        if !allow_pseudo_chord {
            return None;
        }
        log::debug!(
            "no chord among {} held notes, folding into one octave",
            held.len()
        );
        analyse_pseudo(held)
    })
}

/// Builder for `ChordAnalyser` to customize the pseudo-chord fallback
pub struct ChordAnalyserBuilder {
    pseudo_chords: bool,
}

impl ChordAnalyserBuilder {
    /// Create a new builder with the pseudo-chord fallback off
    pub fn new() -> Self {
        ChordAnalyserBuilder {
            pseudo_chords: false,
        }
    }

    /// Whether `ChordAnalyser::analyse` may fall back to octave folding
    pub fn pseudo_chords(mut self, value: bool) -> Self {
        self.pseudo_chords = value;
        self
    }

    /// Build the `ChordAnalyser`
    pub fn build(self) -> ChordAnalyser {
        ChordAnalyser::with_pseudo_chords(self.pseudo_chords)
    }
}

impl Default for ChordAnalyserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main chord analyser: the held notes of one instrument plus the notes
/// explained by the last analysis.
#[derive(Debug, Clone)]
pub struct ChordAnalyser {
    pseudo_chords: bool,
    held: NoteSet,
    chord_notes: Notes,
}

impl ChordAnalyser {
    /// Return a builder to customize the pseudo-chord fallback
    pub fn builder() -> ChordAnalyserBuilder {
        ChordAnalyserBuilder::new()
    }

    /// Create an analyser with the pseudo-chord fallback off
    pub fn new() -> Self {
        Self::with_pseudo_chords(false)
    }

    fn with_pseudo_chords(pseudo_chords: bool) -> Self {
        ChordAnalyser {
            pseudo_chords,
            held: NoteSet::new(),
            chord_notes: Notes::empty(),
        }
    }

    /// Mark a MIDI pitch as held.
    ///
    /// Returns `Err(ChordError::Note)` if `pitch > 127`.
    pub fn add_note(&mut self, pitch: u8) -> Result<(), ChordError> {
        self.held.add(pitch)?;
        Ok(())
    }

    /// Mark a MIDI pitch as released.
    ///
    /// Returns `Err(ChordError::Note)` if `pitch > 127`.
    pub fn remove_note(&mut self, pitch: u8) -> Result<(), ChordError> {
        self.held.remove(pitch)?;
        Ok(())
    }

    /// Release every note and forget the last match.
    pub fn clear(&mut self) {
        self.held.clear();
        self.chord_notes = Notes::empty();
    }

    /// The currently held notes.
    pub fn notes(&self) -> &NoteSet {
        &self.held
    }

    /// Analyse the held notes using the configured pseudo-chord fallback.
    pub fn analyse(&mut self) -> Option<Chord> {
        self.analyse_chord(self.pseudo_chords)
    }

    /// Analyse the held notes. When `allow_pseudo_chord` is set and no chord
    /// sits among the literal pitches, chords spread over several octaves are
    /// recognised too.
    ///
    /// The notes explained by the match are kept for `chord_notes`.
    pub fn analyse_chord(&mut self, allow_pseudo_chord: bool) -> Option<Chord> {
        match analyse(&self.held, allow_pseudo_chord) {
            Some(found) => {
                self.chord_notes = found.notes;
                Some(found.chord)
            }
            None => {
                self.chord_notes = Notes::empty();
                None
            }
        }
    }

    /// Notes explained by the last analysis; empty if it found no chord.
    pub fn chord_notes(&self) -> Notes {
        self.chord_notes
    }

    /// Concrete pitches realising `chord`.
    pub fn generate_chord(&self, chord: &Chord) -> Notes {
        generator::generate_chord(chord)
    }

    /// Display-ready name of `chord`; all-empty when there is no chord.
    pub fn chord_name(&self, chord: Option<&Chord>) -> ChordName {
        chord.map(chord_name).unwrap_or_default()
    }

    /// Chord name as a single string, e.g. `"Ebm7"`; empty when there is no chord.
    pub fn chord_string(&self, chord: Option<&Chord>) -> String {
        self.chord_name(chord).to_string()
    }

    /// Sharp-spelled name of a raw pitch.
    pub fn note_string(&self, pitch: u8) -> &'static str {
        crate::pitch::note_string(pitch)
    }
}

impl Default for ChordAnalyser {
    fn default() -> Self {
        ChordAnalyser::new()
    }
}

impl Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
