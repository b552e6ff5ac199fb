//! Chord Generator
//!
//! The inverse of recognition: concrete MIDI pitches for a root, quality and
//! inversion. Malformed requests produce empty `Notes` rather than an error.

use crate::chord_analyser::{Chord, Notes, Voicing};
use crate::pitch::{MAX_PITCH, SEMITONES};
use crate::templates::{ChordQuality, ChordTemplate, Inversion};

/// Stack `template` on `bass`. `None` if any note leaves the MIDI range.
pub(crate) fn voice(bass: u8, template: &ChordTemplate) -> Option<Notes> {
    let mut notes = Notes::empty();
    notes.push(bass);
    for &interval in template.intervals() {
        notes.push(bass.checked_add(interval)?);
    }
    if notes.iter().any(|p| p > MAX_PITCH) {
        return None;
    }
    Some(notes)
}

/// Pitches of `quality` in `inversion` built on the MIDI pitch `root`.
///
/// In root position the bass is `root`; otherwise the bass is the chord
/// member just above `root` that the inversion puts lowest, i.e.
/// `root + 12 - root_offset`. Returns empty notes for a triad in third
/// inversion or a voicing that would leave the MIDI range.
///
/// ```
/// use chord_analyser::{generate, ChordQuality, Inversion};
///
/// let notes = generate(60, ChordQuality::MajorTriad, Inversion::First);
/// assert_eq!(notes.as_slice(), &[64, 67, 72]);
/// ```
pub fn generate(root: u8, quality: ChordQuality, inversion: Inversion) -> Notes {
    let Some(template) = quality.template(inversion) else {
        log::debug!("{quality} has no {inversion} inversion");
        return Notes::empty();
    };
    let bass = match inversion {
        Inversion::Root => Some(root),
        _ => root
            .checked_add(SEMITONES)
            .map(|p| p - template.root_offset()),
    };
    bass.and_then(|bass| voice(bass, template))
        .unwrap_or_else(|| {
            log::debug!("{quality} {inversion} on {root} leaves the MIDI range");
            Notes::empty()
        })
}

/// `generate` taking raw quality (0..=13) and inversion (0..=3) indices.
/// Unknown indices produce empty notes.
pub fn generate_indexed(root: u8, quality: u8, inversion: u8) -> Notes {
    match (
        ChordQuality::try_from(quality),
        Inversion::try_from(inversion),
    ) {
        (Ok(quality), Ok(inversion)) => generate(root, quality, inversion),
        (Err(e), _) | (_, Err(e)) => {
            log::debug!("rejected generation request: {e}");
            Notes::empty()
        }
    }
}

/// Pitches realising `chord` with its bass in the chord's octave.
///
/// For a chord returned by the analyser these are exactly the pitches the
/// match explained. Pseudo-chords carry no octave and produce empty notes.
pub fn generate_chord(chord: &Chord) -> Notes {
    let Voicing::Exact { inversion, octave } = chord.voicing else {
        return Notes::empty();
    };
    let Some(template) = chord.quality.template(inversion) else {
        return Notes::empty();
    };

    let bass_pc = (chord.root.index() + SEMITONES - template.root_offset()) % SEMITONES;
    let bass = (i16::from(octave) + 1) * i16::from(SEMITONES) + i16::from(bass_pc);
    u8::try_from(bass)
        .ok()
        .and_then(|bass| voice(bass, template))
        .unwrap_or_default()
}
