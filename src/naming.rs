//! Chord Naming
//!
//! Turns a recognised chord into a display name: letter, accidental, quality
//! glyph and superscript, e.g. `E` `b` `m` `7`.

use std::fmt::Display;

use crate::chord_analyser::Chord;
use crate::pitch::PitchClass;
use crate::templates::ChordQuality;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sharp or flat sign of a chord root.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Accidental {
    /// `#`
    Sharp,
    /// `b`
    Flat,
}

impl Accidental {
    /// The character printed for this accidental.
    pub const fn as_char(self) -> char {
        match self {
            Accidental::Sharp => '#',
            Accidental::Flat => 'b',
        }
    }
}

/// Display-ready parts of a chord name. The default value is the empty name
/// used when no chord was recognised.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ChordName {
    /// Root letter, `'A'..='G'`; `None` for no chord.
    pub letter: Option<char>,
    /// Accidental of the root, if any.
    pub accidental: Option<Accidental>,
    /// Quality glyph: `'m'`, `'M'`, `'+'` or nothing.
    pub quality: Option<char>,
    /// Superscript such as `"7"`, `"M7"`, `"o7"`; may be empty.
    pub superscript: &'static str,
}

impl ChordName {
    /// Whether this is the empty name.
    pub fn is_empty(&self) -> bool {
        self.letter.is_none()
    }
}

impl Display for ChordName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(letter) = self.letter else {
            return Ok(());
        };
        write!(f, "{letter}")?;
        if let Some(accidental) = self.accidental {
            write!(f, "{}", accidental.as_char())?;
        }
        if let Some(quality) = self.quality {
            write!(f, "{quality}")?;
        }
        f.write_str(self.superscript)
    }
}

fn letter_of(name: &str) -> Option<char> {
    name.chars().next()
}

/// Letter and accidental of `root`, spelled for `quality`.
///
/// A# becomes Bb under a major or minor triad; C#, D# and G# become Db, Eb
/// and Ab under a minor triad. F# stays sharp. Natural roots never change.
fn spell(root: PitchClass, quality: ChordQuality) -> (Option<char>, Option<Accidental>) {
    let sharp = (letter_of(root.sharp_name()), Some(Accidental::Sharp));
    let flat = (letter_of(root.flat_name()), Some(Accidental::Flat));
    match root {
        PitchClass::As => match quality {
            ChordQuality::MajorTriad | ChordQuality::MinorTriad => flat,
            _ => sharp,
        },
        PitchClass::Fs => sharp,
        PitchClass::Cs | PitchClass::Ds | PitchClass::Gs => match quality {
            ChordQuality::MinorTriad => flat,
            _ => sharp,
        },
        _ => (letter_of(root.sharp_name()), None),
    }
}

/// Quality glyph and superscript.
const fn decorate(quality: ChordQuality) -> (Option<char>, &'static str) {
    match quality {
        ChordQuality::MajorTriad => (None, ""),
        ChordQuality::MajorSixth => (None, "6"),
        ChordQuality::DominantSeventh => (None, "7"),
        ChordQuality::MajorSeventh => (Some('M'), "7"),
        ChordQuality::AugmentedTriad => (Some('+'), ""),
        ChordQuality::AugmentedMinorSeventh => (Some('+'), "m7"),
        ChordQuality::AugmentedMajorSeventh => (Some('+'), "7"),
        ChordQuality::MinorTriad => (Some('m'), ""),
        ChordQuality::MinorSixth => (Some('m'), "6"),
        ChordQuality::MinorSeventh => (Some('m'), "7"),
        ChordQuality::MinorMajorSeventh => (Some('m'), "M7"),
        ChordQuality::DiminishedTriad => (None, "o"),
        ChordQuality::DiminishedSeventh => (None, "o7"),
        ChordQuality::HalfDiminishedSeventh => (None, "ø7"),
    }
}

/// Display-ready name of `chord`.
///
/// ```
/// use chord_analyser::{chord_name, Chord, ChordQuality, Inversion, PitchClass};
///
/// let chord = Chord::new(PitchClass::Cs, ChordQuality::MinorTriad, Inversion::Root, 4);
/// assert_eq!(chord_name(&chord).to_string(), "Dbm");
/// ```
pub fn chord_name(chord: &Chord) -> ChordName {
    let (letter, accidental) = spell(chord.root, chord.quality);
    let (quality, superscript) = decorate(chord.quality);
    ChordName {
        letter,
        accidental,
        quality,
        superscript,
    }
}
