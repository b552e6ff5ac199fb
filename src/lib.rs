//! # chord_analyser
//!
//! Recognise, generate and name chords from a set of held MIDI notes: feed
//! note-on/note-off events in, get a root, quality and inversion back.
//!
//! ## Example
//! ```rust
//! use chord_analyser::{ChordAnalyser, ChordQuality, Inversion, PitchClass};
//!
//! fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1) Build an analyser that also recognises chords spread over octaves
//!     let mut analyser = ChordAnalyser::builder()
//!         .pseudo_chords(true)
//!         .build();
//!
//!     // 2) In your MIDI loop, mirror note-on/note-off:
//!     for pitch in [64, 67, 72] {
//!         analyser.add_note(pitch)?;
//!     }
//!
//!     // 3) Analyse and name
//!     if let Some(chord) = analyser.analyse() {
//!         assert_eq!(chord.root, PitchClass::C);
//!         assert_eq!(chord.quality, ChordQuality::MajorTriad);
//!         assert_eq!(chord.inversion(), Some(Inversion::First));
//!         println!("Detected {chord} over {:?}", analyser.chord_notes().as_slice());
//!     }
//!
//!     Ok(())
//! }
//! # run().unwrap();
//! ```
//!
//! ## Features
//! - `serde`: `Serialize`/`Deserialize` for the chord value types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

/// High‐level chord analyser API.
pub use chord_analyser::{
    analyse, analyse_exact, analyse_pseudo, Chord, ChordAnalyser, ChordAnalyserBuilder, ChordError,
    ChordMatch, Notes, Voicing, MAX_CHORD_NOTES,
};

/// Chord generation.
pub use generator::{generate, generate_chord, generate_indexed};

/// Chord names.
pub use naming::{chord_name, Accidental, ChordName};

/// Held-note sets.
pub use note_set::{NoteSet, NoteSetError, PitchClassSet};

/// Pitch classes.
pub use pitch::{note_string, octave_of, PitchClass, MAX_PITCH, SEMITONES};

/// Chord qualities and interval templates.
pub use templates::{ChordQuality, ChordTemplate, Inversion, MatchRule, MATCH_ORDER};

/// Chord recognition module.
pub mod chord_analyser;

/// Chord generation module.
pub mod generator;

/// Chord naming module.
pub mod naming;

/// Held-note set module.
pub mod note_set;

/// Pitch and pitch-class module.
pub mod pitch;

/// Chord template module.
pub mod templates;
