//! Integration tests for the analyser facade: recognition, fallback, naming and
//! generation of concrete cases.

use chord_analyser::{
    generate, generate_indexed, note_string, Accidental, Chord, ChordAnalyser, ChordError,
    ChordName, ChordQuality, Inversion, NoteSet, NoteSetError, PitchClass, Voicing,
};
use pretty_assertions::assert_eq;

fn analyser_with(pitches: &[u8]) -> ChordAnalyser {
    let mut analyser = ChordAnalyser::new();
    for &p in pitches {
        analyser.add_note(p).unwrap();
    }
    analyser
}

#[test]
fn c_major_in_root_position() {
    let mut analyser = analyser_with(&[60, 64, 67]);
    let chord = analyser.analyse_chord(false).unwrap();

    assert_eq!(
        chord,
        Chord::new(PitchClass::C, ChordQuality::MajorTriad, Inversion::Root, 4)
    );
    let name = analyser.chord_name(Some(&chord));
    assert_eq!(
        name,
        ChordName {
            letter: Some('C'),
            accidental: None,
            quality: None,
            superscript: "",
        }
    );
    assert_eq!(analyser.chord_string(Some(&chord)), "C");
    assert_eq!(analyser.chord_notes().as_slice(), &[60, 64, 67]);
}

#[test]
fn major_sixth_wins_over_minor_seventh() {
    let mut analyser = analyser_with(&[60, 64, 67, 69]);
    let chord = analyser.analyse_chord(false).unwrap();
    assert_eq!(chord.quality, ChordQuality::MajorSixth);
    assert_eq!(chord.inversion(), Some(Inversion::Root));
    assert_eq!(chord.root, PitchClass::C);
    assert_eq!(chord.to_string(), "C6");

    // A-C-E-G is spelled as the same major sixth with A in the bass.
    let mut analyser = analyser_with(&[57, 60, 64, 67]);
    let chord = analyser.analyse_chord(false).unwrap();
    assert_eq!(chord.quality, ChordQuality::MajorSixth);
    assert_eq!(chord.inversion(), Some(Inversion::Third));
    assert_eq!(chord.root, PitchClass::C);
    assert_eq!(chord.octave(), Some(3));
}

#[test]
fn four_and_nine_above_the_bass_is_a_minor_first_inversion() {
    let mut analyser = analyser_with(&[61, 65, 70]);
    let chord = analyser.analyse_chord(false).unwrap();
    assert_eq!(
        chord,
        Chord::new(PitchClass::As, ChordQuality::MinorTriad, Inversion::First, 4)
    );
    let name = chord.name();
    assert_eq!(
        (name.letter, name.accidental),
        (Some('B'), Some(Accidental::Flat))
    );
    assert_eq!(name.to_string(), "Bbm");
}

#[test]
fn bass_without_a_chord_is_skipped() {
    // C2 does not start any shape; E4-G4-B4 does.
    let mut analyser = analyser_with(&[36, 64, 67, 71]);
    let chord = analyser.analyse_chord(false).unwrap();
    assert_eq!(
        chord,
        Chord::new(PitchClass::E, ChordQuality::MinorTriad, Inversion::Root, 4)
    );
    assert_eq!(analyser.chord_notes().as_slice(), &[64, 67, 71]);
}

#[test]
fn no_chord_leaves_empty_results() {
    let mut analyser = analyser_with(&[60, 64, 67]);
    assert!(analyser.analyse_chord(false).is_some());

    analyser.remove_note(67).unwrap();
    analyser.add_note(61).unwrap();
    assert_eq!(analyser.analyse_chord(true), None);
    assert!(analyser.chord_notes().is_empty());
    assert_eq!(analyser.chord_name(None), ChordName::default());
    assert_eq!(analyser.chord_string(None), "");
}

#[test]
fn clear_forgets_the_last_match() {
    let mut analyser = analyser_with(&[60, 64, 67]);
    assert!(analyser.analyse_chord(false).is_some());
    assert_eq!(analyser.chord_notes().as_slice(), &[60, 64, 67]);

    analyser.clear();
    assert!(analyser.notes().is_empty());
    assert!(analyser.chord_notes().is_empty());
    assert_eq!(analyser.analyse_chord(true), None);
}

#[test]
fn pseudo_chord_needs_permission() {
    // C3, E5, G6: a C major triad only once folded into one octave.
    let mut analyser = analyser_with(&[48, 76, 91]);
    assert_eq!(analyser.analyse_chord(false), None);

    let chord = analyser.analyse_chord(true).unwrap();
    assert_eq!(chord, Chord::pseudo(PitchClass::C, ChordQuality::MajorTriad));
    assert_eq!(chord.voicing, Voicing::Pseudo);
    assert_eq!(chord.inversion(), None);
    assert_eq!(chord.octave(), None);

    let notes = analyser.chord_notes();
    assert!(notes.is_pseudo_chord());
    assert_eq!(notes.as_slice(), &[0, 4, 7]);
    assert!(analyser.generate_chord(&chord).is_empty());
}

#[test]
fn pseudo_chord_root_comes_from_the_folded_bass() {
    // A2, C#5, E6 fold to C#-E-A: a first-inversion A major shape.
    let mut analyser = ChordAnalyser::builder().pseudo_chords(true).build();
    for p in [45, 73, 88] {
        analyser.add_note(p).unwrap();
    }
    let chord = analyser.analyse().unwrap();
    assert_eq!(chord, Chord::pseudo(PitchClass::A, ChordQuality::MajorTriad));
    assert_eq!(chord.to_string(), "A");
    assert_eq!(analyser.chord_notes().as_slice(), &[1, 4, 9]);
}

#[test]
fn builder_default_disables_pseudo_chords() {
    let mut analyser = ChordAnalyser::builder().build();
    for p in [48, 76, 91] {
        analyser.add_note(p).unwrap();
    }
    assert_eq!(analyser.analyse(), None);
}

#[test]
fn octaves_follow_the_c4_convention() {
    let mut low = analyser_with(&[0, 4, 7]);
    assert_eq!(low.analyse_chord(false).unwrap().octave(), Some(-1));

    let mut high = analyser_with(&[120, 124, 127]);
    let chord = high.analyse_chord(false).unwrap();
    assert_eq!(chord.octave(), Some(9));
    assert_eq!(high.generate_chord(&chord).as_slice(), &[120, 124, 127]);
}

#[test]
fn out_of_range_pitches_are_rejected() {
    let mut analyser = ChordAnalyser::new();
    let err = analyser.add_note(128).unwrap_err();
    assert_eq!(
        err,
        ChordError::Note(NoteSetError::PitchOutOfRange { pitch: 128, max: 127 })
    );
    assert!(analyser.remove_note(200).is_err());
    assert!(analyser.notes().is_empty());

    assert!(NoteSet::from_pitches([60, 130]).is_err());
}

#[test]
fn note_set_membership() {
    let mut set = NoteSet::new();
    set.add(64).unwrap();
    set.add(64).unwrap();
    set.add(60).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![60, 64]);

    set.remove(64).unwrap();
    set.remove(65).unwrap();
    assert!(set.contains(60));
    assert!(!set.contains(64));
    assert!(!set.contains(200));

    set.clear();
    assert!(set.is_empty());
}

#[test]
fn invalid_generation_requests_are_empty() {
    assert!(generate_indexed(60, 99, 0).is_empty());
    assert!(generate_indexed(60, 0, 5).is_empty());
    assert!(generate(60, ChordQuality::MajorTriad, Inversion::Third).is_empty());
    assert!(generate(120, ChordQuality::MajorSeventh, Inversion::Root).is_empty());
    assert_eq!(generate_indexed(60, 1, 1).as_slice(), &[63, 67, 72]);
}

#[test]
fn generation_places_the_inversion_above_the_root() {
    assert_eq!(
        generate(60, ChordQuality::MajorTriad, Inversion::Root).as_slice(),
        &[60, 64, 67]
    );
    assert_eq!(
        generate(60, ChordQuality::MajorTriad, Inversion::Second).as_slice(),
        &[67, 72, 76]
    );
    assert_eq!(
        generate(60, ChordQuality::DominantSeventh, Inversion::Third).as_slice(),
        &[70, 72, 76, 79]
    );
    assert_eq!(
        generate(60, ChordQuality::AugmentedTriad, Inversion::First).as_slice(),
        &[72, 76, 80]
    );
}

#[test]
fn names_of_every_quality() {
    let cases = [
        (ChordQuality::MajorTriad, "C"),
        (ChordQuality::MinorTriad, "Cm"),
        (ChordQuality::AugmentedTriad, "C+"),
        (ChordQuality::DiminishedTriad, "Co"),
        (ChordQuality::MajorSixth, "C6"),
        (ChordQuality::MinorSixth, "Cm6"),
        (ChordQuality::DominantSeventh, "C7"),
        (ChordQuality::MajorSeventh, "CM7"),
        (ChordQuality::MinorSeventh, "Cm7"),
        (ChordQuality::MinorMajorSeventh, "CmM7"),
        (ChordQuality::AugmentedMajorSeventh, "C+7"),
        (ChordQuality::AugmentedMinorSeventh, "C+m7"),
        (ChordQuality::DiminishedSeventh, "Co7"),
        (ChordQuality::HalfDiminishedSeventh, "Cø7"),
    ];
    for (quality, expected) in cases {
        let chord = Chord::new(PitchClass::C, quality, Inversion::Root, 4);
        assert_eq!(chord.to_string(), expected);
    }
}

#[test]
fn enharmonic_spelling_depends_on_quality() {
    let name = |root, quality| Chord::new(root, quality, Inversion::Root, 4).to_string();
    assert_eq!(name(PitchClass::Ds, ChordQuality::MinorTriad), "Ebm");
    assert_eq!(name(PitchClass::Ds, ChordQuality::MinorSeventh), "D#m7");
    assert_eq!(name(PitchClass::Gs, ChordQuality::MajorTriad), "G#");
    assert_eq!(name(PitchClass::As, ChordQuality::MajorTriad), "Bb");
    assert_eq!(name(PitchClass::As, ChordQuality::MajorSeventh), "A#M7");
    assert_eq!(name(PitchClass::Fs, ChordQuality::MinorTriad), "F#m");
}

#[test]
fn note_strings_use_sharps() {
    assert_eq!(note_string(60), "C");
    assert_eq!(note_string(61), "C#");
    assert_eq!(note_string(70), "A#");
    assert_eq!(ChordAnalyser::new().note_string(127), "G");
}

#[test]
fn raw_indices_convert() {
    assert_eq!(
        ChordQuality::try_from(13u8),
        Ok(ChordQuality::HalfDiminishedSeventh)
    );
    assert_eq!(
        ChordQuality::try_from(99u8),
        Err(ChordError::InvalidQuality { index: 99 })
    );
    assert_eq!(Inversion::try_from(2u8), Ok(Inversion::Second));
    assert_eq!(
        Inversion::try_from(4u8),
        Err(ChordError::InvalidInversion { index: 4 })
    );
}
