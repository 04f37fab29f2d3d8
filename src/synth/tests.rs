use super::*;
use crate::error::GtpmError;
use crate::exercise::Note;
use crate::guitar::Guitar;

/// 8 kHz, 60 bpm, 4 notes per beat: one note = 2000 samples
fn params(starting_beats: u32) -> SynthParams {
    SynthParams {
        sample_rate: 8000,
        beat: 60.0,
        notes_per_beat: 4,
        starting_beats,
        seed: Some(11),
    }
}

fn low_e() -> Guitar {
    Guitar::new("E3")
}

#[test]
fn test_synth_durations() {
    let p = params(0);
    assert_eq!(p.beat_duration(), 8000.0);
    assert_eq!(p.note_duration(), 2000.0);
    assert_eq!(p.samples(0.2), 1600.0);
}

#[test]
fn test_length_without_count_in() {
    let notes = [Note::new(0, 0), Note::new(0, 2), Note::new(0, 4)];
    let audio = synthesize(&low_e(), &notes, &params(0)).unwrap();
    // first note one note duration in, then 3 notes, then the 0.2 s tail
    assert_eq!(audio.samples.len(), 2000 + 3 * 2000 + 1600);
    assert!(audio.samples[..2000].iter().all(|s| *s == 0.0));
    assert!(audio.samples[2000..8000].iter().any(|s| *s != 0.0));
    assert!(audio.samples[8000..].iter().all(|s| *s == 0.0));
}

#[test]
fn test_count_in_precedes_notes() {
    let audio = synthesize(&low_e(), &[Note::new(0, 0)], &params(4)).unwrap();
    // 0.1 s delay, 4 beats of clicks, then the note and the tail
    assert_eq!(audio.samples.len(), 800 + 4 * 8000 + 2000 + 1600);
    assert!(audio.samples[..800].iter().all(|s| *s == 0.0));
    // each click is enveloped noise followed by silence until the next beat
    assert!(audio.samples[800..2800].iter().any(|s| *s != 0.0));
    assert!(audio.samples[2800..8800].iter().all(|s| *s == 0.0));
    assert!(audio.samples[8800..10800].iter().any(|s| *s != 0.0));
}

#[test]
fn test_count_in_clicks_repeat() {
    let audio = synthesize(&low_e(), &[], &params(2)).unwrap();
    let first = &audio.samples[800..8800];
    let second = &audio.samples[8800..16800];
    assert_eq!(first, second);
}

#[test]
fn test_note_level_bounded() {
    let notes: Vec<Note> = (0..8).map(|f| Note::new(0, f)).collect();
    let audio = synthesize(&low_e(), &notes, &params(0)).unwrap();
    assert!(audio.peak() > 0.05);
    assert!(audio.peak() <= 0.8);
}

#[test]
fn test_seeded_output_reproducible() {
    let notes = [Note::new(0, 5), Note::new(0, 7)];
    let a = synthesize(&low_e(), &notes, &params(1)).unwrap();
    let b = synthesize(&low_e(), &notes, &params(1)).unwrap();
    assert_eq!(a, b);

    let other_seed = SynthParams {
        seed: Some(12),
        ..params(1)
    };
    let c = synthesize(&low_e(), &notes, &other_seed).unwrap();
    assert_ne!(a, c);
}

#[test]
fn test_invalid_notes_and_tuning() {
    let result = synthesize(&low_e(), &[Note::new(1, 0)], &params(0));
    assert!(matches!(result, Err(GtpmError::AudioError(_))));

    let result = synthesize(&Guitar::new("X3"), &[Note::new(0, 0)], &params(0));
    assert!(matches!(result, Err(GtpmError::PitchError { .. })));

    let stopped = SynthParams {
        beat: 0.0,
        ..params(0)
    };
    assert!(synthesize(&low_e(), &[], &stopped).is_err());
}

#[test]
fn test_pitch_follows_string_and_fret() {
    // A 12th-fret note on E3 and the open E4 string sound the same pitch
    let fretted = synthesize(&low_e(), &[Note::new(0, 12)], &params(0)).unwrap();
    let open = synthesize(&Guitar::new("E4"), &[Note::new(0, 0)], &params(0)).unwrap();
    assert_eq!(fretted, open);
}

#[test]
fn test_fast_tempo_voices_overlap() {
    // 240 bpm, 4 notes per beat: 500 sample slots, 1160 sample envelopes
    let fast = SynthParams {
        beat: 240.0,
        ..params(0)
    };
    let notes = [Note::new(0, 0), Note::new(0, 3)];
    let audio = synthesize(&low_e(), &notes, &fast).unwrap();
    // second voice starts at 1000 and keeps sounding past its 500 sample slot
    assert!(audio.samples[2000..2100].iter().any(|s| *s != 0.0));
    assert!(audio.samples[2160..].iter().all(|s| *s == 0.0));
    // tail starts one slot after the last note
    assert_eq!(audio.samples.len(), 1500 + 1600);
}
