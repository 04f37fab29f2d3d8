//! Exercise audio rendering
//!
//! Lays out the count-in and every note of the exercise on a timeline:
//! ```text
//! 0.1 s   count-in clicks (starting_beats beats)    notes, one per note duration   0.2 s tail
//! |-------|-----------------------------------------|------------------------------|-----|
//! ```
//! Every event is a fundsp graph rendered offline at its offset and summed
//! into the output buffer.

use fundsp::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{RenderedAudio, SynthParams};
use crate::error::GtpmError;
use crate::exercise::Note;
use crate::guitar::Guitar;
use crate::pitch::midi_to_freq;

/// Harmonic amplitudes (1-based harmonic number, amplitude) of the note timbre
pub const NOTE_HARMONICS: [(usize, f32); 13] = [
    (1, 1.0),
    (2, 3.0),
    (3, 2.0),
    (4, 1.0),
    (5, 0.3),
    (6, 0.1),
    (7, 0.7),
    (8, 0.9),
    (9, 1.0),
    (10, 1.0),
    (11, 0.5),
    (12, 0.4),
    (13, 0.2),
];

/// Seconds of silence before the count-in
const COUNT_IN_DELAY: f64 = 0.1;
/// Seconds of silence after the last note
const TAIL: f64 = 0.2;
/// Decay time constant of the plucked string in seconds
const STRING_TAU: f32 = 0.2;
const STRING_DAMPING: f32 = 0.5;
const DISTORTION_HARDNESS: f32 = 18.0;

const ATTACK: f32 = 0.040;
const DECAY: f32 = 0.035;
const SUSTAIN: f32 = 0.6;
const RELEASE: f32 = 0.070;

/// Seconds the ADSR gate stays open for a note slot of `note_seconds`.
///
/// Attack and decay always complete, so at fast tempos the envelope outlasts
/// the slot.
pub fn gate_seconds(note_seconds: f64) -> f64 {
    (note_seconds - RELEASE as f64).max((ATTACK + DECAY) as f64)
}

/// Length in samples of one enveloped event: gate plus release
fn envelope_len(params: &SynthParams) -> usize {
    let note_seconds = params.note_duration() / params.sample_rate as f64;
    let seconds = gate_seconds(note_seconds) + RELEASE as f64;
    params.samples(seconds).round() as usize
}

/// Linear ADSR (40 ms, 35 ms, 0.6, 70 ms) driven by a gate that closes at `gate`
fn note_envelope(gate: f32) -> An<impl AudioNode<Inputs = U0, Outputs = U1>> {
    envelope(move |t: f32| if t < gate { 1.0f32 } else { 0.0f32 })
        >> adsr_live(ATTACK, DECAY, SUSTAIN, RELEASE)
}

/// Sum of sine partials at the harmonic amplitudes, scaled so the sum of
/// amplitudes is 1
fn note_timbre(freq: f32) -> An<impl AudioNode<Inputs = U0, Outputs = U1>> {
    let total: f32 = NOTE_HARMONICS.iter().map(|(_, amp)| amp).sum();
    busi::<U13, _, _>(move |i| {
        let (harmonic, amp) = NOTE_HARMONICS[i as usize];
        sine_hz::<f32>(freq * harmonic as f32) * (amp / total)
    })
}

/// Half a distorted plucked string, half the harmonic timbre under the envelope
fn note_voice(freq: f32, gate: f32, seed: u64) -> Box<dyn AudioUnit> {
    let gain_per_second = (-1.0 / STRING_TAU).exp();
    let string = zero()
        >> pluck(freq, gain_per_second, STRING_DAMPING)
        >> shape(Atan(DISTORTION_HARDNESS));
    let mut voice = string * 0.5 + note_timbre(freq) * note_envelope(gate) * 0.25;
    voice.ping(false, AttoHash::new(seed));
    Box::new(voice)
}

/// Enveloped white noise through `(1 - z^-2) / 2`
fn count_in_click(gate: f32, seed: u64) -> Box<dyn AudioUnit> {
    let mut click = (noise() >> fir((0.5f32, 0.0f32, -0.5f32))) * note_envelope(gate);
    click.ping(false, AttoHash::new(seed));
    Box::new(click)
}

/// Tick `unit` for `len` samples into a fresh buffer
pub fn render_unit(unit: &mut dyn AudioUnit, sample_rate: u32, len: usize) -> Vec<f32> {
    unit.set_sample_rate(sample_rate as f64);
    unit.allocate();
    let mut output = [0.0f32; 1];
    (0..len)
        .map(|_| {
            unit.tick(&[], &mut output);
            output[0]
        })
        .collect()
}

/// Output buffer with a cursor; each event moves the cursor forward and is
/// summed in from there, so consecutive events may overlap.
#[derive(Debug, Default)]
struct Timeline {
    samples: Vec<f32>,
    cursor: f64,
}

impl Timeline {
    fn advance(&mut self, delta: f64) {
        self.cursor += delta;
    }

    fn mix(&mut self, signal: &[f32]) {
        let start = self.cursor.round() as usize;
        let end = start + signal.len();
        if end > self.samples.len() {
            self.samples.resize(end, 0.0);
        }
        for (out, value) in self.samples[start..end].iter_mut().zip(signal) {
            *out += value;
        }
    }
}

/// Synthesize the exercise with a seeded RNG (or entropy when unseeded).
pub fn synthesize(
    guitar: &Guitar,
    notes: &[Note],
    params: &SynthParams,
) -> Result<RenderedAudio, GtpmError> {
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    synthesize_with_rng(guitar, notes, params, &mut rng)
}

/// Synthesize the exercise: optional noise count-in, one voice per note,
/// then a short silent tail.
///
/// The RNG seeds the noise of the count-in and of every plucked string.
pub fn synthesize_with_rng<R: Rng + ?Sized>(
    guitar: &Guitar,
    notes: &[Note],
    params: &SynthParams,
    rng: &mut R,
) -> Result<RenderedAudio, GtpmError> {
    if params.sample_rate == 0
        || params.beat.is_nan()
        || params.beat <= 0.0
        || params.notes_per_beat == 0
    {
        return Err(GtpmError::ConfigError(format!(
            "cannot synthesize at {} Hz, {} bpm, {} notes per beat",
            params.sample_rate, params.beat, params.notes_per_beat
        )));
    }

    let midi_tuning = guitar.midi_tuning()?;
    let pitches = notes
        .iter()
        .map(|note| {
            midi_tuning
                .get(note.string_index)
                .map(|open| *open as f64 + note.fret as f64)
                .ok_or_else(|| {
                    GtpmError::AudioError(format!(
                        "note on string {} but the guitar has {} strings",
                        note.string_index,
                        midi_tuning.len()
                    ))
                })
        })
        .collect::<Result<Vec<f64>, GtpmError>>()?;

    let beat_duration = params.beat_duration();
    let dur = params.note_duration();
    let gate = gate_seconds(dur / params.sample_rate as f64) as f32;
    let env_len = envelope_len(params);
    let mut timeline = Timeline::default();

    if params.starting_beats > 0 {
        let mut click = render_unit(
            count_in_click(gate, rng.gen()).as_mut(),
            params.sample_rate,
            env_len,
        );
        click.resize(beat_duration.round() as usize, 0.0);
        tracing::debug!(beats = params.starting_beats, samples = click.len(), "count-in");

        timeline.advance(params.samples(COUNT_IN_DELAY));
        let count_in = click.repeat(params.starting_beats as usize);
        timeline.mix(&count_in);
        // The first note lands right after the last click
        timeline.advance(params.starting_beats as f64 * beat_duration - dur);
    }

    for midi in &pitches {
        let freq = midi_to_freq(*midi) as f32;
        let voice = render_unit(
            note_voice(freq, gate, rng.gen()).as_mut(),
            params.sample_rate,
            env_len,
        );
        timeline.advance(dur);
        timeline.mix(&voice);
    }

    timeline.advance(dur);
    timeline.mix(&vec![0.0; params.samples(TAIL).round() as usize]);

    let audio = RenderedAudio {
        samples: timeline.samples,
        sample_rate: params.sample_rate,
    };
    tracing::info!(
        notes = notes.len(),
        seconds = audio.duration_seconds(),
        "synthesized exercise"
    );
    Ok(audio)
}
