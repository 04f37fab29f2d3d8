//! # Synthesis Module
//!
//! Render a generated exercise as audio so it can be heard.
//!
//! ## Purpose
//! Each note's pitch is the open string's MIDI note plus the fret. The
//! notes are played back to back, one per `60 / beat / notes_per_beat`
//! seconds, after an optional noise count-in.
//!
//! ## Sub-modules
//! - `types` - SynthParams, RenderedAudio
//! - `engine` - fundsp voices for the count-in and the notes, offline
//!   rendering and mixing
//! - `wav` - 16-bit WAV output via hound
//!
//! ## Note Voice
//! Half an atan-distorted Karplus-Strong string (`pluck`), half a sum of 13
//! sine partials shaped by an ADSR envelope (attack 40 ms, decay 35 ms,
//! sustain 0.6, release 70 ms).
//!
//! ## Example
//! ```rust
//! use gtpm::synth::{synthesize, SynthParams};
//! use gtpm::{Guitar, Note};
//!
//! let params = SynthParams {
//!     sample_rate: 8000,
//!     starting_beats: 0,
//!     seed: Some(1),
//!     ..SynthParams::default()
//! };
//! let audio = synthesize(&Guitar::new("E3"), &[Note::new(0, 0)], &params).unwrap();
//! assert_eq!(audio.sample_rate, 8000);
//! assert!(audio.duration_seconds() > 0.4);
//! ```

mod engine;
mod types;
mod wav;

#[cfg(test)]
mod tests;

pub use engine::{gate_seconds, render_unit, synthesize, synthesize_with_rng, NOTE_HARMONICS};
pub use types::{RenderedAudio, SynthParams};
pub use wav::{write_wav, write_wav_to};
