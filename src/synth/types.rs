//! Synthesis parameter and output types

use crate::config::ExerciseConfig;

/// Timing and rendering parameters for the audio driver
///
/// # Fields
/// - `sample_rate`: Output rate in samples per second
/// - `beat`: Tempo in beats per minute
/// - `notes_per_beat`: Exercise notes played per beat
/// - `starting_beats`: Noise clicks before the first note (0 = no count-in)
/// - `seed`: Seed for the noise sources; `None` draws from entropy
#[derive(Debug, Clone, PartialEq)]
pub struct SynthParams {
    pub sample_rate: u32,
    pub beat: f64,
    pub notes_per_beat: u32,
    pub starting_beats: u32,
    pub seed: Option<u64>,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self::from_config(&ExerciseConfig::default())
    }
}

impl SynthParams {
    pub fn from_config(config: &ExerciseConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            beat: config.beat,
            notes_per_beat: config.notes_per_beat,
            starting_beats: config.starting_beats,
            seed: config.seed,
        }
    }

    /// Number of samples in `seconds`
    pub fn samples(&self, seconds: f64) -> f64 {
        seconds * self.sample_rate as f64
    }

    /// Length of one beat in samples
    pub fn beat_duration(&self) -> f64 {
        self.samples(60.0 / self.beat)
    }

    /// Length of one exercise note in samples
    pub fn note_duration(&self) -> f64 {
        self.beat_duration() / self.notes_per_beat as f64
    }
}

/// Mono audio produced by the synthesizer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl RenderedAudio {
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()))
    }
}
