//! # Exercise Configuration
//!
//! All input parameters of an exercise, with defaults matching a standard
//! six-string guitar and a four-finger chromatic pattern.
//!
//! ## YAML Format
//! Keys are kebab-case; every key is optional.
//! ```yaml
//! tuning: E5 B4 G4 D4 A3 E3
//! first-fret: 1
//! last-fret: 7
//! fingers: [0, 1, 2, 3]
//! width: 79
//! beat: 60
//! notes-per-beat: 4
//! starting-beats: 4
//! shuffle-fingers: true
//! shuffle-per-string: false
//! invert-when-backwards: true
//! seed: 42
//! sample-rate: 44100
//! ```
//!
//! `RawConfig` mirrors the file; `ExerciseConfig` is the validated form used
//! by the generator, renderer and synthesizer.

use serde::Deserialize;

use crate::error::GtpmError;
use crate::exercise::FingeringOptions;
use crate::guitar::Guitar;

pub const DEFAULT_TUNING: &str = "E5 B4 G4 D4 A3 E3";

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub tuning: Option<String>,
    pub first_fret: Option<u32>,
    pub last_fret: Option<u32>,
    pub fingers: Option<Vec<u32>>,
    pub width: Option<usize>,
    pub beat: Option<f64>,
    pub notes_per_beat: Option<u32>,
    pub starting_beats: Option<u32>,
    pub shuffle_fingers: Option<bool>,
    pub shuffle_per_string: Option<bool>,
    pub invert_when_backwards: Option<bool>,
    pub seed: Option<u64>,
    pub sample_rate: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseConfig {
    pub tuning: String,
    pub first_fret: u32,
    pub last_fret: u32,
    /// Used fingers, 0 = index through 3 = pinky, as fret offsets
    pub fingers: Vec<u32>,
    /// Maximum tablature line width in monospaced characters
    pub width: usize,
    /// Tempo in beats per minute
    pub beat: f64,
    pub notes_per_beat: u32,
    /// Count-in length in beats (0 disables it)
    pub starting_beats: u32,
    pub shuffle_fingers: bool,
    /// Ignored when `shuffle_fingers` is false
    pub shuffle_per_string: bool,
    pub invert_when_backwards: bool,
    pub seed: Option<u64>,
    pub sample_rate: u32,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            tuning: DEFAULT_TUNING.to_string(),
            first_fret: 1,
            last_fret: 7,
            fingers: vec![0, 1, 2, 3],
            width: 79,
            beat: 60.0,
            notes_per_beat: 4,
            starting_beats: 4,
            shuffle_fingers: true,
            shuffle_per_string: false,
            invert_when_backwards: true,
            seed: None,
            sample_rate: 44100,
        }
    }
}

impl From<RawConfig> for ExerciseConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = ExerciseConfig::default();
        Self {
            tuning: raw.tuning.unwrap_or(defaults.tuning),
            first_fret: raw.first_fret.unwrap_or(defaults.first_fret),
            last_fret: raw.last_fret.unwrap_or(defaults.last_fret),
            fingers: raw.fingers.unwrap_or(defaults.fingers),
            width: raw.width.unwrap_or(defaults.width),
            beat: raw.beat.unwrap_or(defaults.beat),
            notes_per_beat: raw.notes_per_beat.unwrap_or(defaults.notes_per_beat),
            starting_beats: raw.starting_beats.unwrap_or(defaults.starting_beats),
            shuffle_fingers: raw.shuffle_fingers.unwrap_or(defaults.shuffle_fingers),
            shuffle_per_string: raw.shuffle_per_string.unwrap_or(defaults.shuffle_per_string),
            invert_when_backwards: raw
                .invert_when_backwards
                .unwrap_or(defaults.invert_when_backwards),
            seed: raw.seed.or(defaults.seed),
            sample_rate: raw.sample_rate.unwrap_or(defaults.sample_rate),
        }
    }
}

impl ExerciseConfig {
    /// Parse and validate a YAML configuration.
    ///
    /// ```
    /// use gtpm::ExerciseConfig;
    ///
    /// let config = ExerciseConfig::from_yaml("first-fret: 5\nlast-fret: 9\n").unwrap();
    /// assert_eq!(config.first_fret, 5);
    /// assert_eq!(config.width, 79);
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, GtpmError> {
        // An empty document deserializes as unit, not as an empty map
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| GtpmError::ConfigError(e.to_string()))?
        };
        let config = ExerciseConfig::from(raw);
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a playable exercise
    pub fn validate(&self) -> Result<(), GtpmError> {
        let guitar = self.guitar();
        if guitar.is_empty() {
            return Err(GtpmError::ConfigError(
                "tuning must name at least one string".to_string(),
            ));
        }
        let midi_tuning = guitar.midi_tuning()?;

        if self.first_fret > self.last_fret {
            return Err(GtpmError::ConfigError(format!(
                "first-fret ({}) is above last-fret ({})",
                self.first_fret, self.last_fret
            )));
        }
        let widest_finger = self
            .fingers
            .iter()
            .copied()
            .max()
            .ok_or_else(|| GtpmError::ConfigError("fingers must not be empty".to_string()))?;
        let highest_fret = self.last_fret.checked_add(widest_finger).ok_or_else(|| {
            GtpmError::ConfigError(format!(
                "last-fret ({}) plus finger {} is not a fret",
                self.last_fret, widest_finger
            ))
        })?;
        let highest_open = midi_tuning.iter().copied().max().unwrap_or(0);
        if highest_open as u64 + highest_fret as u64 > 127 {
            return Err(GtpmError::ConfigError(format!(
                "fret {} on a string tuned to MIDI {} is above MIDI 127",
                highest_fret, highest_open
            )));
        }
        if !(self.beat.is_finite() && self.beat > 0.0) {
            return Err(GtpmError::ConfigError(format!(
                "beat must be a positive tempo, got {}",
                self.beat
            )));
        }
        if self.notes_per_beat == 0 {
            return Err(GtpmError::ConfigError(
                "notes-per-beat must be at least 1".to_string(),
            ));
        }
        if self.sample_rate == 0 {
            return Err(GtpmError::ConfigError("sample-rate must be positive".to_string()));
        }
        Ok(())
    }

    pub fn guitar(&self) -> Guitar {
        Guitar::new(&self.tuning)
    }

    pub fn fingering_options(&self) -> FingeringOptions {
        FingeringOptions {
            shuffle_fingers: self.shuffle_fingers,
            shuffle_per_string: self.shuffle_per_string,
            invert_when_backwards: self.invert_when_backwards,
        }
    }
}
