pub mod config;
pub mod error;
pub mod exercise;
pub mod guitar;
pub mod pitch;
pub mod synth;
pub mod tab;

pub use config::*;
pub use error::*;
pub use exercise::{generate_notes, Direction, FingeringOptions, Note};
pub use guitar::{Guitar, GuitarString};
pub use tab::{layout, render_tab, Tablature};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use synth::{RenderedAudio, SynthParams};

/// A generated exercise: the instrument and the notes to play on it
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub guitar: Guitar,
    pub notes: Vec<Note>,
}

impl Exercise {
    /// Tablature text wrapped at `width` characters
    pub fn tab(&self, width: usize) -> Result<String, GtpmError> {
        render_tab(&self.guitar, &self.notes, width)
    }

    /// Audio rendering of the exercise
    pub fn synthesize(&self, params: &SynthParams) -> Result<RenderedAudio, GtpmError> {
        synth::synthesize(&self.guitar, &self.notes, params)
    }
}

/// Generate an exercise from a configuration.
/// Uses `config.seed` when set, otherwise a fresh entropy seed.
pub fn generate_exercise(config: &ExerciseConfig) -> Result<Exercise, GtpmError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_exercise_with_rng(config, &mut rng)
}

/// Generate an exercise drawing shuffles from `rng`
pub fn generate_exercise_with_rng<R: Rng + ?Sized>(
    config: &ExerciseConfig,
    rng: &mut R,
) -> Result<Exercise, GtpmError> {
    config.validate()?;
    let guitar = config.guitar();
    let notes = generate_notes(
        guitar.len(),
        config.first_fret,
        config.last_fret,
        &config.fingers,
        config.fingering_options(),
        rng,
    );
    tracing::info!(strings = guitar.len(), notes = notes.len(), "generated exercise");
    Ok(Exercise { guitar, notes })
}

/// Generate an exercise and render it as tablature in one step
pub fn make_tab(config: &ExerciseConfig) -> Result<String, GtpmError> {
    generate_exercise(config)?.tab(config.width)
}
