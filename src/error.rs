//! # Error Types
//!
//! This module defines all error types for gtpm.
//!
//! ## Error Types
//! - `PitchError` - A tuning label that is not a valid pitch name
//! - `ConfigError` - Invalid or inconsistent exercise configuration
//! - `RenderError` - Tablature that cannot be laid out in the requested width
//! - `AudioError` - Failure while writing synthesized audio
//! - `Io` - File system errors from the CLI
//!
//! ## Usage
//! ```rust
//! use gtpm::{GtpmError, Guitar};
//!
//! let guitar = Guitar::new("E5 X4");
//! match guitar[1].midi() {
//!     Ok(midi) => println!("MIDI {}", midi),
//!     Err(GtpmError::PitchError { label, message }) => {
//!         eprintln!("Bad label '{}': {}", label, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GtpmError {
    /// Pitch name that could not be converted to a MIDI note.
    ///
    /// # Example
    /// ```
    /// # use gtpm::GtpmError;
    /// let err = GtpmError::PitchError {
    ///     label: "H2".to_string(),
    ///     message: "unknown note letter 'H'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid pitch 'H2': unknown note letter 'H'");
    /// ```
    #[error("Invalid pitch '{label}': {message}")]
    PitchError { label: String, message: String },

    /// Invalid configuration error.
    ///
    /// Occurs when the YAML configuration cannot be read or holds values
    /// that make no exercise (e.g. `first-fret` above `last-fret`).
    ///
    /// # Example
    /// ```
    /// # use gtpm::GtpmError;
    /// let err = GtpmError::ConfigError("fingers must not be empty".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: fingers must not be empty");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Tablature layout error.
    ///
    /// Occurs when the line width cannot hold the tuning heading plus the
    /// widest tablature column.
    #[error("Cannot render tablature: {0}")]
    RenderError(String),

    /// Audio output error (WAV encoding).
    #[error("Audio error: {0}")]
    AudioError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<hound::Error> for GtpmError {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(io) => GtpmError::Io(io),
            other => GtpmError::AudioError(other.to_string()),
        }
    }
}
