//! WAV output using hound
//!
//! Writes mono 16-bit PCM. Samples outside [-1, 1] are clipped.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use super::types::RenderedAudio;
use crate::error::GtpmError;

fn spec(audio: &RenderedAudio) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Write rendered audio to any seekable writer
pub fn write_wav_to<W: Write + Seek>(writer: W, audio: &RenderedAudio) -> Result<(), GtpmError> {
    let mut wav = WavWriter::new(writer, spec(audio))?;
    for &sample in &audio.samples {
        wav.write_sample(to_i16(sample))?;
    }
    wav.finalize()?;
    Ok(())
}

/// Write rendered audio to a WAV file
pub fn write_wav(path: impl AsRef<Path>, audio: &RenderedAudio) -> Result<(), GtpmError> {
    let path = path.as_ref();
    write_wav_to(BufWriter::new(File::create(path)?), audio)?;
    tracing::info!(path = %path.display(), samples = audio.samples.len(), "wrote WAV");
    Ok(())
}
