//! WAV wrapping for the spoken-color asset contract
//!
//! Spoken color assets are single-channel 16-bit linear PCM at 24kHz. This
//! module wraps raw PCM in a canonical RIFF/WAVE header so any standard
//! decoder can play the files without bespoke parsing. Asset producers use
//! [`write_wav`]; the in-memory variant backs tests.

use std::io::Cursor;
use std::path::Path;

use crate::{ColorSpeakError, Result};

/// Sample rate of spoken-color assets
pub const ASSET_SAMPLE_RATE: u32 = 24_000;
/// Channel count of spoken-color assets
pub const ASSET_CHANNELS: u16 = 1;
/// Bit depth of spoken-color assets
pub const ASSET_BITS_PER_SAMPLE: u16 = 16;

fn asset_spec() -> hound::WavSpec {
    hound::WavSpec {
        channels: ASSET_CHANNELS,
        sample_rate: ASSET_SAMPLE_RATE,
        bits_per_sample: ASSET_BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Wrap raw 24kHz mono 16-bit PCM in a canonical WAV container
pub fn pcm_to_wav(samples: &[i16]) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, asset_spec())
        .map_err(|e| ColorSpeakError::AudioFileError(e.to_string()))?;
    for sample in samples {
        writer
            .write_sample(*sample)
            .map_err(|e| ColorSpeakError::AudioFileError(e.to_string()))?;
    }
    writer
        .finalize()
        .map_err(|e| ColorSpeakError::AudioFileError(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Write raw PCM to disk as a WAV file
pub fn write_wav(path: &Path, samples: &[i16]) -> Result<()> {
    let bytes = pcm_to_wav(samples)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
