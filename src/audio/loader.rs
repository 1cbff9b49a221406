//! Audio asset resolution and decoding
//!
//! One asset per color, addressed by the lowercase color identifier. The
//! resolver tries the WAV path first (the header-carrying format assets
//! ship in today), then falls back to a legacy MP3 of the same name, and
//! finally gives up with a log line. Decoding goes through rodio so both
//! formats land in the same [`AudioClip`] shape.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use rodio::{Decoder, Source};
use tracing::{debug, warn};

use super::cache::AudioClip;
use crate::{ColorSpeakError, Result};

/// File extensions tried in order
const EXTENSIONS: [&str; 2] = ["wav", "mp3"];

/// Maps color names to asset files under a root directory
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    /// Create a resolver rooted at the given asset directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        AssetResolver { root: root.into() }
    }

    /// The asset directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate paths for a color name, in lookup order
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let stem = name.to_lowercase();
        EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", stem, ext)))
            .collect()
    }

    /// Load and decode the asset for a color name
    ///
    /// Returns `None` when no candidate exists or decodes; audio is a
    /// non-critical enhancement, so failures log and degrade to silence.
    pub fn load(&self, name: &str) -> Option<AudioClip> {
        for path in self.candidates(name) {
            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!("no asset at {}, trying next candidate", path.display());
                    continue;
                }
                Err(e) => {
                    warn!("could not read {}: {}", path.display(), e);
                    continue;
                }
            };
            match decode(bytes) {
                Ok(clip) => {
                    debug!(
                        "decoded {} ({:.2}s) for \"{}\"",
                        path.display(),
                        clip.duration_secs(),
                        name
                    );
                    return Some(clip);
                }
                Err(e) => warn!("could not decode {}: {}", path.display(), e),
            }
        }
        warn!("no audio asset found for \"{}\"", name);
        None
    }
}

/// Decode an in-memory asset into a buffered clip
fn decode(bytes: Vec<u8>) -> Result<AudioClip> {
    let decoder = Decoder::new(Cursor::new(bytes))
        .map_err(|e| ColorSpeakError::AudioFileError(e.to_string()))?;
    let channels = decoder.channels();
    let sample_rate = decoder.sample_rate();
    let samples: Vec<i16> = decoder.collect();
    if samples.is_empty() {
        return Err(ColorSpeakError::AudioFileError(
            "asset decoded to zero samples".to_string(),
        ));
    }
    Ok(AudioClip {
        channels,
        sample_rate,
        samples,
    })
}
