//! Decoded clip cache
//!
//! Process-wide map from a sound identifier (color display name) to its
//! decoded samples. Append-only within a session; racing preloads may both
//! decode the same asset, in which case the last insert wins and the entry
//! stays playable either way. Entries for colors no longer in play are
//! harmless and are kept.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// A decoded, playable audio buffer
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Interleaved channel count
    pub channels: u16,
    /// Samples per second per channel
    pub sample_rate: u32,
    /// Interleaved 16-bit samples
    pub samples: Vec<i16>,
}

impl AudioClip {
    /// Playback length in seconds
    pub fn duration_secs(&self) -> f32 {
        if self.channels == 0 || self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / (self.channels as f32 * self.sample_rate as f32)
    }
}

/// Name-keyed clip store shared across the subsystem
pub(crate) struct ClipCache {
    clips: Mutex<HashMap<String, Arc<AudioClip>>>,
}

impl ClipCache {
    pub fn new() -> Self {
        ClipCache {
            clips: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<AudioClip>> {
        self.clips.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.lock().contains_key(name)
    }

    pub fn insert(&self, name: &str, clip: Arc<AudioClip>) {
        self.clips.lock().insert(name.to_string(), clip);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.clips.lock().len()
    }
}
