//! Audio subsystem
//!
//! Owns the lazily opened playback context, the name-keyed clip cache, the
//! asset resolver, and the cue synthesizer. Everything here is
//! fire-and-forget: a missing device, asset, or decoder error logs and
//! degrades to silence, and nothing blocks or fails into the game engine.

mod cache;
mod context;
pub mod effects;
mod loader;
pub mod wav;

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use rodio::buffer::SamplesBuffer;
use tracing::debug;

use crate::engine::Cues;

pub use cache::AudioClip;
pub use effects::EffectKind;
pub use loader::AssetResolver;

/// Sample rate cues are synthesized at, matching the spoken assets
pub const SAMPLE_RATE: u32 = 24_000;

struct AudioShared {
    context: context::PlaybackContext,
    cache: cache::ClipCache,
    resolver: AssetResolver,
}

impl AudioShared {
    /// Resolve, decode, and cache one asset; racing loads both insert and
    /// the last one wins
    fn load_into_cache(&self, name: &str) -> Option<Arc<AudioClip>> {
        let clip = Arc::new(self.resolver.load(name)?);
        self.cache.insert(name, Arc::clone(&clip));
        Some(clip)
    }

    fn play_clip(&self, clip: &AudioClip) {
        let source = SamplesBuffer::new(clip.channels, clip.sample_rate, clip.samples.clone());
        self.context.play(source);
    }
}

/// Playback, caching, and synthesis behind the engine's [`Cues`] seam
pub struct AudioSubsystem {
    shared: Arc<AudioShared>,
}

impl AudioSubsystem {
    /// Create a subsystem resolving spoken assets under the given directory
    ///
    /// No device is touched until something first plays.
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        AudioSubsystem {
            shared: Arc::new(AudioShared {
                context: context::PlaybackContext::new(),
                cache: cache::ClipCache::new(),
                resolver: AssetResolver::new(asset_root),
            }),
        }
    }

    /// Open (or re-attempt opening) the output device
    ///
    /// Idempotent; call on a user gesture to satisfy autoplay-style
    /// policies that block early device access.
    pub fn resume(&self) {
        self.shared.context.ensure();
    }

    /// True if the named clip is already decoded and cached
    pub fn is_cached(&self, name: &str) -> bool {
        self.shared.cache.contains(name)
    }

    /// Warm the cache for a set of color names in the background
    ///
    /// Already-cached names are skipped. Failures are logged per asset and
    /// never surfaced; a duplicate concurrent preload costs a redundant
    /// decode at worst.
    pub fn preload(&self, names: &[String]) {
        let missing: Vec<String> = names
            .iter()
            .filter(|name| !self.shared.cache.contains(name))
            .cloned()
            .collect();
        if missing.is_empty() {
            return;
        }
        debug!("preloading {} audio assets", missing.len());
        let shared = Arc::clone(&self.shared);
        thread::spawn(move || {
            for name in missing {
                shared.load_into_cache(&name);
            }
        });
    }

    /// Play a spoken clip by name, fetching it first on a cache miss
    pub fn play_by_name(&self, name: &str) {
        if let Some(clip) = self.shared.cache.get(name) {
            self.shared.play_clip(&clip);
            return;
        }
        // Not preloaded yet: load off-thread, then play.
        let shared = Arc::clone(&self.shared);
        let name = name.to_string();
        thread::spawn(move || {
            if let Some(clip) = shared.load_into_cache(&name) {
                shared.play_clip(&clip);
            }
        });
    }

    /// Synthesize and play a procedural cue
    pub fn play_effect(&self, kind: EffectKind) {
        let samples = effects::render(kind, SAMPLE_RATE);
        self.shared
            .context
            .play(SamplesBuffer::new(1, SAMPLE_RATE, samples));
    }
}

impl Cues for AudioSubsystem {
    fn effect(&self, kind: EffectKind) {
        self.play_effect(kind);
    }

    fn speak(&self, color_name: &str) {
        self.play_by_name(color_name);
    }

    fn preload(&self, color_names: &[String]) {
        AudioSubsystem::preload(self, color_names);
    }
}
