//! ColorSpeak game core
//!
//! A memory tile-matching game engine: the player flips pairs of tiles to
//! reveal colors, matches earn points, mismatches cost points, and audio
//! feedback combines cached spoken color names with a small procedural
//! sound-effect synthesizer.
//!
//! # Features
//! - Turn state machine with staged, clock-driven match/mismatch resolution
//! - Generation-tagged deadlines so a restart invalidates stale transitions
//! - Lazily initialized playback context tolerant of missing audio devices
//! - Name-keyed clip cache with background preloading
//! - Procedural cue synthesis (click, match, mismatch, win) with no asset
//!   dependency
//! - Difficulty table and color palette supplied as external configuration
//!
//! # Quick start
//! ## Engine with muted audio
//! ```no_run
//! use std::sync::Arc;
//! use colorspeak::engine::{GameEngine, MutedCues};
//! use colorspeak::Difficulty;
//!
//! let mut engine = GameEngine::with_defaults(Arc::new(MutedCues));
//! engine.start_game(Difficulty::Easy).unwrap();
//! let first = engine.session().tiles()[0].id.clone();
//! engine.handle_tile_click(&first);
//! engine.tick();
//! ```
//!
//! ## Engine wired to the audio subsystem
//! ```no_run
//! use std::sync::Arc;
//! use colorspeak::audio::AudioSubsystem;
//! use colorspeak::engine::{GameEngine, SystemClock};
//! use colorspeak::{default_palette, Difficulty, DifficultySet};
//!
//! let audio = Arc::new(AudioSubsystem::new("assets/audio"));
//! let mut engine = GameEngine::new(
//!     default_palette(),
//!     DifficultySet::default(),
//!     audio,
//!     Arc::new(SystemClock::new()),
//! );
//! engine.start_game(Difficulty::Medium).unwrap();
//! ```

#![warn(missing_docs)]

pub mod audio; // Playback context, clip cache, cue synthesis
pub mod colors; // Color reference data
pub mod config; // Difficulty configuration surface
pub mod engine; // Tile/turn state machine

/// Error types for game and audio operations
#[derive(thiserror::Error, Debug)]
pub enum ColorSpeakError {
    /// Invalid difficulty or palette configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Error reading or decoding an audio asset
    #[error("Audio file error: {0}")]
    AudioFileError(String),

    /// Audio device error
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    /// Error parsing external configuration
    #[error("Parse error: {0}")]
    ParseError(String),

    /// IO error from the filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for game and audio operations
pub type Result<T> = std::result::Result<T, ColorSpeakError>;

// Public API exports
pub use audio::{AudioClip, AudioSubsystem, EffectKind};
pub use colors::{default_palette, ColorDefinition, Contrast};
pub use config::{Difficulty, DifficultyConfig, DifficultySet};
pub use engine::{ClickOutcome, Cues, GameEngine, GameSession, GameStatus, MutedCues, Tile};
