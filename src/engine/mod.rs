//! Tile/turn state machine
//!
//! Owns the tile set, selection state, scoring, and the timed transition
//! sequence that resolves a revealed pair. The engine is driven from the
//! outside: a front-end forwards tile clicks, then calls [`GameEngine::tick`]
//! from its event loop so deadline-based stages can fire. Audio is reached
//! only through the [`Cues`] seam; nothing audio-side ever calls back in.

pub mod clock;
mod resolution;
mod session;

use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::thread_rng;
use tracing::{debug, info};

use crate::audio::EffectKind;
use crate::colors::ColorDefinition;
use crate::config::{Difficulty, DifficultySet};
use crate::{ColorSpeakError, Result};

pub use clock::{GameClock, ManualClock, SystemClock};
pub use session::{GameSession, GameStatus, Tile};

use resolution::{PendingResolution, PendingWin, ResolutionOutcome, ResolutionStage};

/// Delay before a confirmed match plays its cue and scores
pub const MATCH_REVEAL_DELAY: Duration = Duration::from_millis(300);
/// Further delay before matched tiles leave the board
pub const MATCH_SETTLE_DELAY: Duration = Duration::from_millis(600);
/// Delay before a mismatch plays its cue and deducts points
pub const MISMATCH_REVEAL_DELAY: Duration = Duration::from_millis(400);
/// Further delay before mismatched tiles flip back down
pub const MISMATCH_SETTLE_DELAY: Duration = Duration::from_millis(800);
/// Delay between the final match settling and the win transition
pub const WIN_DELAY: Duration = Duration::from_millis(500);
/// Points awarded per match
pub const MATCH_REWARD: u32 = 100;
/// Points deducted per mismatch (score never drops below zero)
pub const MISMATCH_PENALTY: u32 = 10;

/// Audio trigger points the engine fires into
///
/// Implemented by [`AudioSubsystem`](crate::AudioSubsystem); every method is
/// fire-and-forget and must never fail into the caller.
pub trait Cues: Send + Sync {
    /// Play a procedural cue
    fn effect(&self, kind: EffectKind);
    /// Speak a color name from the clip cache
    fn speak(&self, color_name: &str);
    /// Warm the clip cache for the colors in play
    fn preload(&self, color_names: &[String]);
}

/// No-audio implementation of [`Cues`]
pub struct MutedCues;

impl Cues for MutedCues {
    fn effect(&self, _kind: EffectKind) {}
    fn speak(&self, _color_name: &str) {}
    fn preload(&self, _color_names: &[String]) {}
}

/// What a tile click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Click fell on an ineligible tile or arrived mid-resolution; no effect
    Ignored,
    /// First tile of a pair flipped face up
    FirstFlipped,
    /// Second tile flipped; resolution sequence scheduled
    PairFlipped,
}

/// The game engine
pub struct GameEngine {
    session: GameSession,
    palette: Vec<ColorDefinition>,
    difficulties: DifficultySet,
    cues: Arc<dyn Cues>,
    clock: Arc<dyn GameClock>,
    generation: u64,
    pending: Option<PendingResolution>,
    pending_win: Option<PendingWin>,
}

impl GameEngine {
    /// Create an idle engine over a palette and difficulty table
    pub fn new(
        palette: Vec<ColorDefinition>,
        difficulties: DifficultySet,
        cues: Arc<dyn Cues>,
        clock: Arc<dyn GameClock>,
    ) -> Self {
        GameEngine {
            session: GameSession::idle(),
            palette,
            difficulties,
            cues,
            clock,
            generation: 0,
            pending: None,
            pending_win: None,
        }
    }

    /// Create an engine with the built-in palette, default difficulty table,
    /// and the system clock
    pub fn with_defaults(cues: Arc<dyn Cues>) -> Self {
        Self::new(
            crate::colors::default_palette(),
            DifficultySet::default(),
            cues,
            Arc::new(SystemClock::new()),
        )
    }

    /// Read-only view of the current session
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The palette tiles are dealt from
    pub fn palette(&self) -> &[ColorDefinition] {
        &self.palette
    }

    /// The difficulty table in effect
    pub fn difficulties(&self) -> &DifficultySet {
        &self.difficulties
    }

    /// True while any deadline-based transition is still outstanding
    pub fn is_settling(&self) -> bool {
        self.pending.is_some() || self.pending_win.is_some()
    }

    /// Deal a fresh session and enter play
    ///
    /// Validates the requested pair count against the palette before any
    /// mutation; on error the prior session is left intact. A restart at any
    /// point (including mid-resolution) supersedes the old session, and its
    /// leftover stage deadlines are invalidated by the generation bump.
    pub fn start_game(&mut self, difficulty: Difficulty) -> Result<()> {
        let pairs = self.difficulties.get(difficulty).pairs;
        if pairs == 0 {
            return Err(ColorSpeakError::ConfigError(format!(
                "difficulty {} has zero pairs",
                difficulty
            )));
        }
        if pairs > self.palette.len() {
            return Err(ColorSpeakError::ConfigError(format!(
                "difficulty {} wants {} pairs but the palette has only {} colors",
                difficulty,
                pairs,
                self.palette.len()
            )));
        }

        let mut rng = thread_rng();
        let mut colors = self.palette.clone();
        colors.shuffle(&mut rng);
        colors.truncate(pairs);

        let mut tiles = Vec::with_capacity(pairs * 2);
        for color in &colors {
            tiles.push(Tile::new(format!("{}-1", color.id), color.id.clone()));
            tiles.push(Tile::new(format!("{}-2", color.id), color.id.clone()));
        }
        tiles.shuffle(&mut rng);

        self.generation += 1;
        self.pending = None;
        self.pending_win = None;
        self.session = GameSession::playing(tiles);

        let names: Vec<String> = colors.iter().map(|c| c.name.clone()).collect();
        self.cues.preload(&names);

        info!(
            difficulty = %difficulty,
            pairs,
            generation = self.generation,
            "started game"
        );
        Ok(())
    }

    /// Forward a tile click from the presentation layer
    ///
    /// Ineligible clicks (wrong status, resolution in flight, matched or
    /// already-selected tile, unknown id) are explicit no-ops.
    pub fn handle_tile_click(&mut self, tile_id: &str) -> ClickOutcome {
        if self.session.status() != GameStatus::Playing || self.session.is_processing() {
            return ClickOutcome::Ignored;
        }
        match self.session.tile(tile_id) {
            Some(tile) if !tile.is_matched && !tile.is_selected => {}
            _ => return ClickOutcome::Ignored,
        }

        let first_id = match self.session.selected_tile_id() {
            None => {
                // First tile of the pair: flip it and wait for a partner.
                if let Some(tile) = self.session.tile_mut(tile_id) {
                    tile.is_selected = true;
                }
                self.session.set_selected_tile_id(Some(tile_id.to_string()));
                self.cues.effect(EffectKind::Click);
                return ClickOutcome::FirstFlipped;
            }
            Some(id) => id.to_string(),
        };

        // Second tile: block further clicks and schedule the resolution.
        self.session.set_processing(true);
        self.session.count_move();
        if let Some(tile) = self.session.tile_mut(tile_id) {
            tile.is_selected = true;
        }
        self.cues.effect(EffectKind::Click);

        let first_color = self
            .session
            .tile(&first_id)
            .map(|t| t.color_id.clone())
            .unwrap_or_default();
        let second_color = self
            .session
            .tile(tile_id)
            .map(|t| t.color_id.clone())
            .unwrap_or_default();

        let (outcome, reveal_delay) = if first_color == second_color {
            (
                ResolutionOutcome::Match {
                    color_id: first_color,
                },
                MATCH_REVEAL_DELAY,
            )
        } else {
            (ResolutionOutcome::Mismatch, MISMATCH_REVEAL_DELAY)
        };

        self.pending = Some(PendingResolution {
            first: first_id,
            second: tile_id.to_string(),
            outcome,
            stage: ResolutionStage::Flipped,
            deadline: self.clock.elapsed() + reveal_delay,
            generation: self.generation,
        });
        ClickOutcome::PairFlipped
    }

    /// Advance any due stage deadlines
    ///
    /// Call this from the event loop. Returns true if observable state
    /// changed. Stages tagged with a superseded generation are dropped
    /// without touching the session.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.elapsed();
        let mut changed = false;

        if let Some(pending) = self.pending.take() {
            if pending.generation != self.generation {
                debug!(
                    stale = pending.generation,
                    current = self.generation,
                    "dropping resolution from superseded session"
                );
            } else if now < pending.deadline {
                self.pending = Some(pending);
            } else {
                changed = true;
                match pending.stage {
                    ResolutionStage::Flipped => self.evaluate(pending, now),
                    ResolutionStage::Evaluating => self.finalize(pending, now),
                }
            }
        }

        if let Some(win) = self.pending_win.take() {
            if win.generation != self.generation {
                debug!("dropping win check from superseded session");
            } else if now < win.deadline {
                self.pending_win = Some(win);
            } else if self.session.status() == GameStatus::Playing {
                self.session.set_status(GameStatus::Won);
                self.cues.effect(EffectKind::Win);
                info!(
                    score = self.session.score(),
                    moves = self.session.moves(),
                    "game won"
                );
                changed = true;
            }
        }

        changed
    }

    /// Reveal delay elapsed: fire the cue and apply the score change
    fn evaluate(&mut self, mut pending: PendingResolution, now: Duration) {
        let settle_delay = match &pending.outcome {
            ResolutionOutcome::Match { color_id } => {
                self.cues.effect(EffectKind::Match);
                if let Some(color) = self.palette.iter().find(|c| c.id == *color_id) {
                    self.cues.speak(&color.name);
                }
                self.session.add_score(MATCH_REWARD);
                MATCH_SETTLE_DELAY
            }
            ResolutionOutcome::Mismatch => {
                self.cues.effect(EffectKind::Mismatch);
                self.session.deduct_score(MISMATCH_PENALTY);
                MISMATCH_SETTLE_DELAY
            }
        };
        pending.stage = ResolutionStage::Evaluating;
        pending.deadline = now + settle_delay;
        self.pending = Some(pending);
    }

    /// Settle delay elapsed: update the tiles and release the click gate
    fn finalize(&mut self, pending: PendingResolution, now: Duration) {
        let matched = matches!(pending.outcome, ResolutionOutcome::Match { .. });
        for id in [&pending.first, &pending.second] {
            if let Some(tile) = self.session.tile_mut(id) {
                tile.is_selected = false;
                if matched {
                    tile.is_matched = true;
                }
            }
        }
        self.session.set_selected_tile_id(None);
        self.session.set_processing(false);

        if matched && self.session.status() == GameStatus::Playing && self.session.all_matched() {
            self.pending_win = Some(PendingWin {
                deadline: now + WIN_DELAY,
                generation: self.generation,
            });
        }
    }
}
