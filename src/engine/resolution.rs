//! Staged pair resolution
//!
//! Revealing a second tile starts a two-stage sequence: a reveal delay so
//! the player registers both faces, then the cue and score change, then a
//! settle delay before the board updates. Each pending stage carries an
//! absolute deadline and the generation of the session that scheduled it;
//! a stage whose generation no longer matches is discarded unapplied.

use std::time::Duration;

/// How the revealed pair compares
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResolutionOutcome {
    /// Both tiles share this color
    Match { color_id: String },
    /// Colors differ; tiles flip back down
    Mismatch,
}

/// Which stage of the sequence is waiting on its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResolutionStage {
    /// Both tiles face up, waiting out the reveal delay
    Flipped,
    /// Cue and score applied, waiting out the settle delay
    Evaluating,
}

/// An in-flight pair resolution
#[derive(Debug, Clone)]
pub(crate) struct PendingResolution {
    pub first: String,
    pub second: String,
    pub outcome: ResolutionOutcome,
    pub stage: ResolutionStage,
    pub deadline: Duration,
    pub generation: u64,
}

/// A scheduled win transition
#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingWin {
    pub deadline: Duration,
    pub generation: u64,
}
