//! Game session aggregate
//!
//! One complete game's mutable state from start to restart. The session is
//! constructed whole by [`GameEngine::start_game`](super::GameEngine::start_game)
//! and replaced, never incrementally reset, on restart or difficulty change.

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// No game started yet
    Idle,
    /// Tiles are live and clicks are accepted
    Playing,
    /// Every pair matched; terminal until the next restart
    Won,
}

/// One clickable tile bound to a color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Unique per-tile identifier within the session
    pub id: String,
    /// Identifier of the bound [`ColorDefinition`](crate::ColorDefinition)
    pub color_id: String,
    /// Set once when the tile's pair is resolved; never cleared
    pub is_matched: bool,
    /// Face-up as part of the pending pair
    pub is_selected: bool,
}

impl Tile {
    pub(crate) fn new(id: String, color_id: String) -> Self {
        Tile {
            id,
            color_id,
            is_matched: false,
            is_selected: false,
        }
    }
}

/// Mutable state of one game
#[derive(Debug, Clone)]
pub struct GameSession {
    tiles: Vec<Tile>,
    selected_tile_id: Option<String>,
    status: GameStatus,
    is_processing: bool,
    score: u32,
    moves: u32,
}

impl GameSession {
    /// An empty pre-start session
    pub(crate) fn idle() -> Self {
        GameSession {
            tiles: Vec::new(),
            selected_tile_id: None,
            status: GameStatus::Idle,
            is_processing: false,
            score: 0,
            moves: 0,
        }
    }

    /// A freshly dealt session entering play
    pub(crate) fn playing(tiles: Vec<Tile>) -> Self {
        GameSession {
            tiles,
            selected_tile_id: None,
            status: GameStatus::Playing,
            is_processing: false,
            score: 0,
            moves: 0,
        }
    }

    /// The dealt tiles, in board order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Id of the single face-up tile awaiting its partner, if any
    pub fn selected_tile_id(&self) -> Option<&str> {
        self.selected_tile_id.as_deref()
    }

    /// Lifecycle state
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True while a pair resolution is in flight and clicks are blocked
    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    /// Current score (never negative)
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of pair reveals so far
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Look up a tile by id
    pub fn tile(&self, id: &str) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// True once every tile is matched (false for an empty board)
    pub fn all_matched(&self) -> bool {
        !self.tiles.is_empty() && self.tiles.iter().all(|t| t.is_matched)
    }

    pub(crate) fn tile_mut(&mut self, id: &str) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|t| t.id == id)
    }

    pub(crate) fn set_selected_tile_id(&mut self, id: Option<String>) {
        self.selected_tile_id = id;
    }

    pub(crate) fn set_processing(&mut self, processing: bool) {
        self.is_processing = processing;
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    pub(crate) fn add_score(&mut self, reward: u32) {
        self.score += reward;
    }

    /// Deduct a penalty, clamped at a floor of zero
    pub(crate) fn deduct_score(&mut self, penalty: u32) {
        self.score = self.score.saturating_sub(penalty);
    }

    pub(crate) fn count_move(&mut self) {
        self.moves += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tiles() -> Vec<Tile> {
        vec![
            Tile::new("red-1".into(), "red".into()),
            Tile::new("red-2".into(), "red".into()),
        ]
    }

    #[test]
    fn test_idle_session_is_empty() {
        let session = GameSession::idle();
        assert_eq!(session.status(), GameStatus::Idle);
        assert!(session.tiles().is_empty());
        assert!(!session.all_matched(), "empty board must not count as won");
    }

    #[test]
    fn test_playing_session_starts_clean() {
        let session = GameSession::playing(two_tiles());
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.moves(), 0);
        assert!(!session.is_processing());
        assert!(session.selected_tile_id().is_none());
    }

    #[test]
    fn test_score_floor_is_zero() {
        let mut session = GameSession::playing(two_tiles());
        session.deduct_score(10);
        assert_eq!(session.score(), 0);
        session.add_score(5);
        session.deduct_score(10);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_all_matched_tracks_every_tile() {
        let mut session = GameSession::playing(two_tiles());
        assert!(!session.all_matched());
        session.tile_mut("red-1").unwrap().is_matched = true;
        assert!(!session.all_matched());
        session.tile_mut("red-2").unwrap().is_matched = true;
        assert!(session.all_matched());
    }
}
