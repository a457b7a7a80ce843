// Engine module - the surface chessmon consumes from a playing client
//
// An engine is any move-computing implementation a tournament server drives
// through the lifecycle hooks below. chessmon never calls these itself in
// production; it wraps the engine (see provider::adapter) so the calls the
// server makes also feed the monitoring surface.

pub mod demo;

use anyhow::Result;

/// Game facts handed to an engine when a move is requested.
///
/// Clocks are perspective-relative: the engine only ever learns its own and
/// its opponent's remaining seconds, never absolute white/black times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Current position as a FEN string.
    pub fen: String,
    /// Seconds left for the engine being asked to move.
    pub your_time: i64,
    /// Seconds left for the opponent.
    pub enemy_time: i64,
}

/// A computed move in coordinate form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveData {
    pub from: String,
    pub to: String,
    /// Promotion piece when a pawn reaches the last rank.
    pub promotion: Option<char>,
}

impl MoveData {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            promotion: None,
        }
    }
}

/// Shape of a match as announced by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchFormat {
    pub games: u32,
    pub time_per_side_secs: i64,
}

/// Final match outcome from this engine's perspective.
///
/// Full server vocabulary; not every variant occurs in a scripted demo.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Won,
    Lost,
    Draw,
    Aborted,
}

/// Lifecycle hooks a playing client exposes.
///
/// Hook order over a connection: `new_match`, then per game `new_game`,
/// repeated `get_move`, `finalize_game`, and finally `finalize_match`.
/// Implementations may run `get_move` on their own compute thread; everything
/// here must therefore be callable behind `&self`.
pub trait Engine: Send + Sync {
    /// Display name this engine registered with.
    fn name(&self) -> &str;

    fn new_match(&self, match_id: &str, opponent: &str, format: &MatchFormat) -> Result<()>;

    fn finalize_match(&self, match_id: &str, status: MatchStatus, statistics: &str) -> Result<()>;

    fn new_game(&self, game_id: &str, match_id: &str, white_player: &str) -> Result<()>;

    fn finalize_game(
        &self,
        game_id: &str,
        match_id: &str,
        winner: Option<&str>,
        pgn: &str,
    ) -> Result<()>;

    fn get_move(&self, game_id: &str, match_id: &str, state: &GameState) -> Result<MoveData>;

    /// Engine-specific metrics, appended after the derived ones in the UI.
    fn metrics(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}
