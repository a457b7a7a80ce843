// Demo mode: scripted engines playing a short game to showcase the monitor
//
// Two wrapped demo engines replay a miniature (the scholar's mate) move by
// move, driven the same way a real tournament server would drive them:
// new_match, new_game, a get_move per ply, finalize_game, finalize_match.
// Everything the TUI shows in demo mode flows through the same adapter and
// notification path as a live connection.
//
// Run with: CHESSMON_DEMO=1 cargo run --release

use crate::engine::{Engine, GameState, MatchFormat, MatchStatus, MoveData};
use crate::fen;
use crate::provider::adapter::EngineAdapter;
use anyhow::{anyhow, Result};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::sleep;

/// Positions before each ply of the scripted game, starting position first.
const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
    "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
    "rnbqkbnr/pppp1ppp/8/4p3/2B1P3/8/PPPP1PPP/RNBQK1NR b KQkq - 1 2",
    "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/8/PPPP1PPP/RNBQK1NR w KQkq - 2 3",
    "r1bqkbnr/pppp1ppp/2n5/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 3 3",
    "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
];

const WHITE_SCRIPT: &[(&str, &str)] = &[("e2", "e4"), ("f1", "c4"), ("d1", "h5"), ("h5", "f7")];
const BLACK_SCRIPT: &[(&str, &str)] = &[("e7", "e5"), ("b8", "c6"), ("g8", "f6")];

/// A scripted engine that replays its side of the demo miniature.
///
/// The side to play and the move index are both derived from the reported
/// position, so one instance can play either color across games.
pub struct DemoEngine {
    name: String,
    nodes: AtomicU64,
}

impl DemoEngine {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            nodes: AtomicU64::new(0),
        }
    }
}

impl Engine for DemoEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_match(&self, match_id: &str, opponent: &str, _format: &MatchFormat) -> Result<()> {
        tracing::info!("{}: match {} against {}", self.name, match_id, opponent);
        Ok(())
    }

    fn finalize_match(&self, match_id: &str, status: MatchStatus, _statistics: &str) -> Result<()> {
        tracing::info!("{}: match {} over ({:?})", self.name, match_id, status);
        Ok(())
    }

    fn new_game(&self, game_id: &str, _match_id: &str, white_player: &str) -> Result<()> {
        tracing::info!("{}: game {} starts, {} has white", self.name, game_id, white_player);
        Ok(())
    }

    fn finalize_game(
        &self,
        _game_id: &str,
        _match_id: &str,
        _winner: Option<&str>,
        _pgn: &str,
    ) -> Result<()> {
        Ok(())
    }

    fn get_move(&self, _game_id: &str, _match_id: &str, state: &GameState) -> Result<MoveData> {
        let (_, meta) = fen::decode(Some(&state.fen));
        let script = if meta.white_to_move {
            WHITE_SCRIPT
        } else {
            BLACK_SCRIPT
        };
        let idx = meta.turn.max(1) as usize - 1;
        let (from, to) = script
            .get(idx)
            .copied()
            .ok_or_else(|| anyhow!("{}: no scripted move for turn {}", self.name, meta.turn))?;

        // Pretend we searched something.
        self.nodes
            .fetch_add(rand::thread_rng().gen_range(40_000..90_000), Ordering::Relaxed);

        Ok(MoveData::new(from, to))
    }

    fn metrics(&self) -> Vec<(String, String)> {
        vec![
            ("Nodes".to_string(), self.nodes.load(Ordering::Relaxed).to_string()),
            ("Depth".to_string(), "7".to_string()),
        ]
    }
}

/// Drive the two wrapped demo engines through a two-game match, then idle
/// until shutdown. Errors from the scripted engines are logged, never fatal.
pub async fn run_demo(
    first: Arc<EngineAdapter<DemoEngine>>,
    second: Arc<EngineAdapter<DemoEngine>>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    // Initial delay to let the TUI render.
    sleep(Duration::from_millis(1200)).await;

    let format = MatchFormat {
        games: 2,
        time_per_side_secs: 300,
    };
    let match_id = "demo-match";

    if first
        .new_match(match_id, second.name(), &format)
        .and_then(|()| second.new_match(match_id, first.name(), &format))
        .is_err()
    {
        return;
    }

    for game in 0..format.games {
        // Colors swap between games.
        let (white, black) = if game % 2 == 0 {
            (&first, &second)
        } else {
            (&second, &first)
        };
        let game_id = format!("demo-game-{}", game + 1);

        if let Err(e) = play_scripted_game(white, black, &game_id, match_id, &format).await {
            tracing::warn!("demo game aborted: {e:#}");
        }

        if shutdown_rx.try_recv().is_ok() {
            return;
        }
        sleep(Duration::from_secs(2)).await;
    }

    let _ = first.finalize_match(match_id, MatchStatus::Won, "2-0");
    let _ = second.finalize_match(match_id, MatchStatus::Lost, "0-2");

    // Keep the providers alive so the TUI stays populated, but honor shutdown.
    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                tracing::info!("Demo received shutdown signal");
                return;
            }
            _ = sleep(Duration::from_secs(60)) => {}
        }
    }
}

async fn play_scripted_game(
    white: &Arc<EngineAdapter<DemoEngine>>,
    black: &Arc<EngineAdapter<DemoEngine>>,
    game_id: &str,
    match_id: &str,
    format: &MatchFormat,
) -> Result<()> {
    white.new_game(game_id, match_id, white.name())?;
    black.new_game(game_id, match_id, white.name())?;

    for (ply, position) in POSITIONS.iter().enumerate() {
        let mover = if ply % 2 == 0 { white } else { black };
        let elapsed = (ply as i64 / 2) * 4;
        let state = GameState {
            fen: position.to_string(),
            your_time: format.time_per_side_secs - elapsed,
            enemy_time: format.time_per_side_secs - elapsed,
        };
        let mv = mover.get_move(game_id, match_id, &state)?;
        tracing::debug!(
            "{} plays {}{}{}",
            mover.name(),
            mv.from,
            mv.to,
            mv.promotion.map(String::from).unwrap_or_default()
        );

        // Think-time jitter keeps the replay from looking mechanical.
        // ThreadRng is not Send, so it must not live across the await.
        let jitter = rand::thread_rng().gen_range(500..1400);
        sleep(Duration::from_millis(jitter)).await;
    }

    let winner = white.name().to_string();
    let pgn = "1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7# 1-0";
    white.finalize_game(game_id, match_id, Some(&winner), pgn)?;
    black.finalize_game(game_id, match_id, Some(&winner), pgn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_cover_every_position() {
        // One scripted move per ply, alternating colors from the start.
        assert_eq!(POSITIONS.len(), WHITE_SCRIPT.len() + BLACK_SCRIPT.len());
        for (ply, position) in POSITIONS.iter().enumerate() {
            let meta = fen::decode(Some(position)).1;
            assert_eq!(meta.white_to_move, ply % 2 == 0, "ply {ply}");
        }
    }

    #[test]
    fn demo_engine_follows_its_script() {
        let engine = DemoEngine::named("Gray");
        let mv = engine
            .get_move(
                "g",
                "m",
                &GameState {
                    fen: POSITIONS[0].to_string(),
                    your_time: 300,
                    enemy_time: 300,
                },
            )
            .unwrap();
        assert_eq!(mv, MoveData::new("e2", "e4"));

        let reply = engine
            .get_move(
                "g",
                "m",
                &GameState {
                    fen: POSITIONS[1].to_string(),
                    your_time: 300,
                    enemy_time: 300,
                },
            )
            .unwrap();
        assert_eq!(reply, MoveData::new("e7", "e5"));
    }

    #[test]
    fn demo_engine_errors_past_the_script() {
        let engine = DemoEngine::named("Gray");
        let off_script = "8/8/8/8/8/8/8/8 w - - 0 40";
        let result = engine.get_move(
            "g",
            "m",
            &GameState {
                fen: off_script.to_string(),
                your_time: 10,
                enemy_time: 10,
            },
        );
        assert!(result.is_err());
    }
}
