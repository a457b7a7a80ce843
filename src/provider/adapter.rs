// Engine adapter - wraps a playing client so it doubles as a provider
//
// The tournament server drives the wrapped engine exactly as before; the
// adapter forwards every lifecycle call unchanged, and only after the engine
// succeeded does it publish an updated snapshot and fire the update signal.
// A failing engine call therefore propagates to the server with no partial
// snapshot ever becoming observable.

use crate::engine::{Engine, GameState, MatchFormat, MatchStatus, MoveData};
use crate::events::{ProviderId, UpdateSignal};
use crate::provider::{
    BoardState, Capability, CapabilitySet, Identity, Metrics, Provider, RefreshSignal, Timing,
    TournamentMembership, NAME_PLACEHOLDER,
};
use anyhow::Result;
use parking_lot::RwLock;
use std::sync::Arc;

/// Engine-reported facts cached for the monitoring surface.
///
/// Only the adapter writes this, in response to lifecycle calls; everyone
/// else reads a published `Arc` of it. Clocks stay perspective-relative here
/// and are mapped to white/black at the capability surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub fen: Option<String>,
    pub my_time: i64,
    pub their_time: i64,
    pub plays_white: bool,
    pub opponent: Option<String>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            fen: None,
            my_time: -1,
            their_time: -1,
            plays_white: true,
            opponent: None,
        }
    }
}

/// Wraps an engine instance as a full provider.
///
/// Composition instead of inheritance: the adapter holds the engine and its
/// own snapshot, and implements both the `Engine` trait (by delegation) and
/// every capability trait.
pub struct EngineAdapter<E: Engine> {
    id: ProviderId,
    engine: E,
    snapshot: RwLock<Arc<Snapshot>>,
    on_update: UpdateSignal,
    tournament_code: Option<String>,
}

impl<E: Engine> EngineAdapter<E> {
    /// Wrap `engine`, reporting changes through `on_update`.
    ///
    /// The tournament code is fixed for the adapter's lifetime and reported
    /// verbatim through the `TournamentMembership` capability.
    pub fn wrap(
        engine: E,
        on_update: UpdateSignal,
        tournament_code: Option<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: ProviderId::next(),
            engine,
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            on_update,
            tournament_code,
        })
    }

    pub fn id(&self) -> ProviderId {
        self.id
    }

    /// Current snapshot; always a complete, consistent published state.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read())
    }

    /// Publish a modified snapshot as a whole, then signal the consumer.
    ///
    /// Readers holding the previous `Arc` keep a consistent view; the swap
    /// is the only write, so no field-level tearing is possible.
    fn publish(&self, mutate: impl FnOnce(&mut Snapshot)) {
        {
            let mut slot = self.snapshot.write();
            let mut next = (**slot).clone();
            mutate(&mut next);
            *slot = Arc::new(next);
        }
        (self.on_update)(self.id);
    }

    /// Signal the consumer without touching the snapshot.
    fn notify(&self) {
        (self.on_update)(self.id);
    }
}

impl<E: Engine> Engine for EngineAdapter<E> {
    fn name(&self) -> &str {
        self.engine.name()
    }

    fn new_match(&self, match_id: &str, opponent: &str, format: &MatchFormat) -> Result<()> {
        self.engine.new_match(match_id, opponent, format)?;
        self.publish(|s| s.opponent = Some(opponent.to_string()));
        Ok(())
    }

    fn finalize_match(&self, match_id: &str, status: MatchStatus, statistics: &str) -> Result<()> {
        self.engine.finalize_match(match_id, status, statistics)?;
        self.notify();
        Ok(())
    }

    fn new_game(&self, game_id: &str, match_id: &str, white_player: &str) -> Result<()> {
        self.engine.new_game(game_id, match_id, white_player)?;
        let plays_white = white_player == self.engine.name();
        self.publish(|s| s.plays_white = plays_white);
        Ok(())
    }

    fn finalize_game(
        &self,
        game_id: &str,
        match_id: &str,
        winner: Option<&str>,
        pgn: &str,
    ) -> Result<()> {
        self.engine.finalize_game(game_id, match_id, winner, pgn)?;
        match winner {
            Some(winner) if winner == self.engine.name() => {
                tracing::info!("Game ended. {} (you) won", winner);
            }
            Some(winner) => tracing::info!("Game ended. {} (not you) won", winner),
            None => tracing::info!("Game ended in a draw"),
        }
        self.notify();
        Ok(())
    }

    fn get_move(&self, game_id: &str, match_id: &str, state: &GameState) -> Result<MoveData> {
        let mv = self.engine.get_move(game_id, match_id, state)?;
        self.publish(|s| {
            s.fen = Some(state.fen.clone());
            s.my_time = state.your_time;
            s.their_time = state.enemy_time;
        });
        Ok(mv)
    }

    fn metrics(&self) -> Vec<(String, String)> {
        self.engine.metrics()
    }
}

impl<E: Engine> Identity for EngineAdapter<E> {
    fn white_name(&self) -> String {
        let snap = self.snapshot();
        if snap.plays_white {
            self.engine.name().to_string()
        } else {
            snap.opponent.clone().unwrap_or_else(|| NAME_PLACEHOLDER.to_string())
        }
    }

    fn black_name(&self) -> String {
        let snap = self.snapshot();
        if snap.plays_white {
            snap.opponent.clone().unwrap_or_else(|| NAME_PLACEHOLDER.to_string())
        } else {
            self.engine.name().to_string()
        }
    }
}

impl<E: Engine> BoardState for EngineAdapter<E> {
    fn fen(&self) -> Option<String> {
        self.snapshot().fen.clone()
    }
}

impl<E: Engine> Timing for EngineAdapter<E> {
    fn white_time(&self) -> i64 {
        let snap = self.snapshot();
        if snap.plays_white {
            snap.my_time
        } else {
            snap.their_time
        }
    }

    fn black_time(&self) -> i64 {
        let snap = self.snapshot();
        if snap.plays_white {
            snap.their_time
        } else {
            snap.my_time
        }
    }
}

impl<E: Engine> Metrics for EngineAdapter<E> {
    /// Facts derived from the current state string, then whatever the engine
    /// itself reports, in the engine's own order.
    fn metrics(&self) -> Vec<(String, String)> {
        let meta = self.metadata();
        let castling = meta.castling;
        let mut rows = vec![
            ("Turn".to_string(), meta.turn.to_string()),
            (
                "Current player".to_string(),
                if meta.white_to_move { "white" } else { "black" }.to_string(),
            ),
            ("En passant".to_string(), meta.en_passant.label().to_string()),
            (
                "Castling white".to_string(),
                format!("King: {}; Queen: {}", castling.white_king, castling.white_queen),
            ),
            (
                "Castling black".to_string(),
                format!("King: {}; Queen: {}", castling.black_king, castling.black_queen),
            ),
            ("Halfmove clock".to_string(), meta.halfmove_clock.to_string()),
        ];
        rows.extend(self.engine.metrics());
        rows
    }
}

impl<E: Engine> RefreshSignal for EngineAdapter<E> {
    fn need_refresh(&self) -> bool {
        // The update signal covers repaints; nothing here ever polls.
        false
    }
}

impl<E: Engine> TournamentMembership for EngineAdapter<E> {
    fn tournament_code(&self) -> Option<String> {
        self.tournament_code.clone()
    }
}

impl<E: Engine> Provider for EngineAdapter<E> {
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::empty()
            .with(Capability::Identity)
            .with(Capability::BoardState)
            .with(Capability::Timing)
            .with(Capability::Metrics)
            .with(Capability::RefreshSignal)
            .with(Capability::TournamentMembership)
    }

    fn display_name(&self) -> String {
        self.engine.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{channel_signal, noop_signal};
    use crate::provider::ProviderKind;
    use anyhow::bail;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::mpsc;

    /// Scripted engine: answers a fixed move, optionally failing get_move.
    struct ScriptedEngine {
        name: String,
        fail_get_move: AtomicBool,
    }

    impl ScriptedEngine {
        fn named(name: &str) -> Self {
            Self {
                name: name.to_string(),
                fail_get_move: AtomicBool::new(false),
            }
        }
    }

    impl Engine for ScriptedEngine {
        fn name(&self) -> &str {
            &self.name
        }

        fn new_match(&self, _: &str, _: &str, _: &MatchFormat) -> Result<()> {
            Ok(())
        }

        fn finalize_match(&self, _: &str, _: MatchStatus, _: &str) -> Result<()> {
            Ok(())
        }

        fn new_game(&self, _: &str, _: &str, _: &str) -> Result<()> {
            Ok(())
        }

        fn finalize_game(&self, _: &str, _: &str, _: Option<&str>, _: &str) -> Result<()> {
            Ok(())
        }

        fn get_move(&self, _: &str, _: &str, _: &GameState) -> Result<MoveData> {
            if self.fail_get_move.load(Ordering::SeqCst) {
                bail!("engine exploded");
            }
            Ok(MoveData::new("e2", "e4"))
        }

        fn metrics(&self) -> Vec<(String, String)> {
            vec![("Nodes".to_string(), "1234".to_string())]
        }
    }

    fn state(fen: &str, your: i64, enemy: i64) -> GameState {
        GameState {
            fen: fen.to_string(),
            your_time: your,
            enemy_time: enemy,
        }
    }

    #[test]
    fn get_move_updates_snapshot_and_notifies() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let adapter = EngineAdapter::wrap(ScriptedEngine::named("Gray"), channel_signal(tx), None);

        let mv = adapter
            .get_move("g1", "m1", &state("8/8/8/8/8/8/8/8 w - - 0 1", 42, 17))
            .unwrap();
        assert_eq!(mv, MoveData::new("e2", "e4"));

        let snap = adapter.snapshot();
        assert_eq!(snap.fen.as_deref(), Some("8/8/8/8/8/8/8/8 w - - 0 1"));
        assert_eq!(snap.my_time, 42);
        assert_eq!(snap.their_time, 17);
        assert_eq!(rx.try_recv().ok(), Some(adapter.id()));
    }

    #[test]
    fn failing_get_move_propagates_and_leaves_snapshot_untouched() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let engine = ScriptedEngine::named("Gray");
        engine.fail_get_move.store(true, Ordering::SeqCst);
        let adapter = EngineAdapter::wrap(engine, channel_signal(tx), None);

        let before = adapter.snapshot();
        let err = adapter.get_move("g1", "m1", &state("8/8/8/8/8/8/8/8 w - - 0 1", 42, 17));
        assert!(err.is_err());
        assert_eq!(*adapter.snapshot(), *before);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn new_game_decides_side_by_white_player_name() {
        let adapter = EngineAdapter::wrap(ScriptedEngine::named("Gray"), noop_signal(), None);

        adapter.new_game("g1", "m1", "Gray").unwrap();
        assert!(adapter.snapshot().plays_white);

        adapter.new_game("g2", "m1", "Ivory").unwrap();
        assert!(!adapter.snapshot().plays_white);
    }

    #[test]
    fn times_map_through_recorded_side() {
        let adapter = EngineAdapter::wrap(ScriptedEngine::named("Gray"), noop_signal(), None);
        adapter.new_game("g1", "m1", "Ivory").unwrap(); // Gray plays black
        adapter
            .get_move("g1", "m1", &state("8/8/8/8/8/8/8/8 b - - 0 1", 42, 17))
            .unwrap();

        assert_eq!(adapter.white_time(), 17);
        assert_eq!(adapter.black_time(), 42);
        assert_eq!(adapter.white_name(), "Ivory");
        assert_eq!(adapter.black_name(), "Gray");
    }

    #[test]
    fn names_fall_back_before_match_start() {
        let adapter = EngineAdapter::wrap(ScriptedEngine::named("Gray"), noop_signal(), None);
        // Plays white by default, opponent still unknown.
        assert_eq!(adapter.white_name(), "Gray");
        assert_eq!(adapter.black_name(), NAME_PLACEHOLDER);
    }

    #[test]
    fn metrics_prepend_derived_facts_to_engine_metrics() {
        let adapter = EngineAdapter::wrap(ScriptedEngine::named("Gray"), noop_signal(), None);
        adapter
            .get_move(
                "g1",
                "m1",
                &state("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 3 7", 1, 1),
            )
            .unwrap();

        let rows = Metrics::metrics(&*adapter);
        let labels: Vec<&str> = rows.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Turn",
                "Current player",
                "En passant",
                "Castling white",
                "Castling black",
                "Halfmove clock",
                "Nodes"
            ]
        );
        assert_eq!(rows[0].1, "7");
        assert_eq!(rows[1].1, "black");
        assert_eq!(rows[2].1, "---");
        assert_eq!(rows[3].1, "King: true; Queen: true");
        assert_eq!(rows[5].1, "3");
        assert_eq!(rows[6].1, "1234");
    }

    #[test]
    fn tournament_code_is_fixed_at_wrap_time() {
        let adapter = EngineAdapter::wrap(
            ScriptedEngine::named("Gray"),
            noop_signal(),
            Some("WCCC-24".to_string()),
        );
        assert_eq!(adapter.tournament_code().as_deref(), Some("WCCC-24"));
        assert_eq!(adapter.kind(), ProviderKind::Engine);
    }

    #[test]
    fn new_match_records_opponent_name() {
        let adapter = EngineAdapter::wrap(ScriptedEngine::named("Gray"), noop_signal(), None);
        adapter
            .new_match(
                "m1",
                "Ivory",
                &MatchFormat {
                    games: 2,
                    time_per_side_secs: 300,
                },
            )
            .unwrap();
        assert_eq!(adapter.snapshot().opponent.as_deref(), Some("Ivory"));
        // Still white by default, so the opponent shows as black.
        assert_eq!(adapter.black_name(), "Ivory");
    }
}
