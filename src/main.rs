// chessmon - terminal monitor for chess engine clients
//
// Wraps move-computing engine clients in an introspectable provider layer
// and shows their live game state in a terminal UI.
//
// Architecture:
// - Engine adapter: intercepts lifecycle calls, publishes snapshots
// - FEN decoder: state string -> board grid + metadata, fallback on garbage
// - TUI (ratatui): client list, board, metrics, logs
// - Update signals: adapters notify the render loop over an mpsc channel

mod cli;
mod config;
mod engine;
mod events;
mod fen;
mod logging;
mod provider;
mod tui;

use anyhow::Result;
use config::{Config, LogRotation};
use engine::demo::{run_demo, DemoEngine};
use logging::{LogBuffer, TuiLogLayer};
use provider::adapter::EngineAdapter;
use provider::Provider;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui::app::RosterEntry;

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --path)
    // If a subcommand was handled, exit early
    let Some(cli) = cli::handle_cli() else {
        return Ok(());
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    if cli.demo {
        config.demo_mode = true;
    }

    // Create log buffer for the TUI log panel
    let log_buffer = LogBuffer::new();

    // Initialize tracing. Logs go to the in-memory buffer (the TUI owns the
    // screen), optionally also to rotating files.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("chessmon={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            match std::fs::create_dir_all(&config.logging.file_dir) {
                Ok(()) => {
                    let file_appender = match config.logging.file_rotation {
                        LogRotation::Hourly => tracing_appender::rolling::hourly(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                        LogRotation::Daily => tracing_appender::rolling::daily(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                        LogRotation::Never => tracing_appender::rolling::never(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                    };
                    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .with(
                            tracing_subscriber::fmt::layer()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();
                    Some(guard)
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Could not create log directory {:?}: {}",
                        config.logging.file_dir, e
                    );
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .init();
                    None
                }
            }
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer.clone()))
                .init();
            None
        };

    // Update signals flow from adapters to the render loop over this channel.
    // Unbounded: adapters fire-and-forget from the engine's compute thread.
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let update_signal = events::channel_signal(update_tx);

    // Shutdown channel for the demo driver
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let mut roster: Vec<RosterEntry> = Vec::new();
    let demo_handle = if config.demo_mode {
        tracing::info!("Running in DEMO MODE - scripted engines");

        let gray = EngineAdapter::wrap(
            DemoEngine::named("Gray"),
            update_signal.clone(),
            config.tournament_code.clone(),
        );
        let ivory = EngineAdapter::wrap(
            DemoEngine::named("Ivory"),
            update_signal.clone(),
            config.tournament_code.clone(),
        );

        roster.push(RosterEntry {
            id: gray.id(),
            provider: gray.clone() as Arc<dyn Provider>,
        });
        roster.push(RosterEntry {
            id: ivory.id(),
            provider: ivory.clone() as Arc<dyn Provider>,
        });

        Some(tokio::spawn(run_demo(gray, ivory, shutdown_rx)))
    } else {
        tracing::info!(
            "No clients registered. Start with --demo (or CHESSMON_DEMO=1) to watch a scripted game"
        );
        None
    };

    // Run the TUI in the main task; blocks until the user quits.
    if let Err(e) = tui::run_tui(update_rx, log_buffer, config.aspect_factor, roster).await {
        tracing::error!("TUI error: {:?}", e);
    }

    tracing::info!("Shutting down...");

    // Signal the demo driver; if the send fails it already finished.
    let _ = shutdown_tx.send(());
    if let Some(handle) = demo_handle {
        let _ = handle.await;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
