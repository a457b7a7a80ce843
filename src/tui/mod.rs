// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, provider update signals)
// - Rendering the UI

pub mod app;
pub mod components;
pub mod layout;

use crate::events::ProviderId;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, RosterEntry};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done. The event loop handles keyboard input, timer ticks and the
/// update signals adapters fire after engine lifecycle calls.
pub async fn run_tui(
    mut update_rx: mpsc::UnboundedReceiver<ProviderId>,
    log_buffer: LogBuffer,
    aspect_factor: f32,
    roster: Vec<RosterEntry>,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(log_buffer, aspect_factor, roster);

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut update_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three things at once via tokio::select!: keyboard input, a
/// periodic tick (clocks and log tail move even without signals), and the
/// provider update channel. Each iteration redraws once.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    update_rx: &mut mpsc::UnboundedReceiver<ProviderId>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        // Draw the UI
        terminal.draw(|f| draw(f, app)).context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {}

            // Update signal from an adapter: a provider's snapshot changed
            Some(id) = update_rx.recv() => {
                app.record_update(id);
                // Drain whatever queued up; one redraw covers them all.
                while let Ok(id) = update_rx.try_recv() {
                    app.record_update(id);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => app.select_next(),
        _ => {}
    }
}

/// Main UI render function - called on every frame
///
/// Shell: title on top, logs and status at the bottom, and the main row
/// (client list | board | metrics) filling the rest.
fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(8),
            Constraint::Length(2),
        ])
        .split(f.area());

    components::render_title(f, chunks[0], app);
    draw_main_row(f, chunks[1], app);
    components::render_logs_panel(f, chunks[2], app);
    components::render_status(f, chunks[3], app);
}

fn draw_main_row(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Min(24),
            Constraint::Percentage(30),
        ])
        .split(area);

    components::render_client_list(f, columns[0], app);
    components::render_board(f, columns[1], app);
    components::render_metrics(f, columns[2], app);
}
