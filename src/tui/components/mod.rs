// Components module - reusable UI building blocks
//
// Shell components rendered on every frame:
// - Title bar: app name and key hints
// - Client list: connected providers with kind tags
// - Board panel: the selected provider's position
// - Metrics panel: derived + engine-reported metrics
// - Logs panel: captured system log entries
// - Status bar: uptime and counters
//
// Each component is a focused, single-responsibility module.

pub mod board_panel;
pub mod client_list_panel;
pub mod logs_panel;
pub mod metrics_panel;
pub mod status_bar;
pub mod title_bar;

// Re-export render functions for convenient access
// Usage: components::board_panel::render(f, area, app)
//    or: components::render_board(f, area, app)

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the client list (convenience wrapper)
pub fn render_client_list(f: &mut Frame, area: Rect, app: &App) {
    client_list_panel::render(f, area, app);
}

/// Render the board panel (convenience wrapper)
pub fn render_board(f: &mut Frame, area: Rect, app: &App) {
    board_panel::render(f, area, app);
}

/// Render the metrics panel (convenience wrapper)
pub fn render_metrics(f: &mut Frame, area: Rect, app: &App) {
    metrics_panel::render(f, area, app);
}

/// Render the logs panel (convenience wrapper)
pub fn render_logs_panel(f: &mut Frame, area: Rect, app: &App) {
    logs_panel::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}
