// Logs panel component
//
// Shows the tail of the captured log buffer with color-coded severity and
// the short source code each entry carries (SYS, ENG, UI).

use crate::logging::{LogEntry, LogLevel};
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let entries = app.log_buffer.get_all();
    let visible = area.height.saturating_sub(2) as usize;
    let start = entries.len().saturating_sub(visible);

    let items: Vec<ListItem> = entries[start..]
        .iter()
        .map(|entry| ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level)))
        .collect();

    let title = format!(" Logs [{}] ", entries.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "{} [{:^4}-{:^5}] {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.code,
        entry.level.as_str(),
        entry.message
    )
}

/// Get color style for log level
fn log_level_style(level: &LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Info => Style::default().fg(Color::Gray),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(Color::DarkGray),
    }
}
