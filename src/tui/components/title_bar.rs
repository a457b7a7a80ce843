// Title bar component
//
// Renders the app title and the key hints.

use crate::config::VERSION;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
pub fn render(f: &mut Frame, area: Rect, _app: &App) {
    let title_text = format!(" ♛ chessmon v{} ", VERSION);

    let title = Paragraph::new(title_text)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title_top(Line::from(" q:quit  ↑↓:select client ").right_aligned()),
        );

    f.render_widget(title, area);
}
