// Status bar component
//
// Renders session facts at the bottom: uptime, client count, update signals
// received, and the selected client's kind tag.

use crate::provider::Provider;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
///
/// Adapts to terminal width:
/// - Wide: full format with labels
/// - Narrow: compact format
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);
    let kind_tag = app.current().kind().fixed_tag();

    let status_text = if bp.at_least(Breakpoint::Normal) {
        format!(
            " {} │ {} clients │ {} updates │ selected {} {}",
            app.uptime(),
            app.roster.len(),
            app.update_count,
            kind_tag,
            app.current().display_name(),
        )
    } else {
        format!(
            " {} │ ♟ {} │ ⟳ {}",
            app.uptime(),
            app.roster.len(),
            app.update_count,
        )
    };

    let status = Paragraph::new(status_text)
        .style(Style::default())
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
