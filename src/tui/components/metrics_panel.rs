// Metrics panel component
//
// Two-column table with the selected provider's metrics: the derived facts
// first (turn, player, en passant, castling, halfmove clock), then whatever
// the engine itself reports, in the engine's order.

use crate::provider::Metrics;
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Row, Table},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let rows: Vec<Row> = app
        .current()
        .metrics()
        .into_iter()
        .map(|(label, value)| Row::new(vec![label, value]))
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Percentage(33), Constraint::Percentage(67)],
    )
    .header(Row::new(vec!["Metric", "Value"]).style(Style::default().add_modifier(Modifier::BOLD)))
    .column_spacing(1)
    .block(Block::default().borders(Borders::ALL).title(" Metrics "));

    f.render_widget(table, area);
}
