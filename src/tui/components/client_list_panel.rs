// Client list component
//
// One line per connected client: fixed-width kind tag, display name and
// tournament code. The tag width is identical across kinds, so the list
// stays aligned no matter what is connected.

use crate::provider::{Provider, TournamentMembership};
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let inner_width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = app
        .roster
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let provider = &entry.provider;
            let code = provider
                .tournament_code()
                .map(|code| format!(" [{code}]"))
                .unwrap_or_default();
            let label = truncate(
                &format!(
                    "{} {}{}",
                    provider.kind().fixed_tag(),
                    provider.display_name(),
                    code
                ),
                inner_width,
            );

            let style = if app.selected == Some(i) {
                Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(label).style(style)
        })
        .collect();

    let title = format!(" Connected clients [{}] ", app.roster.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

/// Cut a label to the panel width without splitting a wide character.
fn truncate(label: &str, max_width: usize) -> String {
    if label.width() <= max_width {
        return label.to_string();
    }
    let mut out = String::new();
    for c in label.chars() {
        let candidate = format!("{out}{c}");
        if candidate.width() + 1 > max_width {
            break;
        }
        out = candidate;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_labels() {
        assert_eq!(truncate("[Engine] Gray", 40), "[Engine] Gray");
    }

    #[test]
    fn truncate_cuts_long_labels_with_ellipsis() {
        let cut = truncate("[Engine] A rather verbose engine name", 12);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 12);
    }
}
