// Board panel component
//
// Renders the selected provider's position: a status row with both players
// and the turn counter, then the tiled 8x8 board with coordinate labels and
// piece glyphs. Geometry comes from the pure layout function; this module
// only paints.

use crate::provider::{BoardState, Identity, Timing};
use crate::tui::app::App;
use crate::tui::layout::{board_layout, TileGeometry};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Rows at the top of the panel reserved for the player status line.
const STATUS_ROWS: u16 = 1;

const TILE_LIGHT: Color = Color::Cyan;
const TILE_DARK: Color = Color::Blue;
const FRAME_COLOR: Color = Color::Green;
const LABEL_COLOR: Color = Color::Red;

/// Render the board panel into `area`.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let geo = board_layout(
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
        STATUS_ROWS,
        app.aspect_factor,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Board ")
        .title_bottom(format!(
            " {}x{}; tile {}x{} ",
            geo.board_w, geo.board_h, geo.tile_w, geo.tile_h
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    render_status_row(f, inner, app);
    render_tiles(f, inner, app, &geo);
}

/// Player names, clocks and turn counter; the side to move renders bold.
fn render_status_row(f: &mut Frame, inner: Rect, app: &App) {
    let provider = app.current();
    let white_to_move = provider.white_turn();

    let white_text = format!("{} {}s", provider.white_name(), provider.white_time());
    let black_text = format!("{} {}s", provider.black_name(), provider.black_time());
    let mid_text = format!("Turn: {}", provider.turn());

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let plain = Style::default();

    let width = inner.width as usize;
    let left_w = white_text.width();
    let mid_w = mid_text.width();
    let right_w = black_text.width();

    // Center the turn counter, push the clocks to the edges.
    let gap_left = (width / 2).saturating_sub(left_w + mid_w / 2);
    let gap_right = width
        .saturating_sub(left_w + gap_left + mid_w + right_w);

    let line = Line::from(vec![
        Span::styled(white_text, if white_to_move { bold } else { plain }),
        Span::raw(" ".repeat(gap_left)),
        Span::styled(mid_text, bold),
        Span::raw(" ".repeat(gap_right)),
        Span::styled(black_text, if white_to_move { plain } else { bold }),
    ]);

    let row = Rect::new(inner.x, inner.y, inner.width, 1);
    f.render_widget(Paragraph::new(line), row);
}

/// Paint the frame, the 64 tiles, coordinate labels and piece glyphs.
fn render_tiles(f: &mut Frame, inner: Rect, app: &App, geo: &TileGeometry) {
    let board = app.current().board();

    // Frame behind the board, one margin wide on each side.
    let frame_rect = clipped(
        inner,
        geo.offset_x.saturating_sub(geo.margin_x),
        geo.offset_y.saturating_sub(geo.margin_y),
        geo.board_w + 2 * geo.margin_x,
        geo.board_h + 2 * geo.margin_y,
    );
    f.render_widget(
        Block::default().style(Style::default().bg(FRAME_COLOR)),
        frame_rect,
    );

    for x in 0..8u16 {
        for y in 0..8u16 {
            let tile_color = if (x + y) % 2 == 0 { TILE_LIGHT } else { TILE_DARK };
            let tile = clipped(
                inner,
                geo.offset_x + x * geo.tile_w,
                geo.offset_y + y * geo.tile_h,
                geo.tile_w,
                geo.tile_h,
            );
            if tile.width == 0 || tile.height == 0 {
                continue;
            }
            f.render_widget(Block::default().style(Style::default().bg(tile_color)), tile);

            // Square name in the tile corner, e.g. a8 on the top-left tile.
            if tile.width >= 2 {
                let label = format!("{}{}", (b'a' + x as u8) as char, 8 - y);
                let label_rect = Rect::new(tile.x, tile.y, 2, 1);
                f.render_widget(
                    Paragraph::new(label).style(
                        Style::default()
                            .fg(LABEL_COLOR)
                            .bg(tile_color)
                            .add_modifier(Modifier::BOLD),
                    ),
                    label_rect,
                );
            }

            // Piece glyph centered on the tile; case picks the side color.
            if let Some(piece) = board.cell(y as usize, x as usize) {
                let fg = if piece.is_lowercase() { Color::Black } else { Color::White };
                let glyph_rect = Rect::new(
                    tile.x + tile.width / 2,
                    tile.y + tile.height / 2,
                    1,
                    1,
                );
                f.render_widget(
                    Paragraph::new(piece.to_ascii_uppercase().to_string()).style(
                        Style::default()
                            .fg(fg)
                            .bg(tile_color)
                            .add_modifier(Modifier::BOLD),
                    ),
                    glyph_rect,
                );
            }
        }
    }
}

/// Rect at an offset within `inner`, clipped to stay inside it.
fn clipped(inner: Rect, dx: u16, dy: u16, w: u16, h: u16) -> Rect {
    let x = inner.x.saturating_add(dx).min(inner.right());
    let y = inner.y.saturating_add(dy).min(inner.bottom());
    let w = w.min(inner.right().saturating_sub(x));
    let h = h.min(inner.bottom().saturating_sub(y));
    Rect::new(x, y, w, h)
}
