// Board layout math for the TUI.
//
// Terminal cells are roughly twice as tall as they are wide, so a square
// board needs an aspect correction before it tiles into a viewport. All of
// this is pure arithmetic - no widget types - so it can be tested without a
// terminal.

/// Responsive breakpoint for panel formatting decisions.
///
/// Single source of truth for width thresholds - no magic numbers scattered
/// in render code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 70 cols: split pane, minimal terminal
    Compact,
    /// 70-119 cols: half-screen
    Normal,
    /// 120+ cols: full terminal
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=69 => Breakpoint::Compact,
            70..=119 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
        }
    }
}

/// How an 8x8 board tiles into a viewport.
///
/// Recomputed on every layout pass; nothing here survives a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGeometry {
    pub tile_w: u16,
    pub tile_h: u16,
    /// Final board dimensions, always an exact multiple of the tile size.
    pub board_w: u16,
    pub board_h: u16,
    /// Top-left of the board within the viewport.
    pub offset_x: u16,
    pub offset_y: u16,
    /// Frame margin around the board.
    pub margin_x: u16,
    pub margin_y: u16,
}

/// Fit an 8x8 board into `viewport_w` x `viewport_h`, keeping `status_rows`
/// free at the top and correcting for cell shape with `aspect_factor`
/// (board width = height x factor).
///
/// Preference order: reproduce the true aspect ratio from the drawable
/// height; when that overflows the width, clamp to the width and fall back
/// to a fixed half-ratio height. Tiles never go below 1x1, so degenerate
/// viewports yield a minimum board instead of an error.
pub fn board_layout(
    viewport_w: u16,
    viewport_h: u16,
    status_rows: u16,
    aspect_factor: f32,
) -> TileGeometry {
    let drawable_h = viewport_h.saturating_sub(status_rows) as i32;

    let mut board_h = drawable_h;
    let mut board_w = (drawable_h as f32 * aspect_factor) as i32;
    if board_w > viewport_w as i32 {
        board_w = viewport_w as i32;
        board_h = board_w / 2;
    }

    let (margin_x, margin_y) = margins(aspect_factor);

    let tile_w = ((board_w - 2 * margin_x as i32) / 8).max(1) as u16;
    let tile_h = ((board_h - 2 * margin_y as i32) / 8).max(1) as u16;

    // Recompute so the grid tiles exactly, discarding the remainder.
    let board_w = tile_w * 8;
    let board_h = tile_h * 8;

    let offset_x = (viewport_w as i32 - board_w as i32).max(0) as u16 / 2;
    let offset_y = (drawable_h - board_h as i32).max(0) as u16 / 2 + status_rows;

    TileGeometry {
        tile_w,
        tile_h,
        board_w,
        board_h,
        offset_x,
        offset_y,
        margin_x,
        margin_y,
    }
}

/// Frame margins derived from the aspect factor; both are at least 1.
fn margins(aspect_factor: f32) -> (u16, u16) {
    if aspect_factor >= 1.0 {
        ((aspect_factor.round() as u16).max(1), 1)
    } else {
        (1, ((1.0 / aspect_factor).round() as u16).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(69), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(70), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(119), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(120), Breakpoint::Wide);
        assert!(Breakpoint::Wide.at_least(Breakpoint::Normal));
        assert!(!Breakpoint::Compact.at_least(Breakpoint::Normal));
    }

    #[test]
    fn height_constrained_layout_keeps_true_aspect() {
        let geo = board_layout(80, 26, 1, 2.0);
        // drawable 25 rows, target 50x25, margins 2x1
        assert_eq!(geo.tile_w, 5);
        assert_eq!(geo.tile_h, 2);
        assert_eq!(geo.board_w, 40);
        assert_eq!(geo.board_h, 16);
        assert_eq!(geo.offset_x, 20);
        assert_eq!(geo.offset_y, 5);
        assert_eq!((geo.margin_x, geo.margin_y), (2, 1));
    }

    #[test]
    fn width_constrained_layout_falls_back_to_half_ratio() {
        let geo = board_layout(30, 20, 1, 2.0);
        // target 38x19 overflows, clamp to 30 wide, 15 tall
        assert_eq!(geo.tile_w, 3);
        assert_eq!(geo.tile_h, 1);
        assert_eq!(geo.board_w, 24);
        assert_eq!(geo.board_h, 8);
        assert_eq!(geo.offset_x, 3);
        assert_eq!(geo.offset_y, 6);
    }

    #[test]
    fn tiles_never_collapse_below_one() {
        for (w, h) in [(0, 0), (1, 1), (4, 3), (16, 16), (9, 40)] {
            let geo = board_layout(w, h, 1, 2.0);
            assert!(geo.tile_w >= 1, "tile_w at {}x{}", w, h);
            assert!(geo.tile_h >= 1, "tile_h at {}x{}", w, h);
            assert_eq!(geo.board_w, geo.tile_w * 8);
            assert_eq!(geo.board_h, geo.tile_h * 8);
        }
    }

    #[test]
    fn board_fits_viewport_when_reasonably_sized() {
        for w in 16..140u16 {
            for h in 16..=w {
                let geo = board_layout(w, h, 1, 2.0);
                assert!(geo.board_w <= w, "board {} wider than viewport {}", geo.board_w, w);
                assert!(geo.tile_w >= 1 && geo.tile_h >= 1);
            }
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let a = board_layout(123, 45, 2, 1.8);
        let b = board_layout(123, 45, 2, 1.8);
        assert_eq!(a, b);
    }

    #[test]
    fn narrow_aspect_flips_margins() {
        let geo = board_layout(40, 40, 0, 0.5);
        assert_eq!((geo.margin_x, geo.margin_y), (1, 2));
    }

    #[test]
    fn status_rows_shift_the_board_down() {
        let without = board_layout(80, 26, 0, 2.0);
        let with = board_layout(80, 26, 3, 2.0);
        assert!(with.offset_y >= 3);
        assert!(without.offset_y < with.offset_y + 3);
    }
}
