// FEN module - decodes compact board-state strings into display data
//
// A monitored engine reports its game state as a single FEN line, e.g.
// "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2".
// Board state exists before a game starts and after a connection drops,
// so every field decodes to a documented fallback instead of an error.

/// An 8x8 grid of display cells, row-major with rank 8 first.
///
/// Cells hold the piece character verbatim (case encodes the side) or
/// `None` for an empty square. No piece-legality validation happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardGrid {
    squares: [[Option<char>; 8]; 8],
}

impl BoardGrid {
    /// The all-empty grid, used when no state string is available.
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Cell at (row, col) where row 0 is rank 8 and col 0 is file a.
    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        if row > 7 || col > 7 {
            return None;
        }
        self.squares[row][col]
    }

    /// Rank-major iteration, rank 8 first. Rendering indexes cells directly;
    /// this exists for whole-board scans.
    #[allow(dead_code)]
    pub fn rows(&self) -> impl Iterator<Item = &[Option<char>; 8]> {
        self.squares.iter()
    }
}

impl Default for BoardGrid {
    fn default() -> Self {
        Self::empty()
    }
}

/// En-passant target decoded from the fourth FEN field.
///
/// Three outcomes are distinguishable: the field said there is no target
/// (`-`), the field was absent or unparseable, or an actual square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnPassantTarget {
    /// Field present and `-`: no en-passant square this move.
    None,
    /// Field absent or unparseable.
    Unknown,
    /// The trimmed target square, e.g. `e3`.
    Square(String),
}

impl EnPassantTarget {
    /// Display form used in metrics: `---` for no target, blank for unknown.
    pub fn label(&self) -> &str {
        match self {
            EnPassantTarget::None => "---",
            EnPassantTarget::Unknown => "",
            EnPassantTarget::Square(sq) => sq,
        }
    }
}

/// Castling rights quad from the third FEN field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights {
    pub white_king: bool,
    pub white_queen: bool,
    pub black_king: bool,
    pub black_queen: bool,
}

/// Everything decoded from a state string besides piece placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMetadata {
    /// Fullmove number, -1 when missing or non-numeric.
    pub turn: i32,
    pub white_to_move: bool,
    pub castling: CastlingRights,
    pub en_passant: EnPassantTarget,
    /// Halfmove clock, -1 when missing or non-numeric.
    pub halfmove_clock: i32,
}

impl Default for StateMetadata {
    fn default() -> Self {
        Self {
            turn: -1,
            white_to_move: true,
            castling: CastlingRights::default(),
            en_passant: EnPassantTarget::Unknown,
            halfmove_clock: -1,
        }
    }
}

/// Decode a state string into a display grid and metadata.
///
/// Tolerates `None`, empty, truncated and malformed input; every field falls
/// back per its own rule and the grid is always normalized to 8x8.
pub fn decode(fen: Option<&str>) -> (BoardGrid, StateMetadata) {
    let Some(fen) = fen.filter(|s| !s.is_empty()) else {
        return (BoardGrid::empty(), StateMetadata::default());
    };

    let fields: Vec<&str> = fen.split(' ').collect();

    let grid = decode_placement(fields.first().copied().unwrap_or(""));

    let white_to_move = match fields.get(1).copied() {
        Some("b") | Some("B") => false,
        // Absent or unrecognized fails open to white.
        _ => true,
    };

    let castling = match fields.get(2) {
        Some(field) => CastlingRights {
            white_king: field.contains('K'),
            white_queen: field.contains('Q'),
            black_king: field.contains('k'),
            black_queen: field.contains('q'),
        },
        None => CastlingRights::default(),
    };

    let en_passant = match fields.get(3).map(|f| f.trim()) {
        Some("-") => EnPassantTarget::None,
        Some("") | None => EnPassantTarget::Unknown,
        Some(sq) => EnPassantTarget::Square(sq.to_string()),
    };

    let metadata = StateMetadata {
        turn: parse_counter(fields.get(5)),
        white_to_move,
        castling,
        en_passant,
        halfmove_clock: parse_counter(fields.get(4)),
    };

    (grid, metadata)
}

/// Expand the placement field into an 8x8 grid.
///
/// Digits expand to empty cells, `/` starts a new row, everything else is an
/// occupied cell kept verbatim. Rows are padded or truncated to 8 so callers
/// can index without bounds checks even on garbage input.
fn decode_placement(placement: &str) -> BoardGrid {
    let mut squares = [[None; 8]; 8];
    let mut row = 0usize;
    let mut col = 0usize;

    for c in placement.chars() {
        if c == '/' {
            row += 1;
            col = 0;
            if row > 7 {
                break;
            }
        } else if let Some(n) = c.to_digit(10) {
            col = (col + n as usize).min(8);
        } else {
            if col < 8 {
                squares[row][col] = Some(c);
            }
            col += 1;
        }
    }

    BoardGrid { squares }
}

fn parse_counter(field: Option<&&str>) -> i32 {
    field.and_then(|f| f.parse::<i32>().ok()).unwrap_or(-1)
}
