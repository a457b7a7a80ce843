// Provider module - capability model for monitored clients
//
// Instead of the monitor knowing what each connected client can report, a
// client declares narrow read-only capabilities and the UI renders whatever
// is there. Classification into a provider kind is a pure function of the
// declared capability set, checked in a fixed priority order.

pub mod adapter;

use crate::fen::{self, BoardGrid, CastlingRights, EnPassantTarget, StateMetadata};

/// Placeholder shown wherever a display name is not yet known.
pub const NAME_PLACEHOLDER: &str = "---";

// ─────────────────────────────────────────────────────────────────────────────
// Capability traits
// ─────────────────────────────────────────────────────────────────────────────

/// Display names of both sides of the current game.
pub trait Identity {
    fn white_name(&self) -> String;
    fn black_name(&self) -> String;
}

/// The client's reported board state plus accessors derived from it.
///
/// The derived accessors re-decode the current fen on every read; nothing is
/// cached, so readers always see the latest published state.
pub trait BoardState {
    /// Latest reported state string, `None` before the first move request.
    fn fen(&self) -> Option<String>;

    fn board(&self) -> BoardGrid {
        fen::decode(self.fen().as_deref()).0
    }

    fn metadata(&self) -> StateMetadata {
        fen::decode(self.fen().as_deref()).1
    }

    /// Fullmove number, -1 when unknown.
    fn turn(&self) -> i32 {
        self.metadata().turn
    }

    fn white_turn(&self) -> bool {
        self.metadata().white_to_move
    }

    fn castling(&self) -> CastlingRights {
        self.metadata().castling
    }

    fn en_passant(&self) -> EnPassantTarget {
        self.metadata().en_passant
    }

    /// Halfmove clock, -1 when unknown.
    fn halfmove_clock(&self) -> i32 {
        self.metadata().halfmove_clock
    }
}

/// Remaining seconds per side, -1 when unknown.
pub trait Timing {
    fn white_time(&self) -> i64;
    fn black_time(&self) -> i64;
}

/// Ordered label/value pairs shown in the metrics table.
pub trait Metrics {
    fn metrics(&self) -> Vec<(String, String)>;
}

/// Whether the client asked for a repaint outside the notification bus.
pub trait RefreshSignal {
    fn need_refresh(&self) -> bool;
}

/// Tournament participation, if any.
pub trait TournamentMembership {
    fn tournament_code(&self) -> Option<String> {
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Capability set and classification
// ─────────────────────────────────────────────────────────────────────────────

/// The individually declarable capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Identity,
    BoardState,
    Timing,
    Metrics,
    RefreshSignal,
    TournamentMembership,
}

/// A provider's declared capability set, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn with(self, cap: Capability) -> Self {
        Self(self.0 | 1u8 << cap as u8)
    }

    pub const fn contains(self, cap: Capability) -> bool {
        self.0 & (1u8 << cap as u8) != 0
    }

    pub fn satisfies(self, required: &[Capability]) -> bool {
        required.iter().all(|cap| self.contains(*cap))
    }
}

/// Kind tag derived from a provider's declared capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Engine,
    Spectator,
    Unknown,
}

/// Classification order and the capability set each kind requires.
/// First match wins; a provider satisfying several sets gets the earliest.
const KIND_PRIORITY: &[(ProviderKind, &[Capability])] = &[
    (
        ProviderKind::Engine,
        &[
            Capability::Identity,
            Capability::BoardState,
            Capability::Timing,
            Capability::Metrics,
            Capability::RefreshSignal,
            Capability::TournamentMembership,
        ],
    ),
    (
        ProviderKind::Spectator,
        &[
            Capability::Identity,
            Capability::BoardState,
            Capability::Timing,
            Capability::RefreshSignal,
        ],
    ),
];

impl ProviderKind {
    /// Classify a declared capability set. Pure: same set, same kind.
    pub fn classify(caps: CapabilitySet) -> Self {
        for (kind, required) in KIND_PRIORITY {
            if caps.satisfies(required) {
                return *kind;
            }
        }
        ProviderKind::Unknown
    }

    fn tag(&self) -> &'static str {
        match self {
            ProviderKind::Engine => "Engine",
            ProviderKind::Spectator => "Spec",
            ProviderKind::Unknown => "",
        }
    }

    /// Width of the longest tag, so list rendering stays aligned no matter
    /// which kinds are present.
    fn tag_width() -> usize {
        [ProviderKind::Engine, ProviderKind::Spectator]
            .iter()
            .map(|k| k.tag().len())
            .max()
            .unwrap_or(1)
    }

    /// Bracketed fixed-width tag; Unknown renders as a run of `?`.
    pub fn fixed_tag(&self) -> String {
        let width = Self::tag_width();
        match self {
            ProviderKind::Unknown => format!("[{}]", "?".repeat(width)),
            kind => format!("[{:^width$}]", kind.tag()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider supertrait
// ─────────────────────────────────────────────────────────────────────────────

/// Everything the rendering layer may ask of a connected client.
///
/// `capabilities` reports which of the accessors are genuinely backed; the
/// rest answer with inert defaults so callers never branch on absence.
pub trait Provider:
    Identity + BoardState + Timing + Metrics + RefreshSignal + TournamentMembership + Send + Sync
{
    fn capabilities(&self) -> CapabilitySet;

    /// Name shown in the client list.
    fn display_name(&self) -> String;

    fn kind(&self) -> ProviderKind {
        ProviderKind::classify(self.capabilities())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Null provider
// ─────────────────────────────────────────────────────────────────────────────

/// Inert provider used whenever no client is selected.
///
/// Every accessor answers with its documented fallback, so the board and
/// metrics panels render an empty state without special-casing.
#[derive(Debug, Default)]
pub struct NullProvider;

impl Identity for NullProvider {
    fn white_name(&self) -> String {
        NAME_PLACEHOLDER.to_string()
    }

    fn black_name(&self) -> String {
        NAME_PLACEHOLDER.to_string()
    }
}

impl BoardState for NullProvider {
    fn fen(&self) -> Option<String> {
        None
    }
}

impl Timing for NullProvider {
    fn white_time(&self) -> i64 {
        -1
    }

    fn black_time(&self) -> i64 {
        -1
    }
}

impl Metrics for NullProvider {
    fn metrics(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

impl RefreshSignal for NullProvider {
    fn need_refresh(&self) -> bool {
        false
    }
}

impl TournamentMembership for NullProvider {}

impl Provider for NullProvider {
    fn capabilities(&self) -> CapabilitySet {
        // Declares nothing: the sentinel must never classify as a real kind.
        CapabilitySet::empty()
    }

    fn display_name(&self) -> String {
        NAME_PLACEHOLDER.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_set() -> CapabilitySet {
        CapabilitySet::empty()
            .with(Capability::Identity)
            .with(Capability::BoardState)
            .with(Capability::Timing)
            .with(Capability::Metrics)
            .with(Capability::RefreshSignal)
            .with(Capability::TournamentMembership)
    }

    #[test]
    fn engine_set_classifies_engine() {
        assert_eq!(ProviderKind::classify(full_set()), ProviderKind::Engine);
    }

    #[test]
    fn spectator_set_classifies_spectator() {
        let caps = CapabilitySet::empty()
            .with(Capability::Identity)
            .with(Capability::BoardState)
            .with(Capability::Timing)
            .with(Capability::RefreshSignal);
        assert_eq!(ProviderKind::classify(caps), ProviderKind::Spectator);
    }

    #[test]
    fn full_set_satisfies_both_kinds_but_first_match_wins() {
        let caps = full_set();
        // Precondition: the set satisfies the spectator requirements too.
        assert!(caps.satisfies(KIND_PRIORITY[1].1));
        assert_eq!(ProviderKind::classify(caps), ProviderKind::Engine);
    }

    #[test]
    fn empty_set_is_unknown() {
        assert_eq!(ProviderKind::classify(CapabilitySet::empty()), ProviderKind::Unknown);
    }

    #[test]
    fn fixed_tags_share_one_width() {
        let tags = [
            ProviderKind::Engine.fixed_tag(),
            ProviderKind::Spectator.fixed_tag(),
            ProviderKind::Unknown.fixed_tag(),
        ];
        assert_eq!(tags[0], "[Engine]");
        assert_eq!(tags[1], "[ Spec ]");
        assert_eq!(tags[2], "[??????]");
        assert!(tags.iter().all(|t| t.len() == tags[0].len()));
    }

    #[test]
    fn null_provider_reports_inert_defaults() {
        let null = NullProvider;
        assert_eq!(null.fen(), None);
        assert_eq!(null.white_name(), NAME_PLACEHOLDER);
        assert_eq!(null.black_name(), NAME_PLACEHOLDER);
        assert_eq!(null.white_time(), -1);
        assert_eq!(null.black_time(), -1);
        assert!(!null.need_refresh());
        assert!(null.metrics().is_empty());
        assert_eq!(null.tournament_code(), None);
        assert_eq!(null.kind(), ProviderKind::Unknown);
    }

    #[test]
    fn null_provider_board_is_empty_grid() {
        let null = NullProvider;
        let board = null.board();
        assert!(board.rows().flatten().all(|c| c.is_none()));
        assert!(null.white_turn());
        assert_eq!(null.turn(), -1);
    }
}
