// App state - what the TUI knows between frames
//
// App is a thin orchestrator: it owns the provider roster, the selection,
// and a few counters. Everything game-related is read through the selected
// provider's capabilities at render time, never cached here.

use crate::events::ProviderId;
use crate::logging::LogBuffer;
use crate::provider::{NullProvider, Provider};
use std::sync::Arc;
use std::time::Instant;

/// A monitored client in the roster.
pub struct RosterEntry {
    pub id: ProviderId,
    pub provider: Arc<dyn Provider>,
}

/// Application state
pub struct App {
    /// Connected clients in registration order.
    pub roster: Vec<RosterEntry>,
    /// Selected roster index; `None` when the roster is empty.
    pub selected: Option<usize>,
    pub log_buffer: LogBuffer,
    /// Board width/height correction passed to the layout engine.
    pub aspect_factor: f32,
    pub should_quit: bool,
    /// Update signals received since startup.
    pub update_count: u64,
    start_time: Instant,
    null_provider: NullProvider,
}

impl App {
    pub fn new(log_buffer: LogBuffer, aspect_factor: f32, roster: Vec<RosterEntry>) -> Self {
        let selected = if roster.is_empty() { None } else { Some(0) };
        Self {
            roster,
            selected,
            log_buffer,
            aspect_factor,
            should_quit: false,
            update_count: 0,
            start_time: Instant::now(),
            null_provider: NullProvider,
        }
    }

    /// The provider whose state the board and metrics panels show.
    ///
    /// Falls back to the inert null provider so rendering code never
    /// branches on "nothing selected".
    pub fn current(&self) -> &dyn Provider {
        match self.selected.and_then(|i| self.roster.get(i)) {
            Some(entry) => entry.provider.as_ref(),
            None => &self.null_provider,
        }
    }

    pub fn select_next(&mut self) {
        if self.roster.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.roster.len(),
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.roster.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => self.roster.len() - 1,
            Some(i) => i - 1,
        });
    }

    /// Record an update signal from an adapter.
    pub fn record_update(&mut self, id: ProviderId) {
        self.update_count += 1;
        tracing::trace!("update signal from provider {:?}", id);
    }

    /// Uptime as H:MM:SS for the status bar.
    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::demo::DemoEngine;
    use crate::events::noop_signal;
    use crate::provider::adapter::EngineAdapter;
    use crate::provider::{BoardState, ProviderKind};

    fn roster_of(names: &[&str]) -> Vec<RosterEntry> {
        names
            .iter()
            .map(|name| {
                let adapter = EngineAdapter::wrap(DemoEngine::named(name), noop_signal(), None);
                RosterEntry {
                    id: adapter.id(),
                    provider: adapter,
                }
            })
            .collect()
    }

    #[test]
    fn empty_roster_falls_back_to_null_provider() {
        let app = App::new(LogBuffer::new(), 2.0, Vec::new());
        assert_eq!(app.selected, None);
        assert_eq!(app.current().kind(), ProviderKind::Unknown);
        assert_eq!(app.current().fen(), None);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut app = App::new(LogBuffer::new(), 2.0, roster_of(&["Gray", "Ivory"]));
        assert_eq!(app.selected, Some(0));
        app.select_next();
        assert_eq!(app.selected, Some(1));
        app.select_next();
        assert_eq!(app.selected, Some(0));
        app.select_previous();
        assert_eq!(app.selected, Some(1));
        assert_eq!(app.current().display_name(), "Ivory");
    }
}
