// Events that flow from engine adapters to the TUI
//
// An adapter signals "redraw me" after every successful lifecycle call.
// The signal is an injected callback rather than a process-wide queue, so
// every consumer holds its own handle and tests can observe notifications
// directly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Stable identity of a wrapped provider, assigned at wrap time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderId(pub u64);

impl ProviderId {
    /// Allocate the next process-unique id.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Change-notification contract invoked by adapters.
///
/// May be called from whatever thread the wrapped engine computes on, so
/// implementations must be `Send + Sync` and must never block waiting on the
/// render loop.
pub type UpdateSignal = Arc<dyn Fn(ProviderId) + Send + Sync>;

/// An update signal backed by an unbounded channel.
///
/// `send` on an unbounded sender never blocks, which is exactly the
/// fire-and-forget semantics the adapter contract requires. A closed
/// receiver (TUI shut down) silently drops the signal.
pub fn channel_signal(tx: mpsc::UnboundedSender<ProviderId>) -> UpdateSignal {
    Arc::new(move |id| {
        let _ = tx.send(id);
    })
}

/// A signal that discards every notification, for tests that only care
/// about snapshot state.
#[cfg(test)]
pub fn noop_signal() -> UpdateSignal {
    Arc::new(|_| {})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_ids_are_unique() {
        let a = ProviderId::next();
        let b = ProviderId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn channel_signal_delivers_ids() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let signal = channel_signal(tx);
        let id = ProviderId::next();
        signal(id);
        assert_eq!(rx.try_recv().ok(), Some(id));
    }

    #[test]
    fn channel_signal_survives_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        let signal = channel_signal(tx);
        drop(rx);
        // Must not panic or block.
        signal(ProviderId::next());
    }
}
