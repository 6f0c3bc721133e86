//! Stale-selection guard
//!
//! Interactive callers re-resolve whenever the selected container
//! changes, and a slow response for a previous selection must never
//! overwrite the locator for the current one. Each selection change
//! takes a [`Ticket`]; a result commits only while its ticket is still
//! the newest. A single atomic counter is the only shared state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic tag for one in-flight resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Tracks the current selection generation.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    generation: AtomicU64,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a selection change and tag the resolution it triggers.
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` still belongs to the current selection.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Commit a finished resolution, or discard it as stale.
    ///
    /// Returns the result only when `ticket` is still current; a stale
    /// result is dropped silently, which is the whole cancellation
    /// story for superseded resolutions.
    pub fn commit<T>(&self, ticket: Ticket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_current_ticket_commits() {
        let tracker = SelectionTracker::new();
        let ticket = tracker.begin();
        assert_eq!(tracker.commit(ticket, "locator-a"), Some("locator-a"));
    }

    #[test]
    fn test_superseded_ticket_is_discarded() {
        let tracker = SelectionTracker::new();
        let stale = tracker.begin();
        let current = tracker.begin();
        assert_eq!(tracker.commit(stale, "locator-a"), None);
        assert_eq!(tracker.commit(current, "locator-b"), Some("locator-b"));
    }

    #[test]
    fn test_tickets_are_monotonic() {
        let tracker = SelectionTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert_ne!(first, second);
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn test_at_most_one_late_result_commits() {
        // Many workers race to finish; only the newest selection's
        // result may ever commit.
        let tracker = Arc::new(SelectionTracker::new());
        let tickets: Vec<Ticket> = (0..8).map(|_| tracker.begin()).collect();

        let handles: Vec<_> = tickets
            .into_iter()
            .enumerate()
            .map(|(index, ticket)| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || tracker.commit(ticket, index))
            })
            .collect();

        let committed: Vec<usize> = handles
            .into_iter()
            .filter_map(|handle| handle.join().expect("worker panicked"))
            .collect();

        assert_eq!(committed, vec![7]);
    }
}
