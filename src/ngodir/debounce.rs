//! Trailing debounce for free-text search.
//!
//! Each [`Debouncer::push`] supersedes whatever was pending and restarts the
//! delay; nothing is queued. A generation counter identifies the latest push,
//! so a caller holding an older generation can tell its value was replaced.
//!
//! Time is passed in rather than read, which keeps the debouncer usable from
//! any event loop and deterministic in tests.

use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug)]
struct Pending<T> {
    value: T,
    due: Instant,
}

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
    generation: u64,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DELAY)
    }
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            generation: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending value; returns the generation of this push.
    pub fn push(&mut self, value: T, now: Instant) -> u64 {
        self.generation += 1;
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Yields the pending value once its delay has elapsed, exactly once.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Yields the pending value immediately, ignoring the delay.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn waits_for_the_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(300 * MS);
        debouncer.push("t", start);

        assert_eq!(debouncer.poll(start + 299 * MS), None);
        assert_eq!(debouncer.poll(start + 300 * MS), Some("t"));
        assert_eq!(debouncer.poll(start + 900 * MS), None);
    }

    #[test]
    fn new_push_supersedes_pending_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(300 * MS);
        let first = debouncer.push("t", start);
        let second = debouncer.push("tr", start + 200 * MS);
        assert!(second > first);

        // The first deadline passes without anything firing.
        assert_eq!(debouncer.poll(start + 350 * MS), None);
        assert_eq!(debouncer.poll(start + 500 * MS), Some("tr"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn flush_and_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(300 * MS);
        debouncer.push(1, start);
        assert_eq!(debouncer.flush(), Some(1));

        debouncer.push(2, start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + 1000 * MS), None);
        assert_eq!(debouncer.deadline(), None);
    }
}
