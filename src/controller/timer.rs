//! Tick scheduling.
//!
//! The controller asks a [`TickScheduler`] for a single delayed tick at a
//! time and gets back a [`TickHandle`]. When the tick fires, the handle is
//! passed back to the controller, which ignores any handle it no longer
//! considers pending.

use std::time::Duration;
use tokio::time::Instant;

/// Identifies one scheduled tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Timer service used by the controller
pub trait TickScheduler {
    /// Arrange for a tick after `delay`
    fn schedule_after(&mut self, delay: Duration) -> TickHandle;
    /// Drop a scheduled tick. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

/// Scheduler driven by hand. Every scheduled tick is kept until it is fired
/// or cancelled, so tests can see duplicates.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<(TickHandle, Duration)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest pending tick and its delay
    pub fn pending(&self) -> Option<(TickHandle, Duration)> {
        self.pending.first().copied()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Remove the oldest pending tick and return its handle
    pub fn fire(&mut self) -> Option<TickHandle> {
        if self.pending.is_empty() {
            return None;
        }
        Some(self.pending.remove(0).0)
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.pending.push((handle, delay));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.pending.retain(|(pending, _)| *pending != handle);
    }
}

/// Scheduler for the tokio run loop. It only records the deadline; the
/// loop sleeps until [`TokioScheduler::deadline`] and then calls
/// [`TokioScheduler::take_due`].
#[derive(Debug, Default)]
pub struct TokioScheduler {
    next_id: u64,
    pending: Option<(TickHandle, Instant)>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, deadline)| deadline)
    }

    /// Take the pending tick if its deadline has passed
    pub fn take_due(&mut self) -> Option<TickHandle> {
        match self.pending {
            Some((handle, deadline)) if deadline <= Instant::now() => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }
}

impl TickScheduler for TokioScheduler {
    fn schedule_after(&mut self, delay: Duration) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some((handle, Instant::now() + delay));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_fires_in_order() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.schedule_after(Duration::from_millis(100));
        let second = scheduler.schedule_after(Duration::from_millis(50));

        assert_ne!(first, second);
        assert_eq!(scheduler.pending(), Some((first, Duration::from_millis(100))));
        assert_eq!(scheduler.fire(), Some(first));
        assert_eq!(scheduler.fire(), Some(second));
        assert_eq!(scheduler.fire(), None);
    }

    #[test]
    fn test_manual_scheduler_cancel() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule_after(Duration::from_millis(100));
        scheduler.cancel(handle);
        scheduler.cancel(handle);

        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.fire(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_deadline() {
        let mut scheduler = TokioScheduler::new();
        let handle = scheduler.schedule_after(Duration::from_millis(200));

        assert!(scheduler.deadline().is_some());
        assert_eq!(scheduler.take_due(), None);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(scheduler.take_due(), Some(handle));
        assert_eq!(scheduler.deadline(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_cancel_is_reliable() {
        let mut scheduler = TokioScheduler::new();
        let stale = scheduler.schedule_after(Duration::from_millis(10));
        let fresh = scheduler.schedule_after(Duration::from_millis(10));

        // Cancelling a replaced handle leaves the newer tick alone
        scheduler.cancel(stale);
        assert!(scheduler.deadline().is_some());

        scheduler.cancel(fresh);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(scheduler.take_due(), None);
    }
}
