//! Pool-wide counters for runtime monitoring.

use std::sync::atomic::{AtomicU64, Ordering};

/// Internal counter set, updated by submitters and workers.
#[derive(Debug, Default)]
pub(crate) struct Metrics {
    tasks_submitted: AtomicU64,
    tasks_rejected: AtomicU64,
    tasks_completed: AtomicU64,
    tasks_panicked: AtomicU64,
}

impl Metrics {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_submitted(&self) {
        self.tasks_submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.tasks_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_completed(&self) {
        self.tasks_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_panicked(&self) {
        self.tasks_panicked.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, pending: usize) -> PoolMetrics {
        PoolMetrics {
            tasks_submitted: self.tasks_submitted.load(Ordering::Relaxed),
            tasks_rejected: self.tasks_rejected.load(Ordering::Relaxed),
            tasks_completed: self.tasks_completed.load(Ordering::Relaxed),
            tasks_panicked: self.tasks_panicked.load(Ordering::Relaxed),
            pending,
        }
    }
}

/// Point-in-time snapshot of pool activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolMetrics {
    /// Tasks accepted into the queue.
    pub tasks_submitted: u64,
    /// Submissions rejected because the queue was full or the pool was
    /// shutting down.
    pub tasks_rejected: u64,
    /// Tasks whose callable ran to completion.
    pub tasks_completed: u64,
    /// Tasks whose callable panicked.
    pub tasks_panicked: u64,
    /// Tasks queued but not yet dequeued at snapshot time.
    pub pending: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = Metrics::new();
        metrics.record_submitted();
        metrics.record_submitted();
        metrics.record_completed();
        metrics.record_rejected();
        metrics.record_panicked();

        let snapshot = metrics.snapshot(1);
        assert_eq!(snapshot.tasks_submitted, 2);
        assert_eq!(snapshot.tasks_completed, 1);
        assert_eq!(snapshot.tasks_rejected, 1);
        assert_eq!(snapshot.tasks_panicked, 1);
        assert_eq!(snapshot.pending, 1);
    }
}
