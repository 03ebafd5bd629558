// worker thread loop

use crate::pool::PoolShared;
use crate::task::ExecOutcome;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub(crate) type WorkerId = usize;

// per-worker counters
#[derive(Debug, Default)]
pub(crate) struct WorkerState {
    pub(crate) tasks_executed: AtomicU64,
    pub(crate) tasks_panicked: AtomicU64,
}

/// Point-in-time view of one worker's activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    pub id: usize,
    pub tasks_executed: u64,
    pub tasks_panicked: u64,
}

pub(crate) struct Worker {
    pub(crate) id: WorkerId,
    shared: Arc<PoolShared>,
    pub(crate) state: Arc<WorkerState>,
}

impl Worker {
    pub(crate) fn new(id: WorkerId, shared: Arc<PoolShared>) -> Self {
        Self {
            id,
            shared,
            state: Arc::new(WorkerState::default()),
        }
    }

    // main loop: waiting -> running -> waiting, until shutdown + empty queue
    pub(crate) fn run(&self) {
        log::debug!("worker {} started", self.id);

        loop {
            let task = {
                let mut pool = self.shared.state.lock();
                loop {
                    if let Some(task) = pool.queue.pop() {
                        break task;
                    }
                    // Drain before exit: leave only once the queue is empty,
                    // so every accepted task still runs.
                    if pool.shutdown {
                        log::debug!("worker {} exiting, queue drained", self.id);
                        return;
                    }
                    // Spurious wakeups re-check both conditions above.
                    self.shared.work_available.wait(&mut pool);
                }
            };

            // Pool lock is released here; a slow task delays only this
            // worker, never queue operations or other workers.
            let id = task.id;
            match task.execute() {
                ExecOutcome::Completed => {
                    self.state.tasks_executed.fetch_add(1, Ordering::Relaxed);
                    self.shared.metrics.record_completed();
                }
                ExecOutcome::Panicked => {
                    self.state.tasks_executed.fetch_add(1, Ordering::Relaxed);
                    self.state.tasks_panicked.fetch_add(1, Ordering::Relaxed);
                    self.shared.metrics.record_panicked();
                    log::warn!("worker {}: task {:?} panicked", self.id, id);
                }
            }
        }
    }
}
