//! Task representation and execution.

use crate::future::{Completion, TaskFuture};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Global task ID counter
static TASK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn next() -> Self {
        TaskId(TASK_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// How a task's callable finished, as seen by the executing worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExecOutcome {
    Completed,
    Panicked,
}

/// Internal task representation: a type-erased callable that publishes its
/// outcome into the completion record shared with the caller's handle.
pub(crate) struct Task {
    pub(crate) id: TaskId,
    func: Box<dyn FnOnce() -> ExecOutcome + Send + 'static>,
    pub(crate) submitted_at: Instant,
}

impl Task {
    /// Create a task and the future handle paired with it.
    ///
    /// The callable runs under `catch_unwind` so a panicking task completes
    /// its future (with the panic message) instead of stranding waiters.
    pub(crate) fn new<F, T>(f: F) -> (Self, TaskFuture<T>)
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + Sync + 'static,
    {
        let id = TaskId::next();
        let completion = Arc::new(Completion::new());
        let future = TaskFuture::new(id, completion.clone());

        let func = Box::new(move || match catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => {
                completion.complete(Ok(Arc::new(value)));
                ExecOutcome::Completed
            }
            Err(payload) => {
                completion.complete(Err(panic_message(payload)));
                ExecOutcome::Panicked
            }
        });

        let task = Task {
            id,
            func,
            submitted_at: Instant::now(),
        };

        (task, future)
    }

    /// Execute the task. Must be called without holding the pool lock.
    pub(crate) fn execute(self) -> ExecOutcome {
        (self.func)()
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("submitted_at", &self.submitted_at)
            .finish()
    }
}
