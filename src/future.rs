//! Per-task completion synchronization.
//!
//! Every task carries its own mutex and condition variable, independent of
//! the pool lock and of every other task. The completion record is shared
//! between the executing worker and every [`TaskFuture`] handle, so a handle
//! stays valid regardless of ring-buffer slot reuse.

use crate::error::{Error, Result};
use crate::task::TaskId;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// What the worker publishes: the produced value, or the panic message.
pub(crate) type TaskOutcome<T> = std::result::Result<Arc<T>, String>;

pub(crate) struct Completion<T> {
    outcome: Mutex<Option<TaskOutcome<T>>>,
    ready: Condvar,
}

impl<T> Completion<T> {
    pub(crate) fn new() -> Self {
        Self {
            outcome: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    /// Publish the outcome and wake every waiter. Store then signal, both
    /// under the lock, so no waiter can observe the completion flag without
    /// also being able to read a fully written result.
    pub(crate) fn complete(&self, outcome: TaskOutcome<T>) {
        let mut slot = self.outcome.lock();
        debug_assert!(slot.is_none(), "task completed twice");
        *slot = Some(outcome);
        self.ready.notify_all();
    }
}

/// Caller-facing handle to a submitted task.
///
/// Cloneable; all clones refer to the same completion record. `wait` is safe
/// to call before or after completion and from multiple threads at once, and
/// repeated calls return the same result without re-executing the task.
pub struct TaskFuture<T> {
    id: TaskId,
    completion: Arc<Completion<T>>,
}

impl<T> TaskFuture<T> {
    pub(crate) fn new(id: TaskId, completion: Arc<Completion<T>>) -> Self {
        Self { id, completion }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Block until the task has executed, then return its result.
    ///
    /// Returns [`Error::TaskPanicked`] if the callable panicked.
    pub fn wait(&self) -> Result<Arc<T>> {
        let mut slot = self.completion.outcome.lock();
        loop {
            if let Some(outcome) = slot.as_ref() {
                return clone_outcome(outcome);
            }
            self.completion.ready.wait(&mut slot);
        }
    }

    /// Like [`wait`](Self::wait), but gives up after `timeout`. Returns
    /// `None` if the task has not completed in time.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<Arc<T>>> {
        let deadline = Instant::now() + timeout;
        let mut slot = self.completion.outcome.lock();
        loop {
            if let Some(outcome) = slot.as_ref() {
                return Some(clone_outcome(outcome));
            }
            if self
                .completion
                .ready
                .wait_until(&mut slot, deadline)
                .timed_out()
            {
                return slot.as_ref().map(clone_outcome);
            }
        }
    }

    /// Non-blocking check for the result.
    pub fn try_result(&self) -> Option<Result<Arc<T>>> {
        self.completion.outcome.lock().as_ref().map(clone_outcome)
    }

    pub fn is_complete(&self) -> bool {
        self.completion.outcome.lock().is_some()
    }
}

fn clone_outcome<T>(outcome: &TaskOutcome<T>) -> Result<Arc<T>> {
    match outcome {
        Ok(value) => Ok(value.clone()),
        Err(message) => Err(Error::TaskPanicked(message.clone())),
    }
}

impl<T> Clone for TaskFuture<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            completion: self.completion.clone(),
        }
    }
}

impl<T> std::fmt::Debug for TaskFuture<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskFuture")
            .field("id", &self.id)
            .field("complete", &self.is_complete())
            .finish()
    }
}
