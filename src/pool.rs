//! The pool controller: owns the bounded queue and the worker set.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::future::TaskFuture;
use crate::metrics::{Metrics, PoolMetrics};
use crate::queue::RingBuffer;
use crate::task::Task;
use crate::worker::{Worker, WorkerId, WorkerState, WorkerStats};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Queue metadata guarded by the pool lock. The lock covers only this
/// struct; task execution never happens while it is held.
pub(crate) struct PoolState {
    pub(crate) queue: RingBuffer,
    pub(crate) shutdown: bool,
}

/// State shared between the controller and its workers.
pub(crate) struct PoolShared {
    pub(crate) state: Mutex<PoolState>,
    pub(crate) work_available: Condvar,
    pub(crate) metrics: Metrics,
}

struct WorkerHandle {
    id: WorkerId,
    thread: Option<JoinHandle<()>>,
    state: Arc<WorkerState>,
}

/// A fixed set of long-lived worker threads consuming a bounded FIFO queue.
///
/// Each submitted callable returns a [`TaskFuture`] the submitter can block
/// on. `submit` never blocks; it rejects when the queue is full or the pool
/// is shutting down. [`shutdown`](ThreadPool::shutdown) drains every
/// accepted task before joining the workers.
///
/// The pool is a self-contained object; a process may run any number of
/// independent pools.
pub struct ThreadPool {
    shared: Arc<PoolShared>,
    workers: Vec<WorkerHandle>,
    num_threads: usize,
    queue_capacity: usize,
    shut_down: bool,
}

impl ThreadPool {
    /// Create a pool with `thread_count` workers and a queue of
    /// `queue_capacity` slots. Both must be positive.
    pub fn new(thread_count: usize, queue_capacity: usize) -> Result<Self> {
        let config = Config {
            thread_count: Some(thread_count),
            queue_capacity,
            ..Default::default()
        };
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let num_threads = config.worker_threads();
        let queue_capacity = config.queue_capacity;

        let shared = Arc::new(PoolShared {
            state: Mutex::new(PoolState {
                queue: RingBuffer::new(queue_capacity),
                shutdown: false,
            }),
            work_available: Condvar::new(),
            metrics: Metrics::new(),
        });

        let mut workers = Vec::with_capacity(num_threads);
        for id in 0..num_threads {
            let worker = Worker::new(id, shared.clone());
            let state = worker.state.clone();
            let name = format!("{}-{}", config.thread_name_prefix, id);

            let mut builder = thread::Builder::new().name(name);
            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            match builder.spawn(move || worker.run()) {
                Ok(thread) => workers.push(WorkerHandle {
                    id,
                    thread: Some(thread),
                    state,
                }),
                Err(e) => {
                    // Partial pool: tear down what was already spawned and
                    // report failure, same path as shutdown.
                    halt_workers(&shared, &mut workers);
                    return Err(Error::executor(format!("spawn failed: {}", e)));
                }
            }
        }

        Ok(Self {
            shared,
            workers,
            num_threads,
            queue_capacity,
            shut_down: false,
        })
    }

    /// Enqueue a callable for execution on some worker.
    ///
    /// Returns the future paired with the task, or rejects with
    /// [`Error::QueueFull`] / [`Error::ShuttingDown`]. Never blocks, and a
    /// rejection leaves queue state untouched.
    pub fn submit<F, T>(&self, f: F) -> Result<TaskFuture<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + Sync + 'static,
    {
        let (task, future) = Task::new(f);

        let mut state = self.shared.state.lock();
        if state.shutdown {
            self.shared.metrics.record_rejected();
            log::debug!("task {:?} rejected: pool shutting down", future.id());
            return Err(Error::ShuttingDown);
        }
        if state.queue.is_full() {
            self.shared.metrics.record_rejected();
            log::debug!("task {:?} rejected: queue full", future.id());
            return Err(Error::QueueFull);
        }

        state.queue.push(task);
        self.shared.metrics.record_submitted();
        self.shared.work_available.notify_one();

        Ok(future)
    }

    /// Shut the pool down: stop accepting work, execute every task already
    /// accepted, then join all workers.
    ///
    /// Blocks until the queue has drained and every worker thread has
    /// terminated. A second call returns [`Error::AlreadyShutdown`].
    pub fn shutdown(&mut self) -> Result<()> {
        {
            let mut state = self.shared.state.lock();
            if state.shutdown {
                return Err(Error::AlreadyShutdown);
            }
            state.shutdown = true;
        }
        self.shut_down = true;
        self.shared.work_available.notify_all();

        for worker in &mut self.workers {
            if let Some(thread) = worker.thread.take() {
                if thread.join().is_err() {
                    log::warn!("worker {} terminated abnormally", worker.id);
                }
            }
        }

        Ok(())
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// Tasks accepted but not yet dequeued.
    pub fn pending_tasks(&self) -> usize {
        self.shared.state.lock().queue.len()
    }

    pub fn is_shutdown(&self) -> bool {
        self.shared.state.lock().shutdown
    }

    pub fn metrics(&self) -> PoolMetrics {
        let pending = self.pending_tasks();
        self.shared.metrics.snapshot(pending)
    }

    /// Per-worker execution counters.
    pub fn worker_stats(&self) -> Vec<WorkerStats> {
        self.workers
            .iter()
            .map(|worker| WorkerStats {
                id: worker.id,
                tasks_executed: worker.state.tasks_executed.load(std::sync::atomic::Ordering::Relaxed),
                tasks_panicked: worker.state.tasks_panicked.load(std::sync::atomic::Ordering::Relaxed),
            })
            .collect()
    }
}

fn halt_workers(shared: &Arc<PoolShared>, workers: &mut Vec<WorkerHandle>) {
    shared.state.lock().shutdown = true;
    shared.work_available.notify_all();
    for worker in workers {
        if let Some(thread) = worker.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        if !self.shut_down {
            let _ = self.shutdown();
        }
    }
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("num_threads", &self.num_threads)
            .field("queue_capacity", &self.queue_capacity)
            .field("shut_down", &self.shut_down)
            .finish()
    }
}
