//! fixedpool - a fixed-capacity worker-thread pool.
//!
//! A bounded FIFO queue of callables consumed by a fixed set of long-lived
//! OS worker threads. Every submission returns a [`TaskFuture`] the caller
//! can block on for the result; submission itself never blocks, it fails
//! fast when the queue is full or the pool is shutting down. Shutdown drains
//! every accepted task before joining the workers.
//!
//! # Quick Start
//!
//! ```
//! use fixedpool::ThreadPool;
//!
//! let mut pool = ThreadPool::new(4, 64).unwrap();
//!
//! let future = pool.submit(|| 6 * 7).unwrap();
//! assert_eq!(*future.wait().unwrap(), 42);
//!
//! pool.shutdown().unwrap();
//! ```
//!
//! # Design
//!
//! - One pool-wide lock guards only queue metadata (head, tail, occupancy,
//!   shutdown flag); task execution happens with the lock released.
//! - Each task has its own mutex and condition variable, so waiting on one
//!   future never blocks submission or execution of unrelated tasks.
//! - Workers dequeue in FIFO submission order; completion order across
//!   tasks is unspecified when more than one worker runs.
//! - A panicking callable completes its future with
//!   [`Error::TaskPanicked`] instead of stranding waiters.

#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod future;
pub mod metrics;
pub mod pool;
pub mod task;

mod queue;
mod worker;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use future::TaskFuture;
pub use metrics::PoolMetrics;
pub use pool::ThreadPool;
pub use task::TaskId;
pub use worker::WorkerStats;
