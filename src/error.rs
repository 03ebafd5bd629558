pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("executor error: {0}")]
    Executor(String),

    /// The bounded queue is at capacity. An expected outcome, not a fault;
    /// callers retry later or drop the work.
    #[error("queue full")]
    QueueFull,

    /// Submission arrived during or after shutdown. No new work is accepted
    /// once the shutdown flag is set.
    #[error("pool is shutting down")]
    ShuttingDown,

    /// `shutdown` was called on a pool that already shut down.
    #[error("pool already shut down")]
    AlreadyShutdown,

    /// The submitted callable panicked. Surfaced from `TaskFuture::wait`
    /// instead of blocking the waiter forever.
    #[error("task panicked: {0}")]
    TaskPanicked(String),
}

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn executor<S: Into<String>>(msg: S) -> Self {
        Error::Executor(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(Error::QueueFull.to_string(), "queue full");
        assert_eq!(
            Error::config("queue_capacity must be > 0").to_string(),
            "config error: queue_capacity must be > 0"
        );
        assert_eq!(
            Error::TaskPanicked("boom".into()).to_string(),
            "task panicked: boom"
        );
    }
}
