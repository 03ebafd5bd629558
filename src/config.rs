use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Number of worker threads. `None` means one per logical CPU.
    pub thread_count: Option<usize>,
    /// Fixed capacity of the bounded task queue.
    pub queue_capacity: usize,
    pub thread_name_prefix: String,
    pub stack_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thread_count: None,
            queue_capacity: 64,
            thread_name_prefix: "fixedpool-worker".to_string(),
            stack_size: Some(2 * 1024 * 1024),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.thread_count {
            if n == 0 {
                return Err(Error::config("thread_count must be > 0"));
            }
            if n > 1024 {
                return Err(Error::config("thread_count too large (max 1024)"));
            }
        }

        if self.queue_capacity == 0 {
            return Err(Error::config("queue_capacity must be > 0"));
        }

        Ok(())
    }

    pub fn worker_threads(&self) -> usize {
        self.thread_count.unwrap_or_else(num_cpus::get)
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn num_threads(mut self, n: usize) -> Self {
        self.config.thread_count = Some(n);
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
