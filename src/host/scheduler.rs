//! Delayed single-shot callbacks

use std::time::Duration;

use tokio::runtime::Handle;

/// A deferred action
pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Delayed-callback primitive provided by the host event loop
pub trait Scheduler: Send + Sync {
    fn schedule_after(&self, delay: Duration, task: ScheduledTask);
}

/// Scheduler backed by a tokio runtime
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler on the runtime of the calling task
    ///
    /// Panics outside a tokio runtime, like `Handle::current`.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&self, delay: Duration, task: ScheduledTask) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}
