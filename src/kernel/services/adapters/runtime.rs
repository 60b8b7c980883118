use tokio::runtime::Handle;

use crate::kernel::services::ports::{AsyncExecutor, BoxFuture};

/// Spawns engine tasks onto an existing tokio runtime.
pub struct TokioExecutor {
    handle: Handle,
}

impl TokioExecutor {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Captures the runtime of the calling context. Must be called from
    /// within a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl AsyncExecutor for TokioExecutor {
    fn spawn(&self, task: BoxFuture) {
        self.handle.spawn(task);
    }
}
