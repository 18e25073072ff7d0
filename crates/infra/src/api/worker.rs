//! Worker pool backing the asynchronous operations
//!
//! Each asynchronous call runs the synchronous code path on a thread of the
//! tokio blocking pool and hands back a [`PendingCall`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use salt_netapi_domain::{Result, SaltError};
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::oneshot;
use tokio::task::AbortHandle;
use tracing::debug;

/// Shared pool the asynchronous operations are submitted to.
///
/// Either borrows an existing tokio runtime through its [`Handle`] or owns a
/// dedicated one, shut down when the last clone of the pool is dropped.
#[derive(Clone)]
pub struct WorkerPool {
    handle: Handle,
    owned: Option<Arc<OwnedRuntime>>,
}

struct OwnedRuntime(Option<Runtime>);

impl Drop for OwnedRuntime {
    fn drop(&mut self) {
        if let Some(runtime) = self.0.take() {
            runtime.shutdown_background();
        }
    }
}

impl WorkerPool {
    /// Dedicated pool with tokio's default (effectively unbounded) number of
    /// blocking threads.
    pub fn new() -> Result<Self> {
        Self::build(None)
    }

    /// Dedicated pool running at most `threads` calls at once. Further calls
    /// queue until a thread frees up.
    pub fn with_max_threads(threads: usize) -> Result<Self> {
        Self::build(Some(threads.max(1)))
    }

    /// Run calls on an existing runtime.
    pub fn from_handle(handle: Handle) -> Self {
        Self { handle, owned: None }
    }

    /// Pool on the runtime the caller is running in, if any.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::from_handle)
    }

    fn build(max_threads: Option<usize>) -> Result<Self> {
        let mut builder = Builder::new_multi_thread();
        builder.worker_threads(1).thread_name("salt-netapi-worker").enable_all();
        if let Some(threads) = max_threads {
            builder.max_blocking_threads(threads);
        }

        let runtime = builder
            .build()
            .map_err(|e| SaltError::Config(format!("Failed to start worker pool: {}", e)))?;
        debug!(max_threads, "started worker pool");

        Ok(Self { handle: runtime.handle().clone(), owned: Some(Arc::new(OwnedRuntime(Some(runtime)))) })
    }

    /// Run `work` on a pool thread.
    pub fn submit<T, F>(&self, work: F) -> PendingCall<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let task = self.handle.spawn_blocking(move || {
            // The caller may have dropped its handle; the result is discarded then.
            let _ = sender.send(work());
        });

        PendingCall { receiver, abort: task.abort_handle() }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool").field("owned", &self.owned.is_some()).finish()
    }
}

/// Handle to the eventual value of an asynchronous call.
///
/// Await it from async code or [`wait`](Self::wait) on it from a plain
/// thread. Resolves to the same value or error the synchronous call would
/// have produced.
#[must_use = "the call runs regardless, but its result is lost unless awaited"]
pub struct PendingCall<T> {
    receiver: oneshot::Receiver<Result<T>>,
    abort: AbortHandle,
}

impl<T> PendingCall<T> {
    /// Block the current thread until the call completes.
    ///
    /// Must not be used from within an async context; await the handle
    /// there instead.
    pub fn wait(self) -> Result<T> {
        self.receiver.blocking_recv().unwrap_or_else(|_| Err(SaltError::Cancelled))
    }

    /// Prevent the call from running if it has not started yet. A call
    /// already in flight runs to completion; its socket read is not
    /// interrupted. A cancelled call resolves to [`SaltError::Cancelled`].
    pub fn cancel(&self) {
        self.abort.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

impl<T> Future for PendingCall<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or_else(|_| Err(SaltError::Cancelled)))
    }
}
