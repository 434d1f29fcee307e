//! Task pool for spawning cancellable tasks with graceful shutdown.
//!
//! [`TaskPool`] is the "context" that every future and combinator in
//! `eventual-future` is created in. It pairs:
//! - A cancellation token, the ownership/deadline signal for everything
//!   spawned into the pool
//! - A task tracker, so the owner can wait for every spawned task to finish
//!
//! # Pattern
//!
//! The task pool implements a three-phase shutdown:
//! 1. **Signal**: Cancel all tasks via the cancellation token
//! 2. **Close**: Prevent new tasks from spawning
//! 3. **Wait**: Block until all tasks complete
//!
//! Pools are cheap to clone. A clone shares both token and tracker; a
//! [`child()`](TaskPool::child) pool shares the tracker but owns a child
//! token, so a sub-composition can be cancelled without touching its parent.
//!
//! # Example
//!
//! ```no_run
//! use eventual_async::task_pool::TaskPool;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let pool = TaskPool::new();
//! let scope = pool.child();
//!
//! let cancel = scope.cancel_token().clone();
//! scope.spawn(async move {
//!     cancel.cancelled().await;
//! });
//!
//! // Cancels the scoped task only
//! scope.cancel();
//!
//! pool.shutdown().await;
//! # });
//! ```

use crate::CancellationToken;
use crate::JoinHandle;

/// Manages a group of cancellable tasks with graceful shutdown.
///
/// # Shutdown Guarantees
///
/// When [`shutdown()`](TaskPool::shutdown) is called:
/// - All tasks are signaled to cancel via the cancellation token
/// - No new tasks can be spawned
/// - The method blocks until all spawned tasks complete
///
/// Shutdown closes the shared tracker, so it affects every clone and every
/// child pool, not just the one it is called on.
#[derive(Clone, Debug)]
pub struct TaskPool {
    cancel_token: CancellationToken,
    task_tracker: tokio_util::task::TaskTracker,
}

impl TaskPool {
    /// Creates a new task pool with a fresh root token.
    pub fn new() -> Self {
        Self::with_token(CancellationToken::new())
    }

    /// Creates a new task pool governed by an externally owned token.
    ///
    /// Cancelling `cancel_token` (or any of its ancestors) cancels every
    /// task spawned into the pool.
    pub fn with_token(cancel_token: CancellationToken) -> Self {
        Self {
            cancel_token,
            task_tracker: tokio_util::task::TaskTracker::new(),
        }
    }

    /// Creates a pool sharing this pool's tracker, with a child token.
    pub fn child(&self) -> Self {
        Self {
            cancel_token: self.cancel_token.child_token(),
            task_tracker: self.task_tracker.clone(),
        }
    }

    /// Returns a reference to the cancellation token.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    /// Creates a child cancellation token for hierarchical cancellation.
    ///
    /// Child tokens can be cancelled independently without affecting the
    /// pool. When the pool is cancelled, all child tokens are also cancelled.
    pub fn child_token(&self) -> CancellationToken {
        self.cancel_token.child_token()
    }

    /// Spawns a task tracked by this pool.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn<F>(&self, task: F) -> JoinHandle<F::Output>
    where
        F: core::future::Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.task_tracker.spawn(task)
    }

    /// Signals cancellation to every task in the pool without waiting.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Initiates graceful shutdown and waits for all tasks to complete.
    ///
    /// 1. Cancels all tasks via the cancellation token
    /// 2. Closes the tracker to prevent new tasks from being tracked
    /// 3. Waits for all currently running tasks to complete
    pub async fn shutdown(&self) {
        self.cancel_token.cancel();
        self.task_tracker.close();
        self.task_tracker.wait().await;
    }

    /// Checks if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Returns the number of tasks still running in the shared tracker.
    pub fn len(&self) -> usize {
        self.task_tracker.len()
    }

    /// Returns `true` if no tracked task is running.
    pub fn is_empty(&self) -> bool {
        self.task_tracker.is_empty()
    }
}

impl Default for TaskPool {
    fn default() -> Self {
        Self::new()
    }
}
