//! Runtime-agnostic async primitives for the eventual future library.
//!
//! This crate provides the small set of runtime services that
//! `eventual-future` builds on, so that the future and combinator layer
//! never names a concrete runtime directly.
//!
//! # Features
//!
//! - **CancellationToken**: Tree-structured cancellation signal
//! - **TaskPool**: A cancellation token paired with a task tracker; the
//!   "context" that every future and combinator is spawned into
//! - **JoinHandle**: Abstracted task handle type for runtime portability
//! - **sync::spin::Once**: Write-once cell used for single-assignment results
//!
//! # Example
//!
//! ```no_run
//! use eventual_async::TaskPool;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let pool = TaskPool::new();
//! let cancel = pool.cancel_token().clone();
//!
//! pool.spawn(async move {
//!     loop {
//!         tokio::select! {
//!             _ = do_work() => {}
//!             _ = cancel.cancelled() => break,
//!         }
//!     }
//! });
//!
//! pool.shutdown().await;
//! # });
//!
//! # async fn do_work() {}
//! ```

mod spawn;

pub mod cancellation_token;
pub mod join_handle;
pub mod sync;
pub mod task_pool;
pub mod time;

// Re-export commonly used types at crate root
pub use cancellation_token::CancellationToken;
pub use join_handle::JoinHandle;
pub use task_pool::TaskPool;

// Used by the `spawn!` macro so callers need no direct tracing dependency
#[doc(hidden)]
pub use tracing as __tracing;
