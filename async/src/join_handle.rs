//! JoinHandle abstraction for runtime-agnostic task handles.
//!
//! # Example
//!
//! ```no_run
//! use eventual_async::JoinHandle;
//!
//! async fn example() {
//!     let pool = eventual_async::TaskPool::new();
//!     let handle: JoinHandle<i32> = pool.spawn(async { 42 });
//!     assert_eq!(handle.await.unwrap(), 42);
//! }
//! ```

/// A handle to a spawned task that can be awaited for its result.
///
/// Futures and combinators never await these: completion is observed through
/// the future's own token. The handle is still returned so callers that spawn
/// plain tasks onto a pool can join them.
#[cfg(feature = "tokio")]
pub type JoinHandle<T> = tokio::task::JoinHandle<T>;
