//! Single-assignment futures with cancellable, composable completion.
//!
//! A [`Future`] is a handle to a value that an asynchronous computation will
//! produce later. It completes at most once with an [`Outcome`], either a
//! success value or an [`Error`], and that outcome never changes afterwards.
//!
//! Every future is created in a [`TaskPool`], whose cancellation token is the
//! parent of the future's own token. Cancelling the pool releases every task
//! waiting in it; a future cancelled this way is *done* but not *completed*,
//! which is reported as [`Error::Cancelled`] rather than as a value.
//!
//! Combinators ([`map`], [`flat_map`], [`transform`], [`transform_with`],
//! [`filter`], ...) build new futures that wait on existing ones. Upstream
//! failures short-circuit every combinator except [`transform`] and
//! [`transform_with`], which observe both branches.
//!
//! # Example
//!
//! ```no_run
//! use eventual_future::{Future, TaskPool, flat_map, map};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let pool = TaskPool::new();
//! let a = Future::successful(&pool, 5);
//! let b = Future::spawn(&pool, async { Ok(3) });
//!
//! let p = pool.clone();
//! let h = flat_map(&pool, &a, move |x| map(&p, &b, move |y| x * y));
//!
//! assert_eq!(h.result(time::Duration::SECOND).await.unwrap(), 15);
//! pool.shutdown().await;
//! # });
//! ```

mod combinator;
mod error;
mod future;
mod outcome;

pub mod config;

pub use combinator::{
    filter, filter_map, flat_map, map, recover, recover_with, transform, transform_with,
    try_map, zip,
};
pub use config::Config;
pub use error::Error;
pub use eventual_async::{CancellationToken, TaskPool};
pub use future::{Future, Published};
pub use outcome::Outcome;

use std::sync::Arc;
use tracing::{debug, trace};

/// Bounds shared by every value a [`Future`] can hold.
///
/// Any number of readers observe the same outcome from any task, so values
/// are cloned out rather than moved.
pub trait Value: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Value for T {}
