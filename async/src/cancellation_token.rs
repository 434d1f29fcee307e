//! CancellationToken abstraction for runtime-agnostic cancellation signaling.
//!
//! A token is a node in a tree: cancelling a node cancels its whole subtree,
//! and a child may be cancelled without touching its parent. The future layer
//! uses a token both as a cancellation signal and as the "this future is
//! done" signal, so every waiter in a composition is released by a single
//! `cancel()` on the right node.
//!
//! # Example
//!
//! ```no_run
//! use eventual_async::CancellationToken;
//!
//! async fn example() {
//!     let token = CancellationToken::new();
//!     let child = token.child_token();
//!
//!     tokio::spawn(async move {
//!         child.cancelled().await;
//!         println!("Cancelled!");
//!     });
//!
//!     // Cancel the whole tree
//!     token.cancel();
//! }
//! ```

/// A token for cooperative cancellation of async operations.
///
/// # Key Methods
///
/// - `new()` - Create a new root token
/// - `child_token()` - Create a child token that cancels when its parent does
/// - `cancel()` - Signal cancellation (idempotent)
/// - `cancelled()` - Returns a future that completes when cancelled
/// - `is_cancelled()` - Check if cancellation has been signalled
#[cfg(feature = "tokio")]
pub type CancellationToken = tokio_util::sync::CancellationToken;
