//! Spin-based synchronization primitives.
//!
//! # Platform Implementations
//!
//! - **std**: Wraps `spin::Once`
//! - **embassy** (future): Wraps `embassy_sync::once_lock::OnceLock`
//!
//! # Example
//!
//! ```
//! use eventual_async::sync::spin::Once;
//!
//! let cell: Once<u32> = Once::new();
//! assert!(cell.get().is_none());
//!
//! assert_eq!(*cell.call_once(|| 42), 42);
//!
//! // Later initialisers are ignored
//! assert_eq!(*cell.call_once(|| 7), 42);
//! assert_eq!(cell.get(), Some(&42));
//! ```

/// A write-once cell.
///
/// The first [`call_once`](Once::call_once) stores its value; every later
/// call returns the stored value without running its initialiser. The store
/// is published with release ordering and [`get`](Once::get) reads with
/// acquire ordering, so a reader that observes the cell as completed also
/// observes the fully written value.
///
/// [`get`](Once::get) never spins: only a concurrent second
/// [`call_once`](Once::call_once) waits, and only for the duration of the
/// first initialiser.
#[derive(Debug, Default)]
pub struct Once<T>(spin::Once<T>);

impl<T> Once<T> {
    /// Creates a new, uninitialised cell.
    #[inline]
    pub const fn new() -> Self {
        Self(spin::Once::new())
    }

    /// Initialises the cell with the result of `f` if it is still empty.
    ///
    /// Returns a reference to the stored value, which is the result of `f`
    /// only for the first caller.
    #[inline]
    pub fn call_once<F: FnOnce() -> T>(&self, f: F) -> &T {
        self.0.call_once(f)
    }

    /// Returns the stored value, or `None` if the cell is still empty.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn once_first_write_wins() {
        let cell = Once::new();
        assert!(cell.get().is_none());

        cell.call_once(|| "first");
        cell.call_once(|| "second");

        assert_eq!(cell.get(), Some(&"first"));
    }

    #[test]
    fn once_concurrent_writers() {
        let cell = Arc::new(Once::new());

        let handles = (0..8)
            .map(|i| {
                let cell = cell.clone();
                std::thread::spawn(move || *cell.call_once(|| i))
            })
            .collect::<Vec<_>>();

        let seen = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>();

        // Every thread observes the single winning value
        let winner = *cell.get().unwrap();
        assert!(seen.iter().all(|v| *v == winner));
    }
}
