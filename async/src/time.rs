//! Time utilities for runtime-agnostic async operations.
//!
//! # Example
//!
//! ```no_run
//! use eventual_async::time::sleep;
//! use time::Duration;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! sleep(Duration::milliseconds(250)).await;
//!
//! // Negative durations return immediately
//! sleep(Duration::seconds(-1)).await;
//! # });
//! ```

/// Sleeps for the specified duration.
///
/// # Behavior
///
/// - Positive durations: sleeps for the specified time
/// - Zero or negative durations: returns immediately without sleeping
/// - Durations exceeding `std::time::Duration::MAX`: sleeps for `MAX`
#[cfg(feature = "tokio")]
pub async fn sleep(duration: time::Duration) {
    if !duration.is_positive() {
        return;
    }

    let std_duration: std::time::Duration = duration.try_into().unwrap_or(std::time::Duration::MAX);

    tokio::time::sleep(std_duration).await;
}

/// Converts a [`std::time::Duration`] into the [`time::Duration`] used by this crate.
///
/// Values beyond `time::Duration::MAX` saturate.
pub fn from_std(duration: std::time::Duration) -> time::Duration {
    duration.try_into().unwrap_or(time::Duration::MAX)
}

#[cfg(all(test, feature = "tokio"))]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_advances_clock() {
        let start = tokio::time::Instant::now();
        sleep(time::Duration::seconds(5)).await;
        assert!(start.elapsed() >= std::time::Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_positive_returns_immediately() {
        let start = tokio::time::Instant::now();
        sleep(time::Duration::ZERO).await;
        sleep(time::Duration::seconds(-3)).await;
        assert_eq!(start.elapsed(), std::time::Duration::ZERO);
    }

    #[test]
    fn test_from_std() {
        assert_eq!(
            from_std(std::time::Duration::from_millis(1500)),
            time::Duration::milliseconds(1500)
        );
        assert_eq!(from_std(std::time::Duration::MAX), time::Duration::MAX);
    }
}
