use super::*;
use eventual_async::sync::spin::Once;

struct Shared<T> {
    // Done signal: cancelled by the completer, its drop, or an ancestor token
    token: CancellationToken,
    // `None` once sealed as done without completing
    outcome: Once<Option<Outcome<T>>>,
    pool: TaskPool,
}

impl<T> Shared<T> {
    // Once the token is done the slot is final: an empty slot is sealed so a
    // late completer can no longer fill it.
    fn settled(&self) -> Option<&Outcome<T>> {
        if self.token.is_cancelled() {
            self.outcome.call_once(|| None).as_ref()
        } else {
            self.outcome.get().and_then(Option::as_ref)
        }
    }
}

/// A handle to a value produced by an asynchronous computation.
///
/// A future moves from pending to completed at most once; its outcome is
/// never rewritten. The future's cancellation token is the sole completion
/// signal: waiters are released when it is cancelled, and then check
/// [`is_completed`](Future::is_completed) to tell natural completion from
/// cancellation. A future whose token is cancelled before its outcome is
/// stored never completes, so every reader gets the same answer.
///
/// Handles are cheap to clone; every clone observes the same outcome.
pub struct Future<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Future<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

/// The single writer of a [`Future`]'s outcome.
///
/// Dropping a completer that never completed cancels the future's token, so
/// waiters observe "done but not completed" rather than hanging.
pub(crate) struct Completer<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Completer<T> {
    pub(crate) fn token(&self) -> &CancellationToken {
        &self.shared.token
    }

    /// Stores the outcome unless the future is already done, then signals the token.
    pub(crate) fn complete(self, outcome: Outcome<T>) {
        let shared = &self.shared;
        let stored = shared
            .outcome
            .call_once(|| (!shared.token.is_cancelled()).then_some(outcome));
        if stored.is_some() {
            trace!("Future completed");
        } else {
            debug!("Future cancelled before completing, outcome dropped");
        }
    }
}

impl<T> Drop for Completer<T> {
    fn drop(&mut self) {
        if self.shared.outcome.call_once(|| None).is_none() {
            trace!("Future done without completing");
        }
        self.shared.token.cancel();
    }
}

/// The outcome of a [`Future`] as exposed to a dependent computation.
///
/// Obtained from [`Future::publish`]. It carries a child of the future's
/// token, which is done when the future is done, together with an explicit
/// reference to the future's outcome.
pub struct Published<T> {
    token: CancellationToken,
    shared: Arc<Shared<T>>,
}

impl<T: Value> Published<T> {
    /// The token derived from the future's own token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Waits until the future is done, whether or not it completed.
    pub async fn done(&self) {
        self.token.cancelled().await
    }

    pub fn is_done(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_completed(&self) -> bool {
        self.shared.settled().is_some()
    }

    /// The outcome, if the future completed.
    pub fn outcome(&self) -> Option<Outcome<T>> {
        self.shared.settled().cloned()
    }
}

impl<T: Value> Future<T> {
    pub(crate) fn pending(pool: &TaskPool) -> (Self, Completer<T>) {
        let shared = Arc::new(Shared {
            token: pool.child_token(),
            outcome: Once::new(),
            pool: pool.clone(),
        });
        (
            Self {
                shared: shared.clone(),
            },
            Completer { shared },
        )
    }

    /// Runs `task` on `pool` and completes with its result.
    ///
    /// If the pool is cancelled first, `task` is dropped and the future is
    /// done without completing.
    pub fn spawn<F>(pool: &TaskPool, task: F) -> Self
    where
        F: core::future::Future<Output = Result<T, Error>> + Send + 'static,
    {
        let (future, completer) = Self::pending(pool);
        let cancel_token = completer.token().clone();
        eventual_async::spawn!(pool, "future", async move {
            tokio::select! {
                biased;
                _ = cancel_token.cancelled() => {
                    debug!("Future cancelled before its computation finished");
                }
                r = task => completer.complete(r.into()),
            }
        });
        future
    }

    /// A future that is already completed with `outcome`.
    pub fn from_outcome(pool: &TaskPool, outcome: Outcome<T>) -> Self {
        let (future, completer) = Self::pending(pool);
        completer.complete(outcome);
        future
    }

    pub fn successful(pool: &TaskPool, value: T) -> Self {
        Self::from_outcome(pool, Outcome::Success(value))
    }

    pub fn failed(pool: &TaskPool, error: Error) -> Self {
        Self::from_outcome(pool, Outcome::Failure(error))
    }

    /// Non-blocking snapshot of completion.
    pub fn is_completed(&self) -> bool {
        self.shared.settled().is_some()
    }

    /// Returns `true` once the future's token is cancelled, completed or not.
    pub fn is_done(&self) -> bool {
        self.shared.token.is_cancelled()
    }

    /// The outcome, if the future has completed.
    pub fn outcome(&self) -> Option<Outcome<T>> {
        self.shared.settled().cloned()
    }

    /// Waits until the future is done.
    pub async fn wait(&self) {
        self.shared.token.cancelled().await
    }

    /// Waits at most `at_most` for the future and unpacks its outcome.
    ///
    /// Returns [`Error::DeadlineExceeded`] if the bound elapses first and
    /// [`Error::Cancelled`] if the future is done without completing. A
    /// completed future never reports a timeout, even with a zero bound.
    pub async fn result(&self, at_most: time::Duration) -> Result<T, Error> {
        tokio::select! {
            biased;
            _ = self.wait() => match self.outcome() {
                Some(outcome) => outcome.into_result(),
                None => Err(Error::Cancelled),
            },
            _ = eventual_async::time::sleep(at_most) => Err(Error::DeadlineExceeded),
        }
    }

    /// [`result`](Future::result) bounded by the configured timeout.
    pub async fn get(&self, config: &Config) -> Result<T, Error> {
        self.result(config.result_timeout).await
    }

    /// Registers a listener invoked once, asynchronously, with the outcome.
    ///
    /// The listener never runs if the future is done without completing.
    pub fn on_complete<F>(&self, f: F)
    where
        F: FnOnce(Outcome<T>) + Send + 'static,
    {
        let published = self.publish();
        eventual_async::spawn!(self.shared.pool, "on_complete", async move {
            published.done().await;
            match published.outcome() {
                Some(outcome) => f(outcome),
                None => trace!("Future done without completing, listener dropped"),
            }
        });
    }

    /// Registers a listener invoked only with a success value.
    pub fn foreach<F>(&self, f: F)
    where
        F: FnOnce(T) + Send + 'static,
    {
        self.on_complete(move |outcome| outcome.foreach(f))
    }

    /// See [`filter`](crate::filter).
    pub fn filter<P>(&self, pool: &TaskPool, pred: P) -> Future<T>
    where
        P: FnOnce(&T) -> bool + Send + 'static,
    {
        crate::filter(pool, self, pred)
    }

    /// Exposes the outcome to a dependent computation.
    pub fn publish(&self) -> Published<T> {
        Published {
            token: self.shared.token.child_token(),
            shared: self.shared.clone(),
        }
    }
}

impl<T: core::fmt::Display> core::fmt::Display for Future<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.shared.settled() {
            Some(outcome) => write!(f, "Future({outcome})"),
            None => f.write_str("Future(?)"),
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Future<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Future")
            .field("done", &self.shared.token.is_cancelled())
            .field("outcome", &self.shared.settled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_spawn_success() {
        let pool = TaskPool::new();
        let f = Future::spawn(&pool, async { Ok(0) });

        f.wait().await;
        assert!(f.is_completed());
        assert_eq!(f.result(time::Duration::SECOND).await.unwrap(), 0);
        assert_eq!(f.to_string(), "Future(Success(0))");
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let pool = TaskPool::new();
        let f: Future<i32> = Future::spawn(&pool, async { Err(Error::msg("no")) });

        let err = f.result(time::Duration::SECOND).await.unwrap_err();
        assert_eq!(err.to_string(), "no");
        assert!(f.outcome().unwrap().is_failure());
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_times_out() {
        let pool = TaskPool::new();
        let f = Future::spawn(&pool, async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            Ok(1)
        });

        assert!(matches!(
            f.result(time::Duration::seconds(1)).await,
            Err(Error::DeadlineExceeded)
        ));
        assert!(!f.is_completed());
        assert_eq!(f.to_string(), "Future(?)");

        // The computation is unaffected by the timeout
        assert_eq!(f.result(time::Duration::minutes(2)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_completed_never_times_out() {
        let pool = TaskPool::new();
        let f = Future::successful(&pool, 3);

        assert_eq!(f.result(time::Duration::ZERO).await.unwrap(), 3);
        assert_eq!(f.result(time::Duration::ZERO).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_pool_cancel_abandons() {
        let pool = TaskPool::new();
        let f = Future::spawn(&pool, async {
            std::future::pending::<()>().await;
            Ok(1)
        });

        pool.cancel();
        f.wait().await;

        assert!(f.is_done());
        assert!(!f.is_completed());
        assert!(matches!(
            f.result(time::Duration::SECOND).await,
            Err(Error::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_panicking_computation_is_done_without_completing() {
        let pool = TaskPool::new();
        let f = Future::spawn(&pool, async {
            let missing: Option<i32> = None;
            Ok(missing.expect("computation blew up"))
        });

        f.wait().await;
        assert!(!f.is_completed());
    }

    #[tokio::test]
    async fn test_on_complete_invoked_once() {
        let pool = TaskPool::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let f = Future::spawn(&pool, async { Ok(7) });

        let c = calls.clone();
        f.on_complete(move |outcome| {
            assert_eq!(outcome.get(), 7);
            c.fetch_add(1, Ordering::SeqCst);
        });
        let c = calls.clone();
        f.foreach(move |v| {
            assert_eq!(v, 7);
            c.fetch_add(1, Ordering::SeqCst);
        });

        // Shutdown waits for the listeners, but would abandon a pending future
        f.wait().await;
        pool.shutdown().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_foreach_skips_failure() {
        let pool = TaskPool::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let f: Future<i32> = Future::failed(&pool, Error::Empty);

        let c = calls.clone();
        f.foreach(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        pool.shutdown().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_publish_observes_completion() {
        let pool = TaskPool::new();
        let f = Future::successful(&pool, "x");
        let published = f.publish();

        published.done().await;
        assert!(published.is_done());
        assert!(published.is_completed());
        assert_eq!(published.outcome().unwrap().get(), "x");
    }
}
