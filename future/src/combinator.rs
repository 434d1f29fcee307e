//! Combinators building new futures from existing ones.
//!
//! Every combinator creates its future in the caller-supplied pool and spawns
//! exactly one task that waits on the upstream [`Published`] handle(s). The
//! wait races the new future's own token, so cancelling the pool releases the
//! task without it ever completing the new future.

use super::*;

// Waits for `upstream`, giving up if `scope` is cancelled first.
//
// Returns `None` when no value is available: either `scope` was cancelled, or
// the upstream future was done without completing.
async fn settle<T: Value>(
    upstream: &Published<T>,
    scope: &CancellationToken,
) -> Option<Outcome<T>> {
    tokio::select! {
        biased;
        _ = scope.cancelled() => {
            debug!("Combinator cancelled while waiting on upstream future");
            None
        }
        _ = upstream.done() => {
            let outcome = upstream.outcome();
            if outcome.is_none() {
                trace!("Upstream future done without completing");
            }
            outcome
        }
    }
}

/// Completes with `f` applied to whatever outcome `a` produces.
pub fn transform<T, U, F>(pool: &TaskPool, a: &Future<T>, f: F) -> Future<U>
where
    T: Value,
    U: Value,
    F: FnOnce(Outcome<T>) -> Outcome<U> + Send + 'static,
{
    let (future, completer) = Future::pending(pool);
    let upstream = a.publish();
    eventual_async::spawn!(pool, "transform", async move {
        if let Some(outcome) = settle(&upstream, completer.token()).await {
            completer.complete(f(outcome));
        }
    });
    future
}

/// Completes with the outcome of the future `f` returns for `a`'s outcome.
///
/// Cancelling `pool` releases the wait on the inner future but does not
/// cancel it. If the inner future is done without completing, so is the
/// returned one.
pub fn transform_with<T, U, F>(pool: &TaskPool, a: &Future<T>, f: F) -> Future<U>
where
    T: Value,
    U: Value,
    F: FnOnce(Outcome<T>) -> Future<U> + Send + 'static,
{
    let (future, completer) = Future::pending(pool);
    let upstream = a.publish();
    eventual_async::spawn!(pool, "transform_with", async move {
        let Some(outcome) = settle(&upstream, completer.token()).await else {
            return;
        };
        let inner = f(outcome).publish();
        if let Some(outcome) = settle(&inner, completer.token()).await {
            completer.complete(outcome);
        }
    });
    future
}

/// Maps a success value; failures pass through without calling `f`.
pub fn map<T, U, F>(pool: &TaskPool, a: &Future<T>, f: F) -> Future<U>
where
    T: Value,
    U: Value,
    F: FnOnce(T) -> U + Send + 'static,
{
    transform(pool, a, move |outcome| outcome.map(f))
}

/// Chains a dependent future onto a success value; failures short-circuit.
pub fn flat_map<T, U, F>(pool: &TaskPool, a: &Future<T>, f: F) -> Future<U>
where
    T: Value,
    U: Value,
    F: FnOnce(T) -> Future<U> + Send + 'static,
{
    let pool_cloned = pool.clone();
    transform_with(pool, a, move |outcome| match outcome {
        Outcome::Success(v) => f(v),
        Outcome::Failure(e) => Future::failed(&pool_cloned, e),
    })
}

/// Maps a success value with a fallible function, whose error becomes the failure.
pub fn try_map<T, U, E, F>(pool: &TaskPool, a: &Future<T>, f: F) -> Future<U>
where
    T: Value,
    U: Value,
    E: Into<Error>,
    F: FnOnce(T) -> Result<U, E> + Send + 'static,
{
    transform(pool, a, move |outcome| outcome.try_map(f))
}

/// Maps a success value with a partial function; `None` fails with [`Error::Empty`].
pub fn filter_map<T, U, F>(pool: &TaskPool, a: &Future<T>, f: F) -> Future<U>
where
    T: Value,
    U: Value,
    F: FnOnce(T) -> Option<U> + Send + 'static,
{
    transform(pool, a, move |outcome| outcome.filter_map(f))
}

/// Keeps a success only if `pred` holds; otherwise fails with [`Error::Unsatisfied`].
///
/// Upstream failures pass through untouched.
pub fn filter<T, P>(pool: &TaskPool, a: &Future<T>, pred: P) -> Future<T>
where
    T: Value,
    P: FnOnce(&T) -> bool + Send + 'static,
{
    let pool_cloned = pool.clone();
    transform_with(pool, a, move |outcome| {
        Future::from_outcome(&pool_cloned, outcome.filter(pred))
    })
}

/// Recovers a failure when `pf` is defined for it.
pub fn recover<T, F>(pool: &TaskPool, a: &Future<T>, pf: F) -> Future<T>
where
    T: Value,
    F: FnOnce(&Error) -> Option<T> + Send + 'static,
{
    transform(pool, a, move |outcome| outcome.recover(pf))
}

/// Replaces a failure with another future when `pf` is defined for it.
pub fn recover_with<T, F>(pool: &TaskPool, a: &Future<T>, pf: F) -> Future<T>
where
    T: Value,
    F: FnOnce(&Error) -> Option<Future<T>> + Send + 'static,
{
    let pool_cloned = pool.clone();
    transform_with(pool, a, move |outcome| match outcome {
        Outcome::Failure(e) => pf(&e).unwrap_or_else(|| Future::failed(&pool_cloned, e)),
        success => Future::from_outcome(&pool_cloned, success),
    })
}

/// Pairs the values of two futures; the first failure wins.
pub fn zip<T, U>(pool: &TaskPool, a: &Future<T>, b: &Future<U>) -> Future<(T, U)>
where
    T: Value,
    U: Value,
{
    let (future, completer) = Future::pending(pool);
    let (left, right) = (a.publish(), b.publish());
    eventual_async::spawn!(pool, "zip", async move {
        let x = match settle(&left, completer.token()).await {
            Some(Outcome::Success(x)) => x,
            Some(Outcome::Failure(e)) => return completer.complete(Outcome::Failure(e)),
            None => return,
        };
        if let Some(outcome) = settle(&right, completer.token()).await {
            completer.complete(outcome.map(|y| (x, y)));
        }
    });
    future
}
