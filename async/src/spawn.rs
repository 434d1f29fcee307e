/// Spawns a task onto a [`TaskPool`](crate::TaskPool) with optional tracing instrumentation.
///
/// When the calling crate enables its `instrument` feature, the task runs
/// inside a fresh `trace_span` that follows from the current span.
///
/// # Syntax
///
/// ```text
/// // Simple case (no fields):
/// eventual_async::spawn!(pool, "task_name", async { ... })
///
/// // Complex case (with span fields - use parentheses):
/// eventual_async::spawn!(pool, "task_name", (?field1, field2 = value), async { ... })
/// ```
///
#[macro_export]
macro_rules! spawn {
    // Simple case: just task name and future (no fields)
    ($pool:expr, $name:literal, async $($rest:tt)*) => {{
        #[cfg(feature = "instrument")]
        {
            let task = async $($rest)*;
            let span = $crate::__tracing::trace_span!(parent: None, $name);
            span.follows_from($crate::__tracing::Span::current());
            $pool.spawn($crate::__tracing::Instrument::instrument(task, span))
        }
        #[cfg(not(feature = "instrument"))]
        {
            $pool.spawn(async $($rest)*)
        }
    }};

    // Complex case: has fields before async
    ($pool:expr, $name:literal, ($($field:tt)*), async $($rest:tt)*) => {{
        #[cfg(feature = "instrument")]
        {
            let task = async $($rest)*;
            let span = $crate::__tracing::trace_span!(parent: None, $name, $($field)*);
            span.follows_from($crate::__tracing::Span::current());
            $pool.spawn($crate::__tracing::Instrument::instrument(task, span))
        }
        #[cfg(not(feature = "instrument"))]
        {
            $pool.spawn(async $($rest)*)
        }
    }};
}
