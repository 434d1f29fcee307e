use super::*;
use thiserror::Error;

/// The failure side of an [`Outcome`].
///
/// The library's own failure kinds are unit variants; failures raised by user
/// computations are carried in [`Error::Failed`]. `Error` is cheap to clone so
/// that every reader of a completed future observes the same failure.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// A failure was requested from a successful outcome.
    #[error("unsupported")]
    Unsupported,

    /// A predicate rejected a successful value.
    #[error("unsatisfied")]
    Unsatisfied,

    /// A partial function produced no value.
    #[error("empty")]
    Empty,

    /// The wait bound elapsed before the future completed.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// The future's token was cancelled before it completed.
    #[error("cancelled")]
    Cancelled,

    /// An error raised by the computation itself.
    #[error(transparent)]
    Failed(Arc<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps an arbitrary error raised by a computation.
    pub fn other<E>(e: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Failed(Arc::new(e))
    }

    /// Builds a computation failure from a plain message.
    pub fn msg(msg: impl Into<String>) -> Self {
        let e: Box<dyn std::error::Error + Send + Sync> = msg.into().into();
        Self::Failed(Arc::from(e))
    }

    /// Returns the wrapped computation error if it is of type `E`.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Failed(e) => e.downcast_ref::<E>(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("disk on fire")]
    struct DiskError;

    #[test]
    fn test_display() {
        assert_eq!(Error::Unsatisfied.to_string(), "unsatisfied");
        assert_eq!(Error::DeadlineExceeded.to_string(), "deadline exceeded");
        assert_eq!(Error::msg("boom").to_string(), "boom");
        assert_eq!(Error::other(DiskError).to_string(), "disk on fire");
    }

    #[test]
    fn test_downcast() {
        let e = Error::other(DiskError);
        assert!(e.downcast_ref::<DiskError>().is_some());
        assert!(e.clone().downcast_ref::<std::io::Error>().is_none());
        assert!(Error::Empty.downcast_ref::<DiskError>().is_none());
    }
}
