use super::*;

/// The result a [`Future`] resolves to: a success value or a failure.
///
/// Failures are data. Accessing the wrong branch through
/// [`success`](Outcome::success) is a programming error and panics.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Success(T),
    Failure(Error),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a failure.
    #[track_caller]
    pub fn success(self) -> T {
        match self {
            Self::Success(v) => v,
            Self::Failure(e) => panic!("can not get success value from Failure({e})"),
        }
    }

    /// Alias of [`success`](Outcome::success).
    #[track_caller]
    pub fn get(self) -> T {
        self.success()
    }

    /// Returns the failure, or [`Error::Unsupported`] if the outcome is a success.
    pub fn failed(&self) -> Error {
        match self {
            Self::Success(_) => Error::Unsupported,
            Self::Failure(e) => e.clone(),
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Failure(e) => Err(e),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(v) => Outcome::Success(f(v)),
            Self::Failure(e) => Outcome::Failure(e),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Self::Success(v) => f(v),
            Self::Failure(e) => Outcome::Failure(e),
        }
    }

    /// Maps the success value with a fallible function.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Outcome<U>
    where
        E: Into<Error>,
    {
        self.and_then(|v| f(v).map_err(Into::into).into())
    }

    /// Maps the success value with a partial function; `None` fails with [`Error::Empty`].
    pub fn filter_map<U>(self, f: impl FnOnce(T) -> Option<U>) -> Outcome<U> {
        self.and_then(|v| match f(v) {
            Some(u) => Outcome::Success(u),
            None => Outcome::Failure(Error::Empty),
        })
    }

    /// Keeps a success only if `pred` holds; otherwise fails with [`Error::Unsatisfied`].
    pub fn filter(self, pred: impl FnOnce(&T) -> bool) -> Outcome<T> {
        match self {
            Self::Success(v) if pred(&v) => Self::Success(v),
            Self::Success(_) => Self::Failure(Error::Unsatisfied),
            failure => failure,
        }
    }

    pub fn foreach(self, f: impl FnOnce(T)) {
        if let Self::Success(v) = self {
            f(v)
        }
    }

    pub fn get_or_else(self, z: T) -> T {
        match self {
            Self::Success(v) => v,
            Self::Failure(_) => z,
        }
    }

    pub fn or_else(self, z: Outcome<T>) -> Outcome<T> {
        match self {
            Self::Success(v) => Self::Success(v),
            Self::Failure(_) => z,
        }
    }

    /// Recovers a failure when `pf` is defined for it.
    pub fn recover(self, pf: impl FnOnce(&Error) -> Option<T>) -> Outcome<T> {
        match self {
            Self::Failure(e) => match pf(&e) {
                Some(v) => Self::Success(v),
                None => Self::Failure(e),
            },
            success => success,
        }
    }

    /// Replaces a failure with another outcome when `pf` is defined for it.
    pub fn recover_with(self, pf: impl FnOnce(&Error) -> Option<Outcome<T>>) -> Outcome<T> {
        match self {
            Self::Failure(e) => pf(&e).unwrap_or(Self::Failure(e)),
            success => success,
        }
    }
}

impl<T> From<Result<T, Error>> for Outcome<T> {
    fn from(r: Result<T, Error>) -> Self {
        match r {
            Ok(v) => Self::Success(v),
            Err(e) => Self::Failure(e),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Error> {
    fn from(o: Outcome<T>) -> Self {
        o.into_result()
    }
}

impl<T: core::fmt::Display> core::fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Success(v) => write!(f, "Success({v})"),
            Self::Failure(e) => write!(f, "Failure({e})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let s = Outcome::Success(5);
        assert!(s.is_success());
        assert!(matches!(s.failed(), Error::Unsupported));
        assert_eq!(s.clone().ok(), Some(5));
        assert_eq!(s.get(), 5);

        let f = Outcome::<i32>::Failure(Error::msg("bad"));
        assert!(f.is_failure());
        assert_eq!(f.failed().to_string(), "bad");
        assert_eq!(f.clone().ok(), None);
        assert!(f.into_result().is_err());
    }

    #[test]
    #[should_panic(expected = "can not get success value")]
    fn test_success_on_failure_panics() {
        Outcome::<i32>::Failure(Error::Empty).success();
    }

    #[test]
    fn test_filter() {
        assert_eq!(Outcome::Success(4).filter(|v| v % 2 == 0).ok(), Some(4));
        assert!(matches!(
            Outcome::Success(3).filter(|v| v % 2 == 0).failed(),
            Error::Unsatisfied
        ));
        assert!(matches!(
            Outcome::<i32>::Failure(Error::Cancelled)
                .filter(|_| unreachable!())
                .failed(),
            Error::Cancelled
        ));
    }

    #[test]
    fn test_partial_maps() {
        let parsed = Outcome::Success("42").try_map(|s| s.parse::<i32>().map_err(Error::other));
        assert_eq!(parsed.ok(), Some(42));

        let bad = Outcome::Success("x").try_map(|s| s.parse::<i32>().map_err(Error::other));
        assert!(bad.failed().downcast_ref::<core::num::ParseIntError>().is_some());

        let none = Outcome::Success(0).filter_map(|v: i32| v.checked_sub(1).filter(|v| *v > 0));
        assert!(matches!(none.failed(), Error::Empty));
    }

    #[test]
    fn test_recover() {
        let f = Outcome::<i32>::Failure(Error::Unsatisfied);
        assert_eq!(
            f.clone()
                .recover(|e| matches!(e, Error::Unsatisfied).then_some(0))
                .ok(),
            Some(0)
        );
        assert!(f.clone().recover(|_| None).is_failure());
        assert_eq!(
            f.recover_with(|_| Some(Outcome::Success(9))).get_or_else(1),
            9
        );
        assert_eq!(Outcome::Success(1).or_else(Outcome::Success(2)).get(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Outcome::Success(5).to_string(), "Success(5)");
        assert_eq!(
            Outcome::<i32>::Failure(Error::Empty).to_string(),
            "Failure(empty)"
        );
    }
}
