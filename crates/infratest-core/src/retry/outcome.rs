//! Per-attempt outcome returned by an action.

/// Result of a single invocation of a retried action.
///
/// Actions decide for themselves whether a failure is worth retrying. Any
/// plain `Result` converts with `Err` mapped to [`Outcome::Retriable`], so an
/// error nobody bothered to classify keeps the engine waiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// The desired condition was reached; stop and return the value.
    Success(T),
    /// The desired condition can never be reached; stop now.
    Fatal(E),
    /// Not there yet; try again if the budget allows.
    Retriable(E),
}

impl<T, E> Outcome<T, E> {
    /// Classify a result, treating errors matching `is_fatal` as fatal.
    pub fn fatal_if<F>(result: Result<T, E>, is_fatal: F) -> Self
    where
        F: FnOnce(&E) -> bool,
    {
        match result {
            Ok(v) => Outcome::Success(v),
            Err(e) if is_fatal(&e) => Outcome::Fatal(e),
            Err(e) => Outcome::Retriable(e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Outcome::Fatal(_))
    }

    /// Map the error payload, keeping the classification.
    pub fn map_err<F, E2>(self, f: F) -> Outcome<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Outcome::Success(v) => Outcome::Success(v),
            Outcome::Fatal(e) => Outcome::Fatal(f(e)),
            Outcome::Retriable(e) => Outcome::Retriable(f(e)),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Outcome::Success(v),
            Err(e) => Outcome::Retriable(e),
        }
    }
}
