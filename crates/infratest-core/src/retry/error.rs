//! Error returned by the retry engine.

use std::fmt;

/// Why a retried action did not succeed.
///
/// `Fatal` carries the action's own error and displays as that error, so
/// callers see it unchanged. `MaxRetriesExceeded` summarizes the run and keeps
/// the last underlying error as its source.
#[derive(Debug)]
pub enum RetryError<E> {
    /// The action classified its failure as fatal; no further attempts were made.
    Fatal {
        description: String,
        attempt: u32,
        source: E,
    },
    /// Every attempt failed with a retriable error and the budget ran out.
    MaxRetriesExceeded {
        description: String,
        attempts: u32,
        last: E,
    },
}

impl<E> RetryError<E> {
    pub fn is_fatal(&self) -> bool {
        matches!(self, RetryError::Fatal { .. })
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::MaxRetriesExceeded { .. })
    }

    /// Number of action invocations performed before giving up.
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Fatal { attempt, .. } => *attempt,
            RetryError::MaxRetriesExceeded { attempts, .. } => *attempts,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            RetryError::Fatal { description, .. }
            | RetryError::MaxRetriesExceeded { description, .. } => description,
        }
    }

    /// Borrow the underlying action error.
    pub fn inner(&self) -> &E {
        match self {
            RetryError::Fatal { source, .. } => source,
            RetryError::MaxRetriesExceeded { last, .. } => last,
        }
    }

    /// Unwrap the underlying action error.
    pub fn into_inner(self) -> E {
        match self {
            RetryError::Fatal { source, .. } => source,
            RetryError::MaxRetriesExceeded { last, .. } => last,
        }
    }

    pub fn map_inner<F, E2>(self, f: F) -> RetryError<E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            RetryError::Fatal {
                description,
                attempt,
                source,
            } => RetryError::Fatal {
                description,
                attempt,
                source: f(source),
            },
            RetryError::MaxRetriesExceeded {
                description,
                attempts,
                last,
            } => RetryError::MaxRetriesExceeded {
                description,
                attempts,
                last: f(last),
            },
        }
    }
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::Fatal { source, .. } => write!(f, "{}", source),
            RetryError::MaxRetriesExceeded {
                description,
                attempts,
                last,
            } => write!(
                f,
                "'{}' unsuccessful after {} attempts: {}",
                description, attempts, last
            ),
        }
    }
}

impl<E> std::error::Error for RetryError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            // Displayed as the inner error already; chaining it again would repeat it.
            RetryError::Fatal { source, .. } => source.source(),
            RetryError::MaxRetriesExceeded { last, .. } => Some(last),
        }
    }
}
