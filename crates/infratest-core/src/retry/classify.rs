//! Classify errors by message against a list of known-transient patterns.
//!
//! Some collaborators (CLI tools mostly) only give us text. For those, callers
//! list the messages worth retrying and everything else fails fast.

use std::fmt;

use regex::Regex;

use super::error::RetryError;
use super::outcome::Outcome;
use super::policy::RetryPolicy;
use super::run::do_with_retry;
use super::sink::RetryLog;

/// Ordered list of `(pattern, explanation)` pairs for retriable error text.
#[derive(Debug, Clone, Default)]
pub struct RetryableErrors {
    patterns: Vec<(Regex, String)>,
}

impl RetryableErrors {
    /// Compiles the patterns; fails on the first invalid regex.
    pub fn new(patterns: &[(&str, &str)]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|(p, why)| Ok((Regex::new(p)?, (*why).to_string())))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Explanation for the first pattern matching `message`, if any.
    pub fn classify(&self, message: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(re, _)| re.is_match(message))
            .map(|(_, why)| why.as_str())
    }

    /// Maps a result to an [`Outcome`]: matching errors are retriable, all
    /// other errors are fatal.
    pub fn outcome<T, E: fmt::Display>(&self, result: Result<T, E>) -> Outcome<T, E> {
        match result {
            Ok(v) => Outcome::Success(v),
            Err(e) => match self.classify(&e.to_string()) {
                Some(why) => {
                    tracing::debug!("retriable error ({}): {}", why, e);
                    Outcome::Retriable(e)
                }
                None => Outcome::Fatal(e),
            },
        }
    }
}

/// Retries only errors whose message matches one of `retryable`'s patterns;
/// any other error aborts immediately.
pub fn do_with_retryable_errors<T, E, F>(
    description: &str,
    retryable: &RetryableErrors,
    policy: &RetryPolicy,
    log: &dyn RetryLog,
    mut action: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, E>,
    E: fmt::Display,
{
    do_with_retry(description, policy, log, || retryable.outcome(action()))
}
