//! Retry loop: invoke an action until it succeeds, fails fatally, or the
//! attempt budget runs out.

use std::fmt;

use super::error::RetryError;
use super::outcome::Outcome;
use super::policy::RetryPolicy;
use super::sink::{AttemptRecord, AttemptStatus, RetryLog};

/// Runs `action` up to `policy.attempts()` times, sleeping
/// `policy.sleep_between` between attempts.
///
/// Attempts are strictly sequential and blocking. Success and fatal outcomes
/// return immediately; a retriable outcome on the last attempt returns
/// [`RetryError::MaxRetriesExceeded`]. There is no sleep after the final
/// attempt. Each attempt is reported to `log`.
pub fn do_with_retry<T, E, F>(
    description: &str,
    policy: &RetryPolicy,
    log: &dyn RetryLog,
    mut action: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Outcome<T, E>,
    E: fmt::Display,
{
    let max_attempts = policy.attempts();
    let mut attempt = 1u32;
    loop {
        match action() {
            Outcome::Success(value) => {
                report(log, description, attempt, max_attempts, AttemptStatus::Succeeded, None);
                return Ok(value);
            }
            Outcome::Fatal(e) => {
                let detail = e.to_string();
                report(log, description, attempt, max_attempts, AttemptStatus::Fatal, Some(&detail));
                return Err(RetryError::Fatal {
                    description: description.to_string(),
                    attempt,
                    source: e,
                });
            }
            Outcome::Retriable(e) => {
                let detail = e.to_string();
                if attempt >= max_attempts {
                    report(log, description, attempt, max_attempts, AttemptStatus::Exhausted, Some(&detail));
                    return Err(RetryError::MaxRetriesExceeded {
                        description: description.to_string(),
                        attempts: attempt,
                        last: e,
                    });
                }
                report(log, description, attempt, max_attempts, AttemptStatus::Retrying, Some(&detail));
                if !policy.sleep_between.is_zero() {
                    std::thread::sleep(policy.sleep_between);
                }
                attempt += 1;
            }
        }
    }
}

/// Like [`do_with_retry`] for actions returning a plain `Result`: every error
/// is retriable.
pub fn do_with_retry_result<T, E, F>(
    description: &str,
    policy: &RetryPolicy,
    log: &dyn RetryLog,
    mut action: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, E>,
    E: fmt::Display,
{
    do_with_retry(description, policy, log, || Outcome::from(action()))
}

/// Runs [`do_with_retry`] and panics on any failure, failing the calling test.
#[track_caller]
pub fn do_with_retry_or_fail<T, E, F>(
    description: &str,
    policy: &RetryPolicy,
    log: &dyn RetryLog,
    action: F,
) -> T
where
    F: FnMut() -> Outcome<T, E>,
    E: fmt::Display,
{
    match do_with_retry(description, policy, log, action) {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

/// Runs [`do_with_retry`] and only reports whether it eventually succeeded.
pub fn probe_with_retry<T, E, F>(
    description: &str,
    policy: &RetryPolicy,
    log: &dyn RetryLog,
    action: F,
) -> bool
where
    F: FnMut() -> Outcome<T, E>,
    E: fmt::Display,
{
    do_with_retry(description, policy, log, action).is_ok()
}

fn report(
    log: &dyn RetryLog,
    description: &str,
    attempt: u32,
    max_attempts: u32,
    status: AttemptStatus,
    detail: Option<&str>,
) {
    log.attempt(&AttemptRecord {
        description,
        attempt,
        max_attempts,
        status,
        detail,
    });
}
