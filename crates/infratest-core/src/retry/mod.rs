//! Retry/poll engine.
//!
//! Actions report each attempt as an [`Outcome`]: success, fatal, or
//! retriable. The engine retries retriable outcomes at a fixed interval until
//! the [`RetryPolicy`] budget is spent, and reports every attempt to an
//! injected [`RetryLog`].

mod background;
mod classify;
mod error;
mod outcome;
mod policy;
mod run;
mod sink;

pub use background::{do_in_background_until_stopped, BackgroundHandle};
pub use classify::{do_with_retryable_errors, RetryableErrors};
pub use error::RetryError;
pub use outcome::Outcome;
pub use policy::RetryPolicy;
pub use run::{do_with_retry, do_with_retry_or_fail, do_with_retry_result, probe_with_retry};
pub use sink::{AttemptRecord, AttemptStatus, DiscardLog, LoggedAttempt, MemoryLog, RetryLog, TracingLog};

#[cfg(test)]
mod tests;
