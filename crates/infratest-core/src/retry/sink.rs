//! Per-attempt logging sinks.
//!
//! The engine reports every attempt to a [`RetryLog`] passed in by the caller.
//! Sinks are purely observational; nothing they do affects retry decisions.

use std::sync::Mutex;

/// What happened on one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    Succeeded,
    Fatal,
    /// Retriable failure; another attempt follows after the sleep.
    Retrying,
    /// Retriable failure on the last permitted attempt.
    Exhausted,
}

impl AttemptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptStatus::Succeeded => "succeeded",
            AttemptStatus::Fatal => "fatal",
            AttemptStatus::Retrying => "retrying",
            AttemptStatus::Exhausted => "exhausted",
        }
    }
}

/// One attempt as seen by a sink.
#[derive(Debug, Clone, Copy)]
pub struct AttemptRecord<'a> {
    pub description: &'a str,
    /// 1-based attempt number.
    pub attempt: u32,
    pub max_attempts: u32,
    pub status: AttemptStatus,
    /// Error text for failed attempts.
    pub detail: Option<&'a str>,
}

pub trait RetryLog: Send + Sync {
    fn attempt(&self, record: &AttemptRecord<'_>);
}

/// Default sink: one `tracing` event per attempt.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl RetryLog for TracingLog {
    fn attempt(&self, r: &AttemptRecord<'_>) {
        let detail = r.detail.unwrap_or("");
        match r.status {
            AttemptStatus::Succeeded => tracing::info!(
                description = r.description,
                attempt = r.attempt,
                max_attempts = r.max_attempts,
                "{}: attempt {} succeeded",
                r.description,
                r.attempt
            ),
            AttemptStatus::Retrying => tracing::info!(
                description = r.description,
                attempt = r.attempt,
                max_attempts = r.max_attempts,
                "{}: attempt {}/{} failed, retrying: {}",
                r.description,
                r.attempt,
                r.max_attempts,
                detail
            ),
            AttemptStatus::Fatal => tracing::warn!(
                description = r.description,
                attempt = r.attempt,
                "{}: attempt {} returned a fatal error: {}",
                r.description,
                r.attempt,
                detail
            ),
            AttemptStatus::Exhausted => tracing::warn!(
                description = r.description,
                attempt = r.attempt,
                max_attempts = r.max_attempts,
                "{}: giving up after {} attempts: {}",
                r.description,
                r.attempt,
                detail
            ),
        }
    }
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardLog;

impl RetryLog for DiscardLog {
    fn attempt(&self, _record: &AttemptRecord<'_>) {}
}

/// Owned copy of an [`AttemptRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedAttempt {
    pub description: String,
    pub attempt: u32,
    pub max_attempts: u32,
    pub status: AttemptStatus,
    pub detail: Option<String>,
}

/// Sink that keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<LoggedAttempt>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records so far.
    pub fn records(&self) -> Vec<LoggedAttempt> {
        match self.records.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RetryLog for MemoryLog {
    fn attempt(&self, r: &AttemptRecord<'_>) {
        let entry = LoggedAttempt {
            description: r.description.to_string(),
            attempt: r.attempt,
            max_attempts: r.max_attempts,
            status: r.status,
            detail: r.detail.map(str::to_string),
        };
        match self.records.lock() {
            Ok(mut g) => g.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}
