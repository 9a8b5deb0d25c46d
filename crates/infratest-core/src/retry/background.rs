//! Run an action periodically on a background thread until told to stop.

use std::fmt;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::sink::{AttemptRecord, AttemptStatus, RetryLog};

/// Handle to a background runner started by [`do_in_background_until_stopped`].
///
/// Dropping the handle stops the runner as well.
pub struct BackgroundHandle {
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<u64>>,
}

impl BackgroundHandle {
    /// Signals the runner and waits for it. An in-flight run completes first.
    /// Returns the number of completed runs.
    pub fn stop(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        // Dropping the sender disconnects the channel, which the runner also treats as stop.
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        match self.thread.take() {
            Some(t) => t.join().unwrap_or_else(|_| {
                tracing::warn!("background runner panicked");
                0
            }),
            None => 0,
        }
    }
}

impl fmt::Debug for BackgroundHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundHandle")
            .field("running", &self.thread.is_some())
            .finish()
    }
}

impl Drop for BackgroundHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Starts `action` on a new thread, running it once immediately and then
/// every `sleep_between` until the returned handle is stopped.
///
/// Errors from a run are reported to `log` and do not stop the runner.
pub fn do_in_background_until_stopped<E, F>(
    description: &str,
    sleep_between: Duration,
    log: Arc<dyn RetryLog>,
    mut action: F,
) -> BackgroundHandle
where
    F: FnMut() -> Result<(), E> + Send + 'static,
    E: fmt::Display + 'static,
{
    let (stop_tx, stop_rx) = mpsc::channel::<()>();
    let description = description.to_string();
    let thread = thread::spawn(move || {
        let mut runs = 0u64;
        loop {
            let result = action();
            runs += 1;
            let (status, detail) = match &result {
                Ok(()) => (AttemptStatus::Succeeded, None),
                Err(e) => (AttemptStatus::Retrying, Some(e.to_string())),
            };
            log.attempt(&AttemptRecord {
                description: &description,
                attempt: u32::try_from(runs).unwrap_or(u32::MAX),
                max_attempts: 0,
                status,
                detail: detail.as_deref(),
            });
            match stop_rx.recv_timeout(sleep_between) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!("{}: background runner stopped after {} runs", description, runs);
        runs
    });
    BackgroundHandle {
        stop_tx: Some(stop_tx),
        thread: Some(thread),
    }
}
