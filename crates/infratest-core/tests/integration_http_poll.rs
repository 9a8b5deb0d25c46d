//! Integration test: poll a local HTTP server that becomes healthy after a few requests.

mod common;

use std::time::Duration;

use infratest_core::http::{http_get, http_get_with_retry, HttpError, HttpOptions};
use infratest_core::retry::{AttemptStatus, MemoryLog, RetryPolicy};

fn opts() -> HttpOptions {
    HttpOptions {
        connect_timeout: Duration::from_secs(2),
        timeout: Duration::from_secs(5),
        headers: vec![("X-Test".to_string(), "1".to_string())],
    }
}

#[test]
fn plain_get_returns_status_and_body() {
    let server = common::status_server::start(0, "ok");
    let resp = http_get(&server.url, &opts()).unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "ok");
}

#[test]
fn retries_until_endpoint_is_healthy() {
    let server = common::status_server::start(2, "{\"status\":\"ready\"}");
    let log = MemoryLog::new();
    let policy = RetryPolicy::new(5, Duration::from_millis(10));
    let resp = http_get_with_retry(&server.url, &opts(), 200, Some("ready"), &policy, &log).unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(server.requests(), 3);
    let statuses: Vec<_> = log.records().iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            AttemptStatus::Retrying,
            AttemptStatus::Retrying,
            AttemptStatus::Succeeded
        ]
    );
}

#[test]
fn wrong_body_exhausts_retries() {
    let server = common::status_server::start(0, "degraded");
    let policy = RetryPolicy::new(2, Duration::from_millis(5));
    let err = http_get_with_retry(&server.url, &opts(), 200, Some("ready"), &policy, &MemoryLog::new())
        .unwrap_err();
    assert!(err.is_exhausted());
    assert_eq!(err.attempts(), 3);
    assert_eq!(server.requests(), 3);
    assert!(matches!(err.into_inner(), HttpError::UnexpectedBody { .. }));
}

#[test]
fn connection_refused_is_retriable() {
    // Bind then drop to get a port nobody is listening on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let url = format!("http://127.0.0.1:{}/", port);
    let policy = RetryPolicy::new(1, Duration::from_millis(5));
    let err = http_get_with_retry(&url, &opts(), 200, None, &policy, &MemoryLog::new()).unwrap_err();
    assert!(err.is_exhausted());
    assert!(matches!(err.inner(), HttpError::Transport(_)));
}
