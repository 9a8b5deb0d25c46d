//! HTTP polling.
//!
//! Uses the curl crate (libcurl) for plain GET requests and the retry engine
//! to keep polling until an endpoint answers with the expected response.

mod error;

use std::time::Duration;

use crate::config::HttpConfig;
use crate::retry::{do_with_retry, Outcome, RetryError, RetryLog, RetryPolicy};

pub use error::HttpError;

/// Per-request settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    /// Upper bound on a single request; the engine adds no timeout of its own.
    pub timeout: Duration,
    /// Extra request headers as `(name, value)`.
    pub headers: Vec<(String, String)>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self::from(&HttpConfig::default())
    }
}

impl From<&HttpConfig> for HttpOptions {
    fn from(cfg: &HttpConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            headers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: String,
}

fn validate_url(url: &str) -> Result<(), HttpError> {
    let parsed = url::Url::parse(url).map_err(|e| HttpError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(HttpError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// Performs a GET and returns status and body. Any status is a successful
/// response here; checking it is the caller's business.
///
/// Runs in the current thread.
pub fn http_get(url: &str, opts: &HttpOptions) -> Result<HttpResponse, HttpError> {
    validate_url(url)?;

    let mut body: Vec<u8> = Vec::new();
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;

    if !opts.headers.is_empty() {
        let mut list = curl::easy::List::new();
        for (k, v) in &opts.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    Ok(HttpResponse {
        status,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// Polls `url` until it returns `expected_status` and, if given, a body
/// containing `expected_body`.
pub fn http_get_with_retry(
    url: &str,
    opts: &HttpOptions,
    expected_status: u32,
    expected_body: Option<&str>,
    policy: &RetryPolicy,
    log: &dyn RetryLog,
) -> Result<HttpResponse, RetryError<HttpError>> {
    http_get_with_validation(
        url,
        opts,
        |resp| {
            if resp.status != expected_status {
                return Err(HttpError::UnexpectedStatus {
                    url: url.to_string(),
                    expected: expected_status,
                    status: resp.status,
                    body: resp.body.clone(),
                });
            }
            match expected_body {
                Some(want) if !resp.body.contains(want) => Err(HttpError::UnexpectedBody {
                    url: url.to_string(),
                    expected: want.to_string(),
                    body: resp.body.clone(),
                }),
                _ => Ok(()),
            }
        },
        policy,
        log,
    )
}

/// Polls `url` until `validate` accepts the response. Rejections are retried;
/// malformed URLs fail immediately.
pub fn http_get_with_validation<V>(
    url: &str,
    opts: &HttpOptions,
    validate: V,
    policy: &RetryPolicy,
    log: &dyn RetryLog,
) -> Result<HttpResponse, RetryError<HttpError>>
where
    V: Fn(&HttpResponse) -> Result<(), HttpError>,
{
    let description = format!("HTTP GET to URL {}", url);
    do_with_retry(&description, policy, log, || match http_get(url, opts) {
        Ok(resp) => match validate(&resp) {
            Ok(()) => Outcome::Success(resp),
            Err(e) => Outcome::Retriable(e),
        },
        Err(e) if e.is_fatal() => Outcome::Fatal(e),
        Err(e) => Outcome::Retriable(e),
    })
}
