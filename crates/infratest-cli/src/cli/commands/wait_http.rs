//! wait-http command: poll a URL until it answers as expected.

use anyhow::Result;
use infratest_core::config::InfratestConfig;
use infratest_core::http::{http_get_with_retry, HttpOptions};
use infratest_core::retry::{RetryPolicy, TracingLog};

pub fn run_wait_http(
    cfg: &InfratestConfig,
    url: &str,
    status: u32,
    body_contains: Option<&str>,
    policy: &RetryPolicy,
) -> Result<()> {
    let opts = HttpOptions::from(&cfg.http);
    let resp = http_get_with_retry(url, &opts, status, body_contains, policy, &TracingLog)?;
    println!("{} returned HTTP {}", url, resp.status);
    Ok(())
}
