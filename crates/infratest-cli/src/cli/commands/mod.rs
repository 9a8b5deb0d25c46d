//! CLI command handlers, one file per command family.

mod config;
mod wait_cmd;
mod wait_http;
mod wait_k8s;

pub use config::run_config;
pub use wait_cmd::run_wait_cmd;
pub use wait_http::run_wait_http;
pub use wait_k8s::{run_wait_deployment, run_wait_pod, run_wait_pv, run_wait_pvc};
