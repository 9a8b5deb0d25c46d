pub mod config;
pub mod logging;

pub mod http;
pub mod k8s;
pub mod retry;
pub mod shell;
pub mod status;
