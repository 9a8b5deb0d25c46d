//! CLI for the infratest wait helpers.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use infratest_core::config::{self, InfratestConfig};
use infratest_core::k8s::KubectlOptions;
use infratest_core::retry::RetryPolicy;
use infratest_core::status::{PersistentVolumeClaimPhase, PersistentVolumePhase};
use std::path::PathBuf;
use std::time::Duration;

use commands::{
    run_config, run_wait_cmd, run_wait_deployment, run_wait_http, run_wait_pod, run_wait_pv,
    run_wait_pvc,
};

/// Top-level CLI for infratest.
#[derive(Debug, Parser)]
#[command(name = "infratest")]
#[command(about = "Wait for infrastructure to reach a desired state", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the XDG default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides for the configured retry budget.
#[derive(Debug, Clone, Default, Args)]
pub struct RetryArgs {
    /// Retries after the first attempt (0 = try once).
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,
    /// Seconds to sleep between attempts.
    #[arg(long, value_name = "SECS")]
    pub sleep: Option<f64>,
}

impl RetryArgs {
    pub fn policy(&self, cfg: &InfratestConfig) -> RetryPolicy {
        let mut policy = RetryPolicy::from(&cfg.retry);
        if let Some(n) = self.retries {
            policy.max_retries = n;
        }
        if let Some(secs) = self.sleep {
            policy.sleep_between = Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO);
        }
        policy
    }
}

/// Overrides for how kubectl is invoked.
#[derive(Debug, Clone, Default, Args)]
pub struct KubeArgs {
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,
    #[arg(long)]
    pub context: Option<String>,
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,
}

impl KubeArgs {
    pub fn options(&self, cfg: &InfratestConfig) -> KubectlOptions {
        let mut opts = KubectlOptions::from(&cfg.kubectl);
        if let Some(ns) = &self.namespace {
            opts.namespace = Some(ns.clone());
        }
        if let Some(ctx) = &self.context {
            opts.context = Some(ctx.clone());
        }
        if let Some(path) = &self.kubeconfig {
            opts.config_path = Some(path.clone());
        }
        opts
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Poll a URL until it returns the expected status (and body).
    WaitHttp {
        url: String,
        /// Expected HTTP status code.
        #[arg(long, default_value = "200")]
        status: u32,
        /// Substring the response body must contain.
        #[arg(long, value_name = "TEXT")]
        body_contains: Option<String>,
        #[command(flatten)]
        retry: RetryArgs,
    },

    /// Rerun a command until it exits successfully.
    WaitCmd {
        #[command(flatten)]
        retry: RetryArgs,
        /// Program and arguments (use `--` before them).
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Wait for a PersistentVolume to reach a phase.
    WaitPv {
        name: String,
        #[arg(long, default_value = "Available")]
        phase: PersistentVolumePhase,
        #[command(flatten)]
        kube: KubeArgs,
        #[command(flatten)]
        retry: RetryArgs,
    },

    /// Wait for a PersistentVolumeClaim to reach a phase.
    WaitPvc {
        name: String,
        #[arg(long, default_value = "Bound")]
        phase: PersistentVolumeClaimPhase,
        #[command(flatten)]
        kube: KubeArgs,
        #[command(flatten)]
        retry: RetryArgs,
    },

    /// Wait for a pod to be running with all containers ready.
    WaitPod {
        name: String,
        #[command(flatten)]
        kube: KubeArgs,
        #[command(flatten)]
        retry: RetryArgs,
    },

    /// Wait for a deployment rollout to complete.
    WaitDeployment {
        name: String,
        #[command(flatten)]
        kube: KubeArgs,
        #[command(flatten)]
        retry: RetryArgs,
    },

    /// Show the config file path and effective configuration.
    Config,
}

fn load_config(path: Option<&PathBuf>) -> Result<InfratestConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_ref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::WaitHttp {
                url,
                status,
                body_contains,
                retry,
            } => run_wait_http(&cfg, &url, status, body_contains.as_deref(), &retry.policy(&cfg))?,
            CliCommand::WaitCmd { retry, command } => {
                run_wait_cmd(&command, &retry.policy(&cfg))?
            }
            CliCommand::WaitPv {
                name,
                phase,
                kube,
                retry,
            } => run_wait_pv(&kube.options(&cfg), &name, phase, &retry.policy(&cfg))?,
            CliCommand::WaitPvc {
                name,
                phase,
                kube,
                retry,
            } => run_wait_pvc(&kube.options(&cfg), &name, phase, &retry.policy(&cfg))?,
            CliCommand::WaitPod { name, kube, retry } => {
                run_wait_pod(&kube.options(&cfg), &name, &retry.policy(&cfg))?
            }
            CliCommand::WaitDeployment { name, kube, retry } => {
                run_wait_deployment(&kube.options(&cfg), &name, &retry.policy(&cfg))?
            }
            CliCommand::Config => run_config(&cfg, cli.config.as_deref())?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
