//! Fetching raw resource JSON from the cluster.

use std::path::PathBuf;
use std::process::Command;

use crate::config::KubectlConfig;
use crate::status::StatusError;

/// How to reach the cluster with kubectl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KubectlOptions {
    pub binary: String,
    pub context: Option<String>,
    pub config_path: Option<PathBuf>,
    pub namespace: Option<String>,
}

impl Default for KubectlOptions {
    fn default() -> Self {
        Self::from(&KubectlConfig::default())
    }
}

impl From<&KubectlConfig> for KubectlOptions {
    fn from(cfg: &KubectlConfig) -> Self {
        Self {
            binary: cfg.binary.clone(),
            context: cfg.context.clone(),
            config_path: cfg.config_path.clone(),
            namespace: cfg.namespace.clone(),
        }
    }
}

impl KubectlOptions {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Arguments for `kubectl get <kind> <name> -o json`.
    /// Cluster-scoped kinds (e.g. persistent volumes) never get `--namespace`.
    pub fn get_args(&self, kind: &str, name: &str, namespaced: bool) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(ctx) = &self.context {
            args.push("--context".to_string());
            args.push(ctx.clone());
        }
        if let Some(path) = &self.config_path {
            args.push("--kubeconfig".to_string());
            args.push(path.display().to_string());
        }
        if namespaced {
            if let Some(ns) = &self.namespace {
                args.push("--namespace".to_string());
                args.push(ns.clone());
            }
        }
        args.extend(
            ["get", kind, name, "-o", "json"]
                .iter()
                .map(|s| s.to_string()),
        );
        args
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KubeError {
    #[error("failed to run {program}: {source}")]
    Command {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("kubectl exited with {status}: {stderr}")]
    Kubectl { status: String, stderr: String },

    #[error("{kind} {name} not found")]
    NotFound { kind: String, name: String },

    #[error("failed to parse {kind} JSON: {source}")]
    Parse {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Status(#[from] StatusError),
}

impl KubeError {
    /// kubectl itself could not be started; retrying won't help.
    pub fn is_command_missing(&self) -> bool {
        matches!(self, KubeError::Command { .. })
    }
}

/// Source of resource JSON. [`Kubectl`] is the real one; tests swap in fakes.
pub trait KubeClient: Send + Sync {
    fn get_json(&self, kind: &str, name: &str, namespaced: bool) -> Result<String, KubeError>;
}

/// Runs the kubectl binary.
#[derive(Debug, Clone, Default)]
pub struct Kubectl {
    pub options: KubectlOptions,
}

impl Kubectl {
    pub fn new(options: KubectlOptions) -> Self {
        Self { options }
    }
}

impl KubeClient for Kubectl {
    fn get_json(&self, kind: &str, name: &str, namespaced: bool) -> Result<String, KubeError> {
        let args = self.options.get_args(kind, name, namespaced);
        tracing::debug!("running {} {}", self.options.binary, args.join(" "));
        let output = Command::new(&self.options.binary)
            .args(&args)
            .output()
            .map_err(|source| KubeError::Command {
                program: self.options.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.contains("NotFound") {
                return Err(KubeError::NotFound {
                    kind: kind.to_string(),
                    name: name.to_string(),
                });
            }
            return Err(KubeError::Kubectl {
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
