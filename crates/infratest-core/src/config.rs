use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default retry budget for wait helpers (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt (0 = a single attempt).
    pub max_retries: u32,
    /// Fixed pause between attempts in seconds (e.g. 0.5 = 500ms).
    pub sleep_between_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 30,
            sleep_between_secs: 10.0,
        }
    }
}

/// Timeouts for a single HTTP poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Whole-request timeout; one attempt never runs longer than this.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            timeout_secs: 30,
        }
    }
}

/// How to invoke kubectl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KubectlConfig {
    /// Program name or path.
    pub binary: String,
    /// Kube context (None = current context).
    #[serde(default)]
    pub context: Option<String>,
    /// Path to a kubeconfig file (None = kubectl's default lookup).
    #[serde(default)]
    pub config_path: Option<PathBuf>,
    /// Namespace for namespaced resources (None = kubectl's default).
    #[serde(default)]
    pub namespace: Option<String>,
}

impl Default for KubectlConfig {
    fn default() -> Self {
        Self {
            binary: "kubectl".to_string(),
            context: None,
            config_path: None,
            namespace: None,
        }
    }
}

/// Global configuration loaded from `~/.config/infratest/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfratestConfig {
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub kubectl: KubectlConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("infratest")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<InfratestConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = InfratestConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<InfratestConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: InfratestConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let cfg = InfratestConfig::default();
        assert_eq!(cfg.retry.max_retries, 30);
        assert!((cfg.retry.sleep_between_secs - 10.0).abs() < 1e-9);
        assert_eq!(cfg.http.timeout_secs, 30);
        assert_eq!(cfg.kubectl.binary, "kubectl");
        assert!(cfg.kubectl.namespace.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = InfratestConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: InfratestConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: InfratestConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, InfratestConfig::default());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            [retry]
            max_retries = 5
            sleep_between_secs = 0.25

            [kubectl]
            binary = "/usr/local/bin/kubectl"
            context = "kind-test"
            namespace = "staging"
        "#;
        let cfg: InfratestConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.retry.max_retries, 5);
        assert!((cfg.retry.sleep_between_secs - 0.25).abs() < 1e-9);
        assert_eq!(cfg.kubectl.context.as_deref(), Some("kind-test"));
        assert_eq!(cfg.kubectl.namespace.as_deref(), Some("staging"));
        assert!(cfg.kubectl.config_path.is_none());
        assert_eq!(cfg.http, HttpConfig::default());
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[http]\nconnect_timeout_secs = 2\ntimeout_secs = 4").unwrap();
        let cfg = load_from(f.path()).unwrap();
        assert_eq!(cfg.http.connect_timeout_secs, 2);
        assert_eq!(cfg.http.timeout_secs, 4);
        assert_eq!(cfg.retry, RetryConfig::default());
    }

    #[test]
    fn load_from_reports_parse_errors_with_path() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[retry]\nmax_retries = \"many\"").unwrap();
        let err = load_from(f.path()).unwrap_err();
        assert!(format!("{}", err).contains("parsing config"));
    }
}
