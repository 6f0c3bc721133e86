//! Configuration types for the report agent
//!
//! Holds the run configuration assembled from CLI flags and the
//! optional TOML config file.

use std::path::{Path, PathBuf};

use locator_kit::naming::NamingPolicy;
use locator_kit::resolve::LookupMode;
use serde::Deserialize;

/// Output format for resolution results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Full envelope with every resolution
    Full,
    /// Resolved/missing counts only
    Summary,
    /// One report-fetch query string per resolved container
    Query,
}

impl OutputFormat {
    /// Get the default output filename for this format
    #[allow(dead_code)]
    pub fn default_filename(&self) -> &'static str {
        match self {
            OutputFormat::Full => "locators.json",
            OutputFormat::Summary => "summary.json",
            OutputFormat::Query => "queries.txt",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Full => write!(f, "full"),
            OutputFormat::Summary => write!(f, "summary"),
            OutputFormat::Query => write!(f, "query"),
        }
    }
}

/// Configuration for one resolution run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Input path (manifest file or directory)
    pub input_path: PathBuf,

    /// Output file path (None means console-only output)
    pub output_file: Option<PathBuf>,

    /// Output format
    pub output_format: OutputFormat,

    /// Argo CD server URL (overrides the config file)
    pub server: Option<String>,

    /// Argo CD application name
    pub app: Option<String>,

    /// Restrict resolution to this container
    pub container: Option<String>,

    /// Lookup mode
    pub mode: LookupMode,

    /// Optional TOML config file
    pub config_file: Option<PathBuf>,

    /// Suppress progress output
    pub quiet: bool,
}

/// Agent settings read from the optional TOML config file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub server: ServerConfig,
    pub naming: NamingConfig,
}

/// `[server]` section
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Argo CD server URL
    pub url: Option<String>,
    /// Environment variable holding the bearer token
    pub token_env: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: None,
            token_env: None,
            timeout_secs: 10,
        }
    }
}

/// `[naming]` section, selecting the scanner naming-convention generation
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub lowercase_kind: bool,
    pub pod_hash_len: usize,
}

impl Default for NamingConfig {
    fn default() -> Self {
        let policy = NamingPolicy::default();
        Self {
            lowercase_kind: policy.lowercase_kind,
            pod_hash_len: policy.pod_hash_len,
        }
    }
}

impl NamingConfig {
    pub fn policy(&self) -> NamingPolicy {
        NamingPolicy {
            lowercase_kind: self.lowercase_kind,
            pod_hash_len: self.pod_hash_len,
        }
    }
}

impl AgentConfig {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))
    }
}

/// Result of a resolution run
#[derive(Debug)]
pub struct RunSummary {
    /// Containers considered
    pub total: usize,

    /// Containers with a resolved locator
    pub resolved: usize,

    /// Containers with no report found
    pub missing: usize,

    /// Manifests or containers that errored
    pub errors: usize,

    /// Total run duration
    pub duration: std::time::Duration,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            total: 0,
            resolved: 0,
            missing: 0,
            errors: 0,
            duration: std::time::Duration::ZERO,
        }
    }

    /// Get the exit code based on results
    pub fn exit_code(&self) -> i32 {
        if self.errors > 0 {
            2
        } else if self.missing > 0 {
            1
        } else {
            0
        }
    }
}

/// Errors that can occur loading the config file
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the file
    Read(PathBuf, std::io::Error),
    /// Failed to parse TOML
    Parse(PathBuf, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read(p, e) => write!(f, "Failed to read config {}: {}", p.display(), e),
            ConfigError::Parse(p, e) => write!(f, "Failed to parse config {}: {}", p.display(), e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read(_, e) => Some(e),
            ConfigError::Parse(_, _) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_config_defaults() {
        let config: AgentConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.url, None);
        assert_eq!(config.server.timeout_secs, 10);
        assert_eq!(config.naming.policy(), NamingPolicy::default());
    }

    #[test]
    fn test_agent_config_naming_section() {
        let config: AgentConfig = toml::from_str(
            "[naming]\nlowercase_kind = false\npod_hash_len = 6\n",
        )
        .unwrap();
        let policy = config.naming.policy();
        assert!(!policy.lowercase_kind);
        assert_eq!(policy.pod_hash_len, 6);
    }

    #[test]
    fn test_agent_config_server_section() {
        let config: AgentConfig = toml::from_str(
            "[server]\nurl = \"https://argocd.example.com\"\ntoken_env = \"ARGOCD_TOKEN\"\n",
        )
        .unwrap();
        assert_eq!(config.server.url.as_deref(), Some("https://argocd.example.com"));
        assert_eq!(config.server.token_env.as_deref(), Some("ARGOCD_TOKEN"));
    }

    #[test]
    fn test_run_summary_exit_codes() {
        let mut summary = RunSummary::new();
        assert_eq!(summary.exit_code(), 0);
        summary.missing = 1;
        assert_eq!(summary.exit_code(), 1);
        summary.errors = 1;
        assert_eq!(summary.exit_code(), 2);
    }
}
