//! Client configuration.
//!
//! Resolution order, later layers winning:
//!
//! 1. Built-in defaults (`http://localhost:8000`)
//! 2. `~/.bellboard/config.yaml`, if present
//! 3. `BELLBOARD_ENDPOINT` / `BELLBOARD_STATUS_ENDPOINT`
//! 4. Explicit overrides from the caller (CLI flags)

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Default backend endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Environment variable overriding the HTTP endpoint.
pub const ENDPOINT_ENV: &str = "BELLBOARD_ENDPOINT";

/// Environment variable overriding the real-time status endpoint.
pub const STATUS_ENDPOINT_ENV: &str = "BELLBOARD_STATUS_ENDPOINT";

/// Connection settings for the Bellboard backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL for `/submit` and `/leaderboard`.
    pub endpoint: String,
    /// Base URL for `/ws/<task_id>`. Derived from `endpoint` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_endpoint: Option<String>,
    /// Whole-request timeout for HTTP calls.
    pub request_timeout_secs: u64,
    /// Connect timeout for HTTP calls.
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            status_endpoint: None,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    /// Load defaults, the user config file, environment overrides and an
    /// optional explicit endpoint, then validate.
    pub fn load(endpoint: Option<&str>) -> ClientResult<Self> {
        let config = match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.layered(|key| std::env::var(key).ok(), endpoint)
    }

    /// Apply environment overrides read through `lookup`, then `endpoint`,
    /// then validate the result.
    pub fn layered(
        self,
        lookup: impl Fn(&str) -> Option<String>,
        endpoint: Option<&str>,
    ) -> ClientResult<Self> {
        let mut config = self.with_env_overrides(lookup);
        if let Some(endpoint) = endpoint {
            config = config.with_endpoint(endpoint);
        }
        let config = config.validated()?;
        debug!("Using endpoint {}", config.endpoint);
        Ok(config)
    }

    /// Parse a YAML config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> ClientResult<Self> {
        debug!("Loading client config from {}", path.display());
        let source = std::fs::read_to_string(path)?;
        Ok(serde_yaml_ng::from_str(&source)?)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint;
        }
        if let Some(status) = lookup(STATUS_ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            self.status_endpoint = Some(status);
        }
        self
    }

    /// Override the HTTP endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the status endpoint.
    pub fn with_status_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.status_endpoint = Some(endpoint.into());
        self
    }

    /// Check endpoint schemes and strip trailing slashes.
    pub fn validated(mut self) -> ClientResult<Self> {
        self.endpoint = check_scheme(&self.endpoint, &["http://", "https://"])?;
        if let Some(status) = self.status_endpoint.take() {
            self.status_endpoint = Some(check_scheme(&status, &["ws://", "wss://"])?);
        }
        Ok(self)
    }

    /// Base URL of the real-time status channel.
    pub fn status_base(&self) -> String {
        if let Some(status) = &self.status_endpoint {
            return status.clone();
        }
        if let Some(rest) = self.endpoint.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.endpoint.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.endpoint.clone()
        }
    }

    /// HTTP request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// HTTP connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// `~/.bellboard/config.yaml`, if a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bellboard").join("config.yaml"))
}

fn check_scheme(endpoint: &str, schemes: &[&str]) -> ClientResult<String> {
    let trimmed = endpoint.trim().trim_end_matches('/');
    let host = schemes
        .iter()
        .find_map(|scheme| trimmed.strip_prefix(scheme));
    match host {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(ClientError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: format!("expected {}", schemes.join(" or ")),
        }),
    }
}
