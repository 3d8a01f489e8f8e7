//! Bridge configuration
//!
//! Settings for the bridge binary, built with `with_*` methods or read from
//! the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{BridgeError, BridgeResult};
use crate::naming::DEFAULT_MAX_LENGTH;

/// Directory holding one sub-directory per provider
pub const ENV_PROVIDERS_DIR: &str = "OPENAPI_MCP_PROVIDERS_DIR";
/// Per-call upstream timeout in milliseconds
pub const ENV_TIMEOUT_MS: &str = "OPENAPI_MCP_TIMEOUT_MS";
/// Bound on the compressed part of tool names
pub const ENV_MAX_NAME_LENGTH: &str = "OPENAPI_MCP_MAX_NAME_LENGTH";

/// Configuration for the bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Directory scanned for providers
    #[serde(default = "default_providers_dir")]
    pub providers_dir: PathBuf,

    /// Optional timeout for each upstream call in milliseconds
    pub request_timeout_ms: Option<u64>,

    /// Maximum length of the compressed operation name
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
}

fn default_providers_dir() -> PathBuf {
    PathBuf::from("providers")
}

fn default_max_name_length() -> usize {
    DEFAULT_MAX_LENGTH
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            providers_dir: default_providers_dir(),
            request_timeout_ms: None,
            max_name_length: default_max_name_length(),
        }
    }
}

impl BridgeConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the providers directory
    pub fn with_providers_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.providers_dir = dir.into();
        self
    }

    /// Set the per-call timeout
    pub fn with_request_timeout(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = Some(timeout_ms);
        self
    }

    /// Set the name length bound
    pub fn with_max_name_length(mut self, max_name_length: usize) -> Self {
        self.max_name_length = max_name_length;
        self
    }

    /// Get the per-call timeout as Duration
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Read configuration from `OPENAPI_MCP_*` environment variables
    pub fn from_env() -> BridgeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through a variable lookup function
    pub fn from_lookup<F>(lookup: F) -> BridgeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_PROVIDERS_DIR).filter(|d| !d.trim().is_empty()) {
            config.providers_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup(ENV_TIMEOUT_MS) {
            config.request_timeout_ms = Some(parse_number(ENV_TIMEOUT_MS, &value)?);
        }
        if let Some(value) = lookup(ENV_MAX_NAME_LENGTH) {
            let max_name_length: usize = parse_number(ENV_MAX_NAME_LENGTH, &value)?;
            if max_name_length == 0 {
                return Err(BridgeError::InvalidConfig(format!(
                    "{} must be greater than zero",
                    ENV_MAX_NAME_LENGTH
                )));
            }
            config.max_name_length = max_name_length;
        }

        Ok(config)
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> BridgeResult<T> {
    value.trim().parse().map_err(|_| {
        BridgeError::InvalidConfig(format!("{} must be a number, got '{}'", key, value))
    })
}
