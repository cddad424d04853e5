use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use log::debug;
use lto_common::api::{parse_node_url, NodeClientConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default values for configuration
pub mod defaults {
    pub const NODE_URL: &str = "http://localhost:6869";
    pub const CHAIN_ID: char = 'T';
    pub const LOG_LEVEL: &str = "info";

    pub const POLL_INTERVAL_MS: u64 = 1000;
    pub const CONFIRMATION_TIMEOUT_SECS: u64 = 60;
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const CONNECTION_TIMEOUT_SECS: u64 = 10;
    pub const MAX_RETRIES: u32 = 3;
    pub const RETRY_DELAY_MS: u64 = 1000;

    // Validation limits
    pub const MIN_POLL_INTERVAL_MS: u64 = 10;
    pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;
    pub const MIN_TIMEOUT_SECS: u64 = 1;
    pub const MAX_TIMEOUT_SECS: u64 = 300;
    pub const MAX_CONFIRMATION_TIMEOUT_SECS: u64 = 3600;
    pub const MAX_RETRIES_LIMIT: u32 = 10;
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid node url '{url}': {reason}")]
    InvalidNodeUrl { url: String, reason: String },
    #[error("Invalid chain id '{0}': must be a single ASCII character")]
    InvalidChainId(String),
    #[error("A root seed is required to run against a remote node")]
    MissingRootSeed,
    #[error("Invalid {field}: {value} - must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

/// Runner settings, loaded from an optional JSON file and overridden by CLI flags
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_node_url")]
    pub node_url: String,

    /// Sent as `X-API-Key` when set
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_chain_id")]
    pub chain_id: String,

    /// Seed of the account that funds every actor
    #[serde(default)]
    pub root_seed: Option<String>,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_node_url() -> String {
    defaults::NODE_URL.to_string()
}
fn default_chain_id() -> String {
    defaults::CHAIN_ID.to_string()
}
fn default_poll_interval_ms() -> u64 {
    defaults::POLL_INTERVAL_MS
}
fn default_confirmation_timeout_secs() -> u64 {
    defaults::CONFIRMATION_TIMEOUT_SECS
}
fn default_request_timeout_secs() -> u64 {
    defaults::REQUEST_TIMEOUT_SECS
}
fn default_connection_timeout_secs() -> u64 {
    defaults::CONNECTION_TIMEOUT_SECS
}
fn default_max_retries() -> u32 {
    defaults::MAX_RETRIES
}
fn default_retry_delay_ms() -> u64 {
    defaults::RETRY_DELAY_MS
}
fn default_log_level() -> String {
    defaults::LOG_LEVEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            node_url: default_node_url(),
            api_key: None,
            chain_id: default_chain_id(),
            root_seed: None,
            poll_interval_ms: default_poll_interval_ms(),
            confirmation_timeout_secs: default_confirmation_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            connection_timeout_secs: default_connection_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            log_level: default_log_level(),
        }
    }
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading settings from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check the settings. A root seed is only required for a remote node.
    pub fn validate(&self, in_memory: bool) -> Result<(), ConfigError> {
        let url = parse_node_url(&self.node_url).map_err(|e| ConfigError::InvalidNodeUrl {
            url: self.node_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidNodeUrl {
                url: self.node_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        self.chain_id_byte()?;

        if !in_memory && self.root_seed.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingRootSeed);
        }

        check_range(
            "poll_interval_ms",
            self.poll_interval_ms,
            defaults::MIN_POLL_INTERVAL_MS,
            defaults::MAX_POLL_INTERVAL_MS,
        )?;
        check_range(
            "confirmation_timeout_secs",
            self.confirmation_timeout_secs,
            defaults::MIN_TIMEOUT_SECS,
            defaults::MAX_CONFIRMATION_TIMEOUT_SECS,
        )?;
        check_range(
            "request_timeout_secs",
            self.request_timeout_secs,
            defaults::MIN_TIMEOUT_SECS,
            defaults::MAX_TIMEOUT_SECS,
        )?;
        check_range(
            "connection_timeout_secs",
            self.connection_timeout_secs,
            defaults::MIN_TIMEOUT_SECS,
            defaults::MAX_TIMEOUT_SECS,
        )?;
        check_range(
            "max_retries",
            self.max_retries as u64,
            0,
            defaults::MAX_RETRIES_LIMIT as u64,
        )?;

        Ok(())
    }

    pub fn chain_id_byte(&self) -> Result<u8, ConfigError> {
        match self.chain_id.as_bytes() {
            [byte] if byte.is_ascii_graphic() => Ok(*byte),
            _ => Err(ConfigError::InvalidChainId(self.chain_id.clone())),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }

    pub fn to_client_config(&self) -> NodeClientConfig {
        NodeClientConfig {
            api_key: self.api_key.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connection_timeout: Duration::from_secs(self.connection_timeout_secs),
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}
