//! # Platform Configuration
//!
//! Mirrors the host framework's `fan:` platform stanza:
//!
//! ```yaml
//! scan_interval: 30
//! fan:
//!   - platform: xiaomi_airfresh
//!     host: 192.168.1.50
//!     token: 0123456789abcdef0123456789abcdef
//!     name: Living Room
//!     model: dmaker.airfresh.a1
//! ```
//!
//! Only `host` and `token` are required. Entries of other platforms are skipped.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::device::Model;
use crate::error::ConfigError;
use crate::token::Token;
use crate::warn;

pub const PLATFORM: &str = "xiaomi_airfresh";
pub const DEFAULT_NAME: &str = "Xiaomi Air Fresh";
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_RETRIES: u32 = 3;

#[derive(Debug, Clone)]
pub struct Config {
    /// Time between two polls of every device.
    pub scan_interval: Duration,
    /// Time a single request attempt may take before it counts as lost.
    pub timeout: Duration,
    /// How many times a timed out request is retried after a fresh handshake.
    pub retries: u32,
    pub devices: Vec<DeviceConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    pub host: String,
    pub token: Token,
    pub name: String,
    pub model: Model,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    scan_interval: Option<u64>,
    timeout: Option<u64>,
    retries: Option<u32>,
    #[serde(default)]
    fan: Vec<RawPlatform>,
}

#[derive(Debug, Deserialize)]
struct RawPlatform {
    platform: String,
    host: Option<String>,
    token: Option<serde_yaml::Value>,
    name: Option<String>,
    model: Option<String>,
}

impl Config {
    /// Reads and validates a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content: String = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(content)?;

        let scan_interval: Duration = positive_secs(raw.scan_interval, DEFAULT_SCAN_INTERVAL, "scan_interval")?;
        let timeout: Duration = positive_secs(raw.timeout, DEFAULT_TIMEOUT, "timeout")?;

        let mut devices: Vec<DeviceConfig> = Vec::new();
        for (index, entry) in raw.fan.into_iter().enumerate() {
            if entry.platform != PLATFORM {
                warn!("Skipping fan entry #{index} of platform '{}'", entry.platform);
                continue;
            }
            devices.push(DeviceConfig::from_raw(index, entry)?);
        }

        if devices.is_empty() {
            return Err(ConfigError::NoDevices);
        }

        Ok(Self {
            scan_interval,
            timeout,
            retries: raw.retries.unwrap_or(DEFAULT_RETRIES),
            devices,
        })
    }

    /// A configuration for one device given on the command line.
    pub fn single(device: DeviceConfig) -> Self {
        Self {
            scan_interval: DEFAULT_SCAN_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            devices: vec![device],
        }
    }
}

impl DeviceConfig {
    pub fn new(host: impl Into<String>, token: Token, name: Option<String>) -> Self {
        Self {
            host: host.into(),
            token,
            name: name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            model: Model::default(),
        }
    }

    fn from_raw(index: usize, raw: RawPlatform) -> Result<Self, ConfigError> {
        let host: String = raw
            .host
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .ok_or(ConfigError::Missing { index, field: "host" })?;

        let token_str: String = raw
            .token
            .as_ref()
            .and_then(scalar_to_string)
            .ok_or(ConfigError::Missing { index, field: "token" })?;
        let token: Token = token_str
            .parse()
            .map_err(|source| ConfigError::Token { index, source })?;

        let model: Model = match raw.model {
            Some(model) => model
                .parse()
                .map_err(|_| ConfigError::Model { index, model })?,
            None => Model::default(),
        };

        Ok(Self {
            host,
            token,
            name: raw.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            model,
        })
    }
}

fn positive_secs(
    value: Option<u64>,
    default: Duration,
    field: &'static str,
) -> Result<Duration, ConfigError> {
    match value {
        None => Ok(default),
        Some(0) => Err(ConfigError::NotPositive { field }),
        Some(secs) => Ok(Duration::from_secs(secs)),
    }
}

// An all-digit token is read by YAML as a number.
fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        // Reported as a bad token instead of a missing one.
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
