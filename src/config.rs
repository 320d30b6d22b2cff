//! Configuration loading and validation
//!
//! Reads the JSON config document, parses `"1A+4B"`-style key strings, and
//! builds the immutable [`ShortcutRegistry`]. Every failure here is fatal:
//! either the full configuration is valid or the daemon does not start.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::registry::{HttpMethod, KeyCode, RegistryError, Shortcut, ShortcutRegistry};

/// Default sleep between sampling ticks.
const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

/// Default window during which a just-fired shortcut will not re-fire.
const DEFAULT_COOLDOWN_MS: u64 = 1000;

/// Daemon configuration, validated and ready for the worker
#[derive(Debug)]
pub struct Config {
    /// Registered shortcuts, in declaration order.
    pub registry: ShortcutRegistry,
    /// Sleep between sampling ticks.
    pub poll_interval: Duration,
    /// Per-shortcut cooldown after a firing.
    pub cooldown: Duration,
}

/// Fatal configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("config file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("failed to parse key token '{0}': expected a hex key code")]
    BadKeyToken(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Raw document shape, field names as they appear in the file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigDoc {
    shortcuts: Vec<ShortcutDoc>,
    poll_interval_ms: Option<u64>,
    cooldown_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShortcutDoc {
    keys: String,
    url: String,
    method: Option<String>,
    #[serde(default)]
    headers: BTreeMap<String, String>,
    #[serde(default = "default_alert_on_error")]
    alert_on_error: bool,
}

fn default_alert_on_error() -> bool {
    true
}

impl Config {
    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate a config document
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let doc: ConfigDoc = serde_json::from_str(raw)?;

        let mut shortcuts = Vec::with_capacity(doc.shortcuts.len());
        for entry in doc.shortcuts {
            let method = match entry.method {
                Some(m) => m.parse::<HttpMethod>()?,
                None => HttpMethod::default(),
            };
            shortcuts.push(Shortcut {
                keys: parse_keys(&entry.keys)?,
                url: entry.url,
                method,
                headers: entry.headers.into_iter().collect(),
                alert_on_error: entry.alert_on_error,
            });
        }

        Ok(Self {
            registry: ShortcutRegistry::new(shortcuts)?,
            poll_interval: Duration::from_millis(
                doc.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            ),
            cooldown: Duration::from_millis(doc.cooldown_ms.unwrap_or(DEFAULT_COOLDOWN_MS)),
        })
    }
}

/// Parse a `+`-joined string of hex key codes, e.g. `"1A+4B"` -> `[0x1A, 0x4B]`
pub fn parse_keys(raw: &str) -> Result<Vec<KeyCode>, ConfigError> {
    let mut keys = Vec::new();
    for token in raw.split('+') {
        let token = token.trim();
        let code = u16::from_str_radix(token, 16)
            .map_err(|_| ConfigError::BadKeyToken(token.to_string()))?;
        keys.push(KeyCode::new(code)?);
    }
    Ok(keys)
}
