//! Application-level configuration loading.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "GOMOKU_BACK_CONFIG_PATH";

const DEFAULT_EVENT_CAPACITY: usize = 32;
const DEFAULT_JOIN_CODE_LENGTH: usize = 6;
const DEFAULT_JOIN_CODE_ATTEMPTS: usize = 16;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    event_capacity: usize,
    join_code_length: usize,
    join_code_attempts: usize,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// baked-in defaults when the file is missing or malformed.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Capacity of the broadcast channel behind the event hub.
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    /// Length of generated private-room join codes.
    pub fn join_code_length(&self) -> usize {
        self.join_code_length
    }

    /// Bound on the retry loop that searches for an unused join code.
    pub fn join_code_attempts(&self) -> usize {
        self.join_code_attempts
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            event_capacity: DEFAULT_EVENT_CAPACITY,
            join_code_length: DEFAULT_JOIN_CODE_LENGTH,
            join_code_attempts: DEFAULT_JOIN_CODE_ATTEMPTS,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file.
struct RawConfig {
    event_capacity: Option<usize>,
    join_code_length: Option<usize>,
    join_code_attempts: Option<usize>,
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            event_capacity: raw.event_capacity.unwrap_or(defaults.event_capacity),
            join_code_length: raw.join_code_length.unwrap_or(defaults.join_code_length),
            join_code_attempts: raw
                .join_code_attempts
                .unwrap_or(defaults.join_code_attempts),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
