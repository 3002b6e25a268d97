//! Client configuration.
//!
//! Configuration resolves in three layers: built-in defaults, an optional
//! JSON file at `~/.prepdeck/config.json`, and the `PREPDECK_API_URL`
//! environment variable (highest precedence).

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "PREPDECK_API_URL";

/// The configuration directory name.
const CONFIG_DIR: &str = ".prepdeck";

/// The configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Resolved client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Base URL of the backend API.
    pub base_url: String,
    /// Timeout for non-streaming requests, in seconds. Streaming requests
    /// only use this as a connect timeout.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Resolve configuration from the config file and environment.
    pub fn load() -> Self {
        let mut config = ConfigManager::new()
            .map(|manager| manager.load())
            .unwrap_or_default();

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.is_empty() {
                config.base_url = url;
            }
        }

        config
    }
}

/// Manages configuration storage and retrieval.
#[derive(Debug)]
pub struct ConfigManager {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        let config_path = home.join(CONFIG_DIR).join(CONFIG_FILE);
        Some(Self { config_path })
    }

    /// Get the path to the configuration file.
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from the file.
    ///
    /// Returns the default configuration if the file doesn't exist or
    /// can't be read.
    pub fn load(&self) -> Config {
        if !self.config_path.exists() {
            return Config::default();
        }

        let file = match File::open(&self.config_path) {
            Ok(f) => f,
            Err(_) => return Config::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(config) => config,
            Err(_) => Config::default(),
        }
    }

    /// Save configuration to the file.
    ///
    /// Creates the parent directory if it doesn't exist.
    /// Returns `true` if successful, `false` otherwise.
    pub fn save(&self, config: &Config) -> bool {
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                return false;
            }
        }

        let file = match File::create(&self.config_path) {
            Ok(f) => f,
            Err(_) => return false,
        };

        let mut writer = BufWriter::new(file);
        if serde_json::to_writer_pretty(&mut writer, config).is_err() {
            return false;
        }

        writer.flush().is_ok()
    }
}
