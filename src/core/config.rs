//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::GlobalOpts;

/// Default backend base URL (local Strapi-style backend)
const DEFAULT_API_URL: &str = "http://localhost:1337/api";

/// Default request timeout in seconds. The backend imposes none of its own,
/// so the client bounds every call and maps expiry to the retry path.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// BMV configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the marketplace backend
    pub api_url: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(global: &GlobalOpts) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/bmv/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(file_config) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(file_config);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(url) = std::env::var("BMV_API_URL") {
            config.api_url = Some(url);
        }
        if let Ok(secs) = std::env::var("BMV_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.timeout_secs = Some(secs);
            }
        }

        // 4. Command-line flag
        if let Some(ref url) = global.api_url {
            config.api_url = Some(url.clone());
        }

        config
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "bmv")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.api_url.is_some() {
            self.api_url = other.api_url;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Effective backend base URL
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Effective request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
