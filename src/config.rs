//! # Configuration Module
//!
//! This module handles runtime configuration for Curator: where the catalog
//! lives, which credentials to present, and a few request defaults.
//!
//! ## Sources
//!
//! Settings are layered, later sources winning:
//!
//! 1. Built-in defaults
//! 2. The TOML file at the platform config directory:
//!    - Linux: `~/.config/curator/config.toml`
//!    - macOS: `~/Library/Application Support/curator/config.toml`
//!    - Windows: `%APPDATA%\curator\config.toml`
//! 3. Environment variables `CURATOR_ACCESS_TOKEN`, `CURATOR_API_BASE_URL`,
//!    `CURATOR_MARKET`
//! 4. Command-line flags (applied by the binary)
//!
//! ## Example file
//!
//! ```toml
//! access_token = "BQD..."
//! market = "GB"
//! default_limit = 30
//! ```

use anyhow::{bail, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_ACCESS_TOKEN: &str = "CURATOR_ACCESS_TOKEN";
pub const ENV_API_BASE_URL: &str = "CURATOR_API_BASE_URL";
pub const ENV_MARKET: &str = "CURATOR_MARKET";

/// Returns the platform-appropriate configuration file path.
///
/// The file itself is optional; only its location is resolved here.
///
/// # Errors
///
/// Returns an error if the system configuration directory cannot be
/// determined.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Pass --config to point at a configuration file."
        )
    })?;

    Ok(config_dir.join("curator").join("config.toml"))
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Root of the catalog Web API
    pub api_base_url: String,
    /// Bearer token presented to the catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Market used for artist top tracks
    pub market: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Track count used when a command does not ask for one
    pub default_limit: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.spotify.com/v1".to_string(),
            access_token: None,
            market: "US".to_string(),
            timeout_secs: 30,
            default_limit: crate::engine::DEFAULT_LIMIT,
        }
    }
}

impl RuntimeConfig {
    /// Load from the default location, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Fails if the config directory cannot be determined or the file exists
    /// but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Load from an explicit file, then apply environment overrides. A
    /// missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed, or if the
    /// resulting settings are unusable (see [`RuntimeConfig::validate`]).
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            debug!("Reading configuration from {}", path.display());
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
            Self::from_toml_str(&content)
                .with_context(|| format!("Invalid configuration file {}", path.display()))?
        } else {
            debug!("No configuration file at {}, using defaults", path.display());
            Self::default()
        };

        let config = config.with_env_overrides(|key| std::env::var(key).ok());
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Rejects a zero `timeout_secs`, which would make every request time out.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the TOML parse error.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply overrides looked up through `lookup`; empty values are ignored.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(token) = non_blank(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token);
        }
        if let Some(url) = non_blank(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(market) = non_blank(ENV_MARKET) {
            self.market = market;
        }
        self
    }

    /// Create configuration with an explicit access token
    #[must_use]
    pub fn with_access_token(self, access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..self
        }
    }
}
