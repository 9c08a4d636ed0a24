//! Application configuration and profile storage
//!
//! Configuration lives in a single TOML file (by default under the platform
//! config directory) holding app settings and any number of named user
//! profiles. Profiles feed the `report` command and provide defaults for the
//! individual calculator commands.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::models::UserProfile;

/// Configuration format version
const CONFIG_VERSION: &str = "1.0";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    pub metadata: ConfigMetadata,

    /// General application settings
    pub settings: AppSettings,

    /// Named user profiles
    pub profiles: HashMap<String, UserProfile>,

    /// Profile used when none is named on the command line
    pub default_profile: Option<String>,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Logging configuration
    pub log: LogConfig,

    /// Default export format for reports (json, csv, text)
    pub default_export_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();
        AppConfig {
            metadata: ConfigMetadata {
                version: CONFIG_VERSION.to_string(),
                created_at: now,
                updated_at: now,
            },
            settings: AppSettings {
                log: LogConfig::default(),
                default_export_format: "text".to_string(),
            },
            profiles: HashMap::new(),
            default_profile: None,
        }
    }
}

impl AppConfig {
    /// Default config file location under the platform config directory
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("could not determine config directory")?;
        Ok(base.join("wellrs").join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load from the given path, or the default location, falling back to
    /// defaults when no file exists yet
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config directory {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Look up a profile by name, or the default profile when `name` is None
    pub fn get_profile(&self, name: Option<&str>) -> Option<&UserProfile> {
        match name {
            Some(n) => self.profiles.get(n),
            None => self
                .default_profile
                .as_deref()
                .and_then(|n| self.profiles.get(n)),
        }
    }

    /// Insert or replace a profile; the first profile added becomes the
    /// default
    pub fn upsert_profile(&mut self, name: &str, profile: UserProfile) {
        if self.profiles.is_empty() && self.default_profile.is_none() {
            self.default_profile = Some(name.to_string());
        }
        self.profiles.insert(name.to_string(), profile);
    }
}
