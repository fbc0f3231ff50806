//! Configuration management for editlink

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Environment variable that overrides the request base URL
pub const API_HOST_ENV: &str = "EDITLINK_API_HOST";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Content service hostnames per environment
    #[serde(default)]
    pub endpoints: Endpoints,

    /// Base URL used for requests instead of `https://{service}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Session cookie sent with every request (`name=value; ...`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,

    /// Lifetime of the brand context cookie
    #[serde(default = "default_cookie_ttl_secs")]
    pub cookie_ttl_secs: u64,

    /// Outbound request budget
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Location of the link database
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

/// Content service hostnames and the rules for picking one
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Tab hostnames ending in this are routed by their first label
    pub production_suffix: String,
    pub production: String,
    pub staging: String,
    pub ci: String,
    /// Used for every tab hostname outside the production suffix
    pub secondary: String,
    pub staging_label: String,
    pub ci_labels: Vec<String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            production_suffix: ".com".to_string(),
            production: "copilot.aws.conde.io".to_string(),
            staging: "stg-copilot.aws.conde.io".to_string(),
            ci: "ci-copilot.aws.conde.io".to_string(),
            secondary: "copilot.prod.cni.digital".to_string(),
            staging_label: "stag".to_string(),
            ci_labels: vec!["ci".to_string(), "ap-ci".to_string()],
        }
    }
}

fn default_cookie_ttl_secs() -> u64 {
    10
}

fn default_requests_per_second() -> u32 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            api_host: None,
            session_cookie: None,
            cookie_ttl_secs: default_cookie_ttl_secs(),
            requests_per_second: default_requests_per_second(),
            store_path: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".editlink").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration, falling back to defaults when the file is absent.
    ///
    /// `EDITLINK_API_HOST` takes precedence over `api_host` in the file.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };

        if let Ok(host) = std::env::var(API_HOST_ENV)
            && !host.is_empty()
        {
            config.api_host = Some(host);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.requests_per_second == 0 {
            return Err(ConfigError::Invalid("requests_per_second must be > 0".to_string()).into());
        }
        if self.cookie_ttl_secs == 0 {
            return Err(ConfigError::Invalid("cookie_ttl_secs must be > 0".to_string()).into());
        }
        let e = &self.endpoints;
        if [&e.production, &e.staging, &e.ci, &e.secondary]
            .iter()
            .any(|h| h.is_empty())
        {
            return Err(ConfigError::Invalid("endpoint hostnames must not be empty".to_string()).into());
        }
        Ok(())
    }

    pub fn cookie_ttl(&self) -> Duration {
        Duration::from_secs(self.cookie_ttl_secs)
    }
}
