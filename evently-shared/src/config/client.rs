//! Client settings loaded from a file and the environment.

use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::Path,
    time::Duration,
};
use thiserror::Error;
use url::Url;

use crate::auth::{AuthResult, GoTrueClient};

const ENV_AUTH_URL: &str = "EVENTLY_AUTH_URL";
const ENV_ANON_KEY: &str = "EVENTLY_ANON_KEY";
const ENV_REQUEST_TIMEOUT: &str = "EVENTLY_REQUEST_TIMEOUT_SECS";
const ENV_LOG_LEVEL: &str = "EVENTLY_LOG_LEVEL";

/// Errors raised while loading a [`ClientConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The YAML file did not parse
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// The JSON file did not parse
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension or output format other than yaml or json
    #[error("Unsupported configuration format '{0}'. Use 'yaml' or 'json'.")]
    UnsupportedFormat(String),

    /// A setting is present but unusable
    #[error("Invalid {field}: {message}")]
    InvalidValue {
        /// Field or environment variable name
        field: &'static str,
        /// Why the value was refused
        message: String,
    },
}

/// Connection settings for the auth provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the Supabase project
    pub auth_url: String,

    /// Public anon key sent with every auth request
    pub anon_key: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Logging level or `tracing` filter directive
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClientConfig {
    /// Generates a default configuration pointing at a local Supabase stack.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            auth_url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// Values read from the file win; `EVENTLY_*` variables only fill fields
    /// the file left at their defaults.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the file cannot be read or parsed, an
    /// environment value is malformed, or the result fails [`ClientConfig::validate`].
    pub fn load_config(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_config_with_env(config_path, |name| env::var(name).ok())
    }

    /// Same as [`ClientConfig::load_config`] with `lookup` standing in for the
    /// process environment.
    ///
    /// # Errors
    /// See [`ClientConfig::load_config`].
    pub fn load_config_with_env<F>(config_path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::with_defaults();
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => defaults.clone(),
        };

        if config.auth_url == defaults.auth_url
            && let Some(url) = lookup(ENV_AUTH_URL)
        {
            config.auth_url = url;
        }
        if config.anon_key == defaults.anon_key
            && let Some(key) = lookup(ENV_ANON_KEY)
        {
            config.anon_key = key;
        }
        if config.request_timeout_secs == defaults.request_timeout_secs
            && let Some(timeout) = lookup(ENV_REQUEST_TIMEOUT)
        {
            config.request_timeout_secs = timeout.parse().map_err(|_| ConfigError::InvalidValue {
                field: ENV_REQUEST_TIMEOUT,
                message: format!("'{timeout}' is not a whole number of seconds"),
            })?;
        }
        if config.log_level == defaults.log_level
            && let Some(level) = lookup(ENV_LOG_LEVEL)
        {
            config.log_level = level;
        }

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(serde_yml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// Checks that the settings can produce a working client.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.auth_url).map_err(|err| ConfigError::InvalidValue {
            field: "auth_url",
            message: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "auth_url",
                message: format!("scheme must be http or https, got '{}'", url.scheme()),
            });
        }
        if self.anon_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "anon_key",
                message: format!("must be set in the config file or {ENV_ANON_KEY}"),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds a [`GoTrueClient`] honouring the request timeout.
    ///
    /// # Errors
    /// Returns an [`AuthError`](crate::auth::AuthError) if the HTTP client
    /// cannot be built or the settings are unusable.
    pub fn auth_client(&self) -> AuthResult<GoTrueClient> {
        let http = reqwest::Client::builder()
            .timeout(self.request_timeout())
            .user_agent(concat!("evently/", env!("CARGO_PKG_VERSION")))
            .build()?;
        GoTrueClient::with_client(&self.auth_url, self.anon_key.clone(), http)
    }

    /// Serializes the configuration as `yaml` or `json`.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedFormat`] for any other format.
    pub fn to_format(&self, format: &str) -> Result<String, ConfigError> {
        match format {
            "yaml" | "yml" => Ok(serde_yml::to_string(self)?),
            "json" => Ok(serde_json::to_string_pretty(self)?),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}
