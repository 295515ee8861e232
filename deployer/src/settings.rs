//! Settings file management

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::deploy::request::PolicyFailureMode;
use crate::errors::DeployError;
use crate::filesys::file::File;
use crate::logs::LogLevel;

/// Environment variable naming an optional settings file
pub const CONFIG_ENV_VAR: &str = "RUNDEPLOY_CONFIG";

/// Deployer settings
///
/// Unknown keys are rejected so that a misspelt setting fails loudly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit logs as JSON
    #[serde(default)]
    pub json_logs: bool,

    /// Control-plane API configuration
    #[serde(default)]
    pub api: ApiSettings,

    /// Long-running operation handling
    #[serde(default)]
    pub operation: OperationSettings,

    /// What to do with a freshly created service when granting public access fails
    #[serde(default)]
    pub policy_failure: PolicyFailureMode,
}

/// Control-plane API settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSettings {
    /// Overrides the Cloud Run Admin API endpoint chosen by the client library
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Long-running operation settings
///
/// No overall deadline applies: waiting ends only when the control plane
/// reports the operation done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationSettings {
    /// Delay between two polls of a pending operation
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    2
}

impl Default for OperationSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl OperationSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Settings {
    /// Load settings from `path`, or return defaults when no path is given
    pub async fn load(path: Option<&Path>) -> Result<Self, DeployError> {
        let settings = match path {
            Some(path) => {
                debug!("Loading settings from {}", path.display());
                File::new(path).read_json::<Settings>().await.map_err(|e| {
                    DeployError::ConfigError(format!(
                        "Unable to read settings file {}: {}",
                        path.display(),
                        e
                    ))
                })?
            }
            None => Settings::default(),
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Check values that would otherwise only fail deep inside a deployment
    pub fn validate(&self) -> Result<(), DeployError> {
        if let Some(endpoint) = &self.api.endpoint {
            let url = Url::parse(endpoint).map_err(|e| {
                DeployError::ConfigError(format!("Invalid API endpoint {}: {}", endpoint, e))
            })?;
            if url.scheme() != "https" && url.scheme() != "http" {
                return Err(DeployError::ConfigError(format!(
                    "API endpoint must be http(s): {}",
                    endpoint
                )));
            }
        }

        if self.operation.poll_interval_secs == 0 {
            return Err(DeployError::ConfigError(
                "Operation poll interval must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
