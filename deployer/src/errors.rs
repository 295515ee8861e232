//! Error types for the deployer

use thiserror::Error;

/// Main error type for the deployer
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Cloud Run API error: {0}")]
    ApiError(#[from] google_cloud_gax::error::Error),

    #[error("Credential error: {0}")]
    CredentialError(String),

    #[error("Request error: {0}")]
    RequestError(String),

    #[error("Operation error: {0}")]
    OperationError(String),

    #[error("Policy error: {0}")]
    PolicyError(String),

    #[error("Policy error: {policy}; rollback of the created service also failed: {rollback}")]
    RollbackError { policy: String, rollback: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Step of a deployment an error is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Credential,
    Request,
    Operation,
    Policy,
}

impl DeployError {
    /// Classify an API or decoding error into the deployment phase it occurred in.
    ///
    /// Errors that already carry a phase are returned unchanged.
    pub fn in_phase(self, phase: Phase) -> Self {
        match self {
            DeployError::ApiError(_) | DeployError::JsonError(_) => {
                let message = self.to_string();
                match phase {
                    Phase::Credential => DeployError::CredentialError(message),
                    Phase::Request => DeployError::RequestError(message),
                    Phase::Operation => DeployError::OperationError(message),
                    Phase::Policy => DeployError::PolicyError(message),
                }
            }
            other => other,
        }
    }
}
