//! Service account credentials
//!
//! A credential is resolved from a secret reference at call time and is never
//! cached process-wide: every deployment hands its own [`Credential`] to the
//! session it opens.

use std::path::PathBuf;
use std::str::FromStr;

use google_cloud_auth::credentials::service_account;
use google_cloud_auth::credentials::Credentials;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::errors::DeployError;
use crate::filesys::file::File;

/// Where the raw JSON key material comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// `env:NAME`
    Env(String),
    /// `file:PATH`
    File(PathBuf),
}

impl FromStr for SecretSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("env", name)) if !name.is_empty() => Ok(SecretSource::Env(name.to_string())),
            Some(("file", path)) if !path.is_empty() => Ok(SecretSource::File(PathBuf::from(path))),
            _ => Err(format!(
                "Invalid secret reference '{}': expected env:NAME or file:PATH",
                s
            )),
        }
    }
}

impl std::fmt::Display for SecretSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretSource::Env(name) => write!(f, "env:{}", name),
            SecretSource::File(path) => write!(f, "file:{}", path.display()),
        }
    }
}

impl SecretSource {
    /// Read the secret now
    pub async fn resolve(&self) -> Result<Credential, DeployError> {
        let json = match self {
            SecretSource::Env(name) => std::env::var(name).map_err(|_| {
                DeployError::CredentialError(format!("Environment variable {} is not set", name))
            })?,
            SecretSource::File(path) => File::new(path).read_string().await.map_err(|e| {
                DeployError::CredentialError(format!(
                    "Unable to read credential file {}: {}",
                    path.display(),
                    e
                ))
            })?,
        };

        if json.trim().is_empty() {
            return Err(DeployError::CredentialError(format!(
                "Credential from {} is empty",
                self
            )));
        }

        Ok(Credential::from_json(json))
    }
}

/// Opaque handle on raw service account JSON key material
#[derive(Debug)]
pub struct Credential {
    json: SecretString,
}

impl Credential {
    pub fn from_json(json: impl Into<String>) -> Self {
        Self {
            json: SecretString::from(json.into()),
        }
    }

    /// Decode and check the key material
    pub fn service_account_key(&self) -> Result<ServiceAccountKey, DeployError> {
        let raw: RawServiceAccountKey = serde_json::from_str(self.json.expose_secret())
            .map_err(|e| DeployError::CredentialError(format!("Invalid service account key: {}", e)))?;

        if let Some(key_type) = raw.key_type.as_deref() {
            if key_type != "service_account" {
                return Err(DeployError::CredentialError(format!(
                    "Unsupported credential type: {}",
                    key_type
                )));
            }
        }
        if raw.private_key.trim().is_empty() {
            return Err(DeployError::CredentialError(format!(
                "Service account key for {} has no private key",
                raw.client_email
            )));
        }

        Ok(ServiceAccountKey {
            client_email: raw.client_email,
        })
    }

    /// Build Google Cloud credentials that sign requests as this service account
    pub fn credentials(&self) -> Result<Credentials, DeployError> {
        let key = self.service_account_key()?;
        let json: serde_json::Value = serde_json::from_str(self.json.expose_secret())
            .map_err(|e| DeployError::CredentialError(format!("Invalid service account key: {}", e)))?;

        service_account::Builder::new(json).build().map_err(|e| {
            DeployError::CredentialError(format!(
                "Unable to load service account key for {}: {}",
                key.client_email, e
            ))
        })
    }
}

#[derive(Deserialize)]
struct RawServiceAccountKey {
    #[serde(rename = "type")]
    key_type: Option<String>,
    client_email: String,
    private_key: String,
}

/// The identity a service account key belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAccountKey {
    pub client_email: String,
}
