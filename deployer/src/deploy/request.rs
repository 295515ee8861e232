//! Deployment request and result models

use serde::{Deserialize, Serialize};

use crate::authn::credential::Credential;

/// Whether a deployment grants public invoke permission
///
/// Creation defaults to [`Visibility::Public`]; updates default to
/// [`Visibility::Unchanged`] and leave any existing policy as it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Grant `roles/run.invoker` to `allUsers`
    Public,
    /// Do not touch the access policy
    Unchanged,
}

/// What happens to a newly created service when granting public access fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyFailureMode {
    /// Leave the service in place and report the policy error
    #[default]
    KeepService,
    /// Delete the service, then report the policy error
    DeleteService,
}

/// Parameters of a single deployment
#[derive(Debug)]
pub struct DeploymentRequest {
    pub project: String,
    pub location: String,
    /// Container image reference
    pub image: String,
    pub http_port: i32,
    /// Present for updates; absent means a new service is created
    pub existing_service_id: Option<String>,
    pub credential: Credential,
    pub visibility: Visibility,
}

impl DeploymentRequest {
    /// Request creation of a new, publicly invokable service
    pub fn create(
        project: impl Into<String>,
        location: impl Into<String>,
        image: impl Into<String>,
        http_port: i32,
        credential: Credential,
    ) -> Self {
        Self {
            project: project.into(),
            location: location.into(),
            image: image.into(),
            http_port,
            existing_service_id: None,
            credential,
            visibility: Visibility::Public,
        }
    }

    /// Request an update of the existing service `service_id`
    pub fn update(
        project: impl Into<String>,
        location: impl Into<String>,
        service_id: impl Into<String>,
        image: impl Into<String>,
        http_port: i32,
        credential: Credential,
    ) -> Self {
        Self {
            project: project.into(),
            location: location.into(),
            image: image.into(),
            http_port,
            existing_service_id: Some(service_id.into()),
            credential,
            visibility: Visibility::Unchanged,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// `projects/{project}/locations/{location}`
    pub fn parent(&self) -> String {
        format!("projects/{}/locations/{}", self.project, self.location)
    }

    /// Fully qualified name of the service `service_id` in this request's scope
    pub fn resource_name(&self, service_id: &str) -> String {
        format!("{}/services/{}", self.parent(), service_id)
    }
}

/// Outcome of a successful deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentResult {
    /// Externally reachable HTTPS endpoint
    pub uri: String,
    /// `projects/{project}/locations/{location}/services/{id}`
    pub resource_name: String,
}
