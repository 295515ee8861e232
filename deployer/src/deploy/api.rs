//! Control-plane seams
//!
//! The deployer only talks to the control plane through these traits so the
//! orchestration can be exercised without network access.

use async_trait::async_trait;
use google_cloud_iam_v1::model::Policy;
use google_cloud_run_v2::model::Service;

use crate::authn::credential::Credential;
use crate::errors::DeployError;

/// A long-running operation the control plane has accepted
#[async_trait]
pub trait PendingOperation: Send {
    /// Block until the operation is done and return the resulting service
    async fn wait(self: Box<Self>) -> Result<Service, DeployError>;
}

/// Authenticated access to the services API
#[async_trait]
pub trait ServicesApi: Send + Sync {
    /// Submit creation of `service_id` under `parent`
    async fn create_service(
        &self,
        parent: &str,
        service_id: &str,
        service: Service,
    ) -> Result<Box<dyn PendingOperation>, DeployError>;

    /// Submit an update of the service named by `service.name`
    async fn update_service(&self, service: Service) -> Result<Box<dyn PendingOperation>, DeployError>;

    /// Submit deletion of the service `name`
    async fn delete_service(&self, name: &str) -> Result<Box<dyn PendingOperation>, DeployError>;

    /// Replace the access policy of `resource`
    async fn set_iam_policy(&self, resource: &str, policy: Policy) -> Result<Policy, DeployError>;
}

/// Opens one authenticated session per deployment
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open(&self, credential: &Credential) -> Result<Box<dyn ServicesApi>, DeployError>;
}
