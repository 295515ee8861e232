//! Authenticated Cloud Run sessions

use std::time::Duration;

use async_trait::async_trait;
use google_cloud_iam_v1::model::Policy;
use google_cloud_run_v2::client::Services;
use google_cloud_run_v2::model::Service;
use tracing::{debug, info};

use crate::authn::credential::Credential;
use crate::cloud::operation::submit;
use crate::deploy::api::{PendingOperation, ServicesApi, SessionFactory};
use crate::errors::DeployError;
use crate::settings::Settings;

/// A Cloud Run client signing requests as one service account
///
/// The client library refreshes the access token itself, so a session stays
/// usable for as long as an operation takes.
pub struct Session {
    client: Services,
    poll_interval: Duration,
}

impl Session {
    /// Load `credential` and open a client
    pub async fn establish(credential: &Credential, settings: &Settings) -> Result<Self, DeployError> {
        let key = credential.service_account_key()?;
        let credentials = credential.credentials()?;

        let mut builder = Services::builder().with_credentials(credentials);
        if let Some(endpoint) = settings.api.endpoint.as_deref() {
            debug!("Using Cloud Run endpoint {}", endpoint);
            builder = builder.with_endpoint(endpoint);
        }
        let client = builder.build().await.map_err(|e| {
            DeployError::CredentialError(format!("Unable to open Cloud Run client: {}", e))
        })?;

        info!("Authenticated as {}", key.client_email);
        Ok(Self {
            client,
            poll_interval: settings.operation.poll_interval(),
        })
    }
}

#[async_trait]
impl ServicesApi for Session {
    async fn create_service(
        &self,
        parent: &str,
        service_id: &str,
        service: Service,
    ) -> Result<Box<dyn PendingOperation>, DeployError> {
        let poller = self
            .client
            .create_service()
            .set_parent(parent)
            .set_service_id(service_id)
            .set_service(service)
            .poller();
        let label = format!("Creation of {}/services/{}", parent, service_id);
        submit(poller, label, self.poll_interval).await
    }

    async fn update_service(&self, service: Service) -> Result<Box<dyn PendingOperation>, DeployError> {
        let label = format!("Update of {}", service.name);
        let poller = self.client.update_service().set_service(service).poller();
        submit(poller, label, self.poll_interval).await
    }

    async fn delete_service(&self, name: &str) -> Result<Box<dyn PendingOperation>, DeployError> {
        let poller = self.client.delete_service().set_name(name).poller();
        submit(poller, format!("Deletion of {}", name), self.poll_interval).await
    }

    async fn set_iam_policy(&self, resource: &str, policy: Policy) -> Result<Policy, DeployError> {
        let policy = self
            .client
            .set_iam_policy()
            .set_resource(resource)
            .set_policy(policy)
            .send()
            .await?;
        Ok(policy)
    }
}

/// Opens a [`Session`] per deployment
pub struct CloudSessionFactory {
    settings: Settings,
}

impl CloudSessionFactory {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SessionFactory for CloudSessionFactory {
    async fn open(&self, credential: &Credential) -> Result<Box<dyn ServicesApi>, DeployError> {
        let session = Session::establish(credential, &self.settings).await?;
        Ok(Box::new(session))
    }
}
