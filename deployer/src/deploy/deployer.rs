//! Create-or-update orchestration

use google_cloud_run_v2::model::Service;
use tracing::{debug, info, warn};

use crate::authn::credential::Credential;
use crate::cloud::resources::{public_invoker_policy, single_container_service};
use crate::deploy::api::{PendingOperation, ServicesApi, SessionFactory};
use crate::deploy::fsm::{DeploymentEvent, DeploymentFsm};
use crate::deploy::names::{generate_service_id, NameSource, RandomNames};
use crate::deploy::request::{DeploymentRequest, DeploymentResult, PolicyFailureMode, Visibility};
use crate::errors::{DeployError, Phase};

/// Deploys container images as Cloud Run services
///
/// Every call opens its own session from the request's credential. The first
/// failing step aborts the call; nothing is retried.
pub struct ServiceDeployer<F, N = RandomNames> {
    sessions: F,
    names: N,
    policy_failure: PolicyFailureMode,
}

impl<F: SessionFactory> ServiceDeployer<F, RandomNames> {
    pub fn new(sessions: F) -> Self {
        Self {
            sessions,
            names: RandomNames,
            policy_failure: PolicyFailureMode::default(),
        }
    }
}

impl<F: SessionFactory, N: NameSource> ServiceDeployer<F, N> {
    /// Use another source for generated service identifiers
    pub fn with_names<M: NameSource>(self, names: M) -> ServiceDeployer<F, M> {
        ServiceDeployer {
            sessions: self.sessions,
            names,
            policy_failure: self.policy_failure,
        }
    }

    pub fn with_policy_failure(mut self, mode: PolicyFailureMode) -> Self {
        self.policy_failure = mode;
        self
    }

    /// Create a new publicly invokable service and return its URL
    pub async fn create_service(
        &self,
        project: &str,
        location: &str,
        image: &str,
        http_port: i32,
        credential: Credential,
    ) -> Result<String, DeployError> {
        let request = DeploymentRequest::create(project, location, image, http_port, credential);
        Ok(self.deploy(&request).await?.uri)
    }

    /// Roll `image` out to the existing service `service_id` and return its URL
    pub async fn update_service(
        &self,
        project: &str,
        location: &str,
        service_id: &str,
        image: &str,
        http_port: i32,
        credential: Credential,
    ) -> Result<String, DeployError> {
        let request =
            DeploymentRequest::update(project, location, service_id, image, http_port, credential);
        Ok(self.deploy(&request).await?.uri)
    }

    /// Run `request` down the create or update path
    pub async fn deploy(&self, request: &DeploymentRequest) -> Result<DeploymentResult, DeployError> {
        let api = self
            .sessions
            .open(&request.credential)
            .await
            .map_err(|e| e.in_phase(Phase::Credential))?;

        match request.existing_service_id.as_deref() {
            Some(service_id) => self.update(api.as_ref(), request, service_id).await,
            None => self.create(api.as_ref(), request).await,
        }
    }

    async fn create(
        &self,
        api: &dyn ServicesApi,
        request: &DeploymentRequest,
    ) -> Result<DeploymentResult, DeployError> {
        let service_id = generate_service_id(&self.names);
        let parent = request.parent();
        info!(
            "Creating service {} in {} from {}",
            service_id, parent, request.image
        );

        let mut fsm = DeploymentFsm::new();
        let service = single_container_service("", &request.image, request.http_port);
        let operation = api
            .create_service(&parent, &service_id, service)
            .await
            .map_err(|e| fail(&mut fsm, e.in_phase(Phase::Request)))?;
        let created = await_completion(&mut fsm, operation).await?;

        let resource_name = if created.name.is_empty() {
            request.resource_name(&service_id)
        } else {
            created.name.clone()
        };

        if request.visibility == Visibility::Public {
            self.grant_public_invoke(api, &resource_name).await?;
        }

        info!("Service {} available at {}", resource_name, created.uri);
        Ok(DeploymentResult {
            uri: created.uri,
            resource_name,
        })
    }

    async fn update(
        &self,
        api: &dyn ServicesApi,
        request: &DeploymentRequest,
        service_id: &str,
    ) -> Result<DeploymentResult, DeployError> {
        let resource_name = request.resource_name(service_id);
        info!("Updating service {} to {}", resource_name, request.image);

        let mut fsm = DeploymentFsm::new();
        let service = single_container_service(&resource_name, &request.image, request.http_port);
        let operation = api
            .update_service(service)
            .await
            .map_err(|e| fail(&mut fsm, e.in_phase(Phase::Request)))?;
        let updated = await_completion(&mut fsm, operation).await?;

        if request.visibility == Visibility::Public {
            // Rolling back an update is not possible, so the failure mode is not consulted
            api.set_iam_policy(&resource_name, public_invoker_policy())
                .await
                .map_err(|e| e.in_phase(Phase::Policy))?;
        }

        info!("Service {} available at {}", resource_name, updated.uri);
        Ok(DeploymentResult {
            uri: updated.uri,
            resource_name,
        })
    }

    async fn grant_public_invoke(
        &self,
        api: &dyn ServicesApi,
        resource_name: &str,
    ) -> Result<(), DeployError> {
        debug!("Granting public invoke on {}", resource_name);

        let policy_err = match api
            .set_iam_policy(resource_name, public_invoker_policy())
            .await
        {
            Ok(_) => return Ok(()),
            Err(e) => e.in_phase(Phase::Policy),
        };

        match self.policy_failure {
            PolicyFailureMode::KeepService => {
                warn!(
                    "Service {} was created but is not publicly invokable",
                    resource_name
                );
                Err(policy_err)
            }
            PolicyFailureMode::DeleteService => {
                warn!(
                    "Deleting service {} after policy failure: {}",
                    resource_name, policy_err
                );
                match delete(api, resource_name).await {
                    Ok(()) => Err(policy_err),
                    Err(rollback_err) => Err(DeployError::RollbackError {
                        policy: policy_err.to_string(),
                        rollback: rollback_err.to_string(),
                    }),
                }
            }
        }
    }
}

async fn await_completion(
    fsm: &mut DeploymentFsm,
    operation: Box<dyn PendingOperation>,
) -> Result<Service, DeployError> {
    transition(fsm, DeploymentEvent::Submit)?;

    let service = operation
        .wait()
        .await
        .map_err(|e| fail(fsm, e.in_phase(Phase::Operation)))?;

    transition(fsm, DeploymentEvent::Complete)?;
    Ok(service)
}

async fn delete(api: &dyn ServicesApi, resource_name: &str) -> Result<(), DeployError> {
    let operation = api
        .delete_service(resource_name)
        .await
        .map_err(|e| e.in_phase(Phase::Request))?;
    operation
        .wait()
        .await
        .map_err(|e| e.in_phase(Phase::Operation))?;
    info!("Service {} deleted", resource_name);
    Ok(())
}

fn transition(fsm: &mut DeploymentFsm, event: DeploymentEvent) -> Result<(), DeployError> {
    fsm.process(event).map_err(DeployError::OperationError)?;
    debug!("Deployment state: {:?}", fsm.state());
    Ok(())
}

fn fail(fsm: &mut DeploymentFsm, err: DeployError) -> DeployError {
    if let Err(e) = fsm.process(DeploymentEvent::Fail(err.to_string())) {
        warn!("{}", e);
    }
    err
}
