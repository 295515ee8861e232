//! Update path tests

use google_cloud_run_v2::model::IngressTraffic;

use rundeploy::cloud::resources::image_of;
use rundeploy::deploy::{DeploymentRequest, PolicyFailureMode, ServiceDeployer, Visibility};
use rundeploy::errors::DeployError;

use crate::mocks::{credential, FakeControlPlane, Failures};

const RESOURCE: &str = "projects/p1/locations/us-central1/services/myservice";

fn update_request() -> DeploymentRequest {
    DeploymentRequest::update(
        "p1",
        "us-central1",
        "myservice",
        "docker.io/httpd",
        8080,
        credential(),
    )
}

#[tokio::test]
async fn test_update_service_scenario() {
    let fake = FakeControlPlane::new();
    let deployer = ServiceDeployer::new(fake.clone());

    let url = deployer
        .update_service("p1", "us-central1", "myservice", "docker.io/httpd", 8080, credential())
        .await
        .unwrap();

    assert_eq!(url, "https://myservice-x2k4q7abcd-uc.a.run.app");
    fake.calls(|calls| {
        assert!(calls.creates.is_empty());
        assert_eq!(calls.updates.len(), 1);

        let service = &calls.updates[0];
        assert_eq!(service.name, RESOURCE);
        assert_eq!(image_of(service), Some("docker.io/httpd"));
        let template = service.template.as_ref().unwrap();
        assert_eq!(template.containers[0].ports[0].container_port, 8080);
        assert_eq!(service.ingress, IngressTraffic::All);
    });
}

#[tokio::test]
async fn test_update_never_touches_policy() {
    let fake = FakeControlPlane::new();
    let deployer =
        ServiceDeployer::new(fake.clone()).with_policy_failure(PolicyFailureMode::DeleteService);

    let result = deployer.deploy(&update_request()).await.unwrap();

    assert_eq!(result.resource_name, RESOURCE);
    fake.calls(|calls| {
        assert_eq!(calls.policies.len(), 0);
        assert!(calls.deletes.is_empty());
    });
}

#[tokio::test]
async fn test_update_can_reassert_public_access_explicitly() {
    let fake = FakeControlPlane::new();
    let deployer = ServiceDeployer::new(fake.clone());

    let request = update_request().with_visibility(Visibility::Public);
    deployer.deploy(&request).await.unwrap();

    fake.calls(|calls| {
        assert_eq!(calls.policies.len(), 1);
        assert_eq!(calls.policies[0].0, RESOURCE);
    });
}

#[tokio::test]
async fn test_failed_update_is_request_error() {
    let fake = FakeControlPlane::failing(Failures {
        update: true,
        ..Failures::default()
    });
    let deployer = ServiceDeployer::new(fake.clone());

    let err = deployer.deploy(&update_request()).await.unwrap_err();

    assert!(matches!(err, DeployError::RequestError(_)));
    fake.calls(|calls| assert_eq!(calls.waits, 0));
}

#[tokio::test]
async fn test_failed_update_wait_returns_error() {
    let fake = FakeControlPlane::failing(Failures {
        wait: true,
        ..Failures::default()
    });
    let deployer = ServiceDeployer::new(fake.clone());

    let err = deployer.deploy(&update_request()).await.unwrap_err();

    assert!(matches!(err, DeployError::OperationError(_)));
}
