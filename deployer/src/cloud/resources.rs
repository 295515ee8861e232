//! Cloud Run resources the deployer submits

use google_cloud_iam_v1::model::{Binding, Policy};
use google_cloud_run_v2::model::{Container, ContainerPort, IngressTraffic, RevisionTemplate, Service};

/// Name of the single HTTP port every deployed container exposes
pub const HTTP_PORT_NAME: &str = "http1";

/// Role allowing a principal to invoke a service
pub const INVOKER_ROLE: &str = "roles/run.invoker";

/// Principal set covering anyone on the internet
pub const ALL_USERS: &str = "allUsers";

/// A service running one container that serves HTTP on `http_port`
///
/// `name` is left empty on creation; the control plane derives it from the
/// parent and service id. Ingress is always open to all traffic.
pub fn single_container_service(name: &str, image: &str, http_port: i32) -> Service {
    let mut port = ContainerPort::new();
    port.name = HTTP_PORT_NAME.to_string();
    port.container_port = http_port;

    let mut container = Container::new();
    container.image = image.to_string();
    container.ports.push(port);

    let mut template = RevisionTemplate::new();
    template.containers.push(container);

    let mut service = Service::new();
    service.name = name.to_string();
    service.ingress = IngressTraffic::All;
    service.template = Some(template);
    service
}

/// Image of the first container of `service`
pub fn image_of(service: &Service) -> Option<&str> {
    service
        .template
        .as_ref()
        .and_then(|template| template.containers.first())
        .map(|container| container.image.as_str())
}

/// Policy granting [`INVOKER_ROLE`] to [`ALL_USERS`]
pub fn public_invoker_policy() -> Policy {
    let mut binding = Binding::new();
    binding.role = INVOKER_ROLE.to_string();
    binding.members.push(ALL_USERS.to_string());

    let mut policy = Policy::new();
    policy.bindings.push(binding);
    policy
}

/// Whether `policy` binds `role` to `member`
pub fn grants(policy: &Policy, role: &str, member: &str) -> bool {
    policy
        .bindings
        .iter()
        .any(|binding| binding.role == role && binding.members.iter().any(|m| m == member))
}
