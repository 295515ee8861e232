//! Service deployment

pub mod api;
pub mod deployer;
pub mod fsm;
pub mod names;
pub mod request;

pub use api::{PendingOperation, ServicesApi, SessionFactory};
pub use deployer::ServiceDeployer;
pub use request::{DeploymentRequest, DeploymentResult, PolicyFailureMode, Visibility};
