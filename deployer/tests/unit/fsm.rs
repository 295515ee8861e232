//! FSM unit tests

use rundeploy::deploy::fsm::{DeploymentEvent, DeploymentFsm, DeploymentState};

#[test]
fn test_fsm_initial_state() {
    let fsm = DeploymentFsm::new();
    assert_eq!(fsm.state(), &DeploymentState::Pending);
    assert!(fsm.error().is_none());
    assert!(!fsm.is_finished());
}

#[test]
fn test_fsm_operation_failure() {
    let mut fsm = DeploymentFsm::new();

    fsm.process(DeploymentEvent::Submit).unwrap();
    fsm.process(DeploymentEvent::Fail("code 9: not ready".to_string()))
        .unwrap();

    assert_eq!(fsm.state(), &DeploymentState::Failed);
    assert_eq!(fsm.error(), Some("code 9: not ready"));
    assert!(fsm.is_finished());
}

#[test]
fn test_fsm_cannot_succeed_before_submit() {
    let mut fsm = DeploymentFsm::new();

    let result = fsm.process(DeploymentEvent::Complete);
    assert!(result.is_err());
    assert_eq!(fsm.state(), &DeploymentState::Pending);
}

#[test]
fn test_fsm_terminal_states() {
    let mut fsm = DeploymentFsm::new();
    fsm.process(DeploymentEvent::Submit).unwrap();
    fsm.process(DeploymentEvent::Complete).unwrap();

    assert!(fsm.process(DeploymentEvent::Fail("late".to_string())).is_err());
    assert!(fsm.process(DeploymentEvent::Submit).is_err());
    assert_eq!(fsm.state(), &DeploymentState::Succeeded);
    assert!(fsm.error().is_none());
}

#[test]
fn test_fsm_state_serialization() {
    let json = serde_json::to_string(&DeploymentState::Submitted).unwrap();
    assert_eq!(json, "\"submitted\"");
}
