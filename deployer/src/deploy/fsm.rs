//! State machine for a single deployment

use serde::{Deserialize, Serialize};

/// Deployment state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentState {
    /// Nothing submitted yet
    Pending,

    /// Create or update accepted, operation still running
    Submitted,

    /// The control plane reported the operation done
    Succeeded,

    /// Some step failed
    Failed,
}

/// Deployment event
#[derive(Debug, Clone)]
pub enum DeploymentEvent {
    /// The control plane accepted the request
    Submit,

    /// The long-running operation completed
    Complete,

    /// A step failed
    Fail(String),
}

/// Deployment FSM
///
/// `Succeeded` is only reachable from `Submitted`, so a result can never be
/// reported before the remote operation has finished. Both terminal states
/// reject every further event.
#[derive(Debug, Clone)]
pub struct DeploymentFsm {
    state: DeploymentState,
    error: Option<String>,
}

impl DeploymentFsm {
    /// Create a new FSM in pending state
    pub fn new() -> Self {
        Self {
            state: DeploymentState::Pending,
            error: None,
        }
    }

    /// Get current state
    pub fn state(&self) -> &DeploymentState {
        &self.state
    }

    /// Get error message if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the FSM reached a terminal state
    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            DeploymentState::Succeeded | DeploymentState::Failed
        )
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: DeploymentEvent) -> Result<(), String> {
        let new_state = match (&self.state, &event) {
            (DeploymentState::Pending, DeploymentEvent::Submit) => DeploymentState::Submitted,
            (DeploymentState::Submitted, DeploymentEvent::Complete) => DeploymentState::Succeeded,
            (DeploymentState::Pending | DeploymentState::Submitted, DeploymentEvent::Fail(err)) => {
                self.error = Some(err.clone());
                DeploymentState::Failed
            }

            (state, event) => {
                return Err(format!("Invalid transition: {:?} -> {:?}", state, event));
            }
        };

        self.state = new_state;
        Ok(())
    }
}

impl Default for DeploymentFsm {
    fn default() -> Self {
        Self::new()
    }
}
