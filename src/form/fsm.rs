use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Whether a submission is outstanding. `Pending` disables every form control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEvent {
    Submit,
    /// The request finished, whatever its outcome.
    Settle,
}

// Idle -> Pending -> Idle, forever. No terminal state.
#[derive(Debug, Default)]
pub struct RequestStateMachine {
    state: RequestStatus,
}

impl RequestStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_state(&self) -> RequestStatus {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == RequestStatus::Pending
    }

    pub fn transition(&mut self, event: RequestEvent) -> Result<()> {
        debug!("Request FSM processing event {:?} in state {:?}", event, self.state);

        let new_state = match (self.state, event) {
            (RequestStatus::Idle, RequestEvent::Submit) => RequestStatus::Pending,
            (RequestStatus::Pending, RequestEvent::Settle) => RequestStatus::Idle,
            (state, event) => {
                warn!("Invalid request FSM transition from {:?} with event {:?}", state, event);
                return Err(Error::InvalidTransition {
                    current: format!("{state:?}"),
                    requested: format!("{event:?}"),
                });
            }
        };

        info!(
            "Request state transition: {:?} -> {:?} (event: {:?})",
            self.state, new_state, event
        );
        self.state = new_state;
        Ok(())
    }
}
