//! A point-in-time snapshot of one supervisor, produced on request rather
//! than read from shared mutable state — each supervisor owns its status
//! and publishes snapshots over a watch channel.

use super::state::SupervisorState;

#[derive(Debug, Clone, PartialEq)]
pub struct SupervisorStatus {
    pub state: SupervisorState,
    pub reconnect_attempts: u32,
    pub last_error_message: Option<String>,
}

impl Default for SupervisorStatus {
    fn default() -> Self {
        Self {
            state: SupervisorState::Idle,
            reconnect_attempts: 0,
            last_error_message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_idle_with_no_attempts() {
        let status = SupervisorStatus::default();
        assert_eq!(status.state, SupervisorState::Idle);
        assert_eq!(status.reconnect_attempts, 0);
        assert!(status.last_error_message.is_none());
    }
}
