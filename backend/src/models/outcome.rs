//! Terminal result artifacts and status snapshots

use crate::models::session::{PaymentSession, SessionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Success artifact returned by `process`.
///
/// Only approved payments produce an outcome; declines travel as
/// [`ProcessingError::Declined`](crate::gateway::ProcessingError) so the
/// transaction id and authorization code are present exactly when the
/// payment completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub session_id: String,
    pub transaction_id: String,
    pub authorization_code: String,
    pub processed_at: DateTime<Utc>,
}

/// Flat view of where a session currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Pending => "pending",
            SessionState::Processing => "processing",
            SessionState::Completed => "completed",
            SessionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

impl From<&SessionStatus> for SessionState {
    fn from(status: &SessionStatus) -> Self {
        match status {
            SessionStatus::Pending => SessionState::Pending,
            SessionStatus::Processing => SessionState::Processing,
            SessionStatus::Completed { .. } => SessionState::Completed,
            SessionStatus::Failed { .. } => SessionState::Failed,
        }
    }
}

impl PaymentSession {
    /// Flat lifecycle state derived from the full status.
    pub fn state(&self) -> SessionState {
        SessionState::from(self.status())
    }
}

/// Read-only status check result.
///
/// Reflects the session's actual stored state. (The original service drew a
/// random status here; that was a bug, not behavior worth preserving.)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub state: SessionState,
    pub last_checked: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::{Currency, Customer, PaymentMethod, PaymentRequest};
    use chrono::Duration;

    #[test]
    fn test_state_follows_status() {
        let request = PaymentRequest {
            amount: 100_00,
            currency: Currency::Rub,
            description: "top-up".to_string(),
            method: PaymentMethod::Mobile,
            customer: Customer {
                email: "a@b.com".to_string(),
                account_key: "76561197960435530".to_string(),
                nickname: "X".to_string(),
            },
        };
        let mut session = PaymentSession::new(
            "MPS_TEST".to_string(),
            &request,
            Utc::now(),
            Duration::minutes(30),
        );

        assert_eq!(session.state(), SessionState::Pending);
        session.begin_processing().unwrap();
        assert_eq!(session.state(), SessionState::Processing);
        session
            .complete("TXN".to_string(), "AUTH".to_string(), Utc::now())
            .unwrap();
        assert_eq!(session.state(), SessionState::Completed);
    }
}
