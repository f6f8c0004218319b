//! Payment session model
//!
//! A session is one attempt to pay a given amount via a given method, with a
//! bounded lifetime. Its status machine is strictly monotonic:
//!
//! ```text
//! Pending ──▶ Processing ──▶ Completed
//!                      └───▶ Failed
//! ```
//!
//! No transition skips Processing, and nothing leaves a terminal state.
//! Terminal data (transaction artifacts, decline reason) lives on the status
//! variant itself so a finalized session cannot exist without it.
//!
//! CRITICAL: all money values are i64 minor units.

use crate::models::request::{Currency, Customer, PaymentMethod};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fixed set of simulated decline reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineReason {
    InsufficientFunds,
    LimitExceeded,
    CardBlocked,
    ExpiredCard,
    BankDeclined,
    BankUnavailable,
}

impl DeclineReason {
    /// The full pool the gateway draws from on a failed attempt.
    pub const ALL: [DeclineReason; 6] = [
        DeclineReason::InsufficientFunds,
        DeclineReason::LimitExceeded,
        DeclineReason::CardBlocked,
        DeclineReason::ExpiredCard,
        DeclineReason::BankDeclined,
        DeclineReason::BankUnavailable,
    ];

    /// Human-readable text, surfaced to the visitor verbatim.
    pub fn message(&self) -> &'static str {
        match self {
            DeclineReason::InsufficientFunds => "Insufficient funds on the card",
            DeclineReason::LimitExceeded => "Operation limit exceeded",
            DeclineReason::CardBlocked => "Card is blocked",
            DeclineReason::ExpiredCard => "Card expiry date is invalid",
            DeclineReason::BankDeclined => "Transaction declined by the bank",
            DeclineReason::BankUnavailable => "Could not reach the issuing bank",
        }
    }
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Session status
///
/// Tracks the lifecycle of a payment attempt through the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SessionStatus {
    /// Session created, waiting for processing to start
    Pending,

    /// Method-specific collection done, outcome draw in flight
    Processing,

    /// Payment approved; transaction artifacts attached
    Completed {
        transaction_id: String,
        authorization_code: String,
        processed_at: DateTime<Utc>,
    },

    /// Payment declined with one of the fixed reasons
    Failed {
        reason: DeclineReason,
        processed_at: DateTime<Utc>,
    },
}

/// Errors raised by illegal session transitions
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("session {session_id} is already finalized")]
    AlreadyFinalized { session_id: String },

    #[error("session {session_id} must be processing to finalize (currently {current})")]
    NotProcessing {
        session_id: String,
        current: &'static str,
    },

    #[error("session {session_id} is already processing")]
    AlreadyProcessing { session_id: String },
}

/// One payment attempt with a bounded lifetime.
///
/// Created by [`PaymentGateway::initiate`](crate::PaymentGateway) in
/// `Pending` with a 30-minute expiry window. The expiry is stored and
/// reported but never enforced.
///
/// # Example
/// ```
/// use topup_simulator_core_rs::{Currency, Customer, PaymentMethod, PaymentRequest, PaymentSession};
/// use chrono::{Duration, Utc};
///
/// let request = PaymentRequest {
///     amount: 500_00,
///     currency: Currency::Rub,
///     description: "top-up".to_string(),
///     method: PaymentMethod::Qiwi,
///     customer: Customer {
///         email: "a@b.com".to_string(),
///         account_key: "76561197960435530".to_string(),
///         nickname: "X".to_string(),
///     },
/// };
/// let now = Utc::now();
/// let session = PaymentSession::new("MPS_1".to_string(), &request, now, Duration::minutes(30));
/// assert!(session.is_pending());
/// assert_eq!(session.expires_at(), now + Duration::minutes(30));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSession {
    /// Unique session identifier (time component + random token)
    id: String,

    method: PaymentMethod,

    /// Charge amount in minor units
    amount: i64,

    currency: Currency,

    description: String,

    customer: Customer,

    created_at: DateTime<Utc>,

    /// `created_at` + session TTL. Stored, never actively enforced.
    expires_at: DateTime<Utc>,

    status: SessionStatus,
}

impl PaymentSession {
    /// Create a session in `Pending`.
    ///
    /// Field validation happens in the gateway before this is called; the
    /// constructor only asserts the invariant it owns.
    ///
    /// # Panics
    /// Panics if `amount <= 0` (the gateway rejects such requests first).
    pub fn new(
        id: String,
        request: &crate::models::request::PaymentRequest,
        created_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        assert!(request.amount > 0, "amount must be positive");

        Self {
            id,
            method: request.method,
            amount: request.amount,
            currency: request.currency,
            description: request.description.clone(),
            customer: request.customer.clone(),
            created_at,
            expires_at: created_at + ttl,
            status: SessionStatus::Pending,
        }
    }

    /// Get session ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get payment method
    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Get charge amount (minor units)
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Get currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Get description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get customer block
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Get creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get expiry timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Get current status
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Check if the session is still pending
    pub fn is_pending(&self) -> bool {
        matches!(self.status, SessionStatus::Pending)
    }

    /// Check if the session reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            SessionStatus::Completed { .. } | SessionStatus::Failed { .. }
        )
    }

    /// Check if the expiry window has passed at the given instant.
    ///
    /// Informational only; nothing in the gateway enforces expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    fn status_name(&self) -> &'static str {
        match self.status {
            SessionStatus::Pending => "pending",
            SessionStatus::Processing => "processing",
            SessionStatus::Completed { .. } => "completed",
            SessionStatus::Failed { .. } => "failed",
        }
    }

    /// Transition Pending → Processing.
    ///
    /// # Returns
    /// - Ok(()) on the first call
    /// - Err(AlreadyProcessing) if called twice
    /// - Err(AlreadyFinalized) once terminal
    pub fn begin_processing(&mut self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Pending => {
                self.status = SessionStatus::Processing;
                Ok(())
            }
            SessionStatus::Processing => Err(SessionError::AlreadyProcessing {
                session_id: self.id.clone(),
            }),
            _ => Err(SessionError::AlreadyFinalized {
                session_id: self.id.clone(),
            }),
        }
    }

    /// Transition Processing → Completed, attaching transaction artifacts.
    ///
    /// Rejects the call unless the session is currently `Processing`: a
    /// session can never jump straight from `Pending` to a terminal state,
    /// and a terminal session keeps its recorded outcome forever.
    pub fn complete(
        &mut self,
        transaction_id: String,
        authorization_code: String,
        processed_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Processing => {
                self.status = SessionStatus::Completed {
                    transaction_id,
                    authorization_code,
                    processed_at,
                };
                Ok(())
            }
            SessionStatus::Pending => Err(SessionError::NotProcessing {
                session_id: self.id.clone(),
                current: self.status_name(),
            }),
            _ => Err(SessionError::AlreadyFinalized {
                session_id: self.id.clone(),
            }),
        }
    }

    /// Transition Processing → Failed with a decline reason.
    ///
    /// Same transition rules as [`complete`](Self::complete).
    pub fn fail(
        &mut self,
        reason: DeclineReason,
        processed_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Processing => {
                self.status = SessionStatus::Failed {
                    reason,
                    processed_at,
                };
                Ok(())
            }
            SessionStatus::Pending => Err(SessionError::NotProcessing {
                session_id: self.id.clone(),
                current: self.status_name(),
            }),
            _ => Err(SessionError::AlreadyFinalized {
                session_id: self.id.clone(),
            }),
        }
    }
}
