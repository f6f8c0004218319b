//! Gateway engine
//!
//! The state machine at the heart of the simulator:
//!
//! ```text
//! initiate ──▶ Pending ──process──▶ Processing ──▶ Completed (0.95)
//!                                            └──▶ Failed    (0.05)
//! ```
//!
//! Processing is synchronous; the method's nominal latency exists only to
//! pace the caller's progress indicator (see [`progress`](super::progress)).
//! Both terminal states are final for the attempt; the caller re-initiates
//! a fresh session to retry.
//!
//! # Example
//!
//! ```
//! use topup_simulator_core_rs::{
//!     Currency, Customer, GatewayConfig, PaymentGateway, PaymentMethod, PaymentRequest,
//! };
//!
//! let mut gateway = PaymentGateway::new(GatewayConfig {
//!     rng_seed: 12345,
//!     ..GatewayConfig::default()
//! });
//!
//! let request = PaymentRequest {
//!     amount: 500_00,
//!     currency: Currency::Rub,
//!     description: "Steam balance top-up".to_string(),
//!     method: PaymentMethod::Qiwi,
//!     customer: Customer {
//!         email: "a@b.com".to_string(),
//!         account_key: "76561197960435530".to_string(),
//!         nickname: "X".to_string(),
//!     },
//! };
//!
//! let session_id = gateway.initiate(request).unwrap().id().to_string();
//! match gateway.process(&session_id, PaymentMethod::Qiwi, None) {
//!     Ok(outcome) => assert!(!outcome.transaction_id.is_empty()),
//!     Err(err) => println!("declined: {err}"),
//! }
//! ```

use crate::core::clock::{Clock, SystemClock};
use crate::models::outcome::{PaymentOutcome, SessionSnapshot};
use crate::models::request::{CardDetails, PaymentMethod, PaymentMethodInfo, PaymentRequest};
use crate::models::session::{DeclineReason, PaymentSession, SessionError};
use crate::rng::SeededRng;
use chrono::Duration;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{info, warn};

/// Errors rejecting a malformed initiation request
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("payment amount must be greater than 0 (got {amount})")]
    NonPositiveAmount { amount: i64 },

    #[error("unsupported payment method: {method:?}")]
    UnsupportedMethod { method: PaymentMethod },
}

/// Errors from processing and status checks
#[derive(Debug, Error, PartialEq)]
pub enum ProcessingError {
    #[error("unknown session: {session_id}")]
    UnknownSession { session_id: String },

    #[error("session {session_id} was initiated for {actual:?}, not {requested:?}")]
    MethodMismatch {
        session_id: String,
        requested: PaymentMethod,
        actual: PaymentMethod,
    },

    #[error("card details are required for session {session_id}")]
    CardDetailsRequired { session_id: String },

    #[error("{reason}")]
    Declined { reason: DeclineReason },

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Gateway tuning knobs.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Probability a processed payment is approved
    pub success_rate: f64,

    /// Session lifetime stamped onto `expires_at`
    pub session_ttl: Duration,

    /// Methods this gateway accepts
    pub methods: Vec<PaymentMethod>,

    /// Seed for the outcome/id randomness
    pub rng_seed: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            success_rate: 0.95,
            session_ttl: Duration::minutes(30),
            methods: PaymentMethod::ALL.to_vec(),
            rng_seed: 1,
        }
    }
}

/// The simulated payment gateway.
///
/// Owns every session it creates; no external mutation of session state is
/// possible. Single caller at a time (`&mut self`), like the rest of the
/// simulator.
pub struct PaymentGateway {
    config: GatewayConfig,
    sessions: HashMap<String, PaymentSession>,
    rng: SeededRng,
    clock: Box<dyn Clock>,
}

impl PaymentGateway {
    /// Create a gateway.
    ///
    /// # Panics
    /// Panics if `success_rate` is outside [0, 1].
    pub fn new(config: GatewayConfig) -> Self {
        assert!(
            (0.0..=1.0).contains(&config.success_rate),
            "success_rate must be within [0, 1]"
        );
        let rng = SeededRng::new(config.rng_seed);
        Self {
            config,
            sessions: HashMap::new(),
            rng,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the time source (tests pin session timestamps this way).
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Create a payment session in `Pending`.
    ///
    /// Validates the request (required fields, positive amount, supported
    /// method) and allocates a unique session id from a clock-millis
    /// component plus a random token. Pure computation, no external I/O.
    pub fn initiate(&mut self, request: PaymentRequest) -> Result<&PaymentSession, ValidationError> {
        if request.description.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "description",
            });
        }
        if request.customer.email.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "customer.email",
            });
        }
        if request.amount <= 0 {
            return Err(ValidationError::NonPositiveAmount {
                amount: request.amount,
            });
        }
        if !self.config.methods.contains(&request.method) {
            return Err(ValidationError::UnsupportedMethod {
                method: request.method,
            });
        }

        let now = self.clock.now();
        let session_id = format!("MPS_{}_{}", now.timestamp_millis(), self.rng.token(9));
        let session = PaymentSession::new(session_id.clone(), &request, now, self.config.session_ttl);

        info!(
            session_id = %session_id,
            method = request.method.code(),
            amount = request.amount,
            currency = %request.currency,
            "payment session initiated"
        );

        Ok(self.sessions.entry(session_id).or_insert(session))
    }

    /// Drive a pending session to its terminal state.
    ///
    /// Transitions Pending → Processing, draws the Bernoulli outcome, and
    /// finalizes the session. Success returns the transaction artifacts;
    /// a decline finalizes the session as `Failed` and surfaces the reason.
    /// Calling again on a terminal session fails without touching the
    /// recorded outcome.
    pub fn process(
        &mut self,
        session_id: &str,
        method: PaymentMethod,
        card: Option<&CardDetails>,
    ) -> Result<PaymentOutcome, ProcessingError> {
        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| ProcessingError::UnknownSession {
                session_id: session_id.to_string(),
            })?;

        if method != session.method() {
            return Err(ProcessingError::MethodMismatch {
                session_id: session_id.to_string(),
                requested: method,
                actual: session.method(),
            });
        }
        if method.requires_card_details() && card.is_none() {
            return Err(ProcessingError::CardDetailsRequired {
                session_id: session_id.to_string(),
            });
        }

        session.begin_processing()?;

        let now = self.clock.now();
        let approved = self.rng.chance(self.config.success_rate);

        if approved {
            let transaction_id = format!("TXN_{}_{}", now.timestamp_millis(), self.rng.token(6));
            let authorization_code = format!("AUTH_{}", self.rng.token(8));
            session.complete(transaction_id.clone(), authorization_code.clone(), now)?;

            info!(
                session_id,
                transaction_id = %transaction_id,
                "payment approved"
            );

            Ok(PaymentOutcome {
                session_id: session_id.to_string(),
                transaction_id,
                authorization_code,
                processed_at: now,
            })
        } else {
            let reason = *self.rng.pick(&DeclineReason::ALL);
            session.fail(reason, now)?;

            warn!(session_id, reason = %reason, "payment declined");

            Err(ProcessingError::Declined { reason })
        }
    }

    /// Read-only status check.
    ///
    /// Reflects the session's true stored state. (The service this
    /// simulates drew a random status here; a bug, not a behavior.)
    pub fn check_status(&self, session_id: &str) -> Result<SessionSnapshot, ProcessingError> {
        let session =
            self.sessions
                .get(session_id)
                .ok_or_else(|| ProcessingError::UnknownSession {
                    session_id: session_id.to_string(),
                })?;

        Ok(SessionSnapshot {
            session_id: session_id.to_string(),
            state: session.state(),
            last_checked: self.clock.now(),
        })
    }

    /// Look up a session by id.
    pub fn session(&self, session_id: &str) -> Option<&PaymentSession> {
        self.sessions.get(session_id)
    }

    /// Metadata for every method this gateway accepts.
    pub fn supported_methods(&self) -> Vec<PaymentMethodInfo> {
        self.config
            .methods
            .iter()
            .map(|method| PaymentMethodInfo::for_method(*method))
            .collect()
    }
}
