//! Mock payment gateway
//!
//! Owns the payment session lifecycle: initiation, method-specific
//! collection, the randomized approve/decline draw, and read-only status
//! checks. See `engine.rs` for the implementation.

pub mod engine;
pub mod progress;

// Re-export main types for convenience
pub use engine::{GatewayConfig, PaymentGateway, ProcessingError, ValidationError};
pub use progress::ProgressSchedule;
