//! Top-up Simulator Core - Rust Engine
//!
//! Client-side simulation of a Steam balance top-up storefront: payment
//! sessions, account resolution, history, and receipts, with no real
//! money and no network.
//!
//! # Architecture
//!
//! - **core**: Time source abstraction
//! - **models**: Domain types (PaymentSession, HistoryRecord, PlayerProfile)
//! - **identity**: Steam identifier parsing and profile resolution
//! - **gateway**: The simulated payment gateway state machine
//! - **history**: Append-only payment history log
//! - **receipt**: Best-effort receipt dispatch
//! - **checkout**: Orchestration of the full top-up flow
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (minor units)
//! 2. All randomness is deterministic (seeded RNG)
//! 3. Sessions only move forward: Pending → Processing → terminal

// Module declarations
pub mod checkout;
pub mod core;
pub mod gateway;
pub mod history;
pub mod identity;
pub mod models;
pub mod receipt;
pub mod rng;

// Re-exports for convenience
pub use checkout::{is_valid_email, CheckoutError, CheckoutService, Quote, TopUpReceipt};
pub use core::clock::{Clock, ManualClock, SystemClock};
pub use gateway::{
    GatewayConfig, PaymentGateway, ProcessingError, ProgressSchedule, ValidationError,
};
pub use history::{HistoryStore, InMemoryStore, JsonFileStore, KeyValueStore, StoreError, HISTORY_KEY};
pub use identity::{
    DemoProfileGenerator, IdentifierResolver, IdentityError, IdentityProvider,
    OfflineIdentityProvider, PlayerSummary, SteamIdentifier,
};
pub use models::{
    history::{HistoryRecord, RecordStatus},
    outcome::{PaymentOutcome, SessionSnapshot, SessionState},
    profile::{AvatarSet, PersonaState, PlayerProfile},
    request::{
        CardBrand, CardDetails, Currency, Customer, PaymentMethod, PaymentMethodInfo,
        PaymentRequest,
    },
    session::{DeclineReason, PaymentSession, SessionError, SessionStatus},
};
pub use rng::SeededRng;
pub use receipt::{
    DeliveryResult, LoggingTransport, NotificationError, ReceiptEmail, ReceiptNotifier,
    ReceiptTransport,
};
