//! Domain models for the top-up simulator

pub mod history;
pub mod outcome;
pub mod profile;
pub mod request;
pub mod session;

// Re-exports
pub use history::{HistoryRecord, RecordStatus};
pub use outcome::{PaymentOutcome, SessionSnapshot, SessionState};
pub use profile::{AvatarSet, PersonaState, PlayerProfile};
pub use request::{
    CardBrand, CardDetails, Currency, Customer, PaymentMethod, PaymentMethodInfo, PaymentRequest,
};
pub use session::{DeclineReason, PaymentSession, SessionError, SessionStatus};
