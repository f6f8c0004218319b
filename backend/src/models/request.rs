//! Payment request model
//!
//! What the storefront hands to the gateway when the visitor confirms a
//! top-up: amount, currency, method, and the customer block (email plus the
//! resolved account identity).
//!
//! CRITICAL: all money values are i64 minor units (kopecks/cents).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Supported settlement currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Rub,
    Usd,
    Eur,
}

impl Currency {
    /// All currencies the demo gateway accepts.
    pub const ALL: [Currency; 3] = [Currency::Rub, Currency::Usd, Currency::Eur];

    /// ISO-style code, as serialized on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Payment method selected by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Qiwi,
    YooMoney,
    Mobile,
}

impl PaymentMethod {
    /// All methods the demo gateway supports.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Card,
        PaymentMethod::Qiwi,
        PaymentMethod::YooMoney,
        PaymentMethod::Mobile,
    ];

    /// Wire code (`card`, `qiwi`, `yoomoney`, `mobile`).
    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Qiwi => "qiwi",
            PaymentMethod::YooMoney => "yoomoney",
            PaymentMethod::Mobile => "mobile",
        }
    }

    /// Human-readable name for receipts and history rows.
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Bank card",
            PaymentMethod::Qiwi => "QIWI wallet",
            PaymentMethod::YooMoney => "YooMoney",
            PaymentMethod::Mobile => "Mobile payment",
        }
    }

    /// One-line description shown on the method picker.
    pub fn description(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Pay with a Visa, MasterCard or Mir card",
            PaymentMethod::Qiwi => "Pay from a QIWI wallet",
            PaymentMethod::YooMoney => "Pay via YooMoney",
            PaymentMethod::Mobile => "Pay from a mobile phone account",
        }
    }

    /// Nominal processing duration for this method.
    ///
    /// Used only to pace the progress indicator; never a correctness
    /// constraint. The library itself does not sleep.
    pub fn processing_time(&self) -> Duration {
        let millis = match self {
            PaymentMethod::Card => 3000,
            PaymentMethod::Qiwi => 2000,
            PaymentMethod::YooMoney => 2500,
            PaymentMethod::Mobile => 4000,
        };
        Duration::from_millis(millis)
    }

    /// Whether processing requires externally supplied card fields.
    pub fn requires_card_details(&self) -> bool {
        matches!(self, PaymentMethod::Card)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Static metadata describing one payment method.
///
/// What the original service returned from its "supported payment methods"
/// endpoint. Limits are informational, not enforced at initiation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodInfo {
    pub code: PaymentMethod,
    pub name: String,
    pub description: String,
    /// Minimum top-up (minor units)
    pub min_amount: i64,
    /// Maximum top-up (minor units)
    pub max_amount: i64,
    pub currencies: Vec<Currency>,
}

impl PaymentMethodInfo {
    /// Metadata for one method, with the demo gateway's fixed limits.
    pub fn for_method(method: PaymentMethod) -> Self {
        Self {
            code: method,
            name: method.display_name().to_string(),
            description: method.description().to_string(),
            min_amount: 10_00,
            max_amount: 50_000_00,
            currencies: Currency::ALL.to_vec(),
        }
    }
}

/// The paying customer: contact address plus resolved account identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub email: String,
    /// Canonical account key (SteamID64 rendering)
    pub account_key: String,
    pub nickname: String,
}

/// A request to create a payment session.
///
/// Invariants checked by [`PaymentGateway::initiate`](crate::PaymentGateway):
/// amount > 0, non-empty description and email, supported method.
///
/// # Example
/// ```
/// use topup_simulator_core_rs::{Currency, Customer, PaymentMethod, PaymentRequest};
///
/// let request = PaymentRequest {
///     amount: 500_00,
///     currency: Currency::Rub,
///     description: "Steam balance top-up".to_string(),
///     method: PaymentMethod::Qiwi,
///     customer: Customer {
///         email: "a@b.com".to_string(),
///         account_key: "76561197960435530".to_string(),
///         nickname: "X".to_string(),
///     },
/// };
/// assert!(request.amount > 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Charge amount in minor units (must be positive)
    pub amount: i64,
    pub currency: Currency,
    pub description: String,
    pub method: PaymentMethod,
    pub customer: Customer,
}

/// Card brand of a demo card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    MasterCard,
    Mir,
}

/// Opaque demo card fields.
///
/// Held as-is and never validated for real correctness; the gateway only
/// checks that *some* card data was supplied for the card method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub holder: String,
    pub brand: CardBrand,
}

impl CardDetails {
    /// The fixed pool of test cards the demo UI offers.
    pub fn demo_cards() -> Vec<CardDetails> {
        vec![
            CardDetails {
                number: "4242424242424242".to_string(),
                expiry: "12/25".to_string(),
                cvv: "123".to_string(),
                holder: "IVAN IVANOV".to_string(),
                brand: CardBrand::Visa,
            },
            CardDetails {
                number: "5555555555554444".to_string(),
                expiry: "09/24".to_string(),
                cvv: "456".to_string(),
                holder: "PETR PETROV".to_string(),
                brand: CardBrand::MasterCard,
            },
            CardDetails {
                number: "2201382000000013".to_string(),
                expiry: "03/26".to_string(),
                cvv: "789".to_string(),
                holder: "MARIA SIDOROVA".to_string(),
                brand: CardBrand::Mir,
            },
        ]
    }
}
