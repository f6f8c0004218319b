//! Checkout orchestration
//!
//! Ties the components into the storefront's top-up flow: resolve the
//! account, quote the commission, run the payment through the gateway,
//! record the attempt in history, and dispatch the receipt. The service
//! owns its collaborators; callers hand them in at construction.

use crate::core::clock::{Clock, SystemClock};
use crate::gateway::{PaymentGateway, ProcessingError, ValidationError};
use crate::history::HistoryStore;
use crate::identity::{IdentifierResolver, IdentityError};
use crate::models::history::{HistoryRecord, RecordStatus};
use crate::models::request::{CardDetails, Currency, Customer, PaymentMethod, PaymentRequest};
use crate::receipt::{DeliveryResult, ReceiptNotifier};
use thiserror::Error;
use tracing::{info, warn};

/// Commission rate in basis points (5%).
const FEE_BASIS_POINTS: i64 = 500;

/// Errors from the top-up flow
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("invalid email address: {email}")]
    InvalidEmail { email: String },

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Payment(#[from] ProcessingError),
}

/// Price breakdown for a top-up amount.
///
/// The commission is 5% of the credited amount, rounded half-up to the
/// nearest minor unit; the visitor is charged `total`.
///
/// # Example
/// ```
/// use topup_simulator_core_rs::Quote;
///
/// let quote = Quote::new(500_00);
/// assert_eq!(quote.fee, 25_00);
/// assert_eq!(quote.total, 525_00);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Amount credited to the account, minor units
    pub amount: i64,
    /// Commission charged on top, minor units
    pub fee: i64,
    /// Amount the visitor pays, minor units
    pub total: i64,
}

impl Quote {
    /// Quote a top-up of `amount` minor units.
    ///
    /// # Panics
    /// Panics if `amount` is not positive.
    pub fn new(amount: i64) -> Self {
        assert!(amount > 0, "quoted amount must be positive");
        let fee = (amount * FEE_BASIS_POINTS + 5_000) / 10_000;
        Self {
            amount,
            fee,
            total: amount + fee,
        }
    }
}

/// Shallow shape check on an email address.
///
/// Accepts `local@domain.tld` where no part is empty, nothing contains
/// whitespace, and the domain has a dot. Deliverability is out of scope.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}

/// Everything the UI shows after a successful top-up.
#[derive(Debug, Clone)]
pub struct TopUpReceipt {
    /// The history record written for this attempt
    pub record: HistoryRecord,
    /// How the receipt email dispatch went
    pub delivery: DeliveryResult,
}

/// The storefront's top-up flow.
pub struct CheckoutService {
    gateway: PaymentGateway,
    resolver: IdentifierResolver,
    history: HistoryStore,
    notifier: ReceiptNotifier,
    clock: Box<dyn Clock>,
}

impl CheckoutService {
    pub fn new(
        gateway: PaymentGateway,
        resolver: IdentifierResolver,
        history: HistoryStore,
        notifier: ReceiptNotifier,
    ) -> Self {
        Self {
            gateway,
            resolver,
            history,
            notifier,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the time source (tests pin failure timestamps this way).
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run one top-up attempt end to end.
    ///
    /// `amount` is the credited amount in minor units and must be positive;
    /// the visitor is charged the quoted total. Every finalized attempt lands in history:
    /// approvals under the transaction id with the authorization code,
    /// declines under the session id with the decline reason. Receipt
    /// dispatch is best-effort and cannot fail the attempt; neither can a
    /// history write.
    pub fn top_up(
        &mut self,
        identifier: &str,
        email: &str,
        amount: i64,
        currency: Currency,
        method: PaymentMethod,
        card: Option<&CardDetails>,
    ) -> Result<TopUpReceipt, CheckoutError> {
        if !is_valid_email(email) {
            return Err(CheckoutError::InvalidEmail {
                email: email.to_string(),
            });
        }
        if amount <= 0 {
            return Err(CheckoutError::Validation(
                ValidationError::NonPositiveAmount { amount },
            ));
        }

        let profile = self.resolver.profile(identifier)?;
        let quote = Quote::new(amount);

        let request = PaymentRequest {
            amount: quote.total,
            currency,
            description: format!("Steam balance top-up for {}", profile.nickname),
            method,
            customer: Customer {
                email: email.to_string(),
                account_key: profile.steam_id64.clone(),
                nickname: profile.nickname.clone(),
            },
        };

        let session_id = self.gateway.initiate(request)?.id().to_string();

        match self.gateway.process(&session_id, method, card) {
            Ok(outcome) => {
                let record = HistoryRecord {
                    id: outcome.transaction_id.clone(),
                    amount: quote.amount,
                    fee: quote.fee,
                    total: quote.total,
                    account_key: profile.steam_id64.clone(),
                    nickname: profile.nickname.clone(),
                    email: email.to_string(),
                    date: outcome.processed_at,
                    status: RecordStatus::Completed,
                    method,
                    authorization_code: Some(outcome.authorization_code.clone()),
                    decline_reason: None,
                };

                self.record(&record);
                let delivery = self.notifier.send(&record);

                info!(
                    transaction_id = %record.id,
                    account_key = %record.account_key,
                    total = record.total,
                    "top-up completed"
                );

                Ok(TopUpReceipt { record, delivery })
            }
            Err(ProcessingError::Declined { reason }) => {
                let record = HistoryRecord {
                    id: session_id,
                    amount: quote.amount,
                    fee: quote.fee,
                    total: quote.total,
                    account_key: profile.steam_id64,
                    nickname: profile.nickname,
                    email: email.to_string(),
                    date: self.clock.now(),
                    status: RecordStatus::Failed,
                    method,
                    authorization_code: None,
                    decline_reason: Some(reason),
                };

                self.record(&record);

                Err(CheckoutError::Payment(ProcessingError::Declined { reason }))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Recorded attempts, newest first.
    pub fn history(&self) -> Vec<HistoryRecord> {
        self.history.list()
    }

    /// The profile that would be shown for an identifier.
    pub fn preview_profile(
        &mut self,
        identifier: &str,
    ) -> Result<crate::models::profile::PlayerProfile, CheckoutError> {
        Ok(self.resolver.profile(identifier)?)
    }

    fn record(&mut self, record: &HistoryRecord) {
        if let Err(err) = self.history.append(record.clone()) {
            warn!(id = %record.id, error = %err, "history write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayConfig;
    use crate::history::InMemoryStore;
    use crate::identity::OfflineIdentityProvider;
    use crate::receipt::LoggingTransport;

    fn service(success_rate: f64) -> CheckoutService {
        let gateway = PaymentGateway::new(GatewayConfig {
            success_rate,
            rng_seed: 7,
            ..GatewayConfig::default()
        });
        let resolver = IdentifierResolver::new(Box::new(OfflineIdentityProvider), 7);
        let history = HistoryStore::new(Box::new(InMemoryStore::new()));
        let notifier = ReceiptNotifier::new(Box::new(LoggingTransport));
        CheckoutService::new(gateway, resolver, history, notifier)
    }

    #[test]
    fn test_quote_rounds_half_up() {
        assert_eq!(Quote::new(100_00).fee, 5_00);
        assert_eq!(Quote::new(10).fee, 1); // 0.5 rounds up
        assert_eq!(Quote::new(9).fee, 0); // 0.45 rounds down
        assert_eq!(Quote::new(999).total, 999 + 50);
    }

    #[test]
    fn test_email_shape_check() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_invalid_email_rejected_before_payment() {
        let mut svc = service(1.0);
        let result = svc.top_up(
            "76561197960435530",
            "not-an-email",
            500_00,
            Currency::Rub,
            PaymentMethod::Qiwi,
            None,
        );
        assert!(matches!(result, Err(CheckoutError::InvalidEmail { .. })));
        assert!(svc.history().is_empty());
    }

    #[test]
    fn test_successful_top_up_records_and_notifies() {
        let mut svc = service(1.0);
        let receipt = svc
            .top_up(
                "76561197960435530",
                "a@b.com",
                500_00,
                Currency::Rub,
                PaymentMethod::Qiwi,
                None,
            )
            .unwrap();

        assert!(receipt.record.id.starts_with("TXN_"));
        assert_eq!(receipt.record.amount, 500_00);
        assert_eq!(receipt.record.fee, 25_00);
        assert_eq!(receipt.record.total, 525_00);
        assert_eq!(receipt.record.status, RecordStatus::Completed);
        assert!(receipt.record.authorization_code.is_some());
        assert!(receipt.delivery.success);

        let history = svc.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, receipt.record.id);
    }

    #[test]
    fn test_declined_top_up_still_recorded() {
        let mut svc = service(0.0);
        let result = svc.top_up(
            "76561197960435530",
            "a@b.com",
            500_00,
            Currency::Rub,
            PaymentMethod::Qiwi,
            None,
        );
        assert!(matches!(
            result,
            Err(CheckoutError::Payment(ProcessingError::Declined { .. }))
        ));

        let history = svc.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, RecordStatus::Failed);
        assert!(history[0].id.starts_with("MPS_"));
        assert_eq!(history[0].authorization_code, None);
        assert!(history[0].decline_reason.is_some());
    }

    #[test]
    fn test_vanity_identifier_flows_through() {
        let mut svc = service(1.0);
        let receipt = svc
            .top_up(
                "gabelogannewell",
                "a@b.com",
                100_00,
                Currency::Rub,
                PaymentMethod::Mobile,
                None,
            )
            .unwrap();

        assert!(receipt.record.account_key.starts_with("7656119"));
        assert_eq!(receipt.record.account_key.len(), 17);
    }
}
