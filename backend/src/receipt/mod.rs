//! Receipt dispatch
//!
//! After a payment finalizes, the storefront sends the visitor a receipt
//! through an external notification collaborator. Dispatch is best-effort:
//! the payment is already terminal by the time this runs, so a delivery
//! failure is reported as a soft warning and nothing else.

use crate::models::history::HistoryRecord;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Errors a transport can report
#[derive(Debug, Error, PartialEq)]
pub enum NotificationError {
    #[error("notification service unavailable: {message}")]
    Unavailable { message: String },

    #[error("notification rejected: {message}")]
    Rejected { message: String },
}

/// Flat template parameters for one receipt email.
///
/// Mirrors the fields the mail template interpolates; amounts stay in
/// minor units, the date is preformatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptEmail {
    pub to_email: String,
    pub nickname: String,
    pub account_key: String,
    pub transaction_id: String,
    pub amount: i64,
    pub fee: i64,
    pub total: i64,
    pub method: String,
    pub authorization_code: String,
    pub date: String,
}

impl ReceiptEmail {
    /// Build template parameters from a history record.
    pub fn from_record(record: &HistoryRecord) -> Self {
        Self {
            to_email: record.email.clone(),
            nickname: record.nickname.clone(),
            account_key: record.account_key.clone(),
            transaction_id: record.id.clone(),
            amount: record.amount,
            fee: record.fee,
            total: record.total,
            method: record.method.display_name().to_string(),
            authorization_code: record.authorization_code.clone().unwrap_or_default(),
            date: record.date.format("%d.%m.%Y %H:%M").to_string(),
        }
    }
}

/// Outcome of a receipt dispatch, as shown to the visitor.
///
/// Always produced; the notifier never raises toward the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryResult {
    pub success: bool,
    pub message: String,
    /// Provider-assigned id of the accepted message
    pub message_id: Option<String>,
}

/// External mail/notification service.
pub trait ReceiptTransport {
    /// Deliver one receipt; returns the provider's message id.
    fn deliver(&mut self, email: &ReceiptEmail) -> Result<String, NotificationError>;
}

/// Transport that records receipts in the structured log.
///
/// Stands in for a real mail provider in the offline demo; always
/// succeeds and hands back a synthetic message id.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTransport;

impl ReceiptTransport for LoggingTransport {
    fn deliver(&mut self, email: &ReceiptEmail) -> Result<String, NotificationError> {
        let message_id = Uuid::new_v4().to_string();
        info!(
            to = %email.to_email,
            transaction_id = %email.transaction_id,
            total = email.total,
            message_id = %message_id,
            "receipt email dispatched"
        );
        Ok(message_id)
    }
}

/// Best-effort receipt sender.
pub struct ReceiptNotifier {
    transport: Box<dyn ReceiptTransport>,
}

impl ReceiptNotifier {
    pub fn new(transport: Box<dyn ReceiptTransport>) -> Self {
        Self { transport }
    }

    /// Send a receipt for a finalized payment.
    ///
    /// Never fails toward the caller: transport errors come back as an
    /// unsuccessful [`DeliveryResult`] and leave payment state and history
    /// untouched.
    pub fn send(&mut self, record: &HistoryRecord) -> DeliveryResult {
        let email = ReceiptEmail::from_record(record);

        match self.transport.deliver(&email) {
            Ok(message_id) => DeliveryResult {
                success: true,
                message: "Receipt sent to your email".to_string(),
                message_id: Some(message_id),
            },
            Err(err) => {
                warn!(
                    to = %email.to_email,
                    transaction_id = %email.transaction_id,
                    error = %err,
                    "receipt dispatch failed"
                );
                DeliveryResult {
                    success: false,
                    message: format!("Failed to send receipt: {err}"),
                    message_id: None,
                }
            }
        }
    }
}
