//! History record model
//!
//! An immutable log entry representing one completed-or-failed payment
//! attempt, used purely for display. Records are never updated or deleted
//! once appended.

use crate::models::request::PaymentMethod;
use crate::models::session::DeclineReason;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal status a history record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Completed,
    Failed,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordStatus::Completed => f.write_str("Completed"),
            RecordStatus::Failed => f.write_str("Failed"),
        }
    }
}

/// One payment attempt as the visitor sees it in the history panel.
///
/// `id` is the transaction id for approved payments and the session id for
/// declined ones (declines never receive transaction artifacts).
///
/// CRITICAL: all money values are i64 minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,

    /// Top-up amount credited to the account (minor units)
    pub amount: i64,

    /// Commission charged on top of the amount (minor units)
    pub fee: i64,

    /// amount + fee, the sum actually charged (minor units)
    pub total: i64,

    pub account_key: String,
    pub nickname: String,
    pub email: String,

    pub date: DateTime<Utc>,

    pub status: RecordStatus,
    pub method: PaymentMethod,

    /// Present iff the payment completed
    pub authorization_code: Option<String>,

    /// Present iff the payment was declined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<DeclineReason>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> HistoryRecord {
        HistoryRecord {
            id: "TXN_1".to_string(),
            amount: 500_00,
            fee: 25_00,
            total: 525_00,
            account_key: "76561197960435530".to_string(),
            nickname: "X".to_string(),
            email: "a@b.com".to_string(),
            date: Utc::now(),
            status: RecordStatus::Completed,
            method: PaymentMethod::Qiwi,
            authorization_code: Some("AUTH_1".to_string()),
            decline_reason: None,
        }
    }

    #[test]
    fn test_record_json_round_trip() {
        let original = record();
        let json = serde_json::to_string(&original).unwrap();
        let back: HistoryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_decline_reason_omitted_for_completed() {
        let json = serde_json::to_value(record()).unwrap();
        assert!(json.get("decline_reason").is_none());
        assert_eq!(json["status"], "completed");
        assert_eq!(json["method"], "qiwi");
    }
}
