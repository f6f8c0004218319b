//! Tests for the payment gateway state machine
//!
//! CRITICAL: Sessions only move forward (Pending → Processing → terminal)
//! and terminal outcomes never change once recorded.

use chrono::{Duration, TimeZone};
use topup_simulator_core_rs::{
    Currency, Customer, GatewayConfig, ManualClock, PaymentGateway, PaymentMethod, PaymentRequest,
    PaymentSession, ProcessingError, SessionError, SessionState, ValidationError,
};

fn request(amount: i64, method: PaymentMethod) -> PaymentRequest {
    PaymentRequest {
        amount,
        currency: Currency::Rub,
        description: "Steam balance top-up".to_string(),
        method,
        customer: Customer {
            email: "user@example.com".to_string(),
            account_key: "76561197960435530".to_string(),
            nickname: "DemoPlayer".to_string(),
        },
    }
}

fn gateway(success_rate: f64, seed: u64) -> PaymentGateway {
    PaymentGateway::new(GatewayConfig {
        success_rate,
        rng_seed: seed,
        ..GatewayConfig::default()
    })
}

#[test]
fn test_qiwi_top_up_succeeds_end_to_end() {
    // 500.00 RUB over QIWI with a guaranteed approval.
    let mut gw = gateway(1.0, 42);

    let session = gw.initiate(request(500_00, PaymentMethod::Qiwi)).unwrap();
    assert!(session.id().starts_with("MPS_"));
    assert!(session.is_pending());
    assert_eq!(session.amount(), 500_00);

    let id = session.id().to_string();
    let outcome = gw.process(&id, PaymentMethod::Qiwi, None).unwrap();

    assert!(outcome.transaction_id.starts_with("TXN_"));
    assert!(outcome.authorization_code.starts_with("AUTH_"));
    assert_eq!(gw.check_status(&id).unwrap().state, SessionState::Completed);
}

#[test]
fn test_zero_amount_rejected_at_initiation() {
    let mut gw = gateway(1.0, 1);
    assert_eq!(
        gw.initiate(request(0, PaymentMethod::Qiwi)),
        Err(ValidationError::NonPositiveAmount { amount: 0 })
    );
    assert_eq!(
        gw.initiate(request(-100, PaymentMethod::Qiwi)),
        Err(ValidationError::NonPositiveAmount { amount: -100 })
    );
}

#[test]
fn test_outcome_rate_converges_to_configured_probability() {
    let mut gw = gateway(0.95, 2024);
    let n = 1000;
    let mut approved = 0;

    for _ in 0..n {
        let id = gw
            .initiate(request(100_00, PaymentMethod::Qiwi))
            .unwrap()
            .id()
            .to_string();
        match gw.process(&id, PaymentMethod::Qiwi, None) {
            Ok(_) => approved += 1,
            Err(ProcessingError::Declined { .. }) => {}
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    let rate = approved as f64 / n as f64;
    assert!(
        (rate - 0.95).abs() < 0.03,
        "approval rate {rate} too far from 0.95"
    );
}

#[test]
fn test_same_seed_same_outcomes() {
    let run = |seed: u64| -> Vec<bool> {
        let mut gw = gateway(0.5, seed);
        (0..50)
            .map(|_| {
                let id = gw
                    .initiate(request(100_00, PaymentMethod::Qiwi))
                    .unwrap()
                    .id()
                    .to_string();
                gw.process(&id, PaymentMethod::Qiwi, None).is_ok()
            })
            .collect()
    };

    assert_eq!(run(7), run(7));
    assert_ne!(run(7), run(8));
}

#[test]
fn test_terminal_session_cannot_be_reprocessed() {
    let mut gw = gateway(1.0, 5);
    let id = gw
        .initiate(request(250_00, PaymentMethod::YooMoney))
        .unwrap()
        .id()
        .to_string();

    let outcome = gw.process(&id, PaymentMethod::YooMoney, None).unwrap();

    // Re-processing is rejected and the stored outcome is untouched.
    assert!(matches!(
        gw.process(&id, PaymentMethod::YooMoney, None),
        Err(ProcessingError::Session(SessionError::AlreadyFinalized { .. }))
    ));
    let session = gw.session(&id).unwrap();
    assert!(session.is_terminal());
    assert_eq!(gw.check_status(&id).unwrap().state, SessionState::Completed);
    assert!(!outcome.transaction_id.is_empty());
}

#[test]
fn test_pending_session_cannot_jump_to_terminal() {
    let now = chrono::Utc::now();
    let mut session = PaymentSession::new(
        "MPS_TEST_1".to_string(),
        &request(100_00, PaymentMethod::Qiwi),
        now,
        Duration::minutes(30),
    );

    assert!(matches!(
        session.complete("TXN_X".to_string(), "AUTH_X".to_string(), now),
        Err(SessionError::NotProcessing { .. })
    ));
    assert!(matches!(
        session.fail(
            topup_simulator_core_rs::DeclineReason::InsufficientFunds,
            now
        ),
        Err(SessionError::NotProcessing { .. })
    ));
    assert!(session.is_pending());
}

#[test]
fn test_expiry_is_stamped_but_not_enforced() {
    let start = chrono::Utc
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .unwrap();
    let mut gw = gateway(1.0, 9).with_clock(Box::new(ManualClock::new(start)));

    let id = gw
        .initiate(request(100_00, PaymentMethod::Qiwi))
        .unwrap()
        .id()
        .to_string();

    let session = gw.session(&id).unwrap();
    assert_eq!(session.created_at(), start);
    assert_eq!(
        session.expires_at() - session.created_at(),
        Duration::minutes(30)
    );

    // Sessions past their expiry timestamp still process.
    let later = start + Duration::minutes(31);
    assert!(gw.session(&id).unwrap().is_expired(later));
    assert!(gw.process(&id, PaymentMethod::Qiwi, None).is_ok());
}

#[test]
fn test_session_ids_are_unique() {
    let mut gw = gateway(1.0, 3);
    let mut ids = std::collections::HashSet::new();
    for _ in 0..200 {
        let id = gw
            .initiate(request(100_00, PaymentMethod::Qiwi))
            .unwrap()
            .id()
            .to_string();
        assert!(ids.insert(id), "duplicate session id");
    }
}

#[test]
fn test_decline_carries_a_reason() {
    let mut gw = gateway(0.0, 6);
    let id = gw
        .initiate(request(100_00, PaymentMethod::Mobile))
        .unwrap()
        .id()
        .to_string();

    match gw.process(&id, PaymentMethod::Mobile, None) {
        Err(ProcessingError::Declined { reason }) => {
            assert!(!reason.message().is_empty());
        }
        other => panic!("expected decline, got {other:?}"),
    }
    assert_eq!(gw.check_status(&id).unwrap().state, SessionState::Failed);
}
