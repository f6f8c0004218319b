//! Tests for deterministic random number generation
//!
//! CRITICAL: Same seed must always produce the same sequence. Every random
//! draw in the simulator (outcomes, tokens, demo profiles) flows through
//! this generator.

use topup_simulator_core_rs::SeededRng;

#[test]
fn test_same_seed_same_sequence() {
    let mut a = SeededRng::new(12345);
    let mut b = SeededRng::new(12345);

    for _ in 0..1000 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = SeededRng::new(1);
    let mut b = SeededRng::new(2);

    let a_vals: Vec<u64> = (0..10).map(|_| a.next_u64()).collect();
    let b_vals: Vec<u64> = (0..10).map(|_| b.next_u64()).collect();
    assert_ne!(a_vals, b_vals);
}

#[test]
fn test_next_f64_in_unit_interval() {
    let mut rng = SeededRng::new(99);
    for _ in 0..10_000 {
        let x = rng.next_f64();
        assert!((0.0..1.0).contains(&x));
    }
}

#[test]
fn test_range_bounds() {
    let mut rng = SeededRng::new(7);
    for _ in 0..10_000 {
        let v = rng.range(10, 50);
        assert!((10..50).contains(&v));
    }
}

#[test]
fn test_chance_extremes() {
    let mut rng = SeededRng::new(3);
    for _ in 0..100 {
        assert!(rng.chance(1.0));
        assert!(!rng.chance(0.0));
    }
}

#[test]
fn test_chance_converges_to_probability() {
    let mut rng = SeededRng::new(42);
    let n = 100_000;
    let hits = (0..n).filter(|_| rng.chance(0.95)).count();
    let observed = hits as f64 / n as f64;
    assert!(
        (observed - 0.95).abs() < 0.01,
        "observed success rate {observed} too far from 0.95"
    );
}

#[test]
fn test_token_charset_and_length() {
    let mut rng = SeededRng::new(5);
    for len in [6, 8, 9] {
        let token = rng.token(len);
        assert_eq!(token.len(), len);
        assert!(token.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}

#[test]
fn test_tokens_are_deterministic() {
    let mut a = SeededRng::new(2024);
    let mut b = SeededRng::new(2024);
    assert_eq!(a.token(9), b.token(9));
    assert_eq!(a.token(6), b.token(6));
}

#[test]
fn test_pick_covers_all_elements() {
    let mut rng = SeededRng::new(11);
    let items = ["a", "b", "c", "d"];
    let mut seen = std::collections::HashSet::new();
    for _ in 0..1000 {
        seen.insert(*rng.pick(&items));
    }
    assert_eq!(seen.len(), items.len());
}

#[test]
fn test_state_snapshot_resumes_sequence() {
    let mut rng = SeededRng::new(77);
    rng.next_u64();
    rng.next_u64();

    let mut resumed = SeededRng::new(rng.state());
    // Seeding with the saved state re-enters the same stream one step in.
    assert_eq!(rng.next_u64(), resumed.next_u64());
}
