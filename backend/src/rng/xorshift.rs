//! xorshift64* random number generator
//!
//! Fast, high-quality PRNG with 64-bit state. Deterministic: the same seed
//! always yields the same sequence, which is what lets tests force both the
//! approved and the declined branch of a simulated payment.

use serde::{Deserialize, Serialize};

/// Characters used for synthesized id suffixes (`MPS_…`, `TXN_…`, `AUTH_…`).
///
/// Matches the original service's base-36 uppercase tokens.
const TOKEN_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Seedable random number generator using xorshift64*
///
/// # Example
/// ```
/// use topup_simulator_core_rs::SeededRng;
///
/// let mut rng = SeededRng::new(12345);
/// let approved = rng.chance(0.95);
/// let suffix = rng.token(8);
/// assert_eq!(suffix.len(), 8);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededRng {
    /// Internal state (64-bit, never zero)
    state: u64,
}

impl SeededRng {
    /// Create a new generator with the given seed.
    ///
    /// A zero seed is coerced to 1 (xorshift requirement).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate the next random u64, advancing the internal state.
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate a random f64 in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next_u64();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Generate a random value in [min, max).
    ///
    /// # Panics
    /// Panics if min >= max.
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next_u64();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }

    /// Bernoulli draw: returns true with probability `p`.
    ///
    /// Used for the approve/decline decision in payment processing.
    ///
    /// # Example
    /// ```
    /// use topup_simulator_core_rs::SeededRng;
    ///
    /// let mut rng = SeededRng::new(7);
    /// assert!(rng.chance(1.0));
    /// assert!(!rng.chance(0.0));
    /// ```
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick a uniformly random element from a non-empty slice.
    ///
    /// # Panics
    /// Panics if the slice is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "cannot pick from an empty slice");
        let idx = (self.next_u64() % items.len() as u64) as usize;
        &items[idx]
    }

    /// Generate an uppercase alphanumeric token of the given length.
    ///
    /// These tokens form the random component of session, transaction and
    /// authorization identifiers.
    pub fn token(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| {
                let idx = (self.next_u64() % TOKEN_CHARSET.len() as u64) as usize;
                TOKEN_CHARSET[idx] as char
            })
            .collect()
    }

    /// Get the current internal state (for snapshotting a run).
    pub fn state(&self) -> u64 {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = SeededRng::new(0);
        assert_ne!(rng.state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    fn test_next_f64_in_range() {
        let mut rng = SeededRng::new(12345);

        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!(
                (0.0..1.0).contains(&val),
                "next_f64() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    #[should_panic(expected = "min must be less than max")]
    fn test_range_invalid_bounds() {
        let mut rng = SeededRng::new(12345);
        rng.range(100, 50);
    }

    #[test]
    fn test_token_uses_charset_only() {
        let mut rng = SeededRng::new(99);
        let token = rng.token(64);
        assert_eq!(token.len(), 64);
        assert!(token
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase()));
    }

    #[test]
    fn test_pick_covers_all_elements() {
        let mut rng = SeededRng::new(4242);
        let items = ["a", "b", "c"];
        let mut seen = [false; 3];
        for _ in 0..200 {
            let picked = rng.pick(&items);
            let idx = items.iter().position(|i| i == picked).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s), "every element should be reachable");
    }
}
