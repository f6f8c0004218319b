//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm for fast, seedable random numbers.
//! CRITICAL: every random draw in the simulator (payment outcome, decline
//! reason, id suffixes, demo profile synthesis) MUST go through this module,
//! so a fixed seed reproduces an entire demo run.

mod xorshift;

pub use xorshift::SeededRng;
