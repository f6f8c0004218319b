//! Core utilities: time source abstraction

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
