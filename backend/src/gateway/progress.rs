//! Progress pacing for the processing indicator
//!
//! Each payment method carries a nominal processing duration. The gateway
//! itself never sleeps; this schedule converts that duration into the
//! sequence of percentage steps a UI prints while it paces the wait.

use std::time::Duration;

/// Default tick interval between progress updates.
const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Iterator over progress percentages for a nominal duration.
///
/// Yields one value per interval, ending exactly at 100.0.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use topup_simulator_core_rs::ProgressSchedule;
///
/// let schedule = ProgressSchedule::new(Duration::from_millis(2000));
/// let steps: Vec<f64> = schedule.collect();
/// assert_eq!(steps.len(), 20);
/// assert_eq!(*steps.last().unwrap(), 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct ProgressSchedule {
    interval: Duration,
    total_steps: u32,
    current_step: u32,
}

impl ProgressSchedule {
    /// Schedule for a nominal duration at the default 100ms interval.
    pub fn new(duration: Duration) -> Self {
        Self::with_interval(duration, DEFAULT_INTERVAL)
    }

    /// Schedule with a custom tick interval.
    ///
    /// # Panics
    /// Panics if the interval is zero.
    pub fn with_interval(duration: Duration, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "interval must be non-zero");

        let total = duration.as_millis().div_ceil(interval.as_millis()).max(1) as u32;
        Self {
            interval,
            total_steps: total,
            current_step: 0,
        }
    }

    /// Time to wait between steps.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total number of steps the schedule will yield.
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }
}

impl Iterator for ProgressSchedule {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.current_step >= self.total_steps {
            return None;
        }
        self.current_step += 1;
        let percent = (self.current_step as f64 / self.total_steps as f64) * 100.0;
        Some(percent.min(100.0))
    }
}
