//! Time sources
//!
//! Behaviors read the current time and perform timed key holds through a
//! `Clock`, so cooldowns and idle timeouts can run against simulated time.

use chrono::{DateTime, Duration, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Block for `duration`. Simulated clocks advance instead.
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock time with real thread sleeps
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&mut self, duration: Duration) {
        if let Ok(std_duration) = duration.to_std() {
            std::thread::sleep(std_duration);
        }
    }
}

/// Simulated clock that only moves when told to
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    now: DateTime<Utc>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: start }
    }

    /// Move forward by `duration`, saturating at the latest representable instant
    pub fn advance(&mut self, duration: Duration) {
        self.now = self
            .now
            .checked_add_signed(duration)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
    }

    pub fn advance_secs(&mut self, seconds: i64) {
        self.advance(Duration::seconds(seconds));
    }

    /// Jump to `instant` if it is later than the current time
    pub fn set(&mut self, instant: DateTime<Utc>) {
        if instant > self.now {
            self.now = instant;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::default())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        if duration > Duration::zero() {
            self.advance(duration);
        }
    }
}

/// Convert fractional seconds to a chrono duration, clamping negatives to zero
pub fn seconds_f64(seconds: f64) -> Duration {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Duration::zero();
    }
    Duration::milliseconds((seconds * 1000.0).round() as i64)
}

/// Elapsed time between two instants in fractional seconds
pub fn elapsed_secs(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - since).num_milliseconds() as f64 / 1000.0
}
