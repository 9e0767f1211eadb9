//! Dead-zone and threshold classification
//!
//! Turns a scalar axis sample into a discrete directional intent. Values at
//! or beyond the outer limit are deliberately non-triggering.

use serde::{Deserialize, Serialize};

/// Directional intent along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Negative,
    Neutral,
    Positive,
}

/// Band classifier with an inner dead zone and an outer cut-off
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeadZone {
    /// Half-width of the central non-triggering band
    pub dead_zone: f64,
    /// Magnitude at and beyond which input is ignored
    pub outer_limit: f64,
}

impl DeadZone {
    pub fn new(dead_zone: f64, outer_limit: f64) -> Self {
        Self {
            dead_zone,
            outer_limit,
        }
    }

    pub fn classify(&self, value: f64) -> Direction {
        if -self.outer_limit < value && value < -self.dead_zone {
            Direction::Negative
        } else if self.dead_zone < value && value < self.outer_limit {
            Direction::Positive
        } else {
            Direction::Neutral
        }
    }

    /// Whether the value lies strictly inside the outer limit
    pub fn within_limits(&self, value: f64) -> bool {
        -self.outer_limit < value && value < self.outer_limit
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.dead_zone < 0.0 {
            return Err(format!("dead_zone must be >= 0, got {}", self.dead_zone));
        }
        if self.outer_limit <= self.dead_zone {
            return Err(format!(
                "outer_limit ({}) must exceed dead_zone ({})",
                self.outer_limit, self.dead_zone
            ));
        }
        Ok(())
    }
}

impl Default for DeadZone {
    fn default() -> Self {
        Self::new(20.0, 200.0)
    }
}

/// Symmetric threshold classification used for tilt speeds
pub fn classify_threshold(speed: f64, threshold: f64) -> Direction {
    if speed < -threshold {
        Direction::Negative
    } else if speed > threshold {
        Direction::Positive
    } else {
        Direction::Neutral
    }
}
