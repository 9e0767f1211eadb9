//! Signal shaping
//!
//! Pure curves that turn a hand distance or angle into a control magnitude.
//! - Zoom curve: flat dead band bracketed by steep logistic ramps
//! - Speed curve: linear degrees-to-speed scale

use serde::{Deserialize, Serialize};

/// Parameters for the height-to-zoom curve.
///
/// Positive output zooms in (hand low over the sensor), negative output zooms
/// out (hand high above it). Heights between the two thresholds yield zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomCurve {
    /// Heights at or below this zoom in
    pub zoom_in_threshold: f64,
    /// Heights strictly above this zoom out
    pub zoom_out_threshold: f64,
    /// Slope of the logistic ramp
    pub sharpness: f64,
    /// Exponent applied to the normalized distance
    pub power: i32,
    /// Output magnitude bound (K)
    pub scale: f64,
}

impl ZoomCurve {
    /// Curve used by the tilt behavior
    pub fn tilt() -> Self {
        Self {
            zoom_in_threshold: 160.0,
            zoom_out_threshold: 250.0,
            sharpness: 15.0,
            power: 4,
            scale: 2.0,
        }
    }

    /// Curve used by the slide behavior
    pub fn slide() -> Self {
        Self {
            zoom_in_threshold: 120.0,
            zoom_out_threshold: 140.0,
            sharpness: 15.0,
            power: 4,
            scale: 1.5,
        }
    }

    /// Wheel delta for a palm height, in `[-scale, scale]`
    pub fn evaluate(&self, distance: f64) -> f64 {
        if distance <= self.zoom_in_threshold {
            let normalized = (distance / self.zoom_in_threshold).powi(self.power);
            (1.0 - logistic(self.sharpness * (normalized - 0.5))) * self.scale
        } else if distance > self.zoom_out_threshold {
            let normalized = ((distance - self.zoom_out_threshold)
                / (self.zoom_in_threshold - self.zoom_out_threshold))
                .powi(self.power);
            -logistic(self.sharpness * (normalized - 0.5)) * self.scale
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.zoom_in_threshold <= 0.0 {
            return Err(format!(
                "zoom_in_threshold must be > 0, got {}",
                self.zoom_in_threshold
            ));
        }
        if self.zoom_out_threshold < self.zoom_in_threshold {
            return Err(format!(
                "zoom_out_threshold ({}) must not be below zoom_in_threshold ({})",
                self.zoom_out_threshold, self.zoom_in_threshold
            ));
        }
        if self.scale < 0.0 {
            return Err(format!("scale must be >= 0, got {}", self.scale));
        }
        if self.power < 1 {
            return Err(format!("power must be >= 1, got {}", self.power));
        }
        Ok(())
    }
}

/// Standard logistic function, maps any input to (0, 1)
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Normalized movement speed for a tilt angle in degrees
///
/// 90° maps to 1.0; typical hand tilts land in roughly [-1, 1].
pub fn speed_from_angle(angle_degrees: f64) -> f64 {
    angle_degrees / 90.0
}
