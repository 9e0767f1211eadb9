//! Core types for the gesture pipeline
//!
//! Frames and hands as delivered by the sensor, plus the small vocabulary of
//! keys, buttons, planets and colors that behaviors speak to the executor in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conversion factor from the sensor's native angle unit (radians) to degrees
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// 3-axis position in sensor space (millimeters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// Left-right
    pub x: f64,
    /// Vertical distance above the sensor
    pub y: f64,
    /// Forward-back (negative is away from the user)
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Hand orientation in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
}

impl Orientation {
    pub fn new(pitch: f64, roll: f64, yaw: f64) -> Self {
        Self { pitch, roll, yaw }
    }

    /// Build an orientation from angles already expressed in degrees
    pub fn from_degrees(pitch: f64, roll: f64, yaw: f64) -> Self {
        Self {
            pitch: pitch / RAD_TO_DEG,
            roll: roll / RAD_TO_DEG,
            yaw: yaw / RAD_TO_DEG,
        }
    }

    /// (pitch, roll, yaw) in degrees
    pub fn to_degrees(&self) -> (f64, f64, f64) {
        (
            self.pitch * RAD_TO_DEG,
            self.roll * RAD_TO_DEG,
            self.yaw * RAD_TO_DEG,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.pitch.is_finite() && self.roll.is_finite() && self.yaw.is_finite()
    }
}

/// A single tracked hand within a frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hand {
    /// Palm center position
    pub palm_position: Vector3,
    /// Palm orientation
    #[serde(default)]
    pub orientation: Orientation,
    /// Whether this is the user's left hand
    #[serde(default)]
    pub is_left: bool,
}

impl Hand {
    /// Hand at a position with a flat, level palm
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            palm_position: Vector3::new(x, y, z),
            ..Default::default()
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

/// One sampling instant from the sensor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    /// Sensor frame counter
    #[serde(default)]
    pub id: u64,
    /// Capture time, when the source records one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Tracked hands, in sensor order
    #[serde(default)]
    pub hands: Vec<Hand>,
}

impl Frame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_hand(hand: Hand) -> Self {
        Self {
            hands: vec![hand],
            ..Default::default()
        }
    }

    pub fn first_hand(&self) -> Option<&Hand> {
        self.hands.first()
    }
}

/// Keys the controller presses or polls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Slash,
    Char(char),
}

impl Key {
    /// The four arrow keys used for continuous navigation
    pub const NAVIGATION: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Celestial body shown by the globe application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Planet {
    Earth,
    Mars,
    Moon,
}

impl Planet {
    /// Next body in the idle rotation cycle
    pub fn next(&self) -> Planet {
        match self {
            Planet::Earth => Planet::Mars,
            Planet::Mars => Planet::Moon,
            Planet::Moon => Planet::Earth,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Planet::Earth => "earth",
            Planet::Mars => "mars",
            Planet::Moon => "moon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Fixed screen dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub width: i32,
    pub height: i32,
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl ScreenGeometry {
    pub fn center(&self) -> (i32, i32) {
        (self.width / 2, self.height / 2)
    }

    /// Whether a point lies within `margin` pixels of any edge
    pub fn near_edge(&self, x: i32, y: i32, margin: i32) -> bool {
        x < margin || x > self.width - margin || y < margin || y > self.height - margin
    }
}
