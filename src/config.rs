//! Controller configuration
//!
//! Every tunable constant of the behaviors lives here. Configuration is read
//! once at startup (defaults or a JSON file) and never written back.

use serde::{Deserialize, Serialize};

use crate::classifier::DeadZone;
use crate::error::GestureError;
use crate::shaping::ZoomCurve;
use crate::types::{Rgb, ScreenGeometry};

/// Destination used by idle auto-navigation
pub const DEFAULT_DESTINATION: &str = "Arizona Science Center";

/// Upper bound for every timer window in seconds (one day)
pub const MAX_WINDOW_SECS: i64 = 86_400;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Fixed screen geometry
    pub screen: ScreenGeometry,
    /// Tilt-to-fly behavior
    pub tilt: TiltConfig,
    /// Slide-to-pan behavior
    pub slide: SlideConfig,
    /// Search-bar navigation script
    pub navigation: NavigationConfig,
}

/// Tilt behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Palm height to wheel delta
    pub zoom: ZoomCurve,
    /// Minimum normalized speed that triggers movement
    pub threshold: f64,
    /// Pointer is recentered when this close to a screen edge (px)
    pub edge_margin_px: i32,
    /// Horizontal pointer travel per unit of turn speed (px)
    pub turn_gain_px: f64,
    /// Longest a single movement key is held (seconds)
    pub max_hold_secs: f64,
    /// Idle navigation destination
    pub destination: String,
}

/// Slide behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideConfig {
    /// Palm height to wheel delta
    pub zoom: ZoomCurve,
    /// Lateral and depth bands
    pub bands: DeadZone,
    /// Seconds without a hand before idle navigation
    pub idle_timeout_secs: i64,
    /// Seconds between idle planet rotations
    pub rotation_period_secs: i64,
    /// Seconds of input suppression after leaving street view
    pub street_view_window_secs: i64,
    /// Seconds a planet switch blocks further switches and input
    pub planet_cooldown_secs: i64,
    /// Idle navigation destination
    pub destination: String,
    /// Pixel probe for the street-view exit button
    pub street_view: StreetViewProbe,
    /// Screen layout of the planet menu
    pub planet_menu: PlanetMenuLayout,
}

/// Single-pixel detector for street view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetViewProbe {
    pub x: i32,
    pub y: i32,
    /// Color of the "exit street view" button at the probe
    pub color: Rgb,
}

/// Click targets of the planet menu, in screen pixels.
///
/// The menu shifts up by `off_earth_offset` when a body other than Earth is
/// shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetMenuLayout {
    pub menu: (i32, i32),
    pub planets_entry: (i32, i32),
    pub submenu_anchor: (i32, i32),
    pub mars: (i32, i32),
    pub moon: (i32, i32),
    pub off_earth_offset: i32,
}

/// Search-bar navigation pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Pause after focusing the search bar and after typing (seconds)
    pub pause_secs: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomCurve::tilt(),
            threshold: 0.1,
            edge_margin_px: 10,
            turn_gain_px: 100.0,
            max_hold_secs: 1.0,
            destination: DEFAULT_DESTINATION.to_string(),
        }
    }
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomCurve::slide(),
            bands: DeadZone::new(20.0, 200.0),
            idle_timeout_secs: 30,
            rotation_period_secs: 120,
            street_view_window_secs: 30,
            planet_cooldown_secs: 7,
            destination: DEFAULT_DESTINATION.to_string(),
            street_view: StreetViewProbe::default(),
            planet_menu: PlanetMenuLayout::default(),
        }
    }
}

impl Default for StreetViewProbe {
    fn default() -> Self {
        Self {
            x: 1893,
            y: 37,
            color: Rgb(248, 248, 248),
        }
    }
}

impl Default for PlanetMenuLayout {
    fn default() -> Self {
        Self {
            menu: (85, 11),
            planets_entry: (207, 340),
            submenu_anchor: (400, 340),
            mars: (415, 387),
            moon: (411, 410),
            off_earth_offset: 20,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { pause_secs: 0.5 }
    }
}

impl ControllerConfig {
    /// Parse a configuration from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, GestureError> {
        let config: ControllerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, GestureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), GestureError> {
        if self.screen.width <= 0 || self.screen.height <= 0 {
            return Err(GestureError::InvalidConfig(format!(
                "screen must have positive dimensions, got {}x{}",
                self.screen.width, self.screen.height
            )));
        }
        self.tilt
            .zoom
            .validate()
            .map_err(|e| GestureError::InvalidConfig(format!("tilt.zoom: {}", e)))?;
        self.slide
            .zoom
            .validate()
            .map_err(|e| GestureError::InvalidConfig(format!("slide.zoom: {}", e)))?;
        self.slide
            .bands
            .validate()
            .map_err(|e| GestureError::InvalidConfig(format!("slide.bands: {}", e)))?;
        if self.tilt.threshold < 0.0 {
            return Err(GestureError::InvalidConfig(format!(
                "tilt.threshold must be >= 0, got {}",
                self.tilt.threshold
            )));
        }
        if !(self.tilt.max_hold_secs > 0.0 && self.tilt.max_hold_secs <= 10.0) {
            return Err(GestureError::InvalidConfig(format!(
                "tilt.max_hold_secs must be in (0, 10], got {}",
                self.tilt.max_hold_secs
            )));
        }
        if self.tilt.edge_margin_px < 0 {
            return Err(GestureError::InvalidConfig(
                "tilt.edge_margin_px must be >= 0".to_string(),
            ));
        }
        for (name, value) in [
            ("slide.idle_timeout_secs", self.slide.idle_timeout_secs),
            ("slide.rotation_period_secs", self.slide.rotation_period_secs),
            (
                "slide.street_view_window_secs",
                self.slide.street_view_window_secs,
            ),
            ("slide.planet_cooldown_secs", self.slide.planet_cooldown_secs),
        ] {
            if value <= 0 || value > MAX_WINDOW_SECS {
                return Err(GestureError::InvalidConfig(format!(
                    "{} must be in (0, {}], got {}",
                    name, MAX_WINDOW_SECS, value
                )));
            }
        }
        if self.tilt.destination.trim().is_empty() || self.slide.destination.trim().is_empty() {
            return Err(GestureError::InvalidConfig(
                "destination must not be empty".to_string(),
            ));
        }
        if !(0.0..=10.0).contains(&self.navigation.pause_secs) {
            return Err(GestureError::InvalidConfig(format!(
                "navigation.pause_secs must be in [0, 10], got {}",
                self.navigation.pause_secs
            )));
        }
        Ok(())
    }
}
