//! Gesture Globe - Hand-gesture navigation for a desktop globe viewer
//!
//! Frames from a hand-tracking sensor are turned into synthetic keyboard and
//! mouse input through a selectable behavior: frame source → foreground gate
//! → behavior registry → behavior → action executor.
//!
//! ## Behaviors
//!
//! - **hand-tilt**: palm pitch, roll and yaw fly the camera with timed key holds
//! - **hand-slide**: palm position pans with held keys, with planet switching,
//!   street-view exit and idle auto-navigation

pub mod behavior;
pub mod classifier;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod executor;
pub mod registry;
pub mod shaping;
pub mod source;
pub mod types;

pub use behavior::{Behavior, Context, HandSlideBehavior, HandTiltBehavior};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ControllerConfig;
pub use controller::GestureController;
pub use error::GestureError;
pub use executor::{
    Action, ActionExecutor, ForegroundGate, RecordingExecutor, StaticGate, TitleGate,
};
pub use registry::BehaviorRegistry;
pub use source::{FrameReader, FrameValidationError};
pub use types::{Frame, Hand, Key, MouseButton, Orientation, Planet, Vector3};

/// Crate version reported by the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name reported by the CLI
pub const PRODUCER_NAME: &str = "gesture-globe";
