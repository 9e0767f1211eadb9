//! Gesture behaviors
//!
//! A behavior is a named, stateful strategy that turns each frame into
//! executor calls. Behaviors own all of their motion state; nothing is shared
//! between instances.
//!
//! - `tilt`: palm tilt flies the camera with timed key holds
//! - `slide`: palm position pans with held keys, plus planet switching and
//!   idle auto-navigation

pub mod keys;
pub mod planet;
pub mod script;
pub mod slide;
pub mod street_view;
pub mod tilt;

pub use keys::HeldKeys;
pub use planet::PlanetSwitcher;
pub use slide::HandSlideBehavior;
pub use street_view::StreetViewGuard;
pub use tilt::HandTiltBehavior;

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::executor::ActionExecutor;
use crate::types::{Frame, ScreenGeometry};

/// Everything a behavior may touch while handling one frame
pub struct Context<'a> {
    pub executor: &'a mut dyn ActionExecutor,
    pub clock: &'a mut dyn Clock,
    pub screen: ScreenGeometry,
}

impl<'a> Context<'a> {
    pub fn new(
        executor: &'a mut dyn ActionExecutor,
        clock: &'a mut dyn Clock,
        screen: ScreenGeometry,
    ) -> Self {
        Self {
            executor,
            clock,
            screen,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

/// A selectable frame-to-action strategy
pub trait Behavior {
    /// Unique registry name
    fn name(&self) -> &str;

    /// Handle one frame. Never fails; absent hands and cooldowns are normal
    /// control flow.
    fn execute(&mut self, frame: &Frame, ctx: &mut Context<'_>);
}
