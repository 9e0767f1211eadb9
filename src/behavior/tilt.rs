//! Tilt-to-fly behavior
//!
//! Palm pitch moves forward/backward, roll strafes, yaw turns the camera and
//! palm height zooms. Movement is issued as blocking key holds whose length
//! is proportional to the tilt, so one frame may occupy the dispatch for a
//! few seconds.

use tracing::debug;

use super::script::{drag_turn, hold_key, navigate_to};
use super::{Behavior, Context};
use crate::classifier::{classify_threshold, Direction};
use crate::config::TiltConfig;
use crate::shaping::speed_from_angle;
use crate::types::{Frame, Hand, Key};

pub const HAND_TILT: &str = "hand-tilt";

pub struct HandTiltBehavior {
    config: TiltConfig,
    pause_secs: f64,
    auto_navigate: bool,
}

impl HandTiltBehavior {
    pub fn new(config: TiltConfig, pause_secs: f64) -> Self {
        Self {
            config,
            pause_secs,
            auto_navigate: false,
        }
    }

    pub fn is_auto_navigating(&self) -> bool {
        self.auto_navigate
    }

    fn recenter_pointer(&self, ctx: &mut Context<'_>) {
        let (x, y) = ctx.executor.mouse_position();
        if ctx.screen.near_edge(x, y, self.config.edge_margin_px) {
            let (cx, cy) = ctx.screen.center();
            debug!(x, y, "pointer near screen edge, recentering");
            ctx.executor.move_mouse_to(cx, cy);
        }
    }

    fn control_movement(&self, hand: &Hand, ctx: &mut Context<'_>) {
        let (pitch, roll, yaw) = hand.orientation.to_degrees();
        let forward_speed = speed_from_angle(pitch);
        let strafe_speed = speed_from_angle(roll);
        let turn_speed = speed_from_angle(yaw);
        let threshold = self.config.threshold;
        let hold = |speed: f64| speed.abs().min(self.config.max_hold_secs);

        // Palm tipped down flies forward
        match classify_threshold(forward_speed, threshold) {
            Direction::Negative => hold_key(ctx, Key::Up, hold(forward_speed)),
            Direction::Positive => hold_key(ctx, Key::Down, hold(forward_speed)),
            Direction::Neutral => {}
        }

        // Positive roll strafes left
        match classify_threshold(strafe_speed, threshold) {
            Direction::Positive => hold_key(ctx, Key::Left, hold(strafe_speed)),
            Direction::Negative => hold_key(ctx, Key::Right, hold(strafe_speed)),
            Direction::Neutral => {}
        }

        if classify_threshold(turn_speed, threshold) != Direction::Neutral {
            let dx = (self.config.turn_gain_px * turn_speed).round() as i32;
            drag_turn(ctx, dx);
        }
    }
}

impl Behavior for HandTiltBehavior {
    fn name(&self) -> &str {
        HAND_TILT
    }

    fn execute(&mut self, frame: &Frame, ctx: &mut Context<'_>) {
        let Some(hand) = frame.first_hand() else {
            if !self.auto_navigate {
                self.auto_navigate = true;
                navigate_to(ctx, &self.config.destination, self.pause_secs);
            }
            return;
        };

        self.auto_navigate = false;
        self.recenter_pointer(ctx);

        let zoom = self.config.zoom.evaluate(hand.palm_position.y);
        ctx.executor.mouse_wheel(zoom);

        self.control_movement(hand, ctx);
    }
}
