//! Slide-to-pan behavior
//!
//! Palm position over the sensor holds arrow keys: lateral offset strafes,
//! depth offset moves forward or backward, and palm height zooms. Zoom and
//! direction are sampled on alternating frames.
//!
//! The behavior also owns the planet switcher, the street-view guard, and
//! the idle timers. While a planet switch or street-view exit is in flight
//! every navigation key is released and nothing else is sent.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use super::keys::HeldKeys;
use super::planet::PlanetSwitcher;
use super::script::navigate_to;
use super::street_view::StreetViewGuard;
use super::{Behavior, Context};
use crate::classifier::Direction;
use crate::clock::elapsed_secs;
use crate::config::{SlideConfig, MAX_WINDOW_SECS};
use crate::types::{Frame, Hand, Key, Planet};

pub const HAND_SLIDE: &str = "hand-slide";

const LATERAL_AXIS: [Key; 2] = [Key::Left, Key::Right];
const DEPTH_AXIS: [Key; 2] = [Key::Up, Key::Down];

/// Keys polled for manual planet selection
const PLANET_KEYS: [(char, Planet); 3] = [
    ('m', Planet::Mars),
    ('l', Planet::Moon),
    ('e', Planet::Earth),
];

pub struct HandSlideBehavior {
    config: SlideConfig,
    pause_secs: f64,
    keys: HeldKeys,
    planets: PlanetSwitcher,
    street_view: StreetViewGuard,
    last_hand_seen: Option<DateTime<Utc>>,
    auto_navigate: bool,
    /// Rotation periods already acted on since the hand left
    rotations_seen: i64,
    /// Next hand frame samples zoom instead of direction
    zoom_turn: bool,
}

impl HandSlideBehavior {
    pub fn new(config: SlideConfig, pause_secs: f64) -> Self {
        let planets =
            PlanetSwitcher::new(window(config.planet_cooldown_secs), config.planet_menu);
        let street_view =
            StreetViewGuard::new(config.street_view, window(config.street_view_window_secs));
        Self {
            config,
            pause_secs,
            keys: HeldKeys::new(),
            planets,
            street_view,
            last_hand_seen: None,
            auto_navigate: false,
            rotations_seen: 0,
            zoom_turn: false,
        }
    }

    pub fn current_planet(&self) -> Planet {
        self.planets.current()
    }

    pub fn is_auto_navigating(&self) -> bool {
        self.auto_navigate
    }

    pub fn is_suppressed(&self) -> bool {
        self.planets.is_switching() || self.street_view.is_exiting()
    }

    pub fn held_keys(&self) -> &HeldKeys {
        &self.keys
    }

    /// Request a planet switch, honoring the cooldown
    pub fn switch_planet(&mut self, target: Planet, ctx: &mut Context<'_>) -> bool {
        self.planets.request(target, ctx)
    }

    fn poll_planet_keys(&mut self, ctx: &mut Context<'_>) {
        for (key, planet) in PLANET_KEYS {
            if ctx.executor.is_key_pressed(Key::Char(key)) {
                self.planets.request(planet, ctx);
            }
        }
    }

    fn track_hand(&mut self, hand: &Hand, ctx: &mut Context<'_>) {
        let bands = self.config.bands;
        let position = hand.palm_position;

        if !(bands.within_limits(position.x) && bands.within_limits(position.z)) {
            debug!(x = position.x, z = position.z, "hand outside usable range");
            self.keys.release_all(ctx.executor);
            return;
        }

        if self.zoom_turn {
            let zoom = self.config.zoom.evaluate(position.y);
            ctx.executor.mouse_wheel(zoom);
        } else {
            // The sensor faces the user, so lateral offsets are mirrored
            let lateral = match bands.classify(position.x) {
                Direction::Positive => Some(Key::Left),
                Direction::Negative => Some(Key::Right),
                Direction::Neutral => None,
            };
            let depth = match bands.classify(position.z) {
                Direction::Negative => Some(Key::Up),
                Direction::Positive => Some(Key::Down),
                Direction::Neutral => None,
            };
            self.keys.set_axis(ctx.executor, LATERAL_AXIS, lateral);
            self.keys.set_axis(ctx.executor, DEPTH_AXIS, depth);
        }
        self.zoom_turn = !self.zoom_turn;
    }

    fn handle_idle(&mut self, ctx: &mut Context<'_>) {
        self.keys.release_all(ctx.executor);

        let Some(seen) = self.last_hand_seen else {
            return;
        };
        let elapsed = elapsed_secs(seen, ctx.now());

        if !self.auto_navigate
            && elapsed >= self.config.idle_timeout_secs as f64
            && self.planets.current() == Planet::Earth
        {
            info!(elapsed, "no hand seen, starting idle navigation");
            self.auto_navigate = true;
            navigate_to(ctx, &self.config.destination, self.pause_secs);
            return;
        }

        let periods = (elapsed / self.config.rotation_period_secs as f64).floor() as i64;
        if periods > 0 && periods != self.rotations_seen {
            self.rotations_seen = periods;
            info!(elapsed, "idle rotation to next planet");
            self.planets.rotate(ctx);
        }
    }
}

/// Timer window clamped to the configurable range
fn window(secs: i64) -> Duration {
    Duration::seconds(secs.clamp(0, MAX_WINDOW_SECS))
}

impl Behavior for HandSlideBehavior {
    fn name(&self) -> &str {
        HAND_SLIDE
    }

    fn execute(&mut self, frame: &Frame, ctx: &mut Context<'_>) {
        let now = ctx.now();
        self.street_view.refresh(now);
        self.planets.refresh(now);

        if self.is_suppressed() {
            self.keys.release_all(ctx.executor);
            return;
        }

        self.poll_planet_keys(ctx);

        if self.street_view.check(ctx) {
            self.keys.release_all(ctx.executor);
            return;
        }

        match frame.first_hand() {
            Some(hand) => {
                self.last_hand_seen = Some(now);
                self.auto_navigate = false;
                self.rotations_seen = 0;
                self.track_hand(hand, ctx);
            }
            None => self.handle_idle(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::executor::{Action, RecordingExecutor};
    use crate::types::{Rgb, ScreenGeometry};
    use pretty_assertions::assert_eq;

    struct Rig {
        slide: HandSlideBehavior,
        executor: RecordingExecutor,
        clock: ManualClock,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                slide: HandSlideBehavior::new(SlideConfig::default(), 0.5),
                executor: RecordingExecutor::with_pointer(960, 540),
                clock: ManualClock::default(),
            }
        }

        fn step(&mut self, frame: &Frame) -> Vec<Action> {
            let mut ctx = Context::new(
                &mut self.executor,
                &mut self.clock,
                ScreenGeometry::default(),
            );
            self.slide.execute(frame, &mut ctx);
            self.executor.take_actions()
        }
    }

    fn hand(x: f64, y: f64, z: f64) -> Frame {
        Frame::with_hand(Hand::at(x, y, z))
    }

    fn count<F: Fn(&Action) -> bool>(actions: &[Action], pred: F) -> usize {
        actions.iter().filter(|a| pred(a)).count()
    }

    #[test]
    fn test_direction_frames_alternate_with_zoom() {
        let mut rig = Rig::new();

        let first = rig.step(&hand(150.0, 130.0, 0.0));
        assert_eq!(first, vec![Action::KeyDown { key: Key::Left }]);
        assert!(rig.slide.held_keys().is_held(Key::Left));
        assert!(!rig.slide.held_keys().is_held(Key::Right));

        let second = rig.step(&hand(150.0, 130.0, 0.0));
        assert_eq!(second, vec![Action::Wheel { delta: 0.0 }]);

        let third = rig.step(&hand(150.0, 130.0, 0.0));
        assert!(third.is_empty(), "left already held: {:?}", third);
        assert_eq!(count(&third, |a| matches!(a, Action::Wheel { .. })), 0);
        assert!(rig.slide.held_keys().is_held(Key::Left));
        assert!(!rig.slide.held_keys().is_held(Key::Right));
    }

    #[test]
    fn test_depth_and_lateral_mapping() {
        let mut rig = Rig::new();

        let actions = rig.step(&hand(-100.0, 130.0, -100.0));
        assert_eq!(
            actions,
            vec![
                Action::KeyDown { key: Key::Right },
                Action::KeyDown { key: Key::Up },
            ]
        );

        rig.step(&hand(-100.0, 130.0, -100.0));
        let actions = rig.step(&hand(100.0, 130.0, 100.0));
        assert_eq!(
            actions,
            vec![
                Action::KeyUp { key: Key::Right },
                Action::KeyDown { key: Key::Left },
                Action::KeyUp { key: Key::Up },
                Action::KeyDown { key: Key::Down },
            ]
        );
    }

    #[test]
    fn test_out_of_range_hand_releases_everything() {
        let mut rig = Rig::new();
        rig.step(&hand(100.0, 130.0, 100.0));

        let actions = rig.step(&hand(250.0, 130.0, 0.0));
        assert_eq!(
            actions,
            vec![
                Action::KeyUp { key: Key::Down },
                Action::KeyUp { key: Key::Left },
            ]
        );
        assert!(rig.slide.held_keys().is_empty());
    }

    #[test]
    fn test_zoom_frame_uses_slide_curve() {
        let mut rig = Rig::new();
        rig.step(&hand(0.0, 50.0, 0.0));
        let actions = rig.step(&hand(0.0, 50.0, 0.0));

        let expected = SlideConfig::default().zoom.evaluate(50.0);
        assert_eq!(actions, vec![Action::Wheel { delta: expected }]);
        assert!(expected > 1.4);
    }

    #[test]
    fn test_idle_navigation_once_per_absence() {
        let mut rig = Rig::new();
        rig.step(&hand(0.0, 130.0, 0.0));

        let mut navigations = 0;
        for _ in 0..40 {
            rig.clock.advance_secs(1);
            let actions = rig.step(&Frame::empty());
            navigations += count(&actions, |a| matches!(a, Action::TypeText { .. }));
        }
        assert_eq!(navigations, 1);
        assert!(rig.slide.is_auto_navigating());

        rig.step(&hand(0.0, 130.0, 0.0));
        assert!(!rig.slide.is_auto_navigating());

        for _ in 0..31 {
            rig.clock.advance_secs(1);
            let actions = rig.step(&Frame::empty());
            navigations += count(&actions, |a| matches!(a, Action::TypeText { .. }));
        }
        assert_eq!(navigations, 2);
    }

    #[test]
    fn test_idle_navigation_with_sparse_frames() {
        let mut rig = Rig::new();
        rig.step(&hand(0.0, 130.0, 0.0));

        // Frames never land on exactly 30s
        rig.clock.advance_secs(17);
        rig.step(&Frame::empty());
        rig.clock.advance_secs(17);
        let actions = rig.step(&Frame::empty());

        assert_eq!(
            count(&actions, |a| matches!(a, Action::TypeText { .. })),
            1
        );
    }

    #[test]
    fn test_idle_navigation_requires_earth_and_prior_hand() {
        let mut rig = Rig::new();
        rig.clock.advance_secs(60);
        assert!(rig.step(&Frame::empty()).is_empty());

        rig.executor.hold_user_key(Key::Char('m'));
        rig.step(&hand(0.0, 130.0, 0.0));
        rig.executor.release_user_key(Key::Char('m'));
        assert_eq!(rig.slide.current_planet(), Planet::Mars);

        rig.clock.advance_secs(40);
        let actions = rig.step(&Frame::empty());
        assert_eq!(
            count(&actions, |a| matches!(a, Action::TypeText { .. })),
            0
        );
    }

    #[test]
    fn test_idle_rotation_every_period() {
        let mut rig = Rig::new();
        rig.step(&hand(0.0, 130.0, 0.0));

        rig.clock.advance_secs(30);
        rig.step(&Frame::empty());
        assert!(rig.slide.is_auto_navigating());

        rig.clock.advance_secs(90);
        rig.step(&Frame::empty());
        assert_eq!(rig.slide.current_planet(), Planet::Mars);

        // Same period: no further rotation
        rig.clock.advance_secs(10);
        rig.step(&Frame::empty());
        assert_eq!(rig.slide.current_planet(), Planet::Mars);

        rig.clock.advance_secs(110);
        rig.step(&Frame::empty());
        assert_eq!(rig.slide.current_planet(), Planet::Moon);

        rig.clock.advance_secs(120);
        rig.step(&Frame::empty());
        assert_eq!(rig.slide.current_planet(), Planet::Earth);
    }

    #[test]
    fn test_manual_switch_suppresses_input_for_cooldown() {
        let mut rig = Rig::new();
        rig.executor.hold_user_key(Key::Char('m'));
        let actions = rig.step(&hand(150.0, 130.0, 0.0));
        rig.executor.release_user_key(Key::Char('m'));

        assert_eq!(rig.slide.current_planet(), Planet::Mars);
        assert!(rig.slide.is_suppressed());
        assert!(actions.contains(&Action::KeyDown { key: Key::Left }));

        rig.clock.advance_secs(3);
        rig.executor.hold_user_key(Key::Char('l'));
        let actions = rig.step(&hand(150.0, 130.0, 0.0));
        assert_eq!(actions, vec![Action::KeyUp { key: Key::Left }]);
        assert_eq!(rig.slide.current_planet(), Planet::Mars);

        rig.clock.advance_secs(4);
        rig.step(&hand(150.0, 130.0, 0.0));
        assert_eq!(rig.slide.current_planet(), Planet::Moon);
    }

    #[test]
    fn test_street_view_exit_suppresses_for_window() {
        let mut rig = Rig::new();
        rig.step(&hand(150.0, 130.0, 0.0));

        rig.executor.set_pixel(1893, 37, Rgb(248, 248, 248));
        let actions = rig.step(&hand(150.0, 130.0, 0.0));
        assert_eq!(
            actions,
            vec![
                Action::KeyDown { key: Key::Escape },
                Action::KeyUp { key: Key::Escape },
                Action::KeyUp { key: Key::Left },
            ]
        );
        assert!(rig.slide.is_suppressed());

        rig.executor.clear_pixel(1893, 37);
        rig.clock.advance_secs(29);
        assert!(rig.step(&hand(150.0, 130.0, 0.0)).is_empty());

        rig.clock.advance_secs(1);
        let actions = rig.step(&hand(150.0, 130.0, 0.0));
        assert!(!rig.slide.is_suppressed());
        assert_eq!(actions, vec![Action::Wheel { delta: 0.0 }]);
    }

    #[test]
    fn test_unvalidated_windows_are_clamped() {
        let config = SlideConfig {
            planet_cooldown_secs: i64::MAX,
            street_view_window_secs: i64::MAX,
            ..SlideConfig::default()
        };
        let mut rig = Rig::new();
        rig.slide = HandSlideBehavior::new(config, 0.5);

        rig.executor.hold_user_key(Key::Char('m'));
        rig.step(&hand(0.0, 130.0, 0.0));
        rig.executor.release_user_key(Key::Char('m'));
        assert_eq!(rig.slide.current_planet(), Planet::Mars);

        rig.clock.advance_secs(MAX_WINDOW_SECS - 1);
        rig.step(&hand(0.0, 130.0, 0.0));
        assert!(rig.slide.is_suppressed());

        rig.clock.advance_secs(1);
        rig.step(&hand(0.0, 130.0, 0.0));
        assert!(!rig.slide.is_suppressed());
    }

    #[test]
    fn test_skipped_rotation_periods_rotate_once() {
        let mut rig = Rig::new();
        rig.step(&hand(0.0, 130.0, 0.0));

        // First frame after a long gap only navigates
        rig.clock.advance_secs(250);
        let actions = rig.step(&Frame::empty());
        assert_eq!(count(&actions, |a| matches!(a, Action::TypeText { .. })), 1);
        assert_eq!(rig.slide.current_planet(), Planet::Earth);

        // Two whole periods have passed, but only one rotation fires
        rig.clock.advance_secs(1);
        rig.step(&Frame::empty());
        assert_eq!(rig.slide.current_planet(), Planet::Mars);

        rig.clock.advance_secs(100);
        rig.step(&Frame::empty());
        assert_eq!(rig.slide.current_planet(), Planet::Mars);

        rig.clock.advance_secs(10);
        rig.step(&Frame::empty());
        assert_eq!(rig.slide.current_planet(), Planet::Moon);
    }
}
