//! Action execution boundary
//!
//! Behaviors never touch the operating system directly. They drive an
//! `ActionExecutor` (keyboard, mouse, screen sampling) and are gated by a
//! `ForegroundGate`. Real injection backends live outside this crate; the
//! `RecordingExecutor` here backs tests and dry-run replays.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::{Key, MouseButton, Rgb};

/// Input-injection primitives used by behaviors.
///
/// All calls are fire-and-forget; only the position, color and key-poll
/// queries return values.
pub trait ActionExecutor {
    fn press_key(&mut self, key: Key);
    fn release_key(&mut self, key: Key);
    fn type_text(&mut self, text: &str);
    fn move_mouse_to(&mut self, x: i32, y: i32);
    fn move_mouse_by(&mut self, dx: i32, dy: i32);
    fn mouse_wheel(&mut self, delta: f64);
    fn mouse_down(&mut self, button: MouseButton);
    fn mouse_up(&mut self, button: MouseButton);
    /// Click at the current pointer position
    fn click(&mut self, button: MouseButton);
    fn sample_pixel(&mut self, x: i32, y: i32) -> Rgb;
    fn mouse_position(&mut self) -> (i32, i32);
    fn is_key_pressed(&mut self, key: Key) -> bool;

    /// Press and immediately release
    fn tap_key(&mut self, key: Key) {
        self.press_key(key);
        self.release_key(key);
    }

    fn click_at(&mut self, x: i32, y: i32, button: MouseButton) {
        self.move_mouse_to(x, y);
        self.click(button);
    }
}

/// Decides whether the target application is in the foreground
pub trait ForegroundGate {
    fn is_target_active(&mut self) -> bool;
}

/// Gate with a fixed answer
#[derive(Debug, Clone, Copy)]
pub struct StaticGate(pub bool);

impl ForegroundGate for StaticGate {
    fn is_target_active(&mut self) -> bool {
        self.0
    }
}

impl<F: FnMut() -> bool> ForegroundGate for F {
    fn is_target_active(&mut self) -> bool {
        self()
    }
}

/// Title of the application the controller drives
pub const DEFAULT_TARGET_TITLE: &str = "Google Earth Pro";

/// Gate that matches the foreground window title against a substring
pub struct TitleGate<F> {
    needle: String,
    title_provider: F,
}

impl<F: FnMut() -> Option<String>> TitleGate<F> {
    pub fn new(needle: impl Into<String>, title_provider: F) -> Self {
        Self {
            needle: needle.into(),
            title_provider,
        }
    }
}

impl<F: FnMut() -> Option<String>> ForegroundGate for TitleGate<F> {
    fn is_target_active(&mut self) -> bool {
        (self.title_provider)()
            .map(|title| title.contains(&self.needle))
            .unwrap_or(false)
    }
}

/// One executed side effect, as captured by `RecordingExecutor`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    KeyDown { key: Key },
    KeyUp { key: Key },
    TypeText { text: String },
    MoveTo { x: i32, y: i32 },
    MoveBy { dx: i32, dy: i32 },
    Wheel { delta: f64 },
    MouseDown { button: MouseButton },
    MouseUp { button: MouseButton },
    Click { button: MouseButton },
}

/// Executor that records actions instead of injecting them.
///
/// Pointer position follows recorded moves. Pixel colors and pressed keys are
/// scripted by the caller.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    actions: Vec<Action>,
    pointer: (i32, i32),
    pixels: HashMap<(i32, i32), Rgb>,
    pressed: HashSet<Key>,
    queries: usize,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pointer(x: i32, y: i32) -> Self {
        Self {
            pointer: (x, y),
            ..Default::default()
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Remove and return everything recorded so far
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    /// Number of calls of any kind, queries included
    pub fn call_count(&self) -> usize {
        self.actions.len() + self.queries
    }

    pub fn set_pointer(&mut self, x: i32, y: i32) {
        self.pointer = (x, y);
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        self.pixels.insert((x, y), color);
    }

    pub fn clear_pixel(&mut self, x: i32, y: i32) {
        self.pixels.remove(&(x, y));
    }

    /// Simulate a physical key being held down by the user
    pub fn hold_user_key(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release_user_key(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    fn record(&mut self, action: Action) {
        trace!(?action, "recorded action");
        self.actions.push(action);
    }
}

impl ActionExecutor for RecordingExecutor {
    fn press_key(&mut self, key: Key) {
        self.record(Action::KeyDown { key });
    }

    fn release_key(&mut self, key: Key) {
        self.record(Action::KeyUp { key });
    }

    fn type_text(&mut self, text: &str) {
        self.record(Action::TypeText {
            text: text.to_string(),
        });
    }

    fn move_mouse_to(&mut self, x: i32, y: i32) {
        self.pointer = (x, y);
        self.record(Action::MoveTo { x, y });
    }

    fn move_mouse_by(&mut self, dx: i32, dy: i32) {
        self.pointer = (
            self.pointer.0.saturating_add(dx),
            self.pointer.1.saturating_add(dy),
        );
        self.record(Action::MoveBy { dx, dy });
    }

    fn mouse_wheel(&mut self, delta: f64) {
        self.record(Action::Wheel { delta });
    }

    fn mouse_down(&mut self, button: MouseButton) {
        self.record(Action::MouseDown { button });
    }

    fn mouse_up(&mut self, button: MouseButton) {
        self.record(Action::MouseUp { button });
    }

    fn click(&mut self, button: MouseButton) {
        self.record(Action::Click { button });
    }

    fn sample_pixel(&mut self, x: i32, y: i32) -> Rgb {
        self.queries += 1;
        self.pixels.get(&(x, y)).copied().unwrap_or_default()
    }

    fn mouse_position(&mut self) -> (i32, i32) {
        self.queries += 1;
        self.pointer
    }

    fn is_key_pressed(&mut self, key: Key) -> bool {
        self.queries += 1;
        self.pressed.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recording_tracks_pointer() {
        let mut executor = RecordingExecutor::with_pointer(100, 100);
        executor.move_mouse_by(-20, 5);
        assert_eq!(executor.mouse_position(), (80, 105));

        executor.click_at(10, 20, MouseButton::Left);
        assert_eq!(executor.mouse_position(), (10, 20));
        assert_eq!(
            executor.actions(),
            &[
                Action::MoveBy { dx: -20, dy: 5 },
                Action::MoveTo { x: 10, y: 20 },
                Action::Click {
                    button: MouseButton::Left
                },
            ]
        );
    }

    #[test]
    fn test_tap_key_is_press_then_release() {
        let mut executor = RecordingExecutor::new();
        executor.tap_key(Key::Escape);
        assert_eq!(
            executor.take_actions(),
            vec![
                Action::KeyDown { key: Key::Escape },
                Action::KeyUp { key: Key::Escape },
            ]
        );
        assert!(executor.actions().is_empty());
    }

    #[test]
    fn test_scripted_queries() {
        let mut executor = RecordingExecutor::new();
        executor.set_pixel(5, 5, Rgb(1, 2, 3));
        executor.hold_user_key(Key::Char('m'));

        assert_eq!(executor.sample_pixel(5, 5), Rgb(1, 2, 3));
        assert_eq!(executor.sample_pixel(6, 6), Rgb(0, 0, 0));
        assert!(executor.is_key_pressed(Key::Char('m')));
        assert!(!executor.is_key_pressed(Key::Char('l')));
        assert_eq!(executor.call_count(), 4);
    }

    #[test]
    fn test_action_serialization() {
        let json = serde_json::to_string(&Action::KeyDown { key: Key::Left }).unwrap();
        assert_eq!(json, r#"{"action":"key_down","key":"left"}"#);
    }

    #[test]
    fn test_gates() {
        assert!(StaticGate(true).is_target_active());
        assert!(!StaticGate(false).is_target_active());

        let mut closure_gate = || false;
        assert!(!closure_gate.is_target_active());

        let mut title_gate =
            TitleGate::new(DEFAULT_TARGET_TITLE, || Some("Google Earth Pro - Mars".to_string()));
        assert!(title_gate.is_target_active());

        let mut other = TitleGate::new(DEFAULT_TARGET_TITLE, || Some("Terminal".to_string()));
        assert!(!other.is_target_active());

        let mut none = TitleGate::new(DEFAULT_TARGET_TITLE, || None);
        assert!(!none.is_target_active());
    }
}
