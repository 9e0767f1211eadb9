//! Scripted UI sequences for the globe application

use tracing::info;

use super::Context;
use crate::clock::seconds_f64;
use crate::types::{Key, MouseButton};

/// Search for a destination through the search bar.
///
/// Focuses the bar with `/`, types the destination, submits, then right
/// clicks so arrow keys reach the globe again.
pub fn navigate_to(ctx: &mut Context<'_>, destination: &str, pause_secs: f64) {
    info!(destination, "auto-navigating");
    ctx.executor.tap_key(Key::Slash);
    ctx.clock.sleep(seconds_f64(pause_secs));
    ctx.executor.type_text(destination);
    ctx.clock.sleep(seconds_f64(pause_secs));
    ctx.executor.tap_key(Key::Enter);
    ctx.executor.click(MouseButton::Right);
}

/// Hold a key for `seconds`, blocking the dispatch meanwhile
pub fn hold_key(ctx: &mut Context<'_>, key: Key, seconds: f64) {
    ctx.executor.press_key(key);
    ctx.clock.sleep(seconds_f64(seconds));
    ctx.executor.release_key(key);
}

/// Middle-button drag to turn the camera
pub fn drag_turn(ctx: &mut Context<'_>, dx: i32) {
    ctx.executor.mouse_down(MouseButton::Middle);
    ctx.executor.move_mouse_by(dx, 0);
    ctx.executor.mouse_up(MouseButton::Middle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{elapsed_secs, Clock, ManualClock};
    use crate::executor::{Action, RecordingExecutor};
    use crate::types::ScreenGeometry;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_navigate_to_sequence() {
        let mut executor = RecordingExecutor::new();
        let mut clock = ManualClock::default();
        let start = clock.now();
        {
            let mut ctx = Context::new(&mut executor, &mut clock, ScreenGeometry::default());
            navigate_to(&mut ctx, "Arizona Science Center", 0.5);
        }

        assert_eq!(
            executor.actions(),
            &[
                Action::KeyDown { key: Key::Slash },
                Action::KeyUp { key: Key::Slash },
                Action::TypeText {
                    text: "Arizona Science Center".to_string()
                },
                Action::KeyDown { key: Key::Enter },
                Action::KeyUp { key: Key::Enter },
                Action::Click {
                    button: MouseButton::Right
                },
            ]
        );
        assert_eq!(elapsed_secs(start, clock.now()), 1.0);
    }

    #[test]
    fn test_hold_key_blocks_for_duration() {
        let mut executor = RecordingExecutor::new();
        let mut clock = ManualClock::default();
        let start = clock.now();
        {
            let mut ctx = Context::new(&mut executor, &mut clock, ScreenGeometry::default());
            hold_key(&mut ctx, Key::Up, 0.25);
        }

        assert_eq!(elapsed_secs(start, clock.now()), 0.25);
        assert_eq!(executor.actions().len(), 2);
    }
}
