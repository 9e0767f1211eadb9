//! Street-view detection and exit
//!
//! The application offers no event for entering street view, so the guard
//! polls a single pixel where the exit button is drawn.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use super::Context;
use crate::config::StreetViewProbe;
use crate::types::Key;

#[derive(Debug, Clone)]
pub struct StreetViewGuard {
    probe: StreetViewProbe,
    window: Duration,
    exiting_since: Option<DateTime<Utc>>,
}

impl StreetViewGuard {
    pub fn new(probe: StreetViewProbe, window: Duration) -> Self {
        Self {
            probe,
            window,
            exiting_since: None,
        }
    }

    /// Whether an exit is in progress and input is suppressed
    pub fn is_exiting(&self) -> bool {
        self.exiting_since.is_some()
    }

    pub fn refresh(&mut self, now: DateTime<Utc>) {
        if let Some(since) = self.exiting_since {
            if now - since >= self.window {
                debug!("street view suppression window elapsed");
                self.exiting_since = None;
            }
        }
    }

    /// Sample the probe pixel and leave street view when it matches.
    /// Returns whether an exit was triggered.
    pub fn check(&mut self, ctx: &mut Context<'_>) -> bool {
        if self.is_exiting() {
            return false;
        }
        let color = ctx.executor.sample_pixel(self.probe.x, self.probe.y);
        if color != self.probe.color {
            return false;
        }

        info!("street view detected, exiting");
        ctx.executor.tap_key(Key::Escape);
        self.exiting_since = Some(ctx.now());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::executor::{Action, RecordingExecutor};
    use crate::types::{Rgb, ScreenGeometry};

    #[test]
    fn test_exit_on_matching_pixel() {
        let probe = StreetViewProbe::default();
        let mut guard = StreetViewGuard::new(probe, Duration::seconds(30));
        let mut executor = RecordingExecutor::new();
        let mut clock = ManualClock::default();

        {
            let mut ctx = Context::new(&mut executor, &mut clock, ScreenGeometry::default());
            assert!(!guard.check(&mut ctx));
        }
        assert!(executor.actions().is_empty());

        executor.set_pixel(probe.x, probe.y, Rgb(248, 248, 248));
        {
            let mut ctx = Context::new(&mut executor, &mut clock, ScreenGeometry::default());
            assert!(guard.check(&mut ctx));
            // Already exiting, no second escape
            assert!(!guard.check(&mut ctx));
        }
        assert_eq!(
            executor.actions(),
            &[
                Action::KeyDown { key: Key::Escape },
                Action::KeyUp { key: Key::Escape },
            ]
        );
        assert!(guard.is_exiting());

        clock.advance_secs(29);
        guard.refresh(clock.now());
        assert!(guard.is_exiting());

        clock.advance_secs(1);
        guard.refresh(clock.now());
        assert!(!guard.is_exiting());
    }
}
