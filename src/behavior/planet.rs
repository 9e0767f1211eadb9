//! Planet switching
//!
//! Switching runs a scripted walk through the application's planet menu and
//! then blocks further switches (and, in the slide behavior, all navigation
//! input) until the cooldown has elapsed.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use super::Context;
use crate::config::PlanetMenuLayout;
use crate::types::{MouseButton, Planet};

#[derive(Debug, Clone)]
pub struct PlanetSwitcher {
    current: Planet,
    switching_since: Option<DateTime<Utc>>,
    cooldown: Duration,
    layout: PlanetMenuLayout,
}

impl PlanetSwitcher {
    pub fn new(cooldown: Duration, layout: PlanetMenuLayout) -> Self {
        Self {
            current: Planet::Earth,
            switching_since: None,
            cooldown,
            layout,
        }
    }

    pub fn current(&self) -> Planet {
        self.current
    }

    /// Whether a switch is still inside its cooldown window
    pub fn is_switching(&self) -> bool {
        self.switching_since.is_some()
    }

    /// Expire the cooldown once it has fully elapsed
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        if let Some(since) = self.switching_since {
            if now - since >= self.cooldown {
                debug!("planet switch cooldown elapsed");
                self.switching_since = None;
            }
        }
    }

    /// Switch to `target` unless a switch is cooling down or it is already
    /// shown. Returns whether the menu script ran.
    pub fn request(&mut self, target: Planet, ctx: &mut Context<'_>) -> bool {
        let now = ctx.now();
        self.refresh(now);

        if self.is_switching() {
            debug!(target = target.as_str(), "planet switch ignored during cooldown");
            return false;
        }
        if target == self.current {
            return false;
        }

        info!(
            from = self.current.as_str(),
            to = target.as_str(),
            "switching planet"
        );
        self.switching_since = Some(now);
        self.run_menu_script(target, ctx);
        self.current = target;
        true
    }

    /// Advance to the next body in the Earth → Mars → Moon cycle
    pub fn rotate(&mut self, ctx: &mut Context<'_>) -> bool {
        self.request(self.current.next(), ctx)
    }

    fn run_menu_script(&self, target: Planet, ctx: &mut Context<'_>) {
        let layout = &self.layout;
        let offset = if self.current == Planet::Earth {
            0
        } else {
            layout.off_earth_offset
        };

        let executor = &mut *ctx.executor;
        executor.click_at(layout.menu.0, layout.menu.1, MouseButton::Left);
        executor.click_at(
            layout.planets_entry.0,
            layout.planets_entry.1 - offset,
            MouseButton::Left,
        );
        executor.move_mouse_to(layout.submenu_anchor.0, layout.submenu_anchor.1 - offset);

        match target {
            Planet::Moon => {
                executor.click_at(layout.moon.0, layout.moon.1 - offset, MouseButton::Left)
            }
            Planet::Mars => {
                executor.click_at(layout.mars.0, layout.mars.1 - offset, MouseButton::Left)
            }
            // Earth sits under the submenu anchor
            Planet::Earth => executor.click(MouseButton::Left),
        }

        let (cx, cy) = ctx.screen.center();
        executor.move_mouse_to(cx, cy);
    }
}
