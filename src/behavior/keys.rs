//! Held navigation keys
//!
//! Tracks which arrow keys are currently down so that presses and releases
//! are only sent on transitions.

use std::collections::HashSet;

use tracing::debug;

use crate::executor::ActionExecutor;
use crate::types::Key;

#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Drive one axis to the demanded state.
    ///
    /// `axis` holds the two opposing keys; `demanded` is the key to hold, or
    /// `None` to release both. The opposite key is released before the
    /// demanded key is pressed.
    pub fn set_axis(
        &mut self,
        executor: &mut dyn ActionExecutor,
        axis: [Key; 2],
        demanded: Option<Key>,
    ) {
        for key in axis {
            if Some(key) != demanded && self.held.remove(&key) {
                executor.release_key(key);
            }
        }
        if let Some(key) = demanded {
            if self.held.insert(key) {
                debug!(?key, "holding navigation key");
                executor.press_key(key);
            }
        }
    }

    pub fn release_all(&mut self, executor: &mut dyn ActionExecutor) {
        for key in Key::NAVIGATION {
            if self.held.remove(&key) {
                executor.release_key(key);
            }
        }
    }
}
