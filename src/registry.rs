//! Behavior registry
//!
//! Holds named behaviors and forwards each frame to the selected one.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::behavior::{Behavior, Context};
use crate::error::GestureError;
use crate::types::Frame;

#[derive(Default)]
pub struct BehaviorRegistry {
    behaviors: HashMap<String, Box<dyn Behavior>>,
    selected: Option<String>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a behavior under its own name
    pub fn add_behavior(&mut self, behavior: Box<dyn Behavior>) -> Result<(), GestureError> {
        let name = behavior.name().to_string();
        if self.behaviors.contains_key(&name) {
            return Err(GestureError::DuplicateBehavior(name));
        }
        debug!(%name, "registered behavior");
        self.behaviors.insert(name, behavior);
        Ok(())
    }

    pub fn select_behavior(&mut self, name: &str) -> Result<(), GestureError> {
        if !self.behaviors.contains_key(name) {
            return Err(GestureError::BehaviorNotFound(name.to_string()));
        }
        info!(name, "selected behavior");
        self.selected = Some(name.to_string());
        Ok(())
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.behaviors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Run the selected behavior on `frame`. Returns false when nothing is
    /// selected.
    pub fn dispatch(&mut self, frame: &Frame, ctx: &mut Context<'_>) -> bool {
        let Some(name) = self.selected.as_deref() else {
            return false;
        };
        match self.behaviors.get_mut(name) {
            Some(behavior) => {
                behavior.execute(frame, ctx);
                true
            }
            None => false,
        }
    }
}
