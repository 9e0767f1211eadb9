//! Controller orchestration
//!
//! This module provides the public entry point for Gesture Globe. It owns
//! the registry together with the executor, clock and foreground gate, and
//! feeds every frame through them:
//!
//! 1. ForegroundGate - skip frames while the target app is in the background
//! 2. BehaviorRegistry - forward to the selected behavior
//! 3. Behavior - shape, classify and emit actions on the executor

use tracing::trace;

use crate::behavior::slide::HAND_SLIDE;
use crate::behavior::{Behavior, Context, HandSlideBehavior, HandTiltBehavior};
use crate::clock::Clock;
use crate::config::ControllerConfig;
use crate::error::GestureError;
use crate::executor::{ActionExecutor, ForegroundGate};
use crate::registry::BehaviorRegistry;
use crate::types::{Frame, ScreenGeometry};

/// Stateful controller driven by the frame source, one frame at a time.
///
/// Frames must be delivered sequentially; `on_frame` is not reentrant.
pub struct GestureController<E, C, G> {
    registry: BehaviorRegistry,
    executor: E,
    clock: C,
    gate: G,
    screen: ScreenGeometry,
}

impl<E, C, G> GestureController<E, C, G>
where
    E: ActionExecutor,
    C: Clock,
    G: ForegroundGate,
{
    /// Create a controller with an empty registry
    pub fn new(executor: E, clock: C, gate: G, screen: ScreenGeometry) -> Self {
        Self {
            registry: BehaviorRegistry::new(),
            executor,
            clock,
            gate,
            screen,
        }
    }

    /// Create a controller with the tilt and slide behaviors registered and
    /// the slide behavior selected
    pub fn standard(
        config: &ControllerConfig,
        executor: E,
        clock: C,
        gate: G,
    ) -> Result<Self, GestureError> {
        config.validate()?;
        let mut controller = Self::new(executor, clock, gate, config.screen);
        let pause_secs = config.navigation.pause_secs;
        controller.add_behavior(Box::new(HandTiltBehavior::new(
            config.tilt.clone(),
            pause_secs,
        )))?;
        controller.add_behavior(Box::new(HandSlideBehavior::new(
            config.slide.clone(),
            pause_secs,
        )))?;
        controller.select_behavior(HAND_SLIDE)?;
        Ok(controller)
    }

    pub fn add_behavior(&mut self, behavior: Box<dyn Behavior>) -> Result<(), GestureError> {
        self.registry.add_behavior(behavior)
    }

    pub fn select_behavior(&mut self, name: &str) -> Result<(), GestureError> {
        self.registry.select_behavior(name)
    }

    pub fn registry(&self) -> &BehaviorRegistry {
        &self.registry
    }

    /// Handle a frame from the sensor. Returns whether a behavior ran.
    pub fn on_frame(&mut self, frame: &Frame) -> bool {
        if !self.gate.is_target_active() {
            trace!(frame = frame.id, "target app not active, frame skipped");
            return false;
        }
        let mut ctx = Context::new(&mut self.executor, &mut self.clock, self.screen);
        self.registry.dispatch(frame, &mut ctx)
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn gate_mut(&mut self) -> &mut G {
        &mut self.gate
    }

    /// Tear down and hand back the executor
    pub fn into_executor(self) -> E {
        self.executor
    }
}
