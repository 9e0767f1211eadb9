//! Error types for Gesture Globe

use thiserror::Error;

/// Errors raised while assembling or feeding the gesture controller.
///
/// Per-frame processing never fails; these are setup and input errors.
#[derive(Debug, Error)]
pub enum GestureError {
    #[error("Behavior with name '{0}' already exists")]
    DuplicateBehavior(String),

    #[error("Behavior with name '{0}' does not exist")]
    BehaviorNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse frame input: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
