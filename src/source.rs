//! Frame records
//!
//! Frames captured from the sensor can be stored as NDJSON (one frame per
//! line) or as a JSON array and replayed through the controller later.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::error::GestureError;
use crate::types::Frame;

/// Problems found in a single frame record
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FrameValidationError {
    #[error("Hand {hand} has a non-finite palm position")]
    NonFinitePosition { hand: usize },

    #[error("Hand {hand} has a non-finite orientation")]
    NonFiniteOrientation { hand: usize },

    #[error("Timestamp {current} is earlier than previous frame at {previous}")]
    TimestampRegression {
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
}

/// Result of frame validation
#[derive(Debug)]
pub struct ValidationResult {
    pub index: usize,
    pub frame_id: u64,
    pub error: FrameValidationError,
}

pub struct FrameReader;

impl FrameReader {
    /// Parse a JSON string containing an array of frames
    pub fn parse_array(json: &str) -> Result<Vec<Frame>, GestureError> {
        let frames: Vec<Frame> = serde_json::from_str(json)?;
        Ok(frames)
    }

    /// Parse NDJSON (newline-delimited JSON) frames. Blank lines are skipped.
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<Frame>, GestureError> {
        let mut frames = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let frame = serde_json::from_str::<Frame>(trimmed).map_err(|e| {
                GestureError::ParseError(format!("Failed to parse line {}: {}", line_num + 1, e))
            })?;
            frames.push(frame);
        }
        Ok(frames)
    }

    /// Validate a batch of frames, returning only the failures
    pub fn validate_frames(frames: &[Frame]) -> Vec<ValidationResult> {
        let mut results = Vec::new();
        let mut previous: Option<DateTime<Utc>> = None;

        for (index, frame) in frames.iter().enumerate() {
            if let Err(error) = validate_frame(frame, previous) {
                results.push(ValidationResult {
                    index,
                    frame_id: frame.id,
                    error,
                });
            }
            if let Some(ts) = frame.timestamp {
                previous = Some(previous.map_or(ts, |p| p.max(ts)));
            }
        }

        results
    }
}

/// Check one frame against the latest timestamp seen before it
pub fn validate_frame(
    frame: &Frame,
    previous: Option<DateTime<Utc>>,
) -> Result<(), FrameValidationError> {
    for (hand, h) in frame.hands.iter().enumerate() {
        if !h.palm_position.is_finite() {
            return Err(FrameValidationError::NonFinitePosition { hand });
        }
        if !h.orientation.is_finite() {
            return Err(FrameValidationError::NonFiniteOrientation { hand });
        }
    }

    if let (Some(previous), Some(current)) = (previous, frame.timestamp) {
        if current < previous {
            return Err(FrameValidationError::TimestampRegression { previous, current });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Hand;
    use pretty_assertions::assert_eq;

    fn at(ts: &str) -> Frame {
        Frame {
            timestamp: Some(ts.parse::<DateTime<Utc>>().unwrap()),
            ..Frame::empty()
        }
    }

    #[test]
    fn test_parse_ndjson() {
        let ndjson = r#"{"id":1,"timestamp":"2024-01-15T08:00:00Z","hands":[{"palm_position":{"x":150.0,"y":130.0,"z":0.0}}]}

{"id":2,"timestamp":"2024-01-15T08:00:00.050Z","hands":[]}"#;

        let frames = FrameReader::parse_ndjson(ndjson).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].hands[0].palm_position.x, 150.0);
        assert!(!frames[0].hands[0].is_left);
        assert!(frames[1].hands.is_empty());
    }

    #[test]
    fn test_parse_ndjson_reports_line() {
        let ndjson = "{\"id\":1}\n{not json}\n";
        let err = FrameReader::parse_ndjson(ndjson).unwrap_err();
        assert!(matches!(&err, GestureError::ParseError(msg) if msg.contains("line 2")));
    }

    #[test]
    fn test_parse_array() {
        let json = r#"[{"id":7,"hands":[{"palm_position":{"x":0.0,"y":200.0,"z":0.0},"orientation":{"pitch":0.1,"roll":0.0,"yaw":0.0}}]}]"#;
        let frames = FrameReader::parse_array(json).unwrap();
        assert_eq!(frames[0].id, 7);
        assert_eq!(frames[0].hands[0].orientation.pitch, 0.1);
    }

    #[test]
    fn test_non_finite_hand() {
        let frame = Frame::with_hand(Hand::at(f64::NAN, 0.0, 0.0));
        assert_eq!(
            validate_frame(&frame, None),
            Err(FrameValidationError::NonFinitePosition { hand: 0 })
        );
    }

    #[test]
    fn test_timestamp_regression() {
        let frames = vec![
            at("2024-01-15T08:00:01Z"),
            at("2024-01-15T08:00:00Z"),
            at("2024-01-15T08:00:01Z"),
            Frame::empty(),
        ];

        let results = FrameReader::validate_frames(&frames);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 1);
        assert!(matches!(
            results[0].error,
            FrameValidationError::TimestampRegression { .. }
        ));
    }
}
