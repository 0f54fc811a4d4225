//! Core types for Driftline
//!
//! This module defines the fundamental types shared by both components:
//! - Direction (closed trend classification)
//! - Timestamps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type alias
pub type Timestamp = DateTime<Utc>;

/// Create a timestamp for the current moment
pub fn now() -> Timestamp {
    Utc::now()
}

/// Coarse trend category describing the shape of recent change.
///
/// This is a closed enumeration: the classification and segmentation logic
/// depends on exhaustive matches, so directions are never free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Content is growing — new material is being added
    Expanding,

    /// Content is shrinking — material is being cut or condensed
    Converging,

    /// Content size oscillates — the session is changing course
    Pivoting,

    /// Content size is steady — refinement without net change
    Stable,

    /// Not enough signal to classify
    Uncertain,
}

impl Direction {
    /// All variants in declaration order. Dominance ties are broken by this
    /// order so classification stays deterministic.
    pub const ALL: [Direction; 5] = [
        Direction::Expanding,
        Direction::Converging,
        Direction::Pivoting,
        Direction::Stable,
        Direction::Uncertain,
    ];

    /// Whether this direction carries a classification signal
    pub fn is_classified(self) -> bool {
        self != Direction::Uncertain
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Expanding => "expanding",
            Direction::Converging => "converging",
            Direction::Pivoting => "pivoting",
            Direction::Stable => "stable",
            Direction::Uncertain => "uncertain",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Expanding.to_string(), "expanding");
        assert_eq!(Direction::Uncertain.to_string(), "uncertain");
    }

    #[test]
    fn test_direction_is_classified() {
        assert!(Direction::Stable.is_classified());
        assert!(!Direction::Uncertain.is_classified());
    }

    #[test]
    fn test_direction_serde_lowercase() {
        let json = serde_json::to_string(&Direction::Pivoting).unwrap();
        assert_eq!(json, "\"pivoting\"");

        let back: Direction = serde_json::from_str("\"converging\"").unwrap();
        assert_eq!(back, Direction::Converging);
    }
}
