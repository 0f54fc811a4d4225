//! Trajectory observations and derived segments

use crate::types::{Direction, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum characters kept in a cause-effect preview
const PREVIEW_LEN: usize = 40;

/// One observation fed to the engine, immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Unique identifier
    pub id: Uuid,

    /// When the observation was recorded
    pub timestamp: Timestamp,

    /// The observed content
    pub content: String,

    /// Caller-supplied context, opaque to the engine
    pub metadata: serde_json::Value,

    /// Classified direction at the time of this observation
    pub direction: Direction,

    /// Consistency-based confidence (0.0-1.0)
    pub confidence: f64,

    /// Truncated previews of up to the 3 immediately preceding points.
    /// Copied strings, never references into the window: a denormalized
    /// provenance trail, not a live back-link.
    pub cause_effect_chain: Vec<String>,
}

impl TrajectoryPoint {
    /// Content length in characters, the unit the direction heuristic uses
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Truncated preview of this point's content for provenance trails
    pub fn preview(&self) -> String {
        if self.content.chars().count() <= PREVIEW_LEN {
            self.content.clone()
        } else {
            let head: String = self.content.chars().take(PREVIEW_LEN).collect();
            format!("{}…", head)
        }
    }
}

/// A contiguous run of points sharing one dominant direction.
///
/// Segments are appended only when the dominant direction over the trailing
/// threshold of points shifts; they are never mutated after creation and
/// never overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectorySegment {
    /// Unique identifier
    pub id: Uuid,

    /// Timestamp of the first point in the segment
    pub start_time: Timestamp,

    /// Timestamp of the last point in the segment
    pub end_time: Timestamp,

    /// Cloned points covered by this segment
    pub points: Vec<TrajectoryPoint>,

    /// The direction that dominated this run
    pub dominant_direction: Direction,

    /// Mean confidence over the covered points (0.0-1.0)
    pub avg_confidence: f64,
}

impl TrajectorySegment {
    /// Build a segment from a non-empty slice of points
    pub fn from_points(points: &[TrajectoryPoint], dominant_direction: Direction) -> Self {
        debug_assert!(!points.is_empty());
        let avg_confidence =
            points.iter().map(|p| p.confidence).sum::<f64>() / points.len() as f64;

        Self {
            id: Uuid::new_v4(),
            start_time: points[0].timestamp,
            end_time: points[points.len() - 1].timestamp,
            points: points.to_vec(),
            dominant_direction,
            avg_confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::now;

    fn point(content: &str, direction: Direction, confidence: f64) -> TrajectoryPoint {
        TrajectoryPoint {
            id: Uuid::new_v4(),
            timestamp: now(),
            content: content.to_string(),
            metadata: serde_json::Value::Null,
            direction,
            confidence,
            cause_effect_chain: Vec::new(),
        }
    }

    #[test]
    fn test_content_len_counts_chars() {
        let p = point("héllo", Direction::Stable, 0.5);
        assert_eq!(p.content_len(), 5);
    }

    #[test]
    fn test_preview_short_content() {
        let p = point("short", Direction::Stable, 0.5);
        assert_eq!(p.preview(), "short");
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(100);
        let p = point(&long, Direction::Stable, 0.5);
        let preview = p.preview();
        assert_eq!(preview.chars().count(), 41);
        assert!(preview.ends_with('…'));
    }

    #[test]
    fn test_segment_avg_confidence() {
        let points = vec![
            point("a", Direction::Expanding, 0.4),
            point("ab", Direction::Expanding, 0.8),
        ];
        let segment = TrajectorySegment::from_points(&points, Direction::Expanding);

        assert!((segment.avg_confidence - 0.6).abs() < 1e-9);
        assert_eq!(segment.dominant_direction, Direction::Expanding);
        assert_eq!(segment.points.len(), 2);
    }

    #[test]
    fn test_segment_time_span() {
        let early = point("a", Direction::Stable, 0.5);
        let late = point("b", Direction::Stable, 0.5);
        let segment =
            TrajectorySegment::from_points(&[early.clone(), late.clone()], Direction::Stable);

        assert_eq!(segment.start_time, early.timestamp);
        assert_eq!(segment.end_time, late.timestamp);
    }
}
