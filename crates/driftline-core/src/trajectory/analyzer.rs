//! Pluggable direction classifiers

use super::point::TrajectoryPoint;
use crate::error::Result;
use crate::types::Direction;

/// A custom direction classifier.
///
/// Analyzers run in registration order before the built-in heuristic; the
/// first one returning a non-[`Direction::Uncertain`] value wins. An analyzer
/// returning an error is logged and skipped, same fail-soft discipline as
/// suggestion providers.
pub trait DirectionAnalyzer {
    /// Classify the direction of the given window of points
    fn classify(&self, points: &[TrajectoryPoint]) -> Result<Direction>;
}

impl<F> DirectionAnalyzer for F
where
    F: Fn(&[TrajectoryPoint]) -> Result<Direction>,
{
    fn classify(&self, points: &[TrajectoryPoint]) -> Result<Direction> {
        self(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_analyzer() {
        let analyzer = |points: &[TrajectoryPoint]| {
            if points.is_empty() {
                Ok(Direction::Uncertain)
            } else {
                Ok(Direction::Pivoting)
            }
        };

        assert_eq!(analyzer.classify(&[]).unwrap(), Direction::Uncertain);
    }
}
