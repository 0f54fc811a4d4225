//! Trajectory engine - classifies the shape of a session over time
//!
//! The engine consumes semantic observations ("points"), keeps them in a
//! bounded rolling window, classifies a directional trend per point,
//! aggregates windows into segments when the dominant trend shifts, scores
//! confidence from directional consistency, and predicts near-future states.

use super::analyzer::DirectionAnalyzer;
use super::export::{read_artifact, write_artifact, TrajectoryExport};
use super::point::{TrajectoryPoint, TrajectorySegment};
use crate::error::Result;
use crate::types::{now, Direction, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::path::Path;
use uuid::Uuid;

/// How many trailing points feed the direction heuristic
const TREND_WINDOW: usize = 5;

/// How many trailing points feed the confidence heuristic
const CONSISTENCY_WINDOW: usize = 10;

/// How many trailing points and segments a snapshot carries
const RECENT_WINDOW: usize = 5;

/// How many preceding points a cause-effect chain references
const CHAIN_DEPTH: usize = 3;

/// Minimum points before predictions carry any signal
const PREDICTION_FLOOR: usize = 5;

/// Tunables for the trajectory engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum points retained in the rolling window
    pub window_size: usize,

    /// How many trailing points a segment decision covers
    pub segment_threshold: usize,

    /// Maximum segments retained; oldest dropped past this
    pub max_segments: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_size: 100,
            segment_threshold: 10,
            max_segments: 256,
        }
    }
}

/// Point-in-time snapshot of the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineState {
    /// When the snapshot was taken
    pub timestamp: Timestamp,

    /// Most recently classified direction
    pub current_direction: Direction,

    /// Points currently in the window
    pub total_points: usize,

    /// Segments currently retained
    pub segment_count: usize,

    /// Last 5 points, oldest first (cloned)
    pub recent_points: Vec<TrajectoryPoint>,

    /// Current consistency-based confidence
    pub confidence: f64,
}

/// Aggregate summary of the trajectory so far
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectorySummary {
    /// Points currently in the window
    pub total_points: usize,

    /// Segments currently retained
    pub total_segments: usize,

    /// Most recently classified direction
    pub current_direction: Direction,

    /// Last 5 segments, oldest first (cloned)
    pub recent_segments: Vec<TrajectorySegment>,

    /// Blended confidence/segmentation health score (0.0-1.0)
    pub trajectory_health: f64,
}

/// One predicted near-future state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted direction
    pub direction: Direction,

    /// Estimated probability (0.0-1.0)
    pub probability: f64,

    /// Short label for the predicted state
    pub description: String,
}

/// Classifies and summarizes the "shape" of a sequence of observations.
///
/// Synchronous and single-writer: the engine holds no locks and the only
/// I/O it performs is [`TrajectoryEngine::export`]/[`TrajectoryEngine::import`].
pub struct TrajectoryEngine {
    config: EngineConfig,
    window: VecDeque<TrajectoryPoint>,
    segments: VecDeque<TrajectorySegment>,
    current_direction: Direction,
    analyzers: Vec<Box<dyn DirectionAnalyzer>>,
    /// Points ingested over the engine's lifetime, including evicted ones
    ingested: usize,
    /// Lifetime index one past the last point covered by a segment.
    /// Keeps consecutive segments from re-covering the same points.
    segmented_through: usize,
}

impl TrajectoryEngine {
    /// Create an engine with default tunables
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with explicit tunables
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            window: VecDeque::new(),
            segments: VecDeque::new(),
            current_direction: Direction::Uncertain,
            analyzers: Vec::new(),
            ingested: 0,
            segmented_through: 0,
        }
    }

    /// Register a custom classifier, tried before the built-in heuristic.
    ///
    /// Analyzers run in registration order; the first non-`Uncertain` result
    /// wins. A failing analyzer is logged at `warn` and skipped.
    pub fn register_analyzer(&mut self, analyzer: Box<dyn DirectionAnalyzer>) {
        self.analyzers.push(analyzer);
    }

    /// Ingest one observation.
    ///
    /// Appends to the rolling window (evicting the oldest point past the
    /// window size), classifies the direction, scores confidence, builds the
    /// cause-effect chain, re-evaluates segments and updates the current
    /// direction. Returns a clone of the stored point.
    pub fn add_point(
        &mut self,
        content: impl Into<String>,
        metadata: Option<serde_json::Value>,
    ) -> TrajectoryPoint {
        let cause_effect_chain: Vec<String> = self
            .window
            .iter()
            .rev()
            .take(CHAIN_DEPTH)
            .map(|p| p.preview())
            .collect();

        let point = TrajectoryPoint {
            id: Uuid::new_v4(),
            timestamp: now(),
            content: content.into(),
            metadata: metadata.unwrap_or(serde_json::Value::Null),
            direction: Direction::Uncertain,
            confidence: 0.0,
            cause_effect_chain,
        };

        self.window.push_back(point);
        self.ingested += 1;
        while self.window.len() > self.config.window_size {
            self.window.pop_front();
        }

        let direction = self.classify();
        let last = self.window.len() - 1;
        self.window[last].direction = direction;

        let confidence = self.compute_confidence();
        self.window[last].confidence = confidence;

        self.update_segments();
        self.current_direction = direction;

        self.window[last].clone()
    }

    /// Most recently classified direction
    pub fn current_direction(&self) -> Direction {
        self.current_direction
    }

    /// Points currently in the window
    pub fn point_count(&self) -> usize {
        self.window.len()
    }

    /// Segments currently retained
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Snapshot of the current engine state
    pub fn current_state(&self) -> EngineState {
        EngineState {
            timestamp: now(),
            current_direction: self.current_direction,
            total_points: self.window.len(),
            segment_count: self.segments.len(),
            recent_points: self
                .window
                .iter()
                .rev()
                .take(RECENT_WINDOW)
                .rev()
                .cloned()
                .collect(),
            confidence: self.compute_confidence(),
        }
    }

    /// Aggregate summary of the trajectory so far
    pub fn summary(&self) -> TrajectorySummary {
        TrajectorySummary {
            total_points: self.window.len(),
            total_segments: self.segments.len(),
            current_direction: self.current_direction,
            recent_segments: self
                .segments
                .iter()
                .rev()
                .take(RECENT_WINDOW)
                .rev()
                .cloned()
                .collect(),
            trajectory_health: self.health_score(),
        }
    }

    /// Blended confidence/segmentation health metric.
    ///
    /// `(mean point confidence + segment presence bonus) / 2`, where the
    /// bonus is 1.0 once any segment exists and 0.5 before that.
    pub fn health_score(&self) -> f64 {
        let mean_confidence = if self.window.is_empty() {
            0.0
        } else {
            self.window.iter().map(|p| p.confidence).sum::<f64>() / self.window.len() as f64
        };
        let segment_bonus = if self.segments.is_empty() { 0.5 } else { 1.0 };
        (mean_confidence + segment_bonus) / 2.0
    }

    /// Predict up to `lookahead` near-future states.
    ///
    /// With fewer than 5 points the only honest answer is a single
    /// `insufficient_data` entry at probability 1.0.
    pub fn predict_next_states(&self, lookahead: usize) -> Vec<Prediction> {
        if self.window.len() < PREDICTION_FLOOR {
            return vec![Prediction {
                direction: Direction::Uncertain,
                probability: 1.0,
                description: "insufficient_data".to_string(),
            }];
        }

        let confidence = self.compute_confidence();
        let mut predictions = match self.current_direction {
            Direction::Expanding => vec![
                Prediction {
                    direction: Direction::Expanding,
                    probability: confidence * 0.7,
                    description: "continued expansion".to_string(),
                },
                Prediction {
                    direction: Direction::Stable,
                    probability: (1.0 - confidence) * 0.5,
                    description: "stabilization".to_string(),
                },
            ],
            Direction::Converging => vec![
                Prediction {
                    direction: Direction::Converging,
                    probability: confidence * 0.7,
                    description: "continued convergence".to_string(),
                },
                Prediction {
                    direction: Direction::Pivoting,
                    probability: (1.0 - confidence) * 0.4,
                    description: "pivot".to_string(),
                },
            ],
            other => vec![Prediction {
                direction: other,
                probability: 0.5,
                description: "continuation".to_string(),
            }],
        };

        predictions.truncate(lookahead);
        predictions
    }

    /// Serialize `{export_time, summary, all_points, all_segments}` to a
    /// pretty-JSON file at `path`
    pub fn export(&self, path: &Path) -> Result<()> {
        let artifact = TrajectoryExport {
            export_time: now(),
            summary: self.summary(),
            all_points: self.window.iter().cloned().collect(),
            all_segments: self.segments.iter().cloned().collect(),
        };
        write_artifact(path, &artifact)
    }

    /// Reload a previously exported artifact, warm-starting the session.
    ///
    /// The window and segment caps are re-applied on load, so importing an
    /// artifact produced with larger tunables keeps only the newest entries.
    pub fn import(&mut self, path: &Path) -> Result<()> {
        let artifact = read_artifact(path)?;

        self.window = artifact.all_points.into();
        while self.window.len() > self.config.window_size {
            self.window.pop_front();
        }

        self.segments = artifact.all_segments.into();
        while self.segments.len() > self.config.max_segments {
            self.segments.pop_front();
        }

        self.current_direction = artifact.summary.current_direction;
        // Imported segments already own their points; only fresh points
        // are eligible for the next segment.
        self.ingested = self.window.len();
        self.segmented_through = self.ingested;
        Ok(())
    }

    /// Reset window, segments and current direction
    pub fn clear(&mut self) {
        self.window.clear();
        self.segments.clear();
        self.current_direction = Direction::Uncertain;
        self.ingested = 0;
        self.segmented_through = 0;
    }

    /// Run custom analyzers in order, falling back to the built-in
    /// length-trend heuristic
    fn classify(&self) -> Direction {
        if !self.analyzers.is_empty() {
            let points: Vec<TrajectoryPoint> = self.window.iter().cloned().collect();
            for (index, analyzer) in self.analyzers.iter().enumerate() {
                match analyzer.classify(&points) {
                    Ok(direction) if direction.is_classified() => return direction,
                    Ok(_) => continue,
                    Err(error) => {
                        tracing::warn!(analyzer = index, %error, "direction analyzer failed");
                    }
                }
            }
        }

        self.builtin_direction()
    }

    /// Length-trend heuristic over the last 5 points.
    ///
    /// `trend = last − first`, `spread = max − min`. A trend larger than
    /// half the spread reads as growth (or shrinkage when negative); a
    /// spread above 30% of the mean length without a clear trend reads as a
    /// pivot; everything else is stable.
    fn builtin_direction(&self) -> Direction {
        if self.window.len() < 2 {
            return Direction::Uncertain;
        }

        let lengths: Vec<f64> = self
            .window
            .iter()
            .rev()
            .take(TREND_WINDOW)
            .rev()
            .map(|p| p.content_len() as f64)
            .collect();

        let first = lengths[0];
        let last = lengths[lengths.len() - 1];
        let max = lengths.iter().cloned().fold(f64::MIN, f64::max);
        let min = lengths.iter().cloned().fold(f64::MAX, f64::min);
        let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;

        let trend = last - first;
        let spread = max - min;

        if trend > 0.5 * spread {
            Direction::Expanding
        } else if trend < -0.5 * spread {
            Direction::Converging
        } else if spread > 0.3 * mean {
            Direction::Pivoting
        } else {
            Direction::Stable
        }
    }

    /// Consistency ratio over the last 10 points' classified directions.
    ///
    /// Fewer than 3 points, or no classified direction among the last 10,
    /// floors at 0.3. Otherwise `min(0.95, 0.4 + 0.6 * mode/total)`.
    fn compute_confidence(&self) -> f64 {
        if self.window.len() < 3 {
            return 0.3;
        }

        let classified: Vec<Direction> = self
            .window
            .iter()
            .rev()
            .take(CONSISTENCY_WINDOW)
            .map(|p| p.direction)
            .filter(|d| d.is_classified())
            .collect();

        if classified.is_empty() {
            return 0.3;
        }

        let mode_count = Direction::ALL
            .iter()
            .map(|d| classified.iter().filter(|c| *c == d).count())
            .max()
            .unwrap_or(0);

        let ratio = mode_count as f64 / classified.len() as f64;
        (0.4 + 0.6 * ratio).min(0.95)
    }

    /// Append a segment when the dominant direction over the trailing
    /// `segment_threshold` points differs from the last segment's.
    ///
    /// The decision looks at the full trailing threshold, but the new
    /// segment only covers points past `segmented_through`, so segments
    /// never overlap even when the direction flips again before a full
    /// threshold of fresh points has arrived.
    fn update_segments(&mut self) {
        if self.window.len() < self.config.segment_threshold {
            return;
        }

        let slice: Vec<TrajectoryPoint> = self
            .window
            .iter()
            .rev()
            .take(self.config.segment_threshold)
            .rev()
            .cloned()
            .collect();

        let dominant = dominant_direction(&slice);
        let last_dominant = self.segments.back().map(|s| s.dominant_direction);

        if last_dominant != Some(dominant) {
            let cover_start = (self.ingested - self.config.segment_threshold)
                .max(self.segmented_through);
            // cover_start < ingested: segments close strictly before the
            // point just added, so at least that point is uncovered
            let offset = self.config.segment_threshold - (self.ingested - cover_start);
            self.segments
                .push_back(TrajectorySegment::from_points(&slice[offset..], dominant));
            self.segmented_through = self.ingested;
            while self.segments.len() > self.config.max_segments {
                self.segments.pop_front();
            }
        }
    }
}

/// Mode of the points' directions; ties broken by variant declaration order
fn dominant_direction(points: &[TrajectoryPoint]) -> Direction {
    let mut best = Direction::Uncertain;
    let mut best_count = 0;
    for direction in Direction::ALL {
        let count = points.iter().filter(|p| p.direction == direction).count();
        if count > best_count {
            best = direction;
            best_count = count;
        }
    }
    best
}

impl Default for TrajectoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TrajectoryEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrajectoryEngine")
            .field("points", &self.window.len())
            .field("segments", &self.segments.len())
            .field("current_direction", &self.current_direction)
            .field("analyzers", &self.analyzers.len())
            .finish()
    }
}
