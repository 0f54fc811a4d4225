//! Trajectory tracking layer
//!
//! Consumes semantic observations, classifies the direction of change,
//! aggregates coherent phases into segments, scores confidence, and
//! predicts near-future states. See [`TrajectoryEngine`].

mod analyzer;
mod engine;
mod export;
mod point;

pub use analyzer::DirectionAnalyzer;
pub use engine::{EngineConfig, EngineState, Prediction, TrajectoryEngine, TrajectorySummary};
pub use export::{read_artifact, write_artifact, TrajectoryExport};
pub use point::{TrajectoryPoint, TrajectorySegment};
