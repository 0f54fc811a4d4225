//! Durable JSON artifact for trajectories
//!
//! The export file is the only on-disk format the core defines:
//! `{export_time, summary, all_points, all_segments}`.

use super::engine::TrajectorySummary;
use super::point::{TrajectoryPoint, TrajectorySegment};
use crate::error::{DriftlineError, Result};
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The persisted trajectory artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryExport {
    /// When the export was taken
    pub export_time: Timestamp,

    /// Summary snapshot at export time
    pub summary: TrajectorySummary,

    /// Every point in the window at export time, oldest first
    pub all_points: Vec<TrajectoryPoint>,

    /// Every retained segment, oldest first
    pub all_segments: Vec<TrajectorySegment>,
}

/// Write an artifact as pretty JSON. I/O failures surface as
/// [`DriftlineError::Persistence`].
pub fn write_artifact(path: &Path, artifact: &TrajectoryExport) -> Result<()> {
    let json = serde_json::to_string_pretty(artifact)?;
    std::fs::write(path, json).map_err(|source| DriftlineError::Persistence {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a previously exported artifact back
pub fn read_artifact(path: &Path) -> Result<TrajectoryExport> {
    let content =
        std::fs::read_to_string(path).map_err(|source| DriftlineError::Persistence {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(serde_json::from_str(&content)?)
}
