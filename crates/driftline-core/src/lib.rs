//! Driftline Core - real-time editing-trajectory tracking
//!
//! Driftline watches a creative or coding session and tells you which way it
//! is heading. Two components, consumed in order:
//!
//! 1. **Input Adapter** (`input`): converts raw text-edit operations into a
//!    structured, replayable event stream — authoritative content and cursor,
//!    bounded history, linear undo/redo, and lightweight behavior signals
//!    (typing velocity, edit intensity, diffs, suggestions).
//! 2. **Trajectory Engine** (`trajectory`): ingests semantic observations,
//!    classifies a directional trend per point, aggregates coherent phases
//!    into segments, scores confidence, and predicts near-future states.
//!
//! Data flows one way: edit operations → [`InputAdapter`] → content records →
//! [`TrajectoryEngine::add_point`] → direction/segment/health state,
//! consumable via snapshots and exportable to a JSON artifact.
//!
//! # Quick Start
//!
//! ```
//! use driftline_core::{InputAdapter, TrajectoryEngine};
//!
//! let mut adapter = InputAdapter::new();
//! let mut engine = TrajectoryEngine::new();
//!
//! adapter.process_insert(0, "fn main() {").unwrap();
//! engine.add_point(adapter.content().to_string(), None);
//!
//! adapter.process_insert(11, " println!(\"hi\"); }").unwrap();
//! engine.add_point(adapter.content().to_string(), None);
//!
//! let state = engine.current_state();
//! println!("direction: {}", state.current_direction);
//! ```
//!
//! # Design Principles
//!
//! 1. **Bounded by construction**: every buffer (event history, point window,
//!    undo/redo stacks, segment log) has an explicit cap.
//! 2. **Snapshots, not references**: callers only ever receive owned copies;
//!    internal buffers are never aliased.
//! 3. **Fail-soft plugins**: a broken suggestion provider or analyzer is
//!    logged and skipped, never allowed to corrupt shared state.
//! 4. **Single writer**: both components are synchronous and lock-free;
//!    hosts driving them from multiple threads add their own mutex.

#![deny(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod error;
pub mod input;
pub mod trajectory;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DriftlineError, Result};
pub use input::{
    AdaptationContext, AdapterConfig, EventKind, InputAdapter, InputEvent, SuggestionInput,
    SuggestionProvider,
};
pub use trajectory::{
    DirectionAnalyzer, EngineConfig, EngineState, Prediction, TrajectoryEngine, TrajectoryExport,
    TrajectoryPoint, TrajectorySegment, TrajectorySummary,
};
pub use types::{Direction, Timestamp};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
