//! Edit-script format and replay loop
//!
//! A script is a JSON array of operations, e.g.
//! `[{"op":"insert","position":0,"text":"hi"},{"op":"undo"}]`.
//! Replay drives the adapter and feeds every resulting content snapshot
//! into the engine, the same way a live GUI layer would.

use anyhow::Context;
use driftline_core::{InputAdapter, TrajectoryEngine};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One scripted edit operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum EditOp {
    Insert { position: usize, text: String },
    Delete { start: usize, end: usize },
    Replace { start: usize, end: usize, text: String },
    Undo,
    Redo,
}

/// Load a script from a JSON file
pub fn load(path: &Path) -> anyhow::Result<Vec<EditOp>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing script {}", path.display()))
}

/// Replay a script, feeding each resulting content into the engine.
///
/// Returns the number of operations that changed content; no-op undo/redo
/// on an empty stack are counted separately by the caller via the adapter.
pub fn replay(
    ops: &[EditOp],
    adapter: &mut InputAdapter,
    engine: &mut TrajectoryEngine,
) -> anyhow::Result<usize> {
    let mut applied = 0;
    for (index, op) in ops.iter().enumerate() {
        let event = match op {
            EditOp::Insert { position, text } => Some(
                adapter
                    .process_insert(*position, text)
                    .with_context(|| format!("op {} (insert)", index))?,
            ),
            EditOp::Delete { start, end } => Some(
                adapter
                    .process_delete(*start, *end)
                    .with_context(|| format!("op {} (delete)", index))?,
            ),
            EditOp::Replace { start, end, text } => Some(
                adapter
                    .process_replace(*start, *end, text)
                    .with_context(|| format!("op {} (replace)", index))?,
            ),
            EditOp::Undo => adapter.undo(),
            EditOp::Redo => adapter.redo(),
        };

        match event {
            Some(event) => {
                engine.add_point(
                    adapter.content().to_string(),
                    Some(serde_json::json!({ "kind": event.kind.to_string(), "op": index })),
                );
                applied += 1;
            }
            None => {
                tracing::debug!(op = index, "no-op undo/redo on empty stack");
            }
        }
    }
    Ok(applied)
}

/// The built-in demo script: drafts, pivots, then converges
pub fn demo_script() -> Vec<EditOp> {
    let mut ops = Vec::new();
    let mut len = 0;
    for sentence in [
        "Start with an idea. ",
        "Let it grow into a paragraph. ",
        "Keep layering detail after detail. ",
        "The draft swells well past its outline. ",
        "Every pass adds another clause. ",
        "Momentum carries the text forward. ",
    ] {
        ops.push(EditOp::Insert {
            position: len,
            text: sentence.to_string(),
        });
        len += sentence.len();
    }
    // A pivot: rip out the middle and try a different framing
    ops.push(EditOp::Replace {
        start: 20,
        end: 120,
        text: "Then cut it back hard. ".to_string(),
    });
    // Converge: trim from the end in large bites
    for _ in 0..3 {
        ops.push(EditOp::Delete { start: 20, end: 45 });
    }
    ops.push(EditOp::Undo);
    ops.push(EditOp::Redo);
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_round_trip() {
        let ops = vec![
            EditOp::Insert {
                position: 0,
                text: "hi".to_string(),
            },
            EditOp::Undo,
        ];
        let json = serde_json::to_string(&ops).unwrap();
        let back: Vec<EditOp> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);
        assert!(matches!(back[1], EditOp::Undo));
    }

    #[test]
    fn test_demo_script_replays_cleanly() {
        let mut adapter = InputAdapter::new();
        let mut engine = TrajectoryEngine::new();
        let applied = replay(&demo_script(), &mut adapter, &mut engine).unwrap();

        assert!(applied > 0);
        assert_eq!(engine.point_count(), applied);
    }

    #[test]
    fn test_replay_skips_empty_undo() {
        let mut adapter = InputAdapter::new();
        let mut engine = TrajectoryEngine::new();
        let ops = vec![EditOp::Undo, EditOp::Redo];

        let applied = replay(&ops, &mut adapter, &mut engine).unwrap();
        assert_eq!(applied, 0);
        assert_eq!(engine.point_count(), 0);
    }
}
