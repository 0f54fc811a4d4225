//! Property-based invariant tests
//!
//! The laws the core guarantees for arbitrary input sequences: the undo
//! round-trip, bounded buffers, confidence ranges, and deterministic
//! classification.

use driftline_core::{AdapterConfig, EngineConfig, InputAdapter, TrajectoryEngine};
use proptest::prelude::*;

/// An arbitrary valid edit applied at positions derived from current content
#[derive(Debug, Clone)]
enum Edit {
    Insert { at: usize, text: String },
    Delete { from: usize, to: usize },
    Replace { from: usize, to: usize, text: String },
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        ("[a-z ]{1,12}", 0..64usize).prop_map(|(text, at)| Edit::Insert { at, text }),
        (0..64usize, 0..64usize).prop_map(|(a, b)| Edit::Delete {
            from: a.min(b),
            to: a.max(b),
        }),
        (0..64usize, 0..64usize, "[a-z]{0,8}").prop_map(|(a, b, text)| Edit::Replace {
            from: a.min(b),
            to: a.max(b),
            text,
        }),
    ]
}

/// Apply an edit, clamping positions into the current content so the
/// operation is always in bounds (bounds rejection has its own tests)
fn apply(adapter: &mut InputAdapter, edit: &Edit) {
    let len = adapter.content().len();
    match edit {
        Edit::Insert { at, text } => {
            adapter.process_insert((*at).min(len), text).unwrap();
        }
        Edit::Delete { from, to } => {
            adapter
                .process_delete((*from).min(len), (*to).min(len))
                .unwrap();
        }
        Edit::Replace { from, to, text } => {
            adapter
                .process_replace((*from).min(len), (*to).min(len), text)
                .unwrap();
        }
    }
}

proptest! {
    #[test]
    fn undo_n_times_restores_empty_content(edits in prop::collection::vec(edit_strategy(), 1..20)) {
        let mut adapter = InputAdapter::new();
        for edit in &edits {
            apply(&mut adapter, edit);
        }
        let final_content = adapter.content().to_string();

        for _ in 0..edits.len() {
            prop_assert!(adapter.undo().is_some());
        }
        prop_assert_eq!(adapter.content(), "");
        prop_assert!(adapter.undo().is_none());

        for _ in 0..edits.len() {
            prop_assert!(adapter.redo().is_some());
        }
        prop_assert_eq!(adapter.content(), final_content.as_str());
    }

    #[test]
    fn history_buffer_never_exceeds_capacity(edits in prop::collection::vec(edit_strategy(), 1..60)) {
        let mut adapter = InputAdapter::with_config(AdapterConfig {
            buffer_size: 16,
            max_undo_depth: 200,
        });
        for edit in &edits {
            apply(&mut adapter, edit);
            prop_assert!(adapter.event_count() <= 16);
        }
    }

    #[test]
    fn context_confidence_always_in_unit_range(edits in prop::collection::vec(edit_strategy(), 0..30)) {
        let mut adapter = InputAdapter::new();
        for edit in &edits {
            apply(&mut adapter, edit);
            let ctx = adapter.adaptation_context();
            prop_assert!((0.0..=1.0).contains(&ctx.confidence));
        }
    }

    #[test]
    fn point_confidence_always_in_unit_range(contents in prop::collection::vec("[a-z ]{0,40}", 1..40)) {
        let mut engine = TrajectoryEngine::new();
        for content in &contents {
            let point = engine.add_point(content.clone(), None);
            prop_assert!((0.0..=1.0).contains(&point.confidence));
        }

        let state = engine.current_state();
        prop_assert!((0.0..=1.0).contains(&state.confidence));
        prop_assert!((0.0..=1.0).contains(&engine.health_score()));
    }

    #[test]
    fn window_is_a_ring_buffer(contents in prop::collection::vec("[a-z]{0,20}", 1..300)) {
        let mut engine = TrajectoryEngine::with_config(EngineConfig {
            window_size: 50,
            ..EngineConfig::default()
        });
        for content in &contents {
            engine.add_point(content.clone(), None);
            prop_assert!(engine.point_count() <= 50);
        }
        prop_assert_eq!(engine.point_count(), contents.len().min(50));
    }

    #[test]
    fn classification_is_deterministic(contents in prop::collection::vec("[a-z ]{0,30}", 2..25)) {
        let mut first = TrajectoryEngine::new();
        let mut second = TrajectoryEngine::new();
        for content in &contents {
            first.add_point(content.clone(), None);
            second.add_point(content.clone(), None);
        }
        prop_assert_eq!(first.current_direction(), second.current_direction());
        prop_assert_eq!(first.segment_count(), second.segment_count());
    }

    #[test]
    fn segment_confidences_in_unit_range(contents in prop::collection::vec("[a-z]{0,60}", 10..60)) {
        let mut engine = TrajectoryEngine::new();
        for content in &contents {
            engine.add_point(content.clone(), None);
        }
        let segments = engine.summary().recent_segments;
        for segment in &segments {
            prop_assert!((0.0..=1.0).contains(&segment.avg_confidence));
            prop_assert!(segment.start_time <= segment.end_time);
        }
        for pair in segments.windows(2) {
            prop_assert!(pair[0].end_time <= pair[1].start_time);
            for point in &pair[1].points {
                prop_assert!(pair[0].points.iter().all(|p| p.id != point.id));
            }
        }
    }
}
