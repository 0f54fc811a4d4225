//! Input adaptation layer
//!
//! Converts raw text-edit operations into a structured, replayable event
//! stream: the [`InputAdapter`] owns the authoritative content and cursor,
//! keeps a bounded event history with dual-stack linear undo/redo, and
//! derives lightweight editing-behavior signals (typing velocity, edit
//! intensity, diffs, suggestions).

mod adapter;
mod context;
mod diff;
mod event;

pub use adapter::{AdapterConfig, InputAdapter};
pub use context::{AdaptationContext, SuggestionInput, SuggestionProvider};
pub use diff::line_diff;
pub use event::{EventKind, InputEvent};
