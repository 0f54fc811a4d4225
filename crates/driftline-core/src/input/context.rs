//! Adaptation context and pluggable suggestion strategies
//!
//! The adapter hands callers a snapshot of current content, cursor, recent
//! events and generated suggestions. Suggestions come from registered
//! provider strategies; when none of them produce anything, a built-in
//! prefix-completion heuristic over the trailing word kicks in.

use super::event::InputEvent;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Snapshot handed to callers for UI hinting.
///
/// Derived on demand, never stored: every field is an owned copy, so the
/// caller cannot alias the adapter's internal buffers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationContext {
    /// Current authoritative content
    pub current_content: String,

    /// Current cursor position (byte offset)
    pub cursor_position: usize,

    /// Last 10 events, oldest first
    pub recent_events: Vec<InputEvent>,

    /// Concatenated provider suggestions (or the built-in fallback)
    pub suggestions: Vec<String>,

    /// How much recent signal backs the suggestions (0.0-1.0)
    pub confidence: f64,
}

/// Read-only view handed to suggestion providers.
///
/// Providers see the content and recent events but never the adapter's
/// mutable state.
#[derive(Debug)]
pub struct SuggestionInput<'a> {
    /// Current content
    pub content: &'a str,

    /// Cursor position (byte offset)
    pub cursor: usize,

    /// Recent events, oldest first
    pub recent_events: &'a [InputEvent],
}

/// A pluggable suggestion strategy.
///
/// Providers run in registration order and their outputs are concatenated.
/// A provider returning an error is logged and skipped; one bad plugin
/// cannot break adaptation.
pub trait SuggestionProvider {
    /// Produce suggestions for the given editing state
    fn suggest(&self, input: &SuggestionInput<'_>) -> Result<Vec<String>>;
}

impl<F> SuggestionProvider for F
where
    F: Fn(&SuggestionInput<'_>) -> Result<Vec<String>>,
{
    fn suggest(&self, input: &SuggestionInput<'_>) -> Result<Vec<String>> {
        self(input)
    }
}

/// Maximum suggestions produced by the built-in fallback
const MAX_FALLBACK_SUGGESTIONS: usize = 5;

/// Built-in prefix completion over the trailing word of the content.
///
/// Collects distinct longer words already present in the content that start
/// with the trailing word, most recent occurrences first.
pub fn prefix_completions(content: &str) -> Vec<String> {
    let trailing = match content
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .next_back()
        .filter(|w| !w.is_empty())
    {
        Some(word) => word,
        None => return Vec::new(),
    };

    let mut seen = Vec::new();
    for word in content
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .rev()
    {
        if word.len() > trailing.len()
            && word.starts_with(trailing)
            && !seen.iter().any(|s| s == word)
        {
            seen.push(word.to_string());
            if seen.len() == MAX_FALLBACK_SUGGESTIONS {
                break;
            }
        }
    }
    seen
}
