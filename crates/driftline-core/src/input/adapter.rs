//! Input adapter - authoritative content plus a replayable, undoable event log

use super::context::{prefix_completions, AdaptationContext, SuggestionInput, SuggestionProvider};
use super::diff::line_diff;
use super::event::{EventKind, InputEvent};
use crate::error::{DriftlineError, Result};
use std::collections::VecDeque;
use std::fmt;

/// How many events feed the adaptation context and typing velocity
const CONTEXT_WINDOW: usize = 10;

/// How many events feed the edit intensity signal
const INTENSITY_WINDOW: usize = 20;

/// Tunables for the input adapter
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Maximum events retained in the history buffer
    pub buffer_size: usize,

    /// Maximum snapshots retained on each of the undo/redo stacks.
    /// Oldest snapshots are dropped past this depth.
    pub max_undo_depth: usize,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            buffer_size: 1000,
            max_undo_depth: 200,
        }
    }
}

/// Authoritative source of current text content plus behavior signals.
///
/// The adapter owns its buffers exclusively: callers only ever receive
/// cloned events and snapshots, never references into internal state.
/// Single logical writer per instance; wrap in a mutex to share across
/// threads.
pub struct InputAdapter {
    config: AdapterConfig,
    content: String,
    cursor: usize,
    history: VecDeque<InputEvent>,
    undo_stack: VecDeque<String>,
    redo_stack: VecDeque<String>,
    providers: Vec<Box<dyn SuggestionProvider>>,
}

impl InputAdapter {
    /// Create an adapter with default tunables
    pub fn new() -> Self {
        Self::with_config(AdapterConfig::default())
    }

    /// Create an adapter with explicit tunables
    pub fn with_config(config: AdapterConfig) -> Self {
        Self {
            config,
            content: String::new(),
            cursor: 0,
            history: VecDeque::new(),
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            providers: Vec::new(),
        }
    }

    /// Splice `text` into the content at `position`.
    ///
    /// Pushes the prior content onto the undo stack and clears the redo
    /// stack (standard linear-undo discipline: any new edit invalidates
    /// redo history). The cursor lands just past the inserted text.
    pub fn process_insert(&mut self, position: usize, text: &str) -> Result<InputEvent> {
        self.check_position(position)?;

        let previous = self.content.clone();
        self.push_undo_snapshot(previous.clone());
        self.redo_stack.clear();

        self.content.insert_str(position, text);
        self.cursor = position + text.len();

        let event = InputEvent::new(
            EventKind::Insert,
            position,
            previous,
            self.content.clone(),
            text.to_string(),
        );
        self.push_history(event.clone());
        Ok(event)
    }

    /// Remove `content[start..end]`. The cursor lands at `start`.
    pub fn process_delete(&mut self, start: usize, end: usize) -> Result<InputEvent> {
        self.check_range(start, end)?;

        let previous = self.content.clone();
        let removed = self.content[start..end].to_string();
        self.push_undo_snapshot(previous.clone());
        self.redo_stack.clear();

        self.content.replace_range(start..end, "");
        self.cursor = start;

        let event = InputEvent::new(
            EventKind::Delete,
            start,
            previous,
            self.content.clone(),
            removed,
        );
        self.push_history(event.clone());
        Ok(event)
    }

    /// Replace `content[start..end]` with `text` as one atomic event.
    ///
    /// The delta records both sides as `"old → new"`.
    pub fn process_replace(&mut self, start: usize, end: usize, text: &str) -> Result<InputEvent> {
        self.check_range(start, end)?;

        let previous = self.content.clone();
        let replaced = self.content[start..end].to_string();
        self.push_undo_snapshot(previous.clone());
        self.redo_stack.clear();

        self.content.replace_range(start..end, text);
        self.cursor = start + text.len();

        let event = InputEvent::new(
            EventKind::Replace,
            start,
            previous,
            self.content.clone(),
            format!("{} → {}", replaced, text),
        );
        self.push_history(event.clone());
        Ok(event)
    }

    /// Restore the previous content snapshot.
    ///
    /// Returns `None` when the undo stack is empty — a no-op, not an error.
    pub fn undo(&mut self) -> Option<InputEvent> {
        let restored = self.undo_stack.pop_back()?;

        self.redo_stack.push_back(self.content.clone());
        if self.redo_stack.len() > self.config.max_undo_depth {
            self.redo_stack.pop_front();
        }

        let previous = std::mem::replace(&mut self.content, restored);
        self.clamp_cursor();

        let event = InputEvent::new(
            EventKind::Undo,
            self.cursor,
            previous.clone(),
            self.content.clone(),
            format!(
                "{} chars → {} chars",
                previous.chars().count(),
                self.content.chars().count()
            ),
        );
        self.push_history(event.clone());
        Some(event)
    }

    /// Re-apply the most recently undone edit.
    ///
    /// Returns `None` when the redo stack is empty.
    pub fn redo(&mut self) -> Option<InputEvent> {
        let restored = self.redo_stack.pop_back()?;

        self.undo_stack.push_back(self.content.clone());
        if self.undo_stack.len() > self.config.max_undo_depth {
            self.undo_stack.pop_front();
        }

        let previous = std::mem::replace(&mut self.content, restored);
        self.clamp_cursor();

        let event = InputEvent::new(
            EventKind::Redo,
            self.cursor,
            previous.clone(),
            self.content.clone(),
            format!(
                "{} chars → {} chars",
                previous.chars().count(),
                self.content.chars().count()
            ),
        );
        self.push_history(event.clone());
        Some(event)
    }

    /// Register a suggestion strategy. Providers run in registration order.
    pub fn register_suggestion_provider(&mut self, provider: Box<dyn SuggestionProvider>) {
        self.providers.push(provider);
    }

    /// Build the adaptation context from the last 10 events.
    ///
    /// Every registered provider runs and their outputs are concatenated; a
    /// failing provider is logged at `warn` and skipped so one bad plugin
    /// cannot break adaptation. If no provider yields anything, the built-in
    /// prefix-completion fallback over the trailing word applies.
    pub fn adaptation_context(&self) -> AdaptationContext {
        let recent_events: Vec<InputEvent> = self
            .history
            .iter()
            .rev()
            .take(CONTEXT_WINDOW)
            .rev()
            .cloned()
            .collect();

        let input = SuggestionInput {
            content: &self.content,
            cursor: self.cursor,
            recent_events: &recent_events,
        };

        let mut suggestions = Vec::new();
        for (index, provider) in self.providers.iter().enumerate() {
            match provider.suggest(&input) {
                Ok(items) => suggestions.extend(items),
                Err(error) => {
                    tracing::warn!(provider = index, %error, "suggestion provider failed");
                }
            }
        }

        if suggestions.is_empty() {
            suggestions = prefix_completions(&self.content);
        }

        let confidence = (recent_events.len() as f64 / CONTEXT_WINDOW as f64).min(1.0);

        AdaptationContext {
            current_content: self.content.clone(),
            cursor_position: self.cursor,
            recent_events,
            suggestions,
            confidence,
        }
    }

    /// Unified-style line diff between the current content and `other`
    pub fn compute_diff(&self, other: &str) -> Vec<String> {
        line_diff(&self.content, other)
    }

    /// Characters inserted per second over the last 10 events.
    ///
    /// Returns 0.0 with fewer than 2 events or a zero time span.
    pub fn typing_velocity(&self) -> f64 {
        let recent: Vec<&InputEvent> = self
            .history
            .iter()
            .rev()
            .take(CONTEXT_WINDOW)
            .rev()
            .collect();
        if recent.len() < 2 {
            return 0.0;
        }

        let span = recent[recent.len() - 1].timestamp - recent[0].timestamp;
        let seconds = span.num_milliseconds() as f64 / 1000.0;
        if seconds <= 0.0 {
            return 0.0;
        }

        let chars: usize = recent.iter().map(|e| e.chars_inserted()).sum();
        chars as f64 / seconds
    }

    /// Events per second over the last 20 events.
    ///
    /// Returns 0.0 with fewer than 2 events or a zero time span.
    pub fn edit_intensity(&self) -> f64 {
        let recent: Vec<&InputEvent> = self
            .history
            .iter()
            .rev()
            .take(INTENSITY_WINDOW)
            .rev()
            .collect();
        if recent.len() < 2 {
            return 0.0;
        }

        let span = recent[recent.len() - 1].timestamp - recent[0].timestamp;
        let seconds = span.num_milliseconds() as f64 / 1000.0;
        if seconds <= 0.0 {
            return 0.0;
        }

        recent.len() as f64 / seconds
    }

    /// Clone of the last `count` events, oldest first
    pub fn recent_activity(&self, count: usize) -> Vec<InputEvent> {
        self.history.iter().rev().take(count).rev().cloned().collect()
    }

    /// Current authoritative content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Current cursor position (byte offset)
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Number of events currently retained in history
    pub fn event_count(&self) -> usize {
        self.history.len()
    }

    /// Current undo stack depth
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Current redo stack depth
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Reset content, cursor, history and both stacks
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.history.clear();
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position > self.content.len() {
            return Err(DriftlineError::OutOfBounds {
                index: position,
                len: self.content.len(),
            });
        }
        if !self.content.is_char_boundary(position) {
            return Err(DriftlineError::CharBoundary { index: position });
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end || end > self.content.len() {
            return Err(DriftlineError::InvalidRange {
                start,
                end,
                len: self.content.len(),
            });
        }
        if !self.content.is_char_boundary(start) {
            return Err(DriftlineError::CharBoundary { index: start });
        }
        if !self.content.is_char_boundary(end) {
            return Err(DriftlineError::CharBoundary { index: end });
        }
        Ok(())
    }

    fn push_history(&mut self, event: InputEvent) {
        self.history.push_back(event);
        while self.history.len() > self.config.buffer_size {
            self.history.pop_front();
        }
    }

    fn push_undo_snapshot(&mut self, snapshot: String) {
        self.undo_stack.push_back(snapshot);
        if self.undo_stack.len() > self.config.max_undo_depth {
            self.undo_stack.pop_front();
        }
    }

    fn clamp_cursor(&mut self) {
        if self.cursor > self.content.len() || !self.content.is_char_boundary(self.cursor) {
            self.cursor = self.content.len();
        }
    }
}

impl Default for InputAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InputAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputAdapter")
            .field("content_len", &self.content.len())
            .field("cursor", &self.cursor)
            .field("history_len", &self.history.len())
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("providers", &self.providers.len())
            .finish()
    }
}
