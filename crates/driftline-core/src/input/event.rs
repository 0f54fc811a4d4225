//! Input events - the replayable record of atomic edit operations

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kind of atomic edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Insert,
    Delete,
    Replace,
    Undo,
    Redo,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::Insert => "insert",
            EventKind::Delete => "delete",
            EventKind::Replace => "replace",
            EventKind::Undo => "undo",
            EventKind::Redo => "redo",
        };
        write!(f, "{}", label)
    }
}

/// One atomic edit, immutable once created.
///
/// Events capture both the content before and after the operation so any
/// point in the session can be reconstructed from the history alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputEvent {
    /// Unique identifier
    pub id: Uuid,

    /// What operation produced this event
    pub kind: EventKind,

    /// When the operation was applied
    pub timestamp: Timestamp,

    /// Byte offset where the edit took effect
    pub position: usize,

    /// Full content after the operation
    pub resulting_content: String,

    /// Full content before the operation
    pub previous_content: String,

    /// Human-readable payload: inserted text, removed text, or "old → new"
    pub delta: String,
}

impl InputEvent {
    /// Create a new event stamped with the current time
    pub fn new(
        kind: EventKind,
        position: usize,
        previous_content: String,
        resulting_content: String,
        delta: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            timestamp: crate::types::now(),
            position,
            resulting_content,
            previous_content,
            delta,
        }
    }

    /// Number of characters this event inserted into the content.
    ///
    /// Inserts contribute their whole delta; replaces contribute the new
    /// text. Deletes, undos and redos insert nothing.
    pub fn chars_inserted(&self) -> usize {
        match self.kind {
            EventKind::Insert => self.delta.chars().count(),
            EventKind::Replace => self
                .delta
                .split_once(" → ")
                .map(|(_, new)| new.chars().count())
                .unwrap_or(0),
            EventKind::Delete | EventKind::Undo | EventKind::Redo => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = InputEvent::new(
            EventKind::Insert,
            0,
            String::new(),
            "hello".to_string(),
            "hello".to_string(),
        );

        assert_eq!(event.kind, EventKind::Insert);
        assert_eq!(event.resulting_content, "hello");
        assert!(event.previous_content.is_empty());
    }

    #[test]
    fn test_chars_inserted_insert() {
        let event = InputEvent::new(
            EventKind::Insert,
            0,
            String::new(),
            "héllo".to_string(),
            "héllo".to_string(),
        );
        assert_eq!(event.chars_inserted(), 5);
    }

    #[test]
    fn test_chars_inserted_replace() {
        let event = InputEvent::new(
            EventKind::Replace,
            0,
            "old".to_string(),
            "new!".to_string(),
            "old → new!".to_string(),
        );
        assert_eq!(event.chars_inserted(), 4);
    }

    #[test]
    fn test_chars_inserted_delete() {
        let event = InputEvent::new(
            EventKind::Delete,
            0,
            "abc".to_string(),
            "a".to_string(),
            "bc".to_string(),
        );
        assert_eq!(event.chars_inserted(), 0);
    }

    #[test]
    fn test_event_kind_serde() {
        let json = serde_json::to_string(&EventKind::Replace).unwrap();
        assert_eq!(json, "\"replace\"");
    }
}
