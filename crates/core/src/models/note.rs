use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Display format for note timestamps (minute precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Suffix shown after the timestamp of a note that has been edited.
pub const EDITED_MARKER: &str = " (edited)";

/// Stable identifier of a note within a session.
///
/// Assigned from a monotonically increasing counter when the note is
/// created and never reused, so deleting a note never changes the id of
/// any other note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NoteId(pub u64);

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A free-text investment note, owned by exactly one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,

    /// Never empty
    pub title: String,

    /// Never empty
    pub content: String,

    /// When the note was first created. Preserved across edits.
    pub created_at: DateTime<Local>,

    /// Set once the note has been saved from an edit.
    #[serde(default)]
    pub edited: bool,

    /// Tickers the note refers to. Order is kept; duplicates are not removed.
    #[serde(default)]
    pub related_symbols: Vec<String>,
}

impl Note {
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        related_symbols: Vec<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            created_at: Local::now(),
            edited: false,
            related_symbols,
        }
    }

    /// Timestamp as shown in the note header, e.g. `2025-01-15 09:30 (edited)`.
    pub fn display_timestamp(&self) -> String {
        let stamp = self.created_at.format(TIMESTAMP_FORMAT).to_string();
        if self.edited {
            format!("{stamp}{EDITED_MARKER}")
        } else {
            stamp
        }
    }

    /// Working copy of the editable fields.
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            related_symbols: self.related_symbols.clone(),
        }
    }
}

/// Editable copy of a note's fields, held while the note is in edit mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub related_symbols: Vec<String>,
}
