use thiserror::Error;

use crate::models::note::NoteId;

/// Unified error type for the entire stock-dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
///
/// All variants are recoverable: the caller surfaces them inline next to
/// the widget that triggered the action and keeps rendering.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Categories ──────────────────────────────────────────────────
    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Validation error for category names (blank after trimming),
    /// the category counterpart of `InvalidNote`.
    #[error("Invalid category name: {0}")]
    InvalidCategory(String),

    // ── Notes ───────────────────────────────────────────────────────
    #[error("Invalid note: {0}")]
    InvalidNote(String),

    #[error("Note index {index} out of range for category '{category}' ({len} notes)")]
    IndexOutOfRange {
        category: String,
        index: usize,
        len: usize,
    },

    #[error("Note {id} not found in category '{category}'")]
    NoteNotFound { category: String, id: NoteId },

    #[error("Note {id} in category '{category}' is not being edited")]
    NotEditing { category: String, id: NoteId },

    // ── External data ───────────────────────────────────────────────
    #[error("Chart data unavailable for {symbol}: {message}")]
    DataUnavailable { symbol: String, message: String },

    #[error("News feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// `true` for failures of the external chart/news adapters.
    ///
    /// Render layers show these as a warning in place of the chart or feed;
    /// everything else is a rejected user action shown next to the form.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            CoreError::DataUnavailable { .. }
                | CoreError::FeedUnavailable(_)
                | CoreError::Api { .. }
                | CoreError::Network(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        CoreError::Network(redact_query(&e.to_string()))
    }
}

/// Strip the query string from any URL in an error message.
/// Both news and chart endpoints carry the API key as a query parameter.
pub(crate) fn redact_query(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}
