use serde::{Deserialize, Serialize};

use super::note::NoteId;

/// A change to session state, emitted by every successful mutation.
///
/// The render layer drains these after handling a user action and redraws
/// only the widgets they name instead of the whole page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    FavoriteToggled { symbol: String, is_favorite: bool },
    ChartVisibilityChanged { symbol: String, visible: bool },
    CategoryAdded { name: String },
    CategorySelected { name: String },
    NoteAdded { category: String, id: NoteId },
    NoteDeleted { category: String, id: NoteId },
    EditStarted { category: String, id: NoteId },
    EditSaved { category: String, id: NoteId },
    EditCancelled { category: String, id: NoteId },
}

impl SessionEvent {
    /// The category the event concerns, if it is a notes event.
    pub fn category(&self) -> Option<&str> {
        match self {
            SessionEvent::CategoryAdded { name } | SessionEvent::CategorySelected { name } => {
                Some(name)
            }
            SessionEvent::NoteAdded { category, .. }
            | SessionEvent::NoteDeleted { category, .. }
            | SessionEvent::EditStarted { category, .. }
            | SessionEvent::EditSaved { category, .. }
            | SessionEvent::EditCancelled { category, .. } => Some(category),
            SessionEvent::FavoriteToggled { .. } | SessionEvent::ChartVisibilityChanged { .. } => {
                None
            }
        }
    }

    /// The symbol the event concerns, if it is a toggle event.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            SessionEvent::FavoriteToggled { symbol, .. }
            | SessionEvent::ChartVisibilityChanged { symbol, .. } => Some(symbol),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEvent::FavoriteToggled { symbol, is_favorite } => {
                write!(f, "favorite {symbol} -> {is_favorite}")
            }
            SessionEvent::ChartVisibilityChanged { symbol, visible } => {
                write!(f, "chart {symbol} -> {visible}")
            }
            SessionEvent::CategoryAdded { name } => write!(f, "category added: {name}"),
            SessionEvent::CategorySelected { name } => write!(f, "category selected: {name}"),
            SessionEvent::NoteAdded { category, id } => write!(f, "note {id} added to {category}"),
            SessionEvent::NoteDeleted { category, id } => {
                write!(f, "note {id} deleted from {category}")
            }
            SessionEvent::EditStarted { category, id } => {
                write!(f, "editing note {id} in {category}")
            }
            SessionEvent::EditSaved { category, id } => write!(f, "note {id} in {category} saved"),
            SessionEvent::EditCancelled { category, id } => {
                write!(f, "edit of note {id} in {category} cancelled")
            }
        }
    }
}
