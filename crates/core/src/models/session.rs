use serde::Serialize;
use std::collections::HashMap;

use super::note::{Note, NoteDraft, NoteId};

/// Categories every session starts with, in display order.
pub const DEFAULT_CATEGORIES: [&str; 4] =
    ["General", "Stock Analysis", "Market Trends", "Investment Ideas"];

/// The category selected when a session starts.
pub const DEFAULT_CATEGORY: &str = DEFAULT_CATEGORIES[0];

/// Key of an in-progress edit: (category, note id).
pub type DraftKey = (String, NoteId);

/// All mutable state of one user session.
///
/// Plain data: the toggle and notes services mutate it through `&mut`,
/// everything else reads it through the accessors below. Nothing here is
/// persisted; the state is dropped with the session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    /// Favorite symbols in the order they were added. No duplicates.
    pub(crate) favorites: Vec<String>,

    /// Symbol → chart open? Absent means closed. At most one `true`.
    pub(crate) chart_views: HashMap<String, bool>,

    /// Category names in display order. Unique, never empty.
    pub(crate) categories: Vec<String>,

    /// Category → notes in insertion order. Every category has an entry.
    pub(crate) notes: HashMap<String, Vec<Note>>,

    pub(crate) current_category: String,

    /// Notes currently in edit mode and their working copies.
    #[serde(skip)]
    pub(crate) drafts: HashMap<DraftKey, NoteDraft>,

    pub(crate) next_note_id: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        let categories: Vec<String> = DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
        let notes = categories.iter().map(|c| (c.clone(), Vec::new())).collect();
        Self {
            favorites: Vec::new(),
            chart_views: HashMap::new(),
            categories,
            notes,
            current_category: DEFAULT_CATEGORY.to_string(),
            drafts: HashMap::new(),
            next_note_id: 1,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn chart_views(&self) -> &HashMap<String, bool> {
        &self.chart_views
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    pub fn current_category(&self) -> &str {
        &self.current_category
    }

    /// Notes of a category, or `None` if the category does not exist.
    pub fn notes(&self, category: &str) -> Option<&[Note]> {
        self.notes.get(category).map(Vec::as_slice)
    }

    /// Total number of notes across all categories.
    pub fn note_count(&self) -> usize {
        self.notes.values().map(Vec::len).sum()
    }

    pub fn draft(&self, category: &str, id: NoteId) -> Option<&NoteDraft> {
        self.drafts.get(&(category.to_string(), id))
    }

    /// Number of notes currently in edit mode.
    pub fn draft_count(&self) -> usize {
        self.drafts.len()
    }

    /// Hand out the next note id.
    pub(crate) fn allocate_note_id(&mut self) -> NoteId {
        let id = NoteId(self.next_note_id);
        self.next_note_id += 1;
        id
    }
}
