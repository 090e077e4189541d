use log::{debug, info};

use crate::errors::CoreError;
use crate::models::note::{Note, NoteDraft, NoteId};
use crate::models::session::SessionState;

/// Category and note management over a session's notes collection.
///
/// Notes are addressed by their stable [`NoteId`]. Every operation either
/// succeeds completely or returns an error with the session left untouched.
pub struct NotesService;

impl NotesService {
    pub fn new() -> Self {
        Self
    }

    // ── Categories ──────────────────────────────────────────────────

    /// Append a new category with an empty note list.
    /// Returns the stored (trimmed) name.
    pub fn add_category(&self, state: &mut SessionState, name: &str) -> Result<String, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidCategory(
                "category name must not be empty".into(),
            ));
        }
        if state.has_category(name) {
            return Err(CoreError::DuplicateCategory(name.to_string()));
        }

        state.categories.push(name.to_string());
        state.notes.entry(name.to_string()).or_default();
        info!(
            "event=category_add module=notes status=ok category={name} total={}",
            state.categories.len()
        );
        Ok(name.to_string())
    }

    /// Make `name` the category whose notes are displayed.
    pub fn select_category(&self, state: &mut SessionState, name: &str) -> Result<(), CoreError> {
        if !state.has_category(name) {
            return Err(CoreError::UnknownCategory(name.to_string()));
        }
        state.current_category = name.to_string();
        debug!("event=category_select module=notes status=ok category={name}");
        Ok(())
    }

    // ── Notes ───────────────────────────────────────────────────────

    /// Append a note to `category`, stamped with the current time.
    pub fn add_note(
        &self,
        state: &mut SessionState,
        category: &str,
        title: &str,
        content: &str,
        related_symbols: Vec<String>,
    ) -> Result<NoteId, CoreError> {
        if !state.has_category(category) {
            return Err(CoreError::UnknownCategory(category.to_string()));
        }
        Self::validate_fields(title, content)?;

        let id = state.allocate_note_id();
        let related = related_symbols.len();
        state
            .notes
            .entry(category.to_string())
            .or_default()
            .push(Note::new(id, title, content, related_symbols));

        info!(
            "event=note_add module=notes status=ok category={category} id={} content_len={} related={related}",
            id.0,
            content.len()
        );
        Ok(id)
    }

    /// Notes of `category` in insertion order.
    pub fn list_notes<'a>(
        &self,
        state: &'a SessionState,
        category: &str,
    ) -> Result<&'a [Note], CoreError> {
        state
            .notes(category)
            .ok_or_else(|| CoreError::UnknownCategory(category.to_string()))
    }

    pub fn find_note<'a>(
        &self,
        state: &'a SessionState,
        category: &str,
        id: NoteId,
    ) -> Result<&'a Note, CoreError> {
        self.list_notes(state, category)?
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| CoreError::NoteNotFound {
                category: category.to_string(),
                id,
            })
    }

    /// Id of the note currently at position `index` of `category`.
    pub fn note_id_at(
        &self,
        state: &SessionState,
        category: &str,
        index: usize,
    ) -> Result<NoteId, CoreError> {
        let notes = self.list_notes(state, category)?;
        notes
            .get(index)
            .map(|n| n.id)
            .ok_or_else(|| CoreError::IndexOutOfRange {
                category: category.to_string(),
                index,
                len: notes.len(),
            })
    }

    /// Remove a note. Notes after it move up one position; ids are unchanged.
    /// An edit in progress on the note is discarded with it.
    pub fn delete_note(
        &self,
        state: &mut SessionState,
        category: &str,
        id: NoteId,
    ) -> Result<Note, CoreError> {
        let notes = Self::notes_mut(state, category)?;
        let idx = notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| CoreError::NoteNotFound {
                category: category.to_string(),
                id,
            })?;
        let removed = notes.remove(idx);
        let had_draft = state.drafts.remove(&(category.to_string(), id)).is_some();

        info!(
            "event=note_delete module=notes status=ok category={category} id={} was_editing={had_draft}",
            id.0
        );
        Ok(removed)
    }

    // ── Editing ─────────────────────────────────────────────────────

    /// Put a note into edit mode with a draft seeded from its current fields.
    /// Calling it again while editing re-seeds the draft.
    pub fn begin_edit(
        &self,
        state: &mut SessionState,
        category: &str,
        id: NoteId,
    ) -> Result<(), CoreError> {
        let draft = self.find_note(state, category, id)?.to_draft();
        state.drafts.insert((category.to_string(), id), draft);
        debug!("event=edit_begin module=notes status=ok category={category} id={}", id.0);
        Ok(())
    }

    /// Overwrite a note's editable fields and leave edit mode.
    ///
    /// Only a note in edit mode can be saved. `created_at` is kept; the
    /// note is marked edited. Fails with `NoteNotFound` when the note was
    /// deleted in the meantime, with `NotEditing` when it has no draft, and
    /// with `InvalidNote` (draft kept) when the new title or content is empty.
    pub fn save_edit(
        &self,
        state: &mut SessionState,
        category: &str,
        id: NoteId,
        title: &str,
        content: &str,
        related_symbols: Vec<String>,
    ) -> Result<(), CoreError> {
        self.find_note(state, category, id)?;
        if !self.is_editing(state, category, id) {
            return Err(CoreError::NotEditing {
                category: category.to_string(),
                id,
            });
        }
        Self::validate_fields(title, content)?;

        let note = Self::note_mut(state, category, id)?;
        note.title = title.to_string();
        note.content = content.to_string();
        note.related_symbols = related_symbols;
        note.edited = true;
        state.drafts.remove(&(category.to_string(), id));

        info!(
            "event=note_save module=notes status=ok category={category} id={} content_len={}",
            id.0,
            content.len()
        );
        Ok(())
    }

    /// Leave edit mode without touching the note.
    /// Returns `true` if the note was being edited.
    pub fn cancel_edit(&self, state: &mut SessionState, category: &str, id: NoteId) -> bool {
        let cancelled = state.drafts.remove(&(category.to_string(), id)).is_some();
        debug!(
            "event=edit_cancel module=notes status=ok category={category} id={} had_draft={cancelled}",
            id.0
        );
        cancelled
    }

    pub fn is_editing(&self, state: &SessionState, category: &str, id: NoteId) -> bool {
        state.draft(category, id).is_some()
    }

    pub fn draft<'a>(
        &self,
        state: &'a SessionState,
        category: &str,
        id: NoteId,
    ) -> Option<&'a NoteDraft> {
        state.draft(category, id)
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Title and content must both be non-blank. Both are stored as given.
    fn validate_fields(title: &str, content: &str) -> Result<(), CoreError> {
        if title.trim().is_empty() {
            return Err(CoreError::InvalidNote("title must not be empty".into()));
        }
        if content.trim().is_empty() {
            return Err(CoreError::InvalidNote("content must not be empty".into()));
        }
        Ok(())
    }

    fn notes_mut<'a>(
        state: &'a mut SessionState,
        category: &str,
    ) -> Result<&'a mut Vec<Note>, CoreError> {
        state
            .notes
            .get_mut(category)
            .ok_or_else(|| CoreError::UnknownCategory(category.to_string()))
    }

    fn note_mut<'a>(
        state: &'a mut SessionState,
        category: &str,
        id: NoteId,
    ) -> Result<&'a mut Note, CoreError> {
        Self::notes_mut(state, category)?
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| CoreError::NoteNotFound {
                category: category.to_string(),
                id,
            })
    }
}

impl Default for NotesService {
    fn default() -> Self {
        Self::new()
    }
}
