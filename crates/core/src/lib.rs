pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use log::info;
use models::{
    catalog::{Catalog, CatalogEntry},
    chart::{ChartSeries, LookbackPeriod},
    event::SessionEvent,
    news::Article,
    note::{Note, NoteDraft, NoteId},
    session::SessionState,
    settings::Settings,
};
use providers::registry::ProviderRegistry;
use services::{
    chart_service::ChartService, news_service::NewsService, notes_service::NotesService,
    toggle_service::ToggleService,
};
use uuid::Uuid;

use errors::CoreError;

/// Main entry point for the stock dashboard core.
///
/// One instance per user session. Holds the session state, the fixed
/// catalog, and the services that operate on them. Nothing is shared
/// between instances and nothing outlives the instance.
///
/// Every successful mutation queues a [`SessionEvent`]; the render layer
/// calls [`StockDashboard::drain_events`] after each user action to find out
/// what to redraw.
#[must_use]
pub struct StockDashboard {
    session_id: Uuid,
    state: SessionState,
    catalog: Catalog,
    settings: Settings,
    registry: ProviderRegistry,
    toggle_service: ToggleService,
    notes_service: NotesService,
    chart_service: ChartService,
    news_service: NewsService,
    events: Vec<SessionEvent>,
}

impl std::fmt::Debug for StockDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockDashboard")
            .field("session_id", &self.session_id)
            .field("favorites", &self.state.favorites().len())
            .field("categories", &self.state.categories().len())
            .field("notes", &self.state.note_count())
            .field("pending_events", &self.events.len())
            .finish()
    }
}

impl StockDashboard {
    /// Start a session with default settings and the default catalog.
    pub fn create_new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Start a session whose providers are built from `settings`.
    pub fn with_settings(settings: Settings) -> Self {
        let registry = ProviderRegistry::new_with_defaults(&settings);
        Self::with_registry(settings, registry)
    }

    /// Start a session with an explicit provider registry.
    pub fn with_registry(settings: Settings, registry: ProviderRegistry) -> Self {
        let session_id = Uuid::new_v4();
        info!(
            "event=session_start module=core status=ok session={session_id} chart_providers={} news={}",
            registry.chart_providers().len(),
            registry.news_provider().is_some()
        );
        Self {
            session_id,
            state: SessionState::new(),
            catalog: Catalog::default(),
            settings,
            registry,
            toggle_service: ToggleService::new(),
            notes_service: NotesService::new(),
            chart_service: ChartService::new(),
            news_service: NewsService::new(),
            events: Vec::new(),
        }
    }

    /// Replace the default catalog. Intended for use right after construction.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Read-only view of the whole session state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    // ── Catalog ─────────────────────────────────────────────────────

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Catalog symbols matching the search box, in display order.
    #[must_use]
    pub fn search_stocks(&self, query: &str) -> Vec<&str> {
        self.catalog.search(query)
    }

    // ── Favorites ───────────────────────────────────────────────────

    /// Favorite symbols in the order they were added.
    #[must_use]
    pub fn favorites(&self) -> &[String] {
        self.state.favorites()
    }

    /// Favorites with their catalog metadata. Symbols missing from the
    /// catalog are left out.
    #[must_use]
    pub fn favorite_entries(&self) -> Vec<(&str, &CatalogEntry)> {
        self.state
            .favorites()
            .iter()
            .filter_map(|s| self.catalog.get(s).map(|e| (s.as_str(), e)))
            .collect()
    }

    #[must_use]
    pub fn is_favorite(&self, symbol: &str) -> bool {
        self.toggle_service.is_favorite(&self.state, symbol)
    }

    /// Flip favorite membership. Returns whether `symbol` is now a favorite.
    pub fn toggle_favorite(&mut self, symbol: &str) -> bool {
        let is_favorite = self.toggle_service.toggle_favorite(&mut self.state, symbol);
        self.events.push(SessionEvent::FavoriteToggled {
            symbol: symbol.to_string(),
            is_favorite,
        });
        is_favorite
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Open or close the inline chart of `symbol`; opening closes any other.
    /// Returns whether the chart is now visible.
    pub fn toggle_chart_view(&mut self, symbol: &str) -> bool {
        let previously_open = self
            .toggle_service
            .visible_chart(&self.state)
            .map(str::to_string);
        let visible = self.toggle_service.toggle_chart_view(&mut self.state, symbol);

        if let Some(prev) = previously_open.filter(|p| p != symbol) {
            self.events.push(SessionEvent::ChartVisibilityChanged {
                symbol: prev,
                visible: false,
            });
        }
        self.events.push(SessionEvent::ChartVisibilityChanged {
            symbol: symbol.to_string(),
            visible,
        });
        visible
    }

    /// Close the chart of `symbol`. Returns `true` if it was open.
    pub fn close_chart(&mut self, symbol: &str) -> bool {
        let closed = self.toggle_service.close_chart(&mut self.state, symbol);
        if closed {
            self.events.push(SessionEvent::ChartVisibilityChanged {
                symbol: symbol.to_string(),
                visible: false,
            });
        }
        closed
    }

    #[must_use]
    pub fn is_chart_visible(&self, symbol: &str) -> bool {
        self.toggle_service.is_chart_visible(&self.state, symbol)
    }

    /// The symbol whose chart is open, if any.
    #[must_use]
    pub fn visible_chart(&self) -> Option<&str> {
        self.toggle_service.visible_chart(&self.state)
    }

    /// Fetch the closing prices for `symbol` over the configured lookback.
    pub async fn fetch_chart(&self, symbol: &str) -> Result<ChartSeries, CoreError> {
        self.chart_service
            .fetch_daily_closes(&self.registry, symbol, self.settings.chart_lookback)
            .await
    }

    /// Fetch the chart that is currently open, if one is.
    pub async fn fetch_visible_chart(&self) -> Option<Result<ChartSeries, CoreError>> {
        let symbol = self.visible_chart()?;
        Some(self.fetch_chart(symbol).await)
    }

    // ── News ────────────────────────────────────────────────────────

    /// Latest articles for the news tab.
    pub async fn fetch_news(&self) -> Result<Vec<Article>, CoreError> {
        self.news_service
            .fetch_latest(&self.registry, &self.settings)
            .await
    }

    // ── Categories ──────────────────────────────────────────────────

    #[must_use]
    pub fn categories(&self) -> &[String] {
        self.state.categories()
    }

    #[must_use]
    pub fn current_category(&self) -> &str {
        self.state.current_category()
    }

    /// Add a category at the end of the list.
    pub fn add_category(&mut self, name: &str) -> Result<(), CoreError> {
        let name = self.notes_service.add_category(&mut self.state, name)?;
        self.events.push(SessionEvent::CategoryAdded { name });
        Ok(())
    }

    pub fn select_category(&mut self, name: &str) -> Result<(), CoreError> {
        self.notes_service.select_category(&mut self.state, name)?;
        self.events.push(SessionEvent::CategorySelected {
            name: name.to_string(),
        });
        Ok(())
    }

    // ── Notes ───────────────────────────────────────────────────────

    /// Notes of `category` in insertion order.
    pub fn notes(&self, category: &str) -> Result<&[Note], CoreError> {
        self.notes_service.list_notes(&self.state, category)
    }

    /// Notes of the selected category.
    #[must_use]
    pub fn current_notes(&self) -> &[Note] {
        self.state
            .notes(self.state.current_category())
            .unwrap_or_default()
    }

    pub fn find_note(&self, category: &str, id: NoteId) -> Result<&Note, CoreError> {
        self.notes_service.find_note(&self.state, category, id)
    }

    /// Id of the note at position `index` in `category`.
    pub fn note_id_at(&self, category: &str, index: usize) -> Result<NoteId, CoreError> {
        self.notes_service.note_id_at(&self.state, category, index)
    }

    pub fn add_note(
        &mut self,
        category: &str,
        title: &str,
        content: &str,
        related_symbols: Vec<String>,
    ) -> Result<NoteId, CoreError> {
        let id = self
            .notes_service
            .add_note(&mut self.state, category, title, content, related_symbols)?;
        self.events.push(SessionEvent::NoteAdded {
            category: category.to_string(),
            id,
        });
        Ok(id)
    }

    /// Add a note to the selected category.
    pub fn add_note_to_current(
        &mut self,
        title: &str,
        content: &str,
        related_symbols: Vec<String>,
    ) -> Result<NoteId, CoreError> {
        let category = self.state.current_category().to_string();
        self.add_note(&category, title, content, related_symbols)
    }

    /// Delete a note and any edit in progress on it. Returns the removed note.
    pub fn delete_note(&mut self, category: &str, id: NoteId) -> Result<Note, CoreError> {
        let removed = self.notes_service.delete_note(&mut self.state, category, id)?;
        self.events.push(SessionEvent::NoteDeleted {
            category: category.to_string(),
            id,
        });
        Ok(removed)
    }

    pub fn delete_note_at(&mut self, category: &str, index: usize) -> Result<Note, CoreError> {
        let id = self.note_id_at(category, index)?;
        self.delete_note(category, id)
    }

    // ── Editing ─────────────────────────────────────────────────────

    pub fn begin_edit(&mut self, category: &str, id: NoteId) -> Result<(), CoreError> {
        self.notes_service.begin_edit(&mut self.state, category, id)?;
        self.events.push(SessionEvent::EditStarted {
            category: category.to_string(),
            id,
        });
        Ok(())
    }

    pub fn begin_edit_at(&mut self, category: &str, index: usize) -> Result<NoteId, CoreError> {
        let id = self.note_id_at(category, index)?;
        self.begin_edit(category, id)?;
        Ok(id)
    }

    pub fn save_edit(
        &mut self,
        category: &str,
        id: NoteId,
        title: &str,
        content: &str,
        related_symbols: Vec<String>,
    ) -> Result<(), CoreError> {
        self.notes_service
            .save_edit(&mut self.state, category, id, title, content, related_symbols)?;
        self.events.push(SessionEvent::EditSaved {
            category: category.to_string(),
            id,
        });
        Ok(())
    }

    /// Positional save. The index is resolved when this is called and must
    /// point at a note in edit mode; otherwise (e.g. the edited note was
    /// deleted and another moved into its place) this fails with
    /// `IndexOutOfRange` and nothing changes.
    pub fn save_edit_at(
        &mut self,
        category: &str,
        index: usize,
        title: &str,
        content: &str,
        related_symbols: Vec<String>,
    ) -> Result<(), CoreError> {
        let id = self.note_id_at(category, index)?;
        if !self.is_editing(category, id) {
            return Err(CoreError::IndexOutOfRange {
                category: category.to_string(),
                index,
                len: self.notes(category)?.len(),
            });
        }
        self.save_edit(category, id, title, content, related_symbols)
    }

    /// Leave edit mode without saving. Returns `true` if the note was being edited.
    pub fn cancel_edit(&mut self, category: &str, id: NoteId) -> bool {
        let cancelled = self.notes_service.cancel_edit(&mut self.state, category, id);
        if cancelled {
            self.events.push(SessionEvent::EditCancelled {
                category: category.to_string(),
                id,
            });
        }
        cancelled
    }

    pub fn cancel_edit_at(&mut self, category: &str, index: usize) -> Result<bool, CoreError> {
        let id = self.note_id_at(category, index)?;
        Ok(self.cancel_edit(category, id))
    }

    #[must_use]
    pub fn is_editing(&self, category: &str, id: NoteId) -> bool {
        self.notes_service.is_editing(&self.state, category, id)
    }

    /// Working copy of a note in edit mode.
    #[must_use]
    pub fn edit_draft(&self, category: &str, id: NoteId) -> Option<&NoteDraft> {
        self.notes_service.draft(&self.state, category, id)
    }

    // ── Change notifications ────────────────────────────────────────

    /// Take all events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn pending_events(&self) -> &[SessionEvent] {
        &self.events
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set an API key for a provider (e.g., "newsapi", "alphavantage").
    /// Rebuilds the provider registry so the new key takes effect immediately.
    pub fn set_api_key(&mut self, provider: String, key: String) {
        self.settings.api_keys.insert(provider, key);
        self.registry = ProviderRegistry::new_with_defaults(&self.settings);
    }

    /// Remove an API key for a provider.
    /// Rebuilds the provider registry so the removal takes effect immediately.
    pub fn remove_api_key(&mut self, provider: &str) -> bool {
        let removed = self.settings.api_keys.remove(provider).is_some();
        if removed {
            self.registry = ProviderRegistry::new_with_defaults(&self.settings);
        }
        removed
    }

    pub fn set_news_query(&mut self, query: impl Into<String>) {
        self.settings.news_query = query.into();
    }

    /// Set how many articles the news tab shows. Zero is raised to one.
    pub fn set_news_max_articles(&mut self, max: usize) {
        self.settings.news_max_articles = max.max(1);
    }

    pub fn set_chart_lookback(&mut self, lookback: LookbackPeriod) {
        self.settings.chart_lookback = lookback;
    }

    /// Names of the chart providers, in the order they are tried.
    #[must_use]
    pub fn chart_provider_names(&self) -> Vec<String> {
        self.registry.chart_provider_names()
    }

    #[must_use]
    pub fn has_news_provider(&self) -> bool {
        self.registry.news_provider().is_some()
    }

    // ── Debugging ───────────────────────────────────────────────────

    /// Pretty JSON snapshot of the session state (edit drafts excluded).
    /// For inspection only; there is no way to load it back.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.state)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize session: {e}")))
    }
}
