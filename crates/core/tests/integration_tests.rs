// ═══════════════════════════════════════════════════════════════════
// Integration Tests: StockDashboard session facade
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::NaiveDate;

use stock_dashboard_core::errors::CoreError;
use stock_dashboard_core::models::catalog::{Catalog, CatalogEntry};
use stock_dashboard_core::models::chart::{ClosePoint, LookbackPeriod};
use stock_dashboard_core::models::event::SessionEvent;
use stock_dashboard_core::models::load_state::LoadState;
use stock_dashboard_core::models::news::Article;
use stock_dashboard_core::models::note::NoteId;
use stock_dashboard_core::models::settings::Settings;
use stock_dashboard_core::providers::registry::ProviderRegistry;
use stock_dashboard_core::providers::traits::{ChartDataProvider, NewsProvider};
use stock_dashboard_core::StockDashboard;

// ═══════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════

fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Chart provider that answers only for known symbols and records the
/// lookback it was asked for in the close value.
struct StubChart;

#[async_trait]
impl ChartDataProvider for StubChart {
    fn name(&self) -> &str {
        "Stub"
    }

    async fn fetch_daily_closes(
        &self,
        symbol: &str,
        lookback: LookbackPeriod,
    ) -> Result<Vec<ClosePoint>, CoreError> {
        if symbol == "ZZZZ" {
            return Ok(vec![]);
        }
        Ok(vec![
            ClosePoint { date: make_date(2025, 2, 2), close: lookback.days() as f64 + 10.0 },
            ClosePoint { date: make_date(2025, 2, 1), close: lookback.days() as f64 },
        ])
    }
}

struct StubNews;

#[async_trait]
impl NewsProvider for StubNews {
    fn name(&self) -> &str {
        "StubNews"
    }

    async fn fetch_latest_articles(
        &self,
        query: &str,
        _max_count: usize,
    ) -> Result<Vec<Article>, CoreError> {
        if query.is_empty() {
            return Err(CoreError::FeedUnavailable("HTTP 400 Bad Request".into()));
        }
        Ok((1..=20)
            .map(|i| Article {
                title: format!("{query} story {i}"),
                url: format!("https://news.example.com/{i}"),
                ..Article::default()
            })
            .collect())
    }
}

fn stub_dashboard() -> StockDashboard {
    let mut registry = ProviderRegistry::new();
    registry.register_chart(Box::new(StubChart));
    registry.set_news(Box::new(StubNews));
    StockDashboard::with_registry(Settings::default(), registry)
}

fn offline_dashboard() -> StockDashboard {
    StockDashboard::with_registry(Settings::default(), ProviderRegistry::new())
}

// ═══════════════════════════════════════════════════════════════════
// Session lifecycle
// ═══════════════════════════════════════════════════════════════════

mod session {
    use super::*;

    #[test]
    fn new_session_defaults() {
        let dash = offline_dashboard();
        assert!(dash.favorites().is_empty());
        assert!(dash.visible_chart().is_none());
        assert_eq!(
            dash.categories(),
            ["General", "Stock Analysis", "Market Trends", "Investment Ideas"]
        );
        assert_eq!(dash.current_category(), "General");
        assert!(dash.current_notes().is_empty());
        assert!(dash.pending_events().is_empty());
        assert_eq!(dash.catalog().len(), 10);
    }

    #[test]
    fn sessions_are_isolated() {
        let mut a = offline_dashboard();
        let b = offline_dashboard();
        a.toggle_favorite("AAPL");
        a.add_category("Crypto").unwrap();

        assert_ne!(a.session_id(), b.session_id());
        assert!(b.favorites().is_empty());
        assert_eq!(b.categories().len(), 4);
    }

    #[test]
    fn create_new_uses_default_settings() {
        let dash = StockDashboard::create_new();
        assert_eq!(dash.settings().news_query, "stocks");
        assert_eq!(dash.settings().news_max_articles, 5);
        assert_eq!(dash.chart_provider_names(), vec!["Yahoo Finance"]);
        assert!(!dash.has_news_provider());
    }

    #[test]
    fn with_catalog_replaces_entries() {
        let catalog = Catalog::new(vec![(
            "ibm".to_string(),
            CatalogEntry::new("IBM", "https://logo.clearbit.com/ibm.com"),
        )]);
        let dash = offline_dashboard().with_catalog(catalog);
        assert_eq!(dash.catalog().symbols(), vec!["IBM"]);
        assert_eq!(dash.search_stocks("ib"), vec!["IBM"]);
    }

    #[test]
    fn debug_output_omits_note_content() {
        let mut dash = offline_dashboard();
        dash.add_note("General", "Secret plan", "very private", vec![])
            .unwrap();
        let debug = format!("{dash:?}");
        assert!(debug.contains("StockDashboard"));
        assert!(!debug.contains("very private"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Favorites and charts
// ═══════════════════════════════════════════════════════════════════

mod toggles {
    use super::*;

    #[test]
    fn favorite_entries_follow_toggle_order() {
        let mut dash = offline_dashboard();
        dash.toggle_favorite("NVDA");
        dash.toggle_favorite("AAPL");
        dash.toggle_favorite("ZZZZ");

        let entries = dash.favorite_entries();
        let names: Vec<(&str, &str)> = entries
            .iter()
            .map(|(s, e)| (*s, e.display_name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![("NVDA", "NVIDIA Corporation"), ("AAPL", "Apple Inc.")]
        );
        // symbol outside catalog is still a favorite
        assert!(dash.is_favorite("ZZZZ"));
        assert_eq!(dash.favorites().len(), 3);
    }

    #[test]
    fn favorite_events() {
        let mut dash = offline_dashboard();
        assert!(dash.toggle_favorite("AAPL"));
        assert!(!dash.toggle_favorite("AAPL"));
        assert_eq!(
            dash.drain_events(),
            vec![
                SessionEvent::FavoriteToggled { symbol: "AAPL".into(), is_favorite: true },
                SessionEvent::FavoriteToggled { symbol: "AAPL".into(), is_favorite: false },
            ]
        );
        assert!(dash.pending_events().is_empty());
    }

    #[test]
    fn opening_second_chart_emits_close_for_first() {
        let mut dash = offline_dashboard();
        dash.toggle_chart_view("AAPL");
        dash.drain_events();

        assert!(dash.toggle_chart_view("MSFT"));
        assert_eq!(
            dash.drain_events(),
            vec![
                SessionEvent::ChartVisibilityChanged { symbol: "AAPL".into(), visible: false },
                SessionEvent::ChartVisibilityChanged { symbol: "MSFT".into(), visible: true },
            ]
        );
        assert!(!dash.is_chart_visible("AAPL"));
        assert_eq!(dash.visible_chart(), Some("MSFT"));
    }

    #[test]
    fn closing_open_chart_emits_single_event() {
        let mut dash = offline_dashboard();
        dash.toggle_chart_view("GOOG");
        dash.drain_events();

        assert!(!dash.toggle_chart_view("GOOG"));
        assert_eq!(
            dash.drain_events(),
            vec![SessionEvent::ChartVisibilityChanged { symbol: "GOOG".into(), visible: false }]
        );
    }

    #[test]
    fn close_chart_noop_emits_nothing() {
        let mut dash = offline_dashboard();
        assert!(!dash.close_chart("AAPL"));
        assert!(dash.pending_events().is_empty());

        dash.toggle_chart_view("AAPL");
        assert!(dash.close_chart("AAPL"));
        assert_eq!(dash.pending_events().len(), 2);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Categories and notes through the facade
// ═══════════════════════════════════════════════════════════════════

mod notes {
    use super::*;

    #[test]
    fn add_select_and_write_in_new_category() {
        let mut dash = offline_dashboard();
        dash.add_category("Crypto").unwrap();
        dash.select_category("Crypto").unwrap();
        let id = dash
            .add_note_to_current("BTC", "Halving soon", vec![])
            .unwrap();

        assert_eq!(dash.current_category(), "Crypto");
        assert_eq!(dash.current_notes().len(), 1);
        assert_eq!(dash.current_notes()[0].id, id);
        assert!(dash.notes("General").unwrap().is_empty());

        assert_eq!(
            dash.drain_events(),
            vec![
                SessionEvent::CategoryAdded { name: "Crypto".into() },
                SessionEvent::CategorySelected { name: "Crypto".into() },
                SessionEvent::NoteAdded { category: "Crypto".into(), id },
            ]
        );
    }

    #[test]
    fn failed_operations_emit_no_events() {
        let mut dash = offline_dashboard();
        assert!(matches!(
            dash.add_category("General"),
            Err(CoreError::DuplicateCategory(_))
        ));
        assert!(dash.select_category("Nope").is_err());
        assert!(dash.add_note("General", "", "c", vec![]).is_err());
        assert!(dash.delete_note("General", NoteId(1)).is_err());
        assert!(dash.begin_edit("General", NoteId(1)).is_err());
        assert!(!dash.cancel_edit("General", NoteId(1)));
        assert!(dash.pending_events().is_empty());
    }

    #[test]
    fn positional_delete_out_of_range_leaves_list_unchanged() {
        let mut dash = offline_dashboard();
        dash.add_note("General", "A", "a", vec![]).unwrap();
        dash.add_note("General", "B", "b", vec![]).unwrap();
        dash.drain_events();

        let err = dash.delete_note_at("General", 5).unwrap_err();
        assert!(matches!(err, CoreError::IndexOutOfRange { index: 5, len: 2, .. }));
        assert_eq!(dash.notes("General").unwrap().len(), 2);
        assert!(dash.pending_events().is_empty());
    }

    #[test]
    fn positional_edit_save_cycle() {
        let mut dash = offline_dashboard();
        dash.add_note("General", "Buy AAPL", "Strong Q3", vec!["AAPL".into()])
            .unwrap();

        let id = dash.begin_edit_at("General", 0).unwrap();
        assert!(dash.is_editing("General", id));
        assert_eq!(dash.edit_draft("General", id).unwrap().title, "Buy AAPL");

        dash.save_edit_at("General", 0, "Buy AAPL now", "Updated", vec!["AAPL".into()])
            .unwrap();
        let note = dash.find_note("General", id).unwrap();
        assert_eq!(note.title, "Buy AAPL now");
        assert_eq!(note.content, "Updated");
        assert!(note.display_timestamp().ends_with(" (edited)"));
        assert!(!dash.is_editing("General", id));
    }

    #[test]
    fn positional_cancel() {
        let mut dash = offline_dashboard();
        dash.add_note("General", "A", "a", vec![]).unwrap();
        dash.begin_edit_at("General", 0).unwrap();

        assert!(dash.cancel_edit_at("General", 0).unwrap());
        assert!(!dash.cancel_edit_at("General", 0).unwrap());
        assert!(dash.cancel_edit_at("General", 3).is_err());
    }

    #[test]
    fn delete_during_edit_then_stale_save_is_rejected() {
        let mut dash = offline_dashboard();
        let first = dash.add_note("General", "First", "one", vec![]).unwrap();
        let second = dash.add_note("General", "Second", "two", vec![]).unwrap();

        dash.begin_edit("General", first).unwrap();
        dash.delete_note_at("General", 0).unwrap();
        assert!(!dash.is_editing("General", first));

        let err = dash
            .save_edit("General", first, "X", "Y", vec![])
            .unwrap_err();
        assert!(matches!(err, CoreError::NoteNotFound { .. }));

        assert_eq!(dash.note_id_at("General", 0).unwrap(), second);
        let survivor = dash.find_note("General", second).unwrap();
        assert_eq!(survivor.title, "Second");
        assert!(!survivor.edited);
    }

    #[test]
    fn delete_during_edit_then_stale_positional_save_is_rejected() {
        let mut dash = offline_dashboard();
        dash.add_note("General", "First", "one", vec![]).unwrap();
        let second = dash.add_note("General", "Second", "two", vec![]).unwrap();

        dash.begin_edit_at("General", 0).unwrap();
        dash.delete_note_at("General", 0).unwrap();
        dash.drain_events();

        // index 0 now holds "Second", which was never in edit mode
        let err = dash
            .save_edit_at("General", 0, "X", "Y", vec![])
            .unwrap_err();
        match err {
            CoreError::IndexOutOfRange { category, index, len } => {
                assert_eq!(category, "General");
                assert_eq!(index, 0);
                assert_eq!(len, 1);
            }
            other => panic!("unexpected error: {other}"),
        }

        let survivor = dash.find_note("General", second).unwrap();
        assert_eq!(survivor.title, "Second");
        assert_eq!(survivor.content, "two");
        assert!(!survivor.edited);
        assert!(dash.pending_events().is_empty());
    }

    #[test]
    fn positional_save_without_begin_edit_is_rejected() {
        let mut dash = offline_dashboard();
        let id = dash.add_note("General", "A", "a", vec![]).unwrap();
        assert!(matches!(
            dash.save_edit_at("General", 0, "B", "b", vec![]),
            Err(CoreError::IndexOutOfRange { index: 0, len: 1, .. })
        ));
        assert!(matches!(
            dash.save_edit("General", id, "B", "b", vec![]),
            Err(CoreError::NotEditing { .. })
        ));
        assert_eq!(dash.find_note("General", id).unwrap().title, "A");
    }

    #[test]
    fn edit_event_sequence() {
        let mut dash = offline_dashboard();
        let id = dash.add_note("General", "T", "C", vec![]).unwrap();
        dash.begin_edit("General", id).unwrap();
        dash.cancel_edit("General", id);
        dash.begin_edit("General", id).unwrap();
        dash.save_edit("General", id, "T2", "C2", vec![]).unwrap();
        dash.delete_note("General", id).unwrap();

        let events = dash.drain_events();
        let labels: Vec<String> = events.iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            vec![
                format!("note {id} added to General"),
                format!("editing note {id} in General"),
                format!("edit of note {id} in General cancelled"),
                format!("editing note {id} in General"),
                format!("note {id} in General saved"),
                format!("note {id} deleted from General"),
            ]
        );
        assert!(events.iter().all(|e| e.category() == Some("General")));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Charts and news through the facade
// ═══════════════════════════════════════════════════════════════════

mod fetching {
    use super::*;

    #[tokio::test]
    async fn fetch_chart_uses_configured_lookback() {
        let mut dash = stub_dashboard();
        dash.set_chart_lookback(LookbackPeriod::ThreeMonths);

        let series = dash.fetch_chart("AAPL").await.unwrap();
        assert_eq!(series.lookback, LookbackPeriod::ThreeMonths);
        assert_eq!(series.source, "Stub");
        assert_eq!(series.first_close(), Some(90.0));
        assert_eq!(series.last_close(), Some(100.0));
        assert_eq!(series.title(), "AAPL - Closing Prices Over the Last 3 Months");
    }

    #[tokio::test]
    async fn fetch_chart_unknown_symbol_is_data_unavailable() {
        let dash = stub_dashboard();
        let err = dash.fetch_chart("ZZZZ").await.unwrap_err();
        assert!(matches!(err, CoreError::DataUnavailable { .. }));
        assert!(err.is_fetch_error());
    }

    #[tokio::test]
    async fn fetch_visible_chart_follows_toggle() {
        let mut dash = stub_dashboard();
        assert!(dash.fetch_visible_chart().await.is_none());

        dash.toggle_chart_view("MSFT");
        let series = dash.fetch_visible_chart().await.unwrap().unwrap();
        assert_eq!(series.symbol, "MSFT");

        dash.toggle_chart_view("MSFT");
        assert!(dash.fetch_visible_chart().await.is_none());
    }

    #[tokio::test]
    async fn fetch_failure_does_not_touch_state() {
        let mut dash = stub_dashboard();
        dash.toggle_favorite("ZZZZ");
        dash.toggle_chart_view("ZZZZ");

        let state = LoadState::from(dash.fetch_chart("ZZZZ").await);
        assert!(state.is_error());
        assert!(dash.is_favorite("ZZZZ"));
        assert!(dash.is_chart_visible("ZZZZ"));
    }

    #[tokio::test]
    async fn fetch_news_respects_max_articles() {
        let mut dash = stub_dashboard();
        let articles = dash.fetch_news().await.unwrap();
        assert_eq!(articles.len(), 5);
        assert_eq!(articles[0].title, "stocks story 1");

        dash.set_news_max_articles(0);
        assert_eq!(dash.settings().news_max_articles, 1);
        assert_eq!(dash.fetch_news().await.unwrap().len(), 1);

        dash.set_news_max_articles(8);
        dash.set_news_query("earnings");
        let articles = dash.fetch_news().await.unwrap();
        assert_eq!(articles.len(), 8);
        assert_eq!(articles[7].title, "earnings story 8");
    }

    #[tokio::test]
    async fn news_failure_is_feed_unavailable() {
        let mut dash = stub_dashboard();
        dash.set_news_query("");
        let err = dash.fetch_news().await.unwrap_err();
        assert!(matches!(err, CoreError::FeedUnavailable(_)));
    }

    #[tokio::test]
    async fn news_without_provider_is_feed_unavailable() {
        let dash = offline_dashboard();
        let state = LoadState::from(dash.fetch_news().await);
        assert!(state.is_error());
        assert!(state.error_message().unwrap().contains("missing API key"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn set_api_key_rebuilds_registry() {
        let mut dash = StockDashboard::create_new();
        assert!(!dash.has_news_provider());

        dash.set_api_key("newsapi".into(), "n-key".into());
        assert!(dash.has_news_provider());

        dash.set_api_key("alphavantage".into(), "a-key".into());
        assert_eq!(
            dash.chart_provider_names(),
            vec!["Yahoo Finance", "Alpha Vantage"]
        );
    }

    #[test]
    fn remove_api_key_rebuilds_registry() {
        let mut settings = Settings::default();
        settings.api_keys.insert("newsapi".into(), "n-key".into());
        let mut dash = StockDashboard::with_settings(settings);
        assert!(dash.has_news_provider());

        assert!(dash.remove_api_key("newsapi"));
        assert!(!dash.has_news_provider());
        assert!(!dash.remove_api_key("newsapi"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Debug snapshot
// ═══════════════════════════════════════════════════════════════════

mod snapshot {
    use super::*;

    #[test]
    fn to_json_contains_state_but_not_drafts() {
        let mut dash = offline_dashboard();
        dash.toggle_favorite("AAPL");
        dash.toggle_chart_view("TSLA");
        let id = dash
            .add_note("Market Trends", "Rates", "Cuts expected", vec![])
            .unwrap();
        dash.begin_edit("Market Trends", id).unwrap();

        let json = dash.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["favorites"], serde_json::json!(["AAPL"]));
        assert_eq!(value["chart_views"]["TSLA"], serde_json::json!(true));
        assert_eq!(value["current_category"], serde_json::json!("General"));
        assert_eq!(value["notes"]["Market Trends"][0]["title"], serde_json::json!("Rates"));
        assert!(value.get("drafts").is_none());
    }
}
