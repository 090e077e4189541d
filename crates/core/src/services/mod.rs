pub mod chart_service;
pub mod news_service;
pub mod notes_service;
pub mod toggle_service;
