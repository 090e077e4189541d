pub mod catalog;
pub mod chart;
pub mod event;
pub mod load_state;
pub mod news;
pub mod note;
pub mod session;
pub mod settings;
