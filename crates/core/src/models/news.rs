use serde::{Deserialize, Serialize};

/// A news article as shown in the news tab.
///
/// Fields the feed did not supply are empty strings; the render layer
/// skips empty fields instead of showing placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
}

impl Article {
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }

    pub fn has_link(&self) -> bool {
        !self.url.is_empty()
    }
}
