use serde::{Deserialize, Serialize};

/// Display metadata for one stock symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Company name shown next to the ticker (e.g., "Apple Inc.")
    pub display_name: String,

    /// Logo image URL
    pub logo_url: String,
}

impl CatalogEntry {
    pub fn new(display_name: impl Into<String>, logo_url: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            logo_url: logo_url.into(),
        }
    }
}

/// Fixed reference table of stock symbols → display metadata.
///
/// Built once at session start and never mutated. Iteration order is the
/// order entries were supplied in, which is also the display order of the
/// stock list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<(String, CatalogEntry)>,
}

const LOGO_BASE_URL: &str = "https://logo.clearbit.com";

/// (symbol, name, logo domain)
const DEFAULT_STOCKS: [(&str, &str, &str); 10] = [
    ("AAPL", "Apple Inc.", "apple.com"),
    ("TSLA", "Tesla Inc.", "tesla.com"),
    ("GOOG", "Alphabet Inc.", "google.com"),
    ("MSFT", "Microsoft Corporation", "microsoft.com"),
    ("NVDA", "NVIDIA Corporation", "nvidia.com"),
    ("AMZN", "Amazon.com Inc.", "amazon.com"),
    ("META", "Meta Platforms, Inc.", "meta.com"),
    ("BABA", "Alibaba Group Holding Limited", "alibaba.com"),
    ("DIS", "The Walt Disney Company", "disney.com"),
    ("NFLX", "Netflix Inc.", "netflix.com"),
];

impl Catalog {
    /// Build a catalog from `(symbol, entry)` pairs.
    /// Symbols are uppercased; a repeated symbol keeps its first entry.
    pub fn new(entries: impl IntoIterator<Item = (String, CatalogEntry)>) -> Self {
        let mut out: Vec<(String, CatalogEntry)> = Vec::new();
        for (symbol, entry) in entries {
            let symbol = symbol.trim().to_uppercase();
            if !out.iter().any(|(s, _)| *s == symbol) {
                out.push((symbol, entry));
            }
        }
        Self { entries: out }
    }

    pub fn get(&self, symbol: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, e)| e)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// All symbols in display order.
    pub fn symbols(&self) -> Vec<&str> {
        self.entries.iter().map(|(s, _)| s.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(s, e)| (s.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbols whose ticker contains `query` (case-insensitive), in display order.
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let needle = query.trim().to_uppercase();
        self.entries
            .iter()
            .filter(|(s, _)| needle.is_empty() || s.contains(&needle))
            .map(|(s, _)| s.as_str())
            .collect()
    }
}

impl Default for Catalog {
    /// The ten large-cap stocks the dashboard ships with.
    fn default() -> Self {
        Self::new(DEFAULT_STOCKS.iter().map(|(symbol, name, domain)| {
            (
                (*symbol).to_string(),
                CatalogEntry::new(*name, format!("{LOGO_BASE_URL}/{domain}")),
            )
        }))
    }
}
