use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily closing price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// How far back a price chart reaches.
///
/// Only these fixed windows are offered; there is no arbitrary date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LookbackPeriod {
    FiveDays,
    #[default]
    OneMonth,
    ThreeMonths,
}

impl LookbackPeriod {
    /// Calendar days covered by the window.
    pub fn days(&self) -> i64 {
        match self {
            LookbackPeriod::FiveDays => 5,
            LookbackPeriod::OneMonth => 30,
            LookbackPeriod::ThreeMonths => 90,
        }
    }

    /// Human-readable label used in chart titles.
    pub fn label(&self) -> &'static str {
        match self {
            LookbackPeriod::FiveDays => "Last 5 Days",
            LookbackPeriod::OneMonth => "Last Month",
            LookbackPeriod::ThreeMonths => "Last 3 Months",
        }
    }

    /// First date inside the window that ends on `today`.
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        today - chrono::Duration::days(self.days())
    }
}

impl std::fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Chart-ready closing prices for one symbol.
///
/// The core fetches and orders the numbers; the render layer only draws them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub symbol: String,
    pub lookback: LookbackPeriod,

    /// Name of the provider that served the data
    pub source: String,

    /// Sorted by date, never empty
    pub points: Vec<ClosePoint>,
}

impl ChartSeries {
    /// e.g. `AAPL - Closing Prices Over the Last Month`
    pub fn title(&self) -> String {
        format!("{} - Closing Prices Over the {}", self.symbol, self.lookback.label())
    }

    pub fn first_close(&self) -> Option<f64> {
        self.points.first().map(|p| p.close)
    }

    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// Percent change from the first to the last close in the window.
    pub fn change_percent(&self) -> Option<f64> {
        let first = self.first_close()?;
        let last = self.last_close()?;
        if first <= 0.0 {
            return None;
        }
        Some((last - first) / first * 100.0)
    }
}
