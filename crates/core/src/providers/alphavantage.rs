use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::ChartDataProvider;
use crate::errors::CoreError;
use crate::models::chart::{ClosePoint, LookbackPeriod};

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_NAME: &str = "Alpha Vantage";

/// Alpha Vantage chart provider, the fallback when Yahoo Finance fails.
///
/// - **Free tier**: 25 requests/day (across ALL endpoints).
/// - **Requires**: API key (set via settings as "alphavantage").
/// - **Data**: `TIME_SERIES_DAILY` compact output, i.e. the last 100
///   trading days, which covers every supported lookback window.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
        }
    }

    /// Keep the closes inside `[from, to]`, sorted by date.
    /// Entries with unparseable dates or prices are skipped.
    pub fn closes_in_window(
        series: &HashMap<String, DailyData>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<ClosePoint> {
        let mut points: Vec<ClosePoint> = series
            .iter()
            .filter_map(|(date_str, data)| {
                let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;
                if date < from || date > to {
                    return None;
                }
                let close: f64 = data.close.parse().ok()?;
                Some(ClosePoint { date, close })
            })
            .collect();
        points.sort_by_key(|p| p.date);
        points
    }
}

// ── Alpha Vantage API response types ────────────────────────────────

#[derive(Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyData>>,

    /// Present instead of data when the daily quota is exhausted.
    #[serde(rename = "Note", alias = "Information")]
    note: Option<String>,
}

/// One day of a `TIME_SERIES_DAILY` response. Only the close is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyData {
    #[serde(rename = "4. close")]
    pub close: String,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChartDataProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_daily_closes(
        &self,
        symbol: &str,
        lookback: LookbackPeriod,
    ) -> Result<Vec<ClosePoint>, CoreError> {
        let resp: TimeSeriesResponse = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", &symbol.to_uppercase()),
                ("outputsize", "compact"),
                ("apikey", &self.api_key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to parse time series for {symbol}: {e}"),
            })?;

        let series = match (resp.time_series, resp.note) {
            (Some(series), _) => series,
            (None, Some(note)) => {
                return Err(CoreError::Api {
                    provider: PROVIDER_NAME.into(),
                    message: note,
                })
            }
            (None, None) => {
                return Err(CoreError::Api {
                    provider: PROVIDER_NAME.into(),
                    message: format!("No time series data for {symbol}"),
                })
            }
        };

        let today = chrono::Utc::now().date_naive();
        Ok(Self::closes_in_window(&series, lookback.start_date(today), today))
    }
}
