use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::chart::{ChartSeries, LookbackPeriod};
use crate::providers::registry::ProviderRegistry;

/// Fetches chart-ready closing prices with provider fallback.
///
/// Providers are tried in registration order. A provider that errors or
/// returns no points is skipped; the first non-empty series wins. There is
/// no retry: when every provider fails the caller gets `DataUnavailable`
/// and the user may reopen the chart to try again.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    pub async fn fetch_daily_closes(
        &self,
        registry: &ProviderRegistry,
        symbol: &str,
        lookback: LookbackPeriod,
    ) -> Result<ChartSeries, CoreError> {
        let providers = registry.chart_providers();
        if providers.is_empty() {
            return Err(CoreError::DataUnavailable {
                symbol: symbol.to_string(),
                message: "no chart provider configured".into(),
            });
        }

        let mut last_error: Option<String> = None;

        for provider in &providers {
            match provider.fetch_daily_closes(symbol, lookback).await {
                Ok(mut points) if !points.is_empty() => {
                    points.sort_by_key(|p| p.date);
                    debug!(
                        "event=chart_fetch module=chart status=ok symbol={symbol} provider={} points={}",
                        provider.name(),
                        points.len()
                    );
                    return Ok(ChartSeries {
                        symbol: symbol.to_string(),
                        lookback,
                        source: provider.name().to_string(),
                        points,
                    });
                }
                Ok(_) => {
                    warn!(
                        "event=chart_fetch module=chart status=empty symbol={symbol} provider={}",
                        provider.name()
                    );
                    last_error = Some(format!(
                        "{} returned no data, possibly an invalid symbol",
                        provider.name()
                    ));
                }
                Err(e) => {
                    warn!(
                        "event=chart_fetch module=chart status=error symbol={symbol} provider={} error={e}",
                        provider.name()
                    );
                    last_error = Some(e.to_string());
                    // Try next provider
                }
            }
        }

        Err(CoreError::DataUnavailable {
            symbol: symbol.to_string(),
            message: last_error.unwrap_or_else(|| "no data returned".into()),
        })
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
