use crate::models::{deserialize_f64_opt, Observation};
use crate::numeric::round2;
use crate::retry::retry_fetch_operation;
use crate::sources::{PriceSource, SourceError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;

const DAILY_CANDLE_RANGE: &str = "5d";
const LIVE_QUOTE_RANGE: &str = "1d";
const CHART_INTERVAL: &str = "1d";

/// Shared client for the Yahoo Finance chart endpoint, which backs both the
/// daily-candle and the live-quote sources.
pub struct YahooChartClient {
    http: Client,
    base_url: String,
}

impl YahooChartClient {
    pub fn new(http: Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    async fn fetch_chart(&self, symbol: &str, range: &str) -> Result<ChartResult, SourceError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let response = self
            .http
            .get(&url)
            .query(&[("range", range), ("interval", CHART_INTERVAL)])
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited);
        }
        let response = response.error_for_status()?;
        let payload: ChartResponse = response.json().await?;

        payload
            .chart
            .and_then(|chart| chart.result)
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or_else(|| SourceError::Malformed(format!("no chart result for {}", symbol)))
    }
}

/// Fetches a short window of daily closes and reports the two most recent as
/// (price, previous price). A single valid close yields a price-only
/// observation; the resolver fills the baseline elsewhere.
pub struct DailyCandleSource {
    client: Arc<YahooChartClient>,
}

impl DailyCandleSource {
    pub fn new(client: Arc<YahooChartClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PriceSource for DailyCandleSource {
    fn name(&self) -> &'static str {
        "daily candle"
    }

    async fn observe(&self, symbol: &str) -> Result<Observation, SourceError> {
        let result = retry_fetch_operation!(
            format!("daily candle fetch for {}", symbol),
            self.client.fetch_chart(symbol, DAILY_CANDLE_RANGE)
        )?;

        let closes = result.valid_closes();
        let price = closes.last().copied().and_then(round2);
        let previous_price = if closes.len() > 1 {
            round2(closes[closes.len() - 2])
        } else {
            None
        };

        Ok(Observation {
            price,
            previous_price,
            pct_change: None,
        })
    }
}

/// Reads the current trade price and the prior session close from the chart
/// metadata. Either field may be independently absent.
pub struct LiveQuoteSource {
    client: Arc<YahooChartClient>,
}

impl LiveQuoteSource {
    pub fn new(client: Arc<YahooChartClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PriceSource for LiveQuoteSource {
    fn name(&self) -> &'static str {
        "live quote"
    }

    async fn observe(&self, symbol: &str) -> Result<Observation, SourceError> {
        let result = retry_fetch_operation!(
            format!("live quote fetch for {}", symbol),
            self.client.fetch_chart(symbol, LIVE_QUOTE_RANGE)
        )?;

        let meta = result.meta.unwrap_or_default();
        Ok(Observation {
            price: meta.regular_market_price.and_then(round2),
            previous_price: meta
                .previous_close
                .or(meta.chart_previous_close)
                .and_then(round2),
            pct_change: None,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    #[serde(default)]
    chart: Option<ChartEnvelope>,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: Option<ChartMeta>,
    #[serde(default)]
    indicators: Option<ChartIndicators>,
}

impl ChartResult {
    fn valid_closes(&self) -> Vec<f64> {
        self.indicators
            .as_ref()
            .and_then(|indicators| indicators.quote.first())
            .map(|quote| {
                quote
                    .close
                    .iter()
                    .filter_map(|close| *close)
                    .filter(|close| close.is_finite())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(
        rename = "regularMarketPrice",
        default,
        deserialize_with = "deserialize_f64_opt"
    )]
    regular_market_price: Option<f64>,
    #[serde(
        rename = "previousClose",
        default,
        deserialize_with = "deserialize_f64_opt"
    )]
    previous_close: Option<f64>,
    #[serde(
        rename = "chartPreviousClose",
        default,
        deserialize_with = "deserialize_f64_opt"
    )]
    chart_previous_close: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct ChartQuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_result_drops_null_closes() {
        let payload = r#"{
            "chart": {
                "result": [{
                    "meta": {"regularMarketPrice": 84.0, "previousClose": 80.0},
                    "indicators": {"quote": [{"close": [82.5, null, 83.119, 84.004]}]}
                }]
            }
        }"#;
        let response: ChartResponse = serde_json::from_str(payload).unwrap();
        let result = response.chart.unwrap().result.unwrap().remove(0);

        assert_eq!(result.valid_closes(), vec![82.5, 83.119, 84.004]);
        let meta = result.meta.unwrap();
        assert_eq!(meta.regular_market_price, Some(84.0));
        assert_eq!(meta.previous_close, Some(80.0));
    }

    #[test]
    fn missing_indicators_yield_no_closes() {
        let payload = r#"{"chart": {"result": [{"meta": {}}]}}"#;
        let response: ChartResponse = serde_json::from_str(payload).unwrap();
        let result = response.chart.unwrap().result.unwrap().remove(0);
        assert!(result.valid_closes().is_empty());
    }
}
