use crate::models::{deserialize_f64_opt, Observation};
use crate::numeric::round2;
use crate::sources::{PriceSource, SourceError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Keyed TradingEconomics commodities aggregator. The "symbol" here is a set
/// of whitespace-separated match terms (e.g. "hrc steel") that must all occur
/// in a row's display name, case-insensitively.
///
/// Unlike the chart sources this upstream already computes the daily percent
/// change, so a hit produces a complete observation.
pub struct CommoditiesIndexSource {
    http: Client,
    base_url: String,
    api_key: String,
}

impl CommoditiesIndexSource {
    pub fn new(http: Client, base_url: String, api_key: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    async fn fetch_rows(&self) -> Result<Vec<CommodityRow>, SourceError> {
        let url = format!("{}/markets/commodities", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("c", self.api_key.as_str()), ("f", "json")])
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited);
        }
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl PriceSource for CommoditiesIndexSource {
    fn name(&self) -> &'static str {
        "commodities index"
    }

    async fn observe(&self, symbol: &str) -> Result<Observation, SourceError> {
        let terms: Vec<String> = symbol
            .split_whitespace()
            .map(|term| term.to_lowercase())
            .collect();
        if terms.is_empty() {
            return Err(SourceError::Malformed(
                "commodities index lookup requires match terms".to_string(),
            ));
        }

        let rows = self.fetch_rows().await?;
        for row in rows {
            let Some(last) = row.last else {
                continue;
            };
            if !row.matches(&terms) {
                continue;
            }
            return Ok(Observation {
                price: round2(last),
                previous_price: None,
                pct_change: round2(row.daily_percentual_change.unwrap_or(0.0)),
            });
        }

        Err(SourceError::NotFound(format!(
            "no commodities row matching \"{}\"",
            symbol
        )))
    }
}

#[derive(Debug, Deserialize)]
struct CommodityRow {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Last", default, deserialize_with = "deserialize_f64_opt")]
    last: Option<f64>,
    #[serde(
        rename = "DailyPercentualChange",
        default,
        deserialize_with = "deserialize_f64_opt"
    )]
    daily_percentual_change: Option<f64>,
}

impl CommodityRow {
    fn matches(&self, terms: &[String]) -> bool {
        let Some(name) = self.name.as_deref() else {
            return false;
        };
        let lower = name.to_lowercase();
        terms.iter().all(|term| lower.contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, last: Option<f64>, change: Option<f64>) -> CommodityRow {
        CommodityRow {
            name: Some(name.to_string()),
            last,
            daily_percentual_change: change,
        }
    }

    #[test]
    fn match_requires_every_term_case_insensitively() {
        let terms = vec!["hrc".to_string(), "steel".to_string()];
        assert!(row("HRC Steel USA", Some(830.0), None).matches(&terms));
        assert!(row("Steel HRC FOB China", Some(500.0), None).matches(&terms));
        assert!(!row("Steel Rebar", Some(600.0), None).matches(&terms));
        assert!(!CommodityRow {
            name: None,
            last: Some(1.0),
            daily_percentual_change: None
        }
        .matches(&terms));
    }

    #[test]
    fn rows_parse_from_upstream_field_names() {
        let payload = r#"[
            {"Name": "HRC Steel", "Last": "830.5", "DailyPercentualChange": 0.91},
            {"Name": "Crude Oil", "Last": null}
        ]"#;
        let rows: Vec<CommodityRow> = serde_json::from_str(payload).unwrap();
        assert_eq!(rows[0].last, Some(830.5));
        assert_eq!(rows[0].daily_percentual_change, Some(0.91));
        assert_eq!(rows[1].last, None);
    }
}
