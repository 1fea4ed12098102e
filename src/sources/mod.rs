pub mod trading_economics;
pub mod yahoo;

use crate::config::AppConfig;
use crate::models::Observation;
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use trading_economics::CommoditiesIndexSource;
use yahoo::{DailyCandleSource, LiveQuoteSource, YahooChartClient};

/// Every variant is a recoverable "source unavailable" outcome: the resolver
/// logs it and moves on to the next source in the chain.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rate limit exceeded")]
    RateLimited,
}

/// A single upstream price feed. Calls are independent and side-effect-free.
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn observe(&self, symbol: &str) -> Result<Observation, SourceError>;
}

/// Vocabulary for the per-commodity priority chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    DailyCandle,
    LiveQuote,
    CommoditiesIndex,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::DailyCandle => "daily candle",
            SourceKind::LiveQuote => "live quote",
            SourceKind::CommoditiesIndex => "commodities index",
        }
    }
}

/// The sources actually available this run. A chain entry with no registered
/// source (the commodities index without a credential) is skipped, not an
/// error.
#[derive(Default)]
pub struct SourceRegistry {
    sources: HashMap<SourceKind, Box<dyn PriceSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: SourceKind, source: Box<dyn PriceSource>) {
        self.sources.insert(kind, source);
    }

    pub fn get(&self, kind: SourceKind) -> Option<&dyn PriceSource> {
        self.sources.get(&kind).map(|source| &**source)
    }

    pub fn from_config(config: &AppConfig, http: &Client) -> Self {
        let mut registry = Self::new();

        let yahoo = Arc::new(YahooChartClient::new(
            http.clone(),
            config.yahoo_base_url.clone(),
        ));
        registry.register(
            SourceKind::DailyCandle,
            Box::new(DailyCandleSource::new(Arc::clone(&yahoo))),
        );
        registry.register(SourceKind::LiveQuote, Box::new(LiveQuoteSource::new(yahoo)));

        match config.te_api_key.as_deref() {
            Some(key) => {
                registry.register(
                    SourceKind::CommoditiesIndex,
                    Box::new(CommoditiesIndexSource::new(
                        http.clone(),
                        config.te_base_url.clone(),
                        key.to_string(),
                    )),
                );
                info!("TradingEconomics commodities index source enabled");
            }
            None => {
                info!("TE_KEY not set; commodities index source not applicable this run");
            }
        }

        registry
    }
}

pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("milticker/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")
}
