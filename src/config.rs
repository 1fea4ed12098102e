use std::env;
use std::path::PathBuf;
use std::time::Duration;

const TE_KEY_ENV: &str = "TE_KEY";
const OUTPUT_PATH_ENV: &str = "MILTICKER_OUTPUT";
const YAHOO_BASE_URL_ENV: &str = "YAHOO_BASE_URL";
const TE_BASE_URL_ENV: &str = "TE_BASE_URL";
const CONTRACTS_FEED_URL_ENV: &str = "CONTRACTS_FEED_URL";

const DEFAULT_OUTPUT_PATH: &str = "public/data.json";
const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
const DEFAULT_TE_BASE_URL: &str = "https://api.tradingeconomics.com";
const DEFAULT_CONTRACTS_FEED_URL: &str =
    "https://www.defense.gov/DesktopModules/ArticleCS/RSS.ashx?ContentType=400&Site=727&max=10";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Runtime configuration, read once from the environment. The only credential
/// is the TradingEconomics key; leaving it unset simply disables that source.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub te_api_key: Option<String>,
    pub output_path: PathBuf,
    pub yahoo_base_url: String,
    pub te_base_url: String,
    pub contracts_feed_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            te_api_key: env_value(TE_KEY_ENV),
            output_path: env_value(OUTPUT_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            yahoo_base_url: base_url(YAHOO_BASE_URL_ENV, DEFAULT_YAHOO_BASE_URL),
            te_base_url: base_url(TE_BASE_URL_ENV, DEFAULT_TE_BASE_URL),
            contracts_feed_url: env_value(CONTRACTS_FEED_URL_ENV)
                .unwrap_or_else(|| DEFAULT_CONTRACTS_FEED_URL.to_string()),
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn base_url(key: &str, default: &str) -> String {
    env_value(key)
        .map(|value| value.trim_end_matches('/').to_string())
        .unwrap_or_else(|| default.to_string())
}
