use crate::config::AppConfig;
use crate::contracts;
use crate::manual;
use crate::models::{CommodityQuote, Snapshot};
use crate::resolver::{tracked_commodities, Resolver};
use crate::sources::SourceRegistry;
use crate::store::{PersistedPriceIndex, SnapshotStore};
use chrono::Utc;
use futures::future::join_all;
use log::warn;
use reqwest::Client;

/// Resolves the fixed commodity list against whatever sources are configured.
/// Resolutions run concurrently; the configured order is the output order.
pub async fn resolve_commodities(
    config: &AppConfig,
    store: &dyn SnapshotStore,
    http: &Client,
) -> Vec<CommodityQuote> {
    let prices = PersistedPriceIndex::load(store);
    let registry = SourceRegistry::from_config(config, http);
    let resolver = Resolver::new(&registry, &prices);

    join_all(
        tracked_commodities()
            .iter()
            .map(|commodity| resolver.resolve(commodity)),
    )
    .await
}

/// Builds the complete snapshot: resolved commodities, scraped contract
/// awards plus the fixed anchors, the manual lists, and a generation stamp.
/// The previous snapshot (read through `store`) serves as the baseline
/// fallback, so persisting the result makes the pipeline self-healing.
pub async fn assemble(config: &AppConfig, store: &dyn SnapshotStore, http: &Client) -> Snapshot {
    let (commodities, scraped) = tokio::join!(
        resolve_commodities(config, store, http),
        contracts::fetch_contract_awards(http, &config.contracts_feed_url)
    );

    let mut contract_list = match scraped {
        Ok(awards) => awards,
        Err(err) => {
            warn!(
                "Contract feed unavailable ({:#}); continuing with anchor entries only",
                err
            );
            Vec::new()
        }
    };
    contract_list.extend(contracts::anchor_awards());

    Snapshot {
        commodities,
        contracts: contract_list,
        conflicts: manual::conflict_notes(),
        apparel: manual::apparel_notes(),
        generated_at: Utc::now().timestamp(),
    }
}
