use crate::assembler;
use crate::config::{AppConfig, REQUEST_TIMEOUT};
use crate::sources::build_http_client;
use crate::store::FileSnapshotStore;
use anyhow::Result;

/// Resolves the commodity quotes and prints them to stdout without touching
/// the persisted snapshot.
pub async fn run(config: &AppConfig) -> Result<()> {
    let store = FileSnapshotStore::new(&config.output_path);
    let http = build_http_client(REQUEST_TIMEOUT)?;
    let quotes = assembler::resolve_commodities(config, &store, &http).await;
    println!("{}", serde_json::to_string_pretty(&quotes)?);
    Ok(())
}
