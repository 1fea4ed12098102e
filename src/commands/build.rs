use crate::assembler;
use crate::config::{AppConfig, REQUEST_TIMEOUT};
use crate::sources::build_http_client;
use crate::store::{FileSnapshotStore, SnapshotStore};
use anyhow::Result;
use log::info;
use std::path::Path;

pub async fn run(config: &AppConfig, output_path: &Path) -> Result<()> {
    info!("Building dashboard snapshot at {}", output_path.display());

    let store = FileSnapshotStore::new(output_path);
    let http = build_http_client(REQUEST_TIMEOUT)?;
    let snapshot = assembler::assemble(config, &store, &http).await;
    store.save(&snapshot)?;

    info!(
        "Snapshot written to {} ({} commodities, {} contracts)",
        output_path.display(),
        snapshot.commodities.len(),
        snapshot.contracts.len()
    );
    Ok(())
}
