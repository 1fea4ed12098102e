use crate::models::Snapshot;
use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Where snapshots are persisted between runs. Passed into the assembler
/// explicitly so tests can substitute an in-memory implementation.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Option<Snapshot>>;
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read snapshot from {}", self.path.display()))?;
        let snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse snapshot at {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory {}", parent.display())
                })?;
            }
        }
        let payload =
            serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot")?;
        fs::write(&self.path, payload)
            .with_context(|| format!("failed to write snapshot to {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store used by tests.
#[derive(Default)]
pub struct MemorySnapshotStore {
    inner: Mutex<Option<Snapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: Mutex::new(Some(snapshot)),
        }
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.inner.lock().unwrap().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        *self.inner.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }
}

/// Last-known prices recovered from the previous snapshot. Built once per run
/// and read-only afterwards; a missing or unreadable snapshot degrades to an
/// empty index, which the resolver treats the same as a first-ever run.
#[derive(Debug, Default)]
pub struct PersistedPriceIndex {
    prices: HashMap<String, f64>,
}

impl PersistedPriceIndex {
    pub fn load(store: &dyn SnapshotStore) -> Self {
        match store.load() {
            Ok(Some(snapshot)) => {
                let index = Self::from_snapshot(&snapshot);
                info!(
                    "Loaded {} last-known price(s) from the previous snapshot",
                    index.len()
                );
                index
            }
            Ok(None) => {
                info!("No previous snapshot found; price fallback index is empty");
                Self::default()
            }
            Err(err) => {
                warn!(
                    "Previous snapshot unreadable ({:#}); price fallback index is empty",
                    err
                );
                Self::default()
            }
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let prices = snapshot
            .commodities
            .iter()
            .filter(|quote| quote.price.is_finite())
            .map(|quote| (quote.name.clone(), quote.price))
            .collect();
        Self { prices }
    }

    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.prices.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
