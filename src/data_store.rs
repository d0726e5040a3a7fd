//! Data Store Module
//!
//! The public async handle tying the entry store, expiry sweeper, and
//! snapshot persistence together.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::persist::{self, SnapshotRecord};
use crate::store::EntryStore;
use crate::tasks::{spawn_sweeper, SweeperHandle};

// == Data Store ==
/// An embeddable TTL key-value store for JSON payloads.
///
/// Opening a store loads the snapshot at its path (if any) and starts the
/// background expiry sweeper; [`shutdown`] stops the sweeper cooperatively.
/// Every operation goes through one `RwLock` shared with the sweeper, so
/// the existence-check-and-insert in [`create`] is a single atomic step and
/// no reader ever observes partial state.
///
/// [`create`]: DataStore::create
/// [`shutdown`]: DataStore::shutdown
#[derive(Debug)]
pub struct DataStore {
    entries: Arc<RwLock<EntryStore>>,
    path: PathBuf,
    skipped_records: usize,
    sweeper: SweeperHandle,
}

impl DataStore {
    // == Open ==
    /// Opens a store per the given configuration.
    ///
    /// Resolves the snapshot path (probing for an unused one when none is
    /// configured), loads any existing snapshot with each entry's original
    /// absolute expiry intact, and spawns the sweeper.
    pub async fn open(config: Config) -> Result<Self> {
        let path = match config.snapshot_path {
            Some(path) => {
                // create(true) without truncate keeps an existing snapshot
                // intact while ensuring the file exists
                tokio::fs::OpenOptions::new()
                    .write(true)
                    .create(true)
                    .open(&path)
                    .await?;
                path
            }
            None => persist::claim_unused_path(&config.data_dir).await?,
        };

        let report = persist::load(&path).await?;
        if report.skipped > 0 {
            warn!(
                "Snapshot at {} had {} corrupt records, loading without them",
                path.display(),
                report.skipped
            );
        }
        let mut store = EntryStore::new();
        store.absorb(report.entries);
        info!(
            "Store opened at {} with {} entries",
            path.display(),
            store.len()
        );

        let entries = Arc::new(RwLock::new(store));
        let sweeper = spawn_sweeper(
            entries.clone(),
            Duration::from_secs(config.sweep_interval_secs.max(1)),
        );

        Ok(Self {
            entries,
            path,
            skipped_records: report.skipped,
            sweeper,
        })
    }

    // == Create ==
    /// Stores a JSON payload under a key, expiring `ttl_seconds` from now.
    ///
    /// Returns `Ok(false)` without modification when the key already holds a
    /// live entry; validation failures surface as typed errors.
    pub async fn create(&self, key: &str, payload: &str, ttl_seconds: u64) -> Result<bool> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), payload.to_string(), ttl_seconds)
    }

    // == Read ==
    /// Retrieves the payload stored under a key.
    ///
    /// An entry whose expiry has passed reads as `NotFound` even before the
    /// sweeper removes it.
    pub async fn read(&self, key: &str) -> Result<String> {
        self.entries.read().await.get(key).map(str::to_string)
    }

    // == Delete ==
    /// Removes the entry under a key. Returns false if the key was absent.
    pub async fn delete(&self, key: &str) -> bool {
        self.entries.write().await.remove(key)
    }

    // == Commit ==
    /// Persists a consistent point-in-time snapshot to the store's path.
    ///
    /// Records are collected under a brief read lock; file I/O runs with the
    /// lock released, so foreground operations are never blocked on disk. A
    /// failed commit leaves the in-memory store untouched.
    pub async fn commit(&self) -> Result<()> {
        let records: Vec<SnapshotRecord> = {
            let guard = self.entries.read().await;
            guard
                .iter()
                .map(|(key, entry)| SnapshotRecord::from_entry(key, entry))
                .collect()
        };

        persist::commit(&self.path, &records).await
    }

    // == Shutdown ==
    /// Stops the expiry sweeper cooperatively, waiting (bounded) for its
    /// in-flight pass to finish. The store is consumed; commit first if the
    /// latest state should survive.
    pub async fn shutdown(self) {
        self.sweeper.stop().await;
        info!("Store at {} shut down", self.path.display());
    }

    // == Accessors ==
    /// The snapshot path this store commits to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of corrupt snapshot records skipped while this store loaded.
    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }

    /// Current number of entries, including not-yet-swept expired ones.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
