//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired store entries.
//!
//! Each pass is two-phase: expired keys are collected under the read lock,
//! then removed one at a time under short write-lock acquisitions with an
//! expiry re-check, so a full scan never holds the store locked for its
//! duration and a key recreated mid-sweep is never lost.
//!
//! Shutdown is cooperative: a watch signal observed between passes, with a
//! bounded wait for the in-flight pass to finish. The task is never aborted
//! mid-scan.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::store::EntryStore;

/// How long `stop` waits for the sweeper to finish its current pass.
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

// == Sweeper Handle ==
/// Handle to a running sweeper task. Dropping it without calling [`stop`]
/// leaves the task running for the lifetime of the runtime.
///
/// [`stop`]: SweeperHandle::stop
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals the sweeper to stop and waits for it to exit.
    ///
    /// The sweeper finishes its current pass before exiting; the wait is
    /// bounded so shutdown cannot hang on a stuck task.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        if tokio::time::timeout(STOP_TIMEOUT, self.handle).await.is_err() {
            warn!("Sweeper did not stop within {:?}", STOP_TIMEOUT);
        }
    }
}

// == Spawn ==
/// Spawns the background task that removes expired entries on a fixed
/// interval.
///
/// # Arguments
/// * `store` - Shared reference to the entry store
/// * `sweep_interval` - Time between sweep passes
pub fn spawn_sweeper(store: Arc<RwLock<EntryStore>>, sweep_interval: Duration) -> SweeperHandle {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        info!("Starting expiry sweeper with interval {:?}", sweep_interval);

        let mut ticker = tokio::time::interval(sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; skip it so a fresh store is not
        // swept before anything can expire
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = sweep(&store).await;
                    if removed > 0 {
                        info!("Sweep removed {} expired entries", removed);
                    } else {
                        debug!("Sweep found no expired entries");
                    }
                }
                _ = shutdown_rx.changed() => {
                    info!("Expiry sweeper stopping");
                    break;
                }
            }
        }
    });

    SweeperHandle {
        shutdown_tx,
        handle,
    }
}

// == Sweep ==
/// Runs one sweep pass over the store, returning the number of entries
/// removed.
async fn sweep(store: &RwLock<EntryStore>) -> usize {
    // Phase one: scan under the read lock only
    let expired = store.read().await.expired_keys();

    // Phase two: per-key removal with an expiry re-check, so concurrent
    // creates and deletes on the same keys stay correct
    let mut removed = 0;
    for key in expired {
        if store.write().await.remove_if_expired(&key) {
            removed += 1;
        }
    }
    removed
}
