//! Snapshot Persistence Module
//!
//! Serializes the store to a flat file, one serde_json record per line, and
//! reconstructs it at startup. Writes go to a temporary sibling file that is
//! atomically renamed over the target, so a crash mid-write never leaves a
//! truncated snapshot in place.
//!
//! Malformed-line policy on load: skip and continue. Each unparsable line is
//! logged at `warn` with its line number and counted; the load itself
//! succeeds. See DESIGN.md.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::store::Entry;

// == Snapshot Record ==
/// One persisted entry: a single JSON object per line.
///
/// The structured per-line encoding means payloads containing any delimiter
/// character, quotes, or escaped newlines round-trip unchanged.
#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub key: String,
    pub payload: String,
    /// Absolute expiry, serialized as an RFC 3339 / ISO-8601 timestamp
    pub expires_at: DateTime<Utc>,
}

impl SnapshotRecord {
    pub fn from_entry(key: &str, entry: &Entry) -> Self {
        Self {
            key: key.to_string(),
            payload: entry.payload.clone(),
            expires_at: entry.expires_at,
        }
    }
}

// == Load Report ==
/// Outcome of loading a snapshot: the reconstructed entries plus how many
/// corrupt lines were skipped.
#[derive(Debug)]
pub struct LoadReport {
    pub entries: Vec<(String, Entry)>,
    pub skipped: usize,
}

// == Load ==
/// Reads a snapshot file into entries, preserving each entry's original
/// absolute expiry so downtime counts against the TTL.
///
/// An absent file yields an empty store; any other I/O failure is returned
/// to the caller.
pub async fn load(path: &Path) -> Result<LoadReport> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(LoadReport {
                entries: Vec::new(),
                skipped: 0,
            })
        }
        Err(e) => return Err(e.into()),
    };

    let mut entries = Vec::new();
    let mut skipped = 0;

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<SnapshotRecord>(line) {
            Ok(record) => {
                entries.push((
                    record.key,
                    Entry::with_expiry(record.payload, record.expires_at),
                ));
            }
            Err(e) => {
                let err = StoreError::CorruptRecord {
                    line: index + 1,
                    reason: e.to_string(),
                };
                warn!("Skipping corrupt snapshot record: {}", err);
                skipped += 1;
            }
        }
    }

    info!(
        "Loaded {} entries from {} ({} corrupt lines skipped)",
        entries.len(),
        path.display(),
        skipped
    );

    Ok(LoadReport { entries, skipped })
}

// == Commit ==
/// Writes a snapshot of the given records to `path`.
///
/// The records are serialized to `<name>.tmp` in the same directory and the
/// temporary file is renamed over the target, which is atomic on the
/// filesystems the store targets.
pub async fn commit(path: &Path, records: &[SnapshotRecord]) -> Result<()> {
    let mut buf = String::new();
    for record in records {
        // String-field serialization cannot fail, but the contract is Result
        let line = serde_json::to_string(record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        buf.push_str(&line);
        buf.push('\n');
    }

    let tmp = tmp_path(path);
    tokio::fs::write(&tmp, buf.as_bytes()).await?;
    tokio::fs::rename(&tmp, path).await?;

    info!("Committed {} entries to {}", records.len(), path.display());
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

// == Path Probing ==
/// Claims a fresh snapshot path under `dir` by probing an index suffix
/// until a name can be created new.
///
/// `create_new` makes probing safe against a concurrently opening store:
/// only one claimant can win each index, and the loser moves on to the
/// next one.
pub async fn claim_unused_path(dir: &Path) -> Result<PathBuf> {
    let mut index = 0;
    loop {
        let candidate = dir.join(format!("data_store{index}.txt"));
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await
        {
            Ok(_) => return Ok(candidate),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => index += 1,
            Err(e) => return Err(e.into()),
        }
    }
}
