//! Configuration Module
//!
//! Handles loading and managing store configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Store configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults,
/// or set directly when embedding the store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit snapshot file path; when None, an unused path is probed
    /// under `data_dir` at open time
    pub snapshot_path: Option<PathBuf>,
    /// Directory used when probing for a fresh snapshot path
    pub data_dir: PathBuf,
    /// Background expiry sweep interval in seconds
    pub sweep_interval_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SNAPSHOT_PATH` - Explicit snapshot file path (default: probed)
    /// - `DATA_DIR` - Directory for probed snapshot paths (default: OS temp dir)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            snapshot_path: env::var("SNAPSHOT_PATH").ok().map(PathBuf::from),
            data_dir: env::var("DATA_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            sweep_interval_secs: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }

    /// Returns a Config pointing at an explicit snapshot file.
    pub fn with_snapshot_path(path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: Some(path.into()),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            data_dir: env::temp_dir(),
            sweep_interval_secs: 1,
        }
    }
}
