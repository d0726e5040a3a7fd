//! ttlstore - An embeddable TTL key-value store for JSON payloads
//!
//! Entries are created under short string keys with an expiry horizon, read
//! back until they expire, and periodically snapshotted to a flat file so
//! state survives a restart.

pub mod config;
mod data_store;
pub mod error;
pub mod persist;
pub mod store;
pub mod tasks;

pub use config::Config;
pub use data_store::DataStore;
pub use error::{Result, StoreError};
