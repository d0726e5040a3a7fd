//! Store Module
//!
//! Provides the in-memory entry map with TTL expiry and the validation gate.

mod entry;
mod store;
pub mod validate;


// Re-export public types
pub use entry::Entry;
pub use store::EntryStore;

// == Public Constants ==
/// Maximum allowed key length in characters
pub const MAX_KEY_LENGTH: usize = 32;

/// Maximum allowed payload size in encoded bytes
pub const MAX_VALUE_SIZE: usize = 16 * 1024;
