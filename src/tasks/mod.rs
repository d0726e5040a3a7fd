//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of an open store.
//!
//! # Tasks
//! - Expiry sweeper: removes expired entries at a configured interval

mod sweeper;

pub use sweeper::{spawn_sweeper, SweeperHandle};
