//! Store Entry Module
//!
//! Defines the structure for individual store entries with TTL support.

use chrono::{DateTime, TimeDelta, Utc};

// == Entry ==
/// Represents a single store entry: a JSON payload with an absolute expiry.
///
/// The expiry is fixed at creation and never changes; there is no update
/// operation, only delete-then-recreate.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The stored JSON payload
    pub payload: String,
    /// Absolute expiration timestamp
    pub expires_at: DateTime<Utc>,
}

impl Entry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl_seconds` from now.
    pub fn new(payload: String, ttl_seconds: u64) -> Self {
        let ttl = TimeDelta::try_seconds(i64::try_from(ttl_seconds).unwrap_or(i64::MAX))
            .unwrap_or(TimeDelta::MAX);
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            payload,
            expires_at,
        }
    }

    /// Creates an entry with an already-known absolute expiry, as when
    /// reconstructing from a snapshot.
    pub fn with_expiry(payload: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            payload,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is considered expired when the current
    /// time is greater than or equal to the expiration time, so once the TTL
    /// duration has fully elapsed the entry is immediately expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL, clamped to zero once expired.
    pub fn ttl_remaining(&self) -> TimeDelta {
        (self.expires_at - Utc::now()).max(TimeDelta::zero())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_entry_creation() {
        let entry = Entry::new("{\"v\":1}".to_string(), 60);

        assert_eq!(entry.payload, "{\"v\":1}");
        assert!(!entry.is_expired());
        assert!(entry.expires_at > Utc::now());
    }

    #[test]
    fn test_entry_expiration() {
        // Create entry with 1 second TTL
        let entry = Entry::new("{}".to_string(), 1);

        assert!(!entry.is_expired());

        // Wait for expiration
        sleep(Duration::from_millis(1100));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_entry_huge_ttl_does_not_overflow() {
        let entry = Entry::new("{}".to_string(), u64::MAX);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = Entry::new("{}".to_string(), 10);

        let remaining = entry.ttl_remaining();
        assert!(remaining <= TimeDelta::seconds(10));
        assert!(remaining >= TimeDelta::seconds(9));
    }

    #[test]
    fn test_ttl_remaining_expired_is_zero() {
        let entry = Entry::with_expiry("{}".to_string(), Utc::now() - TimeDelta::seconds(5));

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), TimeDelta::zero());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        // Expires exactly now: current time >= expires_at means expired
        let entry = Entry::with_expiry("{}".to_string(), Utc::now());
        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }

    #[test]
    fn test_with_expiry_preserves_absolute_timestamp() {
        let expiry = Utc::now() + TimeDelta::seconds(120);
        let entry = Entry::with_expiry("{\"k\":true}".to_string(), expiry);

        assert_eq!(entry.expires_at, expiry);
        assert!(!entry.is_expired());
    }
}
