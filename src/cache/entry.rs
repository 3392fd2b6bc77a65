//! Cache Entry Module
//!
//! Absolute expiration instants stored in the expiry index.

use std::time::{Duration, Instant};

/// Fallback horizon when `now + ttl` overflows `Instant` (~30 years).
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

// == Deadline ==
/// Absolute instant at which an entry stops being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline {
    /// Expiration instant
    pub expires_at: Instant,
}

impl Deadline {
    // == Constructor ==
    /// Deadline `ttl` after `now`.
    ///
    /// TTLs too large for the platform clock are clamped to a far-future
    /// deadline instead of overflowing.
    pub fn after(now: Instant, ttl: Duration) -> Self {
        let expires_at = now
            .checked_add(ttl)
            .or_else(|| now.checked_add(FAR_FUTURE))
            .unwrap_or(now);
        Self { expires_at }
    }

    // == Is Expired ==
    /// Checks whether the deadline has passed at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so a
    /// zero TTL is expired immediately.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_not_expired_before_ttl() {
        let now = Instant::now();
        let deadline = Deadline::after(now, Duration::from_secs(60));

        assert!(!deadline.is_expired_at(now));
        assert_eq!(deadline.remaining_at(now), Duration::from_secs(60));
    }

    #[test]
    fn test_deadline_expired_after_ttl() {
        let now = Instant::now();
        let deadline = Deadline::after(now, Duration::from_millis(100));

        assert!(deadline.is_expired_at(now + Duration::from_millis(150)));
        assert_eq!(
            deadline.remaining_at(now + Duration::from_millis(150)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let deadline = Deadline::after(now, Duration::from_millis(100));

        // Expired exactly at the deadline
        assert!(deadline.is_expired_at(now + Duration::from_millis(100)));
        assert!(!deadline.is_expired_at(now + Duration::from_millis(99)));
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let now = Instant::now();
        let deadline = Deadline::after(now, Duration::ZERO);
        assert!(deadline.is_expired_at(now));
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let now = Instant::now();
        let deadline = Deadline::after(now, Duration::MAX);

        assert!(deadline.expires_at > now);
        assert!(!deadline.is_expired_at(now + Duration::from_secs(3600)));
    }
}
