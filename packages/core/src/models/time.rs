//! Edit clock
//!
//! Every structural edit stamps the nodes it touches with one operation-time
//! instant. Services read that instant from a [`TimeProvider`]; tests pin it
//! with `MockTimeProvider` so `created`/`last_modified` can be asserted exactly.
//!
//! # Examples
//!
//! ```rust
//! use quire_core::models::time::{TimeProvider, SystemTimeProvider};
//! use chrono::Utc;
//!
//! let stamp = SystemTimeProvider.now();
//! assert!(stamp <= Utc::now());
//! ```

use chrono::{DateTime, Utc};

/// Source of the instant an edit is stamped with
pub trait TimeProvider: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct MockTimeProvider {
    pinned: DateTime<Utc>,
}

#[cfg(test)]
impl MockTimeProvider {
    pub fn with_time(pinned: DateTime<Utc>) -> Self {
        Self { pinned }
    }

    /// Pin to an RFC 3339 stamp such as `2025-02-23T01:04:00Z`
    pub fn at(rfc3339: &str) -> Self {
        let pinned = DateTime::parse_from_rfc3339(rfc3339)
            .expect("valid RFC 3339 timestamp")
            .with_timezone(&Utc);
        Self::with_time(pinned)
    }
}

#[cfg(test)]
impl TimeProvider for MockTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        self.pinned
    }
}
