//! Cookie store abstraction — a plain key-value string store with TTL.
//!
//! The browser binding forwards to `document.cookie`; [`MemoryCookieStore`]
//! backs tests and headless runs with a DashMap jar.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::debug;

/// Cookie lifetime, expressed the way callers configure it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    Days(u32),
    Minutes(u32),
}

impl Expiry {
    pub fn as_duration(self) -> Duration {
        match self {
            Expiry::Days(days) => Duration::days(i64::from(days)),
            Expiry::Minutes(minutes) => Duration::minutes(i64::from(minutes)),
        }
    }
}

/// Trait for reading and writing named cookies. Implementations bridge to
/// the host environment's cookie jar.
pub trait CookieStore: Send + Sync {
    /// Current value of the named cookie, if set and not expired.
    fn get(&self, name: &str) -> Option<String>;

    /// Set the named cookie, replacing any existing value.
    fn set(&self, name: &str, value: &str, expiry: Expiry);
}

struct StoredCookie {
    value: String,
    expires_at: DateTime<Utc>,
}

/// In-memory cookie jar; expired entries are dropped on read.
#[derive(Default)]
pub struct MemoryCookieStore {
    store: DashMap<String, StoredCookie>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        let entry = self.store.get(name)?;
        if entry.expires_at <= Utc::now() {
            drop(entry);
            self.store.remove(name);
            return None;
        }
        Some(entry.value.clone())
    }

    fn set(&self, name: &str, value: &str, expiry: Expiry) {
        debug!(cookie = %name, ?expiry, "cookie written");
        self.store.insert(
            name.to_string(),
            StoredCookie {
                value: value.to_string(),
                expires_at: Utc::now() + expiry.as_duration(),
            },
        );
    }
}
