//! Time-windowed memoization of whole HTTP responses.
//!
//! Built once at startup and handed to the HTTP layer by value (it is a
//! cheap clone around shared state). Entries expire on a fixed
//! time-to-live and are never invalidated by hand; error responses are
//! cached exactly like successes, so a flapping upstream is asked again at
//! most once per window. Concurrent misses for the same key may race and
//! each compute; the contract is only that a stored entry is served as-is
//! until it expires.

use axum::body::Bytes;
use axum::http::StatusCode;
use moka::future::Cache;
use std::time::Duration;

/// The replayable part of a response: status and body bytes. Headers are
/// reapplied by the layers wrapping the cache.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

#[derive(Clone)]
pub struct ResponseCache {
    entries: Cache<String, CachedResponse>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Cache::builder().time_to_live(ttl).build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<CachedResponse> {
        self.entries.get(key).await
    }

    pub async fn insert(&self, key: String, response: CachedResponse) {
        self.entries.insert(key, response).await;
    }
}
