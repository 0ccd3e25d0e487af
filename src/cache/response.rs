//! In-memory answer cache with per-entry expiry.
//!
//! [`ResponseCache`] maps normalized question text to a generated answer
//! with an absolute expiry deadline. It sits in
//! [`QaEngine`](crate::engine::QaEngine) above the retrieval/generation
//! path: a hit bypasses both collaborators, and the saved cost is recorded
//! by the [`CostLedger`](crate::cost::CostLedger).
//!
//! # Expiry model
//!
//! Expiry is lazy: an entry past its deadline is evicted by the `get` that
//! observes it. There is no background sweep thread — the cache stays a
//! pure data structure, at the cost of stale entries lingering in
//! [`CacheStats::cached_items`] until touched. Acceptable for a
//! session-scoped cache; a periodic sweep could be added without changing
//! the contract if key cardinality ever demands it.
//!
//! # Concurrency
//!
//! One mutex guards the entry map and the hit/miss counters together, so
//! every operation is atomic with respect to both: no torn reads, no lost
//! counter increments. No operation blocks on I/O or suspends — the only
//! blocking in the request path is the external generation call, which
//! happens *outside* the lock. Two concurrent misses for the same question
//! can therefore both reach generation and both `set`; the second write
//! wins and bookkeeping stays consistent.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::telemetry;
use crate::types::Usage;

use super::key::cache_key;

/// Configuration for the response cache.
///
/// ```rust
/// # use premia::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new().ttl(Duration::from_secs(600));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Time-to-live for cached entries. Default: 5 minutes.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// The cached value: a generated answer plus the token usage of the call
/// that produced it.
///
/// Keeping the usage lets a later cache hit record what the request *would*
/// have cost, which is what makes the ledger's savings column meaningful.
#[derive(Debug, Clone)]
pub struct CachedAnswer {
    pub answer: String,
    pub usage: Usage,
}

impl CachedAnswer {
    pub fn new(answer: impl Into<String>, usage: Usage) -> Self {
        Self {
            answer: answer.into(),
            usage,
        }
    }
}

/// A stored entry. `question` is the original (un-normalized) text,
/// retained for diagnostics only.
#[derive(Debug)]
struct CacheEntry {
    question: String,
    value: CachedAnswer,
    cached_at: Instant,
    expires_at: Instant,
}

/// Point-in-time cache statistics.
///
/// A value snapshot, not a live view. `cached_items` is the raw map size
/// and still counts entries that are logically expired but not yet
/// evicted — an intentional simplification of the lazy-expiry model.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CacheStats {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Hit rate in percent, rounded to 2 decimals. Zero when no requests
    /// have been recorded.
    pub hit_rate_percent: f64,
    pub cached_items: usize,
}

struct Inner {
    entries: HashMap<String, CacheEntry>,
    hits: u64,
    misses: u64,
}

/// In-memory answer cache keyed on normalized question text.
///
/// All methods take `&self`; share one instance across request handlers
/// (typically behind an `Arc`, as [`QaEngine`](crate::engine::QaEngine)
/// does). See module docs for the expiry and concurrency model.
pub struct ResponseCache {
    inner: Mutex<Inner>,
    default_ttl: Duration,
}

impl ResponseCache {
    /// Create a new response cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                hits: 0,
                misses: 0,
            }),
            default_ttl: config.ttl,
        }
    }

    // The guarded state is plain counters and owned entries; a panic while
    // holding the lock cannot leave it torn, so poisoning is recoverable.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a cached answer.
    ///
    /// Returns `None` on miss. A miss is a normal outcome, never an error:
    /// either no entry exists, or the entry expired — in which case this
    /// lookup evicts it. Hit/miss counters and metrics are updated either
    /// way.
    pub fn get(&self, question: &str) -> Option<CachedAnswer> {
        let key = cache_key(question);
        let now = Instant::now();
        let mut inner = self.lock();

        if let Some(entry) = inner.entries.get(&key) {
            if now < entry.expires_at {
                let value = entry.value.clone();
                inner.hits += 1;
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                tracing::debug!(question, "response cache hit");
                return Some(value);
            }
            // Expired: evict on the lookup that observes it.
            let age = now.duration_since(entry.cached_at);
            tracing::debug!(question = %entry.question, age_secs = age.as_secs(), "evicting expired entry");
            inner.entries.remove(&key);
        }

        inner.misses += 1;
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
        tracing::debug!(question, "response cache miss");
        None
    }

    /// Cache an answer under the configured default TTL.
    ///
    /// Unconditionally overwrites any prior entry for the same normalized
    /// question — no merge, no version check (last write wins).
    pub fn set(&self, question: &str, answer: CachedAnswer) {
        self.set_with_ttl(question, answer, self.default_ttl);
    }

    /// Cache an answer with an explicit TTL.
    pub fn set_with_ttl(&self, question: &str, answer: CachedAnswer, ttl: Duration) {
        let key = cache_key(question);
        let now = Instant::now();
        let entry = CacheEntry {
            question: question.to_string(),
            value: answer,
            cached_at: now,
            expires_at: now + ttl,
        };
        self.lock().entries.insert(key, entry);
    }

    /// Snapshot the current statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        let total = inner.hits + inner.misses;
        let hit_rate = if total > 0 {
            round2(inner.hits as f64 / total as f64 * 100.0)
        } else {
            0.0
        };
        CacheStats {
            total_requests: total,
            cache_hits: inner.hits,
            cache_misses: inner.misses,
            hit_rate_percent: hit_rate,
            cached_items: inner.entries.len(),
        }
    }

    /// Empty the cache and zero the hit/miss counters.
    ///
    /// A full reset, not just an eviction — after `clear()`, `stats()`
    /// reports the same values as a freshly constructed cache.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.hits = 0;
        inner.misses = 0;
        tracing::debug!("response cache cleared");
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

/// Round to 2 decimals at the reporting boundary; internal counters stay
/// full precision.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
