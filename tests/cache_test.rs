//! Tests for [`ResponseCache`] — TTL answer cache with hit/miss accounting.

use std::time::Duration;

use premia::{CacheConfig, CachedAnswer, ResponseCache, Usage};

fn answer(text: &str) -> CachedAnswer {
    CachedAnswer::new(text, Usage::new(300, 50))
}

// =========================================================================
// CacheConfig
// =========================================================================

#[test]
fn cache_config_defaults() {
    let config = CacheConfig::default();
    assert_eq!(config.ttl, Duration::from_secs(300));
}

#[test]
fn cache_config_builder() {
    let config = CacheConfig::new().ttl(Duration::from_secs(60));
    assert_eq!(config.ttl, Duration::from_secs(60));
}

// =========================================================================
// Round trip and key equivalence
// =========================================================================

#[test]
fn cache_miss_returns_none() {
    let cache = ResponseCache::default();
    assert!(cache.get("never asked").is_none());
}

#[test]
fn set_then_get() {
    let cache = ResponseCache::default();
    cache.set("What is my deductible?", answer("$500 per incident."));

    let got = cache.get("What is my deductible?");
    assert!(got.is_some());
    assert_eq!(got.unwrap().answer, "$500 per incident.");
}

#[test]
fn whitespace_and_case_variants_share_an_entry() {
    let cache = ResponseCache::default();
    cache.set("What is my deductible?", answer("$500"));

    assert!(cache.get("  WHAT IS MY DEDUCTIBLE?  ").is_some());
    assert!(cache.get("what is my deductible?").is_some());
    // Both hits against the same entry.
    assert_eq!(cache.stats().cached_items, 1);
    assert_eq!(cache.stats().cache_hits, 2);
}

#[test]
fn different_questions_are_independent() {
    let cache = ResponseCache::default();
    cache.set("deductible?", answer("$500"));
    cache.set("file a claim?", answer("call 1-800-CLAIMS"));

    assert!(cache.get("deductible?").is_some());
    assert!(cache.get("file a claim?").is_some());
    assert!(cache.get("am I covered abroad?").is_none());
}

#[test]
fn overwrite_replaces_entry() {
    let cache = ResponseCache::default();
    cache.set("Q", answer("old"));
    cache.set("Q", answer("new"));

    assert_eq!(cache.get("Q").unwrap().answer, "new");
    assert_eq!(cache.stats().cached_items, 1);
}

// =========================================================================
// Expiry
// =========================================================================

#[test]
fn zero_ttl_expires_immediately() {
    let cache = ResponseCache::default();
    cache.set_with_ttl("Q", answer("A"), Duration::ZERO);

    assert!(cache.get("Q").is_none());
}

#[test]
fn expired_entry_is_evicted_by_the_observing_lookup() {
    let cache = ResponseCache::default();
    cache.set_with_ttl("Q", answer("A"), Duration::ZERO);

    // Stale entries stay counted until a lookup touches them.
    assert_eq!(cache.stats().cached_items, 1);

    assert!(cache.get("Q").is_none());
    assert_eq!(cache.stats().cached_items, 0);
}

#[test]
fn short_ttl_expiry_over_real_time() {
    let config = CacheConfig::new().ttl(Duration::from_millis(50));
    let cache = ResponseCache::new(&config);
    cache.set("Q", answer("A"));

    // Present immediately
    assert!(cache.get("Q").is_some());

    // Wait for TTL + some margin
    std::thread::sleep(Duration::from_millis(100));

    // Expired
    assert!(cache.get("Q").is_none());
}

#[test]
fn reset_after_expiry_creates_a_fresh_entry() {
    let cache = ResponseCache::default();
    cache.set_with_ttl("Q", answer("stale"), Duration::ZERO);
    assert!(cache.get("Q").is_none());

    cache.set("Q", answer("fresh"));
    assert_eq!(cache.get("Q").unwrap().answer, "fresh");
}

// =========================================================================
// Statistics
// =========================================================================

#[test]
fn hit_rate_arithmetic() {
    let cache = ResponseCache::default();

    // 2 misses, then 1 hit on the same key.
    assert!(cache.get("Q").is_none());
    assert!(cache.get("Q").is_none());
    cache.set("Q", answer("A"));
    assert!(cache.get("Q").is_some());

    let stats = cache.stats();
    assert_eq!(stats.total_requests, 3);
    assert_eq!(stats.cache_hits, 1);
    assert_eq!(stats.cache_misses, 2);
    assert_eq!(stats.hit_rate_percent, 33.33);
    assert_eq!(stats.cached_items, 1);
}

#[test]
fn stats_are_a_snapshot_not_a_view() {
    let cache = ResponseCache::default();
    let before = cache.stats();
    cache.get("Q");
    assert_eq!(before.total_requests, 0);
    assert_eq!(cache.stats().total_requests, 1);
}

#[test]
fn clear_is_idempotent() {
    let cache = ResponseCache::default();
    cache.set("Q", answer("A"));
    cache.get("Q");
    cache.get("missing");

    for _ in 0..2 {
        cache.clear();
        let stats = cache.stats();
        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.cache_hits, 0);
        assert_eq!(stats.cache_misses, 0);
        assert_eq!(stats.hit_rate_percent, 0.0);
        assert_eq!(stats.cached_items, 0);
    }
}

#[test]
fn stats_serialize_to_json() {
    let cache = ResponseCache::default();
    cache.get("Q");

    let json = serde_json::to_value(cache.stats()).unwrap();
    assert_eq!(json["total_requests"], 1);
    assert_eq!(json["cache_misses"], 1);
    assert_eq!(json["hit_rate_percent"], 0.0);
}

// =========================================================================
// Concurrency
// =========================================================================

#[test]
fn concurrent_gets_never_lose_counter_increments() {
    use std::sync::Arc;
    use std::thread;

    let cache = Arc::new(ResponseCache::default());
    let mut handles = Vec::new();

    for _ in 0..8 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..100 {
                let _ = cache.get(&format!("question-{i}"));
            }
        }));
    }
    for h in handles {
        h.join().expect("thread panicked");
    }

    // 8 threads x 100 misses each, none lost.
    assert_eq!(cache.stats().cache_misses, 800);
    assert_eq!(cache.stats().total_requests, 800);
}

#[test]
fn concurrent_get_and_set_on_same_key() {
    use std::sync::Arc;
    use std::thread;

    let cache = Arc::new(ResponseCache::default());
    let mut handles = Vec::new();

    // Writers keep replacing the entry while readers look it up. No torn
    // reads: every hit must observe a complete answer.
    for w in 0..4 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for _ in 0..50 {
                cache.set("shared question", answer(&format!("answer from writer {w}")));
            }
        }));
    }
    for _ in 0..4 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for _ in 0..50 {
                if let Some(hit) = cache.get("shared question") {
                    assert!(hit.answer.starts_with("answer from writer "));
                }
            }
        }));
    }
    for h in handles {
        h.join().expect("thread panicked");
    }

    // Last write wins: exactly one entry remains.
    let stats = cache.stats();
    assert_eq!(stats.cached_items, 1);
    assert_eq!(stats.total_requests, stats.cache_hits + stats.cache_misses);
    assert_eq!(stats.total_requests, 200);
}
