//! Tests for telemetry emission via the `metrics` facade.

use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use premia::{CachedAnswer, ClaudeModel, CostLedger, ResponseCache, Usage};

/// Sum all counter values recorded under `name`, across label sets.
fn counter_sum(
    snapshot: &[(
        metrics_util::CompositeKey,
        Option<metrics::Unit>,
        Option<metrics::SharedString>,
        DebugValue,
    )],
    name: &str,
) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, val)| match val {
            DebugValue::Counter(c) => *c,
            _ => 0,
        })
        .sum()
}

#[test]
fn metrics_emitted_without_panic() {
    // Without a recorder installed, all metric calls are no-ops.
    let cache = ResponseCache::default();
    cache.get("Q");
    cache.set("Q", CachedAnswer::new("A", Usage::new(300, 50)));
    cache.get("Q");

    let ledger = CostLedger::default();
    ledger.track_request(300, 50, false);
    ledger.track_request(300, 50, true);
}

#[test]
fn cache_emits_hit_and_miss_counters() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let cache = ResponseCache::default();

        // Miss
        cache.get("Q");

        // Insert + hit
        cache.set("Q", CachedAnswer::new("A", Usage::new(300, 50)));
        cache.get("Q");
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(
        counter_sum(&snapshot, "premia_cache_misses_total"),
        1,
        "expected 1 cache miss"
    );
    assert_eq!(
        counter_sum(&snapshot, "premia_cache_hits_total"),
        1,
        "expected 1 cache hit"
    );
}

#[test]
fn ledger_emits_request_and_token_counters() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let ledger = CostLedger::new(ClaudeModel::Sonnet);
        ledger.track_request(300, 50, false);
        ledger.track_request(300, 50, true);
    });

    let snapshot = snapshotter.snapshot().into_vec();
    // One cached + one api request.
    assert_eq!(counter_sum(&snapshot, "premia_requests_total"), 2);
    // Only the real call consumed tokens: 300 input + 50 output.
    assert_eq!(counter_sum(&snapshot, "premia_tokens_total"), 350);
}
