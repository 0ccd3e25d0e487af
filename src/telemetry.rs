//! Telemetry metric name constants.
//!
//! Centralised metric names for premia operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `premia_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `outcome` — request outcome: "cached" or "api"
//! - `direction` — token direction: "input" or "output"

/// Total requests recorded by the cost ledger.
///
/// Labels: `outcome` ("cached" | "api").
pub const REQUESTS_TOTAL: &str = "premia_requests_total";

/// Total tokens consumed by real API calls.
///
/// Labels: `direction` ("input" | "output").
pub const TOKENS_TOTAL: &str = "premia_tokens_total";

/// Total response cache hits.
pub const CACHE_HITS_TOTAL: &str = "premia_cache_hits_total";

/// Total response cache misses (including expired-and-evicted entries).
pub const CACHE_MISSES_TOTAL: &str = "premia_cache_misses_total";
