//! Cost accounting for LLM API usage.
//!
//! [`CostLedger`] keeps running counters of requests, tokens and USD cost,
//! segmented by cache outcome. Every request is tracked; cached requests
//! accrue only the *hypothetical* cost column (`cost_without_cache_usd`),
//! which is what lets [`CostSnapshot`] attribute concrete USD savings to
//! the response cache.
//!
//! Accounting is advisory, not correctness-critical: an unrecognized model
//! id degrades to the default model's pricing instead of failing the
//! request, and token counts are taken at the caller's word.
//!
//! # Concurrency
//!
//! All counters live behind a single mutex; [`CostLedger::track_request`],
//! [`CostLedger::snapshot`] and [`CostLedger::reset`] are each atomic, so
//! concurrent tracking never loses updates and a snapshot is never torn.
//! Counter updates are bounded in-memory operations — nothing here blocks
//! or suspends.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::telemetry;
use crate::types::{ClaudeModel, Usage};

#[derive(Debug, Default, Clone)]
struct Counters {
    total_requests: u64,
    cached_requests: u64,
    api_calls: u64,
    total_input_tokens: u64,
    total_output_tokens: u64,
    // Accumulated at full precision; rounding happens only in snapshot().
    total_cost_usd: f64,
    cost_without_cache_usd: f64,
}

/// Point-in-time ledger statistics with derived savings metrics.
///
/// Currency values are rounded to 4 decimals and percentages to 2 at this
/// reporting boundary — the ledger's internal accumulators are not rounded,
/// so error never compounds across calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSnapshot {
    pub total_requests: u64,
    pub cached_requests: u64,
    pub api_calls: u64,
    /// Percent of requests served from cache. Zero when nothing tracked.
    pub cache_hit_rate_percent: f64,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub total_tokens: u64,
    /// Cost actually incurred by API calls.
    pub total_cost_usd: f64,
    /// Hypothetical cost had every request made a real call.
    pub cost_without_cache_usd: f64,
    pub savings_usd: f64,
    /// Zero when no cost has accrued.
    pub savings_percent: f64,
    /// Wire id of the model the ledger prices against.
    pub model: String,
}

/// Running ledger of request counts, token consumption and USD cost.
///
/// One instance per process, shared by all request handlers. Counters
/// accumulate until [`reset`](CostLedger::reset); the pricing table is
/// static per model and survives resets.
pub struct CostLedger {
    model: ClaudeModel,
    counters: Mutex<Counters>,
}

impl CostLedger {
    /// Create a ledger pricing against the given model.
    pub fn new(model: ClaudeModel) -> Self {
        Self {
            model,
            counters: Mutex::new(Counters::default()),
        }
    }

    /// Create a ledger from a wire-format model id.
    ///
    /// Unrecognized ids fall back to the default model
    /// ([`ClaudeModel::Sonnet`]) with a warning — cost accounting never
    /// fails a request over an unknown model string.
    pub fn for_model_id(id: &str) -> Self {
        let model = ClaudeModel::from_id(id).unwrap_or_else(|| {
            let fallback = ClaudeModel::default();
            tracing::warn!(id, fallback = %fallback, "unknown model id, using default pricing");
            fallback
        });
        Self::new(model)
    }

    /// The model this ledger prices against.
    pub fn model(&self) -> ClaudeModel {
        self.model
    }

    fn lock(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one request.
    ///
    /// Cached requests incur no real cost but accrue the hypothetical cost
    /// of their token counts, so savings stay attributable. Uncached
    /// requests accrue actual cost to both columns — the "would-have-cost"
    /// baseline equals actual cost when a real call did happen.
    pub fn track_request(&self, input_tokens: u64, output_tokens: u64, was_cached: bool) {
        let cost = self.calculate_cost(input_tokens, output_tokens);
        let mut c = self.lock();
        c.total_requests += 1;

        if was_cached {
            c.cached_requests += 1;
            c.cost_without_cache_usd += cost;
            metrics::counter!(telemetry::REQUESTS_TOTAL, "outcome" => "cached").increment(1);
        } else {
            c.api_calls += 1;
            c.total_input_tokens += input_tokens;
            c.total_output_tokens += output_tokens;
            c.total_cost_usd += cost;
            c.cost_without_cache_usd += cost;
            metrics::counter!(telemetry::REQUESTS_TOTAL, "outcome" => "api").increment(1);
            metrics::counter!(telemetry::TOKENS_TOTAL, "direction" => "input")
                .increment(input_tokens);
            metrics::counter!(telemetry::TOKENS_TOTAL, "direction" => "output")
                .increment(output_tokens);
        }
    }

    /// Convenience wrapper over [`track_request`](CostLedger::track_request)
    /// for a [`Usage`] value.
    pub fn track_usage(&self, usage: &Usage, was_cached: bool) {
        self.track_request(usage.input_tokens, usage.output_tokens, was_cached);
    }

    /// Price the given token counts at this ledger's model pricing.
    pub fn calculate_cost(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        let pricing = self.model.pricing();
        (input_tokens as f64 / 1_000_000.0) * pricing.input_per_mtok
            + (output_tokens as f64 / 1_000_000.0) * pricing.output_per_mtok
    }

    /// Snapshot the counters with derived savings metrics.
    pub fn snapshot(&self) -> CostSnapshot {
        let c = self.lock().clone();

        let hit_rate = if c.total_requests > 0 {
            c.cached_requests as f64 / c.total_requests as f64 * 100.0
        } else {
            0.0
        };
        let savings = c.cost_without_cache_usd - c.total_cost_usd;
        let savings_percent = if c.cost_without_cache_usd > 0.0 {
            savings / c.cost_without_cache_usd * 100.0
        } else {
            0.0
        };

        CostSnapshot {
            total_requests: c.total_requests,
            cached_requests: c.cached_requests,
            api_calls: c.api_calls,
            cache_hit_rate_percent: round2(hit_rate),
            total_input_tokens: c.total_input_tokens,
            total_output_tokens: c.total_output_tokens,
            total_tokens: c.total_input_tokens + c.total_output_tokens,
            total_cost_usd: round4(c.total_cost_usd),
            cost_without_cache_usd: round4(c.cost_without_cache_usd),
            savings_usd: round4(savings),
            savings_percent: round2(savings_percent),
            model: self.model.id().to_string(),
        }
    }

    /// Zero all accumulators. The pricing table is untouched.
    pub fn reset(&self) {
        *self.lock() = Counters::default();
        tracing::debug!(model = %self.model, "cost ledger reset");
    }
}

impl Default for CostLedger {
    fn default() -> Self {
        Self::new(ClaudeModel::default())
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}
