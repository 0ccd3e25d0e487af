//! Premia - cached, cost-accounted RAG question answering for insurance
//! policy documents.
//!
//! The crate provides a [`QaEngine`] that answers questions over a corpus
//! of policy text: it consults an in-memory [`ResponseCache`] first, and on
//! a miss calls the injected [`ContextRetriever`] and [`AnswerGenerator`]
//! collaborators, records the spend in a [`CostLedger`], and caches the
//! result. The cache and ledger are also usable standalone.
//!
//! # Cache + ledger example
//!
//! ```rust
//! use premia::{CacheConfig, CachedAnswer, ClaudeModel, CostLedger, ResponseCache, Usage};
//!
//! let cache = ResponseCache::new(&CacheConfig::new());
//! let ledger = CostLedger::new(ClaudeModel::Sonnet);
//!
//! // First request: real API call, answer cached.
//! let usage = Usage::new(300, 50);
//! ledger.track_usage(&usage, false);
//! cache.set("What is my deductible?", CachedAnswer::new("$500 per incident.", usage));
//!
//! // Second request: served from cache, only hypothetical cost accrues.
//! let hit = cache.get("  what is my deductible?  ").unwrap();
//! ledger.track_usage(&hit.usage, true);
//!
//! assert_eq!(ledger.snapshot().savings_percent, 50.0);
//! assert_eq!(cache.stats().hit_rate_percent, 100.0);
//! ```
//!
//! # Engine example
//!
//! ```rust,ignore
//! use premia::{AskOptions, Premia};
//!
//! let engine = Premia::builder()
//!     .retriever(my_vector_store)   // impl ContextRetriever
//!     .generator(my_llm_client)     // impl AnswerGenerator
//!     .build()?;
//!
//! let response = engine.ask("What is my deductible?", &AskOptions::default()).await?;
//! println!("{} (cached: {})", response.answer, response.cached);
//! ```

pub mod cache;
pub mod cost;
pub mod engine;
pub mod error;
pub mod limit;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export main types at crate root
pub use cache::{CacheConfig, CacheStats, CachedAnswer, ResponseCache};
pub use cost::{CostLedger, CostSnapshot};
pub use engine::{AskOptions, Premia, QaEngine, QaEngineBuilder, NO_CONTEXT_ANSWER};
pub use error::{PremiaError, Result};
pub use limit::RateLimiter;
pub use traits::{AnswerGenerator, ContextRetriever};
pub use types::{ClaudeModel, GeneratedAnswer, ModelPricing, Passage, QaResponse, Usage};
