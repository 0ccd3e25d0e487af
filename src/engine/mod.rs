//! Question-answering engine: cache-first orchestration over the
//! retrieval and generation collaborators.
//!
//! The request path is: validate → cache lookup → (hit: answer + ledger) or
//! (miss: rate limit → retrieve → generate → ledger + cache populate).
//! The cache and ledger never block; the only suspension points are the
//! collaborator calls and the rate limiter, all outside any lock. Two
//! concurrent misses for the same question may therefore both reach
//! generation — the cache takes whichever `set` lands last and the ledger
//! counts both calls. No single-flight deduplication is attempted.

mod builder;

pub use builder::{Premia, QaEngineBuilder};

use std::sync::Arc;

use crate::cache::{CachedAnswer, ResponseCache};
use crate::cost::CostLedger;
use crate::limit::RateLimiter;
use crate::traits::{AnswerGenerator, ContextRetriever};
use crate::types::QaResponse;
use crate::{PremiaError, Result};

/// Answer returned when retrieval finds nothing relevant. Not cached and
/// not charged to the ledger — no generation call happened.
pub const NO_CONTEXT_ANSWER: &str =
    "I couldn't find relevant information to answer your question.";

/// Per-request options.
///
/// ```rust
/// # use premia::AskOptions;
/// let options = AskOptions::default().top_k(5).use_cache(false);
/// ```
#[derive(Debug, Clone)]
pub struct AskOptions {
    /// Number of passages to retrieve. Default: 3.
    pub top_k: usize,
    /// Whether to consult the cache before generating. Default: true.
    /// Freshly generated answers are cached regardless, so a bypassed
    /// request still refreshes the entry.
    pub use_cache: bool,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            top_k: 3,
            use_cache: true,
        }
    }
}

impl AskOptions {
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }
}

/// The question-answering engine.
///
/// Construct via [`Premia::builder()`]. One instance per process, shared by
/// all request handlers — the cache and ledger are designed for exactly
/// that ownership model.
pub struct QaEngine {
    retriever: Arc<dyn ContextRetriever>,
    generator: Arc<dyn AnswerGenerator>,
    cache: Option<ResponseCache>,
    ledger: CostLedger,
    limiter: Option<RateLimiter>,
}

impl std::fmt::Debug for QaEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QaEngine").finish_non_exhaustive()
    }
}

impl QaEngine {
    pub(crate) fn new(
        retriever: Arc<dyn ContextRetriever>,
        generator: Arc<dyn AnswerGenerator>,
        cache: Option<ResponseCache>,
        ledger: CostLedger,
        limiter: Option<RateLimiter>,
    ) -> Self {
        Self {
            retriever,
            generator,
            cache,
            ledger,
            limiter,
        }
    }

    /// Answer a question.
    ///
    /// Collaborator failures propagate as [`PremiaError::Retrieval`] /
    /// [`PremiaError::Generation`] and are never written to the cache — a
    /// failed call must not be conflated with a miss.
    pub async fn ask(&self, question: &str, options: &AskOptions) -> Result<QaResponse> {
        if question.trim().is_empty() {
            return Err(PremiaError::InvalidInput(
                "question must not be blank".to_string(),
            ));
        }

        if options.use_cache {
            if let Some(cache) = &self.cache {
                if let Some(hit) = cache.get(question) {
                    // No real call: charge only the hypothetical column.
                    self.ledger.track_usage(&hit.usage, true);
                    return Ok(QaResponse {
                        answer: hit.answer,
                        sources: Vec::new(),
                        cached: true,
                        usage: Some(hit.usage),
                    });
                }
            }
        }

        let passages = self.retriever.retrieve(question, options.top_k).await?;
        if passages.is_empty() {
            tracing::debug!(question, "no relevant passages retrieved");
            return Ok(QaResponse {
                answer: NO_CONTEXT_ANSWER.to_string(),
                sources: Vec::new(),
                cached: false,
                usage: None,
            });
        }

        if let Some(limiter) = &self.limiter {
            limiter.acquire().await;
        }

        let generated = self.generator.generate(question, &passages).await?;

        self.ledger.track_usage(&generated.usage, false);
        if let Some(cache) = &self.cache {
            cache.set(
                question,
                CachedAnswer::new(generated.answer.clone(), generated.usage),
            );
        }

        Ok(QaResponse {
            answer: generated.answer,
            sources: passages,
            cached: false,
            usage: Some(generated.usage),
        })
    }

    /// The response cache, if caching is enabled.
    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    /// The cost ledger.
    pub fn ledger(&self) -> &CostLedger {
        &self.ledger
    }
}
