//! Builder for configuring engine instances

use std::sync::Arc;
use std::time::Duration;

use super::QaEngine;
use crate::cache::{CacheConfig, ResponseCache};
use crate::cost::CostLedger;
use crate::limit::RateLimiter;
use crate::traits::{AnswerGenerator, ContextRetriever};
use crate::types::ClaudeModel;
use crate::{PremiaError, Result};

/// Main entry point for creating engine instances.
pub struct Premia;

impl Premia {
    /// Create a new builder for configuring the engine.
    pub fn builder() -> QaEngineBuilder {
        QaEngineBuilder::new()
    }
}

/// Builder for configuring engine instances.
///
/// A retriever and a generator are required; everything else has defaults
/// (response cache on with a 5-minute TTL, Sonnet pricing, no rate limit).
pub struct QaEngineBuilder {
    retriever: Option<Arc<dyn ContextRetriever>>,
    generator: Option<Arc<dyn AnswerGenerator>>,
    model: ClaudeModel,
    cache: Option<CacheConfig>,
    rate_limit: Option<(usize, Duration)>,
}

impl QaEngineBuilder {
    pub fn new() -> Self {
        Self {
            retriever: None,
            generator: None,
            model: ClaudeModel::default(),
            cache: Some(CacheConfig::default()),
            rate_limit: None,
        }
    }

    /// Set the passage retriever (required).
    pub fn retriever(mut self, retriever: impl ContextRetriever + 'static) -> Self {
        self.retriever = Some(Arc::new(retriever));
        self
    }

    /// Set the passage retriever from a shared handle.
    pub fn retriever_arc(mut self, retriever: Arc<dyn ContextRetriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Set the answer generator (required).
    pub fn generator(mut self, generator: impl AnswerGenerator + 'static) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Set the answer generator from a shared handle.
    pub fn generator_arc(mut self, generator: Arc<dyn AnswerGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Set the model the cost ledger prices against (default: Sonnet).
    pub fn model(mut self, model: ClaudeModel) -> Self {
        self.model = model;
        self
    }

    /// Configure the response cache (on by default).
    pub fn response_cache(mut self, config: CacheConfig) -> Self {
        self.cache = Some(config);
        self
    }

    /// Disable the response cache entirely.
    pub fn disable_response_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    /// Limit generation calls to `max_requests` per rolling `window`.
    pub fn rate_limit(mut self, max_requests: usize, window: Duration) -> Self {
        self.rate_limit = Some((max_requests, window));
        self
    }

    /// Build the engine.
    pub fn build(self) -> Result<QaEngine> {
        let retriever = self.retriever.ok_or(PremiaError::NoRetriever)?;
        let generator = self.generator.ok_or(PremiaError::NoGenerator)?;

        let limiter = match self.rate_limit {
            Some((0, _)) => {
                return Err(PremiaError::Configuration(
                    "rate limit must allow at least one request per window".to_string(),
                ));
            }
            Some((max, window)) => Some(RateLimiter::new(max, window)),
            None => None,
        };

        Ok(QaEngine::new(
            retriever,
            generator,
            self.cache.map(|c| ResponseCache::new(&c)),
            CostLedger::new(self.model),
            limiter,
        ))
    }
}

impl Default for QaEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
