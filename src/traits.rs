//! Collaborator traits for retrieval and generation.
//!
//! The engine core owns caching and cost accounting; where the answers
//! actually come from is injected behind these seams. Production wires in
//! a vector store and an LLM client; tests wire in deterministic fakes.

use async_trait::async_trait;

use crate::types::{GeneratedAnswer, Passage};
use crate::Result;

/// Retrieves ranked policy-text passages relevant to a question.
///
/// Implementations typically wrap a vector store (embedding lookup +
/// similarity search). Failures surface as
/// [`PremiaError::Retrieval`](crate::PremiaError::Retrieval) — never as an
/// empty result, which is a valid "nothing relevant" outcome.
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    async fn retrieve(&self, question: &str, top_k: usize) -> Result<Vec<Passage>>;
}

/// Produces an answer from a question plus retrieved passages.
///
/// Implementations wrap an LLM API and must report the token counts the
/// call consumed — the [`CostLedger`](crate::cost::CostLedger) requires
/// them as input and does not compute them.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, question: &str, passages: &[Passage]) -> Result<GeneratedAnswer>;
}
