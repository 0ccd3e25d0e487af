//! Response types for question answering.

use serde::{Deserialize, Serialize};

/// Token usage statistics for a single generation call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl Usage {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// A retrieved policy-text passage with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    /// The chunk text.
    pub content: String,
    /// Source document (e.g. `"auto_policy_2024.pdf"`).
    pub source: String,
    /// Relevance score from the vector search, higher is closer.
    pub similarity: f32,
}

/// An answer produced by an [`AnswerGenerator`](crate::traits::AnswerGenerator),
/// together with the token counts the call consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedAnswer {
    pub answer: String,
    pub usage: Usage,
}

/// The engine's response to a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaResponse {
    pub answer: String,
    /// Passages the answer was grounded on. Empty for cached responses —
    /// the cache stores answers, not retrieval context.
    #[serde(default)]
    pub sources: Vec<Passage>,
    /// Whether the answer was served from the response cache.
    pub cached: bool,
    /// Token usage of the generation that produced this answer. For cached
    /// responses this is the usage of the original call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}
