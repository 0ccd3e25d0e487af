//! Premia error types

/// Premia error types
#[derive(Debug, thiserror::Error)]
pub enum PremiaError {
    // Collaborator errors. A cache miss is a normal `None` outcome, never
    // an error, and a failed collaborator call is never written to the cache.
    #[error("retrieval failed: {0}")]
    Retrieval(String),

    #[error("generation failed: {0}")]
    Generation(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("no retriever configured")]
    NoRetriever,

    #[error("no generator configured")]
    NoGenerator,

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for Premia operations
pub type Result<T> = std::result::Result<T, PremiaError>;
