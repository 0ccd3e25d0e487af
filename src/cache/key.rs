//! Cache key derivation from question text.
//!
//! Two questions that differ only in case or surrounding whitespace are the
//! same question: `"What is my deductible?"` and `"  WHAT IS MY DEDUCTIBLE? "`
//! must map to the same cache entry. Normalization happens before hashing,
//! so the stored key never leaks the raw input.

use sha2::{Digest, Sha256};

/// Normalize question text for keying: trim surrounding whitespace and
/// lowercase. Pure and total — any string input produces a result,
/// including the empty string.
pub fn normalize(question: &str) -> String {
    question.trim().to_lowercase()
}

/// Compute a stable, fixed-length cache key from question text.
///
/// SHA-256 over the normalized question, hex-encoded (64 chars). A
/// content digest keeps keys bounded and uniform regardless of input
/// length, and is stable across processes — unlike `DefaultHasher`,
/// which is only deterministic within a single process lifetime.
pub fn cache_key(question: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize(question).as_bytes());
    format!("{:x}", hasher.finalize())
}
