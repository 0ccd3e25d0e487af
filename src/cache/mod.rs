//! Response caching for question answering.
//!
//! - [`key`] — question normalization and stable key derivation.
//!
//! - [`response::ResponseCache`] — in-memory answer cache with per-entry
//!   expiry and hit/miss accounting. Consulted by
//!   [`QaEngine`](crate::engine::QaEngine) before the retrieval/generation
//!   path; a hit bypasses both collaborators entirely. See [`response`]
//!   module docs for the expiry model and concurrency discipline.

pub mod key;
pub mod response;

pub use key::{cache_key, normalize};
pub use response::{CacheConfig, CacheStats, CachedAnswer, ResponseCache};
