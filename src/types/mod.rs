//! Public types for the Premia API.

mod model;
mod response;

pub use model::{ClaudeModel, ModelPricing};
pub use response::{GeneratedAnswer, Passage, QaResponse, Usage};
