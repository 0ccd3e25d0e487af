//! Model identifiers and static pricing.
//!
//! The supported models form a closed enumeration rather than a free-form
//! string-keyed table: an unrecognized id resolves to `None` from
//! [`ClaudeModel::from_id`], and the caller decides what to do with it
//! (the [`CostLedger`](crate::cost::CostLedger) falls back to the default
//! model and logs the substitution).

use serde::{Deserialize, Serialize};

/// Per-million-token pricing for a model, in USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    /// USD per million input tokens.
    pub input_per_mtok: f64,
    /// USD per million output tokens.
    pub output_per_mtok: f64,
}

/// Supported answer-generation models.
///
/// Pricing as of Feb 2026. [`ClaudeModel::Sonnet`] is the default both for
/// construction and as the fallback for unrecognized model ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClaudeModel {
    /// Claude Haiku — cheapest tier.
    Haiku,
    /// Claude Sonnet — mid tier (default).
    #[default]
    Sonnet,
    /// Claude Opus — top tier.
    Opus,
}

impl ClaudeModel {
    /// The wire-format model id.
    pub fn id(&self) -> &'static str {
        match self {
            ClaudeModel::Haiku => "claude-haiku-4",
            ClaudeModel::Sonnet => "claude-sonnet-4",
            ClaudeModel::Opus => "claude-opus-4",
        }
    }

    /// Resolve a model id to a known model.
    ///
    /// Returns `None` for unrecognized ids — the fallback decision belongs
    /// to the caller, not to the pricing table.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "claude-haiku-4" => Some(ClaudeModel::Haiku),
            "claude-sonnet-4" => Some(ClaudeModel::Sonnet),
            "claude-opus-4" => Some(ClaudeModel::Opus),
            _ => None,
        }
    }

    /// Static per-million-token pricing for this model.
    pub fn pricing(&self) -> ModelPricing {
        match self {
            ClaudeModel::Haiku => ModelPricing {
                input_per_mtok: 0.25,
                output_per_mtok: 1.25,
            },
            ClaudeModel::Sonnet => ModelPricing {
                input_per_mtok: 3.00,
                output_per_mtok: 15.00,
            },
            ClaudeModel::Opus => ModelPricing {
                input_per_mtok: 15.00,
                output_per_mtok: 75.00,
            },
        }
    }
}

impl std::fmt::Display for ClaudeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
