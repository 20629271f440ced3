//! Validation rules and rule suggestion.
//!
//! Rules are suggested from a [`DatasetProfile`], either deterministically
//! ([`HeuristicSuggester`]) or through an injected completion capability
//! ([`LlmSuggester`](crate::rules::LlmSuggester)). Accepted rules persist
//! through a [`RuleStore`].

mod prompt;
mod store;

pub use prompt::{render_prompt, CompletionClient, LlmSuggester, UnavailableClient};
pub use store::RuleStore;

use crate::error::Result;
use crate::profile::DatasetProfile;
use serde::{Deserialize, Serialize};

/// The column name used for rules that apply to the whole dataset.
pub const DATASET_WIDE: &str = "*";

/// Category of a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Column must not contain missing values.
    NotNull,
    /// Numeric values must fall in an observed range.
    Range,
    /// Values must match a shape pattern.
    Pattern,
    /// Non-missing values must be distinct.
    Unique,
    /// Free-form rule from an external suggester.
    Custom,
}

impl RuleKind {
    /// Get the descriptive name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::NotNull => "not_null",
            RuleKind::Range => "range",
            RuleKind::Pattern => "pattern",
            RuleKind::Unique => "unique",
            RuleKind::Custom => "custom",
        }
    }
}

/// A suggested validation rule for a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Column the rule applies to, or [`DATASET_WIDE`].
    pub column: String,
    /// Rule category.
    pub kind: RuleKind,
    /// Human-readable check expression.
    pub expression: String,
    /// Why the rule was suggested.
    pub rationale: String,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.expression, self.kind.as_str())
    }
}

/// Capability for suggesting validation rules from a profile.
pub trait RuleSuggester {
    /// Suggest rules for a profiled dataset.
    fn suggest(&self, profile: &DatasetProfile) -> Result<Vec<Rule>>;
}

/// Deterministic rule suggestion from profile statistics alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSuggester;

impl HeuristicSuggester {
    /// Create a heuristic suggester.
    pub fn new() -> Self {
        Self
    }
}

impl RuleSuggester for HeuristicSuggester {
    fn suggest(&self, profile: &DatasetProfile) -> Result<Vec<Rule>> {
        let mut rules = Vec::new();

        for column in &profile.columns {
            if profile.row_count > 0 && column.null_count == 0 {
                rules.push(Rule {
                    column: column.name.clone(),
                    kind: RuleKind::NotNull,
                    expression: format!("{} IS NOT NULL", column.name),
                    rationale: format!(
                        "no missing values observed across {} rows",
                        profile.row_count
                    ),
                });
            }

            if let (Some(min), Some(max)) = (column.min, column.max) {
                rules.push(Rule {
                    column: column.name.clone(),
                    kind: RuleKind::Range,
                    expression: format!("{} BETWEEN {} AND {}", column.name, min, max),
                    rationale: "observed value range".to_string(),
                });
            }

            if let Some(pattern) = column.regex_pattern {
                rules.push(Rule {
                    column: column.name.clone(),
                    kind: RuleKind::Pattern,
                    expression: format!("{} MATCHES {}", column.name, pattern.regex()),
                    rationale: format!("all observed values share the {} shape", pattern.as_str()),
                });
            }

            let observed = profile.row_count - column.null_count;
            if observed > 1 && column.unique_count == observed {
                rules.push(Rule {
                    column: column.name.clone(),
                    kind: RuleKind::Unique,
                    expression: format!("{} IS UNIQUE", column.name),
                    rationale: format!("{} observed values are all distinct", observed),
                });
            }
        }

        Ok(rules)
    }
}
