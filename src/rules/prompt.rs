//! Language-model rule suggestion through an injected completion capability.
//!
//! The transport to an actual model is out of scope; callers inject
//! anything implementing [`CompletionClient`]. An absent client is a
//! runtime [`DqError::Unavailable`] failure, not a compile-time feature.

use crate::error::{DqError, Result};
use crate::profile::DatasetProfile;
use crate::rules::{Rule, RuleKind, RuleSuggester, DATASET_WIDE};

/// Capability for completing a text prompt.
pub trait CompletionClient {
    /// Complete a prompt, returning the model's text.
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// A completion client that is never available.
///
/// Stands in when no model endpoint is configured, so callers get a
/// descriptive error instead of a missing method.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClient;

impl CompletionClient for UnavailableClient {
    fn complete(&self, _prompt: &str) -> Result<String> {
        Err(DqError::Unavailable(
            "no completion client configured for rule suggestion".to_string(),
        ))
    }
}

/// Render a dataset profile into a rule-suggestion prompt.
///
/// One summary line per column, followed by the instruction format the
/// completion is parsed against.
pub fn render_prompt(profile: &DatasetProfile) -> String {
    let mut prompt = String::new();
    prompt.push_str("# Dataset summary\n\n");
    prompt.push_str(&format!(
        "Generated: {}\n",
        chrono::Utc::now().to_rfc3339()
    ));
    prompt.push_str(&format!("Rows: {}\n\n", profile.row_count));
    prompt.push_str("Columns:\n");

    for column in &profile.columns {
        let mut line = format!(
            "- {} ({}): {:.1}% null, {} unique",
            column.name,
            column.kind.as_str(),
            column.null_percentage,
            column.unique_count
        );
        if let (Some(min), Some(max)) = (column.min, column.max) {
            line.push_str(&format!(", range {} to {}", min, max));
        }
        if let Some(pattern) = column.regex_pattern {
            line.push_str(&format!(", shape {}", pattern.as_str()));
        }
        prompt.push_str(&line);
        prompt.push('\n');
    }

    prompt.push_str(
        "\nSuggest simple data quality checks for these columns. \
         Answer with one check per line, formatted as 'column: check'.\n",
    );
    prompt
}

/// Rule suggestion backed by a completion capability.
#[derive(Debug, Clone)]
pub struct LlmSuggester<C> {
    client: C,
}

impl<C: CompletionClient> LlmSuggester<C> {
    /// Create a suggester around a completion client.
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: CompletionClient> RuleSuggester for LlmSuggester<C> {
    fn suggest(&self, profile: &DatasetProfile) -> Result<Vec<Rule>> {
        let prompt = render_prompt(profile);
        let completion = self.client.complete(&prompt)?;
        Ok(parse_completion(&completion, profile))
    }
}

/// Parse a completion into rules, one per non-empty line.
///
/// A `column: check` line whose prefix names a profiled column binds to
/// that column; anything else becomes a dataset-wide rule.
fn parse_completion(completion: &str, profile: &DatasetProfile) -> Vec<Rule> {
    let mut rules = Vec::new();
    for line in completion.lines() {
        let line = line.trim().trim_start_matches(['-', '*']).trim();
        if line.is_empty() {
            continue;
        }
        let (column, expression) = match line.split_once(':') {
            Some((head, tail)) if profile.column(head.trim()).is_some() => {
                (head.trim().to_string(), tail.trim().to_string())
            }
            _ => (DATASET_WIDE.to_string(), line.to_string()),
        };
        if expression.is_empty() {
            continue;
        }
        rules.push(Rule {
            column,
            kind: RuleKind::Custom,
            expression,
            rationale: "suggested by completion model".to_string(),
        });
    }
    rules
}
