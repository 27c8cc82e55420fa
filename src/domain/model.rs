use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder for any field the page or the model did not yield.
pub const NOT_FOUND: &str = "Not found";

/// A normalized job posting, ready to be written to the destination store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub tech_stack: String,
    pub source_url: String,
    pub date_added: NaiveDate,
}

/// Fields recovered from the page text by the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub company: String,
    pub location: String,
    pub tech_stack: String,
}

impl ExtractionResult {
    pub fn not_found() -> Self {
        Self {
            company: NOT_FOUND.to_string(),
            location: NOT_FOUND.to_string(),
            tech_stack: NOT_FOUND.to_string(),
        }
    }
}

/// Chat completion input, independent of the provider.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub url: String,
    pub success: bool,
    pub message: String,
}

impl ProcessOutcome {
    pub fn success(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            success: false,
            message: message.into(),
        }
    }
}

/// Outcomes of one batch run, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ProcessOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProcessOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }

    pub fn render_summary(&self) -> String {
        let mut lines = vec![
            "=== Processing Summary ===".to_string(),
            format!("Successfully processed: {}/{}", self.succeeded(), self.total()),
        ];

        let failures: Vec<&ProcessOutcome> = self.failures().collect();
        if !failures.is_empty() {
            lines.push(String::new());
            lines.push("Failed URLs:".to_string());
            for failure in failures {
                lines.push(format!("- {}: {}", failure.url, failure.message));
            }
        }

        lines.join("\n")
    }
}
