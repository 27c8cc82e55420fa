//! Language-model extraction of company, location and tech stack.
//!
//! The model's reply is parsed as JSON into a fixed shape. A reply that does
//! not fit is replaced by the all-`"Not found"` result; the cause is logged.

use crate::domain::model::{CompletionRequest, ExtractionResult};
use crate::domain::ports::CompletionClient;
use crate::utils::error::{Result, TrackerError};
use serde::Deserialize;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that extracts job posting information. \
Focus on identifying technical requirements and tools. \
Always return tech_stack as a comma-separated string.";

pub const EXTRACTION_TEMPERATURE: f32 = 0.1;

pub fn build_prompt(page_text: &str) -> String {
    format!(
        "Extract the following information from this job posting:
- Company name
- Job location
- Tech stack (programming languages, frameworks, tools, and technologies mentioned)

Format the response as JSON with these keys:
- company
- location
- tech_stack (as a single string, with technologies separated by commas)

Job posting text:
{}",
        page_text
    )
}

#[derive(Debug, Deserialize)]
struct RawExtraction {
    company: String,
    location: String,
    tech_stack: TechStackField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TechStackField {
    Joined(String),
    List(Vec<String>),
}

impl TechStackField {
    fn into_joined(self) -> String {
        match self {
            TechStackField::Joined(value) => value,
            TechStackField::List(items) => items.join(", "),
        }
    }
}

/// Parses the raw completion text. Tolerates a Markdown fence or prose around
/// a single JSON object.
pub fn parse_extraction(raw: &str) -> Result<ExtractionResult> {
    let start = raw.find('{');
    let end = raw.rfind('}');

    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => {
            return Err(TrackerError::ExtractionParseError {
                message: "response contains no JSON object".to_string(),
            })
        }
    };

    let parsed: RawExtraction =
        serde_json::from_str(json).map_err(|e| TrackerError::ExtractionParseError {
            message: e.to_string(),
        })?;

    Ok(ExtractionResult {
        company: parsed.company,
        location: parsed.location,
        tech_stack: parsed.tech_stack.into_joined(),
    })
}

pub struct StructuredExtractor<C: CompletionClient> {
    client: C,
}

impl<C: CompletionClient> StructuredExtractor<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Completion failures propagate; parse failures fall back to sentinels.
    pub async fn extract(&self, page_text: &str) -> Result<ExtractionResult> {
        let request = CompletionRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: build_prompt(page_text),
            temperature: EXTRACTION_TEMPERATURE,
        };

        tracing::debug!("Requesting extraction for {} chars of page text", page_text.len());
        let raw = self.client.complete(&request).await?;

        match parse_extraction(&raw) {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::warn!("⚠️ {}; using fallback values", e);
                tracing::debug!("Unparseable completion: {}", raw);
                Ok(ExtractionResult::not_found())
            }
        }
    }
}
