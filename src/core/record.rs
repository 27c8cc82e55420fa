use crate::domain::model::{ExtractionResult, JobListing, NOT_FOUND};
use chrono::{Local, NaiveDate};

pub const TITLE_MAX_CHARS: usize = 100;
pub const COMPANY_MAX_CHARS: usize = 100;
pub const LOCATION_MAX_CHARS: usize = 100;
/// Notion rejects long rich text; this is the only tech stack cap.
pub const TECH_STACK_MAX_CHARS: usize = 1900;

/// Truncates on character boundaries, never inside a code point.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((byte_index, _)) => value[..byte_index].to_string(),
        None => value.to_string(),
    }
}

fn normalize_field(value: &str, max_chars: usize) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return NOT_FOUND.to_string();
    }
    truncate_chars(trimmed, max_chars)
}

/// Shapes title and extracted fields into a [`JobListing`].
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    date: Option<NaiveDate>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp every listing with a fixed date instead of today.
    pub fn dated(date: NaiveDate) -> Self {
        Self { date: Some(date) }
    }

    pub fn build(&self, source_url: &str, title: &str, extraction: &ExtractionResult) -> JobListing {
        JobListing {
            title: normalize_field(title, TITLE_MAX_CHARS),
            company: normalize_field(&extraction.company, COMPANY_MAX_CHARS),
            location: normalize_field(&extraction.location, LOCATION_MAX_CHARS),
            tech_stack: normalize_field(&extraction.tech_stack, TECH_STACK_MAX_CHARS),
            source_url: source_url.to_string(),
            date_added: self.date.unwrap_or_else(|| Local::now().date_naive()),
        }
    }
}
