//! Writes listings as pages of a Notion database.
//!
//! The database must have these properties: Title (title), Company, Location,
//! Tech Stack (rich text), Status and Source (select), URL (url) and
//! Date Added (date).

use crate::config::TrackerConfig;
use crate::core::record::{
    truncate_chars, COMPANY_MAX_CHARS, LOCATION_MAX_CHARS, TECH_STACK_MAX_CHARS, TITLE_MAX_CHARS,
};
use crate::domain::model::JobListing;
use crate::domain::ports::ListingStore;
use crate::utils::error::{Result, TrackerError};
use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

pub const INITIAL_STATUS: &str = "To Apply";

#[derive(Clone)]
pub struct NotionStore {
    http_client: Client,
    api_key: String,
    database_id: String,
    base_url: String,
    notion_version: String,
}

/// `host[:port]` of the posting URL, used as the Source select option.
pub fn source_name(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| TrackerError::PersistenceError {
        message: format!("Invalid source URL {}: {}", url, e),
    })?;

    let host = parsed
        .host_str()
        .ok_or_else(|| TrackerError::PersistenceError {
            message: format!("Source URL has no host: {}", url),
        })?;

    Ok(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

fn rich_text(content: &str) -> Value {
    json!({ "rich_text": [{ "text": { "content": content } }] })
}

impl NotionStore {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            http_client: Client::new(),
            api_key: config.notion_api_key.clone(),
            database_id: config.notion_database_id.clone(),
            base_url: config.notion_base_url.trim_end_matches('/').to_string(),
            notion_version: config.notion_version.clone(),
        }
    }

    /// Request body for `POST /pages`.
    pub fn page_payload(&self, listing: &JobListing) -> Result<Value> {
        let source = source_name(&listing.source_url)?;

        Ok(json!({
            "parent": { "database_id": self.database_id },
            "properties": {
                "Title": {
                    "title": [{ "text": { "content": truncate_chars(&listing.title, TITLE_MAX_CHARS) } }]
                },
                "Company": rich_text(&truncate_chars(&listing.company, COMPANY_MAX_CHARS)),
                "Location": rich_text(&truncate_chars(&listing.location, LOCATION_MAX_CHARS)),
                "Tech Stack": rich_text(&truncate_chars(&listing.tech_stack, TECH_STACK_MAX_CHARS)),
                "Status": { "select": { "name": INITIAL_STATUS } },
                "URL": { "url": listing.source_url },
                "Date Added": { "date": { "start": listing.date_added.format("%Y-%m-%d").to_string() } },
                "Source": { "select": { "name": source } }
            }
        }))
    }
}

impl ListingStore for NotionStore {
    async fn persist(&self, listing: &JobListing) -> Result<()> {
        let payload = self.page_payload(listing)?;

        let response = self
            .http_client
            .post(format!("{}/pages", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Notion-Version", &self.notion_version)
            .json(&payload)
            .send()
            .await
            .map_err(|e| TrackerError::PersistenceError {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!("Notion API error {}: {}", status, error_text);
            return Err(TrackerError::PersistenceError {
                message: format!("HTTP {}: {}", status, error_text),
            });
        }

        tracing::debug!("Created Notion page for {}", listing.source_url);
        Ok(())
    }
}
