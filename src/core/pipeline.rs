use crate::core::extraction::StructuredExtractor;
use crate::core::record::RecordBuilder;
use crate::core::text::PageDocument;
use crate::domain::model::{JobListing, ProcessOutcome};
use crate::domain::ports::{CompletionClient, JobProcessor, ListingStore, PageFetcher};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const SUCCESS_MESSAGE: &str = "Job successfully added";

/// Fetch → text/title → extraction → record → store, for one URL.
pub struct JobPipeline<F: PageFetcher, C: CompletionClient, S: ListingStore> {
    fetcher: F,
    extractor: StructuredExtractor<C>,
    builder: RecordBuilder,
    store: S,
}

impl<F: PageFetcher, C: CompletionClient, S: ListingStore> JobPipeline<F, C, S> {
    pub fn new(fetcher: F, completion: C, store: S) -> Self {
        Self {
            fetcher,
            extractor: StructuredExtractor::new(completion),
            builder: RecordBuilder::new(),
            store,
        }
    }

    pub fn with_builder(mut self, builder: RecordBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Runs every stage and returns the listing that was written.
    pub async fn process(&self, url: &str) -> Result<JobListing> {
        tracing::debug!("Fetching {}", url);
        let html = self.fetcher.fetch(url).await?;

        // 解析後立即釋放 DOM，避免跨 await 持有
        let (page_text, title) = {
            let page = PageDocument::parse(&html);
            (page.text(), page.title())
        };
        tracing::debug!("Page text: {} chars, title: {}", page_text.len(), title);

        let extraction = self.extractor.extract(&page_text).await?;
        let listing = self.builder.build(url, &title, &extraction);
        tracing::info!("Extracted data: {:?}", listing);

        self.store.persist(&listing).await?;
        tracing::debug!("Listing stored for {}", url);

        Ok(listing)
    }
}

#[async_trait]
impl<F: PageFetcher, C: CompletionClient, S: ListingStore> JobProcessor for JobPipeline<F, C, S> {
    async fn run_one(&self, url: &str) -> ProcessOutcome {
        match self.process(url).await {
            Ok(_) => ProcessOutcome::success(url, SUCCESS_MESSAGE),
            Err(e) => {
                tracing::error!("❌ {} ({:?})", e, e.category());
                ProcessOutcome::failure(url, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CompletionRequest, NOT_FOUND};
    use crate::utils::error::TrackerError;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct MockFetcher {
        pages: HashMap<String, String>,
    }

    impl PageFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| TrackerError::TransportError {
                    url: url.to_string(),
                    message: "operation timed out".to_string(),
                })
        }
    }

    struct MockCompletion {
        reply: String,
    }

    impl CompletionClient for MockCompletion {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
            Ok(self.reply.clone())
        }
    }

    #[derive(Clone, Default)]
    struct MockStore {
        listings: Arc<Mutex<Vec<JobListing>>>,
        reject: bool,
    }

    impl ListingStore for MockStore {
        async fn persist(&self, listing: &JobListing) -> Result<()> {
            if self.reject {
                return Err(TrackerError::PersistenceError {
                    message: "HTTP 400: validation_error".to_string(),
                });
            }
            self.listings.lock().await.push(listing.clone());
            Ok(())
        }
    }

    const PAGE_URL: &str = "https://jobs.example.com/rust";

    fn fetcher() -> MockFetcher {
        let mut pages = HashMap::new();
        pages.insert(
            PAGE_URL.to_string(),
            "<html><head><title>Jobs</title></head><body><h1>Rust Engineer</h1><p>Acme, Berlin. Rust and Tokio.</p></body></html>"
                .to_string(),
        );
        MockFetcher { pages }
    }

    fn completion(reply: &str) -> MockCompletion {
        MockCompletion {
            reply: reply.to_string(),
        }
    }

    #[tokio::test]
    async fn test_process_stores_listing() {
        let store = MockStore::default();
        let date = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let pipeline = JobPipeline::new(
            fetcher(),
            completion(r#"{"company": "Acme", "location": "Berlin", "tech_stack": ["Rust", "Tokio"]}"#),
            store.clone(),
        )
        .with_builder(RecordBuilder::dated(date));

        let listing = pipeline.process(PAGE_URL).await.unwrap();

        assert_eq!(listing.title, "Rust Engineer");
        assert_eq!(listing.company, "Acme");
        assert_eq!(listing.tech_stack, "Rust, Tokio");
        assert_eq!(listing.date_added, date);

        let stored = store.listings.lock().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].source_url, PAGE_URL);
    }

    #[tokio::test]
    async fn test_run_one_success_message() {
        let pipeline = JobPipeline::new(
            fetcher(),
            completion(r#"{"company": "Acme", "location": "Berlin", "tech_stack": "Rust"}"#),
            MockStore::default(),
        );

        let outcome = pipeline.run_one(PAGE_URL).await;

        assert!(outcome.success);
        assert_eq!(outcome.message, SUCCESS_MESSAGE);
        assert_eq!(outcome.url, PAGE_URL);
    }

    #[tokio::test]
    async fn test_run_one_fetch_failure_is_contained() {
        let store = MockStore::default();
        let pipeline = JobPipeline::new(fetcher(), completion("{}"), store.clone());

        let outcome = pipeline.run_one("https://jobs.example.com/missing").await;

        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Request failed for https://jobs.example.com/missing"));
        assert!(outcome.message.contains("timed out"));
        assert!(store.listings.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_reply_still_stores_sentinels() {
        let store = MockStore::default();
        let pipeline = JobPipeline::new(fetcher(), completion("no json here"), store.clone());

        let outcome = pipeline.run_one(PAGE_URL).await;

        assert!(outcome.success);
        let stored = store.listings.lock().await;
        assert_eq!(stored[0].company, NOT_FOUND);
        assert_eq!(stored[0].location, NOT_FOUND);
        assert_eq!(stored[0].tech_stack, NOT_FOUND);
        assert_eq!(stored[0].title, "Rust Engineer");
    }

    #[tokio::test]
    async fn test_run_one_persistence_failure() {
        let store = MockStore {
            reject: true,
            ..Default::default()
        };
        let pipeline = JobPipeline::new(
            fetcher(),
            completion(r#"{"company": "Acme", "location": "Berlin", "tech_stack": "Rust"}"#),
            store,
        );

        let outcome = pipeline.run_one(PAGE_URL).await;

        assert!(!outcome.success);
        assert!(outcome.message.contains("validation_error"));
    }
}
