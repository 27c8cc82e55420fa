use crate::domain::model::{CompletionRequest, JobListing, ProcessOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait CompletionClient: Send + Sync {
    /// Returns the raw text of the first completion choice.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ListingStore: Send + Sync {
    fn persist(&self, listing: &JobListing) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Runs one URL end to end. Implementations never return an error; every
/// failure is folded into the outcome.
#[async_trait]
pub trait JobProcessor: Send + Sync {
    async fn run_one(&self, url: &str) -> ProcessOutcome;
}
