pub mod batch;
pub mod extraction;
pub mod pipeline;
pub mod record;
pub mod text;

pub use crate::domain::model::{BatchReport, ExtractionResult, JobListing, ProcessOutcome};
pub use crate::domain::ports::{CompletionClient, JobProcessor, ListingStore, PageFetcher};
pub use crate::utils::error::Result;
