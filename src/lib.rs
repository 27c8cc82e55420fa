pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{HttpPageFetcher, NotionStore, OpenAiClient};
pub use config::TrackerConfig;
pub use core::{batch::BatchRunner, pipeline::JobPipeline};
pub use utils::error::{Result, TrackerError};
