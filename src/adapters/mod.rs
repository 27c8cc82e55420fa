// Adapters layer: concrete implementations of the domain ports (http, language model, notion, local files).

pub mod http;
pub mod input;
pub mod notion;
pub mod openai;

pub use http::HttpPageFetcher;
pub use notion::NotionStore;
pub use openai::OpenAiClient;
