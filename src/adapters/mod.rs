// Adapters layer: concrete implementations for external systems (image host, document stores).

pub mod google_docs;
pub mod http_fetch;
pub mod memory;

pub use google_docs::GoogleDocsStore;
pub use http_fetch::BearerImageFetcher;
pub use memory::InMemoryDocumentStore;
