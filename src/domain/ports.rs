use crate::domain::model::ImageBlob;
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ImageBlob>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Opens the document and appends the image at the end of its body.
    async fn append_image(&self, doc_id: &str, image: &ImageBlob) -> Result<()>;

    async fn append_text(&self, doc_id: &str, text: &str) -> Result<()>;
}
