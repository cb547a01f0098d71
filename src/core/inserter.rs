use crate::core::format::format_entry;
use crate::domain::model::{AppendTextRequest, InsertImageRequest};
use crate::domain::ports::{DocumentStore, ImageFetcher};
use crate::utils::error::{HookError, Result};
use crate::utils::validation::validate_request_url;
use std::sync::Arc;

/// Fetches remote images and appends them to documents.
#[derive(Clone)]
pub struct ImageInserter {
    fetcher: Arc<dyn ImageFetcher>,
    store: Arc<dyn DocumentStore>,
}

impl ImageInserter {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, store: Arc<dyn DocumentStore>) -> Self {
        Self { fetcher, store }
    }

    pub async fn insert_image(&self, request: &InsertImageRequest) -> Result<()> {
        require_doc_id(&request.doc_id)?;
        validate_request_url("imageUrl", &request.image_url)?;

        tracing::info!(
            doc_id = %request.doc_id,
            "📥 Fetching image from {}",
            request.image_url
        );
        let image = self.fetcher.fetch(&request.image_url).await?;

        if !image.is_image() {
            return Err(HookError::NotAnImage {
                content_type: image.content_type,
            });
        }
        if image.is_empty() {
            return Err(HookError::ValidationError {
                field: "imageUrl".to_string(),
                message: "fetched image is empty".to_string(),
            });
        }

        tracing::debug!(
            "Fetched {} bytes ({}), appending to document",
            image.len(),
            image.content_type
        );
        self.store.append_image(&request.doc_id, &image).await?;

        tracing::info!(doc_id = %request.doc_id, "✅ Image inserted");
        Ok(())
    }

    pub async fn append_text(&self, request: &AppendTextRequest) -> Result<()> {
        require_doc_id(&request.doc_id)?;
        if request.text.trim().is_empty() {
            return Err(HookError::ValidationError {
                field: "text".to_string(),
                message: "text cannot be empty".to_string(),
            });
        }

        let entry = format_entry(request.author.as_deref(), request.timestamp, &request.text);
        // Entries are separated by a blank line.
        self.store
            .append_text(&request.doc_id, &format!("{}\n\n", entry))
            .await?;

        tracing::info!(doc_id = %request.doc_id, "📝 Appended {} chars", entry.len());
        Ok(())
    }
}

fn require_doc_id(doc_id: &str) -> Result<()> {
    if doc_id.trim().is_empty() {
        return Err(HookError::ValidationError {
            field: "docId".to_string(),
            message: "docId cannot be empty".to_string(),
        });
    }
    Ok(())
}
