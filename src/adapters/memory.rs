use crate::domain::model::ImageBlob;
use crate::domain::ports::DocumentStore;
use crate::utils::error::{HookError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Image(ImageBlob),
    Text(String),
}

/// Document store kept in process memory. Only pre-created documents can be
/// appended to.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<String, Vec<Element>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents = ids.into_iter().map(|id| (id.into(), Vec::new())).collect();
        Self {
            documents: RwLock::new(documents),
        }
    }

    pub async fn body(&self, doc_id: &str) -> Option<Vec<Element>> {
        self.documents.read().await.get(doc_id).cloned()
    }

    async fn append(&self, doc_id: &str, element: Element) -> Result<()> {
        let mut documents = self.documents.write().await;
        let body = documents
            .get_mut(doc_id)
            .ok_or_else(|| HookError::DocumentNotFound(doc_id.to_string()))?;
        body.push(element);
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn append_image(&self, doc_id: &str, image: &ImageBlob) -> Result<()> {
        self.append(doc_id, Element::Image(image.clone())).await
    }

    async fn append_text(&self, doc_id: &str, text: &str) -> Result<()> {
        self.append(doc_id, Element::Text(text.to_string())).await
    }
}
