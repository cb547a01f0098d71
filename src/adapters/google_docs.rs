use crate::domain::model::{ImageBlob, ImageSize};
use crate::domain::ports::DocumentStore;
use crate::utils::error::{HookError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://docs.googleapis.com";
const MAX_ERROR_MESSAGE_BYTES: usize = 512;

#[derive(Debug, Deserialize)]
struct DocumentResource {
    body: Option<DocumentBody>,
}

#[derive(Debug, Deserialize)]
struct DocumentBody {
    #[serde(default)]
    content: Vec<StructuralElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuralElement {
    end_index: Option<i64>,
}

/// Google Docs REST backend authenticated with a static access token.
#[derive(Debug, Clone)]
pub struct GoogleDocsStore {
    client: Client,
    base_url: Url,
    access_token: String,
    image_size: Option<ImageSize>,
}

impl GoogleDocsStore {
    pub fn new(
        base_url: &str,
        access_token: impl Into<String>,
        image_size: Option<ImageSize>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| HookError::InvalidConfigValueError {
            field: "store.base_url".to_string(),
            value: base_url.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            access_token: access_token.into(),
            image_size,
        })
    }

    fn document_url(&self, segment: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HookError::ConfigError {
                message: format!("store.base_url cannot be a base: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(["v1", "documents", segment]);
        Ok(url)
    }

    /// Index just before the body's trailing newline.
    async fn end_index(&self, doc_id: &str) -> Result<i64> {
        let url = self.document_url(doc_id)?;
        tracing::debug!("Opening document: {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(&[("fields", "body.content.endIndex")])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(HookError::DocumentNotFound(doc_id.to_string()));
        }
        let document: DocumentResource = check_status(response).await?.json().await?;

        let end = document
            .body
            .and_then(|b| b.content.last().and_then(|e| e.end_index))
            .map(|end| end - 1)
            .unwrap_or(1);
        Ok(end.max(1))
    }

    async fn batch_update(&self, doc_id: &str, request: Value) -> Result<()> {
        let url = self.document_url(&format!("{}:batchUpdate", doc_id))?;
        let body = json!({ "requests": [request] });

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(HookError::DocumentNotFound(doc_id.to_string()));
        }
        check_status(response).await?;
        Ok(())
    }

    fn insert_image_request(&self, index: i64, image: &ImageBlob) -> Value {
        let mut insert = json!({
            "location": { "index": index },
            "uri": image.to_data_uri(),
        });
        if let Some(size) = self.image_size {
            insert["objectSize"] = json!({
                "height": { "magnitude": size.height_pt, "unit": "PT" },
                "width": { "magnitude": size.width_pt, "unit": "PT" },
            });
        }
        json!({ "insertInlineImage": insert })
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let mut message = response.text().await.unwrap_or_default();
    truncate_at_char_boundary(&mut message, MAX_ERROR_MESSAGE_BYTES);
    Err(HookError::DocumentStore {
        status: status.as_u16(),
        message,
    })
}

fn truncate_at_char_boundary(message: &mut String, max_bytes: usize) {
    if message.len() <= max_bytes {
        return;
    }
    let mut cut = max_bytes;
    while !message.is_char_boundary(cut) {
        cut -= 1;
    }
    message.truncate(cut);
}

#[async_trait]
impl DocumentStore for GoogleDocsStore {
    async fn append_image(&self, doc_id: &str, image: &ImageBlob) -> Result<()> {
        let index = self.end_index(doc_id).await?;
        tracing::debug!(doc_id, index, "Inserting inline image");
        self.batch_update(doc_id, self.insert_image_request(index, image))
            .await
    }

    async fn append_text(&self, doc_id: &str, text: &str) -> Result<()> {
        let index = self.end_index(doc_id).await?;
        tracing::debug!(doc_id, index, "Inserting text");
        self.batch_update(
            doc_id,
            json!({
                "insertText": {
                    "location": { "index": index },
                    "text": text,
                }
            }),
        )
        .await
    }
}
