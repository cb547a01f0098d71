use crate::domain::model::ImageBlob;
use crate::domain::ports::ImageFetcher;
use crate::utils::error::{HookError, Result};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Downloads images with `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct BearerImageFetcher {
    client: Client,
    token: String,
    max_bytes: u64,
}

impl BearerImageFetcher {
    pub fn new(token: impl Into<String>, timeout: Duration, max_bytes: u64) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            token: token.into(),
            max_bytes,
        })
    }
}

#[async_trait]
impl ImageFetcher for BearerImageFetcher {
    async fn fetch(&self, url: &str) -> Result<ImageBlob> {
        tracing::debug!("Making image request to: {}", url);
        let mut response = self.client.get(url).bearer_auth(&self.token).send().await?;

        let status = response.status();
        tracing::debug!("Image response status: {}", status);
        if !status.is_success() {
            return Err(HookError::FetchFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(declared) = response.content_length() {
            if declared > self.max_bytes {
                return Err(HookError::ImageTooLarge {
                    size: declared,
                    limit: self.max_bytes,
                });
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        // Chunked bodies carry no Content-Length, so the limit is enforced while reading.
        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let size = (bytes.len() + chunk.len()) as u64;
            if size > self.max_bytes {
                return Err(HookError::ImageTooLarge {
                    size,
                    limit: self.max_bytes,
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(ImageBlob::new(bytes, content_type))
    }
}
