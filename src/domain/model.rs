use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

pub const INSERTED_RESPONSE: &str = "Image inserted";
pub const TEXT_APPENDED_RESPONSE: &str = "Text appended";

/// Webhook payload: `{"docId": "...", "imageUrl": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertImageRequest {
    pub doc_id: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendTextRequest {
    pub doc_id: String,
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
    /// Unix seconds, fractional part allowed.
    #[serde(default)]
    pub timestamp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl ImageBlob {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

/// Explicit size for an inserted image, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width_pt: f64,
    pub height_pt: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_insert_request_camel_case() {
        let body = r#"{"docId": "1AbC", "imageUrl": "https://files.slack.com/a.png", "extra": 1}"#;
        let req: InsertImageRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.doc_id, "1AbC");
        assert_eq!(req.image_url, "https://files.slack.com/a.png");
    }

    #[test]
    fn test_parse_insert_request_missing_field() {
        let body = r#"{"docId": "1AbC"}"#;
        assert!(serde_json::from_str::<InsertImageRequest>(body).is_err());
    }

    #[test]
    fn test_parse_append_text_optional_fields() {
        let body = r#"{"docId": "d", "text": "hello"}"#;
        let req: AppendTextRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.author, None);
        assert_eq!(req.timestamp, None);
    }

    #[test]
    fn test_blob_data_uri() {
        let blob = ImageBlob::new(vec![0x89, b'P', b'N', b'G'], "image/png");
        assert!(blob.is_image());
        assert_eq!(blob.to_data_uri(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_blob_not_image() {
        let blob = ImageBlob::new(b"<html></html>".to_vec(), "text/html");
        assert!(!blob.is_image());
        assert_eq!(blob.len(), 13);
    }
}
