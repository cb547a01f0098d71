use crate::domain::model::{
    AppendTextRequest, InsertImageRequest, INSERTED_RESPONSE, TEXT_APPENDED_RESPONSE,
};
use crate::server::AppState;
use crate::utils::error::{HookError, Result};
use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use serde::de::DeserializeOwned;
use serde_json::json;

/// Bodies are parsed by hand so malformed JSON and missing fields both come
/// back as a plain-text 400.
fn parse_payload<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| HookError::InvalidPayload(e.to_string()))
}

pub async fn insert_image(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str> {
    let request: InsertImageRequest = parse_payload(&body)?;
    state.inserter.insert_image(&request).await?;
    Ok(INSERTED_RESPONSE)
}

pub async fn append_text(State(state): State<AppState>, body: Bytes) -> Result<&'static str> {
    let request: AppendTextRequest = parse_payload(&body)?;
    state.inserter.append_text(&request).await?;
    Ok(TEXT_APPENDED_RESPONSE)
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "doc-image-hook",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
