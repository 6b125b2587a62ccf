use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::ResumeData;
use crate::preview::{PreviewKey, PreviewState};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPreviewRequest {
    #[serde(default)]
    pub data: ResumeData,
    pub font_family: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPreviewResponse {
    pub consumer_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequestBody {
    pub template_id: String,
    pub accent_color: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewView {
    pub consumer_id: Uuid,
    #[serde(flatten)]
    pub state: PreviewState,
    /// A failed preview renders a neutral placeholder rather than an error page.
    pub fallback: bool,
}

impl PreviewView {
    fn new(consumer_id: Uuid, state: PreviewState) -> Self {
        let fallback = state.is_failed();
        Self {
            consumer_id,
            state,
            fallback,
        }
    }
}

fn unknown_consumer(id: Uuid) -> AppError {
    AppError::NotFound(format!("Preview consumer {id} not found"))
}

/// POST /api/v1/previews
pub async fn handle_open_preview(
    State(state): State<AppState>,
    Json(req): Json<OpenPreviewRequest>,
) -> (StatusCode, Json<OpenPreviewResponse>) {
    let consumer_id = state.previews.open(req.data, req.font_family);
    (StatusCode::CREATED, Json(OpenPreviewResponse { consumer_id }))
}

/// PUT /api/v1/previews/:id
/// Supersedes whatever the consumer was generating; returns immediately.
pub async fn handle_request_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PreviewRequestBody>,
) -> Result<(StatusCode, Json<PreviewView>), AppError> {
    if req.template_id.trim().is_empty() {
        return Err(AppError::Validation("templateId is required".to_string()));
    }
    let key = PreviewKey::new(
        req.template_id.trim(),
        req.accent_color
            .unwrap_or_else(|| state.config.default_accent_color.clone()),
    );
    let preview = state
        .previews
        .request(&id, key)
        .ok_or_else(|| unknown_consumer(id))?;
    Ok((StatusCode::ACCEPTED, Json(PreviewView::new(id, preview))))
}

/// GET /api/v1/previews/:id
pub async fn handle_get_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PreviewView>, AppError> {
    let preview = state.previews.state(&id).ok_or_else(|| unknown_consumer(id))?;
    Ok(Json(PreviewView::new(id, preview)))
}

/// DELETE /api/v1/previews/:id
pub async fn handle_close_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.previews.close(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(unknown_consumer(id))
    }
}

/// GET /api/v1/artifacts/:handle
/// Serves the document while its handle is live.
pub async fn handle_get_artifact(
    State(state): State<AppState>,
    Path(handle): Path<Uuid>,
) -> Result<Response, AppError> {
    let artifact = state
        .artifacts()
        .get(&handle)
        .ok_or_else(|| AppError::NotFound(format!("Artifact {handle} not found or revoked")))?;
    Ok((
        [(header::CONTENT_TYPE, artifact.content_type())],
        artifact.bytes,
    )
        .into_response())
}
