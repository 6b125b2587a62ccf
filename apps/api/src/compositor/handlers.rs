use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{ResumeData, ResumeSettings};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub template_id: String,
    #[serde(default)]
    pub data: ResumeData,
    #[serde(default)]
    pub settings: RenderSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSettings {
    pub accent_color: Option<String>,
    pub font_family: Option<String>,
}

/// POST /api/v1/render
/// Composes the document and returns the PDF bytes.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let template_id = req.template_id.trim().to_string();
    if template_id.is_empty() {
        return Err(AppError::Validation("templateId is required".to_string()));
    }
    let accent_color = req
        .settings
        .accent_color
        .unwrap_or_else(|| state.config.default_accent_color.clone());
    let settings = ResumeSettings {
        font_family: req.settings.font_family,
        ..ResumeSettings::new(template_id.clone(), accent_color)
    };

    let compositor = state.compositor.clone();
    let data = req.data;
    let artifact = tokio::task::spawn_blocking(move || {
        compositor.compose(&settings.template_id, &data, &settings)
    })
    .await
    .map_err(|e| {
        AppError::Generation(format!("template '{template_id}' failed while composing: {e}"))
    })??;

    let disposition = format!("inline; filename=\"resume-{}.pdf\"", artifact.template_id);
    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (
                header::HeaderName::from_static("x-page-count"),
                artifact.page_count.to_string(),
            ),
        ],
        artifact.bytes,
    )
        .into_response())
}
