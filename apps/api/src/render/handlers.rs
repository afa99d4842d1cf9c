//! Axum route handlers for CV rendering and export.

use axum::{
    extract::State,
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::layout::LayoutConfig;
use crate::models::cv::CvData;
use crate::render::{render_cv, RenderSummary, RenderedPdf};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub cv: CvData,
    /// Display title; the download name is derived from it.
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    #[serde(flatten)]
    pub summary: RenderSummary,
    pub location: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv/render
///
/// Renders the CV and returns it as a PDF attachment.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let rendered = render_in_background(request, &state.layout).await?;

    let disposition = format!("attachment; filename=\"{}\"", rendered.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (
                HeaderName::from_static("x-page-count"),
                rendered.report.page_count.to_string(),
            ),
        ],
        rendered.bytes,
    )
        .into_response())
}

/// POST /api/v1/cv/export
///
/// Renders the CV and hands the PDF to the configured export store.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<ExportResponse>, AppError> {
    let rendered = render_in_background(request, &state.layout).await?;
    let stored = state
        .exporter
        .store(&rendered.file_name, rendered.bytes.clone())
        .await?;
    info!(
        backend = ?state.config.export_backend,
        pages = rendered.report.page_count,
        "Exported CV to {}",
        stored.location
    );

    Ok(Json(ExportResponse {
        summary: rendered.summary(),
        location: stored.location,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Validates the request, then runs the CPU-bound render on the blocking pool.
async fn render_in_background(
    request: RenderRequest,
    layout: &LayoutConfig,
) -> Result<RenderedPdf, AppError> {
    if request.cv.personal_info.full_name.trim().is_empty() {
        return Err(AppError::Validation(
            "cv.personal_info.full_name cannot be empty".to_string(),
        ));
    }

    let layout = layout.clone();
    let rendered = tokio::task::spawn_blocking(move || {
        render_cv(&request.cv, &request.title, &layout)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    Ok(rendered)
}
