//! Axum route handlers for the CV Markdown API.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cv::{parse_cv, reserialize, ParsedCv};
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct MarkdownRequest {
    pub markdown: String,
}

#[derive(Debug, Serialize)]
pub struct MarkdownResponse {
    pub markdown: String,
}

/// POST /api/v1/cv/parse
///
/// Segments a Markdown CV into name, contact and titled sections.
/// Headingless input is not an error; it parses to empty fields.
pub async fn handle_parse(Json(request): Json<MarkdownRequest>) -> Result<Json<ParsedCv>, AppError> {
    let parsed = parse_cv(&request.markdown);
    info!(
        sections = parsed.sections.len(),
        has_name = !parsed.name.is_empty(),
        "Parsed CV markdown"
    );
    Ok(Json(parsed))
}

/// POST /api/v1/cv/reserialize
///
/// Returns the canonical Markdown form of a section body, as stored by the editor.
pub async fn handle_reserialize(
    Json(request): Json<MarkdownRequest>,
) -> Result<Json<MarkdownResponse>, AppError> {
    Ok(Json(MarkdownResponse {
        markdown: reserialize(&request.markdown),
    }))
}
