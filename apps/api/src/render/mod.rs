// CV rendering: layout → PDF bytes → optional export to storage.
// render_cv is all-or-nothing: bytes are only returned once layout and encoding succeed.

pub mod export;
pub mod file_name;
pub mod handlers;
pub mod pdf;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::layout::{compose_document, paginate, LayoutConfig, LayoutReport};
use crate::models::cv::CvData;

pub use file_name::sanitize_file_name;

/// Failure anywhere between layout and storage.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Layout error: {0}")]
    Layout(String),

    #[error("PDF encoding error: {0}")]
    Encode(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// A finished PDF ready for download or export.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub file_name: String,
    pub bytes: Bytes,
    pub report: LayoutReport,
}

/// Summary returned to clients alongside a stored export.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSummary {
    pub file_name: String,
    pub page_count: usize,
    pub orphaned_titles: Vec<String>,
    pub size_bytes: usize,
}

impl RenderedPdf {
    pub fn summary(&self) -> RenderSummary {
        RenderSummary {
            file_name: self.file_name.clone(),
            page_count: self.report.page_count,
            orphaned_titles: self.report.orphaned_titles.clone(),
            size_bytes: self.bytes.len(),
        }
    }
}

/// Composes, paginates and encodes a CV. Synchronous and CPU-bound.
pub fn render_cv(cv: &CvData, title: &str, config: &LayoutConfig) -> Result<RenderedPdf, RenderError> {
    let document = compose_document(cv);
    let laid_out = paginate(&document, config)?;
    let bytes = pdf::write_pdf(&laid_out)?;
    let file_name = sanitize_file_name(title);

    info!(
        file_name = %file_name,
        pages = laid_out.report.page_count,
        size = bytes.len(),
        "Rendered CV PDF"
    );

    Ok(RenderedPdf {
        file_name,
        bytes: Bytes::from(bytes),
        report: laid_out.report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::default_layout_config;
    use crate::models::cv::{Experience, PersonalInfo};

    fn long_cv() -> CvData {
        CvData {
            personal_info: PersonalInfo {
                full_name: "Jane Doe".to_string(),
                email: "jane@x.com".to_string(),
                summary: Some("Engineer.".to_string()),
                ..Default::default()
            },
            experiences: (0..12)
                .map(|i| Experience {
                    title: format!("Engineer {i}"),
                    company: "Acme".to_string(),
                    start_date: "2015".to_string(),
                    end_date: Some("2016".to_string()),
                    achievements: (0..6)
                        .map(|j| format!("Shipped feature {j} that grew weekly active users by {j}0%"))
                        .collect(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_long_cv_is_multi_page() {
        let rendered = render_cv(&long_cv(), "Jane Doe — CV 2024", &default_layout_config()).unwrap();
        assert!(rendered.report.page_count > 1);
        assert_eq!(rendered.file_name, "jane_doe___cv_2024.pdf");

        let doc = lopdf::Document::load_mem(&rendered.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), rendered.report.page_count);
    }

    #[test]
    fn test_render_short_cv_is_single_page() {
        let cv = CvData {
            personal_info: PersonalInfo {
                full_name: "Sam".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let rendered = render_cv(&cv, "Sam", &default_layout_config()).unwrap();
        assert_eq!(rendered.report.page_count, 1);
        assert!(rendered.bytes.starts_with(b"%PDF-"));
        assert_eq!(rendered.summary().size_bytes, rendered.bytes.len());
    }

    #[test]
    fn test_invalid_layout_returns_error_and_no_bytes() {
        let mut config = default_layout_config();
        config.geometry.margin_pt = 1000.0;
        let result = render_cv(&long_cv(), "x", &config);
        assert!(matches!(result, Err(RenderError::Layout(_))));
    }
}
