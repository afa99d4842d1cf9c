use std::sync::Arc;

use crate::config::Config;
use crate::layout::LayoutConfig;
use crate::render::export::ExportStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Destination for `/cv/export`. Local directory or S3, per `EXPORT_BACKEND`.
    pub exporter: Arc<dyn ExportStore>,
    /// Page geometry and type sizes used by the paginator.
    pub layout: LayoutConfig,
}
