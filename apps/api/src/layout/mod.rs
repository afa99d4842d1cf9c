// CV layout: font metrics, page geometry, document composition and pagination.
// Pagination is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod compose;
pub mod font_metrics;
pub mod page;
pub mod paginator;

// Re-export the public API consumed by the render pipeline and handlers.
pub use compose::{compose_document, RenderDocument, RenderSection};
pub use font_metrics::FontFace;
pub use page::{default_layout_config, LayoutConfig, PageGeometry};
pub use paginator::{paginate, DrawOp, LaidOutDocument, LayoutReport, Page};
