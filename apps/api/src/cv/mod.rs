// CV Markdown pipeline: block-level AST adapter, section segmenter, re-serializer.
// Everything here is pure and synchronous; handlers call it directly.

pub mod ast;
pub mod handlers;
pub mod segmenter;
pub mod serializer;

pub use segmenter::{parse_cv, CvSection, ParsedCv};
pub use serializer::reserialize;
