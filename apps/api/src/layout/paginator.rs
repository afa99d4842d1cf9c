//! Greedy paginator. Lays a [`RenderDocument`] out across fixed-size pages.
//!
//! # Page-break policy
//! Before each block (name, contact, section title, content line) the block's
//! height is computed. If it does not fit between the cursor and the bottom
//! margin, a new page starts and the cursor returns to the top margin. The
//! check never looks past the next block, so a section title can end up alone
//! at the bottom of a page with its body on the next one. Such titles are
//! reported in [`LayoutReport::orphaned_titles`] and left in place.
//!
//! A new page is never started while the current one is still empty, so a
//! block taller than the usable height gets a page to itself.
//!
//! # Content lines
//! Section content is split into lines; blank lines are dropped. Each line is
//! a bullet (`* ` / `- `), a bold-only line (`**...**`) or plain text.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::layout::compose::RenderDocument;
use crate::layout::font_metrics::{get_metrics, FontFace};
use crate::layout::page::{LayoutConfig, PageGeometry};
use crate::render::RenderError;

pub const BULLET_GLYPH: &str = "\u{2022}";

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// A positioned drawing instruction. `baseline` is measured from the top edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawOp {
    Text {
        x: f32,
        baseline: f32,
        face: FontFace,
        size_pt: f32,
        text: String,
    },
    /// Horizontal hairline under a section title.
    Rule { x1: f32, x2: f32, y: f32 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    pub page_count: usize,
    /// Section titles whose first content line landed on a later page.
    pub orphaned_titles: Vec<String>,
    /// Bold-only lines shortened to fit the line width.
    pub truncated_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaidOutDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
    pub report: LayoutReport,
}

/// Classification of a single content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Bullet marker stripped.
    Bullet(&'a str),
    /// Surrounding `**` stripped.
    Bold(&'a str),
    Plain(&'a str),
}

/// Classifies a trimmed content line.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(rest) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
        LineKind::Bullet(rest.trim())
    } else if line.len() >= 4 && line.starts_with("**") && line.ends_with("**") {
        LineKind::Bold(line[2..line.len() - 2].trim())
    } else {
        LineKind::Plain(line)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor state
// ────────────────────────────────────────────────────────────────────────────

struct Cursor<'c> {
    config: &'c LayoutConfig,
    pages: Vec<Page>,
    y: f32,
    page_has_content: bool,
}

impl<'c> Cursor<'c> {
    fn new(config: &'c LayoutConfig) -> Self {
        Self {
            config,
            pages: vec![Page::default()],
            y: config.geometry.margin_pt,
            page_has_content: false,
        }
    }

    fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    /// Starts a new page if `needed` does not fit below the cursor.
    fn ensure_space(&mut self, needed: f32) {
        let limit = self.config.geometry.bottom_limit();
        if self.page_has_content && self.y + needed > limit {
            self.pages.push(Page::default());
            self.y = self.config.geometry.margin_pt;
            self.page_has_content = false;
        }
    }

    fn push(&mut self, op: DrawOp) {
        self.page_has_content = true;
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    /// Draws `lines` top-down starting at the cursor; returns the block height.
    fn draw_lines(&mut self, lines: &[String], x: f32, face: FontFace, size_pt: f32) -> f32 {
        let line_height = self.config.line_height(size_pt);
        for (i, line) in lines.iter().enumerate() {
            let baseline = self.y + size_pt + i as f32 * line_height;
            self.push(DrawOp::Text {
                x,
                baseline,
                face,
                size_pt,
                text: line.clone(),
            });
        }
        lines.len() as f32 * line_height
    }

    fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Height between the top and bottom margins.
    fn capacity(&self) -> f32 {
        self.config.geometry.bottom_limit() - self.config.geometry.margin_pt
    }

    /// Space that must be free before a block of `line_count` lines starts:
    /// the whole block, or its first line when the block exceeds a page.
    fn lead_height(&self, line_count: usize, size_pt: f32) -> f32 {
        let line_height = self.config.line_height(size_pt);
        let needed = line_count.max(1) as f32 * line_height;
        if needed <= self.capacity() {
            needed
        } else {
            line_height
        }
    }

    /// Draws a wrapped block whose lead height is already ensured. A block
    /// taller than a page continues line by line onto the following pages.
    fn place_block(&mut self, lines: &[String], x: f32, face: FontFace, size_pt: f32) {
        let line_height = self.config.line_height(size_pt);
        let needed = lines.len() as f32 * line_height;
        if needed <= self.capacity() {
            self.draw_lines(lines, x, face, size_pt);
            self.advance(needed);
            return;
        }
        for line in lines {
            self.ensure_space(line_height);
            self.draw_lines(std::slice::from_ref(line), x, face, size_pt);
            self.advance(line_height);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the document. Pure and CPU-bound; async callers wrap it in
/// `tokio::task::spawn_blocking`.
pub fn paginate(doc: &RenderDocument, config: &LayoutConfig) -> Result<LaidOutDocument, RenderError> {
    config.validate()?;

    let geometry = config.geometry;
    let margin = geometry.margin_pt;
    let usable = geometry.usable_width();
    let regular = get_metrics(FontFace::Regular);
    let bold = get_metrics(FontFace::Bold);

    let mut cursor = Cursor::new(config);
    let mut report = LayoutReport::default();

    // ── Header ──────────────────────────────────────────────────────────────
    let header = [
        (doc.name.trim(), FontFace::Bold, config.name_size_pt),
        (doc.contact.trim(), FontFace::Regular, config.contact_size_pt),
    ];
    for (text, face, size) in header {
        let metrics = get_metrics(face);
        for line in metrics.wrap_text(text, size, usable) {
            cursor.ensure_space(config.line_height(size));
            let x = centered_x(&geometry, metrics.width_pt(&line, size));
            let h = cursor.draw_lines(&[line], x, face, size);
            cursor.advance(h);
        }
    }

    // ── Sections ────────────────────────────────────────────────────────────
    let body = config.body_size_pt;
    let body_line = config.line_height(body);
    let rule_gap = 2.0_f32;

    for section in &doc.sections {
        if cursor.page_has_content {
            cursor.advance(config.section_gap_pt);
        }

        let title_size = config.title_size_pt;
        let (title, cut) = bold.truncate_to_width(section.title.trim(), title_size, usable);
        if cut {
            warn!(section = %section.title, "Section title truncated to fit the page width");
            report.truncated_lines += 1;
        }
        cursor.ensure_space(config.line_height(title_size) + rule_gap);
        let title_page = cursor.page_index();
        let h = cursor.draw_lines(&[title], margin, FontFace::Bold, title_size);
        cursor.advance(h + rule_gap);
        let y = cursor.y;
        cursor.push(DrawOp::Rule {
            x1: margin,
            x2: margin + usable,
            y,
        });
        cursor.advance(config.line_gap_pt);

        let mut first_line = true;
        for raw in section.content.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            match classify_line(line) {
                LineKind::Bullet(text) => {
                    let indent = config.bullet_indent_pt;
                    let wrapped = regular.wrap_text(text, body, usable - indent);
                    cursor.ensure_space(cursor.lead_height(wrapped.len(), body));
                    note_orphan(&mut report, &mut first_line, title_page, &cursor, &section.title);
                    cursor.draw_lines(&[BULLET_GLYPH.to_string()], margin, FontFace::Regular, body);
                    cursor.place_block(&wrapped, margin + indent, FontFace::Regular, body);
                }
                LineKind::Bold(text) => {
                    let (fitted, cut) = bold.truncate_to_width(text, body, usable);
                    if cut {
                        warn!(section = %section.title, "Bold CV line truncated to fit the page width");
                        report.truncated_lines += 1;
                    }
                    cursor.ensure_space(body_line);
                    note_orphan(&mut report, &mut first_line, title_page, &cursor, &section.title);
                    cursor.draw_lines(&[fitted], margin, FontFace::Bold, body);
                    cursor.advance(body_line);
                }
                LineKind::Plain(text) => {
                    let wrapped = regular.wrap_text(text, body, usable);
                    cursor.ensure_space(cursor.lead_height(wrapped.len(), body));
                    note_orphan(&mut report, &mut first_line, title_page, &cursor, &section.title);
                    cursor.place_block(&wrapped, margin, FontFace::Regular, body);
                }
            }
            cursor.advance(config.line_gap_pt);
        }
    }

    report.page_count = cursor.pages.len();
    if !report.orphaned_titles.is_empty() {
        warn!(
            orphaned = report.orphaned_titles.len(),
            pages = report.page_count,
            "CV layout left section titles at the bottom of a page"
        );
    }

    Ok(LaidOutDocument {
        geometry,
        pages: cursor.pages,
        report,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn centered_x(geometry: &PageGeometry, text_width: f32) -> f32 {
    ((geometry.width_pt - text_width) / 2.0).max(geometry.margin_pt)
}

/// Records `title` as orphaned when the section's first line starts on a later page.
fn note_orphan(
    report: &mut LayoutReport,
    first_line: &mut bool,
    title_page: usize,
    cursor: &Cursor<'_>,
    title: &str,
) {
    if *first_line {
        *first_line = false;
        if cursor.page_index() != title_page {
            report.orphaned_titles.push(title.to_string());
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
