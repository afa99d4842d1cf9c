//! Page geometry and typographic settings for the CV renderer.
//!
//! All distances are PDF points (1/72 in). The vertical cursor used by the
//! paginator grows downward from the top edge of the page.

use serde::{Deserialize, Serialize};

use crate::render::RenderError;

/// Fixed page size and uniform margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
}

impl PageGeometry {
    /// A4 portrait, 210 × 297 mm.
    pub fn a4(margin_pt: f32) -> Self {
        Self {
            width_pt: 595.28,
            height_pt: 841.89,
            margin_pt,
        }
    }

    pub fn usable_width(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }

    /// Lowest cursor position content may reach.
    pub fn bottom_limit(&self) -> f32 {
        self.height_pt - self.margin_pt
    }
}

/// Layout parameters for the CV document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub geometry: PageGeometry,
    pub name_size_pt: f32,
    pub contact_size_pt: f32,
    pub title_size_pt: f32,
    pub body_size_pt: f32,
    /// Baseline-to-baseline distance as a multiple of the font size.
    pub line_height_factor: f32,
    /// Extra space added after every content line.
    pub line_gap_pt: f32,
    /// Horizontal offset of bullet text from the bullet glyph.
    pub bullet_indent_pt: f32,
    /// Vertical space before each section title.
    pub section_gap_pt: f32,
}

/// Returns the default config: A4, 40pt margins, 10pt body text.
pub fn default_layout_config() -> LayoutConfig {
    LayoutConfig {
        geometry: PageGeometry::a4(40.0),
        name_size_pt: 22.0,
        contact_size_pt: 10.0,
        title_size_pt: 13.0,
        body_size_pt: 10.0,
        line_height_factor: 1.15,
        line_gap_pt: 3.0,
        bullet_indent_pt: 12.0,
        section_gap_pt: 10.0,
    }
}

impl LayoutConfig {
    /// Height of one line of text at `size_pt`.
    pub fn line_height(&self, size_pt: f32) -> f32 {
        size_pt * self.line_height_factor
    }

    /// Rejects geometry that cannot hold a single line of body text.
    pub fn validate(&self) -> Result<(), RenderError> {
        let g = &self.geometry;
        let sizes = [
            self.name_size_pt,
            self.contact_size_pt,
            self.title_size_pt,
            self.body_size_pt,
        ];
        if sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(RenderError::Layout("font sizes must be positive".to_string()));
        }
        if !(self.line_height_factor.is_finite() && self.line_height_factor >= 1.0) {
            return Err(RenderError::Layout(
                "line height factor must be at least 1.0".to_string(),
            ));
        }
        if g.margin_pt < 0.0 || self.line_gap_pt < 0.0 || self.section_gap_pt < 0.0 {
            return Err(RenderError::Layout("spacing must not be negative".to_string()));
        }
        if g.usable_width() <= self.bullet_indent_pt + self.body_size_pt {
            return Err(RenderError::Layout(format!(
                "usable width {:.1}pt is too narrow",
                g.usable_width()
            )));
        }
        let tallest = sizes.iter().copied().fold(0.0_f32, f32::max);
        if g.bottom_limit() - g.margin_pt < self.line_height(tallest) + self.line_gap_pt {
            return Err(RenderError::Layout(format!(
                "usable height {:.1}pt cannot hold a line",
                g.bottom_limit() - g.margin_pt
            )));
        }
        Ok(())
    }
}
