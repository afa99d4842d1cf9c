//! Section segmenter. Buckets the top-level blocks of a Markdown CV.
//!
//! # Heading roles
//! - H1: candidate name (first one wins)
//! - H2: section boundary; the heading text becomes the section title
//! - H3: contact line (first one wins), with a preamble paragraph as fallback
//!
//! Blocks before the first H2 that are neither the name nor the contact are
//! dropped. That is the long-standing behaviour of the CV editor, kept as is;
//! the number of dropped blocks is logged at debug level.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cv::ast::{parse_blocks, Node};
use crate::cv::serializer::serialize;

/// One `## Title` section and the Markdown that followed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvSection {
    pub title: String,
    pub content: String,
}

/// Structured view of a Markdown CV.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCv {
    pub name: String,
    pub contact: String,
    pub sections: Vec<CvSection>,
}

/// Parses a Markdown CV into name, contact and ordered sections.
pub fn parse_cv(markdown: &str) -> ParsedCv {
    segment(&parse_blocks(markdown))
}

struct SectionAccumulator<'a> {
    title: String,
    nodes: Vec<Node<'a>>,
}

impl SectionAccumulator<'_> {
    fn finish(self) -> CvSection {
        CvSection {
            title: self.title,
            content: serialize(&self.nodes),
        }
    }
}

/// Single-pass classification of top-level blocks.
///
/// Total over any node sequence: missing structure degrades to empty fields.
pub fn segment(nodes: &[Node<'_>]) -> ParsedCv {
    let first_section = nodes
        .iter()
        .position(|n| n.heading_depth() == Some(2))
        .unwrap_or(nodes.len());

    let name_idx = nodes.iter().position(|n| n.heading_depth() == Some(1));
    let contact_idx = nodes
        .iter()
        .enumerate()
        .position(|(i, n)| n.heading_depth() == Some(3) || (i < first_section && n.is_paragraph()));

    let mut sections = Vec::new();
    let mut open: Option<SectionAccumulator<'_>> = None;
    let mut discarded = 0usize;

    for (i, node) in nodes.iter().enumerate() {
        if node.heading_depth() == Some(2) {
            if let Some(done) = open.take() {
                sections.push(done.finish());
            }
            open = Some(SectionAccumulator {
                title: node.text(),
                nodes: Vec::new(),
            });
            continue;
        }

        if Some(i) == name_idx || Some(i) == contact_idx {
            continue;
        }

        match open.as_mut() {
            Some(acc) => acc.nodes.push(node.clone()),
            None => discarded += 1,
        }
    }

    if let Some(done) = open.take() {
        sections.push(done.finish());
    }

    if discarded > 0 {
        debug!(discarded, "CV preamble blocks outside name/contact were dropped");
    }

    ParsedCv {
        name: name_idx.map(|i| nodes[i].text()).unwrap_or_default(),
        contact: contact_idx.map(|i| nodes[i].text()).unwrap_or_default(),
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::serializer::reserialize;

    const JANE: &str = "# Jane Doe\n\n### jane@x.com\n\n## Experience\n\nSenior Engineer at Acme\n\n## Skills\n\n- Go\n- Rust";

    #[test]
    fn test_reference_document() {
        let cv = parse_cv(JANE);
        assert_eq!(cv.name, "Jane Doe");
        assert_eq!(cv.contact, "jane@x.com");
        assert_eq!(cv.sections.len(), 2);
        assert_eq!(cv.sections[0].title, "Experience");
        assert_eq!(cv.sections[0].content, "Senior Engineer at Acme\n");
        assert_eq!(cv.sections[1].title, "Skills");
        assert_eq!(cv.sections[1].content, "- Go\n- Rust\n");
    }

    #[test]
    fn test_empty_input_is_zero_value() {
        assert_eq!(parse_cv(""), ParsedCv::default());
    }

    #[test]
    fn test_only_h1_and_paragraphs() {
        let cv = parse_cv("# Sam Lee\n\nsam@example.com | London\n\nAnother line.\n");
        assert_eq!(cv.name, "Sam Lee");
        assert_eq!(cv.contact, "sam@example.com | London");
        assert!(cv.sections.is_empty());
    }

    #[test]
    fn test_only_h1_without_paragraph() {
        let cv = parse_cv("# Sam Lee\n");
        assert_eq!(cv.name, "Sam Lee");
        assert_eq!(cv.contact, "");
        assert!(cv.sections.is_empty());
    }

    #[test]
    fn test_section_count_and_titles_follow_document_order() {
        let md = "## Zeta\n\nz\n\n## Alpha\n\n## Mid\n\nm\n";
        let cv = parse_cv(md);
        let titles: Vec<&str> = cv.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(cv.sections[1].content, "");
        assert_eq!(cv.name, "");
    }

    #[test]
    fn test_h3_wins_over_later_paragraph() {
        let cv = parse_cv("# A\n\n### a@b.c\n\nintro text\n\n## S\n\nbody\n");
        assert_eq!(cv.contact, "a@b.c");
        assert_eq!(cv.sections[0].content, "body\n");
    }

    #[test]
    fn test_paragraph_before_h3_wins() {
        let cv = parse_cv("# A\n\nfirst\n\n### second\n\n## S\n\nbody\n");
        assert_eq!(cv.contact, "first");
    }

    #[test]
    fn test_section_paragraph_never_becomes_contact() {
        let cv = parse_cv("# A\n\n## Summary\n\nSeasoned engineer.\n");
        assert_eq!(cv.contact, "");
        assert_eq!(cv.sections[0].content, "Seasoned engineer.\n");
    }

    #[test]
    fn test_claimed_h3_inside_section_is_not_duplicated() {
        let cv = parse_cv("# A\n\n## Contact\n\n### a@b.c\n\n- phone\n");
        assert_eq!(cv.contact, "a@b.c");
        assert_eq!(cv.sections[0].content, "- phone\n");
    }

    #[test]
    fn test_only_first_h1_is_name_and_later_h1_stays_in_section() {
        let cv = parse_cv("# First\n\n## S\n\n# Second\n");
        assert_eq!(cv.name, "First");
        assert!(cv.sections[0].content.contains("Second"));
    }

    #[test]
    fn test_preamble_blocks_are_dropped() {
        let cv = parse_cv("# A\n\ncontact\n\nstray paragraph\n\n---\n\n## S\n\nbody\n");
        assert_eq!(cv.contact, "contact");
        assert_eq!(cv.sections.len(), 1);
        assert_eq!(cv.sections[0].content, "body\n");
    }

    #[test]
    fn test_multi_line_contact_keeps_line_break() {
        let cv = parse_cv("# Jane Doe\n\njane@x.com\n+1 555 0100\n\n## Skills\n\n- Go\n");
        assert_eq!(cv.contact, "jane@x.com\n+1 555 0100");
        assert_eq!(cv.sections[0].content, "- Go\n");
    }

    #[test]
    fn test_multi_line_heading_keeps_line_break() {
        let cv = parse_cv("# Jane Doe\n\nWork\nHistory\n---\n\nAcme\n");
        assert_eq!(cv.contact, "");
        assert_eq!(cv.sections.len(), 1);
        assert_eq!(cv.sections[0].title, "Work\nHistory");
        assert_eq!(cv.sections[0].content, "Acme\n");
    }

    #[test]
    fn test_hard_break_adds_no_text() {
        let cv = parse_cv("# Jane Doe\n\njane@x.com  \n+1 555 0100\n\n## Skills\n");
        assert_eq!(cv.contact, "jane@x.com+1 555 0100");
    }

    #[test]
    fn test_h4_stays_inside_section() {
        let cv = parse_cv("## Experience\n\n#### Acme\n\nDid things.\n");
        assert!(cv.sections[0].content.contains("Acme"));
        assert!(cv.sections[0].content.contains("Did things."));
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse_cv(JANE), parse_cv(JANE));
    }

    #[test]
    fn test_section_content_is_round_trip_stable() {
        let md = "# A\n\n## Experience\n\n**Lead Engineer**\n\n- Led team of 5\n- Shipped v2\n\nBuilt three products.\n";
        let cv = parse_cv(md);
        for section in &cv.sections {
            assert_eq!(reserialize(&section.content), section.content);
        }
    }
}
