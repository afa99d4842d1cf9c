//! Block-level view over the `pulldown-cmark` event stream.
//!
//! `pulldown-cmark` yields a flat stream of `Start`/`End` events rather than a tree.
//! The segmenter only ever looks at the top-level children of a document, so a
//! [`Node`] is simply the contiguous run of events that makes up one top-level
//! block: everything from a depth-0 `Start(tag)` through its matching `End(tag)`,
//! or a single leaf event such as a thematic break.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

/// One top-level block of a Markdown document.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'a> {
    events: Vec<Event<'a>>,
}

impl<'a> Node<'a> {
    pub fn events(&self) -> &[Event<'a>] {
        &self.events
    }

    /// Heading depth (1–6) if this block is an ATX or setext heading.
    pub fn heading_depth(&self) -> Option<u8> {
        match self.events.first() {
            Some(Event::Start(Tag::Heading(level, _, _))) => Some(match level {
                HeadingLevel::H1 => 1,
                HeadingLevel::H2 => 2,
                HeadingLevel::H3 => 3,
                HeadingLevel::H4 => 4,
                HeadingLevel::H5 => 5,
                HeadingLevel::H6 => 6,
            }),
            _ => None,
        }
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self.events.first(), Some(Event::Start(Tag::Paragraph)))
    }

    fn is_html(&self) -> bool {
        matches!(self.events.first(), Some(Event::Html(_)))
    }

    /// Flattened text: every text and inline-code value in the block, depth-first,
    /// left-to-right, concatenated without separators. A soft line break inside
    /// the block is kept as `\n`; hard breaks carry no text.
    pub fn text(&self) -> String {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Text(value) | Event::Code(value) => Some(value.as_ref()),
                Event::SoftBreak => Some("\n"),
                _ => None,
            })
            .collect()
    }
}

/// Parses `source` and returns its top-level blocks in document order.
pub fn parse_blocks(source: &str) -> Vec<Node<'_>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let mut nodes: Vec<Node<'_>> = Vec::new();
    let mut current: Vec<Event<'_>> = Vec::new();
    let mut depth = 0usize;

    for event in Parser::new_ext(source, options) {
        let closes_block = match &event {
            Event::Start(_) => {
                depth += 1;
                false
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                depth == 0
            }
            _ => depth == 0,
        };

        // Raw HTML blocks arrive line by line with no enclosing tag.
        if depth == 0 && matches!(event, Event::Html(_)) {
            if let Some(last) = nodes.last_mut().filter(|n| n.is_html()) {
                last.events.push(event);
                continue;
            }
        }

        current.push(event);
        if closes_block {
            nodes.push(Node {
                events: std::mem::take(&mut current),
            });
        }
    }

    nodes
}
