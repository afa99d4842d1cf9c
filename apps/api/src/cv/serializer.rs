//! Section re-serializer: block nodes back to Markdown via `pulldown-cmark-to-cmark`.

use pulldown_cmark_to_cmark::{cmark_with_options, Options};
use tracing::warn;

use crate::cv::ast::{parse_blocks, Node};

/// Serializes a run of top-level blocks to Markdown.
///
/// Non-empty output ends with exactly one newline; an empty run yields `""`.
pub fn serialize(nodes: &[Node<'_>]) -> String {
    if nodes.is_empty() {
        return String::new();
    }

    let mut buffer = String::new();
    let options = Options {
        list_token: '-',
        ..Default::default()
    };

    let events = nodes.iter().flat_map(|node| node.events().iter());
    if let Err(e) = cmark_with_options(events, &mut buffer, options) {
        warn!("Markdown serialization failed, dropping section content: {e}");
        return String::new();
    }

    let body = buffer.trim_start_matches('\n').trim_end();
    if body.is_empty() {
        String::new()
    } else {
        format!("{body}\n")
    }
}

/// Parses and re-serializes a Markdown fragment into canonical form.
pub fn reserialize(markdown: &str) -> String {
    serialize(&parse_blocks(markdown))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_serializes_to_empty() {
        assert_eq!(serialize(&[]), "");
        assert_eq!(reserialize(""), "");
    }

    #[test]
    fn test_paragraph_gets_single_trailing_newline() {
        assert_eq!(reserialize("Senior Engineer at Acme"), "Senior Engineer at Acme\n");
        assert_eq!(
            reserialize("Senior Engineer at Acme\n\n\n"),
            "Senior Engineer at Acme\n"
        );
    }

    #[test]
    fn test_bullets_use_dash_token() {
        let out = reserialize("* Go\n* Rust\n");
        let lines: Vec<&str> = out.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines, vec!["- Go", "- Rust"]);
    }

    #[test]
    fn test_stable_under_double_round_trip() {
        let fragments = [
            "Built three products.",
            "- Led team of 5\n- Shipped v2\n",
            "**Promoted to Senior**",
            "First paragraph.\n\nSecond paragraph with *emphasis*.\n",
            "**Acme Corp**\n\n- Cut costs by 30%\n- Hired 4 engineers\n\nPlain closing line.\n",
        ];

        for fragment in fragments {
            let once = reserialize(fragment);
            let twice = reserialize(&once);
            assert_eq!(once, twice, "unstable round trip for {fragment:?}");
        }
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let source = "Intro\n\n- a\n- b\n";
        let nodes = parse_blocks(source);
        assert_eq!(serialize(&nodes), serialize(&nodes));
    }
}
