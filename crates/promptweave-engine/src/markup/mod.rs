//! Serialization to and from the tagged markup format.
//!
//! The grammar is deliberately flat: `<TAG>CONTENT</TAG>` where `TAG` matches
//! `[A-Za-z0-9_-]+` and `CONTENT` runs to the first matching close tag for
//! the same name. There are no attributes, namespaces, or escapes, and nested
//! same-named tags mis-pair on import (the close of the inner tag ends the
//! outer match). The serializer never produces such nesting, so the
//! limitation only surfaces on hand-written input.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::models::{Block, TagName};

/// A `(tag, content)` pair recovered from markup text, in order of appearance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBlock {
    pub tag_name: TagName,
    pub content: String,
}

/// Shallow per-tag-name balance summary of a markup text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceReport {
    /// Tag names with more opens than closes, with the surplus count
    pub unclosed: Vec<(String, usize)>,
    /// Tag names with more closes than opens, with the surplus count
    pub unopened: Vec<(String, usize)>,
}

impl BalanceReport {
    pub fn is_balanced(&self) -> bool {
        self.unclosed.is_empty() && self.unopened.is_empty()
    }
}

fn open_tag_pattern() -> &'static Regex {
    static OPEN_TAG: OnceLock<Regex> = OnceLock::new();
    OPEN_TAG.get_or_init(|| Regex::new(r"<([A-Za-z0-9_-]+)>").expect("Invalid open tag regex"))
}

fn close_tag_pattern() -> &'static Regex {
    static CLOSE_TAG: OnceLock<Regex> = OnceLock::new();
    CLOSE_TAG.get_or_init(|| Regex::new(r"</([A-Za-z0-9_-]+)>").expect("Invalid close tag regex"))
}

/// Render one block as a markup fragment.
///
/// Content that trims to nothing collapses to `<tag></tag>` with no embedded
/// newline; anything else is emitted verbatim, unescaped and unindented,
/// between the tag lines.
pub fn block_fragment(tag_name: &TagName, content: &str) -> String {
    if content.trim().is_empty() {
        format!("<{tag_name}></{tag_name}>")
    } else {
        format!("<{tag_name}>\n{content}\n</{tag_name}>")
    }
}

/// Render the whole document: every block's fragment in sequence order,
/// joined by exactly one blank line. Empty sequence renders as an empty
/// string.
pub fn render_document<'a>(blocks: impl IntoIterator<Item = &'a Block>) -> String {
    blocks
        .into_iter()
        .map(Block::to_markup)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Scan markup text for maximal non-overlapping `<tag>…</tag>` matches,
/// left to right.
///
/// An opening tag only pairs with a close tag of the same name, and the
/// pairing is non-greedy: content runs to the first such close. Opens with no
/// matching close anywhere ahead are skipped. Tag token and content are both
/// trimmed.
pub fn parse_blocks(input: &str) -> Vec<ParsedBlock> {
    let mut parsed = Vec::new();
    let mut cursor = 0;

    while let Some(open) = open_tag_pattern().find_at(input, cursor) {
        let tag_token = input[open.start() + 1..open.end() - 1].trim();
        let close_tag = format!("</{tag_token}>");

        match input[open.end()..].find(&close_tag) {
            Some(offset) => {
                let content = &input[open.end()..open.end() + offset];
                // The token is a match of the tag grammar, so this cannot fail
                let tag_name =
                    TagName::new(tag_token).expect("open tag token matches the tag grammar");
                parsed.push(ParsedBlock {
                    tag_name,
                    content: content.trim().to_string(),
                });
                cursor = open.end() + offset + close_tag.len();
            }
            None => {
                // No matching close ahead; skip this open tag and rescan
                cursor = open.end();
            }
        }
    }

    parsed
}

/// Shallow heuristic balance check: count `<name>` against `</name>` per tag
/// name, with no pairing or ordering analysis. Useful for warning about
/// probably-malformed input before an import; never authoritative.
pub fn balance_report(input: &str) -> BalanceReport {
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();

    for open in open_tag_pattern().find_iter(input) {
        let name = &input[open.start() + 1..open.end() - 1];
        counts.entry(name).or_default().0 += 1;
    }
    for close in close_tag_pattern().find_iter(input) {
        let name = &input[close.start() + 2..close.end() - 1];
        counts.entry(name).or_default().1 += 1;
    }

    let mut report = BalanceReport::default();
    for (name, (opens, closes)) in counts {
        if opens > closes {
            report.unclosed.push((name.to_string(), opens - closes));
        } else if closes > opens {
            report.unopened.push((name.to_string(), closes - opens));
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::tag;
    use pretty_assertions::assert_eq;

    fn parsed(input: &str) -> Vec<(String, String)> {
        parse_blocks(input)
            .into_iter()
            .map(|p| (p.tag_name.to_string(), p.content))
            .collect()
    }

    // ============ Fragment rendering ============

    #[test]
    fn test_fragment_with_content() {
        assert_eq!(
            block_fragment(&tag("role"), "You are an assistant."),
            "<role>\nYou are an assistant.\n</role>"
        );
    }

    #[test]
    fn test_fragment_empty_content_collapses() {
        assert_eq!(block_fragment(&tag("role"), ""), "<role></role>");
        assert_eq!(block_fragment(&tag("role"), "  \n\t"), "<role></role>");
    }

    #[test]
    fn test_fragment_content_is_not_escaped() {
        assert_eq!(
            block_fragment(&tag("context"), "a < b && b > c"),
            "<context>\na < b && b > c\n</context>"
        );
    }

    // ============ Import scanning ============

    #[test]
    fn test_parse_adjacent_blocks_in_order() {
        assert_eq!(
            parsed("<role>X</role><context>Y</context>"),
            vec![
                ("role".to_string(), "X".to_string()),
                ("context".to_string(), "Y".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_trims_content() {
        assert_eq!(
            parsed("<role>\n  some text  \n</role>"),
            vec![("role".to_string(), "some text".to_string())]
        );
    }

    #[test]
    fn test_parse_ignores_text_between_blocks() {
        assert_eq!(
            parsed("preamble <a>1</a> interlude <b>2</b> coda"),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_close_must_match_open_name() {
        // </bar> does not close <foo>; the only complete pair is <bar>…</bar>
        assert_eq!(
            parsed("<foo>lost</bar><bar>kept</bar>"),
            vec![("bar".to_string(), "kept".to_string())]
        );
    }

    #[test]
    fn test_unclosed_open_is_skipped() {
        assert_eq!(
            parsed("<orphan><role>X</role>"),
            vec![("role".to_string(), "X".to_string())]
        );
    }

    #[test]
    fn test_nested_same_name_mispairs_at_first_close() {
        // Known limitation: the inner close ends the outer match
        assert_eq!(
            parsed("<a>outer <a>inner</a> tail</a>"),
            vec![("a".to_string(), "outer <a>inner".to_string())]
        );
    }

    #[test]
    fn test_different_tags_inside_content_survive() {
        assert_eq!(
            parsed("<role>see <context> for more</role>"),
            vec![("role".to_string(), "see <context> for more".to_string())]
        );
    }

    #[test]
    fn test_no_matches_yields_empty() {
        assert_eq!(parsed("no tags here"), Vec::new());
        assert_eq!(parsed(""), Vec::new());
        assert_eq!(parsed("<not a tag>text</not a tag>"), Vec::new());
    }

    #[test]
    fn test_empty_pair_yields_empty_content() {
        assert_eq!(
            parsed("<instructions></instructions>"),
            vec![("instructions".to_string(), "".to_string())]
        );
    }

    // ============ Balance heuristic ============

    #[test]
    fn test_balanced_document_reports_clean() {
        let report = balance_report("<role>\nX\n</role>\n\n<context></context>");
        assert!(report.is_balanced());
    }

    #[test]
    fn test_unclosed_and_unopened_are_counted() {
        let report = balance_report("<role>X<role>Y</role></context>");
        assert_eq!(report.unclosed, vec![("role".to_string(), 1)]);
        assert_eq!(report.unopened, vec![("context".to_string(), 1)]);
        assert!(!report.is_balanced());
    }

    #[test]
    fn test_balance_ignores_non_tag_angles() {
        let report = balance_report("a < b and b > a");
        assert!(report.is_balanced());
    }
}
