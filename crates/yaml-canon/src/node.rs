//! Positioned node tree built from the yaml-rust2 event stream.
//!
//! This is the only module that talks to yaml-rust2's parser. Everything
//! downstream sees plain [`Node`] values: a kind, children, and a start/end
//! [`Span`]. yaml-rust2 only reports where an event starts, so scalar ends are
//! recovered here from the source text.

use crate::source_info::{SourceText, Span};
use crate::{Error, Result};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// How a scalar was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

impl ScalarStyle {
    /// Any style other than plain pins the scalar to a string.
    pub fn is_quoted(self) -> bool {
        self != ScalarStyle::Plain
    }
}

impl From<TScalarStyle> for ScalarStyle {
    fn from(style: TScalarStyle) -> Self {
        match style {
            TScalarStyle::Plain => ScalarStyle::Plain,
            TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
            TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
            TScalarStyle::Literal => ScalarStyle::Literal,
            _ => ScalarStyle::Folded,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A document and its root value (absent for `---` with nothing after it).
    Document(Option<Box<Node>>),
    Sequence(Vec<Node>),
    Mapping(Vec<(Node, Node)>),
    Scalar {
        text: String,
        style: ScalarStyle,
        /// Comment on a block scalar's header line (`|- # note`).
        header_comment: Option<String>,
    },
    Alias,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document(_) => "document",
            NodeKind::Sequence(_) => "sequence",
            NodeKind::Mapping(_) => "mapping",
            NodeKind::Scalar { .. } => "scalar",
            NodeKind::Alias => "alias",
        }
    }
}

/// A parse node with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, NodeKind::Scalar { .. })
    }
}

/// Parse `source` into one document node per YAML document in the stream.
///
/// # Errors
///
/// Returns [`Error::Scan`] if yaml-rust2 rejects the input.
pub fn parse_documents(source: &SourceText, content: &str) -> Result<Vec<Node>> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = NodeBuilder::new(source);

    // true = keep going past the first document so extra ones can be counted
    parser.load(&mut builder, true).map_err(Error::from)?;

    Ok(builder.documents)
}

/// Receives marked events and assembles [`Node`]s.
struct NodeBuilder<'a> {
    source: &'a SourceText,

    /// Containers still being filled
    stack: Vec<BuildNode>,

    /// Completed documents
    documents: Vec<Node>,
}

/// A container node being constructed during parsing.
enum BuildNode {
    Document {
        start: usize,
        root: Option<Node>,
    },
    Sequence {
        start: usize,
        items: Vec<Node>,
    },
    Mapping {
        start: usize,
        entries: Vec<(Node, Option<Node>)>,
    },
}

impl<'a> NodeBuilder<'a> {
    fn new(source: &'a SourceText) -> Self {
        Self {
            source,
            stack: Vec::new(),
            documents: Vec::new(),
        }
    }

    fn push_complete(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(BuildNode::Document { root, .. }) => {
                *root = Some(node);
            }
            Some(BuildNode::Sequence { items, .. }) => {
                items.push(node);
            }
            Some(BuildNode::Mapping { entries, .. }) => match entries.last_mut() {
                Some((_, value @ None)) => *value = Some(node),
                _ => entries.push((node, None)),
            },
            None => {
                // Bare node outside a document; yaml-rust2 never emits one.
                self.documents.push(node);
            }
        }
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::new(self.source.position(start), self.source.position(end))
    }

    /// End offset of a container whose closing event sits at `end_marker`.
    ///
    /// Flow containers end after their closing bracket. Block containers end
    /// where the next token starts.
    fn container_end(&self, start: usize, end_marker: &Marker) -> usize {
        let end = end_marker.index();
        match self.source.chars().get(start) {
            Some('[' | '{') => (end + 1).min(self.source.len()),
            _ => end,
        }
    }
}

impl MarkedEventReceiver for NodeBuilder<'_> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Nothing | Event::StreamStart | Event::StreamEnd => {}

            Event::DocumentStart { .. } => {
                self.stack.push(BuildNode::Document {
                    start: marker.index(),
                    root: None,
                });
            }

            Event::DocumentEnd => {
                let Some(BuildNode::Document { start, root }) = self.stack.pop() else {
                    return;
                };
                let end = root.as_ref().map_or(start, |root| root.span.end.offset);
                let node = Node {
                    kind: NodeKind::Document(root.map(Box::new)),
                    span: self.span(start, end),
                };
                self.documents.push(node);
            }

            Event::Scalar(text, style, _anchor_id, _tag) => {
                let style = ScalarStyle::from(style);
                let extent = scalar_extent(self.source, marker.index(), &text, style);
                let node = Node {
                    kind: NodeKind::Scalar {
                        text,
                        style,
                        header_comment: extent.header_comment,
                    },
                    span: self.span(extent.start, extent.end),
                };
                self.push_complete(node);
            }

            Event::SequenceStart(_anchor_id, _tag) => {
                self.stack.push(BuildNode::Sequence {
                    start: marker.index(),
                    items: Vec::new(),
                });
            }

            Event::SequenceEnd => {
                let Some(BuildNode::Sequence { start, items }) = self.stack.pop() else {
                    return;
                };
                let end = self.container_end(start, &marker);
                let node = Node {
                    kind: NodeKind::Sequence(items),
                    span: self.span(start, end),
                };
                self.push_complete(node);
            }

            Event::MappingStart(_anchor_id, _tag) => {
                self.stack.push(BuildNode::Mapping {
                    start: marker.index(),
                    entries: Vec::new(),
                });
            }

            Event::MappingEnd => {
                let Some(BuildNode::Mapping { start, entries }) = self.stack.pop() else {
                    return;
                };
                let end = self.container_end(start, &marker);
                // A block mapping is marked at the `:` after its first key.
                let start = entries
                    .first()
                    .map_or(start, |(key, _)| start.min(key.span.start.offset));
                let entries = entries
                    .into_iter()
                    .map(|(key, value)| {
                        let value = value.unwrap_or_else(|| Node {
                            kind: NodeKind::Scalar {
                                text: "~".to_string(),
                                style: ScalarStyle::Plain,
                                header_comment: None,
                            },
                            span: Span::point(key.span.end),
                        });
                        (key, value)
                    })
                    .collect();
                let node = Node {
                    kind: NodeKind::Mapping(entries),
                    span: self.span(start, end),
                };
                self.push_complete(node);
            }

            Event::Alias(_anchor_id) => {
                let at = self.source.position(marker.index());
                self.push_complete(Node {
                    kind: NodeKind::Alias,
                    span: Span::point(at),
                });
            }
        }
    }
}

/// Where a scalar starts and ends in the source.
#[derive(Debug, Clone, PartialEq)]
struct ScalarExtent {
    start: usize,
    end: usize,
    header_comment: Option<String>,
}

/// Find the extent of the scalar whose event is marked at `marker`.
///
/// Quoted scalars end at their closing quote. Plain and block scalars are
/// matched against the parsed text: folding and indentation only ever change
/// whitespace, so the non-whitespace characters of `text` appear in the source
/// in order. A scalar with no source text (an implicit null) ends where it
/// starts.
///
/// Block scalars are marked at their first content character, so their span
/// is widened back to the `|`/`>` indicator and the header line is searched
/// for a comment.
fn scalar_extent(source: &SourceText, marker: usize, text: &str, style: ScalarStyle) -> ScalarExtent {
    let chars = source.chars();
    let inline = |end| ScalarExtent {
        start: marker,
        end,
        header_comment: None,
    };
    match style {
        ScalarStyle::DoubleQuoted => inline(closing_quote(chars, marker, '"')),
        ScalarStyle::SingleQuoted => inline(closing_quote(chars, marker, '\'')),
        ScalarStyle::Plain => inline(match_text(chars, marker, marker, text)),
        ScalarStyle::Literal | ScalarStyle::Folded => {
            let Some(indicator) = block_indicator(chars, marker) else {
                return inline(match_text(chars, marker, marker, text));
            };
            let header_end = line_end(chars, indicator);
            let header = &chars[indicator..header_end];
            let header_comment = header
                .iter()
                .enumerate()
                .find(|(i, c)| **c == '#' && *i > 0 && header[i - 1].is_whitespace())
                .map(|(i, _)| header[i..].iter().collect::<String>().trim_end().to_string());
            let body = if indicator == marker { header_end } else { marker };
            ScalarExtent {
                start: indicator,
                end: match_text(chars, body, header_end, text),
                header_comment,
            }
        }
    }
}

/// Offset of the `|`/`>` that introduces the block scalar marked at `marker`.
///
/// The indicator sits on the last non-blank line before the marker. Failing
/// that, the marker itself may be on the indicator.
fn block_indicator(chars: &[char], marker: usize) -> Option<usize> {
    let marker = marker.min(chars.len());
    let mut before = marker;
    while before > 0 && chars[before - 1].is_whitespace() {
        before -= 1;
    }
    let line_start = chars[..before]
        .iter()
        .rposition(|c| *c == '\n')
        .map_or(0, |n| n + 1);
    (line_start..before)
        .find(|at| is_block_header(chars, *at))
        .or_else(|| is_block_header(chars, marker).then_some(marker))
}

/// Whether a block scalar header (`|`, `>-`, `|2+ # note`, ...) starts at `at`.
fn is_block_header(chars: &[char], at: usize) -> bool {
    if !matches!(chars.get(at), Some('|' | '>')) {
        return false;
    }
    if at > 0 && !chars[at - 1].is_whitespace() {
        return false;
    }
    let mut i = at + 1;
    while chars.get(i).is_some_and(|c| matches!(c, '-' | '+' | '0'..='9')) {
        i += 1;
    }
    let indicators_end = i;
    while chars.get(i).is_some_and(|c| matches!(c, ' ' | '\t')) {
        i += 1;
    }
    match chars.get(i) {
        None | Some('\n' | '\r') => true,
        Some('#') => i > indicators_end,
        Some(_) => false,
    }
}

fn line_end(chars: &[char], from: usize) -> usize {
    chars[from..]
        .iter()
        .position(|c| *c == '\n')
        .map_or(chars.len(), |n| from + n)
}

/// Offset just past the quote closing the scalar that opens at `start`.
fn closing_quote(chars: &[char], start: usize, quote: char) -> usize {
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        if quote == '"' && c == '\\' {
            i += 2;
            continue;
        }
        if c == quote {
            if quote == '\'' && chars.get(i + 1) == Some(&'\'') {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    chars.len()
}

/// Walk the source from `from`, matching the non-whitespace characters of
/// `text`. Returns the offset after the last matched character, or `fallback`
/// when nothing matches.
fn match_text(chars: &[char], from: usize, fallback: usize, text: &str) -> usize {
    let mut i = from;
    let mut end = fallback;
    for expected in text.chars().filter(|c| !c.is_whitespace()) {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if chars.get(i) != Some(&expected) {
            break;
        }
        i += 1;
        end = i;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn documents(content: &str) -> Vec<Node> {
        let source = SourceText::new(content);
        parse_documents(&source, content).unwrap()
    }

    fn root(content: &str) -> Node {
        let mut docs = documents(content);
        assert_eq!(docs.len(), 1);
        match docs.remove(0).kind {
            NodeKind::Document(Some(root)) => *root,
            other => panic!("expected a document with a root, got {other:?}"),
        }
    }

    #[test]
    fn test_counts_documents() {
        assert_eq!(documents("a: 1\n").len(), 1);
        assert_eq!(documents("--- 1\n--- 2\n").len(), 2);
        assert!(documents("").is_empty());
        assert!(documents("# only a comment\n").is_empty());
    }

    #[test]
    fn test_plain_scalar_span() {
        let node = root("- hello world # note\n");
        let NodeKind::Sequence(items) = node.kind else {
            panic!("expected sequence");
        };
        assert_eq!(items[0].span.start.column, 2);
        assert_eq!(items[0].span.end.column, 13);
        assert_eq!(items[0].span.end.line, 0);
    }

    #[test]
    fn test_quoted_scalar_spans() {
        let node = root("- \"a \\\" b\" # x\n- 'it''s' # y\n");
        let NodeKind::Sequence(items) = node.kind else {
            panic!("expected sequence");
        };
        assert_eq!((items[0].span.start.column, items[0].span.end.column), (2, 10));
        assert_eq!((items[1].span.start.column, items[1].span.end.column), (2, 9));
        assert!(matches!(
            items[1].kind,
            NodeKind::Scalar { style: ScalarStyle::SingleQuoted, .. }
        ));
    }

    #[test]
    fn test_block_scalar_span_and_header_comment() {
        let node = root("key: |- # note\n  one\n  two\n# after\nnext: 1\n");
        let NodeKind::Mapping(entries) = node.kind else {
            panic!("expected mapping");
        };
        let (_, value) = &entries[0];
        assert_eq!((value.span.start.line, value.span.start.column), (0, 5));
        assert_eq!((value.span.end.line, value.span.end.column), (2, 5));
        match &value.kind {
            NodeKind::Scalar {
                text,
                style,
                header_comment,
            } => {
                assert_eq!(text, "one\ntwo");
                assert_eq!(*style, ScalarStyle::Literal);
                assert_eq!(header_comment.as_deref(), Some("# note"));
            }
            other => panic!("expected scalar, got {other:?}"),
        }
    }

    #[test]
    fn test_block_scalar_body_hash_is_content() {
        let node = root("- |\n  one\n  # not a comment\n- >- # folded\n\n  two\n- b\n");
        let NodeKind::Sequence(items) = node.kind else {
            panic!("expected sequence");
        };
        assert_eq!((items[0].span.start.line, items[0].span.start.column), (0, 2));
        assert_eq!((items[0].span.end.line, items[0].span.end.column), (2, 17));
        assert!(matches!(
            &items[0].kind,
            NodeKind::Scalar { header_comment: None, .. }
        ));

        assert_eq!((items[1].span.start.line, items[1].span.start.column), (3, 2));
        assert_eq!((items[1].span.end.line, items[1].span.end.column), (5, 5));
        match &items[1].kind {
            NodeKind::Scalar { header_comment, .. } => {
                assert_eq!(header_comment.as_deref(), Some("# folded"));
            }
            other => panic!("expected scalar, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_block_scalar_ends_on_header() {
        let node = root("a: |\nb: 1\n");
        let NodeKind::Mapping(entries) = node.kind else {
            panic!("expected mapping");
        };
        let (_, value) = &entries[0];
        assert_eq!((value.span.start.line, value.span.start.column), (0, 3));
        assert_eq!((value.span.end.line, value.span.end.column), (0, 4));
    }

    #[test]
    fn test_block_header_detection() {
        let chars: Vec<char> = "a: |-2 # c\nb: >\nc: x|y\nd: |x\n".chars().collect();
        assert!(is_block_header(&chars, 3));
        assert!(is_block_header(&chars, 14));
        assert!(!is_block_header(&chars, 20));
        assert!(!is_block_header(&chars, 26));
    }

    #[test]
    fn test_mapping_span_starts_at_first_key() {
        let node = root("x:\n  \"a # b\": 1\ny: 2\n");
        assert_eq!(node.span.start.offset, 0);
        let NodeKind::Mapping(entries) = node.kind else {
            panic!("expected mapping");
        };
        let (_, inner) = &entries[0];
        assert_eq!((inner.span.start.line, inner.span.start.column), (1, 2));
    }

    #[test]
    fn test_multiline_plain_scalar_span() {
        let node = root("key: first\n  second # c\n");
        let NodeKind::Mapping(entries) = node.kind else {
            panic!("expected mapping");
        };
        let (_, value) = &entries[0];
        assert_eq!((value.span.end.line, value.span.end.column), (1, 8));
    }

    #[test]
    fn test_flow_container_ends_after_bracket() {
        let node = root("a: []\n");
        let NodeKind::Mapping(entries) = node.kind else {
            panic!("expected mapping");
        };
        let (_, value) = &entries[0];
        assert_eq!(value.span.start.column, 3);
        assert_eq!(value.span.end.column, 5);
    }

    #[test]
    fn test_alias_is_reported_as_alias() {
        let node = root("- &a x\n- *a\n");
        let NodeKind::Sequence(items) = node.kind else {
            panic!("expected sequence");
        };
        assert_eq!(items[1].kind, NodeKind::Alias);
    }

    #[test]
    fn test_match_text_stops_on_mismatch() {
        let chars: Vec<char> = "next: 1".chars().collect();
        assert_eq!(match_text(&chars, 0, 0, "~"), 0);
        assert_eq!(match_text(&chars, 0, 0, "next"), 4);
    }
}
