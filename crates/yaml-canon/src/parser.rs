//! Converts the positioned node tree into a [`Value`] and a [`CommentMap`].
//!
//! Every node gets a structural path: `-` per sequence step, `:key` per
//! mapping step, and a scalar's text appended at the leaf. The same rule is
//! used by the emitter, which is how comments find their way back.

use crate::comments::{CommentMap, extract_comment, join_comments};
use crate::node::{self, Node, NodeKind};
use crate::source_info::{Position, SourceText};
use crate::value::{Mapping, Scalar, Value};
use crate::{Error, Result};

/// Parse a single YAML document into a value tree and its comments.
///
/// # Example
///
/// ```rust
/// use yaml_canon::parse;
///
/// let (value, comments) = parse("- a # first\n- b\n").unwrap();
/// assert_eq!(value.as_sequence().map(Vec::len), Some(2));
/// assert_eq!(comments.get("-a"), Some("# first"));
/// ```
///
/// # Errors
///
/// - [`Error::Scan`] if the text is not valid YAML
/// - [`Error::UnsupportedDocument`] if it holds more than one document
/// - [`Error::UnexpectedNodeKind`] for aliases and non-scalar keys
pub fn parse(content: &str) -> Result<(Value, CommentMap)> {
    let source = SourceText::new(content);
    let mut documents = node::parse_documents(&source, content)?;
    if documents.len() > 1 {
        return Err(Error::UnsupportedDocument {
            documents: documents.len(),
        });
    }

    let mut ctx = ParseContext::new(&source);
    let value = match documents.pop() {
        None => ctx.empty_document(),
        Some(Node {
            kind: NodeKind::Document(None),
            ..
        }) => ctx.empty_document(),
        Some(Node {
            kind: NodeKind::Document(Some(root)),
            ..
        }) => {
            let value = ctx.visit(&root, "")?;
            ctx.finish();
            value
        }
        Some(other) => return Err(unexpected(&other, other.kind.name())),
    };

    tracing::debug!(comments = ctx.comments.len(), "parsed document");
    Ok((value, ctx.comments))
}

/// The node visited most recently, waiting for the gap that follows it.
struct Previous {
    path: String,
    end: Position,
    /// Block scalar header comment, folded into the gap comment
    header_comment: Option<String>,
}

/// Traversal state for one parse call.
struct ParseContext<'a> {
    source: &'a SourceText,
    comments: CommentMap,
    previous: Option<Previous>,
}

impl<'a> ParseContext<'a> {
    fn new(source: &'a SourceText) -> Self {
        Self {
            source,
            comments: CommentMap::new(),
            previous: None,
        }
    }

    /// A stream with no document: any comments in it lead an empty value.
    fn empty_document(&mut self) -> Value {
        let whole = extract_comment(self.source, Position::default(), self.source.end());
        self.comments.set_leading(whole);
        Value::null()
    }

    /// Attribute the gap ending at `start` to the previous node, or to the
    /// leading block when nothing has been visited yet.
    fn close_gap(&mut self, start: Position) {
        match self.previous.take() {
            None => {
                let gap = extract_comment(self.source, Position::default(), start);
                self.comments.set_leading(gap);
            }
            Some(previous) => {
                let gap = extract_comment(self.source, previous.end, start);
                if let Some(comment) = join_comments(previous.header_comment.as_deref(), Some(gap.as_str())) {
                    self.comments.insert(previous.path, comment);
                }
            }
        }
    }

    /// Attribute the text after the last node to the trailing block.
    fn finish(&mut self) {
        if let Some(previous) = self.previous.take() {
            if let Some(header) = previous.header_comment {
                self.comments.insert(previous.path, header);
            }
            let gap = extract_comment(self.source, previous.end, self.source.end());
            self.comments.set_trailing(gap);
        }
    }

    fn visit(&mut self, node: &Node, path: &str) -> Result<Value> {
        self.close_gap(node.span.start);

        match &node.kind {
            NodeKind::Scalar {
                text,
                style,
                header_comment,
            } => {
                let quoted = style.is_quoted();
                let value = if quoted {
                    Scalar::String(text.clone())
                } else {
                    Scalar::infer(text)
                };
                self.previous = Some(Previous {
                    path: format!("{path}{}", value.to_text()),
                    end: node.span.end,
                    header_comment: header_comment.clone(),
                });
                Ok(Value::Scalar { value, quoted })
            }

            NodeKind::Sequence(items) => {
                self.set_container(node, path);
                let child_path = format!("{path}-");
                items
                    .iter()
                    .map(|item| self.visit(item, &child_path))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Sequence)
            }

            NodeKind::Mapping(entries) => {
                self.set_container(node, path);
                let mut map = Mapping::with_capacity(entries.len());
                for (key_node, value_node) in entries {
                    let key = self.visit_key(key_node, path)?;
                    let value = self.visit(value_node, &format!("{path}:{key}"))?;
                    map.insert(key, value);
                }
                Ok(Value::Mapping(map))
            }

            NodeKind::Alias | NodeKind::Document(_) => Err(unexpected(node, node.kind.name())),
        }
    }

    /// Keys are leaf scalars under `path:`; their text becomes the key.
    fn visit_key(&mut self, node: &Node, path: &str) -> Result<String> {
        if !node.is_scalar() {
            return Err(unexpected(node, &format!("{} key", node.kind.name())));
        }
        let key = self.visit(node, &format!("{path}:"))?;
        Ok(key.as_scalar().map(Scalar::to_text).unwrap_or_default())
    }

    /// A container can only open a gap when it is empty; a non-empty one ends
    /// after its first child starts, which makes the gap come out empty.
    fn set_container(&mut self, node: &Node, path: &str) {
        self.previous = Some(Previous {
            path: path.to_string(),
            end: node.span.end,
            header_comment: None,
        });
    }
}

fn unexpected(node: &Node, kind: &str) -> Error {
    Error::UnexpectedNodeKind {
        kind: kind.to_string(),
        line: node.span.start.line + 1,
        column: node.span.start.column + 1,
    }
}
