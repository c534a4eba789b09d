//! Comments recovered from the gaps between parse nodes.
//!
//! Comments are not part of the node tree. They are found by looking at the
//! source text between the end of one node and the start of the next, and are
//! keyed by the structural path of the node before the gap.

use crate::source_info::{Position, SourceText};
use std::collections::HashMap;

/// Comment text keyed by structural path.
///
/// Each entry is one or more `#`-led lines joined with `\n`, stored verbatim.
/// Two further entries hold the comment block before the first value and the
/// block after the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentMap {
    by_path: HashMap<String, String>,
    leading: Option<String>,
    trailing: Option<String>,
}

impl CommentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.by_path.get(path).map(String::as_str)
    }

    /// Comment block preceding the first value.
    pub fn leading(&self) -> Option<&str> {
        self.leading.as_deref()
    }

    /// Comment block following the last value.
    pub fn trailing(&self) -> Option<&str> {
        self.trailing.as_deref()
    }

    pub fn len(&self) -> usize {
        self.by_path.len() + usize::from(self.leading.is_some()) + usize::from(self.trailing.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record `comment` for `path`, ignoring empty comments. A path seen twice
    /// keeps the later comment.
    pub(crate) fn insert(&mut self, path: String, comment: String) {
        if !comment.is_empty() {
            self.by_path.insert(path, comment);
        }
    }

    pub(crate) fn set_leading(&mut self, comment: String) {
        if !comment.is_empty() {
            self.leading = Some(comment);
        }
    }

    pub(crate) fn set_trailing(&mut self, comment: String) {
        if !comment.is_empty() {
            self.trailing = Some(comment);
        }
    }
}

/// Extract the comment text lying between `from` and `to`.
///
/// A gap on one line is sliced by column. A gap over several lines takes the
/// rest of the first line, every line in between, and the start of the last.
/// From each piece only the text from its first `#` onward is kept. An empty
/// string means the gap holds no comment.
pub fn extract_comment(source: &SourceText, from: Position, to: Position) -> String {
    if to.line < from.line || (to.line == from.line && to.column <= from.column) {
        return String::new();
    }

    let mut kept = Vec::new();
    for line_no in from.line..=to.line {
        let line = source.line(line_no);
        let start = if line_no == from.line { from.column.min(line.len()) } else { 0 };
        let end = if line_no == to.line { to.column } else { line.len() };
        let piece = &line[start..end.clamp(start, line.len())];
        if let Some(hash) = piece.iter().position(|c| *c == '#') {
            kept.push(piece[hash..].iter().collect::<String>());
        }
    }
    kept.join("\n")
}

/// Join two comment blocks, skipping empty ones.
pub fn join_comments(first: Option<&str>, second: Option<&str>) -> Option<String> {
    match (first.filter(|c| !c.is_empty()), second.filter(|c| !c.is_empty())) {
        (Some(a), Some(b)) => Some(format!("{a}\n{b}")),
        (Some(a), None) => Some(a.to_string()),
        (None, Some(b)) => Some(b.to_string()),
        (None, None) => None,
    }
}
