//! Canonical YAML emission.
//!
//! The output layout is fixed: a `---` marker, block sequences and mappings
//! indented by two spaces, `[]`/`{}` for empty containers, and scalars styled
//! by [`scalar::render_scalar`]. Comments are looked up by the same structural
//! paths the parser assigns and written inline after the node they follow.

mod fold;
mod scalar;

use crate::comments::{CommentMap, join_comments};
use crate::value::{Scalar, Value};
use scalar::{Rendered, render_key, render_scalar};

/// Render `value` as canonical YAML with `comments` reinjected.
///
/// `columns` is the width past which strings become folded block scalars.
///
/// # Example
///
/// ```rust
/// use yaml_canon::{dump, parse};
///
/// let (value, comments) = parse("b:   [ 1, 2 ] # pair\na: x\n").unwrap();
/// assert_eq!(dump(&value, &comments, 80), "---\nb:\n  - 1\n  - 2 # pair\na: x\n");
/// ```
pub fn dump(value: &Value, comments: &CommentMap, columns: usize) -> String {
    let mut emitter = Emitter {
        comments,
        columns,
        out: String::from("---\n"),
    };

    if let Some(leading) = comments.leading() {
        emitter.out.push_str(leading);
        emitter.out.push('\n');
    }

    emitter.emit(value, "", 0, 0);

    // The output always ends with a line break, trailing comments included.
    if let Some(trailing) = comments.trailing() {
        emitter.out.push_str(trailing);
        emitter.out.push('\n');
    }

    tracing::debug!(bytes = emitter.out.len(), "dumped document");
    emitter.out
}

struct Emitter<'a> {
    comments: &'a CommentMap,
    columns: usize,
    out: String,
}

impl Emitter<'_> {
    /// Write `value` at the current cursor.
    ///
    /// `indent` is the column nested block entries start at; `parent_indent`
    /// is the indent of the enclosing collection, which block scalar bodies
    /// are indented past.
    fn emit(&mut self, value: &Value, path: &str, indent: usize, parent_indent: usize) {
        match value {
            Value::Scalar { value, .. } => self.emit_scalar(value, path, parent_indent, None),

            Value::Sequence(items) if items.is_empty() => self.emit_empty("[]", path),
            Value::Sequence(items) => {
                let child_path = format!("{path}-");
                for item in items {
                    self.indent_line(indent);
                    self.out.push_str("- ");
                    self.emit(item, &child_path, indent + 2, indent);
                }
            }

            Value::Mapping(map) if map.is_empty() => self.emit_empty("{}", path),
            Value::Mapping(map) => {
                for (key, value) in map {
                    let key_path = format!("{path}:{key}");
                    self.indent_line(indent);
                    self.out.push_str(&render_key(key));
                    self.out.push(':');

                    match value {
                        Value::Scalar { value, .. } => {
                            self.out.push(' ');
                            let key_comment = self.comments.get(&key_path);
                            self.emit_scalar(value, &key_path, indent, key_comment);
                        }
                        _ if value.is_empty_container() => {
                            self.out.push(' ');
                            self.emit(value, &key_path, indent + 2, indent);
                        }
                        _ => {
                            self.push_comment(self.comments.get(&key_path));
                            self.out.push('\n');
                            self.emit(value, &key_path, indent + 2, indent);
                        }
                    }
                }
            }
        }
    }

    fn emit_empty(&mut self, marker: &str, path: &str) {
        self.out.push_str(marker);
        self.push_comment(self.comments.get(path));
        self.out.push('\n');
    }

    /// Write a scalar and its comment. A comment recorded on the owning key
    /// is written first.
    fn emit_scalar(
        &mut self,
        scalar: &Scalar,
        path: &str,
        parent_indent: usize,
        key_comment: Option<&str>,
    ) {
        let own_comment = self.comments.get(&format!("{path}{}", scalar.to_text()));
        let comment = join_comments(key_comment, own_comment);

        match render_scalar(scalar, self.columns) {
            Rendered::Inline(text) => {
                self.out.push_str(&text);
                self.push_comment(comment.as_deref());
                self.out.push('\n');
            }
            Rendered::Block { header, lines } => {
                self.out.push_str(&header);
                if let Some(comment) = comment {
                    // the header line has room for a single comment line
                    self.out.push(' ');
                    self.out.push_str(&comment.replace('\n', " "));
                }
                self.out.push('\n');
                let body_indent = " ".repeat(parent_indent + 2);
                for line in lines {
                    if !line.is_empty() {
                        self.out.push_str(&body_indent);
                        self.out.push_str(&line);
                    }
                    self.out.push('\n');
                }
            }
        }
    }

    /// Append an inline comment to the current line. Further comment lines
    /// are aligned under the first `#`.
    fn push_comment(&mut self, comment: Option<&str>) {
        let Some(comment) = comment else {
            return;
        };
        self.out.push(' ');
        let column = self.current_column();
        let mut lines = comment.split('\n');
        if let Some(first) = lines.next() {
            self.out.push_str(first);
        }
        for line in lines {
            self.out.push('\n');
            self.out.push_str(&" ".repeat(column));
            self.out.push_str(line);
        }
    }

    fn indent_line(&mut self, indent: usize) {
        if self.out.ends_with('\n') {
            self.out.push_str(&" ".repeat(indent));
        }
    }

    fn current_column(&self) -> usize {
        self.out
            .rsplit('\n')
            .next()
            .map_or(0, |line| line.chars().count())
    }
}
