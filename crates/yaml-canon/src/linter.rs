//! The linter facade: parse once, edit, dump.

use crate::comments::CommentMap;
use crate::emitter;
use crate::value::Value;
use crate::{Result, parse, validate};
use serde::Deserialize;

/// Options for [`Linter::new`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LintOptions {
    /// Verify at construction that the canonical form loads to the same value
    /// as the input.
    pub paranoid: bool,

    /// Width past which strings are written as folded block scalars.
    pub columns: usize,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            paranoid: true,
            columns: 80,
        }
    }
}

/// A parsed document that can be edited and written back in canonical form.
///
/// # Example
///
/// ```rust
/// use yaml_canon::{LintOptions, Linter};
///
/// let mut linter = Linter::new("# pets\n- cat\n", LintOptions::default()).unwrap();
/// if let Some(items) = linter.contents_mut().as_sequence_mut() {
///     items.push("dog".into());
/// }
/// assert_eq!(linter.dump(), "---\n# pets\n- cat\n- dog\n");
/// ```
#[derive(Debug, Clone)]
pub struct Linter {
    contents: Value,
    comments: CommentMap,
    columns: usize,
}

impl Linter {
    /// Parse `text`. With `options.paranoid` set the canonical output is
    /// checked against the input before this returns.
    ///
    /// # Errors
    ///
    /// Any error from [`parse`], or [`crate::Error::Integrity`] when the
    /// paranoid check fails.
    pub fn new(text: &str, options: LintOptions) -> Result<Self> {
        let (contents, comments) = parse(text)?;
        let linter = Self {
            contents,
            comments,
            columns: options.columns,
        };

        if options.paranoid {
            validate(text, &linter.dump())?;
        }

        Ok(linter)
    }

    pub fn contents(&self) -> &Value {
        &self.contents
    }

    /// Mutable access to the document. Edits show up in the next [`dump`].
    ///
    /// [`dump`]: Linter::dump
    pub fn contents_mut(&mut self) -> &mut Value {
        &mut self.contents
    }

    pub fn comments(&self) -> &CommentMap {
        &self.comments
    }

    /// Render the current contents as canonical YAML.
    pub fn dump(&self) -> String {
        emitter::dump(&self.contents, &self.comments, self.columns)
    }
}
