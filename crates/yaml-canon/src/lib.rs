//! # yaml-canon
//!
//! Comment-preserving canonical YAML formatting.
//!
//! A document is parsed into a plain [`Value`] tree plus a [`CommentMap`]
//! that remembers, by structural path, which comments followed which node.
//! [`dump`] writes the tree back in one fixed layout and puts the comments
//! back where their paths still exist.
//!
//! ## Design
//!
//! Comments never live in the value tree. That keeps [`Value`] easy to edit:
//! change a value and the comment keyed on the old one simply stops
//! matching. yaml-rust2 supplies the event stream and scalar typing; the
//! position bookkeeping needed to find comments is done in this crate.
//!
//! ## Example
//!
//! ```rust
//! use yaml_canon::{LintOptions, Linter};
//!
//! let linter = Linter::new("# fruit\n- 'apple'\n- 7\n", LintOptions::default()).unwrap();
//! assert_eq!(linter.dump(), "---\n# fruit\n- apple\n- 7\n");
//! ```

mod comments;
mod emitter;
mod error;
mod linter;
mod node;
mod parser;
mod source_info;
mod validator;
mod value;

pub use comments::CommentMap;
pub use emitter::dump;
pub use error::{Error, IntegrityReport, Result};
pub use linter::{LintOptions, Linter};
pub use parser::parse;
pub use validator::{load_value, validate};
pub use value::{Mapping, Scalar, Value};
