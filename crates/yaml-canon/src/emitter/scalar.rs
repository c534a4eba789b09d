//! Scalar presentation: plain, double-quoted, literal or folded.

use super::fold::fold;
use crate::value::Scalar;

/// A scalar ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Rendered {
    /// Fits on the current line.
    Inline(String),

    /// A block scalar: the header (`|`, `>-`, ...) goes on the current line,
    /// the body lines follow, indented by the caller.
    Block { header: String, lines: Vec<String> },
}

/// Choose the presentation for a value scalar.
///
/// Text that spans lines or outgrows `columns` becomes a block scalar when a
/// block can reproduce it exactly: literal when every line fits, folded when
/// one does not. Other text is quoted when plain style would change its
/// meaning and written plain otherwise. Non-string scalars are always plain.
pub(crate) fn render_scalar(scalar: &Scalar, columns: usize) -> Rendered {
    let Scalar::String(text) = scalar else {
        return Rendered::Inline(scalar.to_text());
    };

    if (text.contains('\n') || text.chars().count() > columns) && block_safe(text) {
        let chomp = if text.ends_with('\n') { "" } else { "-" };
        let longest = text.split('\n').map(|line| line.chars().count()).max().unwrap_or(0);
        let (indicator, body) = if longest > columns {
            ('>', fold(text, columns))
        } else {
            ('|', text.strip_suffix('\n').unwrap_or(text).to_string())
        };
        return Rendered::Block {
            header: format!("{indicator}{chomp}"),
            lines: body.split('\n').map(str::to_string).collect(),
        };
    }

    if needs_quotes(text) {
        Rendered::Inline(double_quoted(text))
    } else {
        Rendered::Inline(text.clone())
    }
}

/// Render a mapping key.
///
/// Keys are compared by their text, so a key that loads as a number or a
/// boolean can stay plain as long as that value prints back as the same text.
pub(crate) fn render_key(key: &str) -> String {
    let retyped = Scalar::infer(key).to_text() != key;
    if retyped || has_special_chars(key) || !plain_safe(key) {
        double_quoted(key)
    } else {
        key.to_string()
    }
}

fn needs_quotes(text: &str) -> bool {
    let retyped = !text.contains('\n') && !Scalar::infer(text).is_string();
    retyped || has_special_chars(text) || !plain_safe(text)
}

/// Characters that always get a string quoted: flow and grouping brackets,
/// slashes, quotes and colons.
fn has_special_chars(text: &str) -> bool {
    text.contains(['{', '}', '(', ')', '/', '\'', '"', ':'])
}

/// Whether `text` reads back unchanged as a plain scalar in block context.
fn plain_safe(text: &str) -> bool {
    let Some(first) = text.chars().next() else {
        return false;
    };
    let second = text.chars().nth(1);

    if first.is_whitespace() || text.ends_with(char::is_whitespace) {
        return false;
    }
    if ",[]{}#&*!|>'\"%@`".contains(first) {
        return false;
    }
    if matches!(first, '-' | '?' | ':') && second.is_none_or(char::is_whitespace) {
        return false;
    }
    if text.starts_with("---") || text.starts_with("...") {
        return false;
    }
    if text.contains(" #") || text.contains(": ") || text.contains(":\t") || text.contains("\t#") {
        return false;
    }
    !text.chars().any(|c| (c.is_control() && c != '\t') || is_special_break(c))
}

/// Whether a block scalar reproduces `text` exactly.
fn block_safe(text: &str) -> bool {
    if text.ends_with("\n\n") {
        return false;
    }
    if text.chars().any(|c| (c.is_control() && c != '\t' && c != '\n') || is_special_break(c)) {
        return false;
    }
    let lines: Vec<&str> = text.strip_suffix('\n').unwrap_or(text).split('\n').collect();
    // indentation is detected from the first non-empty line
    if lines
        .iter()
        .find(|line| !line.is_empty())
        .is_none_or(|line| line.starts_with([' ', '\t']))
    {
        return false;
    }
    !lines
        .iter()
        .any(|line| !line.is_empty() && line.trim_matches([' ', '\t']).is_empty())
}

fn is_special_break(c: char) -> bool {
    matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}')
}

/// A double-quoted YAML scalar with the escapes yaml-rust2 understands.
pub(crate) fn double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            '\u{1b}' => out.push_str("\\e"),
            '\u{85}' => out.push_str("\\N"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            c if c.is_control() && (c as u32) < 0x100 => {
                out.push_str(&format!("\\x{:02X}", c as u32));
            }
            c if c.is_control() || c == '\u{feff}' => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
