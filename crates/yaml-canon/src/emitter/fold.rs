//! Line folding for `>` block scalars.

/// Fold `text` into the body of a folded block scalar.
///
/// Each source line is processed on its own:
///
/// - a line starting with whitespace is kept as-is on its own line, since
///   folded scalars never join "more indented" lines
/// - any other line is wrapped: once the column counter passes `columns`, the
///   next single space between two non-space characters becomes a line break
///
/// Every text line is followed by a blank line, which is how a folded scalar
/// spells a single line break. Trailing blank lines are trimmed.
pub(crate) fn fold(text: &str, columns: usize) -> String {
    let mut buf = String::new();
    let mut last_was_text = false;

    for line in source_lines(text) {
        if line.starts_with([' ', '\t']) {
            // the blank separator after a text line would read as an extra
            // line break next to a more-indented line
            if last_was_text && buf.ends_with("\n\n") {
                buf.pop();
            }
            buf.push_str(line);
            buf.push('\n');
            last_was_text = false;
        } else if line.is_empty() {
            buf.push('\n');
        } else {
            wrap_line(&mut buf, line, columns);
            if !buf.ends_with('\n') {
                buf.push('\n');
            }
            buf.push('\n');
            last_was_text = true;
        }
    }

    let trimmed = buf.trim_end_matches('\n').len();
    buf.truncate(trimmed);
    buf
}

/// Lines of `text`, dropping empty lines at the very end.
fn source_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

fn wrap_line(buf: &mut String, line: &str, columns: usize) {
    let chars: Vec<char> = line.chars().collect();
    let mut col = 0;

    for (i, &c) in chars.iter().enumerate() {
        let prev_solid = i > 0 && !chars[i - 1].is_whitespace();
        let next_solid = chars.get(i + 1).is_some_and(|n| !n.is_whitespace());

        if col > columns && c == ' ' && prev_solid && next_solid {
            buf.push('\n');
            col = 0;
        } else {
            buf.push(c);
        }
        col += 1;
    }
}
