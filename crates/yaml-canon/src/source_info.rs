//! Source positions for YAML nodes.

/// A position in the source text.
///
/// Lines and columns are 0-based and counted in characters, matching the
/// character index that yaml-rust2 reports in its markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    /// Character offset from the start of the source
    pub offset: usize,

    /// Line number (0-based)
    pub line: usize,

    /// Column number (0-based, in characters not bytes)
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

/// Start and end (exclusive) of a node in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A zero-width span, used for nodes with no source text (implicit nulls).
    pub fn point(at: Position) -> Self {
        Self { start: at, end: at }
    }
}

/// The source split into lines of characters.
///
/// Maps character offsets (what yaml-rust2 markers carry) to line/column
/// positions and slices text back out by position.
#[derive(Debug, Clone)]
pub(crate) struct SourceText {
    chars: Vec<char>,
    line_starts: Vec<usize>,
}

impl SourceText {
    pub fn new(source: &str) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let mut line_starts = vec![0];
        for (i, c) in chars.iter().enumerate() {
            if *c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { chars, line_starts }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// The characters of line `line`, without its line break.
    pub fn line(&self, line: usize) -> &[char] {
        let Some(&start) = self.line_starts.get(line) else {
            return &[];
        };
        let mut end = self
            .line_starts
            .get(line + 1)
            .map_or(self.chars.len(), |next| next - 1);
        if end > start && self.chars[end - 1] == '\r' {
            end -= 1;
        }
        &self.chars[start..end.max(start)]
    }

    /// Resolve a character offset to a position. Offsets past the end clamp
    /// to the end of input.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.chars.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position::new(offset, line, offset - self.line_starts[line])
    }

    /// Position just past the last character.
    pub fn end(&self) -> Position {
        self.position(self.chars.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_lookup() {
        let text = SourceText::new("a: 1\nbb: 2\n");
        assert_eq!(text.position(0), Position::new(0, 0, 0));
        assert_eq!(text.position(3), Position::new(3, 0, 3));
        assert_eq!(text.position(5), Position::new(5, 1, 0));
        assert_eq!(text.position(9), Position::new(9, 1, 4));
        assert_eq!(text.end(), Position::new(11, 2, 0));
    }

    #[test]
    fn test_lines() {
        let text = SourceText::new("one\r\ntwo\n");
        assert_eq!(text.line(0).iter().collect::<String>(), "one");
        assert_eq!(text.line(1).iter().collect::<String>(), "two");
        assert!(text.line(5).is_empty());
    }
}
