/// Source position within a text (1-based line/column, 0-based byte offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number, one column per consumed character.
    pub column: u32,
    /// 0-based byte offset from start of text.
    pub offset: u32,
}

impl Position {
    pub fn new(line: u32, column: u32, offset: u32) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// A range in source text, from `start` (inclusive) to `end` (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Line of the first character covered by this span.
    pub fn line(&self) -> u32 {
        self.start.line
    }

    /// Merge two spans into one that covers both.
    pub fn merge(&self, other: &Span) -> Span {
        let start = if self.start.offset <= other.start.offset {
            self.start
        } else {
            other.start
        };
        let end = if self.end.offset >= other.end.offset {
            self.end
        } else {
            other.end
        };
        Span { start, end }
    }

    /// Byte range covered by this span, never empty.
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        let start = self.start.offset as usize;
        let end = (self.end.offset as usize).max(start + 1);
        start..end
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_covers_both() {
        let a = Span::new(Position::new(1, 1, 0), Position::new(1, 3, 2));
        let b = Span::new(Position::new(2, 1, 5), Position::new(2, 4, 8));
        let merged = b.merge(&a);
        assert_eq!(merged.start, a.start);
        assert_eq!(merged.end, b.end);
        assert_eq!(merged.line(), 1);
    }

    #[test]
    fn byte_range_is_never_empty() {
        let pos = Position::new(3, 7, 20);
        assert_eq!(Span::new(pos, pos).byte_range(), 20..21);
    }

    #[test]
    fn display_is_line_and_column() {
        let span = Span::new(Position::new(4, 9, 30), Position::new(4, 10, 31));
        assert_eq!(span.to_string(), "4:9");
    }
}
