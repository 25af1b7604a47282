//! Byte ranges and line lookup.
//!
//! Tokens and errors carry a `Span`; AST nodes do not, so equal programs
//! produce equal trees wherever they appear in a file.

use std::ops::Range;

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `pos`, used for end of input.
    #[inline]
    pub const fn empty(pos: u32) -> Self {
        Self::new(pos, pos)
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// The span as a `usize` range, for slicing and diagnostics.
    #[inline]
    pub fn range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// The covered text, or `""` when the span falls outside `source`.
    pub fn text(self, source: &str) -> &str {
        source.get(self.range()).unwrap_or("")
    }
}

/// Line start offsets of a source text.
#[derive(Debug)]
pub struct LineIndex {
    starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| (i + 1) as u32),
            )
            .collect();
        Self { starts }
    }

    /// Zero-based `(line, column)` of a byte offset. Columns count bytes.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = match self.starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        (line as u32, offset - self.starts[line])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_is_order_independent() {
        let a = Span::new(5, 10);
        let b = Span::new(8, 15);
        assert_eq!(a.merge(b), Span::new(5, 15));
        assert_eq!(b.merge(a), Span::new(5, 15));
    }

    #[test]
    fn test_text() {
        let source = "let answer = 42";
        assert_eq!(Span::new(4, 10).text(source), "answer");
        assert_eq!(Span::empty(15).text(source), "");
        assert_eq!(Span::new(10, 99).text(source), "");
    }

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("let a\nconst b = 2\n\nc");

        assert_eq!(index.line_col(0), (0, 0));
        assert_eq!(index.line_col(5), (0, 5)); // newline after `let a`
        assert_eq!(index.line_col(6), (1, 0));
        assert_eq!(index.line_col(16), (1, 10));
        assert_eq!(index.line_col(18), (2, 0));
        assert_eq!(index.line_col(19), (3, 0));
    }
}
