//! Byte ranges into the scanned input.

use std::fmt;
use std::ops::Range;

/// Half-open byte range `start..end` into the input of a scan.
///
/// Offsets are always on `char` boundaries of the input they refer to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Span { start, end }
    }

    /// Zero-length span at `offset`.
    #[inline]
    pub const fn point(offset: usize) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if an offset is within this span.
    #[inline]
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Same length, moved right by `delta` bytes.
    ///
    /// Used when splicing tokens of a delegated scan into the outer stream.
    #[inline]
    #[must_use]
    pub const fn shifted(self, delta: usize) -> Span {
        Span {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    #[inline]
    pub const fn to_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_accessors() {
        let span = Span::new(10, 20);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
        assert!(span.contains(15));
        assert!(!span.contains(20));
        assert_eq!(span.to_range(), 10..20);
    }

    #[test]
    fn point_is_empty() {
        let span = Span::point(7);
        assert!(span.is_empty());
        assert!(!span.contains(7));
    }

    #[test]
    fn shifted_keeps_length() {
        let span = Span::new(2, 5).shifted(100);
        assert_eq!(span, Span::new(102, 105));
        assert_eq!(span.len(), 3);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Span::from(3..9)), "3..9");
    }
}
