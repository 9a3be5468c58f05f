//! The unit of lexer output.

use std::fmt;

use crate::{Category, Span};

/// A labeled contiguous slice of the input.
///
/// `text` always equals `&input[span.to_range()]` for the input the token was
/// produced from.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token<'a> {
    pub text: &'a str,
    pub category: Category,
    pub span: Span,
}

impl<'a> Token<'a> {
    #[inline]
    pub const fn new(text: &'a str, category: Category, span: Span) -> Self {
        Token {
            text,
            category,
            span,
        }
    }

    /// Byte offset of the first byte.
    #[inline]
    pub const fn start(&self) -> usize {
        self.span.start
    }

    /// Byte offset one past the last byte.
    #[inline]
    pub const fn end(&self) -> usize {
        self.span.end
    }

    /// `(category, text)` pair, the shape most assertions want.
    #[inline]
    pub const fn pair(&self) -> (Category, &'a str) {
        (self.category, self.text)
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?} @ {:?})", self.category, self.text, self.span)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let token = Token::new("let", Category::KEYWORD, Span::new(4, 7));
        assert_eq!(token.start(), 4);
        assert_eq!(token.end(), 7);
        assert_eq!(token.pair(), (Category::KEYWORD, "let"));
    }

    #[test]
    fn debug_shows_category_text_and_span() {
        let token = Token::new("x", Category::NAME, Span::new(0, 1));
        assert_eq!(format!("{token:?}"), "Name(\"x\" @ 0..1)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_with_category_path() {
        let token = Token::new("1", Category::NUMBER_INTEGER, Span::new(0, 1));
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(
            json,
            r#"{"text":"1","category":"Literal.Number.Integer","span":{"start":0,"end":1}}"#
        );
    }
}
