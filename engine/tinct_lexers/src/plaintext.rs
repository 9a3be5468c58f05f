//! Plain text: the whole input is one `Text` token.

use tinct_lexer::{BuildError, Lexer, PatternSpec};
use tinct_token::Category;

pub fn lexer() -> Result<Lexer, BuildError> {
    Lexer::builder("plaintext")
        .title("Plain Text")
        .description("A boring lexer that doesn't highlight anything")
        .alias("text")
        .filename("*.txt")
        .mimetype("text/plain")
        .state("root", |s| {
            s.rule(PatternSpec::new(".+").dot_all(), Category::TEXT);
        })
        .build()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn one_token() {
        let lexer = lexer().unwrap();
        let pairs: Vec<_> = lexer.lex("a\nb ").map(|t| t.pair()).collect();
        assert_eq!(pairs, [(Category::TEXT, "a\nb ")]);
        assert_eq!(lexer.lex("").count(), 0);
    }
}
