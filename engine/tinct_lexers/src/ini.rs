//! INI configuration files.

use tinct_lexer::{BuildError, Group, Lexer, Next};
use tinct_token::Category;

pub fn lexer() -> Result<Lexer, BuildError> {
    Lexer::builder("ini")
        .title("INI")
        .description("the INI configuration format")
        .alias("cfg")
        .filename("*.ini")
        .filename("*.cfg")
        .mimetype("text/x-ini")
        .state("basic", |s| {
            s.rule(r"[;#].*", Category::COMMENT_SINGLE);
            s.rule(r"\s+", Category::WHITESPACE);
        })
        .state("root", |s| {
            s.rule(r"\[.*?\]", Category::NAME_NAMESPACE);
            s.groups(
                r"([^\s=;#\[][^=\n]*?)([ \t]*)(=)",
                [
                    Group::emit(Category::NAME_ATTRIBUTE),
                    Group::emit(Category::WHITESPACE),
                    Group::emit(Category::OPERATOR).then(Next::push("value")),
                ],
            );
            s.mixin("basic");
        })
        .state("value", |s| {
            s.rule(r"[ \t]+", Category::WHITESPACE);
            s.rule(r"\\\n", Category::STRING_ESCAPE);
            s.rule(r"\n", Category::WHITESPACE).pop();
            s.rule(
                r"-?\d+(?:\.\d+)?(?=[ \t]*(?:[;#]|$))",
                Category::NUMBER,
            );
            s.rule(
                r"(?i:true|false|yes|no|on|off)(?=[ \t]*(?:[;#]|$))",
                Category::KEYWORD_CONSTANT,
            );
            s.rule("\"", Category::STRING_DOUBLE).push("double_string");
            s.rule(r"[;#].*", Category::COMMENT_SINGLE);
            s.rule(r#"[^\n\\";#]+"#, Category::STRING);
            s.rule(r"\\", Category::STRING);
        })
        .state("double_string", |s| {
            s.rule(r"\\.", Category::STRING_ESCAPE);
            s.rule("\"", Category::STRING_DOUBLE).pop();
            s.rule(r#"[^"\\\n]+"#, Category::STRING_DOUBLE);
            // unterminated: give the newline back to `value`
            s.rule(r"(?=\n)", Category::TEXT).pop();
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

    fn pairs(input: &str) -> Vec<(Category, &str)> {
        let lexer = lexer().unwrap();
        lexer.lex(input).map(|t| t.pair()).collect()
    }

    #[test]
    fn section_and_pairs() {
        assert_eq!(
            pairs("[main]\nport = 80\ndebug=on ; note\n"),
            [
                (Category::NAME_NAMESPACE, "[main]"),
                (Category::WHITESPACE, "\n"),
                (Category::NAME_ATTRIBUTE, "port"),
                (Category::WHITESPACE, " "),
                (Category::OPERATOR, "="),
                (Category::WHITESPACE, " "),
                (Category::NUMBER, "80"),
                (Category::WHITESPACE, "\n"),
                (Category::NAME_ATTRIBUTE, "debug"),
                (Category::OPERATOR, "="),
                (Category::KEYWORD_CONSTANT, "on"),
                (Category::WHITESPACE, " "),
                (Category::COMMENT_SINGLE, "; note"),
                (Category::WHITESPACE, "\n"),
            ]
        );
    }

    #[test]
    fn numbers_only_when_whole_value() {
        assert_eq!(
            pairs("v=80px\n"),
            [
                (Category::NAME_ATTRIBUTE, "v"),
                (Category::OPERATOR, "="),
                (Category::STRING, "80px"),
                (Category::WHITESPACE, "\n"),
            ]
        );
    }

    #[test]
    fn unterminated_string_ends_at_line() {
        assert_eq!(
            pairs("a=\"x\\\"y\nb=1"),
            [
                (Category::NAME_ATTRIBUTE, "a"),
                (Category::OPERATOR, "="),
                (Category::STRING_DOUBLE, "\""),
                (Category::STRING_DOUBLE, "x"),
                (Category::STRING_ESCAPE, "\\\""),
                (Category::STRING_DOUBLE, "y"),
                (Category::WHITESPACE, "\n"),
                (Category::NAME_ATTRIBUTE, "b"),
                (Category::OPERATOR, "="),
                (Category::NUMBER, "1"),
            ]
        );
    }

    #[test]
    fn comment_lines() {
        assert_eq!(
            pairs("# top\n"),
            [
                (Category::COMMENT_SINGLE, "# top"),
                (Category::WHITESPACE, "\n"),
            ]
        );
    }
}
