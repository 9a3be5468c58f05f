//! Cascading Style Sheets.
//!
//! Declarations are recognized inside `{ }` blocks; property names are
//! checked against a set of well-known properties so that typos stand out.

use tinct_lexer::{BuildError, Classify, Group, KeywordSet, Lexer, PatternSpec};
use tinct_token::Category;

const PROPERTIES: &str = "
    align-content align-items align-self animation animation-delay
    animation-duration animation-name background background-color
    background-image background-position background-repeat background-size
    border border-bottom border-collapse border-color border-left
    border-radius border-right border-style border-top border-width bottom
    box-shadow box-sizing clear color column-gap content cursor display
    fill filter flex flex-basis flex-direction flex-grow flex-shrink
    flex-wrap float font font-family font-size font-style font-weight gap
    grid grid-area grid-column grid-row grid-template-columns
    grid-template-rows height justify-content left letter-spacing
    line-height list-style margin margin-bottom margin-left margin-right
    margin-top max-height max-width min-height min-width opacity order
    outline overflow overflow-x overflow-y padding padding-bottom
    padding-left padding-right padding-top pointer-events position right
    row-gap stroke text-align text-decoration text-overflow text-transform
    top transform transition transition-duration vertical-align visibility
    white-space width word-break z-index
";

const VALUES: &str = "
    absolute auto block bold bolder both center column dashed dotted
    ellipsis fixed flex grid hidden inherit initial inline inline-block
    italic left lighter none normal nowrap pointer relative right row
    scroll solid space-between static sticky transparent underline unset
    uppercase visible wrap
";

pub fn lexer() -> Result<Lexer, BuildError> {
    let mut builder = Lexer::builder("css")
        .title("CSS")
        .description("Cascading Style Sheets, used to style web pages")
        .filename("*.css")
        .mimetype("text/css")
        .keywords("properties", KeywordSet::ignore_case(PROPERTIES.split_whitespace()))
        .keywords("values", KeywordSet::ignore_case(VALUES.split_whitespace()));
    let value = builder.state_id("value");

    builder
        .state("basic", |s| {
            s.rule(r"\s+", Category::WHITESPACE);
            s.rule(r"/\*", Category::COMMENT_MULTILINE).push("comment");
        })
        .state("strings", |s| {
            s.rule(r#""(?:\\.|[^"\\\n])*""#, Category::STRING_DOUBLE);
            s.rule(r"'(?:\\.|[^'\\\n])*'", Category::STRING_SINGLE);
        })
        .state("comment", |s| {
            s.rule(r"\*/", Category::COMMENT_MULTILINE).pop();
            s.rule(r"[^*]+", Category::COMMENT_MULTILINE);
            s.rule(r"\*", Category::COMMENT_MULTILINE);
        })
        .state("root", |s| {
            s.mixin("basic");
            s.rule(r"@[\w-]+", Category::KEYWORD);
            s.rule(r"\{", Category::PUNCTUATION).push("block");
            s.rule(r"\.[\w-]+", Category::NAME_CLASS);
            s.rule(r"#[\w-]+", Category::NAME_FUNCTION);
            s.rule(r"::?[\w-]+", Category::NAME_DECORATOR);
            s.rule(r"[\w-]+", Category::NAME_TAG);
            s.rule(r"[>+~*]", Category::OPERATOR);
            s.rule(r"[\[\]()=,;:]", Category::PUNCTUATION);
            s.mixin("strings");
        })
        .state("block", |s| {
            s.mixin("basic");
            s.rule(r"\}", Category::PUNCTUATION).pop();
            s.callback(r"(--[\w-]+|[\w-]+)(\s*)(:)", move |caps, cx| {
                let name = caps.get(1).unwrap_or_default();
                let category = if name.starts_with("--") {
                    Category::NAME_VARIABLE
                } else if cx
                    .keywords("properties")
                    .is_some_and(|set| set.contains(name))
                {
                    Category::NAME_PROPERTY
                } else {
                    Category::NAME_OTHER
                };
                cx.groups(&[category, Category::WHITESPACE, Category::PUNCTUATION]);
                cx.push(value);
            });
            s.rule(";", Category::PUNCTUATION);
        })
        .state("value", |s| {
            s.mixin("basic");
            s.rule(";", Category::PUNCTUATION).pop();
            s.rule(r"(?=\})", Category::TEXT).pop();
            s.rule(PatternSpec::new(r"!\s*important").ignore_case(), Category::KEYWORD_RESERVED);
            s.rule(r"#[0-9a-fA-F]{3,8}\b", Category::NUMBER_HEX);
            s.groups(
                r"(-?(?:\d+\.?\d*|\.\d+))(%|[a-zA-Z]+)?",
                [Category::NUMBER, Category::KEYWORD_TYPE],
            );
            s.groups(
                r"([\w-]+)(\()",
                [Group::emit(Category::NAME_FUNCTION), Group::emit(Category::PUNCTUATION)],
            );
            s.rule(
                r"[\w-]+",
                Classify::new(Category::NAME).set("values", Category::KEYWORD_CONSTANT),
            );
            s.rule(r"[(),/]", Category::PUNCTUATION);
            s.rule(r"[+*>=-]", Category::OPERATOR);
            s.mixin("strings");
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
    fn rule_set() {
        assert_eq!(
            pairs("a.b{color:red;margin:0 2px}"),
            [
                (Category::NAME_TAG, "a"),
                (Category::NAME_CLASS, ".b"),
                (Category::PUNCTUATION, "{"),
                (Category::NAME_PROPERTY, "color"),
                (Category::PUNCTUATION, ":"),
                (Category::NAME, "red"),
                (Category::PUNCTUATION, ";"),
                (Category::NAME_PROPERTY, "margin"),
                (Category::PUNCTUATION, ":"),
                (Category::NUMBER, "0"),
                (Category::WHITESPACE, " "),
                (Category::NUMBER, "2"),
                (Category::KEYWORD_TYPE, "px"),
                (Category::PUNCTUATION, "}"),
            ]
        );
    }

    #[test]
    fn property_kinds() {
        assert_eq!(
            pairs("{--gap: 1; colr: none}"),
            [
                (Category::PUNCTUATION, "{"),
                (Category::NAME_VARIABLE, "--gap"),
                (Category::PUNCTUATION, ":"),
                (Category::WHITESPACE, " "),
                (Category::NUMBER, "1"),
                (Category::PUNCTUATION, ";"),
                (Category::WHITESPACE, " "),
                (Category::NAME_OTHER, "colr"),
                (Category::PUNCTUATION, ":"),
                (Category::WHITESPACE, " "),
                (Category::KEYWORD_CONSTANT, "none"),
                (Category::PUNCTUATION, "}"),
            ]
        );
    }

    #[test]
    fn functions_colors_and_comments() {
        assert_eq!(
            pairs("p{color:#fff /* x */ !important;width:calc(1% + 2em)}"),
            [
                (Category::NAME_TAG, "p"),
                (Category::PUNCTUATION, "{"),
                (Category::NAME_PROPERTY, "color"),
                (Category::PUNCTUATION, ":"),
                (Category::NUMBER_HEX, "#fff"),
                (Category::WHITESPACE, " "),
                (Category::COMMENT_MULTILINE, "/*"),
                (Category::COMMENT_MULTILINE, " x "),
                (Category::COMMENT_MULTILINE, "*/"),
                (Category::WHITESPACE, " "),
                (Category::KEYWORD_RESERVED, "!important"),
                (Category::PUNCTUATION, ";"),
                (Category::NAME_PROPERTY, "width"),
                (Category::PUNCTUATION, ":"),
                (Category::NAME_FUNCTION, "calc"),
                (Category::PUNCTUATION, "("),
                (Category::NUMBER, "1"),
                (Category::KEYWORD_TYPE, "%"),
                (Category::WHITESPACE, " "),
                (Category::OPERATOR, "+"),
                (Category::WHITESPACE, " "),
                (Category::NUMBER, "2"),
                (Category::KEYWORD_TYPE, "em"),
                (Category::PUNCTUATION, ")"),
                (Category::PUNCTUATION, "}"),
            ]
        );
    }

    #[test]
    fn at_rule_and_pseudo_selectors() {
        assert_eq!(
            pairs("@media print{}a:hover, li::before{}"),
            [
                (Category::KEYWORD, "@media"),
                (Category::WHITESPACE, " "),
                (Category::NAME_TAG, "print"),
                (Category::PUNCTUATION, "{"),
                (Category::PUNCTUATION, "}"),
                (Category::NAME_TAG, "a"),
                (Category::NAME_DECORATOR, ":hover"),
                (Category::PUNCTUATION, ","),
                (Category::WHITESPACE, " "),
                (Category::NAME_TAG, "li"),
                (Category::NAME_DECORATOR, "::before"),
                (Category::PUNCTUATION, "{"),
                (Category::PUNCTUATION, "}"),
            ]
        );
    }

    #[test]
    fn strings_in_values() {
        assert_eq!(
            pairs(r#"q{content:"a\"b"}"#),
            [
                (Category::NAME_TAG, "q"),
                (Category::PUNCTUATION, "{"),
                (Category::NAME_PROPERTY, "content"),
                (Category::PUNCTUATION, ":"),
                (Category::STRING_DOUBLE, r#""a\"b""#),
                (Category::PUNCTUATION, "}"),
            ]
        );
    }
}
