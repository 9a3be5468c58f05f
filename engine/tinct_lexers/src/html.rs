//! HTML, with `<style>` bodies handed to a CSS definition.

use std::sync::Arc;

use tinct_lexer::{BuildError, Group, Lexer, Next, PatternSpec};
use tinct_token::Category;

pub fn lexer(css: &Arc<Lexer>) -> Result<Lexer, BuildError> {
    Lexer::builder("html")
        .title("HTML")
        .description("HTML, the markup language of the web")
        .alias("htm")
        .filename("*.html")
        .filename("*.htm")
        .mimetype("text/html")
        .detect(|text| {
            let head = text.trim_start();
            head.get(..14)
                .is_some_and(|s| s.eq_ignore_ascii_case("<!doctype html"))
                || head.starts_with("<html")
        })
        .state("root", |s| {
            s.rule(r"[^<&]+", Category::TEXT);
            s.rule(r"&\S*?;", Category::NAME_ENTITY);
            s.rule("<!--", Category::COMMENT).push("comment");
            s.rule(
                PatternSpec::new(r"<!doctype[^>]*>").ignore_case(),
                Category::COMMENT_PREPROC,
            );
            s.groups(
                PatternSpec::new(r"(<)(\s*)(style)\b").ignore_case(),
                [
                    Group::emit(Category::PUNCTUATION),
                    Group::emit(Category::WHITESPACE),
                    Group::emit(Category::NAME_TAG).then(Next::push("style_tag")),
                ],
            );
            s.groups(
                r"(<)(\s*)(/)(\s*)([\w:.-]+)(\s*)(>)",
                [
                    Category::PUNCTUATION,
                    Category::WHITESPACE,
                    Category::PUNCTUATION,
                    Category::WHITESPACE,
                    Category::NAME_TAG,
                    Category::WHITESPACE,
                    Category::PUNCTUATION,
                ],
            );
            s.groups(
                r"(<)(\s*)([\w:.-]+)",
                [Category::PUNCTUATION, Category::WHITESPACE, Category::NAME_TAG],
            )
            .push("tag");
            s.rule(r"[<&]", Category::TEXT);
        })
        .state("comment", |s| {
            s.rule("-->", Category::COMMENT).pop();
            s.rule(r"[^-]+", Category::COMMENT);
            s.rule("-", Category::COMMENT);
        })
        .state("tag", |s| {
            s.rule(r"\s+", Category::WHITESPACE);
            s.groups(
                r"([\w:-]+)(\s*)(=)(\s*)",
                [
                    Group::emit(Category::NAME_ATTRIBUTE),
                    Group::emit(Category::WHITESPACE),
                    Group::emit(Category::OPERATOR),
                    Group::emit(Category::WHITESPACE).then(Next::push("attr")),
                ],
            );
            s.rule(r"[\w:-]+", Category::NAME_ATTRIBUTE);
            s.rule(r"/?\s*>", Category::PUNCTUATION).pop();
        })
        .state("attr", |s| {
            s.rule(r#""[^"]*""#, Category::STRING).pop();
            s.rule(r"'[^']*'", Category::STRING).pop();
            s.rule(r"[^\s>]+", Category::STRING).pop();
            s.rule(r"(?=>)", Category::TEXT).pop();
        })
        .state("style_tag", |s| {
            s.rule(">", Category::PUNCTUATION).goto("style_content");
            s.mixin("tag");
        })
        .state("style_content", |s| {
            s.delegate(
                PatternSpec::new(r".+?(?=<\s*/\s*style\s*>)")
                    .dot_all()
                    .ignore_case(),
                css,
            )
            .pop();
            s.rule(PatternSpec::new(r"(?=<\s*/\s*style)").ignore_case(), Category::TEXT)
                .pop();
            s.delegate(PatternSpec::new(".+").dot_all(), css).pop();
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

    fn html() -> Lexer {
        let css = Arc::new(crate::css::lexer().unwrap());
        lexer(&css).unwrap()
    }

    fn pairs<'a>(lexer: &Lexer, input: &'a str) -> Vec<(Category, &'a str)> {
        lexer.lex(input).map(|t| t.pair()).collect()
    }

    #[test]
    fn elements_and_attributes() {
        let lexer = html();
        assert_eq!(
            pairs(&lexer, r#"<a href="x" hidden>hi &amp;</a>"#),
            [
                (Category::PUNCTUATION, "<"),
                (Category::NAME_TAG, "a"),
                (Category::WHITESPACE, " "),
                (Category::NAME_ATTRIBUTE, "href"),
                (Category::OPERATOR, "="),
                (Category::STRING, "\"x\""),
                (Category::WHITESPACE, " "),
                (Category::NAME_ATTRIBUTE, "hidden"),
                (Category::PUNCTUATION, ">"),
                (Category::TEXT, "hi "),
                (Category::NAME_ENTITY, "&amp;"),
                (Category::PUNCTUATION, "<"),
                (Category::PUNCTUATION, "/"),
                (Category::NAME_TAG, "a"),
                (Category::PUNCTUATION, ">"),
            ]
        );
    }

    #[test]
    fn style_body_is_css() {
        let lexer = html();
        let input = "<style>p{color:red}</style>";
        let tokens = lexer.tokenize(input).unwrap();
        let got: Vec<_> = tokens.iter().map(|t| t.pair()).collect();
        assert_eq!(
            got,
            [
                (Category::PUNCTUATION, "<"),
                (Category::NAME_TAG, "style"),
                (Category::PUNCTUATION, ">"),
                (Category::NAME_TAG, "p"),
                (Category::PUNCTUATION, "{"),
                (Category::NAME_PROPERTY, "color"),
                (Category::PUNCTUATION, ":"),
                (Category::NAME, "red"),
                (Category::PUNCTUATION, "}"),
                (Category::PUNCTUATION, "<"),
                (Category::PUNCTUATION, "/"),
                (Category::NAME_TAG, "style"),
                (Category::PUNCTUATION, ">"),
            ]
        );
        // spans of the delegated tokens point into the HTML input
        assert_eq!(tokens[3].span.start, 7);
    }

    #[test]
    fn style_with_attributes_and_empty_body() {
        let lexer = html();
        assert_eq!(
            pairs(&lexer, "<STYLE media=print></style>"),
            [
                (Category::PUNCTUATION, "<"),
                (Category::NAME_TAG, "STYLE"),
                (Category::WHITESPACE, " "),
                (Category::NAME_ATTRIBUTE, "media"),
                (Category::OPERATOR, "="),
                (Category::STRING, "print"),
                (Category::PUNCTUATION, ">"),
                (Category::PUNCTUATION, "<"),
                (Category::PUNCTUATION, "/"),
                (Category::NAME_TAG, "style"),
                (Category::PUNCTUATION, ">"),
            ]
        );
    }

    #[test]
    fn unterminated_style_runs_to_end() {
        let lexer = html();
        let mut tokens = lexer.lex("<style>a{}");
        let got: Vec<_> = tokens.by_ref().map(|t| t.pair()).collect();
        assert_eq!(
            got[3..],
            [
                (Category::NAME_TAG, "a"),
                (Category::PUNCTUATION, "{"),
                (Category::PUNCTUATION, "}"),
            ]
        );
        assert_eq!(tokens.state_stack(), ["root"]);
    }

    #[test]
    fn comments_and_doctype() {
        let lexer = html();
        assert_eq!(
            pairs(&lexer, "<!DOCTYPE html><!-- a-b -->"),
            [
                (Category::COMMENT_PREPROC, "<!DOCTYPE html>"),
                (Category::COMMENT, "<!--"),
                (Category::COMMENT, " a"),
                (Category::COMMENT, "-"),
                (Category::COMMENT, "b "),
                (Category::COMMENT, "-->"),
            ]
        );
    }

    #[test]
    fn detects_documents() {
        let lexer = html();
        assert!(lexer.detect("  <!doctype html>\n<html>"));
        assert!(lexer.detect("<html lang=en>"));
        assert!(!lexer.detect("p { color: red }"));
    }
}
