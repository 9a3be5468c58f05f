//! Generic SQL. Keywords and type names are matched case-insensitively.

use tinct_lexer::{BuildError, Classify, KeywordSet, Lexer, PatternSpec};
use tinct_token::Category;

const KEYWORDS: &str = "
    ADD ALL ALTER AND ANY AS ASC AUTHORIZATION BEGIN BETWEEN BY CASCADE CASE
    CHECK COLUMN COMMIT CONSTRAINT CREATE CROSS CURRENT_DATE CURRENT_TIME
    CURRENT_TIMESTAMP CURSOR DATABASE DEFAULT DELETE DESC DISTINCT DROP
    ELSE END ESCAPE EXCEPT EXISTS FALSE FETCH FOREIGN FROM FULL FUNCTION
    GRANT GROUP HAVING IF IN INDEX INNER INSERT INTERSECT INTO IS JOIN KEY
    LEFT LIKE LIMIT NATURAL NOT NULL OFFSET ON OR ORDER OUTER PRIMARY
    PROCEDURE REFERENCES RETURNS REVOKE RIGHT ROLLBACK SCHEMA SELECT SET
    TABLE THEN TO TRANSACTION TRIGGER TRUE UNION UNIQUE UPDATE USING VALUES
    VIEW WHEN WHERE WITH
";

const TYPES: &str = "
    BIGINT BINARY BIT BLOB BOOLEAN CHAR CHARACTER DATE DATETIME DEC DECIMAL
    DOUBLE FLOAT INT INTEGER INTERVAL NCHAR NUMERIC NVARCHAR REAL SMALLINT
    TEXT TIME TIMESTAMP TINYINT VARBINARY VARCHAR
";

pub fn lexer() -> Result<Lexer, BuildError> {
    Lexer::builder("sql")
        .title("SQL")
        .description("Structured Query Language, for relational databases")
        .filename("*.sql")
        .mimetype("text/x-sql")
        .keywords("keywords", KeywordSet::ignore_case(KEYWORDS.split_whitespace()))
        .keywords("types", KeywordSet::ignore_case(TYPES.split_whitespace()))
        .state("root", |s| {
            s.rule(r"\s+", Category::WHITESPACE);
            s.rule(r"--.*", Category::COMMENT_SINGLE);
            s.rule(r"/\*", Category::COMMENT_MULTILINE).push("multiline_comments");
            s.rule(
                PatternSpec::new(r"(?:\d+\.\d*|\.\d+)(?:e[+-]?\d+)?").ignore_case(),
                Category::NUMBER_FLOAT,
            );
            s.rule(r"\d+", Category::NUMBER_INTEGER);
            s.rule("'", Category::STRING_SINGLE).push("single_string");
            s.rule("\"", Category::NAME_VARIABLE).push("double_string");
            s.rule(
                r"\w+",
                Classify::new(Category::NAME)
                    .set("keywords", Category::KEYWORD)
                    .set("types", Category::NAME_BUILTIN),
            );
            s.rule(r"[+*/<>=~!@#%&|^?-]+", Category::OPERATOR);
            s.rule(r"[;:()\[\],.]", Category::PUNCTUATION);
        })
        .state("multiline_comments", |s| {
            s.rule(r"/\*", Category::COMMENT_MULTILINE).push_self();
            s.rule(r"\*/", Category::COMMENT_MULTILINE).pop();
            s.rule(r"[^/*]+", Category::COMMENT_MULTILINE);
            s.rule(r"[/*]", Category::COMMENT_MULTILINE);
        })
        .state("single_string", |s| {
            s.rule(r"\\.", Category::STRING_ESCAPE);
            s.rule("''", Category::STRING_ESCAPE);
            s.rule("'", Category::STRING_SINGLE).pop();
            s.rule(r"[^\\']+", Category::STRING_SINGLE);
        })
        .state("double_string", |s| {
            s.rule("\"\"", Category::STRING_ESCAPE);
            s.rule("\"", Category::NAME_VARIABLE).pop();
            s.rule("[^\"]+", Category::NAME_VARIABLE);
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
    fn keywords_in_any_case() {
        assert_eq!(
            pairs("select Id from T where x>=1.5"),
            [
                (Category::KEYWORD, "select"),
                (Category::WHITESPACE, " "),
                (Category::NAME, "Id"),
                (Category::WHITESPACE, " "),
                (Category::KEYWORD, "from"),
                (Category::WHITESPACE, " "),
                (Category::NAME, "T"),
                (Category::WHITESPACE, " "),
                (Category::KEYWORD, "where"),
                (Category::WHITESPACE, " "),
                (Category::NAME, "x"),
                (Category::OPERATOR, ">="),
                (Category::NUMBER_FLOAT, "1.5"),
            ]
        );
    }

    #[test]
    fn types_strings_and_identifiers() {
        assert_eq!(
            pairs(r#"CAST('it''s' AS varchar) "a""b""#),
            [
                (Category::NAME, "CAST"),
                (Category::PUNCTUATION, "("),
                (Category::STRING_SINGLE, "'"),
                (Category::STRING_SINGLE, "it"),
                (Category::STRING_ESCAPE, "''"),
                (Category::STRING_SINGLE, "s"),
                (Category::STRING_SINGLE, "'"),
                (Category::WHITESPACE, " "),
                (Category::KEYWORD, "AS"),
                (Category::WHITESPACE, " "),
                (Category::NAME_BUILTIN, "varchar"),
                (Category::PUNCTUATION, ")"),
                (Category::WHITESPACE, " "),
                (Category::NAME_VARIABLE, "\""),
                (Category::NAME_VARIABLE, "a"),
                (Category::STRING_ESCAPE, "\"\""),
                (Category::NAME_VARIABLE, "b"),
                (Category::NAME_VARIABLE, "\""),
            ]
        );
    }

    #[test]
    fn nested_block_comments() {
        let lexer = lexer().unwrap();
        let mut tokens = lexer.lex("/* a /* b */ c */1");
        let got: Vec<_> = tokens.by_ref().map(|t| t.pair()).collect();
        assert_eq!(
            got,
            [
                (Category::COMMENT_MULTILINE, "/*"),
                (Category::COMMENT_MULTILINE, " a "),
                (Category::COMMENT_MULTILINE, "/*"),
                (Category::COMMENT_MULTILINE, " b "),
                (Category::COMMENT_MULTILINE, "*/"),
                (Category::COMMENT_MULTILINE, " c "),
                (Category::COMMENT_MULTILINE, "*/"),
                (Category::NUMBER_INTEGER, "1"),
            ]
        );
        assert_eq!(tokens.state_stack(), ["root"]);
    }

    #[test]
    fn line_comment() {
        assert_eq!(
            pairs("1 -- note\n2"),
            [
                (Category::NUMBER_INTEGER, "1"),
                (Category::WHITESPACE, " "),
                (Category::COMMENT_SINGLE, "-- note"),
                (Category::WHITESPACE, "\n"),
                (Category::NUMBER_INTEGER, "2"),
            ]
        );
    }
}
