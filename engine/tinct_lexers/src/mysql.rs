//! MySQL: generic SQL plus backtick identifiers, `#` comments, session
//! variables and MySQL-only keywords.

use tinct_lexer::{BuildError, KeywordSet, Lexer};
use tinct_token::Category;

const EXTRA_KEYWORDS: &str = "
    AUTO_INCREMENT CHANGE DATABASES DELAYED DESCRIBE DIV ENGINE EXPLAIN
    HIGH_PRIORITY IGNORE LOW_PRIORITY MODIFY REGEXP RENAME REPLACE RLIKE
    SHOW SQL_CALC_FOUND_ROWS STRAIGHT_JOIN TABLES UNSIGNED USE XOR ZEROFILL
";

pub fn lexer(sql: &Lexer) -> Result<Lexer, BuildError> {
    let keywords = match sql.keywords("keywords") {
        Some(base) => base.with(EXTRA_KEYWORDS.split_whitespace()),
        None => KeywordSet::ignore_case(EXTRA_KEYWORDS.split_whitespace()),
    };

    sql.extend("mysql")
        .title("MySQL")
        .description("MySQL, a popular relational database")
        .mimetype("text/x-mysql")
        .keywords("keywords", keywords)
        .prepend("root", |s| {
            s.rule("`", Category::NAME).push("backtick");
            s.rule(r"#.*", Category::COMMENT_SINGLE);
            s.rule(r"@@?[\w$.]+", Category::NAME_VARIABLE);
        })
        .state("backtick", |s| {
            s.rule("``", Category::STRING_ESCAPE);
            s.rule("`", Category::NAME).pop();
            s.rule("[^`]+", Category::NAME);
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

    fn mysql() -> Lexer {
        let sql = crate::sql::lexer().unwrap();
        lexer(&sql).unwrap()
    }

    fn pairs<'a>(lexer: &Lexer, input: &'a str) -> Vec<(Category, &'a str)> {
        lexer.lex(input).map(|t| t.pair()).collect()
    }

    #[test]
    fn backticks_and_variables() {
        let lexer = mysql();
        assert_eq!(
            pairs(&lexer, "SHOW `my``t` @x # c"),
            [
                (Category::KEYWORD, "SHOW"),
                (Category::WHITESPACE, " "),
                (Category::NAME, "`"),
                (Category::NAME, "my"),
                (Category::STRING_ESCAPE, "``"),
                (Category::NAME, "t"),
                (Category::NAME, "`"),
                (Category::WHITESPACE, " "),
                (Category::NAME_VARIABLE, "@x"),
                (Category::WHITESPACE, " "),
                (Category::COMMENT_SINGLE, "# c"),
            ]
        );
    }

    #[test]
    fn inherits_sql_rules() {
        let lexer = mysql();
        assert_eq!(
            pairs(&lexer, "select 'a' -- x"),
            [
                (Category::KEYWORD, "select"),
                (Category::WHITESPACE, " "),
                (Category::STRING_SINGLE, "'"),
                (Category::STRING_SINGLE, "a"),
                (Category::STRING_SINGLE, "'"),
                (Category::WHITESPACE, " "),
                (Category::COMMENT_SINGLE, "-- x"),
            ]
        );
    }

    #[test]
    fn base_is_untouched() {
        let sql = crate::sql::lexer().unwrap();
        let mysql = lexer(&sql).unwrap();
        assert_eq!(pairs(&sql, "show"), [(Category::NAME, "show")]);
        assert_eq!(pairs(&mysql, "show"), [(Category::KEYWORD, "show")]);
        assert_eq!(
            pairs(&sql, "@x"),
            [(Category::OPERATOR, "@"), (Category::NAME, "x")]
        );
        assert!(mysql.keywords("types").is_some_and(|t| t.contains("int")));
    }
}
