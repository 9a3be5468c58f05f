//! POSIX shell and bash.
//!
//! Heredoc terminators are queued in the `heredocs` register when `<<TAG` is
//! seen and consumed line by line once the command line ends, so several
//! heredocs on one line are read back in order. `$( ... )` nests by pushing
//! the current state again.

use tinct_lexer::{BuildError, Classify, KeywordSet, Lexer};
use tinct_token::Category;

const KEYWORDS: &str = "
    if then else elif fi case esac for while until do done in function
    select return break continue time coproc
";

const BUILTINS: &str = "
    alias bg bind builtin cd command declare dirs disown echo enable eval
    exec exit export false fc fg getopts hash help history jobs kill let
    local logout popd printf pushd pwd read readonly set shift shopt source
    suspend test trap true type typeset ulimit umask unalias unset wait
";

const HEREDOCS: &str = "heredocs";

pub fn lexer() -> Result<Lexer, BuildError> {
    let mut builder = Lexer::builder("shell")
        .title("shell")
        .description("Various shell languages, including sh and bash")
        .alias("bash")
        .alias("sh")
        .alias("zsh")
        .filename("*.sh")
        .filename("*.bash")
        .filename(".bashrc")
        .mimetype("application/x-sh")
        .detect(|text| {
            text.lines()
                .next()
                .is_some_and(|line| line.starts_with("#!") && line.ends_with("sh"))
        })
        .keywords("keywords", KeywordSet::new(KEYWORDS.split_whitespace()))
        .keywords("builtins", KeywordSet::new(BUILTINS.split_whitespace()));
    let heredoc = builder.state_id("heredoc");

    builder
        .state("basic", |s| {
            s.rule(r"\\(?s:.)", Category::STRING_ESCAPE);
            s.rule(r"\$\(", Category::KEYWORD).push("paren");
            s.rule(r"\$\{[^}]*\}", Category::NAME_VARIABLE);
            s.rule(r"\$(?:\w+|[@#?$!*0-9-])", Category::NAME_VARIABLE);
            s.rule("\"", Category::STRING_DOUBLE).push("double_string");
            s.rule(r"'[^']*'", Category::STRING_SINGLE);
            s.groups(
                r"([a-zA-Z_]\w*)(\+?=)",
                [Category::NAME_VARIABLE, Category::OPERATOR],
            );
            s.rule(
                r"[\w.-]+",
                Classify::new(Category::TEXT)
                    .set("keywords", Category::KEYWORD)
                    .set("builtins", Category::NAME_BUILTIN),
            );
            s.rule(r"&&|\|\||[|&;<>]", Category::OPERATOR);
            s.rule(r"[(){}\[\]]", Category::PUNCTUATION);
            s.rule(r#"[^\s$"'|&;<>(){}\[\]\\]+"#, Category::TEXT);
            s.rule(r"\$", Category::TEXT);
        })
        .state("root", |s| {
            s.callback(r"\n", move |_, cx| {
                cx.token(Category::WHITESPACE);
                if cx.registers().queue_len(HEREDOCS) > 0 {
                    cx.push(heredoc);
                }
            });
            s.rule(r"[ \t\r]+", Category::WHITESPACE);
            s.rule(r"#.*", Category::COMMENT_SINGLE);
            s.callback(r#"(<<-?)([ \t]*)(['"]?)(\w+)(['"]?)"#, |caps, cx| {
                cx.groups(&[
                    Category::OPERATOR,
                    Category::WHITESPACE,
                    Category::STRING_DELIMITER,
                    Category::STRING_DELIMITER,
                    Category::STRING_DELIMITER,
                ]);
                let tag = caps.get(4).unwrap_or_default();
                cx.registers_mut().enqueue(HEREDOCS, tag);
            });
            s.mixin("basic");
        })
        .state("paren", |s| {
            s.rule(r"\$\(", Category::KEYWORD).push_self();
            s.rule(r"\)", Category::KEYWORD).pop();
            s.rule(r"\s+", Category::WHITESPACE);
            s.mixin("basic");
        })
        .state("double_string", |s| {
            s.rule("\"", Category::STRING_DOUBLE).pop();
            s.rule(r#"\\[\\"$`\n]"#, Category::STRING_ESCAPE);
            s.rule(r"\$\(", Category::KEYWORD).push("paren");
            s.rule(r"\$\{[^}]*\}|\$\w+", Category::STRING_INTERPOL);
            s.rule(r#"[^"\\$]+"#, Category::STRING_DOUBLE);
            s.rule(r"[\\$]", Category::STRING_DOUBLE);
        })
        .state("heredoc", |s| {
            s.callback(r"[^\n]*\n?", |caps, cx| {
                let line = caps.as_str().trim_end_matches(['\n', '\r']);
                let line = line.trim_start_matches('\t');
                if cx.registers().queue_front(HEREDOCS) == Some(line) {
                    cx.token(Category::STRING_DELIMITER);
                    cx.registers_mut().dequeue(HEREDOCS);
                    if cx.registers().queue_len(HEREDOCS) == 0 {
                        cx.pop();
                    }
                } else {
                    cx.token(Category::STRING_HEREDOC);
                }
            });
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
    fn commands_and_variables() {
        assert_eq!(
            pairs("if true; then echo $HOME; fi # done"),
            [
                (Category::KEYWORD, "if"),
                (Category::WHITESPACE, " "),
                (Category::NAME_BUILTIN, "true"),
                (Category::OPERATOR, ";"),
                (Category::WHITESPACE, " "),
                (Category::KEYWORD, "then"),
                (Category::WHITESPACE, " "),
                (Category::NAME_BUILTIN, "echo"),
                (Category::WHITESPACE, " "),
                (Category::NAME_VARIABLE, "$HOME"),
                (Category::OPERATOR, ";"),
                (Category::WHITESPACE, " "),
                (Category::KEYWORD, "fi"),
                (Category::WHITESPACE, " "),
                (Category::COMMENT_SINGLE, "# done"),
            ]
        );
    }

    #[test]
    fn assignment_and_strings() {
        assert_eq!(
            pairs(r#"X="a $b" ls 'c'"#),
            [
                (Category::NAME_VARIABLE, "X"),
                (Category::OPERATOR, "="),
                (Category::STRING_DOUBLE, "\""),
                (Category::STRING_DOUBLE, "a "),
                (Category::STRING_INTERPOL, "$b"),
                (Category::STRING_DOUBLE, "\""),
                (Category::WHITESPACE, " "),
                (Category::TEXT, "ls"),
                (Category::WHITESPACE, " "),
                (Category::STRING_SINGLE, "'c'"),
            ]
        );
    }

    #[test]
    fn nested_command_substitution() {
        let lexer = lexer().unwrap();
        let input = "a=$(b $(c))\nd";
        let mut tokens = lexer.lex(input);
        let got: Vec<_> = tokens.by_ref().map(|t| t.pair()).collect();
        assert_eq!(
            got,
            [
                (Category::NAME_VARIABLE, "a"),
                (Category::OPERATOR, "="),
                (Category::KEYWORD, "$("),
                (Category::TEXT, "b"),
                (Category::WHITESPACE, " "),
                (Category::KEYWORD, "$("),
                (Category::TEXT, "c"),
                (Category::KEYWORD, ")"),
                (Category::KEYWORD, ")"),
                (Category::WHITESPACE, "\n"),
                (Category::TEXT, "d"),
            ]
        );
        assert_eq!(tokens.state_stack(), ["root"]);
    }

    #[test]
    fn heredoc() {
        assert_eq!(
            pairs("cat <<EOF\nhello $x\nEOF\nls"),
            [
                (Category::TEXT, "cat"),
                (Category::WHITESPACE, " "),
                (Category::OPERATOR, "<<"),
                (Category::STRING_DELIMITER, "EOF"),
                (Category::WHITESPACE, "\n"),
                (Category::STRING_HEREDOC, "hello $x\n"),
                (Category::STRING_DELIMITER, "EOF\n"),
                (Category::TEXT, "ls"),
            ]
        );
    }

    #[test]
    fn two_heredocs_on_one_line() {
        assert_eq!(
            pairs("f <<A <<-'B'\n1\nA\n\t2\n\tB\n"),
            [
                (Category::TEXT, "f"),
                (Category::WHITESPACE, " "),
                (Category::OPERATOR, "<<"),
                (Category::STRING_DELIMITER, "A"),
                (Category::WHITESPACE, " "),
                (Category::OPERATOR, "<<-"),
                (Category::STRING_DELIMITER, "'"),
                (Category::STRING_DELIMITER, "B"),
                (Category::STRING_DELIMITER, "'"),
                (Category::WHITESPACE, "\n"),
                (Category::STRING_HEREDOC, "1\n"),
                (Category::STRING_DELIMITER, "A\n"),
                (Category::STRING_HEREDOC, "\t2\n"),
                (Category::STRING_DELIMITER, "\tB\n"),
            ]
        );
    }

    #[test]
    fn detects_shebang() {
        let lexer = lexer().unwrap();
        assert!(lexer.detect("#!/bin/bash\necho"));
        assert!(lexer.detect("#!/usr/bin/env sh"));
        assert!(!lexer.detect("echo hi"));
    }
}
