//! Delegation, recursion and definition extension.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tinct_lexer::{
    Category, Classify, Group, KeywordSet, Lexer, Next, ScanConfig, ScanError, ScanOptions,
    Span,
};

fn pairs<'a>(lexer: &Lexer, input: &'a str) -> Vec<(Category, &'a str)> {
    lexer.lex(input).map(|t| t.pair()).collect()
}

fn digits() -> Arc<Lexer> {
    let lexer = Lexer::builder("digits")
        .state("root", |s| {
            s.rule(r"\d+", Category::NUMBER);
            s.rule(r"\s+", Category::WHITESPACE);
        })
        .build()
        .unwrap();
    Arc::new(lexer)
}

// === Delegation ===

#[test]
fn delegated_tokens_have_outer_spans() {
    let inner = digits();
    let outer = Lexer::builder("outer")
        .state("root", |s| {
            s.groups(
                r"(\[)([^\]]*)(\])",
                [
                    Group::emit(Category::PUNCTUATION),
                    Group::delegate(&inner),
                    Group::emit(Category::PUNCTUATION),
                ],
            );
            s.rule("[a-z]+", Category::NAME);
        })
        .build()
        .unwrap();

    let input = "ab[1 23]";
    let tokens = outer.tokenize(input).unwrap();
    let got: Vec<_> = tokens.iter().map(|t| (t.category, t.span)).collect();
    assert_eq!(
        got,
        [
            (Category::NAME, Span::new(0, 2)),
            (Category::PUNCTUATION, Span::new(2, 3)),
            (Category::NUMBER, Span::new(3, 4)),
            (Category::WHITESPACE, Span::new(4, 5)),
            (Category::NUMBER, Span::new(5, 7)),
            (Category::PUNCTUATION, Span::new(7, 8)),
        ]
    );
    for token in &tokens {
        assert_eq!(&input[token.span.to_range()], token.text);
    }
}

#[test]
fn delegate_whole_match() {
    let inner = digits();
    let outer = Lexer::builder("outer")
        .state("root", |s| {
            s.delegate(r"\d[\d ]*", &inner);
            s.rule("[a-z]+", Category::NAME);
        })
        .build()
        .unwrap();
    assert_eq!(
        pairs(&outer, "x12 3"),
        [
            (Category::NAME, "x"),
            (Category::NUMBER, "12"),
            (Category::WHITESPACE, " "),
            (Category::NUMBER, "3"),
        ]
    );
}

#[test]
fn delegated_scan_has_its_own_stack() {
    let inner = Arc::new(
        Lexer::builder("inner")
            .state("root", |s| {
                s.rule("<", Category::PUNCTUATION).push("deep");
                s.rule(".", Category::TEXT);
            })
            .state("deep", |s| {
                s.rule(".", Category::KEYWORD);
            })
            .build()
            .unwrap(),
    );
    let outer = Lexer::builder("outer")
        .state("root", |s| {
            s.groups(r"\{([^}]*)\}", [Group::delegate(&inner)]);
            s.rule(".", Category::NAME);
        })
        .build()
        .unwrap();
    // The push inside the first block does not leak into the second
    assert_eq!(
        pairs(&outer, "{<a}{b}"),
        [
            (Category::TEXT, "{"),
            (Category::PUNCTUATION, "<"),
            (Category::KEYWORD, "a"),
            (Category::TEXT, "}"),
            (Category::TEXT, "{"),
            (Category::TEXT, "b"),
            (Category::TEXT, "}"),
        ]
    );
}

#[test]
fn delegated_errors_stay_inside_range() {
    let inner = digits();
    let outer = Lexer::builder("outer")
        .state("root", |s| {
            s.groups(r"\((.*?)\)", [Group::delegate(&inner)]);
        })
        .build()
        .unwrap();
    assert_eq!(
        pairs(&outer, "(1x)"),
        [
            (Category::TEXT, "("),
            (Category::NUMBER, "1"),
            (Category::ERROR, "x"),
            (Category::TEXT, ")"),
        ]
    );
}

#[test]
fn callback_delegates_a_group() {
    let inner = digits();
    let outer = Lexer::builder("outer")
        .state("root", |s| {
            s.callback(r"(\w+):(.*)", move |_, cx| {
                cx.group(1, Category::NAME_LABEL);
                cx.delegate_group(&inner, 2);
            });
        })
        .build()
        .unwrap();
    assert_eq!(
        pairs(&outer, "n:4 2"),
        [
            (Category::NAME_LABEL, "n"),
            (Category::TEXT, ":"),
            (Category::NUMBER, "4"),
            (Category::WHITESPACE, " "),
            (Category::NUMBER, "2"),
        ]
    );
}

// === Recursion ===

fn nested_parens() -> Lexer {
    Lexer::builder("parens")
        .state("root", |s| {
            s.groups(r"\((.*)\)", [Group::recurse()]);
            s.rule("[a-z]", Category::NAME);
        })
        .build()
        .unwrap()
}

#[test]
fn recursion_reenters_the_definition() {
    let lexer = nested_parens();
    assert_eq!(
        pairs(&lexer, "((x))"),
        [
            (Category::TEXT, "("),
            (Category::TEXT, "("),
            (Category::NAME, "x"),
            (Category::TEXT, ")"),
            (Category::TEXT, ")"),
        ]
    );
}

#[test]
fn recursion_past_the_limit_is_an_error_token() {
    let lexer = nested_parens();
    let options =
        ScanOptions::new().with_config(ScanConfig::default().with_max_delegation_depth(2));
    let got: Vec<_> = lexer
        .lex_with("(((xy)))", &options)
        .map(|t| t.pair())
        .collect();
    assert_eq!(
        got,
        [
            (Category::TEXT, "("),
            (Category::TEXT, "("),
            (Category::TEXT, "("),
            (Category::ERROR, "xy"),
            (Category::TEXT, ")"),
            (Category::TEXT, ")"),
            (Category::TEXT, ")"),
        ]
    );
}

#[test]
fn deep_recursion_does_not_overflow() {
    let lexer = nested_parens();
    let depth = 500;
    let input = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    let options =
        ScanOptions::new().with_config(ScanConfig::default().with_max_delegation_depth(depth));
    let tokens: Vec<_> = lexer.lex_with(&input, &options).collect();
    assert_eq!(tokens.len(), 2 * depth + 1);
    assert_eq!(tokens[depth].pair(), (Category::NAME, "x"));
}

#[test]
fn nested_budget_exhaustion_surfaces() {
    let inner = digits();
    let outer = Lexer::builder("outer")
        .state("root", |s| {
            s.groups(r"\[([^\]]*)\]", [Group::delegate(&inner)]);
        })
        .build()
        .unwrap();
    let options = ScanOptions::new().with_config(ScanConfig::default().with_max_steps(2));
    let mut tokens = outer.lex_with("[1 2 3]", &options);
    let got: Vec<_> = tokens.by_ref().map(|t| t.pair()).collect();
    assert_eq!(
        got,
        [
            (Category::TEXT, "["),
            (Category::NUMBER, "1"),
            (Category::WHITESPACE, " "),
            (Category::ERROR, "2 3"),
            (Category::TEXT, "]"),
        ]
    );
    assert!(tokens.budget_exhausted());
    assert!(outer.tokenize_with("[1 2 3]", &options).is_err());
}

#[test]
fn nested_budget_exhaustion_stops_the_outer_scan() {
    let inner = digits();
    let outer = Lexer::builder("outer")
        .state("root", |s| {
            s.groups(r"\[([^\]]*)\]", [Group::delegate(&inner)]);
            s.rule("[a-z]", Category::NAME);
        })
        .build()
        .unwrap();
    let options = ScanOptions::new().with_config(ScanConfig::default().with_max_steps(2));
    let got: Vec<_> = outer
        .lex_with("[1 2 3]abc", &options)
        .map(|t| t.pair())
        .collect();
    assert_eq!(
        got,
        [
            (Category::TEXT, "["),
            (Category::NUMBER, "1"),
            (Category::WHITESPACE, " "),
            (Category::ERROR, "2 3"),
            (Category::TEXT, "]"),
            (Category::ERROR, "abc"),
        ]
    );
    assert_eq!(
        outer.tokenize_with("[1 2 3]abc", &options).unwrap_err(),
        ScanError::BudgetExceeded { steps: 2, offset: 3 }
    );
}

// === Extension ===

fn base_language() -> Lexer {
    Lexer::builder("base")
        .title("Base")
        .alias("b")
        .keywords("keywords", KeywordSet::from_words("if else"))
        .state("root", |s| {
            s.rule(
                r"[a-z]+",
                Classify::new(Category::NAME).set("keywords", Category::KEYWORD),
            );
            s.rule(r"\s+", Category::WHITESPACE);
            s.rule("#", Category::COMMENT).push("comment");
        })
        .state("comment", |s| {
            s.rule(r"\n", Category::WHITESPACE).pop();
            s.rule(r"[^\n]+", Category::COMMENT);
        })
        .build()
        .unwrap()
}

#[test]
fn extension_overrides_keyword_set() {
    let base = base_language();
    let derived = base
        .extend("derived")
        .keywords("keywords", base.keywords("keywords").unwrap().with(["elif"]))
        .build()
        .unwrap();
    assert_eq!(pairs(&derived, "elif"), [(Category::KEYWORD, "elif")]);
    assert_eq!(pairs(&base, "elif"), [(Category::NAME, "elif")]);
}

#[test]
fn extension_prepends_and_appends_rules() {
    let base = base_language();
    let derived = base
        .extend("derived")
        .prepend("root", |s| {
            s.rule("--", Category::COMMENT_SINGLE).push("comment");
        })
        .append("root", |s| {
            s.rule(r"\d+", Category::NUMBER);
        })
        .build()
        .unwrap();
    assert_eq!(
        pairs(&derived, "if 1 --x\n"),
        [
            (Category::KEYWORD, "if"),
            (Category::WHITESPACE, " "),
            (Category::NUMBER, "1"),
            (Category::WHITESPACE, " "),
            (Category::COMMENT_SINGLE, "--"),
            (Category::COMMENT, "x"),
            (Category::WHITESPACE, "\n"),
        ]
    );
    // The base is unchanged
    assert_eq!(pairs(&base, "1"), [(Category::ERROR, "1")]);
}

#[test]
fn extension_replaces_a_state() {
    let base = base_language();
    let derived = base
        .extend("derived")
        .state("comment", |s| {
            s.rule(r"(?s:.)+", Category::COMMENT_MULTILINE).pop();
        })
        .build()
        .unwrap();
    assert_eq!(
        pairs(&derived, "#a\nb"),
        [
            (Category::COMMENT, "#"),
            (Category::COMMENT_MULTILINE, "a\nb"),
        ]
    );
}

#[test]
fn extension_can_add_states() {
    let base = base_language();
    let derived = base
        .extend("derived")
        .prepend("root", |s| {
            s.rule("\"", Category::STRING).push("string");
        })
        .state("string", |s| {
            s.rule("\"", Category::STRING).pop();
            s.rule("[^\"]+", Category::STRING);
        })
        .build()
        .unwrap();
    assert_eq!(
        pairs(&derived, "\"if\" if"),
        [
            (Category::STRING, "\""),
            (Category::STRING, "if"),
            (Category::STRING, "\""),
            (Category::WHITESPACE, " "),
            (Category::KEYWORD, "if"),
        ]
    );
    assert_eq!(base.state_id("string"), None);
}

#[test]
fn extension_metadata() {
    let base = base_language();
    let derived = base.extend("derived").alias("d").build().unwrap();
    assert_eq!(derived.tag(), "derived");
    assert_eq!(derived.meta().title, "Base");
    assert_eq!(derived.meta().aliases, ["d"]);
}

#[test]
fn group_transition_then_rule_in_new_state() {
    let inner = digits();
    let lexer = Lexer::builder("t")
        .state("root", |s| {
            s.groups(
                r"(=)(\s*)",
                [
                    Group::emit(Category::OPERATOR),
                    Group::emit(Category::WHITESPACE).then(Next::push("value")),
                ],
            );
        })
        .state("value", |s| {
            s.delegate(r"\d+", &inner).pop();
        })
        .build()
        .unwrap();
    assert_eq!(
        pairs(&lexer, "= 7="),
        [
            (Category::OPERATOR, "="),
            (Category::WHITESPACE, " "),
            (Category::NUMBER, "7"),
            (Category::OPERATOR, "="),
        ]
    );
}
