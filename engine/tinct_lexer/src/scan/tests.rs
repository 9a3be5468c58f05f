use super::*;
use pretty_assertions::assert_eq;

use crate::config::ScanConfig;
use crate::error::ScanError;

fn pairs<'a>(lexer: &Lexer, input: &'a str) -> Vec<(Category, &'a str)> {
    lexer.lex(input).map(|t| t.pair()).collect()
}

fn single_callback<F>(pattern: &str, f: F) -> Lexer
where
    F: Fn(&crate::Captures<'_>, &mut ScanContext<'_, '_>) + Send + Sync + 'static,
{
    Lexer::builder("t")
        .state("root", |s| {
            s.callback(pattern, f);
        })
        .build()
        .unwrap()
}

// === Emission inside a match ===

#[test]
fn unclaimed_text_becomes_text() {
    let lexer = single_callback(r"(\w+)=(\w+)", |_, cx| {
        cx.group(2, Category::STRING);
    });
    assert_eq!(
        pairs(&lexer, "a=b"),
        [(Category::TEXT, "a="), (Category::STRING, "b")]
    );
}

#[test]
fn trailing_rest_becomes_text() {
    let lexer = single_callback(r"(\w+)=(\w+)", |_, cx| {
        cx.group(1, Category::NAME);
    });
    assert_eq!(
        pairs(&lexer, "a=b"),
        [(Category::NAME, "a"), (Category::TEXT, "=b")]
    );
}

#[test]
fn backward_emission_is_dropped() {
    let lexer = single_callback(r"(\w+)=(\w+)", |_, cx| {
        cx.group(2, Category::STRING);
        cx.group(1, Category::NAME);
    });
    assert_eq!(
        pairs(&lexer, "a=b"),
        [(Category::TEXT, "a="), (Category::STRING, "b")]
    );
}

#[test]
fn emission_is_clipped_to_the_match() {
    let lexer = single_callback(r"\w+", |caps, cx| {
        cx.emit(Category::KEYWORD, Span::new(caps.start(), caps.end() + 10));
    });
    assert_eq!(
        pairs(&lexer, "ab cd"),
        [
            (Category::KEYWORD, "ab"),
            (Category::ERROR, " "),
            (Category::KEYWORD, "cd"),
        ]
    );
}

#[test]
fn token_len_splits_the_match() {
    let lexer = single_callback(r"\w+", |_, cx| {
        cx.token_len(Category::KEYWORD, 2);
        cx.token(Category::NAME);
    });
    assert_eq!(
        pairs(&lexer, "abcd"),
        [(Category::KEYWORD, "ab"), (Category::NAME, "cd")]
    );
}

#[test]
fn token_len_rounds_up_to_char_boundary() {
    let lexer = single_callback(r"\w+", |_, cx| {
        cx.token_len(Category::KEYWORD, 1);
        cx.token(Category::NAME);
    });
    assert_eq!(
        pairs(&lexer, "éa"),
        [(Category::KEYWORD, "é"), (Category::NAME, "a")]
    );
}

#[test]
fn groups_helper() {
    let lexer = single_callback(r"(\w+)(\s*)(:)", |_, cx| {
        cx.groups(&[Category::NAME_TAG, Category::WHITESPACE, Category::PUNCTUATION]);
    });
    assert_eq!(
        pairs(&lexer, "key :"),
        [
            (Category::NAME_TAG, "key"),
            (Category::WHITESPACE, " "),
            (Category::PUNCTUATION, ":"),
        ]
    );
}

#[test]
fn empty_groups_emit_nothing() {
    let lexer = single_callback(r"(\w+)(\s*)(:)", |_, cx| {
        cx.groups(&[Category::NAME_TAG, Category::WHITESPACE, Category::PUNCTUATION]);
    });
    assert_eq!(
        pairs(&lexer, "key:"),
        [(Category::NAME_TAG, "key"), (Category::PUNCTUATION, ":")]
    );
}

// === Termination ===

#[test]
fn zero_width_without_stack_change_forces_error() {
    let lexer = Lexer::builder("t")
        .state("root", |s| {
            s.rule("x*", Category::TEXT);
        })
        .build()
        .unwrap();
    assert_eq!(
        pairs(&lexer, "ab"),
        [(Category::ERROR, "a"), (Category::ERROR, "b")]
    );
}

#[test]
fn zero_width_pop_at_bottom_forces_error() {
    let lexer = Lexer::builder("t")
        .state("root", |s| {
            s.rule("", Category::TEXT).pop();
        })
        .build()
        .unwrap();
    assert_eq!(pairs(&lexer, "é"), [(Category::ERROR, "é")]);
}

fn ping_pong() -> Lexer {
    Lexer::builder("t")
        .state("root", |s| {
            s.rule("(?=a)", Category::TEXT).push("inner");
        })
        .state("inner", |s| {
            s.rule("(?=a)", Category::TEXT).pop();
        })
        .build()
        .unwrap()
}

#[test]
fn zero_width_cycle_is_cut_off() {
    let lexer = ping_pong();
    assert_eq!(pairs(&lexer, "a"), [(Category::ERROR, "a")]);
}

#[test]
fn zero_width_limit_is_configurable() {
    let lexer = ping_pong();
    let options =
        ScanOptions::new().with_config(ScanConfig::default().with_max_zero_width_steps(3));
    let mut tokens = lexer.lex_with("a", &options);
    let first = tokens.next().unwrap();
    assert_eq!(first.pair(), (Category::ERROR, "a"));
    // 4 zero-width steps: push, pop, push, pop, then the forced advance
    assert_eq!(tokens.state_stack(), ["root"]);
    assert_eq!(tokens.next(), None);
}

// === Budget ===

fn dots() -> Lexer {
    Lexer::builder("t")
        .state("root", |s| {
            s.rule(".", Category::TEXT);
        })
        .build()
        .unwrap()
}

#[test]
fn budget_degrades_lazy_scan() {
    let lexer = dots();
    let options = ScanOptions::new().with_config(ScanConfig::default().with_max_steps(3));
    let mut tokens = lexer.lex_with("abcdef", &options);
    let got: Vec<_> = tokens.by_ref().map(|t| t.pair()).collect();
    assert_eq!(
        got,
        [
            (Category::TEXT, "a"),
            (Category::TEXT, "b"),
            (Category::TEXT, "c"),
            (Category::ERROR, "def"),
        ]
    );
    assert!(tokens.budget_exhausted());
}

#[test]
fn budget_fails_checked_scan() {
    let lexer = dots();
    let options = ScanOptions::new().with_config(ScanConfig::default().with_max_steps(3));
    assert_eq!(
        lexer.tokenize_with("abcdef", &options),
        Err(ScanError::BudgetExceeded {
            steps: 3,
            offset: 3
        })
    );
    assert_eq!(lexer.tokenize_with("abc", &options).map(|t| t.len()), Ok(3));
}

// === Scan state ===

#[test]
fn start_hook_runs_before_first_rule() {
    let mut builder = Lexer::builder("t");
    let inline = builder.state_id("inline");
    let lexer = builder
        .option("start_inline", "start inside a code block")
        .on_start(move |start| {
            if start.bool_option("start_inline") {
                start.push(inline);
            }
            start.registers_mut().set_int("seen", 1);
        })
        .state("root", |s| {
            s.rule(".", Category::TEXT);
        })
        .state("inline", |s| {
            s.rule(".", Category::KEYWORD);
        })
        .build()
        .unwrap();

    assert_eq!(pairs(&lexer, "x"), [(Category::TEXT, "x")]);

    let options = ScanOptions::new().with("start_inline", "yes");
    let tokens = lexer.lex_with("x", &options);
    assert_eq!(tokens.state_stack(), ["root", "inline"]);
    assert_eq!(tokens.registers().int("seen"), 1);
    let got: Vec<_> = tokens.map(|t| t.pair()).collect();
    assert_eq!(got, [(Category::KEYWORD, "x")]);
}

#[test]
fn position_tracks_progress() {
    let lexer = dots();
    let mut tokens = lexer.lex("ab");
    assert_eq!(tokens.position(), 0);
    tokens.next();
    assert_eq!(tokens.position(), 1);
    tokens.next();
    assert_eq!(tokens.next(), None);
    assert_eq!(tokens.next(), None);
}
