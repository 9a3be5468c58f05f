use super::*;

fn compile(src: &str) -> Pattern {
    PatternSpec::new(src).compile().unwrap()
}

fn consumed<'h>(src: &str, haystack: &'h str, at: usize) -> Option<&'h str> {
    compile(src).captures_at(haystack, at).map(|c| c.as_str())
}

// === Anchoring ===

#[test]
fn matches_only_at_offset() {
    assert_eq!(consumed(r"\d+", "ab12", 0), None);
    assert_eq!(consumed(r"\d+", "ab12", 2), Some("12"));
}

#[test]
fn leftmost_first_alternation() {
    assert_eq!(consumed("a|ab", "ab", 0), Some("a"));
    assert_eq!(consumed("ab|a", "ab", 0), Some("ab"));
}

#[test]
fn context_before_offset_is_visible() {
    // `\b` sees the `a` before offset 1
    assert_eq!(consumed(r"\bb", "ab", 1), None);
    assert_eq!(consumed(r"\Bb", "ab", 1), Some("b"));
}

#[test]
fn caret_is_a_line_anchor_by_default() {
    assert_eq!(consumed("^x", "a\nx", 2), Some("x"));
    let single = PatternSpec::new("^x").single_line().compile().unwrap();
    assert!(single.captures_at("a\nx", 2).is_none());
}

// === Flags ===

#[test]
fn ignore_case() {
    let p = PatternSpec::new("select").ignore_case().compile().unwrap();
    assert!(p.is_match_at("SeLeCt", 0));
    assert!(!compile("select").is_match_at("SELECT", 0));
}

#[test]
fn dot_all() {
    assert_eq!(consumed("a.b", "a\nb", 0), None);
    let p = PatternSpec::new("a.b").dot_all().compile().unwrap();
    assert!(p.is_match_at("a\nb", 0));
}

#[test]
fn unicode_classes() {
    assert_eq!(consumed(r"\p{L}+", "héllo wörld", 0), Some("héllo"));
}

// === Captures ===

#[test]
fn group_spans_are_absolute() {
    let p = compile(r"(\w+)(\s*)(=)");
    assert_eq!(p.group_count(), 3);
    let caps = p.captures_at("x; key = 1", 3).unwrap();
    assert_eq!(caps.len(), 4);
    assert_eq!(caps.get(1), Some("key"));
    assert_eq!(caps.span(1), Some(Span::new(3, 6)));
    assert_eq!(caps.get(3), Some("="));
    assert_eq!(caps.get(4), None);
}

#[test]
fn non_participating_group() {
    let caps = compile("(a)|(b)").captures_at("b", 0).unwrap();
    assert_eq!(caps.get(1), None);
    assert_eq!(caps.get(2), Some("b"));
}

#[test]
fn zero_width_match() {
    let caps = compile("x*").captures_at("abc", 1).unwrap();
    assert!(caps.is_zero_width());
    assert_eq!(caps.start(), 1);
}

// === Lookahead ===

#[test]
fn trailing_lookahead_is_not_consumed() {
    let p = compile(r"\w+(?=\()");
    let caps = p.captures_at("call(x)", 0).unwrap();
    assert_eq!(caps.as_str(), "call");
    assert_eq!(caps.len(), 1);
    assert!(p.captures_at("call x", 0).is_none());
}

#[test]
fn trailing_lookahead_keeps_main_groups() {
    let p = compile(r"(\w+)(\s*)(?=(:))");
    assert_eq!(p.group_count(), 2);
    let caps = p.captures_at("key :", 0).unwrap();
    assert_eq!(caps.as_str(), "key ");
    assert_eq!(caps.get(1), Some("key"));
    assert_eq!(caps.get(2), Some(" "));
    assert_eq!(caps.get(3), None);
}

#[test]
fn lookahead_only_pattern_is_zero_width() {
    let caps = compile(r"(?=\d)").captures_at("7", 0).unwrap();
    assert!(caps.is_zero_width());
}

#[test]
fn trailing_negative_lookahead() {
    assert_eq!(consumed(r"\d+(?!\.)", "12 ", 0), Some("12"));
    assert_eq!(consumed(r"\d+(?!\.)", "12", 0), Some("12"));
    assert_eq!(consumed(r"\d+(?!\.)", "1.5", 0), None);
}

#[test]
fn negative_lookahead_gives_back_text() {
    assert_eq!(consumed(r"\d+(?!\.)", "12.5", 0), Some("1"));
    assert_eq!(consumed(r"\d+(?![.e])", "123e4", 0), Some("12"));
    assert_eq!(consumed(r"\w+(?!\()", "foo(", 0), Some("fo"));
}

#[test]
fn negative_lookahead_backtracks_over_multibyte_chars() {
    assert_eq!(consumed(r"\p{L}+(?!!)", "héé!", 0), Some("hé"));
}

#[test]
fn negative_lookahead_keeps_groups_of_the_shorter_match() {
    let p = compile(r"(\d+)(\w*)(?!;)");
    let caps = p.captures_at("12ab;", 0).unwrap();
    assert_eq!(caps.as_str(), "12a");
    assert_eq!(caps.get(1), Some("12"));
    assert_eq!(caps.get(2), Some("a"));
}

#[test]
fn negative_lookahead_sees_line_ends() {
    // `$` only holds at the real end of the line, not where the retry stops
    assert_eq!(consumed(r"a+$(?!x)", "aab", 0), None);
    assert_eq!(consumed(r"a+$(?!x)", "aa\nb", 0), Some("aa"));
}

#[test]
fn leading_flags_reach_the_lookahead_body() {
    assert_eq!(consumed("(?i)foo(?=bar)", "fooBAR", 0), Some("foo"));
    assert_eq!(consumed("(?i)foo(?=bar)", "FOObar", 0), Some("FOO"));
    assert_eq!(consumed("(?i)foo(?!bar)", "fooBAR", 0), None);
    assert_eq!(consumed("(?i)foo(?!bar)", "fooBAZ", 0), Some("foo"));
}

#[test]
fn scoped_flags_stay_scoped() {
    assert_eq!(consumed("(?i:foo)(?=bar)", "FOObar", 0), Some("FOO"));
    assert_eq!(consumed("(?i:foo)(?=bar)", "FOOBAR", 0), None);
}

#[test]
fn leading_lookahead() {
    assert_eq!(consumed(r"(?!#)\w+", "abc", 0), Some("abc"));
    assert_eq!(consumed(r"(?!#)[#\w]+", "#abc", 0), None);
    assert_eq!(consumed(r"(?=\d)\w+", "1ab", 0), Some("1ab"));
    assert_eq!(consumed(r"(?=\d)\w+", "ab1", 0), None);
}

#[test]
fn leading_lookahead_groups_are_not_numbered() {
    let p = compile(r"(?=(\d))(\w)(\w)");
    assert_eq!(p.group_count(), 2);
    let caps = p.captures_at("1a", 0).unwrap();
    assert_eq!(caps.get(1), Some("1"));
    assert_eq!(caps.get(2), Some("a"));
}

#[test]
fn leading_and_trailing_lookahead() {
    let p = compile(r"(?i)(?!if)\w+(?=\()");
    assert_eq!(p.captures_at("call(", 0).map(|c| c.as_str()), Some("call"));
    assert!(p.captures_at("IF(", 0).is_none());
    assert!(p.captures_at("call x", 0).is_none());
}

#[test]
fn lookahead_with_top_level_alternation_is_rejected() {
    let err = PatternSpec::new(r"a|b(?=c)").compile().unwrap_err();
    assert!(matches!(
        err,
        PatternError::UnsupportedLookaround { offset: 3, .. }
    ));
}

#[test]
fn alternation_inside_groups_is_fine() {
    assert_eq!(consumed(r"(?:a|b)(?=c)", "bc", 0), Some("b"));
}

#[test]
fn leading_lookahead_with_top_level_alternation_is_rejected() {
    let err = PatternSpec::new(r"(?!a)\w|b").compile().unwrap_err();
    assert!(matches!(
        err,
        PatternError::UnsupportedLookaround { offset: 0, .. }
    ));
}

#[test]
fn lookahead_in_the_middle_is_rejected() {
    let err = PatternSpec::new(r"a(?=b)b").compile().unwrap_err();
    assert!(matches!(
        err,
        PatternError::UnsupportedLookaround { offset: 1, .. }
    ));
}

#[test]
fn lookbehind_is_rejected() {
    let err = PatternSpec::new(r"(?<=a)b").compile().unwrap_err();
    assert!(matches!(
        err,
        PatternError::UnsupportedLookaround { offset: 0, .. }
    ));
}

#[test]
fn named_groups_are_not_lookbehind() {
    let p = compile(r"(?<word>\w+)");
    assert_eq!(p.group_count(), 1);
}

#[test]
fn parens_in_classes_and_escapes_are_ignored() {
    assert_eq!(compile(r"[(]\((x)").group_count(), 1);
    assert_eq!(consumed(r"[)(]+(?=;)", "()(;", 0), Some("()("));
    assert_eq!(compile(r"[]()]").group_count(), 0);
}

// === Errors ===

#[test]
fn unbalanced_groups() {
    assert!(matches!(
        PatternSpec::new("(a").compile(),
        Err(PatternError::UnbalancedGroup { .. })
    ));
    assert!(matches!(
        PatternSpec::new("a)").compile(),
        Err(PatternError::UnbalancedGroup { .. })
    ));
}

#[test]
fn invalid_regex() {
    let err = PatternSpec::new("a{2,1}").compile().unwrap_err();
    assert!(matches!(err, PatternError::Regex { .. }));
    assert!(err.to_string().contains("a{2,1}"));
}
