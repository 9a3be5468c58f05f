//! Anchored patterns.
//!
//! Every rule pattern is matched anchored at the current scan offset. The
//! regex engine is linear-time and has no look-around, so lookahead is
//! supported where rule tables actually use it: as the leading or the
//! trailing group of a pattern.
//!
//! - `main(?=X)` is compiled as `main(X)`. The match consumes up to the
//!   start of the extra group, which leaves `X` unconsumed.
//! - `main(?!X)` is compiled as `main`, and `X` is tried anchored at the end
//!   of the match. When `X` matches there, the search is repeated with the
//!   end of the input pulled in before that end, so shorter matches of
//!   `main` are still found.
//! - `(?=X)main` and `(?!X)main` check `X` at the scan offset before `main`
//!   runs.
//!
//! Inline flags such as `(?i)` written at the top level before a lookahead
//! apply to its body too. Look-around anywhere else is rejected when the
//! definition is built.

use regex_automata::meta::Regex;
use regex_automata::util::captures::Captures as RawCaptures;
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input};
use tinct_token::Span;

use crate::error::PatternError;

/// Source text plus flags of a pattern, before compilation.
///
/// Built implicitly from `&str`/`String` for the common case.
///
/// ```
/// use tinct_lexer::PatternSpec;
///
/// let spec = PatternSpec::new(r"select\b").ignore_case();
/// assert!(spec.is_ignore_case());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatternSpec {
    source: String,
    ignore_case: bool,
    dot_all: bool,
    multi_line: bool,
}

impl PatternSpec {
    pub fn new(source: impl Into<String>) -> Self {
        PatternSpec {
            source: source.into(),
            ignore_case: false,
            dot_all: false,
            multi_line: true,
        }
    }

    #[must_use]
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Let `.` match `\n`.
    #[must_use]
    pub fn dot_all(mut self) -> Self {
        self.dot_all = true;
        self
    }

    /// Make `^` and `$` match only at the ends of the input instead of at
    /// line boundaries.
    #[must_use]
    pub fn single_line(mut self) -> Self {
        self.multi_line = false;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn compile(&self) -> Result<Pattern, PatternError> {
        Pattern::new(self)
    }

    fn syntax(&self) -> syntax::Config {
        syntax::Config::new()
            .case_insensitive(self.ignore_case)
            .dot_matches_new_line(self.dot_all)
            .multi_line(self.multi_line)
    }
}

impl From<&str> for PatternSpec {
    fn from(source: &str) -> Self {
        PatternSpec::new(source)
    }
}

impl From<String> for PatternSpec {
    fn from(source: String) -> Self {
        PatternSpec::new(source)
    }
}

impl From<&String> for PatternSpec {
    fn from(source: &String) -> Self {
        PatternSpec::new(source.as_str())
    }
}

#[derive(Debug)]
enum Lookahead {
    None,
    /// Capture group holding the folded lookahead body.
    Folded(usize),
    Negative(Guard),
}

/// A lookahead body checked anchored at one offset.
#[derive(Debug)]
struct Guard {
    regex: Regex,
    negative: bool,
}

impl Guard {
    fn allows(&self, haystack: &str, at: usize) -> bool {
        let input = Input::new(haystack)
            .span(at..haystack.len())
            .anchored(Anchored::Yes);
        self.regex.is_match(input) != self.negative
    }
}

/// A compiled, anchored pattern.
#[derive(Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
    /// Capture groups visible to rules, not counting group 0.
    groups: usize,
    leading: Option<Guard>,
    trailing: Lookahead,
}

impl Pattern {
    pub fn new(spec: &PatternSpec) -> Result<Self, PatternError> {
        let source = spec.source();
        let shape = analyze(source)?;
        let build = |src: &str| {
            Regex::builder()
                .syntax(spec.syntax())
                .build(src)
                .map_err(|e| PatternError::Regex {
                    pattern: source.to_owned(),
                    source: Box::new(e),
                })
        };
        let guard = |look: &Look| -> Result<Guard, PatternError> {
            Ok(Guard {
                regex: build(&format!("{}{}", look.flags, look.body(source)))?,
                negative: look.negative,
            })
        };

        let main_end = shape.trailing.as_ref().map_or(source.len(), |t| t.start);
        let main = match &shape.leading {
            Some(lead) => format!("{}{}", &source[..lead.start], &source[lead.end..main_end]),
            None => source[..main_end].to_owned(),
        };
        let leading = shape.leading.as_ref().map(&guard).transpose()?;

        let (regex, trailing) = match &shape.trailing {
            None => (build(&main)?, Lookahead::None),
            Some(look) if !look.negative => {
                let folded = format!("{main}({})", look.body(source));
                (build(&folded)?, Lookahead::Folded(shape.main_groups + 1))
            }
            Some(look) => (build(&main)?, Lookahead::Negative(guard(look)?)),
        };

        Ok(Pattern {
            source: source.to_owned(),
            regex,
            groups: shape.main_groups,
            leading,
            trailing,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of capture groups, not counting the whole match.
    pub fn group_count(&self) -> usize {
        self.groups
    }

    /// Match anchored at byte offset `at` of `haystack`.
    ///
    /// `at` must lie on a char boundary. Text before `at` still counts as
    /// context for `^`, `\b` and friends.
    pub fn captures_at<'h>(&self, haystack: &'h str, at: usize) -> Option<Captures<'h>> {
        if self.leading.as_ref().is_some_and(|g| !g.allows(haystack, at)) {
            return None;
        }

        let mut raw = self.regex.create_captures();
        let mut limit = haystack.len();
        loop {
            let input = Input::new(haystack)
                .span(at..limit)
                .anchored(Anchored::Yes);
            self.regex.search_captures(&input, &mut raw);
            let matched = raw.get_match()?;

            let end = match &self.trailing {
                Lookahead::None => matched.end(),
                Lookahead::Folded(group) => {
                    raw.get_group(*group).map_or(matched.end(), |s| s.start)
                }
                Lookahead::Negative(guard) => {
                    let end = matched.end();
                    if !guard.allows(haystack, end) {
                        if end == at {
                            return None;
                        }
                        // retry with the last char of this match out of reach
                        limit = haystack[..end]
                            .chars()
                            .next_back()
                            .map_or(at, |c| end - c.len_utf8());
                        continue;
                    }
                    end
                }
            };

            return Some(Captures {
                haystack,
                raw,
                groups: self.groups,
                start: matched.start(),
                end,
            });
        }
    }

    pub fn is_match_at(&self, haystack: &str, at: usize) -> bool {
        self.captures_at(haystack, at).is_some()
    }
}

/// The result of one successful anchored match.
///
/// Group 0 is the consumed text. Group spans are absolute offsets into the
/// haystack the pattern ran on.
pub struct Captures<'h> {
    haystack: &'h str,
    raw: RawCaptures,
    groups: usize,
    start: usize,
    end: usize,
}

impl<'h> Captures<'h> {
    /// Text of group `index`, `None` when the group did not participate.
    pub fn get(&self, index: usize) -> Option<&'h str> {
        self.span(index).map(|span| &self.haystack[span.to_range()])
    }

    pub fn span(&self, index: usize) -> Option<Span> {
        match index {
            0 => Some(Span::new(self.start, self.end)),
            i if i <= self.groups => self.raw.get_group(i).map(|s| Span::new(s.start, s.end)),
            _ => None,
        }
    }

    /// Number of groups including group 0.
    #[expect(
        clippy::len_without_is_empty,
        reason = "there is always group 0; zero-width matches are `is_zero_width`"
    )]
    pub fn len(&self) -> usize {
        self.groups + 1
    }

    pub fn as_str(&self) -> &'h str {
        &self.haystack[self.start..self.end]
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_zero_width(&self) -> bool {
        self.start == self.end
    }

    pub fn haystack(&self) -> &'h str {
        self.haystack
    }
}

impl std::fmt::Debug for Captures<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for i in 0..self.len() {
            list.entry(&self.get(i));
        }
        list.finish()
    }
}

// === Look-around placement ===

/// A top-level lookahead group.
struct Look {
    negative: bool,
    /// Offset of the opening `(`.
    start: usize,
    /// Offset just past the closing `)`.
    end: usize,
    /// Top-level inline flag groups written before the lookahead.
    flags: String,
}

impl Look {
    fn body<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start + 3..self.end - 1]
    }
}

struct Shape {
    leading: Option<Look>,
    trailing: Option<Look>,
    /// Capturing groups of the main part, which is what rules index.
    main_groups: usize,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum GroupKind {
    Capturing,
    Plain,
    Ahead,
    NegativeAhead,
    Behind,
}

impl GroupKind {
    fn at(rest: &str) -> Self {
        if rest.starts_with("(?=") {
            GroupKind::Ahead
        } else if rest.starts_with("(?!") {
            GroupKind::NegativeAhead
        } else if rest.starts_with("(?<=") || rest.starts_with("(?<!") {
            GroupKind::Behind
        } else if rest.starts_with("(?P<") || rest.starts_with("(?<") || !rest.starts_with("(?") {
            GroupKind::Capturing
        } else {
            GroupKind::Plain
        }
    }

    fn is_lookaround(self) -> bool {
        matches!(
            self,
            GroupKind::Ahead | GroupKind::NegativeAhead | GroupKind::Behind
        )
    }
}

/// `(?i)`, `(?x-s)` and the like: flags without a scoped body.
fn is_flag_group(group: &str) -> bool {
    group
        .strip_prefix("(?")
        .and_then(|rest| rest.strip_suffix(')'))
        .is_some_and(|flags| {
            !flags.is_empty() && flags.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
        })
}

/// Find the groups of `source` and check where look-around occurs.
///
/// Escapes and character classes are skipped; everything else is left to
/// the regex parser.
fn analyze(source: &str) -> Result<Shape, PatternError> {
    let unbalanced = || PatternError::UnbalancedGroup {
        pattern: source.to_owned(),
    };
    let unsupported = |offset| PatternError::UnsupportedLookaround {
        pattern: source.to_owned(),
        offset,
    };

    // (offset, kind, capturing groups opened before it)
    let mut open: Vec<(usize, GroupKind, usize)> = Vec::new();
    let mut capturing = 0usize;
    let mut top_level_alternation = false;
    let mut misplaced: Option<usize> = None;
    let mut flags = String::new();
    // end of the run of flag groups that opens the pattern
    let mut prefix_end = 0usize;
    let mut leading: Option<(Look, usize)> = None;
    let mut trailing: Option<(Look, usize)> = None;
    let mut class_depth = 0usize;

    let mut chars = source.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '[' => {
                class_depth += 1;
                // `[]` and `[^]` open with a literal `]`
                if chars.peek().is_some_and(|&(_, c)| c == '^') {
                    chars.next();
                }
                if chars.peek().is_some_and(|&(_, c)| c == ']') {
                    chars.next();
                }
            }
            ']' if class_depth > 0 => class_depth -= 1,
            _ if class_depth > 0 => {}
            '(' => {
                let kind = GroupKind::at(&source[i..]);
                open.push((i, kind, capturing));
                if kind == GroupKind::Capturing {
                    capturing += 1;
                }
            }
            ')' => {
                let (start, kind, before) = open.pop().ok_or_else(unbalanced)?;
                let end = i + 1;
                let top_level = open.is_empty();
                if top_level && kind == GroupKind::Plain && is_flag_group(&source[start..end]) {
                    flags.push_str(&source[start..end]);
                    if start == prefix_end {
                        prefix_end = end;
                    }
                    continue;
                }
                if !kind.is_lookaround() {
                    continue;
                }
                let look = Look {
                    negative: kind == GroupKind::NegativeAhead,
                    start,
                    end,
                    flags: flags.clone(),
                };
                if !top_level || kind == GroupKind::Behind {
                    misplaced = Some(misplaced.map_or(start, |m| m.min(start)));
                } else if start == prefix_end && leading.is_none() && end < source.len() {
                    leading = Some((look, capturing));
                } else if end == source.len() {
                    trailing = Some((look, before));
                } else {
                    misplaced = Some(misplaced.map_or(start, |m| m.min(start)));
                }
            }
            '|' if open.is_empty() => top_level_alternation = true,
            _ => {}
        }
    }

    if !open.is_empty() {
        return Err(unbalanced());
    }

    // A lookahead nested in a top-level one is closed before it, so it is
    // already recorded as misplaced.
    if let Some(offset) = misplaced {
        return Err(unsupported(offset));
    }
    if top_level_alternation {
        if let Some((look, _)) = leading.as_ref().or(trailing.as_ref()) {
            return Err(unsupported(look.start));
        }
    }

    let skipped = leading.as_ref().map_or(0, |&(_, through)| through);
    let main_end = trailing.as_ref().map_or(capturing, |&(_, before)| before);
    Ok(Shape {
        leading: leading.map(|(look, _)| look),
        trailing: trailing.map(|(look, _)| look),
        main_groups: main_end - skipped,
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
