//! Definition-time and scan-time errors.
//!
//! Malformed source text is never an error: it shows up as `Error` tokens.
//! Everything here is either a broken lexer definition, reported by
//! [`LexerBuilder::build`](crate::LexerBuilder::build) before any scan runs,
//! or an exhausted step budget on the checked entry point.

use thiserror::Error;

/// A pattern that cannot be compiled.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The regex engine rejected the pattern.
    #[error("invalid pattern `{pattern}`: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: Box<regex_automata::meta::BuildError>,
    },

    /// Lookahead is only supported as the first or the last top-level group
    /// of a pattern without top-level alternation. Lookbehind is not
    /// supported at all.
    #[error("unsupported look-around at byte {offset} of `{pattern}`")]
    UnsupportedLookaround { pattern: String, offset: usize },

    /// Parentheses do not balance.
    #[error("unbalanced group in `{pattern}`")]
    UnbalancedGroup { pattern: String },
}

/// A lexer definition that cannot be constructed.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("lexer `{lexer}`, state `{state}`, rule {rule}: {source}")]
    Pattern {
        lexer: String,
        state: String,
        rule: usize,
        #[source]
        source: PatternError,
    },

    /// A transition names a state that is never defined.
    #[error("lexer `{lexer}`, state `{state}`, rule {rule}: transition to undefined state `{target}`")]
    UnknownTransition {
        lexer: String,
        state: String,
        rule: usize,
        target: String,
    },

    /// A state handle was requested with `state_id` but never defined.
    #[error("lexer `{lexer}`: state `{state}` is referenced but never defined")]
    UndefinedState { lexer: String, state: String },

    /// `mixin` named a state that was not defined yet.
    #[error("lexer `{lexer}`, state `{state}`: mixin of undefined state `{mixin}`")]
    UndefinedMixin {
        lexer: String,
        state: String,
        mixin: String,
    },

    #[error("lexer `{lexer}`: start state `{state}` is not defined")]
    MissingStartState { lexer: String, state: String },

    /// `Classify` refers to a keyword set that was never registered.
    #[error("lexer `{lexer}`, state `{state}`, rule {rule}: unknown keyword set `{set}`")]
    UnknownKeywordSet {
        lexer: String,
        state: String,
        rule: usize,
        set: String,
    },

    /// A `Groups` action lists a different number of entries than the
    /// pattern has capture groups.
    #[error("lexer `{lexer}`, state `{state}`, rule {rule}: {found} group actions for {expected} capture groups")]
    GroupCount {
        lexer: String,
        state: String,
        rule: usize,
        expected: usize,
        found: usize,
    },
}

/// Hard failure of a checked scan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The configured step budget ran out before the input was consumed.
    #[error("step budget of {steps} exhausted at byte {offset}")]
    BudgetExceeded { steps: u64, offset: usize },
}
