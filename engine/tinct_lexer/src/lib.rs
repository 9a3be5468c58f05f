//! Tinct lexer engine.
//!
//! A regex-driven, stack-based tokenizer for syntax highlighting. A
//! definition is a set of named states, each an ordered list of rules; a rule
//! is an anchored pattern, an action and an optional stack transition. The
//! engine turns any input into a contiguous stream of categorized tokens:
//! text no rule matches becomes `Error` tokens instead of failing the scan.
//!
//! # Module layout
//!
//! - `pattern`: anchored patterns with leading and trailing lookahead
//! - `rule`/`state`: rules, transitions, state tables
//! - [`LexerBuilder`]: definition construction and validation
//! - [`Lexer`]: immutable, shareable definitions
//! - [`Tokens`]: the scan loop, plus [`ScanContext`] for callbacks
//! - [`Registers`], [`KeywordSet`]: per-scan memory and word sets
//!
//! # Example
//!
//! ```
//! use tinct_lexer::Lexer;
//! use tinct_token::Category;
//!
//! let lexer = Lexer::builder("parens")
//!     .state("root", |s| {
//!         s.rule(r"\(", Category::PUNCTUATION).push("paren");
//!     })
//!     .state("paren", |s| {
//!         s.rule(r"\)", Category::PUNCTUATION).pop();
//!         s.rule(".", Category::TEXT);
//!     })
//!     .build()
//!     .unwrap();
//!
//! let mut tokens = lexer.lex("(a)");
//! let pairs: Vec<_> = tokens.by_ref().map(|t| t.pair()).collect();
//! assert_eq!(
//!     pairs,
//!     [
//!         (Category::PUNCTUATION, "("),
//!         (Category::TEXT, "a"),
//!         (Category::PUNCTUATION, ")"),
//!     ]
//! );
//! assert_eq!(tokens.state_stack(), ["root"]);
//! ```
//!
//! # Logging
//!
//! The engine logs through `tracing`. Call [`init_tracing`] and set
//! `RUST_LOG` (for example `RUST_LOG=tinct_lexer=trace`) to see rule matches
//! and transitions.

mod builder;
mod config;
mod error;
mod keywords;
mod lexer;
mod pattern;
mod registers;
mod rule;
mod scan;
mod stack;
mod state;

use std::sync::Once;

pub use builder::LexerBuilder;
pub use config::{ScanConfig, ScanOptions};
pub use error::{BuildError, PatternError, ScanError};
pub use keywords::{Classify, KeywordSet};
pub use lexer::{Lexer, Metadata, OptionDecl};
pub use pattern::{Captures, Pattern, PatternSpec};
pub use registers::{Registers, Value};
pub use rule::{Action, Callback, Group, GroupAction, Next};
pub use scan::{ScanContext, StartContext, Tokens};
pub use state::{RuleHandle, StateBuilder, StateId};
pub use tinct_token::{Category, Span, Token};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, when called again, or when the
/// process already has a global subscriber.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
