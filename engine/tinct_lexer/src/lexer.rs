//! Built lexer definitions.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tinct_token::Token;

use crate::builder::LexerBuilder;
use crate::config::{ScanOptions, DEFAULT_OPTIONS};
use crate::error::ScanError;
use crate::keywords::KeywordSet;
use crate::rule::CompiledState;
use crate::scan::{StartContext, Tokens};
use crate::state::{Blueprint, StateId};

pub(crate) type StartHook = Arc<dyn Fn(&mut StartContext<'_>) + Send + Sync>;
pub(crate) type DetectFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// An option a definition understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionDecl {
    pub name: String,
    pub description: String,
}

/// Descriptive data about a definition. None of it affects scanning.
#[derive(Clone)]
pub struct Metadata {
    /// Unique identifier, e.g. `css`.
    pub tag: String,
    /// Human-readable name, e.g. `CSS`.
    pub title: String,
    pub description: String,
    pub aliases: Vec<String>,
    /// Filename globs such as `*.css`.
    pub filenames: Vec<String>,
    pub mimetypes: Vec<String>,
    pub options: Vec<OptionDecl>,
    pub(crate) detect: Option<DetectFn>,
}

impl Metadata {
    pub(crate) fn new(tag: String) -> Self {
        Metadata {
            title: tag.clone(),
            tag,
            description: String::new(),
            aliases: Vec::new(),
            filenames: Vec::new(),
            mimetypes: Vec::new(),
            options: Vec::new(),
            detect: None,
        }
    }

    pub fn declares_option(&self, name: &str) -> bool {
        self.options.iter().any(|o| o.name == name)
    }
}

impl fmt::Debug for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metadata")
            .field("tag", &self.tag)
            .field("title", &self.title)
            .field("aliases", &self.aliases)
            .field("filenames", &self.filenames)
            .field("mimetypes", &self.mimetypes)
            .field("options", &self.options)
            .field("detect", &self.detect.is_some())
            .finish_non_exhaustive()
    }
}

/// An immutable, compiled lexer definition.
///
/// A definition holds no per-scan data, so one instance can serve any number
/// of concurrent scans. Every call to [`lex`](Self::lex) starts from the start
/// state with empty registers.
///
/// ```
/// use tinct_lexer::Lexer;
/// use tinct_token::Category;
///
/// let lexer = Lexer::builder("numbers")
///     .state("root", |s| {
///         s.rule(r"\d+", Category::NUMBER);
///         s.rule(r"\s+", Category::WHITESPACE);
///     })
///     .build()
///     .unwrap();
///
/// let pairs: Vec<_> = lexer.lex("1 22").map(|t| t.pair()).collect();
/// assert_eq!(
///     pairs,
///     [
///         (Category::NUMBER, "1"),
///         (Category::WHITESPACE, " "),
///         (Category::NUMBER, "22"),
///     ]
/// );
/// ```
pub struct Lexer {
    meta: Metadata,
    states: Vec<CompiledState>,
    start: StateId,
    start_name: String,
    on_start: Option<StartHook>,
    keyword_sets: FxHashMap<String, Arc<KeywordSet>>,
    blueprint: Blueprint,
}

impl Lexer {
    pub fn builder(tag: impl Into<String>) -> LexerBuilder {
        LexerBuilder::new(tag)
    }

    /// A builder for a new definition starting from this one.
    pub fn extend(&self, tag: impl Into<String>) -> LexerBuilder {
        LexerBuilder::extending(self, tag)
    }

    #[expect(clippy::too_many_arguments, reason = "single call site in the builder")]
    pub(crate) fn from_parts(
        meta: Metadata,
        states: Vec<CompiledState>,
        start: StateId,
        start_name: String,
        on_start: Option<StartHook>,
        keyword_sets: FxHashMap<String, Arc<KeywordSet>>,
        blueprint: Blueprint,
    ) -> Self {
        Lexer {
            meta,
            states,
            start,
            start_name,
            on_start,
            keyword_sets,
            blueprint,
        }
    }

    // === Metadata ===

    pub fn meta(&self) -> &Metadata {
        &self.meta
    }

    pub fn tag(&self) -> &str {
        &self.meta.tag
    }

    /// Run the content sniffer. `false` when the definition has none.
    pub fn detect(&self, text: &str) -> bool {
        self.meta.detect.as_ref().is_some_and(|detect| detect(text))
    }

    // === States ===

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.blueprint.lookup(name)
    }

    pub fn state_name(&self, id: StateId) -> Option<&str> {
        self.states.get(id.index()).map(|s| s.name.as_str())
    }

    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|s| s.name.as_str())
    }

    pub fn start_state(&self) -> StateId {
        self.start
    }

    /// A named keyword set of this definition.
    pub fn keywords(&self, name: &str) -> Option<&KeywordSet> {
        self.keyword_sets.get(name).map(AsRef::as_ref)
    }

    pub(crate) fn state(&self, id: StateId) -> &CompiledState {
        &self.states[id.index()]
    }

    pub(crate) fn start_state_name(&self) -> &str {
        &self.start_name
    }

    pub(crate) fn on_start_hook(&self) -> Option<&StartHook> {
        self.on_start.as_ref()
    }

    pub(crate) fn keyword_sets(&self) -> &FxHashMap<String, Arc<KeywordSet>> {
        &self.keyword_sets
    }

    pub(crate) fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    // === Scanning ===

    /// Lazily tokenize `input` with default options.
    pub fn lex<'l, 'a>(&'l self, input: &'a str) -> Tokens<'l, 'a> {
        self.lex_with(input, &DEFAULT_OPTIONS)
    }

    pub fn lex_with<'l, 'a>(&'l self, input: &'a str, options: &'l ScanOptions) -> Tokens<'l, 'a> {
        Tokens::new(self, input, options, 0)
    }

    /// Tokenize all of `input`, failing if the step budget runs out.
    pub fn tokenize<'a>(&self, input: &'a str) -> Result<Vec<Token<'a>>, ScanError> {
        self.tokenize_with(input, &DEFAULT_OPTIONS)
    }

    pub fn tokenize_with<'a>(
        &self,
        input: &'a str,
        options: &ScanOptions,
    ) -> Result<Vec<Token<'a>>, ScanError> {
        let mut scan = self.lex_with(input, options);
        let tokens: Vec<Token<'a>> = scan.by_ref().collect();
        match scan.exhausted_at() {
            Some(offset) => Err(ScanError::BudgetExceeded {
                steps: options.config.max_steps.unwrap_or_default(),
                offset,
            }),
            None => Ok(tokens),
        }
    }
}

impl fmt::Debug for Lexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("tag", &self.meta.tag)
            .field("start", &self.start_name)
            .field("states", &self.state_names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
