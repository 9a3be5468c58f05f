//! What rule actions and the startup hook can see and do.

use std::collections::VecDeque;

use tinct_token::{Category, Span, Token};
use tracing::{debug, trace, warn};

use super::{StateStack, Tokens};
use crate::config::ScanOptions;
use crate::keywords::KeywordSet;
use crate::pattern::Captures;
use crate::registers::Registers;
use crate::rule::{CompiledAction, CompiledRule, GroupAction, Transition};
use crate::stack::ensure_sufficient_stack;
use crate::state::StateId;
use crate::Lexer;

/// Scan access for rule actions.
///
/// Output is claimed left to right inside the current match: every emission
/// starts where the previous one ended, and text skipped over is emitted as
/// `Text`. Emissions outside the match, or behind what was already emitted,
/// are clipped. Whatever is left unclaimed when the action returns is
/// emitted as `Text`.
///
/// Stack changes take effect for the next step.
pub struct ScanContext<'c, 'a> {
    pub(super) lexer: &'c Lexer,
    pub(super) options: &'c ScanOptions,
    pub(super) input: &'a str,
    pub(super) caps: &'c Captures<'a>,
    pub(super) stack: &'c mut StateStack,
    pub(super) registers: &'c mut Registers,
    pub(super) out: &'c mut VecDeque<Token<'a>>,
    pub(super) exhausted_at: &'c mut Option<usize>,
    /// Start of the unclaimed part of the match.
    pub(super) cursor: usize,
    /// End of the match.
    pub(super) limit: usize,
    pub(super) depth: usize,
}

impl<'a> ScanContext<'_, 'a> {
    pub(super) fn run(&mut self, rule: &CompiledRule) {
        match &rule.action {
            CompiledAction::Emit(category) => self.token(*category),
            CompiledAction::Groups(groups) => {
                for (i, group) in groups.iter().enumerate() {
                    let index = i + 1;
                    match &group.action {
                        GroupAction::Emit(category) => self.group(index, *category),
                        GroupAction::Delegate(lexer) => self.delegate_group(lexer, index),
                        GroupAction::Recurse => self.recurse_group(index),
                    }
                    self.apply(group.next);
                }
            }
            CompiledAction::Classify { sets, fallback } => {
                let category = CompiledAction::classify(sets, *fallback, self.caps.as_str());
                self.token(category);
            }
            CompiledAction::Delegate(lexer) => self.delegate(lexer),
            CompiledAction::Callback(f) => {
                let caps = self.caps;
                f(caps, self);
            }
        }
        self.apply(rule.next);
        self.finish();
    }

    fn apply(&mut self, transition: Transition) {
        if let Transition::Push(id) | Transition::Goto(id) = transition {
            if !is_defined(self.lexer, id) {
                return;
            }
        }
        match transition {
            Transition::Stay => return,
            Transition::Push(id) => self.stack.push(id),
            Transition::PushSelf => {
                let top = self.stack.top();
                self.stack.push(top);
            }
            Transition::Pop(n) => {
                self.stack.pop(n);
            }
            Transition::Goto(id) => self.stack.goto(id),
            Transition::Reset => self.stack.reset(self.lexer.start_state()),
        }
        trace!(?transition, depth = self.stack.as_slice().len(), "transition");
    }

    fn finish(&mut self) {
        if self.cursor < self.limit {
            self.push_token(Category::TEXT, self.cursor, self.limit);
            self.cursor = self.limit;
        }
    }

    fn push_token(&mut self, category: Category, start: usize, end: usize) {
        let span = Span::new(start, end);
        self.out
            .push_back(Token::new(&self.input[span.to_range()], category, span));
    }

    /// Clip `span` to the unclaimed part of the match, rounding to char
    /// boundaries. `None` when nothing is left.
    fn claim(&self, span: Span) -> Option<Span> {
        let start = ceil_char_boundary(self.input, span.start.clamp(self.cursor, self.limit));
        let end = ceil_char_boundary(self.input, span.end.min(self.limit));
        (start < end).then(|| Span::new(start, end))
    }

    // === Inspection ===

    pub fn captures(&self) -> &Captures<'a> {
        self.caps
    }

    /// The whole input of this scan.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Start of the part of the match not emitted yet.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn lexer(&self) -> &Lexer {
        self.lexer
    }

    /// Nesting level of this scan; 0 unless delegated to.
    pub fn depth(&self) -> usize {
        self.depth
    }

    // === Emission ===

    /// Emit the rest of the match.
    pub fn token(&mut self, category: Category) {
        self.emit(category, Span::new(self.cursor, self.limit));
    }

    /// Emit the next `len` bytes of the match.
    pub fn token_len(&mut self, category: Category, len: usize) {
        let end = self.cursor.saturating_add(len);
        self.emit(category, Span::new(self.cursor, end));
    }

    /// Emit capture group `index`. Does nothing if the group did not
    /// participate.
    pub fn group(&mut self, index: usize, category: Category) {
        if let Some(span) = self.caps.span(index) {
            self.emit(category, span);
        }
    }

    /// Emit capture group `i + 1` as `categories[i]`.
    pub fn groups(&mut self, categories: &[Category]) {
        for (i, &category) in categories.iter().enumerate() {
            self.group(i + 1, category);
        }
    }

    /// Emit an absolute span of the input, clipped to the unclaimed part of
    /// the match.
    pub fn emit(&mut self, category: Category, span: Span) {
        let Some(span) = self.claim(span) else {
            return;
        };
        if span.start > self.cursor {
            self.push_token(Category::TEXT, self.cursor, span.start);
        }
        self.push_token(category, span.start, span.end);
        self.cursor = span.end;
    }

    // === Stack ===

    pub fn push(&mut self, state: StateId) {
        self.apply(Transition::Push(state));
    }

    pub fn push_self(&mut self) {
        self.apply(Transition::PushSelf);
    }

    pub fn pop(&mut self) {
        self.apply(Transition::Pop(1));
    }

    pub fn pop_n(&mut self, n: usize) {
        self.apply(Transition::Pop(n));
    }

    pub fn goto(&mut self, state: StateId) {
        self.apply(Transition::Goto(state));
    }

    pub fn reset(&mut self) {
        self.apply(Transition::Reset);
    }

    /// Whether `state` is anywhere on the stack.
    pub fn in_state(&self, state: StateId) -> bool {
        self.stack.contains(state)
    }

    /// Whether `state` is on top of the stack.
    pub fn is_state(&self, state: StateId) -> bool {
        self.stack.top() == state
    }

    /// Active states, bottom first.
    pub fn stack(&self) -> &[StateId] {
        self.stack.as_slice()
    }

    pub fn state_name(&self, state: StateId) -> Option<&str> {
        self.lexer.state_name(state)
    }

    // === Delegation ===

    /// Lex the rest of the match with `lexer`.
    pub fn delegate(&mut self, lexer: &Lexer) {
        self.delegate_span(lexer, Span::new(self.cursor, self.limit));
    }

    /// Lex capture group `index` with `lexer`.
    pub fn delegate_group(&mut self, lexer: &Lexer, index: usize) {
        if let Some(span) = self.caps.span(index) {
            self.delegate_span(lexer, span);
        }
    }

    /// Lex the rest of the match with a fresh scan of the current definition.
    pub fn recurse(&mut self) {
        let lexer = self.lexer;
        self.delegate(lexer);
    }

    pub fn recurse_group(&mut self, index: usize) {
        let lexer = self.lexer;
        self.delegate_group(lexer, index);
    }

    /// Lex an absolute span of the input with `lexer` and splice the tokens
    /// in place.
    ///
    /// The nested scan starts from its own start state with empty registers
    /// and sees only the delegated text. Past the nesting limit the span is
    /// emitted as a single `Error` token.
    pub fn delegate_span(&mut self, lexer: &Lexer, span: Span) {
        let Some(span) = self.claim(span) else {
            return;
        };
        let depth = self.depth + 1;
        if depth > self.options.config.max_delegation_depth {
            warn!(
                lexer = lexer.tag(),
                depth,
                limit = self.options.config.max_delegation_depth,
                "delegation too deep, emitting the range as an error"
            );
            self.emit(Category::ERROR, span);
            return;
        }

        debug!(
            from = self.lexer.tag(),
            to = lexer.tag(),
            depth,
            start = span.start,
            end = span.end,
            "delegating"
        );
        let text = &self.input[span.to_range()];
        let options = self.options;
        let (tokens, exhausted) = ensure_sufficient_stack(|| {
            let mut nested = Tokens::new(lexer, text, options, depth);
            let tokens: Vec<Token<'a>> = nested.by_ref().collect();
            (tokens, nested.exhausted_at())
        });
        debug!(to = lexer.tag(), depth, tokens = tokens.len(), "delegation done");

        if let Some(offset) = exhausted {
            self.exhausted_at.get_or_insert(span.start + offset);
        }
        for token in tokens {
            self.emit(token.category, token.span.shifted(span.start));
        }
    }

    // === Registers, options, keyword sets ===

    pub fn registers(&self) -> &Registers {
        &*self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut *self.registers
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key)
    }

    pub fn bool_option(&self, key: &str) -> bool {
        self.options.flag(key)
    }

    /// A named keyword set of the running definition.
    pub fn keywords(&self, name: &str) -> Option<&KeywordSet> {
        self.lexer.keywords(name)
    }
}

/// Handles are only checked against the definition they came from when it
/// is built. One taken from an unrelated definition may not exist here.
fn is_defined(lexer: &Lexer, state: StateId) -> bool {
    let defined = lexer.state_name(state).is_some();
    if !defined {
        warn!(
            lexer = lexer.tag(),
            state = state.index(),
            "ignoring transition to a state this lexer does not define"
        );
    }
    defined
}

/// Scan access for the startup hook.
pub struct StartContext<'c> {
    pub(super) lexer: &'c Lexer,
    pub(super) options: &'c ScanOptions,
    pub(super) stack: &'c mut StateStack,
    pub(super) registers: &'c mut Registers,
}

impl StartContext<'_> {
    /// Push a state on top of the start state.
    pub fn push(&mut self, state: StateId) {
        if is_defined(self.lexer, state) {
            self.stack.push(state);
        }
    }

    pub fn goto(&mut self, state: StateId) {
        if is_defined(self.lexer, state) {
            self.stack.goto(state);
        }
    }

    pub fn stack(&self) -> &[StateId] {
        self.stack.as_slice()
    }

    pub fn registers(&self) -> &Registers {
        &*self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut *self.registers
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key)
    }

    pub fn bool_option(&self, key: &str) -> bool {
        self.options.flag(key)
    }

    pub fn lexer(&self) -> &Lexer {
        self.lexer
    }
}

fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
