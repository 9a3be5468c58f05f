//! The scan loop.
//!
//! A scan owns everything that changes while input is consumed: the offset,
//! the state stack, the registers and the queue of tokens produced by the
//! last step. The definition it runs is only borrowed.
//!
//! One step tries the rules of the top state in order, anchored at the
//! current offset. The first rule that matches runs its action and
//! transition and the offset moves to the end of the match. When no rule
//! matches, one character becomes an `Error` token. Termination rests on
//! two checks: a zero-width match that leaves the stack as it was is
//! followed by a forced one-character `Error` advance, and so is a run of
//! more than `max_zero_width_steps` zero-width matches at one offset.

mod context;
mod state_stack;

use std::collections::VecDeque;
use std::iter::FusedIterator;

use tinct_token::{Category, Span, Token};
use tracing::{trace, warn};

use crate::config::ScanOptions;
use crate::registers::Registers;
use crate::Lexer;

pub use context::{ScanContext, StartContext};
pub(crate) use state_stack::StateStack;

/// Lazy token stream over one input.
///
/// Dropping the iterator cancels the scan.
pub struct Tokens<'l, 'a> {
    lexer: &'l Lexer,
    options: &'l ScanOptions,
    input: &'a str,
    pos: usize,
    stack: StateStack,
    registers: Registers,
    pending: VecDeque<Token<'a>>,
    /// Nesting level; 0 for a scan started by the caller.
    depth: usize,
    steps: u64,
    zero_width: u32,
    exhausted_at: Option<usize>,
}

impl<'l, 'a> Tokens<'l, 'a> {
    pub(crate) fn new(
        lexer: &'l Lexer,
        input: &'a str,
        options: &'l ScanOptions,
        depth: usize,
    ) -> Self {
        let mut scan = Tokens {
            lexer,
            options,
            input,
            pos: 0,
            stack: StateStack::new(lexer.start_state()),
            registers: Registers::new(),
            pending: VecDeque::new(),
            depth,
            steps: 0,
            zero_width: 0,
            exhausted_at: None,
        };

        if depth == 0 {
            for key in options.keys() {
                if !lexer.meta().declares_option(key) {
                    warn!(lexer = lexer.tag(), option = key, "ignoring undeclared option");
                }
            }
        }

        if let Some(hook) = lexer.on_start_hook() {
            let mut start = StartContext {
                lexer,
                options,
                stack: &mut scan.stack,
                registers: &mut scan.registers,
            };
            hook(&mut start);
        }
        scan
    }

    /// Names of the active states, bottom first.
    pub fn state_stack(&self) -> Vec<&'l str> {
        let lexer = self.lexer;
        self.stack
            .as_slice()
            .iter()
            .map(|&id| lexer.state(id).name.as_str())
            .collect()
    }

    /// Byte offset of the next unscanned character.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    /// Whether the step budget of this scan, or of a scan it delegated to,
    /// ran out. The unscanned rest was emitted as one `Error` token.
    pub fn budget_exhausted(&self) -> bool {
        self.exhausted_at.is_some()
    }

    pub(crate) fn exhausted_at(&self) -> Option<usize> {
        self.exhausted_at
    }

    fn step(&mut self) {
        self.steps += 1;
        if self
            .options
            .config
            .max_steps
            .is_some_and(|max| self.steps > max)
        {
            self.exhaust();
            return;
        }

        let lexer = self.lexer;
        let state = lexer.state(self.stack.top());
        for (index, rule) in state.rules.iter().enumerate() {
            let Some(caps) = rule.pattern.captures_at(self.input, self.pos) else {
                continue;
            };
            trace!(
                state = %state.name,
                rule = index,
                start = caps.start(),
                end = caps.end(),
                "rule matched"
            );

            let before = caps.is_zero_width().then(|| self.stack.clone());
            let mut cx = ScanContext {
                lexer,
                options: self.options,
                input: self.input,
                caps: &caps,
                stack: &mut self.stack,
                registers: &mut self.registers,
                out: &mut self.pending,
                exhausted_at: &mut self.exhausted_at,
                cursor: caps.start(),
                limit: caps.end(),
                depth: self.depth,
            };
            cx.run(rule);
            self.pos = caps.end();

            if self.exhausted_at.is_some() {
                // a delegated scan ran out of steps; stop here as well
                self.abandon();
                return;
            }

            match before {
                None => self.zero_width = 0,
                Some(before) if before == self.stack => {
                    warn!(
                        lexer = lexer.tag(),
                        state = %state.name,
                        rule = index,
                        offset = self.pos,
                        "zero-width match without a stack change, forcing an error advance"
                    );
                    self.force_error();
                }
                Some(_) => {
                    self.zero_width += 1;
                    if self.zero_width > self.options.config.max_zero_width_steps {
                        warn!(
                            lexer = lexer.tag(),
                            state = %state.name,
                            offset = self.pos,
                            limit = self.options.config.max_zero_width_steps,
                            "too many zero-width matches in a row, forcing an error advance"
                        );
                        self.force_error();
                    }
                }
            }
            return;
        }

        trace!(state = %state.name, offset = self.pos, "no rule matched");
        self.force_error();
    }

    /// Consume one character as `Error`.
    fn force_error(&mut self) {
        let width = self.input[self.pos..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        if width > 0 {
            let span = Span::new(self.pos, self.pos + width);
            self.pending
                .push_back(Token::new(&self.input[span.to_range()], Category::ERROR, span));
            self.pos = span.end;
        }
        self.zero_width = 0;
    }

    /// Emit the rest of the input as one `Error` token and stop.
    fn exhaust(&mut self) {
        warn!(
            lexer = self.lexer.tag(),
            steps = self.steps - 1,
            offset = self.pos,
            "step budget exhausted"
        );
        self.exhausted_at.get_or_insert(self.pos);
        self.abandon();
    }

    /// Emit whatever is left of the input as one `Error` token.
    fn abandon(&mut self) {
        if self.pos < self.input.len() {
            let span = Span::new(self.pos, self.input.len());
            self.pending
                .push_back(Token::new(&self.input[span.to_range()], Category::ERROR, span));
        }
        self.pos = self.input.len();
    }
}

impl<'a> Iterator for Tokens<'_, 'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.pos >= self.input.len() {
                return None;
            }
            self.step();
        }
    }
}

impl FusedIterator for Tokens<'_, '_> {}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
