//! States and the definition-time state table.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::BuildError;
use crate::pattern::{Captures, PatternSpec};
use crate::rule::{Action, Group, Next, RuleSpec};
use crate::scan::ScanContext;
use crate::Lexer;

/// Handle to a state of one definition (and of definitions extending it).
///
/// Callbacks use handles instead of names so that a typo is a build error
/// rather than a scan-time surprise.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u32);

impl StateId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// States of a definition in source form.
///
/// Ids are handed out on first mention. A state that has an id but no rules
/// has been referenced through [`LexerBuilder::state_id`](crate::LexerBuilder::state_id)
/// and not defined yet.
#[derive(Clone, Debug, Default)]
pub(crate) struct Blueprint {
    names: Vec<String>,
    ids: FxHashMap<String, StateId>,
    rules: Vec<Option<Vec<RuleSpec>>>,
}

impl Blueprint {
    pub(crate) fn intern(&mut self, name: &str) -> StateId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let raw = u32::try_from(self.names.len())
            .unwrap_or_else(|_| panic!("state table exceeded u32::MAX entries"));
        let id = StateId(raw);
        self.names.push(name.to_owned());
        self.ids.insert(name.to_owned(), id);
        self.rules.push(None);
        id
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<StateId> {
        self.ids.get(name).copied()
    }

    /// Rules of `name`, `None` when it is not defined.
    pub(crate) fn rules(&self, name: &str) -> Option<&[RuleSpec]> {
        let id = self.lookup(name)?;
        self.rules[id.index()].as_deref()
    }

    pub(crate) fn rules_mut(&mut self, name: &str) -> Option<&mut Vec<RuleSpec>> {
        let id = self.lookup(name)?;
        self.rules[id.index()].as_mut()
    }

    pub(crate) fn define(&mut self, name: &str, rules: Vec<RuleSpec>) {
        let id = self.intern(name);
        self.rules[id.index()] = Some(rules);
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn name(&self, id: StateId) -> &str {
        &self.names[id.index()]
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }

    /// `(id, name, rules)` for every state with an id, in id order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (StateId, &str, Option<&[RuleSpec]>)> {
        self.names
            .iter()
            .zip(&self.rules)
            .enumerate()
            .map(|(i, (name, rules))| {
                // ids are assigned densely from the same counter
                #[expect(clippy::cast_possible_truncation, reason = "bounded by `intern`")]
                let id = StateId(i as u32);
                (id, name.as_str(), rules.as_deref())
            })
    }
}

/// Collects the rules of one state inside
/// [`LexerBuilder::state`](crate::LexerBuilder::state) and friends.
///
/// ```
/// use tinct_lexer::Lexer;
/// use tinct_token::Category;
///
/// let lexer = Lexer::builder("demo")
///     .state("root", |s| {
///         s.rule(r"\s+", Category::WHITESPACE);
///         s.rule(r"\(", Category::PUNCTUATION).push("paren");
///     })
///     .state("paren", |s| {
///         s.rule(r"\)", Category::PUNCTUATION).pop();
///         s.mixin("root");
///     })
///     .build()
///     .unwrap();
/// # let _ = lexer;
/// ```
pub struct StateBuilder<'b> {
    blueprint: &'b Blueprint,
    lexer: &'b str,
    state: &'b str,
    rules: Vec<RuleSpec>,
    error: Option<BuildError>,
}

impl<'b> StateBuilder<'b> {
    pub(crate) fn new(blueprint: &'b Blueprint, lexer: &'b str, state: &'b str) -> Self {
        StateBuilder {
            blueprint,
            lexer,
            state,
            rules: Vec::new(),
            error: None,
        }
    }

    pub(crate) fn finish(self) -> (Vec<RuleSpec>, Option<BuildError>) {
        (self.rules, self.error)
    }

    fn add(&mut self, pattern: PatternSpec, action: Action) -> RuleHandle<'_> {
        let index = self.rules.len();
        self.rules.push(RuleSpec {
            pattern,
            action,
            next: Next::Stay,
        });
        RuleHandle {
            rule: &mut self.rules[index],
        }
    }

    /// Add a rule. Rules are tried in the order they are added.
    pub fn rule(
        &mut self,
        pattern: impl Into<PatternSpec>,
        action: impl Into<Action>,
    ) -> RuleHandle<'_> {
        self.add(pattern.into(), action.into())
    }

    /// Add a rule handling each capture group separately.
    pub fn groups<I, G>(&mut self, pattern: impl Into<PatternSpec>, groups: I) -> RuleHandle<'_>
    where
        I: IntoIterator<Item = G>,
        G: Into<Group>,
    {
        let groups = groups.into_iter().map(Into::into).collect();
        self.add(pattern.into(), Action::Groups(groups))
    }

    /// Add a rule with a programmatic action.
    pub fn callback<F>(&mut self, pattern: impl Into<PatternSpec>, f: F) -> RuleHandle<'_>
    where
        F: Fn(&Captures<'_>, &mut ScanContext<'_, '_>) + Send + Sync + 'static,
    {
        self.add(pattern.into(), Action::Callback(Arc::new(f)))
    }

    /// Add a rule whose whole match is lexed by `lexer`.
    pub fn delegate(&mut self, pattern: impl Into<PatternSpec>, lexer: &Arc<Lexer>) -> RuleHandle<'_> {
        self.add(pattern.into(), Action::Delegate(Arc::clone(lexer)))
    }

    /// Copy the current rules of `state` to this point.
    ///
    /// Rules added to `state` later are not seen here.
    pub fn mixin(&mut self, state: &str) {
        match self.blueprint.rules(state) {
            Some(rules) => self.rules.extend_from_slice(rules),
            None => {
                self.error.get_or_insert_with(|| BuildError::UndefinedMixin {
                    lexer: self.lexer.to_owned(),
                    state: self.state.to_owned(),
                    mixin: state.to_owned(),
                });
            }
        }
    }

    /// Name of the state being defined.
    pub fn name(&self) -> &str {
        self.state
    }
}

/// Sets the transition of the rule just added.
pub struct RuleHandle<'s> {
    rule: &'s mut RuleSpec,
}

impl RuleHandle<'_> {
    pub fn push(self, state: impl Into<String>) {
        self.rule.next = Next::Push(state.into());
    }

    pub fn push_self(self) {
        self.rule.next = Next::PushSelf;
    }

    pub fn pop(self) {
        self.rule.next = Next::Pop(1);
    }

    pub fn pop_n(self, n: usize) {
        self.rule.next = Next::Pop(n);
    }

    pub fn goto(self, state: impl Into<String>) {
        self.rule.next = Next::Goto(state.into());
    }

    pub fn reset(self) {
        self.rule.next = Next::Reset;
    }

    pub fn next(self, next: Next) {
        self.rule.next = next;
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable_and_dense() {
        let mut bp = Blueprint::default();
        let root = bp.intern("root");
        let string = bp.intern("string");
        assert_eq!(bp.intern("root"), root);
        assert_eq!(root.index(), 0);
        assert_eq!(string.index(), 1);
        assert_eq!(bp.len(), 2);
        assert_eq!(bp.name(string), "string");
    }

    #[test]
    fn interned_state_is_undefined_until_defined() {
        let mut bp = Blueprint::default();
        bp.intern("later");
        assert!(bp.rules("later").is_none());
        bp.define("later", Vec::new());
        assert_eq!(bp.rules("later").map(<[RuleSpec]>::len), Some(0));
    }

    #[test]
    fn mixin_of_undefined_state_records_error() {
        let bp = Blueprint::default();
        let mut s = StateBuilder::new(&bp, "demo", "root");
        s.mixin("nope");
        let (rules, error) = s.finish();
        assert!(rules.is_empty());
        assert!(matches!(error, Some(BuildError::UndefinedMixin { mixin, .. }) if mixin == "nope"));
    }
}
