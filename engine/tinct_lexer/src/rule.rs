//! Rules: a pattern bound to an action and a transition.
//!
//! The public types here ([`Action`], [`Group`], [`Next`]) describe rules the
//! way a definition writes them, naming states by string. The builder
//! resolves names to [`StateId`]s and compiles patterns into the crate-private
//! [`CompiledRule`] the scan loop runs.

use std::fmt;
use std::sync::Arc;

use tinct_token::Category;

use crate::keywords::{Classify, KeywordSet};
use crate::pattern::{Captures, Pattern, PatternSpec};
use crate::scan::ScanContext;
use crate::state::StateId;
use crate::Lexer;

/// Programmatic rule action.
///
/// Receives the match and the scan context. Text of the match the callback
/// does not emit is emitted as `Text`.
pub type Callback = Arc<dyn Fn(&Captures<'_>, &mut ScanContext<'_, '_>) + Send + Sync>;

/// Stack change applied after a rule's action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Next {
    #[default]
    Stay,
    /// Push the named state.
    Push(String),
    /// Push the current state again.
    PushSelf,
    /// Pop this many states. The bottom entry is never popped.
    Pop(usize),
    /// Replace the top of the stack with the named state.
    Goto(String),
    /// Back to just the start state.
    Reset,
}

impl Next {
    pub fn push(state: impl Into<String>) -> Self {
        Next::Push(state.into())
    }

    pub fn goto(state: impl Into<String>) -> Self {
        Next::Goto(state.into())
    }
}

/// [`Next`] with state names resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Transition {
    Stay,
    Push(StateId),
    PushSelf,
    Pop(usize),
    Goto(StateId),
    Reset,
}

/// What happens to the text of one capture group.
#[derive(Clone)]
pub enum GroupAction {
    Emit(Category),
    /// Lex the group with another definition.
    Delegate(Arc<Lexer>),
    /// Lex the group with a fresh scan of the current definition.
    Recurse,
}

impl fmt::Debug for GroupAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupAction::Emit(category) => write!(f, "Emit({category})"),
            GroupAction::Delegate(lexer) => write!(f, "Delegate({})", lexer.tag()),
            GroupAction::Recurse => f.write_str("Recurse"),
        }
    }
}

/// One entry of a `Groups` action.
///
/// ```
/// use tinct_lexer::{Group, Next};
/// use tinct_token::Category;
///
/// let open = Group::emit(Category::PUNCTUATION).then(Next::push("block"));
/// let name: Group = Category::NAME_TAG.into();
/// # let _ = (open, name);
/// ```
#[derive(Clone, Debug)]
pub struct Group {
    pub action: GroupAction,
    pub next: Next,
}

impl Group {
    pub fn emit(category: Category) -> Self {
        Group {
            action: GroupAction::Emit(category),
            next: Next::Stay,
        }
    }

    pub fn delegate(lexer: &Arc<Lexer>) -> Self {
        Group {
            action: GroupAction::Delegate(Arc::clone(lexer)),
            next: Next::Stay,
        }
    }

    pub fn recurse() -> Self {
        Group {
            action: GroupAction::Recurse,
            next: Next::Stay,
        }
    }

    /// Apply `next` once this group is handled.
    #[must_use]
    pub fn then(mut self, next: Next) -> Self {
        self.next = next;
        self
    }
}

impl From<Category> for Group {
    fn from(category: Category) -> Self {
        Group::emit(category)
    }
}

/// What a matching rule does with its match.
#[derive(Clone)]
pub enum Action {
    /// The whole match is one token.
    Emit(Category),
    /// Capture group `i` is handled by entry `i - 1`.
    Groups(Vec<Group>),
    /// Category picked by keyword set membership of the matched text.
    Classify(Classify),
    /// The whole match is lexed by another definition.
    Delegate(Arc<Lexer>),
    Callback(Callback),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Emit(category) => write!(f, "Emit({category})"),
            Action::Groups(groups) => f.debug_tuple("Groups").field(groups).finish(),
            Action::Classify(classify) => f.debug_tuple("Classify").field(classify).finish(),
            Action::Delegate(lexer) => write!(f, "Delegate({})", lexer.tag()),
            Action::Callback(_) => f.write_str("Callback"),
        }
    }
}

impl From<Category> for Action {
    fn from(category: Category) -> Self {
        Action::Emit(category)
    }
}

impl From<Classify> for Action {
    fn from(classify: Classify) -> Self {
        Action::Classify(classify)
    }
}

/// A rule as written in a definition.
#[derive(Clone, Debug)]
pub(crate) struct RuleSpec {
    pub(crate) pattern: PatternSpec,
    pub(crate) action: Action,
    pub(crate) next: Next,
}

// === Compiled form ===

pub(crate) struct CompiledGroup {
    pub(crate) action: GroupAction,
    pub(crate) next: Transition,
}

pub(crate) enum CompiledAction {
    Emit(Category),
    Groups(Vec<CompiledGroup>),
    Classify {
        sets: Vec<(Arc<KeywordSet>, Category)>,
        fallback: Category,
    },
    Delegate(Arc<Lexer>),
    Callback(Callback),
}

impl CompiledAction {
    /// Category for `text` under a `Classify` table.
    pub(crate) fn classify(
        sets: &[(Arc<KeywordSet>, Category)],
        fallback: Category,
        text: &str,
    ) -> Category {
        sets.iter()
            .find(|(set, _)| set.contains(text))
            .map_or(fallback, |&(_, category)| category)
    }
}

pub(crate) struct CompiledRule {
    pub(crate) pattern: Arc<Pattern>,
    pub(crate) action: CompiledAction,
    pub(crate) next: Transition,
}

pub(crate) struct CompiledState {
    pub(crate) name: String,
    pub(crate) rules: Vec<CompiledRule>,
}
