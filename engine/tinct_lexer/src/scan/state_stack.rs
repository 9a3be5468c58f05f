//! The scan-state stack.

use smallvec::SmallVec;
use tracing::debug;

use crate::state::StateId;

/// Active states, innermost last. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct StateStack {
    ids: SmallVec<[StateId; 8]>,
}

impl StateStack {
    pub(crate) fn new(start: StateId) -> Self {
        let mut ids = SmallVec::new();
        ids.push(start);
        StateStack { ids }
    }

    #[inline]
    pub(crate) fn top(&self) -> StateId {
        // never empty: `pop` keeps the bottom entry and nothing else removes
        self.ids[self.ids.len() - 1]
    }

    pub(crate) fn push(&mut self, id: StateId) {
        self.ids.push(id);
    }

    /// Pop up to `n` states, keeping the bottom one. Returns how many were
    /// popped.
    pub(crate) fn pop(&mut self, n: usize) -> usize {
        let popped = n.min(self.ids.len() - 1);
        if popped < n {
            debug!(requested = n, popped, "ignoring pop below the bottom state");
        }
        self.ids.truncate(self.ids.len() - popped);
        popped
    }

    /// Replace the top state.
    pub(crate) fn goto(&mut self, id: StateId) {
        let last = self.ids.len() - 1;
        self.ids[last] = id;
    }

    pub(crate) fn reset(&mut self, start: StateId) {
        self.ids.clear();
        self.ids.push(start);
    }

    pub(crate) fn as_slice(&self) -> &[StateId] {
        &self.ids
    }

    pub(crate) fn contains(&self, id: StateId) -> bool {
        self.ids.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Blueprint;

    fn ids() -> (StateId, StateId, StateId) {
        let mut bp = Blueprint::default();
        (bp.intern("root"), bp.intern("a"), bp.intern("b"))
    }

    #[test]
    fn push_pop() {
        let (root, a, b) = ids();
        let mut stack = StateStack::new(root);
        stack.push(a);
        stack.push(b);
        assert_eq!(stack.top(), b);
        assert_eq!(stack.pop(2), 2);
        assert_eq!(stack.as_slice(), &[root]);
    }

    #[test]
    fn pop_never_removes_bottom() {
        let (root, a, _) = ids();
        let mut stack = StateStack::new(root);
        assert_eq!(stack.pop(1), 0);
        stack.push(a);
        assert_eq!(stack.pop(5), 1);
        assert_eq!(stack.as_slice(), &[root]);
    }

    #[test]
    fn goto_replaces_top_even_at_bottom() {
        let (root, a, b) = ids();
        let mut stack = StateStack::new(root);
        stack.goto(a);
        assert_eq!(stack.as_slice(), &[a]);
        stack.push(root);
        stack.goto(b);
        assert_eq!(stack.as_slice(), &[a, b]);
    }

    #[test]
    fn reset_leaves_only_start() {
        let (root, a, b) = ids();
        let mut stack = StateStack::new(a);
        stack.push(b);
        stack.reset(root);
        assert_eq!(stack.as_slice(), &[root]);
        assert!(!stack.contains(b));
    }
}
