//! Per-scan register bag.
//!
//! Definitions that need memory beyond the state stack (heredoc delimiters,
//! nesting depths, the name of the block being lexed) keep it here. Every
//! scan starts with an empty bag; the startup hook seeds it and callbacks
//! read and update it.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

/// One register value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Flag(bool),
    Text(String),
    /// FIFO of strings, e.g. pending heredoc terminators.
    Queue(VecDeque<String>),
    /// LIFO of integers, e.g. saved brace depths.
    Stack(Vec<i64>),
}

/// Keyed, typed scan memory.
///
/// Typed accessors treat a missing key and a key holding another type the
/// same way: reads return the neutral value, writes replace it.
#[derive(Clone, Debug, Default)]
pub struct Registers {
    values: FxHashMap<Box<str>, Value>,
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    // === Integers ===

    pub fn int(&self, key: &str) -> i64 {
        match self.values.get(key) {
            Some(Value::Int(n)) => *n,
            _ => 0,
        }
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.set(key, Value::Int(value));
    }

    /// Add `delta` and return the new value.
    pub fn add_int(&mut self, key: &str, delta: i64) -> i64 {
        let next = self.int(key).saturating_add(delta);
        self.set_int(key, next);
        next
    }

    // === Flags ===

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(Value::Flag(true)))
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.set(key, Value::Flag(value));
    }

    // === Text ===

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(Value::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn set_text(&mut self, key: &str, value: impl Into<String>) {
        self.set(key, Value::Text(value.into()));
    }

    // === Queues ===

    pub fn enqueue(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let slot = self
            .values
            .entry(key.into())
            .or_insert_with(|| Value::Queue(VecDeque::new()));
        match slot {
            Value::Queue(queue) => queue.push_back(value),
            other => *other = Value::Queue(VecDeque::from([value])),
        }
    }

    pub fn dequeue(&mut self, key: &str) -> Option<String> {
        match self.values.get_mut(key) {
            Some(Value::Queue(queue)) => queue.pop_front(),
            _ => None,
        }
    }

    pub fn queue_front(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(Value::Queue(queue)) => queue.front().map(String::as_str),
            _ => None,
        }
    }

    pub fn queue_len(&self, key: &str) -> usize {
        match self.values.get(key) {
            Some(Value::Queue(queue)) => queue.len(),
            _ => 0,
        }
    }

    // === Integer stacks ===

    pub fn push_int(&mut self, key: &str, value: i64) {
        let slot = self
            .values
            .entry(key.into())
            .or_insert_with(|| Value::Stack(Vec::new()));
        match slot {
            Value::Stack(stack) => stack.push(value),
            other => *other = Value::Stack(vec![value]),
        }
    }

    pub fn pop_int(&mut self, key: &str) -> Option<i64> {
        match self.values.get_mut(key) {
            Some(Value::Stack(stack)) => stack.pop(),
            _ => None,
        }
    }

    pub fn top_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(Value::Stack(stack)) => stack.last().copied(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_read_neutral() {
        let regs = Registers::new();
        assert_eq!(regs.int("depth"), 0);
        assert!(!regs.flag("seen"));
        assert_eq!(regs.text("name"), None);
        assert_eq!(regs.queue_len("heredocs"), 0);
        assert_eq!(regs.top_int("braces"), None);
    }

    #[test]
    fn counters() {
        let mut regs = Registers::new();
        assert_eq!(regs.add_int("depth", 1), 1);
        assert_eq!(regs.add_int("depth", 1), 2);
        assert_eq!(regs.add_int("depth", -2), 0);
    }

    #[test]
    fn queue_is_fifo() {
        let mut regs = Registers::new();
        regs.enqueue("heredocs", "EOF");
        regs.enqueue("heredocs", "END");
        assert_eq!(regs.queue_front("heredocs"), Some("EOF"));
        assert_eq!(regs.dequeue("heredocs").as_deref(), Some("EOF"));
        assert_eq!(regs.dequeue("heredocs").as_deref(), Some("END"));
        assert_eq!(regs.dequeue("heredocs"), None);
    }

    #[test]
    fn stack_is_lifo() {
        let mut regs = Registers::new();
        regs.push_int("braces", 1);
        regs.push_int("braces", 2);
        assert_eq!(regs.top_int("braces"), Some(2));
        assert_eq!(regs.pop_int("braces"), Some(2));
        assert_eq!(regs.pop_int("braces"), Some(1));
        assert_eq!(regs.pop_int("braces"), None);
    }

    #[test]
    fn writes_replace_other_types() {
        let mut regs = Registers::new();
        regs.set_text("k", "x");
        regs.enqueue("k", "a");
        assert_eq!(regs.queue_len("k"), 1);
        regs.push_int("k", 3);
        assert_eq!(regs.top_int("k"), Some(3));
        regs.set_flag("k", true);
        assert!(regs.flag("k"));
        assert_eq!(regs.int("k"), 0);
    }
}
