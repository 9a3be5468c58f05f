//! Per-scan configuration.
//!
//! [`ScanConfig`] holds engine limits; [`ScanOptions`] adds the lexer option
//! values (`start_inline`, dialect switches, ...) a definition may consult in
//! its startup hook and callbacks.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// Options used by [`Lexer::lex`](crate::Lexer::lex).
pub(crate) static DEFAULT_OPTIONS: LazyLock<ScanOptions> = LazyLock::new(ScanOptions::default);

/// Engine limits for one scan.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    /// Maximum rule-evaluation steps per scan. `None` means unlimited.
    ///
    /// Each delegated scan keeps its own count against the same limit.
    pub max_steps: Option<u64>,
    /// Maximum nesting of delegated and recursive scans.
    pub max_delegation_depth: usize,
    /// Zero-length matches allowed in a row at one offset, even when each of
    /// them changes the state stack.
    pub max_zero_width_steps: u32,
}

impl ScanConfig {
    pub const DEFAULT_DELEGATION_DEPTH: usize = 32;
    pub const DEFAULT_ZERO_WIDTH_STEPS: u32 = 64;

    #[must_use]
    pub fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    #[must_use]
    pub fn with_max_delegation_depth(mut self, depth: usize) -> Self {
        self.max_delegation_depth = depth;
        self
    }

    #[must_use]
    pub fn with_max_zero_width_steps(mut self, steps: u32) -> Self {
        self.max_zero_width_steps = steps;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            max_steps: None,
            max_delegation_depth: Self::DEFAULT_DELEGATION_DEPTH,
            max_zero_width_steps: Self::DEFAULT_ZERO_WIDTH_STEPS,
        }
    }
}

/// Option values plus limits for one scan.
///
/// Options are plain strings keyed by name. Definitions declare the keys they
/// understand with [`LexerBuilder::option`](crate::LexerBuilder::option);
/// other keys are ignored with a warning. Delegated scans see the same
/// options.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    values: FxHashMap<String, String>,
    pub config: ScanConfig,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// `true` for `true`, `yes`, `on` and `1` (case-insensitive).
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "on" | "1"
            )
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.max_steps, None);
        assert_eq!(config.max_delegation_depth, 32);
        assert_eq!(config.max_zero_width_steps, 64);
    }

    #[test]
    fn flag_parsing() {
        let options = ScanOptions::new()
            .with("a", "Yes")
            .with("b", "0")
            .with("c", " on ");
        assert!(options.flag("a"));
        assert!(!options.flag("b"));
        assert!(options.flag("c"));
        assert!(!options.flag("missing"));
    }

    #[test]
    fn config_setters() {
        let options = ScanOptions::new().with_config(
            ScanConfig::default()
                .with_max_steps(10)
                .with_max_delegation_depth(2),
        );
        assert_eq!(options.config.max_steps, Some(10));
        assert_eq!(options.config.max_delegation_depth, 2);
    }
}
