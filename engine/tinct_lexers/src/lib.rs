//! Demonstration language definitions for the tinct engine.
//!
//! Each module exposes a `lexer()` constructor. [`catalog`] builds all of
//! them once and looks them up by tag or alias.

pub mod css;
pub mod html;
pub mod ini;
pub mod mysql;
pub mod plaintext;
pub mod shell;
pub mod sql;

use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;
use tinct_lexer::{BuildError, Lexer};
use tracing::debug;

/// Global catalog of the bundled definitions.
static STANDARD: OnceLock<Result<Catalog, BuildError>> = OnceLock::new();

/// Definitions keyed by tag and alias.
#[derive(Default)]
pub struct Catalog {
    lexers: Vec<Arc<Lexer>>,
    /// Lowercased tag or alias to index into `lexers`.
    names: FxHashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every bundled definition.
    pub fn standard() -> Result<Self, BuildError> {
        let css = Arc::new(css::lexer()?);
        let sql = Arc::new(sql::lexer()?);
        let mysql = Arc::new(mysql::lexer(&sql)?);
        let html = Arc::new(html::lexer(&css)?);

        let mut catalog = Catalog::new();
        catalog.register(Arc::new(plaintext::lexer()?));
        catalog.register(Arc::new(ini::lexer()?));
        catalog.register(css);
        catalog.register(html);
        catalog.register(Arc::new(shell::lexer()?));
        catalog.register(sql);
        catalog.register(mysql);
        debug!(lexers = catalog.len(), names = catalog.names.len(), "catalog built");
        Ok(catalog)
    }

    /// Add a definition under its tag and aliases. A name already taken
    /// points to the newer definition.
    pub fn register(&mut self, lexer: Arc<Lexer>) {
        let index = self.lexers.len();
        let meta = lexer.meta();
        for name in std::iter::once(&meta.tag).chain(&meta.aliases) {
            self.names.insert(name.to_ascii_lowercase(), index);
        }
        self.lexers.push(lexer);
    }

    /// Look up a definition by tag or alias, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&Arc<Lexer>> {
        self.names
            .get(&name.to_ascii_lowercase())
            .map(|&index| &self.lexers[index])
    }

    /// First definition whose content sniffer accepts `text`.
    pub fn detect(&self, text: &str) -> Option<&Arc<Lexer>> {
        self.lexers.iter().find(|lexer| lexer.detect(text))
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.lexers.iter().map(|lexer| lexer.tag())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Lexer>> {
        self.lexers.iter()
    }

    pub fn len(&self) -> usize {
        self.lexers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexers.is_empty()
    }
}

/// The bundled definitions, built on first use.
pub fn catalog() -> Result<&'static Catalog, &'static BuildError> {
    STANDARD.get_or_init(Catalog::standard).as_ref()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tinct_token::Category;

    #[test]
    fn standard_catalog() {
        let catalog = catalog().unwrap();
        let tags: Vec<_> = catalog.tags().collect();
        assert_eq!(
            tags,
            ["plaintext", "ini", "css", "html", "shell", "sql", "mysql"]
        );
        assert_eq!(catalog.get("BASH").unwrap().tag(), "shell");
        assert_eq!(catalog.get("text").unwrap().tag(), "plaintext");
        assert!(catalog.get("cobol").is_none());
    }

    #[test]
    fn catalog_is_built_once() {
        let a = catalog().unwrap().get("css").unwrap();
        let b = catalog().unwrap().get("css").unwrap();
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn detection() {
        let catalog = catalog().unwrap();
        assert_eq!(catalog.detect("#!/bin/sh\n").unwrap().tag(), "shell");
        assert_eq!(catalog.detect("<!DOCTYPE html>").unwrap().tag(), "html");
        assert!(catalog.detect("plain words").is_none());
    }

    #[test]
    fn register_overrides_names() {
        let mut catalog = Catalog::new();
        let first = Lexer::builder("a")
            .alias("x")
            .state("root", |s| {
                s.rule(".", Category::TEXT);
            })
            .build()
            .unwrap();
        let second = Lexer::builder("b")
            .alias("X")
            .state("root", |s| {
                s.rule(".", Category::KEYWORD);
            })
            .build()
            .unwrap();
        catalog.register(Arc::new(first));
        catalog.register(Arc::new(second));
        assert_eq!(catalog.get("x").unwrap().tag(), "b");
        assert_eq!(catalog.get("a").unwrap().tag(), "a");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn every_definition_covers_mixed_input() {
        let input = "<p a='1'>x</p>\n[s]\nk = \"v\"\nSELECT `t` FROM x; -- c\ncat <<E\nE\n{a:b}";
        for lexer in catalog().unwrap().iter() {
            let tokens = lexer.tokenize(input).unwrap();
            let text: String = tokens.iter().map(|t| t.text).collect();
            assert_eq!(text, input, "{}", lexer.tag());
        }
    }
}
