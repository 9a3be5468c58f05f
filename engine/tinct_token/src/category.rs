//! Hierarchical token categories.
//!
//! A [`Category`] is a 32-bit handle into a process-wide table. The standard
//! tree (`Keyword`, `Name.Function`, `Literal.String.Double`, ...) lives in a
//! static table and is addressable through associated constants; any other
//! dotted path is interned on first use by [`Category::resolve`].
//!
//! Identity is structural: resolving the same path twice yields the same
//! handle, so categories compare and hash as plain integers.
//!
//! # Layout
//!
//! | Ids                  | Storage                           |
//! |----------------------|-----------------------------------|
//! | `0..STANDARD.len()`  | static table, no locking          |
//! | `STANDARD.len()..`   | leaked entries behind an `RwLock` |

mod registry;
mod standard;

use std::fmt;

use registry::REGISTRY;
use standard::{StandardEntry, STANDARD};

/// Interned token category.
///
/// Cheap to copy and compare. All accessors return `'static` data: dynamic
/// categories are leaked when interned and never freed, like interned names.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Category(u32);

/// Path segment aliases accepted by [`Category::resolve`].
///
/// The corpus of lexer definitions refers to strings and numbers both with and
/// without the `Literal` prefix.
const ALIASES: &[(&str, &str)] = &[
    ("Str", "Literal.String"),
    ("String", "Literal.String"),
    ("Num", "Literal.Number"),
    ("Number", "Literal.Number"),
];

impl Category {
    /// Resolve a dotted path (`Name.Function`) to a category, interning it
    /// if needed.
    ///
    /// Never fails. `::` is accepted as a separator, empty segments are
    /// ignored, and the empty path (or `Token`) is the root. A path whose
    /// first segment is not a standard top-level category is attached below
    /// [`Category::OTHER`].
    pub fn resolve(path: &str) -> Category {
        let normalized = normalize(path);
        if normalized.is_empty() {
            return Category::ROOT;
        }
        if let Some(found) = REGISTRY.get(&normalized) {
            return found;
        }
        REGISTRY.intern(&normalized)
    }

    /// Full dotted path, e.g. `Literal.String.Double`. The root is `Token`.
    pub fn path(self) -> &'static str {
        match self.standard() {
            Some(entry) => entry.path,
            None => REGISTRY.entry(self).path,
        }
    }

    /// Last path segment.
    pub fn name(self) -> &'static str {
        let path = self.path();
        path.rsplit('.').next().unwrap_or(path)
    }

    /// Short class name used by formatters (`k`, `nf`, `s2`, ...).
    ///
    /// Dynamic categories derive theirs from the parent's short name plus the
    /// lowercased first letter of their own segment.
    pub fn short_name(self) -> &'static str {
        match self.standard() {
            Some(entry) => entry.short,
            None => REGISTRY.entry(self).short,
        }
    }

    /// Parent category; `None` only for [`Category::ROOT`].
    pub fn parent(self) -> Option<Category> {
        if self == Category::ROOT {
            return None;
        }
        let parent = match self.standard() {
            Some(entry) => entry.parent,
            None => REGISTRY.entry(self).parent,
        };
        Some(Category(parent))
    }

    /// `true` if `ancestor` is this category or one of its ancestors.
    pub fn is_a(self, ancestor: Category) -> bool {
        self.ancestors().any(|c| c == ancestor)
    }

    /// This category followed by each ancestor up to and including the root.
    pub fn ancestors(self) -> Ancestors {
        Ancestors { next: Some(self) }
    }

    /// Number of edges between this category and the root.
    pub fn depth(self) -> usize {
        self.ancestors().count() - 1
    }

    /// Raw table index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn standard(self) -> Option<&'static StandardEntry> {
        STANDARD.get(self.0 as usize)
    }
}

/// Iterator returned by [`Category::ancestors`].
pub struct Ancestors {
    next: Option<Category>,
}

impl Iterator for Ancestors {
    type Item = Category;

    fn next(&mut self) -> Option<Category> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::TEXT
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let path = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Ok(Category::resolve(&path))
    }
}

/// Canonical spelling of a path: `.`-separated, no empty segments, leading
/// alias expanded, `Token` prefix stripped.
fn normalize(path: &str) -> String {
    let mut segments = path
        .split("::")
        .flat_map(|part| part.split('.'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .peekable();

    if segments.peek() == Some(&"Token") {
        segments.next();
    }

    let mut out = String::with_capacity(path.len() + 8);
    for (i, segment) in segments.enumerate() {
        if i == 0 {
            if let Some((_, expanded)) = ALIASES.iter().find(|(alias, _)| *alias == segment) {
                out.push_str(expanded);
                continue;
            }
        } else {
            out.push('.');
        }
        out.push_str(segment);
    }
    out
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
