//! Keyword sets and set-membership classification.
//!
//! Most language definitions match a whole word with one pattern and then
//! decide its category by looking the word up in a handful of fixed sets.
//! Sets are built once per definition and never mutated afterwards.

use rustc_hash::FxHashSet;
use tinct_token::Category;

/// An immutable set of words.
///
/// A case-insensitive set folds both its members and the probed word to
/// lowercase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeywordSet {
    words: FxHashSet<Box<str>>,
    ignore_case: bool,
}

impl KeywordSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(words, false)
    }

    pub fn ignore_case<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(words, true)
    }

    /// Words separated by whitespace.
    pub fn from_words(text: &str) -> Self {
        Self::new(text.split_whitespace())
    }

    fn build<I, S>(words: I, ignore_case: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| fold(w.as_ref(), ignore_case).into_boxed_str())
            .collect();
        KeywordSet { words, ignore_case }
    }

    pub fn contains(&self, word: &str) -> bool {
        if self.ignore_case {
            self.words.contains(word.to_lowercase().as_str())
        } else {
            self.words.contains(word)
        }
    }

    pub fn is_ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// A copy with `words` added. Used by definitions that extend a base
    /// definition's vocabulary.
    #[must_use]
    pub fn with<I, S>(&self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next = self.clone();
        next.words.extend(
            words
                .into_iter()
                .map(|w| fold(w.as_ref(), self.ignore_case).into_boxed_str()),
        );
        next
    }

    #[must_use]
    pub fn without<I, S>(&self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next = self.clone();
        for w in words {
            next.words.remove(fold(w.as_ref(), self.ignore_case).as_str());
        }
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| &**w)
    }
}

fn fold(word: &str, ignore_case: bool) -> String {
    if ignore_case {
        word.to_lowercase()
    } else {
        word.to_owned()
    }
}

/// Ordered set-to-category table with a fallback.
///
/// The first set containing the matched text decides the category.
///
/// ```
/// use tinct_lexer::Classify;
/// use tinct_token::Category;
///
/// let classify = Classify::new(Category::NAME)
///     .set("keywords", Category::KEYWORD)
///     .set("builtins", Category::NAME_BUILTIN);
/// assert_eq!(classify.fallback(), Category::NAME);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classify {
    pub(crate) sets: Vec<(String, Category)>,
    pub(crate) fallback: Category,
}

impl Classify {
    pub fn new(fallback: Category) -> Self {
        Classify {
            sets: Vec::new(),
            fallback,
        }
    }

    #[must_use]
    pub fn set(mut self, name: impl Into<String>, category: Category) -> Self {
        self.sets.push((name.into(), category));
        self
    }

    pub fn fallback(&self) -> Category {
        self.fallback
    }
}
