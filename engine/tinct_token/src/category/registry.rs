//! Process-wide table of dynamically interned categories.

use std::sync::LazyLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::standard::STANDARD;
use super::Category;

pub(super) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// A category created at runtime. Leaked on creation, never freed.
pub(super) struct DynamicEntry {
    pub path: &'static str,
    pub short: &'static str,
    pub parent: u32,
}

struct Tables {
    /// Every known path, standard ones included.
    by_path: FxHashMap<&'static str, Category>,
    /// Dynamic entries, indexed by `raw - STANDARD.len()`.
    dynamic: Vec<&'static DynamicEntry>,
}

pub(super) struct Registry {
    tables: RwLock<Tables>,
}

impl Registry {
    fn new() -> Self {
        let mut by_path = FxHashMap::default();
        for (index, entry) in STANDARD.iter().enumerate() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "the standard table has fewer than a hundred rows"
            )]
            by_path.insert(entry.path, Category(index as u32));
        }
        Registry {
            tables: RwLock::new(Tables {
                by_path,
                dynamic: Vec::new(),
            }),
        }
    }

    pub fn get(&self, path: &str) -> Option<Category> {
        self.tables.read().by_path.get(path).copied()
    }

    pub fn entry(&self, category: Category) -> &'static DynamicEntry {
        let index = category.raw() as usize - STANDARD.len();
        self.tables.read().dynamic[index]
    }

    /// Intern `path` and every missing prefix of it.
    ///
    /// `path` must already be normalized.
    pub fn intern(&self, path: &str) -> Category {
        let mut tables = self.tables.write();

        // Double-check after acquiring the write lock
        if let Some(&found) = tables.by_path.get(path) {
            return found;
        }

        let mut parent = Category::OTHER;
        let mut prefix_end = 0;
        for segment in path.split('.') {
            prefix_end += segment.len();
            let prefix = &path[..prefix_end];
            prefix_end += 1; // separator

            if let Some(&known) = tables.by_path.get(prefix) {
                parent = known;
                continue;
            }

            let short = derive_short(&tables, parent, segment);
            let raw = u32::try_from(STANDARD.len() + tables.dynamic.len())
                .unwrap_or_else(|_| panic!("category table exceeded u32::MAX entries"));
            let entry: &'static DynamicEntry = Box::leak(Box::new(DynamicEntry {
                path: Box::leak(prefix.to_owned().into_boxed_str()),
                short: Box::leak(short.into_boxed_str()),
                parent: parent.raw(),
            }));
            let category = Category(raw);
            tables.dynamic.push(entry);
            tables.by_path.insert(entry.path, category);
            parent = category;
        }
        parent
    }
}

/// Parent short name plus the lowercased first letter of `segment`.
fn derive_short(tables: &Tables, parent: Category, segment: &str) -> String {
    let raw = parent.raw() as usize;
    let mut short = match STANDARD.get(raw) {
        Some(entry) => entry.short.to_owned(),
        None => tables.dynamic[raw - STANDARD.len()].short.to_owned(),
    };
    if let Some(first) = segment.chars().next() {
        short.extend(first.to_lowercase());
    }
    short
}
