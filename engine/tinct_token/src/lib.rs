//! Tinct token model.
//!
//! The vocabulary shared by the lexer engine, lexer definitions and anything
//! consuming token streams (formatters, themes):
//! - [`Category`]: interned, hierarchical token categories
//! - [`Span`]: byte ranges into the scanned input
//! - [`Token`]: a categorized slice of the input
//!
//! Categories are process-wide and immutable once interned, so they can be
//! shared freely between lexer definitions and threads.

mod category;
mod span;
mod token;

pub use category::{Ancestors, Category};
pub use span::Span;
pub use token::Token;
