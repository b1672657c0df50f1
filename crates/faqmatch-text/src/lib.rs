//! faqmatch-text
//!
//! Text side of the matcher: normalization, the tf-idf n-gram index, and the
//! approximate string scorers. Everything here is pure and synchronous.

pub mod fuzzy;
pub mod lexical;
pub mod normalize;

pub use fuzzy::{fuzzy_score, partial_ratio, ratio, token_set_ratio};
pub use lexical::{LexicalIndex, SparseVector, Term};
pub use normalize::normalize;
