//! Transliteration between accented and ascii spellings of names.
//!
//! - [`rules`] - the static rule set and cross-product variant generation
//! - [`table`] - the corpus-derived, versioned equivalence table

pub mod rules;
pub mod table;

pub use rules::{DEFAULT_RULE_SET, TransliterationRule, TransliterationRuleSet};
pub use table::TransliterationTable;
