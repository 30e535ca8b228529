//! Name equivalence tables shared by the synonym expansion stages.
//!
//! # Components
//!
//! - [`dictionary`] - FST-backed symmetric equivalence dictionary
//! - [`curated`] - Hand-maintained curated synonym table
//!
//! The corpus-derived transliteration table lives in
//! [`crate::analysis::transliteration::table`]; both tables implement
//! [`NameLookup`] so the same [`SynonymFilter`](crate::analysis::token_filter::synonym::SynonymFilter)
//! can expand against either.

pub mod curated;
pub mod dictionary;

pub use curated::CuratedSynonymTable;
pub use dictionary::EquivalenceDictionary;

/// A read-only name → equivalents lookup.
pub trait NameLookup: Send + Sync {
    /// Equivalents of a normalized name key, excluding the key itself.
    fn lookup(&self, key: &str) -> Option<&[String]>;

    /// Get the name of this table (for logging).
    fn name(&self) -> &'static str;
}
