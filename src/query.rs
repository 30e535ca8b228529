//! Query construction for author-name search.

pub mod name_query;

pub use name_query::{NameQuery, NameTermQuery, TermMatch};
