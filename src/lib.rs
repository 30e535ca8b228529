//! # Onoma
//!
//! Author-name query expansion for search indexes.
//!
//! A query for `"Muller, H"` should also find records indexed as
//! `"Müller, Hans"`, `"Mueller, H."` or a curated alias. Onoma turns one
//! author string into a disjunction of exact and prefix terms that covers
//! accented and ascii spellings, initials and full given names, and
//! hand-curated synonyms, without ever expanding an initial the user typed
//! into a full name.
//!
//! ## Features
//!
//! - Canonical `"surname, given parts"` normalization
//! - Truncation/wildcard name combinations
//! - Rule-based transliteration variants
//! - A corpus-derived transliteration table, rebuilt offline and published atomically
//! - Curated synonym expansion
//! - An exact-match mode that searches the same field
//!
//! ## Example
//!
//! ```
//! use onoma::analysis::analyzer::ExpansionMode;
//! use onoma::config::OnomaConfig;
//! use onoma::corpus::InMemoryCorpus;
//! use onoma::engine::NameExpansionEngine;
//!
//! let engine = NameExpansionEngine::new(OnomaConfig::default()).unwrap();
//! engine
//!     .rebuild_from(&InMemoryCorpus::new(["müller, hans", "ortiz, david"]))
//!     .unwrap();
//!
//! let query = engine.expand("Muller, H", ExpansionMode::Expanded).unwrap();
//! assert!(query.matches("müller, hans"));
//! assert!(!query.matches("ortiz, david"));
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod query;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
