//! Author-name analysis.
//!
//! Tokens, the name parser, the normalizer, the transliteration and
//! synonym tables, the token filters and the analyzers that compose them.

pub mod analyzer;
pub mod name;
pub mod synonym;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
pub mod transliteration;
