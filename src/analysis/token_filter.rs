//! Token filter implementations for name-stream transformation.
//!
//! Two kinds of stage live here:
//!
//! - [`Filter`]s transform a whole stream (lower-casing, position repair,
//!   deduplication).
//! - [`Expander`]s derive new tokens from one source token (combinations,
//!   synonym lookup, transliteration variants). Every expander is also a
//!   filter that keeps each source token and inserts its expansions right
//!   after it.
//!
//! # Available Filters
//!
//! - [`combination::NameCombinationFilter`] - Truncation/wildcard combinations
//! - [`synonym::SynonymFilter`] - Table lookup (transliteration or curated)
//! - [`transliterate::TransliterationFilter`] - Rule-based variants
//! - [`lowercase::LowercaseFilter`] - Lower-cases token text
//! - [`position::PositionRepairFilter`] - Collapses the stream to one position
//! - [`dedup::DeduplicateFilter`] - Drops repeated tokens
//!
//! # Examples
//!
//! ```
//! use onoma::analysis::token::Token;
//! use onoma::analysis::token_filter::Filter;
//! use onoma::analysis::token_filter::combination::NameCombinationFilter;
//!
//! let filter = NameCombinationFilter::default();
//! let tokens = filter.filter(vec![Token::plain("ortiz, d")]).unwrap();
//!
//! let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["ortiz, d", "ortiz,", "ortiz, d*"]);
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` so one filter instance can serve
/// concurrent query pipelines.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Trait for stages that derive new tokens from a single source token.
pub trait Expander: Send + Sync {
    /// The tokens derived from `token`, excluding `token` itself.
    fn expand(&self, token: &Token) -> Vec<Token>;

    /// Get the name of this expander (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Keep every token and insert its expansions immediately after it.
pub fn expand_all<E: Expander + ?Sized>(expander: &E, tokens: TokenStream) -> TokenStream {
    let mut output = Vec::with_capacity(tokens.len());
    for token in tokens {
        let expansions = expander.expand(&token);
        output.push(token);
        output.extend(expansions);
    }
    output
}

pub mod combination;
pub mod dedup;
pub mod lowercase;
pub mod position;
pub mod synonym;
pub mod transliterate;

pub use combination::NameCombinationFilter;
pub use dedup::DeduplicateFilter;
pub use lowercase::LowercaseFilter;
pub use position::PositionRepairFilter;
pub use synonym::SynonymFilter;
pub use transliterate::TransliterationFilter;
