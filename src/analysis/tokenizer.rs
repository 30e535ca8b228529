//! Tokenizer implementations for name analysis.
//!
//! A tokenizer is the first step of every pipeline: it turns the raw input
//! string into the initial token stream.
//!
//! # Available Tokenizers
//!
//! - [`normalizer::NameNormalizer`] - Canonicalizes a whole author name into one token
//!
//! # Examples
//!
//! ```
//! use onoma::analysis::tokenizer::Tokenizer;
//! use onoma::analysis::tokenizer::normalizer::NameNormalizer;
//!
//! let tokenizer = NameNormalizer::new();
//! let tokens = tokenizer.tokenize("  Ortiz,   David A. ").unwrap();
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(tokens[0].text, "ortiz, david a");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert raw text into tokens.
///
/// The trait requires `Send + Sync` so a single instance can serve
/// concurrent query pipelines.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod normalizer;
