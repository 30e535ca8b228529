//! Lowercase filter implementation.
//!
//! Lower-cases every token's text. Curated synonyms and their
//! transliterations may arrive with editorial casing; this filter makes the
//! whole stream comparable with the lower-cased index.
//!
//! # Examples
//!
//! ```
//! use onoma::analysis::token::{Stage, Token, TokenKind};
//! use onoma::analysis::token_filter::Filter;
//! use onoma::analysis::token_filter::lowercase::LowercaseFilter;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![
//!     Token::plain("müller, h"),
//!     Token::new("MÜLLER, Hank", TokenKind::Synonym, Stage::CuratedSynonyms),
//! ];
//! let filtered = filter.filter(tokens).unwrap();
//!
//! assert_eq!(filtered[0].text, "müller, h");
//! assert_eq!(filtered[1].text, "müller, hank");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that converts tokens to lowercase.
///
/// Preserves token kinds, stages and position increments.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(tokens
            .into_iter()
            .map(|token| {
                if token.text.chars().any(char::is_uppercase) {
                    token.with_text(token.text.to_lowercase())
                } else {
                    token
                }
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
