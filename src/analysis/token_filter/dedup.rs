//! Deduplicate filter implementation.
//!
//! Removes tokens that repeat an earlier token's text and kind. The first
//! occurrence keeps its place and position increment. Runs once, as the
//! last stage, when the whole expanded stream is known.

use ahash::AHashSet;

use crate::analysis::token::{TokenKind, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that drops repeated `(text, kind)` tokens.
#[derive(Clone, Debug, Default)]
pub struct DeduplicateFilter;

impl DeduplicateFilter {
    /// Create a new deduplicate filter.
    pub fn new() -> Self {
        Self
    }
}

impl Filter for DeduplicateFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut seen: AHashSet<(String, TokenKind)> = AHashSet::with_capacity(tokens.len());
        Ok(tokens
            .into_iter()
            .filter(|token| seen.insert((token.text.clone(), token.kind)))
            .collect())
    }

    fn name(&self) -> &'static str {
        "deduplicate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::{Stage, Token};

    fn stream() -> Vec<Token> {
        vec![
            Token::plain("muller, h"),
            Token::new("muller,", TokenKind::Combination, Stage::Combination),
            Token::new("muller,", TokenKind::Combination, Stage::Combination),
            Token::new("muller,", TokenKind::Synonym, Stage::TransliterationTable),
            Token::new("muller, h", TokenKind::Plain, Stage::Normalizer),
        ]
    }

    #[test]
    fn test_deduplicate() {
        let result = DeduplicateFilter::new().filter(stream()).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "muller, h");
        assert_eq!(result[0].position_increment, 1);
        assert_eq!(result[1].kind, TokenKind::Combination);
        assert_eq!(result[2].kind, TokenKind::Synonym);
    }

    #[test]
    fn test_deduplicate_is_idempotent() {
        let filter = DeduplicateFilter::new();
        let once = filter.filter(stream()).unwrap();
        let twice = filter.filter(once.clone()).unwrap();
        assert_eq!(once, twice);
    }
}
