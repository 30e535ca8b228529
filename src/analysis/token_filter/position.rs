//! Position repair filter.
//!
//! After multi-stage expansion the position increments of a stream may no
//! longer describe a set of alternatives: a stray increment of 1 would make
//! a query parser read two unrelated names as a phrase. This filter pins
//! every token after the first to increment 0, leaving the first token's
//! own increment untouched.
//!
//! ```text
//! before:  a(1) b(0) c(1) d(0)     a b | c d   (two positions)
//! after:   a(1) b(0) c(0) d(0)     a b c d     (one position)
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Collapses a stream onto a single position.
#[derive(Clone, Debug, Default)]
pub struct PositionRepairFilter;

impl PositionRepairFilter {
    /// Create a new position repair filter.
    pub fn new() -> Self {
        Self
    }
}

impl Filter for PositionRepairFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(tokens
            .into_iter()
            .enumerate()
            .map(|(i, token)| {
                if i == 0 {
                    token
                } else {
                    token.with_position_increment(0)
                }
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "position_repair"
    }
}
