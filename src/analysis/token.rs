//! Token types for name analysis.
//!
//! This module defines the value objects that flow through the name
//! expansion pipeline.
//!
//! # Core Types
//!
//! - [`Token`] - A single name variant with its kind, producing stage and position increment
//! - [`TokenKind`] - What sort of variant the token is
//! - [`Stage`] - Which pipeline stage produced the token
//! - [`TokenStream`] - A materialized, ordered sequence of tokens
//!
//! # Positions
//!
//! A name query is a set of alternatives, not a phrase. Every token after
//! the first carries `position_increment == 0`:
//!
//! ```text
//! Input: "Ortiz, David A"
//!
//!   Position 0: "ortiz, david a"   (pos_inc=1)
//!   Position 0: "ortiz,"           (pos_inc=0)
//!   Position 0: "ortiz, d"         (pos_inc=0)
//!   Position 0: "ortiz, david a*"  (pos_inc=0)
//! ```
//!
//! # Examples
//!
//! ```
//! use onoma::analysis::token::{Stage, Token, TokenKind};
//!
//! let token = Token::new("ortiz, d a*", TokenKind::Combination, Stage::Combination);
//! assert!(token.is_wildcard());
//! assert_eq!(token.base_text(), "ortiz, d a");
//! assert_eq!(token.position_increment, 0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker appended to a combination to request a prefix match.
pub const WILDCARD: char = '*';

/// Classification of a name token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenKind {
    /// The normalized input itself
    Plain,
    /// A transliteration variant (table-backed or rule-generated)
    Transliterated,
    /// A truncation/wildcard combination
    Combination,
    /// A curated synonym
    Synonym,
}

/// The pipeline stage a token originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// NameNormalizer
    Normalizer,
    /// NameCombinationFilter
    Combination,
    /// Lookup against the corpus-derived transliteration table
    TransliterationTable,
    /// Rule-based transliteration variant generation
    TransliterationRules,
    /// Lookup against the curated synonym table
    CuratedSynonyms,
}

impl Stage {
    /// Short identifier used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Normalizer => "normalizer",
            Stage::Combination => "combination",
            Stage::TransliterationTable => "transliteration_table",
            Stage::TransliterationRules => "transliteration_rules",
            Stage::CuratedSynonyms => "curated_synonyms",
        }
    }
}

/// A single name variant.
///
/// Tokens are value objects: stages never mutate a token in place, they
/// emit new ones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The (normalized) name text, possibly ending in [`WILDCARD`]
    pub text: String,

    /// The token classification
    pub kind: TokenKind,

    /// The stage that produced this token
    pub stage: Stage,

    /// Position increment from the previous token.
    ///
    /// - 1: the first token of a stream
    /// - 0: an alternative at the same position
    pub position_increment: usize,
}

impl Token {
    /// Create a new alternative token (position increment 0).
    pub fn new<S: Into<String>>(text: S, kind: TokenKind, stage: Stage) -> Self {
        Token {
            text: text.into(),
            kind,
            stage,
            position_increment: 0,
        }
    }

    /// Create the leading plain token of a stream (position increment 1).
    pub fn plain<S: Into<String>>(text: S) -> Self {
        Token {
            text: text.into(),
            kind: TokenKind::Plain,
            stage: Stage::Normalizer,
            position_increment: 1,
        }
    }

    /// Check if the token text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the token requests a prefix match.
    pub fn is_wildcard(&self) -> bool {
        self.text.ends_with(WILDCARD)
    }

    /// The token text without its wildcard marker.
    pub fn base_text(&self) -> &str {
        self.text.strip_suffix(WILDCARD).unwrap_or(&self.text)
    }

    /// Clone this token with updated text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A materialized token stream.
///
/// Stages see the whole stream at once, so a stage can tell which tokens
/// were introduced by an earlier stage.
pub type TokenStream = Vec<Token>;

/// Collect the token texts of a stream, in order.
pub fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}
