//! Core analyzer trait definition.
//!
//! An [`Analyzer`] turns one raw author string into a finished token
//! stream. Analyzers own the stage order; stages themselves are
//! [`Tokenizer`](crate::analysis::tokenizer::Tokenizer)s and
//! [`Filter`](crate::analysis::token_filter::Filter)s.
//!
//! ```text
//! Raw Name → Analyzer → Token Stream → NameQuery / indexed value
//!              ↓
//!         NameNormalizer
//!              ↓
//!         Filter 1 … Filter N
//! ```
//!
//! # Available Implementations
//!
//! - [`PipelineAnalyzer`](super::pipeline::PipelineAnalyzer) - Tokenizer + filter chain
//! - [`IndexTimeAnalyzer`](super::index_time::IndexTimeAnalyzer) - Normalization and deduplication
//! - [`QueryTimeAnalyzer`](super::query_time::QueryTimeAnalyzer) - Full expansion or exact mode
//!
//! # Examples
//!
//! ```
//! use onoma::analysis::analyzer::analyzer::Analyzer;
//! use onoma::analysis::analyzer::index_time::IndexTimeAnalyzer;
//!
//! let analyzer = IndexTimeAnalyzer::new();
//! let tokens = analyzer.analyze("  Müller,  H. ").unwrap();
//!
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(tokens[0].text, "müller, h");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert a raw name into processed tokens.
///
/// # Thread Safety
///
/// The trait requires `Send + Sync` so one analyzer can serve concurrent
/// queries. Analyzers hold only immutable state.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return the finished token stream.
    ///
    /// An empty stream means the input held no usable name ("no query").
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Provide access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn std::any::Any;
}
