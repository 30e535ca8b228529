//! Analyzers that compose the name-expansion stages.
//!
//! - [`IndexTimeAnalyzer`] - normalization for stored values
//! - [`QueryTimeAnalyzer`] - the fixed expansion sequence, or exact mode
//! - [`PipelineAnalyzer`] - a generic tokenizer + filter chain

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod index_time;
pub mod pipeline;
pub mod query_time;

pub use analyzer::Analyzer;
pub use index_time::IndexTimeAnalyzer;
pub use pipeline::PipelineAnalyzer;
pub use query_time::{ExpansionMode, ExpansionTrace, QueryTimeAnalyzer, StageSnapshot};
