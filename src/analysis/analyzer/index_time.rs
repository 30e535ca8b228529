//! Index-time analyzer.
//!
//! Indexing stores names in canonical form and nothing else: no
//! combinations, no synonyms. All expansion happens on the query side,
//! so the corpus scan sees exactly what was indexed.

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::dedup::DeduplicateFilter;
use crate::analysis::tokenizer::normalizer::NameNormalizer;
use crate::error::Result;

/// Normalizes author names for storage.
pub struct IndexTimeAnalyzer {
    inner: PipelineAnalyzer,
}

impl IndexTimeAnalyzer {
    /// Create the index-time analyzer.
    pub fn new() -> Self {
        let inner = PipelineAnalyzer::new(Arc::new(NameNormalizer::new()))
            .add_filter(Arc::new(DeduplicateFilter::new()))
            .with_name("index_time");
        IndexTimeAnalyzer { inner }
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }

    /// Normalize a batch of raw author strings into distinct indexed values.
    ///
    /// Values are returned in first-seen order. Inputs that normalize to
    /// nothing are skipped.
    pub fn analyze_values<I, S>(&self, raw_values: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = Vec::new();
        for raw in raw_values {
            for token in self.analyze(raw.as_ref())? {
                if !values.contains(&token.text) {
                    values.push(token.text);
                }
            }
        }
        Ok(values)
    }
}

impl Default for IndexTimeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for IndexTimeAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "index_time"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl std::fmt::Debug for IndexTimeAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexTimeAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
