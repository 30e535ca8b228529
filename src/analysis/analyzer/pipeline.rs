//! Pipeline analyzer that combines a tokenizer and filters.
//!
//! The building block for fixed, linear pipelines: the tokenizer runs once
//! and every filter then sees the whole stream, in the order added.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use onoma::analysis::analyzer::analyzer::Analyzer;
//! use onoma::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use onoma::analysis::token_filter::combination::NameCombinationFilter;
//! use onoma::analysis::tokenizer::normalizer::NameNormalizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(NameNormalizer::new()))
//!     .add_filter(Arc::new(NameCombinationFilter::default()))
//!     .with_name("combinations");
//!
//! let tokens = analyzer.analyze("Ortiz, D").unwrap();
//! let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["ortiz, d", "ortiz,", "ortiz, d*"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// The configured pipeline name.
    pub fn pipeline_name(&self) -> &str {
        &self.name
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }
        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_filter::dedup::DeduplicateFilter;
    use crate::analysis::token_filter::lowercase::LowercaseFilter;
    use crate::analysis::tokenizer::normalizer::NameNormalizer;

    #[test]
    fn test_pipeline_analyzer() {
        let analyzer = PipelineAnalyzer::new(Arc::new(NameNormalizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(DeduplicateFilter::new()));

        let tokens = analyzer.analyze("Kurtz,  Michael J.").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "kurtz, michael j");
    }

    #[test]
    fn test_pipeline_empty_input() {
        let analyzer = PipelineAnalyzer::new(Arc::new(NameNormalizer::new()));
        assert!(analyzer.analyze("  ,. ").unwrap().is_empty());
    }

    #[test]
    fn test_pipeline_names() {
        let analyzer = PipelineAnalyzer::new(Arc::new(NameNormalizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()));
        assert_eq!(analyzer.name(), "pipeline");
        assert_eq!(analyzer.pipeline_name(), "pipeline_name_normalizer");

        let debug = format!("{analyzer:?}");
        assert!(debug.contains("lowercase"));
    }
}
