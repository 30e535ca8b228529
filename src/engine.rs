//! Name expansion engine.
//!
//! The query-serving entry point. It owns the configuration, the published
//! transliteration table and the curated synonym table, and turns an
//! author-name string plus a field into a [`NameQuery`].
//!
//! Every query takes its own snapshot of both tables, so a scan or reload
//! running on another thread never changes a query half-way through.
//!
//! # Examples
//!
//! ```
//! use onoma::analysis::analyzer::ExpansionMode;
//! use onoma::config::OnomaConfig;
//! use onoma::engine::NameExpansionEngine;
//!
//! let engine = NameExpansionEngine::new(OnomaConfig::default()).unwrap();
//! let query = engine.expand("Ortiz, D", ExpansionMode::Expanded).unwrap();
//!
//! assert!(query.matches("ortiz, david"));
//! assert!(query.matches("ortiz, diana"));
//! assert!(!query.matches("ortega, d"));
//! ```

use std::sync::Arc;

use log::{info, warn};
use parking_lot::RwLock;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::query_time::{ExpansionMode, ExpansionTrace, QueryTimeAnalyzer};
use crate::analysis::synonym::curated::CuratedSynonymTable;
use crate::analysis::token::Token;
use crate::analysis::transliteration::table::TransliterationTable;
use crate::config::OnomaConfig;
use crate::corpus::handle::TableHandle;
use crate::corpus::scan::{CorpusScanJob, ScanReport};
use crate::corpus::source::IndexedValueSource;
use crate::error::{OnomaError, Result};
use crate::query::name_query::NameQuery;

/// A query together with the trace of the analysis that produced it.
#[derive(Debug)]
pub struct TracedExpansion {
    /// The stream after every pipeline step.
    pub trace: ExpansionTrace,
    /// The query built from the final stream.
    pub query: NameQuery,
    /// Version of the transliteration table the analysis ran against.
    pub table_version: u64,
}

/// Expands author names into queries against the author field.
#[derive(Debug)]
pub struct NameExpansionEngine {
    config: OnomaConfig,
    table: Arc<TableHandle>,
    curated: RwLock<Arc<CuratedSynonymTable>>,
    scan_job: CorpusScanJob,
}

impl NameExpansionEngine {
    /// Create an engine with empty tables.
    pub fn new(config: OnomaConfig) -> Result<Self> {
        Self::with_tables(
            config,
            TransliterationTable::empty(),
            CuratedSynonymTable::empty(),
        )
    }

    /// Create an engine serving the given tables.
    pub fn with_tables(
        config: OnomaConfig,
        table: TransliterationTable,
        curated: CuratedSynonymTable,
    ) -> Result<Self> {
        config.validate()?;
        let scan_job = CorpusScanJob::new(&config.transliteration);
        Ok(Self {
            config,
            table: Arc::new(TableHandle::new(table)),
            curated: RwLock::new(Arc::new(curated)),
            scan_job,
        })
    }

    /// Create an engine loading the tables named in the configuration.
    ///
    /// A missing or corrupt table file is logged and replaced by an empty
    /// table; queries then run with normalization and combinations only.
    pub fn from_config(config: OnomaConfig) -> Result<Self> {
        let table = match &config.tables.transliteration_path {
            Some(path) => TransliterationTable::load_or_empty(path, 1),
            None => TransliterationTable::empty(),
        };
        let curated = match &config.tables.curated_path {
            Some(path) => CuratedSynonymTable::load_or_empty(path),
            None => CuratedSynonymTable::empty(),
        };
        info!(
            "name expansion engine ready: transliteration table v{} ({} keys), {} curated keys",
            table.version(),
            table.len(),
            curated.len()
        );
        Self::with_tables(config, table, curated)
    }

    /// The active configuration.
    pub fn config(&self) -> &OnomaConfig {
        &self.config
    }

    /// The shared transliteration table handle.
    pub fn table_handle(&self) -> Arc<TableHandle> {
        self.table.clone()
    }

    /// Snapshot of the curated synonym table.
    pub fn curated(&self) -> Arc<CuratedSynonymTable> {
        self.curated.read().clone()
    }

    /// Build a query-time analyzer over the current table snapshots.
    pub fn analyzer(&self, mode: ExpansionMode) -> QueryTimeAnalyzer {
        QueryTimeAnalyzer::new(&self.config, self.table.snapshot(), self.curated())
            .with_mode(mode)
    }

    /// The mode a query against `field` runs in.
    pub fn mode_for_field(&self, field: &str) -> Result<ExpansionMode> {
        let tables = &self.config.tables;
        if field == tables.field {
            Ok(ExpansionMode::Expanded)
        } else if field == tables.exact_field {
            Ok(ExpansionMode::Exact)
        } else {
            Err(OnomaError::query(format!(
                "unknown author field '{}' (expected '{}' or '{}')",
                field, tables.field, tables.exact_field
            )))
        }
    }

    /// Expand `input` into a query.
    ///
    /// Exact-mode queries are built against the exact field and then
    /// rewritten onto the base field, so both modes search the same index.
    pub fn expand(&self, input: &str, mode: ExpansionMode) -> Result<NameQuery> {
        let tokens = self.analyzer(mode).analyze(input)?;
        Ok(self.build_query(mode, &tokens))
    }

    /// Expand `input` for a query tagged with `field`.
    pub fn expand_field(&self, input: &str, field: &str) -> Result<NameQuery> {
        self.expand(input, self.mode_for_field(field)?)
    }

    /// Expand `input` once, returning both the trace and the query built
    /// from its final stream. Both come from the same table snapshot.
    pub fn expand_traced(&self, input: &str, mode: ExpansionMode) -> Result<TracedExpansion> {
        let analyzer = self.analyzer(mode);
        let trace = analyzer.analyze_traced(input)?;
        let query = self.build_query(mode, trace.tokens());
        Ok(TracedExpansion {
            trace,
            query,
            table_version: analyzer.table_version(),
        })
    }

    fn build_query(&self, mode: ExpansionMode, tokens: &[Token]) -> NameQuery {
        let tables = &self.config.tables;
        match mode {
            ExpansionMode::Expanded => NameQuery::from_tokens(tables.field.as_str(), tokens),
            ExpansionMode::Exact => NameQuery::from_tokens(tables.exact_field.as_str(), tokens)
                .rewrite_field(tables.field.as_str()),
        }
    }

    /// Re-read the table files named in the configuration.
    ///
    /// A table that fails to load is left as it is; the engine keeps
    /// serving the version it already has. Returns the served
    /// transliteration table version.
    pub fn reload(&self) -> Result<u64> {
        let tables = &self.config.tables;

        if let Some(path) = &tables.transliteration_path {
            match TransliterationTable::load_from_file(path, 0) {
                Ok(table) => {
                    self.table.publish(table);
                }
                Err(e) => warn!(
                    "keeping transliteration table v{}, reload of '{}' failed: {}",
                    self.table.version(),
                    path.display(),
                    e
                ),
            }
        }

        if let Some(path) = &tables.curated_path {
            match CuratedSynonymTable::load_from_file(path) {
                Ok(curated) => *self.curated.write() = Arc::new(curated),
                Err(e) => warn!(
                    "keeping curated synonym table, reload of '{}' failed: {}",
                    path.display(),
                    e
                ),
            }
        }

        Ok(self.table.version())
    }

    /// Rebuild the transliteration table from `source` and publish it.
    pub fn rebuild_from(&self, source: &dyn IndexedValueSource) -> Result<ScanReport> {
        self.scan_job.run(source, &self.table)
    }
}
