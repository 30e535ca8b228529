//! Query-time analyzer.
//!
//! Runs the fixed expansion sequence over a materialized stream:
//!
//! ```text
//!  1. normalize                      7. rule variants (of step 6 tokens)
//!  2. combinations (of the input)    8. lowercase
//!  3. transliteration table          9. position repair
//!  4. rule variants (of the input)  10. combinations (of steps 6-7)
//!  5. combinations (of steps 3-4)   11. deduplicate
//!  6. curated synonyms
//! ```
//!
//! Passes are bounded: there is no fixed-point iteration. The sequence
//! covers original → transliterated → curated → transliterated-of-curated.
//!
//! Combination passes only decompose tokens that do not themselves descend
//! from a combination, so a combination's synonyms are never re-combined.
//!
//! In [`ExpansionMode::Exact`] only steps 1, 8 and 11 run.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::synonym::curated::CuratedSynonymTable;
use crate::analysis::token::{Token, TokenKind, TokenStream};
use crate::analysis::token_filter::{
    DeduplicateFilter, Expander, Filter, LowercaseFilter, NameCombinationFilter,
    PositionRepairFilter, SynonymFilter, TransliterationFilter,
};
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::normalizer::NameNormalizer;
use crate::analysis::transliteration::table::TransliterationTable;
use crate::config::OnomaConfig;
use crate::error::{OnomaError, Result};

/// Which query-side pipeline to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionMode {
    /// All expansion stages.
    #[default]
    Expanded,
    /// Normalization, lower-casing and deduplication only.
    Exact,
}

/// The stream as it stood after one pipeline step.
#[derive(Clone, Debug, Serialize)]
pub struct StageSnapshot {
    /// Step number, 1-based.
    pub step: usize,
    /// Name of the stage that ran.
    pub stage: &'static str,
    /// The stream after the step.
    pub tokens: TokenStream,
}

/// Snapshots of every step of one analysis.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExpansionTrace {
    snapshots: Vec<StageSnapshot>,
}

impl ExpansionTrace {
    /// All snapshots in step order.
    pub fn snapshots(&self) -> &[StageSnapshot] {
        &self.snapshots
    }

    /// The snapshot taken after `step`, if that step ran.
    pub fn after_step(&self, step: usize) -> Option<&StageSnapshot> {
        self.snapshots.iter().find(|s| s.step == step)
    }

    /// The final stream.
    pub fn tokens(&self) -> &[Token] {
        self.snapshots
            .last()
            .map(|s| s.tokens.as_slice())
            .unwrap_or_default()
    }

    /// Consume the trace, returning the final stream.
    pub fn into_tokens(mut self) -> TokenStream {
        self.snapshots.pop().map(|s| s.tokens).unwrap_or_default()
    }

    fn record(&mut self, step: usize, stage: &'static str, entries: &[Entry]) {
        self.snapshots.push(StageSnapshot {
            step,
            stage,
            tokens: entries.iter().map(|e| e.token.clone()).collect(),
        });
    }
}

/// Where a token in the working stream came from.
#[derive(Clone, Copy, Debug)]
struct Provenance {
    step: usize,
    from_combination: bool,
}

#[derive(Clone, Debug)]
struct Entry {
    token: Token,
    provenance: Provenance,
}

/// Expands an author name into the alternatives a query should match.
pub struct QueryTimeAnalyzer {
    mode: ExpansionMode,
    table_version: u64,
    normalizer: NameNormalizer,
    combination: NameCombinationFilter,
    transliteration_table: SynonymFilter,
    rules: TransliterationFilter,
    curated: SynonymFilter,
    lowercase: LowercaseFilter,
    position: PositionRepairFilter,
    dedup: DeduplicateFilter,
}

impl QueryTimeAnalyzer {
    /// Create an expanding analyzer over table snapshots.
    pub fn new(
        config: &OnomaConfig,
        table: Arc<TransliterationTable>,
        curated: Arc<CuratedSynonymTable>,
    ) -> Self {
        QueryTimeAnalyzer {
            mode: ExpansionMode::Expanded,
            table_version: table.version(),
            normalizer: NameNormalizer::new(),
            combination: NameCombinationFilter::new(config.combination.clone()),
            transliteration_table: SynonymFilter::transliteration(table),
            rules: TransliterationFilter::new(config.transliteration.max_variants),
            curated: SynonymFilter::curated(curated),
            lowercase: LowercaseFilter::new(),
            position: PositionRepairFilter::new(),
            dedup: DeduplicateFilter::new(),
        }
    }

    /// Create an exact-mode analyzer. No tables are consulted.
    pub fn exact() -> Self {
        Self::new(
            &OnomaConfig::default(),
            Arc::new(TransliterationTable::empty()),
            Arc::new(CuratedSynonymTable::empty()),
        )
        .with_mode(ExpansionMode::Exact)
    }

    /// Set the expansion mode.
    pub fn with_mode(mut self, mode: ExpansionMode) -> Self {
        self.mode = mode;
        self
    }

    /// The active expansion mode.
    pub fn mode(&self) -> ExpansionMode {
        self.mode
    }

    /// Version of the transliteration table this analyzer reads.
    pub fn table_version(&self) -> u64 {
        self.table_version
    }

    /// Analyze `text`, keeping a snapshot of the stream after every step.
    pub fn analyze_traced(&self, text: &str) -> Result<ExpansionTrace> {
        let mut trace = ExpansionTrace::default();
        self.run(text, Some(&mut trace))?;
        Ok(trace)
    }

    fn run(&self, text: &str, mut trace: Option<&mut ExpansionTrace>) -> Result<TokenStream> {
        let mut record = |step: usize, stage: &'static str, entries: &[Entry]| {
            debug!("step {step} ({stage}): {} tokens", entries.len());
            if let Some(trace) = trace.as_deref_mut() {
                trace.record(step, stage, entries);
            }
        };

        // 1
        let mut entries: Vec<Entry> = self
            .normalizer
            .tokenize(text)?
            .into_iter()
            .map(|token| Entry {
                token,
                provenance: Provenance {
                    step: 1,
                    from_combination: false,
                },
            })
            .collect();
        record(1, self.normalizer.name(), &entries);
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        if self.mode == ExpansionMode::Expanded {
            entries = expand_selected(&self.combination, entries, 2, |p| p.step == 1);
            record(2, Expander::name(&self.combination), &entries);

            entries = expand_selected(&self.transliteration_table, entries, 3, |_| true);
            record(3, Expander::name(&self.transliteration_table), &entries);

            entries = expand_selected(&self.rules, entries, 4, |p| p.step == 1);
            record(4, Expander::name(&self.rules), &entries);

            entries = expand_selected(&self.combination, entries, 5, |p| {
                (3..=4).contains(&p.step) && !p.from_combination
            });
            record(5, Expander::name(&self.combination), &entries);

            entries = expand_selected(&self.curated, entries, 6, |_| true);
            record(6, Expander::name(&self.curated), &entries);

            entries = expand_selected(&self.rules, entries, 7, |p| p.step == 6);
            record(7, Expander::name(&self.rules), &entries);
        }

        entries = apply_filter(&self.lowercase, entries)?;
        record(8, Filter::name(&self.lowercase), &entries);

        if self.mode == ExpansionMode::Expanded {
            entries = apply_filter(&self.position, entries)?;
            record(9, Filter::name(&self.position), &entries);

            entries = expand_selected(&self.combination, entries, 10, |p| {
                (6..=7).contains(&p.step) && !p.from_combination
            });
            record(10, Expander::name(&self.combination), &entries);
        }

        let tokens: TokenStream = entries.into_iter().map(|e| e.token).collect();
        let tokens = self.dedup.filter(tokens)?;
        if let Some(trace) = trace {
            trace.snapshots.push(StageSnapshot {
                step: 11,
                stage: Filter::name(&self.dedup),
                tokens: tokens.clone(),
            });
        }
        debug!("step 11 (deduplicate): {} tokens", tokens.len());

        Ok(tokens)
    }
}

/// Run `expander` over the entries accepted by `select`, inserting each
/// expansion right after its source.
fn expand_selected<E, F>(expander: &E, entries: Vec<Entry>, step: usize, select: F) -> Vec<Entry>
where
    E: Expander + ?Sized,
    F: Fn(&Provenance) -> bool,
{
    let mut output = Vec::with_capacity(entries.len());
    for entry in entries {
        let expansions = if select(&entry.provenance) {
            expander.expand(&entry.token)
        } else {
            Vec::new()
        };
        let inherited = entry.provenance.from_combination;
        output.push(entry);
        output.extend(expansions.into_iter().map(|token| Entry {
            provenance: Provenance {
                step,
                from_combination: inherited || token.kind == TokenKind::Combination,
            },
            token,
        }));
    }
    output
}

/// Run a one-to-one filter, keeping provenance aligned.
fn apply_filter<F: Filter + ?Sized>(filter: &F, entries: Vec<Entry>) -> Result<Vec<Entry>> {
    let (tokens, provenance): (Vec<Token>, Vec<Provenance>) = entries
        .into_iter()
        .map(|e| (e.token, e.provenance))
        .unzip();

    let tokens = filter.filter(tokens)?;
    if tokens.len() != provenance.len() {
        return Err(OnomaError::analysis(format!(
            "filter '{}' changed the stream length from {} to {}",
            filter.name(),
            provenance.len(),
            tokens.len()
        )));
    }

    Ok(tokens
        .into_iter()
        .zip(provenance)
        .map(|(token, provenance)| Entry { token, provenance })
        .collect())
}

impl Analyzer for QueryTimeAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.run(text, None)
    }

    fn name(&self) -> &'static str {
        match self.mode {
            ExpansionMode::Expanded => "query_time",
            ExpansionMode::Exact => "query_time_exact",
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl std::fmt::Debug for QueryTimeAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryTimeAnalyzer")
            .field("mode", &self.mode)
            .field("table_version", &self.table_version)
            .field("combination", self.combination.config())
            .finish()
    }
}
