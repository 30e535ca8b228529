//! Command implementations for the Onoma CLI.

use std::collections::BTreeSet;
use std::path::Path;

use log::info;

use crate::analysis::analyzer::query_time::ExpansionMode;
use crate::analysis::tokenizer::normalizer::NameNormalizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::OnomaConfig;
use crate::corpus::handle::TableHandle;
use crate::corpus::scan::CorpusScanJob;
use crate::corpus::source::{IndexedValueSource, LineFileSource};
use crate::engine::NameExpansionEngine;
use crate::error::Result;

/// Execute a CLI command.
pub fn execute_command(args: OnomaArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    match &args.command {
        Command::Expand(expand_args) => expand_name(expand_args.clone(), config, &args),
        Command::Scan(scan_args) => scan_corpus(scan_args.clone(), config, &args),
        Command::Match(match_args) => match_name(match_args.clone(), config, &args),
    }
}

fn load_config(path: Option<&Path>) -> Result<OnomaConfig> {
    match path {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            OnomaConfig::load_from_file(path)
        }
        None => Ok(OnomaConfig::default()),
    }
}

/// Apply command-line table paths over the configured ones.
fn apply_table_args(mut config: OnomaConfig, tables: &TableArgs) -> OnomaConfig {
    if let Some(path) = &tables.transliteration_table {
        config.tables.transliteration_path = Some(path.clone());
    }
    if let Some(path) = &tables.curated_synonyms {
        config.tables.curated_path = Some(path.clone());
    }
    config
}

/// Expand a name.
fn expand_name(args: ExpandArgs, config: OnomaConfig, cli_args: &OnomaArgs) -> Result<()> {
    let engine = NameExpansionEngine::from_config(apply_table_args(config, &args.tables))?;

    let mode = match (&args.field, args.exact) {
        (Some(field), _) => engine.mode_for_field(field)?,
        (None, true) => ExpansionMode::Exact,
        (None, false) => ExpansionMode::Expanded,
    };

    let expansion = engine.expand_traced(&args.name, mode)?;

    let steps = args.trace.then(|| {
        expansion
            .trace
            .snapshots()
            .iter()
            .map(|snapshot| TraceStep {
                step: snapshot.step,
                stage: snapshot.stage.to_string(),
                tokens: snapshot.tokens.len(),
                distinct_texts: snapshot
                    .tokens
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<BTreeSet<_>>()
                    .len(),
            })
            .collect()
    });

    output_result(
        "Expansion",
        &ExpansionResult {
            input: args.name,
            mode: format!("{mode:?}").to_lowercase(),
            field: expansion.query.field().to_string(),
            table_version: expansion.table_version,
            query: expansion.query.description(),
            tokens: expansion.trace.into_tokens(),
            trace: steps,
        },
        cli_args,
    )
}

/// Build a transliteration table from a values file.
fn scan_corpus(args: ScanArgs, config: OnomaConfig, cli_args: &OnomaArgs) -> Result<()> {
    let source = LineFileSource::new(&args.input);
    let handle = TableHandle::default();
    let report = CorpusScanJob::new(&config.transliteration).run(&source, &handle)?;
    let table = handle.snapshot();

    let groups = match &args.output {
        Some(path) => {
            table.save_to_file(path)?;
            None
        }
        None => Some(table.groups().to_vec()),
    };

    output_result(
        "Transliteration table built",
        &ScanResult {
            input: args.input.display().to_string(),
            output: args.output.map(|p| p.display().to_string()),
            report,
            groups,
        },
        cli_args,
    )
}

/// Match a name against a values file.
fn match_name(args: MatchArgs, config: OnomaConfig, cli_args: &OnomaArgs) -> Result<()> {
    let engine = NameExpansionEngine::from_config(apply_table_args(config, &args.tables))?;
    let source = LineFileSource::new(&args.values);
    if args.scan {
        engine.rebuild_from(&source)?;
    }

    let mode = if args.exact {
        ExpansionMode::Exact
    } else {
        ExpansionMode::Expanded
    };
    let query = engine.expand(&args.name, mode)?;

    let normalizer = NameNormalizer::new();
    let mut total_values = 0;
    let mut matched = Vec::new();
    for value in source.values()? {
        let value = value?;
        total_values += 1;
        if query.matches(&normalizer.normalize(&value)) {
            matched.push(value);
        }
    }

    output_result(
        "Match results",
        &MatchResult {
            input: args.name,
            query: query.description(),
            total_values,
            matched,
        },
        cli_args,
    )
}
