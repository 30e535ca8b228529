//! End-to-end name expansion scenarios.

use std::collections::BTreeSet;
use std::sync::Arc;

use onoma::analysis::analyzer::{Analyzer, ExpansionMode, QueryTimeAnalyzer};
use onoma::analysis::name::ParsedName;
use onoma::analysis::synonym::CuratedSynonymTable;
use onoma::analysis::token::{Token, TokenKind, texts};
use onoma::analysis::token_filter::{DeduplicateFilter, Filter};
use onoma::analysis::tokenizer::normalizer::NameNormalizer;
use onoma::analysis::transliteration::TransliterationTable;
use onoma::config::OnomaConfig;
use onoma::engine::NameExpansionEngine;
use onoma::error::Result;

fn muller_table() -> Result<TransliterationTable> {
    TransliterationTable::from_groups(1, vec![vec!["muller", "mueller", "müller"]])
}

fn herman_hank() -> Result<CuratedSynonymTable> {
    CuratedSynonymTable::from_groups(vec![vec!["Müller, Herman", "Müller, Hank"]])
}

fn analyzer(table: TransliterationTable, curated: CuratedSynonymTable) -> QueryTimeAnalyzer {
    QueryTimeAnalyzer::new(&OnomaConfig::default(), Arc::new(table), Arc::new(curated))
}

fn text_set(tokens: &[Token]) -> BTreeSet<String> {
    tokens.iter().map(|t| t.text.clone()).collect()
}

#[test]
fn test_scenario_1_transliterated_surnames() -> Result<()> {
    let analyzer = analyzer(muller_table()?, CuratedSynonymTable::empty());
    let tokens = analyzer.analyze("Muller, H")?;
    let texts = texts(&tokens);

    for expected in ["muller, h", "mueller, h", "müller, h", "muller,"] {
        assert!(texts.contains(&expected), "missing {expected}: {texts:?}");
    }
    Ok(())
}

#[test]
fn test_scenario_2_combinations_in_order() -> Result<()> {
    let analyzer = analyzer(TransliterationTable::empty(), CuratedSynonymTable::empty());
    let tokens = analyzer.analyze("Ortiz, David A")?;

    let combinations: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Combination)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(
        combinations,
        vec![
            "ortiz,",
            "ortiz, d",
            "ortiz, david",
            "ortiz, d a*",
            "ortiz, david a*"
        ]
    );
    Ok(())
}

#[test]
fn test_scenario_3_initials_match_full_names() -> Result<()> {
    let engine = NameExpansionEngine::new(OnomaConfig::default())?;

    let full = engine.expand("Ortiz, David", ExpansionMode::Expanded)?;
    assert!(full.matches("ortiz, d"));

    let initial = engine.expand("Ortiz, D", ExpansionMode::Expanded)?;
    assert!(initial.matches("ortiz, david"));
    assert!(initial.matches("ortiz, diana"));
    assert!(initial.terms().iter().all(|term| !term.contains("david")));
    Ok(())
}

#[test]
fn test_scenario_4_exact_mode() -> Result<()> {
    let engine =
        NameExpansionEngine::with_tables(OnomaConfig::default(), muller_table()?, herman_hank()?)?;
    let query = engine.expand_field("Müller, H", "author_exact")?;

    assert_eq!(query.field(), "author");
    assert_eq!(query.terms(), vec!["müller, h"]);
    assert!(query.matches("müller, h"));
    assert!(!query.matches("muller, h"));
    assert!(!query.matches("müller, hank"));
    Ok(())
}

#[test]
fn test_scenario_5_stage_boundaries_only_grow() -> Result<()> {
    let analyzer = analyzer(muller_table()?, herman_hank()?);
    let trace = analyzer.analyze_traced("Muller, Herman")?;

    let snapshots = trace.snapshots();
    assert_eq!(snapshots.len(), 11);
    assert_eq!(snapshots[0].tokens.len(), 1);
    assert_eq!(snapshots[1].tokens.len(), 4);
    assert_eq!(snapshots[2].tokens.len(), 12);

    for pair in snapshots.windows(2) {
        let before = text_set(&pair[0].tokens);
        let after = text_set(&pair[1].tokens);
        assert!(
            after.is_superset(&before),
            "step {} lost tokens of step {}",
            pair[1].step,
            pair[0].step
        );
    }

    let final_texts = text_set(trace.tokens());
    for expected in [
        "muller, herman",
        "müller, herman",
        "müller, hank",
        "mueller, hank",
        "muller, hank *",
        "mueller, h",
    ] {
        assert!(final_texts.contains(expected), "missing {expected}");
    }
    Ok(())
}

#[test]
fn test_normalization_is_idempotent() {
    let normalizer = NameNormalizer::new();
    for raw in [
        "  Ortiz,   David A. ",
        "MÜLLER,H.J.",
        "van der Berg, Jan",
        "Muller",
        ", Hans",
        "Kurtz, Michael, Jr.",
        "...",
        "",
    ] {
        let once = normalizer.normalize(raw);
        assert_eq!(normalizer.normalize(&once), once, "input {raw:?}");
    }
}

#[test]
fn test_truncated_parts_are_never_expanded() -> Result<()> {
    let curated = CuratedSynonymTable::from_groups(vec![vec!["Ortiz, D A", "Ortiz-Lopez, D A"]])?;
    let analyzer = analyzer(muller_table()?, curated);

    for input in ["Ortiz, D A", "Muller, H. J.", "Schmidt, Ö", "Müller, Ü."] {
        for token in analyzer.analyze(input)? {
            let base = token.base_text().trim_end();
            if let Some(name) = ParsedName::parse(base) {
                assert!(
                    name.given.iter().all(|part| part.truncated),
                    "{input} expanded an initial: {}",
                    token.text
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_recall_symmetry_for_table_pairs() -> Result<()> {
    let table = TransliterationTable::from_groups(1, vec![vec!["sørensen, k", "sorensen, k"]])?;
    let analyzer = analyzer(table, CuratedSynonymTable::empty());

    let a = text_set(&analyzer.analyze("Sørensen, K")?);
    let b = text_set(&analyzer.analyze("Sorensen, K")?);
    assert!(a.intersection(&b).next().is_some());
    Ok(())
}

#[test]
fn test_precision_for_unconnected_names() -> Result<()> {
    let analyzer = analyzer(muller_table()?, herman_hank()?);

    let pairs = [
        ("Muller, H", "Miller, H"),
        ("Ortiz, David", "Ortega, David"),
        ("Müller, Hank", "Moller, Hank"),
    ];
    for (a, b) in pairs {
        let a_set = text_set(&analyzer.analyze(a)?);
        let b_set = text_set(&analyzer.analyze(b)?);
        assert!(
            a_set.is_disjoint(&b_set),
            "{a} and {b} share {:?}",
            a_set.intersection(&b_set).collect::<Vec<_>>()
        );
    }
    Ok(())
}

#[test]
fn test_deduplication_is_idempotent() -> Result<()> {
    let analyzer = analyzer(muller_table()?, herman_hank()?);
    let tokens = analyzer.analyze("Muller, Herman")?;

    let dedup = DeduplicateFilter::new();
    let again = dedup.filter(tokens.clone())?;
    assert_eq!(again, tokens);
    Ok(())
}

#[test]
fn test_single_position_stream() -> Result<()> {
    let analyzer = analyzer(muller_table()?, herman_hank()?);
    for input in ["Muller, Herman", "Ortiz, David A", "Muller"] {
        let tokens = analyzer.analyze(input)?;
        assert_eq!(tokens[0].position_increment, 1);
        assert!(tokens[1..].iter().all(|t| t.position_increment == 0));
    }
    Ok(())
}

#[test]
fn test_unparseable_input_degrades_to_literal() -> Result<()> {
    let engine = NameExpansionEngine::new(OnomaConfig::default())?;

    let query = engine.expand(", Hans", ExpansionMode::Expanded)?;
    assert!(query.matches("hans,"));

    let query = engine.expand("  ", ExpansionMode::Expanded)?;
    assert!(query.is_empty());
    Ok(())
}
