//! Corpus scan job.
//!
//! Rebuilds the [`TransliterationTable`] from the indexed corpus:
//!
//! 1. Collect every distinct indexed value and its bare-surname key
//!    (`"müller, h"` contributes `"müller, h"` and `"müller,"`).
//! 2. Generate rule variants of every key, in parallel.
//! 3. Keep a pair (key, variant) only if its accented member was indexed.
//!    Down-grades of an indexed accented name are always kept; an
//!    up-grade of an ascii name needs the accented form in the corpus.
//! 4. Merge pairs into equivalence groups with union-find.
//!
//! Every intermediate collection is ordered, so scanning the same corpus
//! twice yields byte-identical tables.
//!
//! A failing source aborts the scan; nothing is published and the table
//! already served stays in place.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::name::ParsedName;
use crate::analysis::tokenizer::normalizer::NameNormalizer;
use crate::analysis::transliteration::rules::{DEFAULT_RULE_SET, TransliterationRuleSet};
use crate::analysis::transliteration::table::TransliterationTable;
use crate::config::TransliterationConfig;
use crate::corpus::handle::TableHandle;
use crate::corpus::source::IndexedValueSource;
use crate::error::{OnomaError, Result};

/// Outcome of one scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Values read from the source, duplicates included.
    pub values_read: usize,
    /// Distinct keys examined (values plus surname keys).
    pub keys: usize,
    /// Equivalence pairs kept.
    pub pairs: usize,
    /// Equivalence pairs rejected because the accented form was never indexed.
    pub rejected_pairs: usize,
    /// Groups in the built table.
    pub groups: usize,
    /// Version assigned on publication, if published.
    pub published_version: Option<u64>,
    /// Wall time of the scan in milliseconds.
    pub elapsed_ms: u64,
}

/// Batch job that derives a transliteration table from indexed values.
#[derive(Clone, Debug)]
pub struct CorpusScanJob {
    rules: Arc<TransliterationRuleSet>,
    max_variants: usize,
}

impl CorpusScanJob {
    /// Create a job over the default rule set.
    pub fn new(config: &TransliterationConfig) -> Self {
        Self::with_rules(Arc::new(DEFAULT_RULE_SET.clone()), config.max_variants)
    }

    /// Create a job over a custom rule set.
    pub fn with_rules(rules: Arc<TransliterationRuleSet>, max_variants: usize) -> Self {
        Self {
            rules,
            max_variants,
        }
    }

    /// Scan `source` and build a table without publishing it.
    pub fn build_table(
        &self,
        source: &dyn IndexedValueSource,
        version: u64,
    ) -> Result<(TransliterationTable, ScanReport)> {
        let started = Instant::now();
        let mut report = ScanReport::default();

        let keys = self.collect_keys(source, &mut report)?;
        report.keys = keys.len();

        let (pairs, rejected) = self.equivalence_pairs(&keys);
        report.pairs = pairs.len();
        report.rejected_pairs = rejected;

        let groups = union_groups(&pairs);
        report.groups = groups.len();

        let table = TransliterationTable::from_groups(version, &groups)?;
        report.elapsed_ms = started.elapsed().as_millis() as u64;
        debug!(
            "scan of '{}': {} values, {} keys, {} pairs ({} rejected), {} groups",
            source.name(),
            report.values_read,
            report.keys,
            report.pairs,
            report.rejected_pairs,
            report.groups
        );
        Ok((table, report))
    }

    /// Scan `source` and publish the result on `handle`.
    ///
    /// On failure the handle keeps serving its current table.
    pub fn run(&self, source: &dyn IndexedValueSource, handle: &TableHandle) -> Result<ScanReport> {
        let (table, mut report) = match self.build_table(source, handle.version()) {
            Ok(built) => built,
            Err(e) => {
                warn!(
                    "scan of '{}' failed, keeping transliteration table v{}: {}",
                    source.name(),
                    handle.version(),
                    e
                );
                return Err(e);
            }
        };

        handle.publish(table);
        report.published_version = Some(handle.version());
        info!(
            "scan of '{}' complete: {} groups in {} ms",
            source.name(),
            report.groups,
            report.elapsed_ms
        );
        Ok(report)
    }

    fn collect_keys(
        &self,
        source: &dyn IndexedValueSource,
        report: &mut ScanReport,
    ) -> Result<BTreeSet<String>> {
        let normalizer = NameNormalizer::new();
        let mut keys = BTreeSet::new();

        for value in source.values()? {
            let value = value.map_err(|e| {
                OnomaError::scan(format!(
                    "source '{}' failed after {} values: {}",
                    source.name(),
                    report.values_read,
                    e
                ))
            })?;
            report.values_read += 1;

            let value = normalizer.normalize(&value);
            if value.is_empty() {
                continue;
            }
            if let Some(name) = ParsedName::parse(&value) {
                keys.insert(name.surname_key());
            }
            keys.insert(value);
        }

        Ok(keys)
    }

    /// Sorted pairs `(a, b)` with `a < b`, and the number of rejected pairs.
    fn equivalence_pairs(&self, keys: &BTreeSet<String>) -> (BTreeSet<(String, String)>, usize) {
        let per_key: Vec<(Vec<(String, String)>, usize)> = keys
            .par_iter()
            .map(|key| {
                let mut kept = Vec::new();
                let mut rejected = 0;
                for variant in self.rules.generate_variants(key, self.max_variants) {
                    if is_attested(key, &variant, keys) {
                        kept.push(ordered_pair(key, variant));
                    } else {
                        rejected += 1;
                    }
                }
                (kept, rejected)
            })
            .collect();

        let mut pairs = BTreeSet::new();
        let mut rejected = 0;
        for (kept, count) in per_key {
            pairs.extend(kept);
            rejected += count;
        }
        (pairs, rejected)
    }
}

/// A pair is attested when its non-ascii member was indexed.
fn is_attested(key: &str, variant: &str, indexed: &BTreeSet<String>) -> bool {
    !key.is_ascii() || variant.is_ascii() || indexed.contains(variant)
}

fn ordered_pair(a: &str, b: String) -> (String, String) {
    if a <= b.as_str() {
        (a.to_string(), b)
    } else {
        (b, a.to_string())
    }
}

/// Merge pairs into sorted groups.
fn union_groups(pairs: &BTreeSet<(String, String)>) -> Vec<Vec<String>> {
    let mut parent: BTreeMap<String, String> = BTreeMap::new();

    fn find(parent: &mut BTreeMap<String, String>, key: &str) -> String {
        let mut root = key.to_string();
        while let Some(next) = parent.get(&root) {
            if *next == root {
                break;
            }
            root = next.clone();
        }
        // Path compression
        let mut current = key.to_string();
        while current != root {
            let next = parent
                .insert(current.clone(), root.clone())
                .unwrap_or_else(|| root.clone());
            current = next;
        }
        root
    }

    for (a, b) in pairs {
        parent.entry(a.clone()).or_insert_with(|| a.clone());
        parent.entry(b.clone()).or_insert_with(|| b.clone());
        let root_a = find(&mut parent, a);
        let root_b = find(&mut parent, b);
        if root_a != root_b {
            // The smaller key becomes the root, independent of pair order.
            let (root, child) = if root_a < root_b {
                (root_a, root_b)
            } else {
                (root_b, root_a)
            };
            parent.insert(child, root);
        }
    }

    let members: Vec<String> = parent.keys().cloned().collect();
    let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for member in members {
        let root = find(&mut parent, &member);
        groups.entry(root).or_default().insert(member);
    }

    groups
        .into_values()
        .map(|group| group.into_iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::source::{InMemoryCorpus, ValueIter};

    fn job() -> CorpusScanJob {
        CorpusScanJob::new(&TransliterationConfig::default())
    }

    #[test]
    fn test_downgrades_of_indexed_accented_names() {
        let corpus = InMemoryCorpus::new(["müller, h"]);
        let (table, report) = job().build_table(&corpus, 1).unwrap();

        assert!(table.are_equivalent("müller, h", "muller, h"));
        assert!(table.are_equivalent("müller, h", "mueller, h"));
        assert!(table.are_equivalent("müller,", "muller,"));
        assert_eq!(report.keys, 2);
        assert_eq!(report.groups, 2);
    }

    #[test]
    fn test_upgrade_requires_indexed_accented_form() {
        let corpus = InMemoryCorpus::new(["mueller, h"]);
        let (table, report) = job().build_table(&corpus, 1).unwrap();
        assert!(table.is_empty());
        assert!(report.rejected_pairs > 0);

        let corpus = InMemoryCorpus::new(["mueller, h", "müller, k"]);
        let (table, _) = job().build_table(&corpus, 1).unwrap();
        assert!(table.are_equivalent("mueller,", "müller,"));
        assert!(!table.are_equivalent("mueller, h", "müller, h"));
    }

    #[test]
    fn test_indexed_initials_are_kept() {
        let corpus = InMemoryCorpus::new(["müller, ö", "schmidt, ü k"]);
        let (table, _) = job().build_table(&corpus, 1).unwrap();

        assert!(table.are_equivalent("müller, ö", "muller, ö"));
        assert!(table.are_equivalent("müller, ö", "mueller, ö"));
        for group in table.groups() {
            for member in group {
                assert!(!member.contains(", oe"), "initial rewritten in {member}");
                assert!(!member.contains(", ue"), "initial rewritten in {member}");
                assert!(!member.contains(", o"), "initial rewritten in {member}");
                assert!(!member.contains(", u"), "initial rewritten in {member}");
            }
        }
    }

    #[test]
    fn test_groups_are_merged() {
        let corpus = InMemoryCorpus::new(["müller,", "mueller,", "muller,"]);
        let (table, _) = job().build_table(&corpus, 1).unwrap();
        assert_eq!(
            table.groups(),
            &[vec![
                "mueller,".to_string(),
                "muller,".to_string(),
                "müller,".to_string()
            ]]
        );
    }

    #[test]
    fn test_scan_is_byte_identical() {
        let values = ["sørensen, k", "müller, h", "dvořák, a", "ortiz, david"];
        let forward = InMemoryCorpus::new(values);
        let backward = InMemoryCorpus::new(values.iter().rev().copied());

        let (a, _) = job().build_table(&forward, 1).unwrap();
        let (b, _) = job().build_table(&backward, 1).unwrap();
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }

    #[test]
    fn test_run_publishes() {
        let handle = TableHandle::default();
        let corpus = InMemoryCorpus::new(["müller, h"]);

        let report = job().run(&corpus, &handle).unwrap();
        assert_eq!(report.published_version, Some(1));
        assert_eq!(handle.version(), 1);
        assert!(handle.snapshot().are_equivalent("müller,", "muller,"));
    }

    struct FailingSource;

    impl IndexedValueSource for FailingSource {
        fn values(&self) -> Result<ValueIter<'_>> {
            let values = vec![
                Ok("sørensen, k".to_string()),
                Err(OnomaError::other("connection reset")),
            ];
            Ok(Box::new(values.into_iter()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_failed_scan_keeps_previous_table() {
        let handle = TableHandle::default();
        job()
            .run(&InMemoryCorpus::new(["müller, h"]), &handle)
            .unwrap();
        let before = handle.snapshot();

        let result = job().run(&FailingSource, &handle);
        assert!(matches!(result, Err(OnomaError::Scan(_))));
        assert_eq!(handle.version(), 1);
        assert!(Arc::ptr_eq(&before, &handle.snapshot()));
    }

    #[test]
    fn test_union_groups() {
        let pairs: BTreeSet<(String, String)> = [("b", "c"), ("a", "b"), ("x", "y")]
            .into_iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        assert_eq!(
            union_groups(&pairs),
            vec![vec!["a", "b", "c"], vec!["x", "y"]]
        );
    }
}
