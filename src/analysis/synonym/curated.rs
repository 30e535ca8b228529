//! Curated synonym table.
//!
//! Hand-authored equivalences between name forms (`"müller, herman"` ↔
//! `"müller, hank"`). The table is loaded once and never regenerated by the
//! corpus scan. Entries are canonicalized with the [`NameNormalizer`] so
//! editors may write them in any casing or spacing.

use std::path::Path;

use log::{info, warn};

use crate::analysis::synonym::NameLookup;
use crate::analysis::synonym::dictionary::EquivalenceDictionary;
use crate::analysis::tokenizer::normalizer::NameNormalizer;
use crate::error::Result;

/// Immutable, symmetric curated synonym table.
#[derive(Debug, Clone, Default)]
pub struct CuratedSynonymTable {
    dictionary: EquivalenceDictionary,
}

impl CuratedSynonymTable {
    /// Create an empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from groups of equivalent names.
    pub fn from_groups<I, G, S>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalizer = NameNormalizer::new();
        let normalized = groups.into_iter().map(|group| {
            group
                .into_iter()
                .map(|name| normalizer.normalize(name.as_ref()))
                .collect::<Vec<_>>()
        });
        Ok(Self {
            dictionary: EquivalenceDictionary::from_groups(normalized)?,
        })
    }

    /// Load the table from a JSON groups file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = EquivalenceDictionary::load_from_file(path)?;
        let table = Self::from_groups(raw.groups().to_vec())?;
        info!("loaded curated synonym table with {} keys", table.len());
        Ok(table)
    }

    /// Load the table, falling back to an empty one when the file is
    /// missing or corrupt.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(table) => table,
            Err(e) => {
                warn!(
                    "curated synonym table '{}' unavailable, continuing without it: {}",
                    path.display(),
                    e
                );
                Self::empty()
            }
        }
    }

    /// The underlying dictionary.
    pub fn dictionary(&self) -> &EquivalenceDictionary {
        &self.dictionary
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }
}

impl NameLookup for CuratedSynonymTable {
    fn lookup(&self, key: &str) -> Option<&[String]> {
        self.dictionary.get(key)
    }

    fn name(&self) -> &'static str {
        "curated_synonyms"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_entries_are_normalized() {
        let table =
            CuratedSynonymTable::from_groups(vec![vec!["Müller,  Herman", "MÜLLER, Hank."]])
                .unwrap();

        assert_eq!(table.lookup("müller, herman").unwrap(), ["müller, hank"]);
        assert_eq!(table.lookup("müller, hank").unwrap(), ["müller, herman"]);
    }

    #[test]
    fn test_curated_missing_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let table = CuratedSynonymTable::load_or_empty(dir.path().join("missing.json"));
        assert!(table.is_empty());
        assert!(table.lookup("müller, hank").is_none());
    }

    #[test]
    fn test_curated_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curated.json");
        std::fs::write(&path, r#"[["Kurtz, Michael", "Kurtz, Mike"]]"#).unwrap();

        let table = CuratedSynonymTable::load_from_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("kurtz, mike").unwrap(), ["kurtz, michael"]);
    }
}
