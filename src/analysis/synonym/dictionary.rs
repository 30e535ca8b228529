//! Equivalence dictionary mapping a name key to its equivalent forms.
//!
//! Uses an FST (Finite State Transducer) for memory-efficient storage and
//! fast lookup. Both the corpus-derived transliteration table and the
//! curated synonym table store their groups in this structure.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use fst::Map;
use fst::MapBuilder;
use unicode_normalization::UnicodeNormalization;

use crate::error::{OnomaError, Result};

/// Immutable, symmetric equivalence dictionary.
///
/// Every member of a group maps to every other member of that group. A key
/// that appears in several groups maps to the union of their other members.
#[derive(Debug, Clone)]
pub struct EquivalenceDictionary {
    /// FST map: key -> index into equivalent_lists
    fst_map: Arc<Map<Vec<u8>>>,
    /// Sorted equivalents indexed by FST values
    equivalent_lists: Arc<Vec<Vec<String>>>,
    /// Groups as given, normalized and sorted
    groups: Arc<Vec<Vec<String>>>,
}

impl Default for EquivalenceDictionary {
    fn default() -> Self {
        Self::empty()
    }
}

impl EquivalenceDictionary {
    /// Create an empty dictionary.
    pub fn empty() -> Self {
        Self {
            fst_map: Arc::new(Map::default()),
            equivalent_lists: Arc::new(Vec::new()),
            groups: Arc::new(Vec::new()),
        }
    }

    /// Normalize a dictionary key: NFC composed, lower-cased, trimmed.
    pub fn normalize_key(term: &str) -> String {
        term.trim().nfc().collect::<String>().to_lowercase()
    }

    /// Load a dictionary from a JSON file.
    ///
    /// The JSON file should contain an array of groups, where each group is
    /// an array of mutually interchangeable names.
    ///
    /// ```json
    /// [
    ///   ["müller, h", "muller, h", "mueller, h"],
    ///   ["müller, herman", "müller, hank"]
    /// ]
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            OnomaError::table(format!(
                "Failed to read equivalence file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let groups: Vec<Vec<String>> = serde_json::from_str(&content).map_err(|e| {
            OnomaError::parse(format!(
                "Failed to parse equivalence JSON from '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_groups(groups)
    }

    /// Build a dictionary from equivalence groups.
    ///
    /// Members are normalized, groups with fewer than two distinct members
    /// are dropped, and the stored groups are sorted so that equal input
    /// always yields equal output.
    pub fn from_groups<I, G, S>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized_groups: BTreeSet<Vec<String>> = BTreeSet::new();
        for group in groups {
            let members: BTreeSet<String> = group
                .into_iter()
                .map(|term| Self::normalize_key(term.as_ref()))
                .filter(|term| !term.is_empty())
                .collect();
            if members.len() > 1 {
                normalized_groups.insert(members.into_iter().collect());
            }
        }

        // Create bidirectional mappings
        let mut key_to_equivalents: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for group in &normalized_groups {
            for term in group {
                let entry = key_to_equivalents.entry(term.clone()).or_default();
                entry.extend(group.iter().filter(|other| *other != term).cloned());
            }
        }

        // BTreeMap iterates in byte order, as the FST builder requires
        let mut equivalent_lists = Vec::with_capacity(key_to_equivalents.len());
        let mut builder = MapBuilder::memory();
        for (term, equivalents) in key_to_equivalents {
            let index = equivalent_lists.len() as u64;
            equivalent_lists.push(equivalents.into_iter().collect());
            builder
                .insert(term.as_bytes(), index)
                .map_err(|e| OnomaError::parse(format!("FST build error: {}", e)))?;
        }

        let fst_bytes = builder
            .into_inner()
            .map_err(|e| OnomaError::parse(format!("FST finalize error: {}", e)))?;
        let fst_map = Map::new(fst_bytes)
            .map_err(|e| OnomaError::parse(format!("FST creation error: {}", e)))?;

        Ok(Self {
            fst_map: Arc::new(fst_map),
            equivalent_lists: Arc::new(equivalent_lists),
            groups: Arc::new(normalized_groups.into_iter().collect()),
        })
    }

    /// Get the equivalents of a key. The key is normalized before lookup.
    pub fn get(&self, term: &str) -> Option<&[String]> {
        let key = Self::normalize_key(term);
        let index = self.fst_map.get(key.as_bytes())? as usize;
        self.equivalent_lists.get(index).map(|list| list.as_slice())
    }

    /// Whether the key has any equivalents.
    pub fn contains(&self, term: &str) -> bool {
        self.get(term).is_some()
    }

    /// The stored groups.
    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    /// Serialize the groups to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self.groups.as_ref())?)
    }

    /// Write the groups to a JSON file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.fst_map.len()
    }

    /// Whether the dictionary has no keys.
    pub fn is_empty(&self) -> bool {
        self.fst_map.is_empty()
    }
}
