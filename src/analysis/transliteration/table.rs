//! Corpus-derived transliteration table.
//!
//! A versioned, immutable set of equivalence groups between ascii and
//! accented spellings of names, built by the
//! [`CorpusScanJob`](crate::corpus::scan::CorpusScanJob) from values that
//! actually occur in the index. Readers share it through an `Arc`; a new
//! scan publishes a whole new table rather than mutating this one.

use std::path::Path;

use log::{info, warn};

use crate::analysis::synonym::NameLookup;
use crate::analysis::synonym::dictionary::EquivalenceDictionary;
use crate::error::Result;

/// Immutable transliteration equivalence table.
#[derive(Debug, Clone, Default)]
pub struct TransliterationTable {
    version: u64,
    dictionary: EquivalenceDictionary,
}

impl TransliterationTable {
    /// Create an empty table (version 0).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from equivalence groups.
    pub fn from_groups<I, G, S>(version: u64, groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            version,
            dictionary: EquivalenceDictionary::from_groups(groups)?,
        })
    }

    /// Load a persisted table.
    pub fn load_from_file<P: AsRef<Path>>(path: P, version: u64) -> Result<Self> {
        let dictionary = EquivalenceDictionary::load_from_file(path)?;
        info!(
            "loaded transliteration table v{} with {} keys",
            version,
            dictionary.len()
        );
        Ok(Self {
            version,
            dictionary,
        })
    }

    /// Load a persisted table, falling back to an empty one when the file
    /// is missing or corrupt.
    pub fn load_or_empty<P: AsRef<Path>>(path: P, version: u64) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path, version) {
            Ok(table) => table,
            Err(e) => {
                warn!(
                    "transliteration table '{}' unavailable, continuing without it: {}",
                    path.display(),
                    e
                );
                Self::empty()
            }
        }
    }

    /// Persist the table's groups.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.dictionary.save_to_file(path)
    }

    /// The persisted form: sorted equivalence groups as JSON.
    pub fn to_json(&self) -> Result<String> {
        self.dictionary.to_json()
    }

    /// The table version. Newer publications have larger versions.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Restamp the table with another version. The groups are shared.
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// The equivalence groups.
    pub fn groups(&self) -> &[Vec<String>] {
        self.dictionary.groups()
    }

    /// Whether two names are recorded as equivalent.
    pub fn are_equivalent(&self, a: &str, b: &str) -> bool {
        let b = EquivalenceDictionary::normalize_key(b);
        self.dictionary
            .get(a)
            .is_some_and(|equivalents| equivalents.contains(&b))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }
}

impl NameLookup for TransliterationTable {
    fn lookup(&self, key: &str) -> Option<&[String]> {
        self.dictionary.get(key)
    }

    fn name(&self) -> &'static str {
        "transliteration_table"
    }
}
