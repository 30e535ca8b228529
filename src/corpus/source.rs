//! Sources of indexed author values for the corpus scan.
//!
//! The scan job never talks to the index directly; it reads whatever an
//! [`IndexedValueSource`] yields. A source may fail part-way through (a
//! truncated export, an I/O error), in which case the iterator yields an
//! error and the scan is abandoned.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::analysis::analyzer::index_time::IndexTimeAnalyzer;
use crate::error::{OnomaError, Result};

/// Iterator over indexed values.
pub type ValueIter<'a> = Box<dyn Iterator<Item = Result<String>> + Send + 'a>;

/// A provider of indexed, normalized author values.
pub trait IndexedValueSource: Send + Sync {
    /// Iterate over every indexed value. Duplicates are allowed.
    fn values(&self) -> Result<ValueIter<'_>>;

    /// Get the name of this source (for logging).
    fn name(&self) -> &str;
}

/// An in-memory list of indexed values.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCorpus {
    values: Vec<String>,
}

impl InMemoryCorpus {
    /// Create a corpus from already-indexed values.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a corpus by running raw author strings through the
    /// index-time analyzer.
    pub fn from_raw<I, S>(raw_values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = IndexTimeAnalyzer::new().analyze_values(raw_values)?;
        Ok(Self { values })
    }

    /// Add one indexed value.
    pub fn push<S: Into<String>>(&mut self, value: S) {
        self.values.push(value.into());
    }

    /// The stored values.
    pub fn as_slice(&self) -> &[String] {
        &self.values
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl IndexedValueSource for InMemoryCorpus {
    fn values(&self) -> Result<ValueIter<'_>> {
        Ok(Box::new(self.values.iter().cloned().map(Ok)))
    }

    fn name(&self) -> &str {
        "in_memory"
    }
}

/// A text file with one indexed value per line. Blank lines are skipped.
#[derive(Clone, Debug)]
pub struct LineFileSource {
    path: PathBuf,
    name: String,
}

impl LineFileSource {
    /// Create a source reading `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexedValueSource for LineFileSource {
    fn values(&self) -> Result<ValueIter<'_>> {
        let file = File::open(&self.path).map_err(|e| {
            OnomaError::scan(format!("cannot open '{}': {}", self.path.display(), e))
        })?;
        let lines = BufReader::new(file).lines().filter_map(|line| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(Ok(line)),
            Err(e) => Some(Err(OnomaError::from(e))),
        });
        Ok(Box::new(lines))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
