//! Configuration for name expansion.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OnomaError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnomaConfig {
    /// Name combination generation.
    pub combination: CombinationConfig,
    /// Transliteration variant generation.
    pub transliteration: TransliterationConfig,
    /// Table locations and field names.
    pub tables: TableConfig,
}

impl OnomaConfig {
    /// Load configuration from a JSON file. Missing keys take defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: OnomaConfig = serde_json::from_str(&content).map_err(|e| {
            OnomaError::invalid_config(format!("'{}': {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for contradictory settings.
    pub fn validate(&self) -> Result<()> {
        if self.combination.max_combinations == 0 {
            return Err(OnomaError::invalid_config(
                "combination.max_combinations must be at least 1",
            ));
        }
        let combination = &self.combination;
        if combination.shortest_prefix_count() > combination.max_combinations {
            return Err(OnomaError::invalid_config(format!(
                "combination.min_given_parts {} yields more prefixes than max_combinations {}",
                combination.min_given_parts, combination.max_combinations
            )));
        }
        if self.tables.field.is_empty() || self.tables.exact_field.is_empty() {
            return Err(OnomaError::invalid_config("field names must not be empty"));
        }
        if self.tables.field == self.tables.exact_field {
            return Err(OnomaError::invalid_config(
                "tables.exact_field must differ from tables.field",
            ));
        }
        Ok(())
    }
}

/// Options for the name combination generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinationConfig {
    /// Combinations with fewer given parts than this are not emitted.
    pub min_given_parts: usize,
    /// Append wildcard markers to the final supplied part.
    pub add_wildcards: bool,
    /// Add the fused form (remaining parts collapsed to initials + wildcard).
    pub add_shortened_multiname: bool,
    /// Emit the bare `"surname,"` form for names that have given parts.
    pub plain_surname: bool,
    /// Hard cap on combinations per name.
    pub max_combinations: usize,
}

impl Default for CombinationConfig {
    fn default() -> Self {
        Self {
            min_given_parts: 1,
            add_wildcards: true,
            add_shortened_multiname: false,
            plain_surname: true,
            max_combinations: 64,
        }
    }
}

impl CombinationConfig {
    /// Distinct prefixes in front of the final part of the shortest emitted
    /// combination: two renderings per full part. Saturates at `usize::MAX`.
    pub fn shortest_prefix_count(&self) -> usize {
        let shift = self.min_given_parts.saturating_sub(1);
        u32::try_from(shift)
            .ok()
            .filter(|&shift| shift < usize::BITS)
            .map_or(usize::MAX, |shift| 1usize << shift)
    }
}

/// Options for transliteration variant generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransliterationConfig {
    /// Maximum variants generated per name.
    pub max_variants: usize,
}

impl Default for TransliterationConfig {
    fn default() -> Self {
        Self { max_variants: 32 }
    }
}

/// Table files and field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Persisted transliteration table (JSON groups).
    pub transliteration_path: Option<PathBuf>,
    /// Curated synonym table (JSON groups).
    pub curated_path: Option<PathBuf>,
    /// The indexed author field.
    pub field: String,
    /// The query-only exact-match field, rewritten onto `field`.
    pub exact_field: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            transliteration_path: None,
            curated_path: None,
            field: "author".to_string(),
            exact_field: "author_exact".to_string(),
        }
    }
}
