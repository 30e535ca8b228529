//! Synonym filter for name expansion.
//!
//! Looks every token up in a [`NameLookup`] table and inserts one token per
//! equivalent right after its source, at the same position. The same filter
//! serves the corpus-derived transliteration table and the curated synonym
//! table.
//!
//! Lookup is by the whole name first. When the whole name is unknown, the
//! surname alone is looked up and each equivalent surname is re-joined with
//! the token's given parts, so a surname-level entry such as
//! `muller ↔ müller` also expands `"muller, h*"` to `"müller, h*"`.

use std::sync::Arc;

use ahash::AHashSet;

use crate::analysis::name::split_surname_key;
use crate::analysis::synonym::curated::CuratedSynonymTable;
use crate::analysis::synonym::NameLookup;
use crate::analysis::token::{Stage, Token, TokenKind, TokenStream};
use crate::analysis::token_filter::{Expander, Filter, expand_all};
use crate::analysis::transliteration::table::TransliterationTable;
use crate::error::Result;

/// Synonym filter over one lookup table.
#[derive(Clone)]
pub struct SynonymFilter {
    table: Arc<dyn NameLookup>,
    stage: Stage,
}

impl SynonymFilter {
    /// Create a synonym filter over an arbitrary table.
    pub fn new(table: Arc<dyn NameLookup>, stage: Stage) -> Self {
        Self { table, stage }
    }

    /// Create a filter over a transliteration table snapshot.
    pub fn transliteration(table: Arc<TransliterationTable>) -> Self {
        Self::new(table, Stage::TransliterationTable)
    }

    /// Create a filter over the curated synonym table.
    pub fn curated(table: Arc<CuratedSynonymTable>) -> Self {
        Self::new(table, Stage::CuratedSynonyms)
    }

    /// Equivalent texts for a token, without the token's own text.
    fn equivalents(&self, token: &Token) -> Vec<String> {
        // "ortiz, david *" keeps " *": any further parts, not a longer "david"
        let base = token.base_text().trim_end();
        let suffix = &token.text[base.len()..];
        let key = base.to_lowercase();

        if let Some(equivalents) = self.table.lookup(&key) {
            return equivalents
                .iter()
                .map(|equivalent| format!("{equivalent}{suffix}"))
                .collect();
        }

        let Some((surname_key, rest)) = split_surname_key(&key) else {
            return Vec::new();
        };
        let surname = surname_key.trim_end_matches(',').trim();
        let surname_equivalents = [surname_key, surname]
            .into_iter()
            .filter(|candidate| *candidate != key)
            .find_map(|candidate| self.table.lookup(candidate));

        surname_equivalents
            .into_iter()
            .flatten()
            .map(|equivalent| equivalent.trim_end_matches(','))
            // Only surname-level equivalents can be re-joined.
            .filter(|equivalent| !equivalent.contains(','))
            .map(|equivalent| format!("{equivalent},{rest}{suffix}"))
            .collect()
    }
}

impl Expander for SynonymFilter {
    fn expand(&self, token: &Token) -> Vec<Token> {
        let mut seen: AHashSet<String> = AHashSet::new();
        seen.insert(token.text.to_lowercase());

        self.equivalents(token)
            .into_iter()
            .filter(|text| seen.insert(text.clone()))
            .map(|text| Token::new(text, TokenKind::Synonym, self.stage))
            .collect()
    }

    fn name(&self) -> &'static str {
        self.table.name()
    }
}

impl Filter for SynonymFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(expand_all(self, tokens))
    }

    fn name(&self) -> &'static str {
        "synonym"
    }
}

impl std::fmt::Debug for SynonymFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynonymFilter")
            .field("table", &self.table.name())
            .field("stage", &self.stage)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surname_table() -> Arc<TransliterationTable> {
        Arc::new(
            TransliterationTable::from_groups(1, vec![vec!["muller", "mueller", "müller"]])
                .unwrap(),
        )
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_full_name_lookup() {
        let table = Arc::new(
            TransliterationTable::from_groups(1, vec![vec!["müller, h", "muller, h"]]).unwrap(),
        );
        let filter = SynonymFilter::transliteration(table);

        let result = filter.filter(vec![Token::plain("muller, h")]).unwrap();
        assert_eq!(texts(&result), vec!["muller, h", "müller, h"]);
        assert_eq!(result[1].kind, TokenKind::Synonym);
        assert_eq!(result[1].stage, Stage::TransliterationTable);
        assert_eq!(result[1].position_increment, 0);
    }

    #[test]
    fn test_surname_fallback_keeps_given_parts_and_wildcard() {
        let filter = SynonymFilter::transliteration(surname_table());

        let tokens = vec![
            Token::plain("muller, h"),
            Token::new("muller,", TokenKind::Combination, Stage::Combination),
            Token::new("muller, h*", TokenKind::Combination, Stage::Combination),
        ];
        let result = filter.filter(tokens).unwrap();
        assert_eq!(
            texts(&result),
            vec![
                "muller, h",
                "mueller, h",
                "müller, h",
                "muller,",
                "mueller,",
                "müller,",
                "muller, h*",
                "mueller, h*",
                "müller, h*",
            ]
        );
    }

    #[test]
    fn test_any_further_parts_wildcard() {
        let table = Arc::new(
            CuratedSynonymTable::from_groups(vec![vec!["müller, herman", "müller, hank"]])
                .unwrap(),
        );
        let filter = SynonymFilter::curated(table);
        let token = Token::new("müller, herman *", TokenKind::Combination, Stage::Combination);
        assert_eq!(texts(&filter.expand(&token)), vec!["müller, hank *"]);

        let token = Token::new("muller, h*", TokenKind::Combination, Stage::Combination);
        let filter = SynonymFilter::transliteration(surname_table());
        assert_eq!(
            texts(&filter.expand(&token)),
            vec!["mueller, h*", "müller, h*"]
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let filter = SynonymFilter::transliteration(surname_table());
        let expanded = filter.expand(&Token::plain("MULLER, H"));
        assert_eq!(texts(&expanded), vec!["mueller, h", "müller, h"]);
    }

    #[test]
    fn test_unknown_token_passes_through() {
        let filter = SynonymFilter::transliteration(surname_table());
        let result = filter.filter(vec![Token::plain("ortiz, david")]).unwrap();
        assert_eq!(texts(&result), vec!["ortiz, david"]);
    }

    #[test]
    fn test_curated_lookup() {
        let table = Arc::new(
            CuratedSynonymTable::from_groups(vec![vec!["müller, herman", "müller, hank"]])
                .unwrap(),
        );
        let filter = SynonymFilter::curated(table);
        let expanded = filter.expand(&Token::plain("müller, herman"));
        assert_eq!(texts(&expanded), vec!["müller, hank"]);
        assert_eq!(expanded[0].stage, Stage::CuratedSynonyms);
        // Full-name entries are not re-joined onto other given parts
        assert!(filter.expand(&Token::plain("müller, h")).is_empty());
    }
}
