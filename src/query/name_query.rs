//! Name query: a disjunction of exact and prefix term clauses.
//!
//! The expanded token stream of one author name becomes one [`NameQuery`]
//! against a single field. Wildcard tokens (`"ortiz, d a*"`) become
//! [`TermMatch::Prefix`] clauses on the text before the marker; every
//! other token is an [`TermMatch::Exact`] clause. Execution belongs to the
//! search engine; [`NameQuery::matches`] evaluates the query against one
//! indexed value.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, TokenKind};

/// How a clause term is compared with an indexed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermMatch {
    /// The value must equal the term.
    Exact,
    /// The value must start with the term.
    Prefix,
}

/// A single term clause.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTermQuery {
    /// The field to search in.
    field: String,
    /// The literal term (without wildcard marker).
    term: String,
    /// Exact or prefix comparison.
    matching: TermMatch,
    /// The kind of the token the clause came from.
    kind: TokenKind,
}

impl NameTermQuery {
    /// Create a new term clause.
    pub fn new<F, T>(field: F, term: T, matching: TermMatch, kind: TokenKind) -> Self
    where
        F: Into<String>,
        T: Into<String>,
    {
        NameTermQuery {
            field: field.into(),
            term: term.into(),
            matching,
            kind,
        }
    }

    /// Build a clause from a token; wildcard tokens become prefix clauses.
    pub fn from_token<F: Into<String>>(field: F, token: &Token) -> Self {
        let matching = if token.is_wildcard() {
            TermMatch::Prefix
        } else {
            TermMatch::Exact
        };
        Self::new(field, token.base_text(), matching, token.kind)
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Get the comparison mode.
    pub fn matching(&self) -> TermMatch {
        self.matching
    }

    /// Get the originating token kind.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Whether a normalized indexed value satisfies this clause.
    pub fn matches(&self, value: &str) -> bool {
        match self.matching {
            TermMatch::Exact => value == self.term,
            TermMatch::Prefix => value.starts_with(&self.term),
        }
    }

    /// Lucene-like rendering, e.g. `author:"ortiz, d a"*`.
    pub fn description(&self) -> String {
        match self.matching {
            TermMatch::Exact => format!("{}:\"{}\"", self.field, self.term),
            TermMatch::Prefix => format!("{}:\"{}\"*", self.field, self.term),
        }
    }
}

/// A boolean OR over name term clauses against one field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameQuery {
    field: String,
    clauses: Vec<NameTermQuery>,
}

impl NameQuery {
    /// Create an empty query (matches nothing).
    pub fn new<F: Into<String>>(field: F) -> Self {
        NameQuery {
            field: field.into(),
            clauses: Vec::new(),
        }
    }

    /// Build a query from an analyzed stream.
    ///
    /// Clauses keep stream order; a term repeated with the same comparison
    /// mode keeps only its first clause.
    pub fn from_tokens<F: Into<String>>(field: F, tokens: &[Token]) -> Self {
        let mut query = Self::new(field);
        for token in tokens {
            query.add_should(NameTermQuery::from_token(query.field.clone(), token));
        }
        query
    }

    /// Add a should clause unless an equal term clause already exists.
    pub fn add_should(&mut self, clause: NameTermQuery) {
        let duplicate = self
            .clauses
            .iter()
            .any(|c| c.term == clause.term && c.matching == clause.matching);
        if !duplicate {
            self.clauses.push(clause);
        }
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The clauses in order.
    pub fn clauses(&self) -> &[NameTermQuery] {
        &self.clauses
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether the query has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Distinct terms, in clause order.
    pub fn terms(&self) -> Vec<&str> {
        let mut seen = AHashSet::new();
        self.clauses
            .iter()
            .map(|c| c.term.as_str())
            .filter(|term| seen.insert(*term))
            .collect()
    }

    /// Point the query and all of its clauses at another field.
    ///
    /// Nothing else about the query changes.
    pub fn rewrite_field<F: Into<String>>(mut self, field: F) -> Self {
        self.field = field.into();
        for clause in &mut self.clauses {
            clause.field = self.field.clone();
        }
        self
    }

    /// Whether any clause matches a normalized indexed value.
    pub fn matches(&self, value: &str) -> bool {
        self.clauses.iter().any(|c| c.matches(value))
    }

    /// Lucene-like rendering of the whole disjunction.
    pub fn description(&self) -> String {
        if self.clauses.is_empty() {
            return "()".to_string();
        }
        let parts: Vec<String> = self.clauses.iter().map(|c| c.description()).collect();
        format!("({})", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Stage;

    fn tokens() -> Vec<Token> {
        vec![
            Token::plain("ortiz, d"),
            Token::new("ortiz,", TokenKind::Combination, Stage::Combination),
            Token::new("ortiz, d*", TokenKind::Combination, Stage::Combination),
            Token::new("ortiz,", TokenKind::Synonym, Stage::TransliterationTable),
        ]
    }

    #[test]
    fn test_from_tokens() {
        let query = NameQuery::from_tokens("author", &tokens());
        assert_eq!(query.len(), 3);
        assert_eq!(query.clauses()[0].matching(), TermMatch::Exact);
        assert_eq!(query.clauses()[2].matching(), TermMatch::Prefix);
        assert_eq!(query.clauses()[2].term(), "ortiz, d");
        assert_eq!(query.terms(), vec!["ortiz, d", "ortiz,"]);
    }

    #[test]
    fn test_matches() {
        let query = NameQuery::from_tokens("author", &tokens());
        assert!(query.matches("ortiz, d"));
        assert!(query.matches("ortiz, david"));
        assert!(query.matches("ortiz, diana"));
        assert!(query.matches("ortiz,"));
        assert!(!query.matches("ortiz, maria"));
        assert!(!query.matches("ortega, d"));
    }

    #[test]
    fn test_rewrite_field() {
        let query = NameQuery::from_tokens("author_exact", &tokens()).rewrite_field("author");
        assert_eq!(query.field(), "author");
        assert!(query.clauses().iter().all(|c| c.field() == "author"));
        assert_eq!(query.len(), 3);
    }

    #[test]
    fn test_description() {
        let query = NameQuery::from_tokens("author", &tokens()[..1]);
        assert_eq!(query.description(), r#"(author:"ortiz, d")"#);

        let clause = NameTermQuery::from_token(
            "author",
            &Token::new("ortiz, d a*", TokenKind::Combination, Stage::Combination),
        );
        assert_eq!(clause.description(), r#"author:"ortiz, d a"*"#);
        assert_eq!(NameQuery::new("author").description(), "()");
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let query = NameQuery::new("author");
        assert!(query.is_empty());
        assert!(!query.matches("ortiz,"));
    }
}
