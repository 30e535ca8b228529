//! Rule-based transliteration filter.
//!
//! Adds the up/down-graded spellings of a token generated from the
//! [`TransliterationRuleSet`], whether or not they occur in the corpus.

use std::sync::Arc;

use crate::analysis::token::{Stage, Token, TokenKind, TokenStream, WILDCARD};
use crate::analysis::token_filter::{Expander, Filter, expand_all};
use crate::analysis::transliteration::rules::{DEFAULT_RULE_SET, TransliterationRuleSet};
use crate::error::Result;

/// A filter that inserts rule-generated transliteration variants.
#[derive(Clone, Debug)]
pub struct TransliterationFilter {
    rules: Arc<TransliterationRuleSet>,
    max_variants: usize,
}

impl TransliterationFilter {
    /// Create a filter over the default rule set.
    pub fn new(max_variants: usize) -> Self {
        Self::with_rules(Arc::new(DEFAULT_RULE_SET.clone()), max_variants)
    }

    /// Create a filter over a custom rule set.
    pub fn with_rules(rules: Arc<TransliterationRuleSet>, max_variants: usize) -> Self {
        Self {
            rules,
            max_variants,
        }
    }
}

impl Expander for TransliterationFilter {
    fn expand(&self, token: &Token) -> Vec<Token> {
        let suffix = if token.is_wildcard() {
            WILDCARD.to_string()
        } else {
            String::new()
        };

        self.rules
            .generate_variants(token.base_text(), self.max_variants)
            .into_iter()
            .map(|variant| {
                Token::new(
                    format!("{variant}{suffix}"),
                    TokenKind::Transliterated,
                    Stage::TransliterationRules,
                )
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "transliteration_rules"
    }
}

impl Filter for TransliterationFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(expand_all(self, tokens))
    }

    fn name(&self) -> &'static str {
        "transliteration_rules"
    }
}
