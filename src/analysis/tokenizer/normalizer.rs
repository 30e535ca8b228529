//! Name normalizer.
//!
//! Canonicalizes a raw author name into the `"surname, given parts"` form
//! shared by the index and the query side. The whole name stays one token,
//! so later stages can parse it structurally.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// A tokenizer that emits exactly one normalized name token.
///
/// # Behavior
///
/// - Composes the text to Unicode NFC and lower-cases it
/// - Treats periods as separators (`"h.j."` becomes `"h j"`)
/// - Splits surname from given parts at the first comma; later commas become spaces
/// - Trims surrounding whitespace and punctuation from both halves and collapses whitespace
/// - Always renders the separator: `"surname,"` or `"surname, given parts"`
///
/// An input without a comma is treated as a bare surname. An input that is
/// empty after trimming produces an empty stream ("no query").
#[derive(Clone, Debug, Default)]
pub struct NameNormalizer;

impl NameNormalizer {
    /// Create a new name normalizer.
    pub fn new() -> Self {
        NameNormalizer
    }

    /// Normalize a name, returning the canonical string.
    ///
    /// Returns an empty string when nothing usable remains.
    pub fn normalize(&self, raw: &str) -> String {
        let composed: String = raw.nfc().collect::<String>().to_lowercase();
        let composed = composed.replace('.', " ");

        let (surname, given) = match composed.split_once(',') {
            Some((surname, rest)) => (surname.to_string(), rest.replace(',', " ")),
            None => (composed, String::new()),
        };

        let surname = clean_part(&surname);
        let given = clean_part(&given);

        match (surname.is_empty(), given.is_empty()) {
            (true, true) => String::new(),
            // Nothing before the comma: fall back to a surname-only name.
            (true, false) => format!("{given},"),
            (false, true) => format!("{surname},"),
            (false, false) => format!("{surname}, {given}"),
        }
    }
}

fn clean_part(part: &str) -> String {
    let trimmed = part.trim_matches(|c: char| !c.is_alphanumeric());
    WHITESPACE.replace_all(trimmed, " ").into_owned()
}

impl Tokenizer for NameNormalizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let normalized = self.normalize(text);
        if normalized.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(vec![Token::plain(normalized)])
        }
    }

    fn name(&self) -> &'static str {
        "name_normalizer"
    }
}
