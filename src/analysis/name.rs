//! Structured view of a normalized author name.
//!
//! A normalized name (`"surname, part1 part2 ..."`) is parsed into a
//! surname and an ordered list of [`GivenPart`]s. A given part that is a
//! single letter, optionally followed by a period, is *truncated*: it is an
//! initial and is never expanded back into a full name.
//!
//! # Examples
//!
//! ```
//! use onoma::analysis::name::ParsedName;
//!
//! let name = ParsedName::parse("ortiz, david a").unwrap();
//! assert_eq!(name.surname, "ortiz");
//! assert_eq!(name.given.len(), 2);
//! assert!(!name.given[0].truncated);
//! assert!(name.given[1].truncated);
//! assert_eq!(name.render(), "ortiz, david a");
//! ```

use serde::{Deserialize, Serialize};

/// One given-name part.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GivenPart {
    /// The part as written (periods removed)
    pub text: String,
    /// True when the part is a bare initial
    pub truncated: bool,
}

impl GivenPart {
    /// Build a part from its text, detecting truncation.
    pub fn new<S: Into<String>>(text: S) -> Self {
        let text: String = text.into();
        let text = text.trim_end_matches('.').to_string();
        let truncated = text.chars().count() == 1;
        GivenPart { text, truncated }
    }

    /// The initial-letter rendering of this part.
    ///
    /// For a truncated part this is the part itself.
    pub fn initial(&self) -> String {
        self.text.chars().next().map(String::from).unwrap_or_default()
    }

    /// All renderings of the part, initial first.
    ///
    /// A truncated part only ever renders as itself.
    pub fn renderings(&self) -> Vec<String> {
        if self.truncated {
            vec![self.text.clone()]
        } else {
            vec![self.initial(), self.text.clone()]
        }
    }
}

/// A name split into surname and given parts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedName {
    /// The surname, without the trailing comma
    pub surname: String,
    /// Given parts, in order
    pub given: Vec<GivenPart>,
}

impl ParsedName {
    /// Parse a normalized name.
    ///
    /// Returns `None` when no surname can be identified. Text without a
    /// comma is taken as a surname-only name.
    pub fn parse(text: &str) -> Option<Self> {
        let (surname, rest) = match text.split_once(',') {
            Some((surname, rest)) => (surname.trim(), rest),
            None => (text.trim(), ""),
        };
        if surname.is_empty() {
            return None;
        }

        let given = rest
            .split(|c: char| c.is_whitespace() || c == ',')
            .map(|part| part.trim_end_matches('.'))
            .filter(|part| !part.is_empty())
            .map(GivenPart::new)
            .collect();

        Some(ParsedName {
            surname: surname.to_string(),
            given,
        })
    }

    /// The bare-surname key, e.g. `"ortiz,"`.
    pub fn surname_key(&self) -> String {
        format!("{},", self.surname)
    }

    /// Whether any given part is an initial.
    pub fn has_truncated_part(&self) -> bool {
        self.given.iter().any(|part| part.truncated)
    }

    /// Render the canonical form.
    pub fn render(&self) -> String {
        let parts: Vec<&str> = self.given.iter().map(|p| p.text.as_str()).collect();
        join_name(&self.surname, &parts)
    }
}

/// Join a surname and given-part renderings into canonical form.
pub fn join_name<S: AsRef<str>>(surname: &str, parts: &[S]) -> String {
    if parts.is_empty() {
        return format!("{surname},");
    }
    let given: Vec<&str> = parts.iter().map(|p| p.as_ref()).collect();
    format!("{}, {}", surname, given.join(" "))
}

/// Split a normalized name into its surname key (`"surname,"`) and the
/// remainder after the comma (including the leading space, if any).
pub fn split_surname_key(text: &str) -> Option<(&str, &str)> {
    let comma = text.find(',')?;
    Some(text.split_at(comma + 1))
}
