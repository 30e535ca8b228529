//! Transliteration rule set and variant generation.
//!
//! A static table maps each non-ascii grapheme (and a few common ascii
//! digraphs) to the alternative spellings of the same sound. Variant
//! generation substitutes every alternative at every occurrence and returns
//! the cross-product, capped to keep names with many diacritics bounded.
//!
//! Initials are never rewritten: in `"schmidt, ö"` the `ö` stays as it is,
//! so a truncated part can never turn into a longer, non-truncated one.
//!
//! # Examples
//!
//! ```
//! use onoma::analysis::transliteration::rules::TransliterationRuleSet;
//!
//! let rules = TransliterationRuleSet::default();
//! let variants = rules.generate_variants("müller, h", 32);
//! assert_eq!(variants, vec!["muller, h", "mueller, h"]);
//!
//! let variants = rules.generate_variants("mueller, h", 32);
//! assert_eq!(variants, vec!["müller, h"]);
//!
//! let variants = rules.generate_variants("müller, ü", 32);
//! assert_eq!(variants, vec!["muller, ü", "mueller, ü"]);
//! ```

use std::ops::Range;
use std::sync::LazyLock;

use ahash::AHashSet;
use unicode_normalization::UnicodeNormalization;

/// The built-in rules, in rule-table order.
const DEFAULT_RULES: &[(&str, &[&str])] = &[
    ("ä", &["a", "ae"]),
    ("ö", &["o", "oe"]),
    ("ü", &["u", "ue"]),
    ("ß", &["ss"]),
    ("æ", &["ae"]),
    ("ø", &["o", "oe"]),
    ("å", &["a", "aa"]),
    ("é", &["e"]),
    ("è", &["e"]),
    ("ê", &["e"]),
    ("ë", &["e"]),
    ("ě", &["e"]),
    ("á", &["a"]),
    ("à", &["a"]),
    ("â", &["a"]),
    ("ã", &["a"]),
    ("í", &["i"]),
    ("ì", &["i"]),
    ("î", &["i"]),
    ("ï", &["i"]),
    ("ı", &["i"]),
    ("ó", &["o"]),
    ("ò", &["o"]),
    ("ô", &["o"]),
    ("õ", &["o"]),
    ("ú", &["u"]),
    ("ù", &["u"]),
    ("û", &["u"]),
    ("ñ", &["n"]),
    ("ń", &["n"]),
    ("ç", &["c"]),
    ("č", &["c", "ch"]),
    ("ć", &["c"]),
    ("š", &["s", "sh"]),
    ("ś", &["s"]),
    ("ž", &["z", "zh"]),
    ("ź", &["z"]),
    ("ż", &["z"]),
    ("ř", &["r"]),
    ("ł", &["l"]),
    ("ý", &["y"]),
    ("ğ", &["g"]),
    ("ue", &["ü"]),
    ("ae", &["ä"]),
    ("oe", &["ö"]),
];

/// Upper bound on cross-product steps per requested variant.
const STEPS_PER_VARIANT: usize = 8;

/// The shared default rule set.
pub static DEFAULT_RULE_SET: LazyLock<TransliterationRuleSet> =
    LazyLock::new(TransliterationRuleSet::default);

/// A single substitution rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransliterationRule {
    /// The grapheme (or digraph) being replaced
    pub grapheme: String,
    /// Alternative spellings, in preference order
    pub alternatives: Vec<String>,
}

/// A static table of transliteration rules.
#[derive(Clone, Debug)]
pub struct TransliterationRuleSet {
    rules: Vec<TransliterationRule>,
    /// Rule indices ordered by grapheme length, longest first
    match_order: Vec<usize>,
}

impl Default for TransliterationRuleSet {
    fn default() -> Self {
        Self::new(
            DEFAULT_RULES
                .iter()
                .map(|(grapheme, alternatives)| TransliterationRule {
                    grapheme: grapheme.to_string(),
                    alternatives: alternatives.iter().map(|a| a.to_string()).collect(),
                })
                .collect(),
        )
    }
}

impl TransliterationRuleSet {
    /// Create a rule set from explicit rules. Table order is preserved.
    pub fn new(rules: Vec<TransliterationRule>) -> Self {
        let mut match_order: Vec<usize> = (0..rules.len()).collect();
        // Stable sort keeps table order among equal lengths.
        match_order.sort_by_key(|&i| std::cmp::Reverse(rules[i].grapheme.chars().count()));
        Self { rules, match_order }
    }

    /// The rules, in table order.
    pub fn rules(&self) -> &[TransliterationRule] {
        &self.rules
    }

    /// Whether any rule matches somewhere in the text.
    pub fn has_mapped_grapheme(&self, text: &str) -> bool {
        let text: String = text.nfc().collect();
        self.segments(&text, &initial_ranges(&text))
            .iter()
            .any(|segment| segment.len() > 1)
    }

    /// Split the text into segments: literal runs have one option, mapped
    /// graphemes have the original followed by its alternatives. Text inside
    /// `protected` byte ranges is always literal.
    fn segments(&self, text: &str, protected: &[Range<usize>]) -> Vec<Vec<String>> {
        let mut segments: Vec<Vec<String>> = Vec::new();
        let mut literal = String::new();
        let mut rest = text;

        while !rest.is_empty() {
            let offset = text.len() - rest.len();
            let matched = if protected.iter().any(|range| range.contains(&offset)) {
                None
            } else {
                self.match_order
                    .iter()
                    .map(|&i| &self.rules[i])
                    .find(|rule| {
                        let end = offset + rule.grapheme.len();
                        rest.starts_with(rule.grapheme.as_str())
                            && !protected
                                .iter()
                                .any(|range| range.start > offset && range.start < end)
                    })
            };

            match matched {
                Some(rule) => {
                    if !literal.is_empty() {
                        segments.push(vec![std::mem::take(&mut literal)]);
                    }
                    let mut options = Vec::with_capacity(rule.alternatives.len() + 1);
                    options.push(rule.grapheme.clone());
                    options.extend(rule.alternatives.iter().cloned());
                    segments.push(options);
                    rest = &rest[rule.grapheme.len()..];
                }
                None => {
                    // Unknown graphemes pass through unchanged.
                    let c = rest.chars().next().unwrap_or_default();
                    literal.push(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
        if !literal.is_empty() {
            segments.push(vec![literal]);
        }
        segments
    }

    /// Generate transliteration variants of a name.
    ///
    /// Returns the cross-product of all substitutions, excluding the input
    /// itself, deduplicated, in enumeration order (first occurrence varies
    /// slowest), truncated to `max_variants`. Given-name initials are left
    /// untouched.
    ///
    /// Enumeration is also bounded by `max_variants * 8` odometer steps.
    /// When many substitutions collapse onto the same string, that bound can
    /// end enumeration with fewer than `max_variants` variants even though
    /// more exist; the result is still deterministic.
    pub fn generate_variants(&self, text: &str, max_variants: usize) -> Vec<String> {
        let text: String = text.nfc().collect();
        let segments = self.segments(&text, &initial_ranges(&text));
        if max_variants == 0 || segments.iter().all(|segment| segment.len() == 1) {
            return Vec::new();
        }

        let mut variants = Vec::new();
        let mut seen: AHashSet<String> = AHashSet::new();
        seen.insert(text.clone());

        let mut choice = vec![0usize; segments.len()];
        let step_budget = max_variants.saturating_mul(STEPS_PER_VARIANT);

        for _ in 0..step_budget {
            // Advance the odometer; the last segment varies fastest.
            let mut position = segments.len();
            loop {
                if position == 0 {
                    return variants;
                }
                position -= 1;
                choice[position] += 1;
                if choice[position] < segments[position].len() {
                    break;
                }
                choice[position] = 0;
            }

            let candidate: String = segments
                .iter()
                .zip(&choice)
                .map(|(options, &i)| options[i].as_str())
                .collect();
            if seen.insert(candidate.clone()) {
                variants.push(candidate);
                if variants.len() >= max_variants {
                    break;
                }
            }
        }

        variants
    }
}

/// Byte ranges of the single-letter given parts of a normalized name.
///
/// Only text after the first comma holds given parts; a trailing period
/// does not make an initial longer.
fn initial_ranges(text: &str) -> Vec<Range<usize>> {
    let Some(comma) = text.find(',') else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut start = comma + 1;
    for (i, c) in text[comma + 1..].char_indices().map(|(i, c)| (comma + 1 + i, c)) {
        if c.is_whitespace() || c == ',' {
            push_initial(text, start..i, &mut ranges);
            start = i + c.len_utf8();
        }
    }
    push_initial(text, start..text.len(), &mut ranges);
    ranges
}

fn push_initial(text: &str, part: Range<usize>, ranges: &mut Vec<Range<usize>>) {
    let trimmed = text[part.clone()].trim_end_matches(['.', '*']);
    if trimmed.chars().count() == 1 {
        ranges.push(part.start..part.start + trimmed.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_umlaut_downgrades() {
        let rules = TransliterationRuleSet::default();
        assert_eq!(
            rules.generate_variants("müller,", 32),
            vec!["muller,", "mueller,"]
        );
    }

    #[test]
    fn test_digraph_upgrade() {
        let rules = TransliterationRuleSet::default();
        assert_eq!(rules.generate_variants("mueller,", 32), vec!["müller,"]);
    }

    #[test]
    fn test_no_mapped_graphemes() {
        let rules = TransliterationRuleSet::default();
        assert!(rules.generate_variants("ortiz, david", 32).is_empty());
        assert!(!rules.has_mapped_grapheme("ortiz, david"));
        assert!(rules.has_mapped_grapheme("čapek, k"));
    }

    #[test]
    fn test_cross_product_order() {
        let rules = TransliterationRuleSet::default();
        // Two mapped graphemes: č {c, ch} and ý {y}
        let variants = rules.generate_variants("čý", 32);
        assert_eq!(variants, vec!["čy", "cý", "cy", "chý", "chy"]);
    }

    #[test]
    fn test_variant_cap_is_deterministic() {
        let rules = TransliterationRuleSet::default();
        let name = "šťastný, jiří müller öäü";
        let capped = rules.generate_variants(name, 5);
        assert_eq!(capped.len(), 5);
        assert_eq!(capped, rules.generate_variants(name, 5));

        let larger = rules.generate_variants(name, 50);
        assert_eq!(&larger[..5], capped.as_slice());
    }

    #[test]
    fn test_decomposed_input_is_composed() {
        let rules = TransliterationRuleSet::default();
        assert_eq!(
            rules.generate_variants("mu\u{0308}ller,", 32),
            vec!["muller,", "mueller,"]
        );
    }

    #[test]
    fn test_unknown_grapheme_is_left_alone() {
        let rules = TransliterationRuleSet::default();
        // "ţ" has no rule; only "é" varies
        assert_eq!(rules.generate_variants("ţé", 32), vec!["ţe"]);
    }

    #[test]
    fn test_initials_are_never_rewritten() {
        let rules = TransliterationRuleSet::default();
        assert!(rules.generate_variants("schmidt, ö", 32).is_empty());
        assert!(rules.generate_variants("schmidt, ö*", 32).is_empty());
        assert_eq!(
            rules.generate_variants("müller, ü. jürgen", 32),
            vec![
                "müller, ü. jurgen",
                "müller, ü. juergen",
                "muller, ü. jürgen",
                "muller, ü. jurgen",
                "muller, ü. juergen",
                "mueller, ü. jürgen",
                "mueller, ü. jurgen",
                "mueller, ü. juergen",
            ]
        );
        assert!(!rules.has_mapped_grapheme("schmidt, ö"));
        assert!(rules.has_mapped_grapheme("schmidt, öl"));
    }

    #[test]
    fn test_initial_ranges() {
        assert_eq!(initial_ranges("ortiz, david a"), vec![13..14]);
        assert_eq!(initial_ranges("schmidt, ö. k"), vec![9..11, 13..14]);
        assert!(initial_ranges("ö").is_empty());
        assert!(initial_ranges("ortiz, david").is_empty());
    }

    #[test]
    fn test_zero_cap() {
        let rules = TransliterationRuleSet::default();
        assert!(rules.generate_variants("müller,", 0).is_empty());
    }
}
