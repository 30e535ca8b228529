//! Name combination filter.
//!
//! Decomposes a full name into the truncated and wildcard forms under which
//! the same person may have been indexed. For `"ortiz, david a"`:
//!
//! ```text
//! ortiz,            bare surname
//! ortiz, d          first part as initial
//! ortiz, david      first part in full
//! ortiz, d a*       final part, prefix match
//! ortiz, david a*   final part, prefix match
//! ```
//!
//! A truncated part (an initial) is terminal: it is never rendered in full,
//! only as itself, with a wildcard when it is the final supplied part.

use crate::analysis::name::{GivenPart, ParsedName, join_name};
use crate::analysis::token::{Stage, Token, TokenKind, TokenStream, WILDCARD};
use crate::analysis::token_filter::{Expander, Filter, expand_all};
use crate::config::CombinationConfig;
use crate::error::Result;

/// Generates name combinations for every full-name token.
///
/// Tokens that are already combinations, or that carry a wildcard, pass
/// through without being decomposed again.
#[derive(Clone, Debug, Default)]
pub struct NameCombinationFilter {
    config: CombinationConfig,
}

impl NameCombinationFilter {
    /// Create a new combination filter.
    pub fn new(config: CombinationConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &CombinationConfig {
        &self.config
    }

    /// All combinations of a parsed name, in emission order.
    pub fn combinations(&self, name: &ParsedName) -> Vec<String> {
        let config = &self.config;
        let surname = name.surname.as_str();
        let given = &name.given;
        let n = given.len();
        let mut out: Vec<String> = Vec::new();

        if n == 0 {
            out.push(join_name::<&str>(surname, &[]));
            if config.add_wildcards {
                out.push(format!("{surname}, {WILDCARD}"));
            }
            out.truncate(config.max_combinations);
            return out;
        }

        if config.plain_surname {
            out.push(join_name::<&str>(surname, &[]));
        }

        let start = config.min_given_parts.max(1);
        'prefix_lengths: for k in start..=n {
            let part = &given[k - 1];
            let finals: Vec<String> = if k < n {
                part.renderings()
            } else if part.truncated {
                vec![with_wildcard(&part.text, config.add_wildcards)]
            } else {
                let mut finals = part.renderings();
                if config.add_wildcards {
                    finals.push(format!("{} {WILDCARD}", part.text));
                }
                finals
            };

            // Prefixes are enumerated one at a time, so the cap bounds the
            // work no matter how many parts precede the final one.
            let renderings: Vec<Vec<String>> =
                given[..k - 1].iter().map(GivenPart::renderings).collect();
            let mut choice = vec![0usize; k - 1];
            loop {
                for last in &finals {
                    if out.len() >= config.max_combinations {
                        break 'prefix_lengths;
                    }
                    let mut parts: Vec<&str> = renderings
                        .iter()
                        .zip(&choice)
                        .map(|(options, &i)| options[i].as_str())
                        .collect();
                    parts.push(last);
                    out.push(join_name(surname, &parts));
                }
                if !advance(&mut choice, &renderings) {
                    break;
                }
            }
        }

        if config.add_shortened_multiname && n >= 3 {
            let fused: String = given[1..].iter().map(|part| part.initial()).collect();
            let fused = with_wildcard(&fused, config.add_wildcards);
            for first in given[0].renderings() {
                out.push(join_name(surname, &[first, fused.clone()]));
            }
        }

        out.truncate(config.max_combinations);
        out
    }
}

fn with_wildcard(text: &str, add_wildcard: bool) -> String {
    if add_wildcard {
        format!("{text}{WILDCARD}")
    } else {
        text.to_string()
    }
}

/// Step to the next prefix, initials first, with the earliest part varying
/// slowest. Returns false once every prefix has been visited.
fn advance(choice: &mut [usize], renderings: &[Vec<String>]) -> bool {
    for position in (0..choice.len()).rev() {
        choice[position] += 1;
        if choice[position] < renderings[position].len() {
            return true;
        }
        choice[position] = 0;
    }
    false
}

impl Expander for NameCombinationFilter {
    fn expand(&self, token: &Token) -> Vec<Token> {
        let decomposable = match token.kind {
            TokenKind::Plain | TokenKind::Transliterated | TokenKind::Synonym => {
                !token.is_wildcard()
            }
            TokenKind::Combination => false,
        };
        if !decomposable {
            return Vec::new();
        }

        // A name without an identifiable surname yields no combinations;
        // the source token itself still stands as a literal.
        let Some(name) = ParsedName::parse(&token.text) else {
            return Vec::new();
        };

        self.combinations(&name)
            .into_iter()
            .filter(|combination| *combination != token.text)
            .map(|combination| Token::new(combination, TokenKind::Combination, Stage::Combination))
            .collect()
    }

    fn name(&self) -> &'static str {
        "name_combination"
    }
}

impl Filter for NameCombinationFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(expand_all(self, tokens))
    }

    fn name(&self) -> &'static str {
        "name_combination"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combos(filter: &NameCombinationFilter, text: &str) -> Vec<String> {
        filter.combinations(&ParsedName::parse(text).unwrap())
    }

    #[test]
    fn test_full_then_initial_final_part() {
        let filter = NameCombinationFilter::default();
        assert_eq!(
            combos(&filter, "ortiz, david a"),
            vec![
                "ortiz,",
                "ortiz, d",
                "ortiz, david",
                "ortiz, d a*",
                "ortiz, david a*",
            ]
        );
    }

    #[test]
    fn test_single_full_part() {
        let filter = NameCombinationFilter::default();
        assert_eq!(
            combos(&filter, "ortiz, david"),
            vec!["ortiz,", "ortiz, d", "ortiz, david", "ortiz, david *"]
        );
    }

    #[test]
    fn test_single_initial_is_never_expanded() {
        let filter = NameCombinationFilter::default();
        assert_eq!(combos(&filter, "ortiz, d"), vec!["ortiz,", "ortiz, d*"]);
    }

    #[test]
    fn test_bare_surname() {
        let filter = NameCombinationFilter::default();
        assert_eq!(combos(&filter, "muller,"), vec!["muller,", "muller, *"]);

        // The bare form survives even when plain_surname is off.
        let filter = NameCombinationFilter::new(CombinationConfig {
            plain_surname: false,
            add_wildcards: false,
            ..CombinationConfig::default()
        });
        assert_eq!(combos(&filter, "muller,"), vec!["muller,"]);
    }

    #[test]
    fn test_three_parts() {
        let filter = NameCombinationFilter::default();
        assert_eq!(
            combos(&filter, "kurtz, michael julian x"),
            vec![
                "kurtz,",
                "kurtz, m",
                "kurtz, michael",
                "kurtz, m j",
                "kurtz, m julian",
                "kurtz, michael j",
                "kurtz, michael julian",
                "kurtz, m j x*",
                "kurtz, m julian x*",
                "kurtz, michael j x*",
                "kurtz, michael julian x*",
            ]
        );
    }

    #[test]
    fn test_without_wildcards_or_surname() {
        let filter = NameCombinationFilter::new(CombinationConfig {
            add_wildcards: false,
            plain_surname: false,
            ..CombinationConfig::default()
        });
        assert_eq!(
            combos(&filter, "ortiz, david a"),
            vec!["ortiz, d", "ortiz, david", "ortiz, d a", "ortiz, david a"]
        );
    }

    #[test]
    fn test_min_given_parts() {
        let filter = NameCombinationFilter::new(CombinationConfig {
            min_given_parts: 2,
            ..CombinationConfig::default()
        });
        assert_eq!(
            combos(&filter, "ortiz, david a"),
            vec!["ortiz,", "ortiz, d a*", "ortiz, david a*"]
        );
    }

    #[test]
    fn test_shortened_multiname() {
        let filter = NameCombinationFilter::new(CombinationConfig {
            add_shortened_multiname: true,
            ..CombinationConfig::default()
        });
        let combinations = combos(&filter, "kurtz, michael julian xavier");
        assert!(combinations.contains(&"kurtz, m jx*".to_string()));
        assert!(combinations.contains(&"kurtz, michael jx*".to_string()));
    }

    #[test]
    fn test_combination_cap() {
        let filter = NameCombinationFilter::new(CombinationConfig {
            max_combinations: 3,
            ..CombinationConfig::default()
        });
        assert_eq!(
            combos(&filter, "ortiz, david a"),
            vec!["ortiz,", "ortiz, d", "ortiz, david"]
        );
    }

    #[test]
    fn test_cap_bounds_long_names() {
        let filter = NameCombinationFilter::new(CombinationConfig {
            min_given_parts: 30,
            ..CombinationConfig::default()
        });
        let parts: Vec<String> = (0..30).map(|i| format!("part{i}")).collect();
        let name = ParsedName::parse(&format!("kurtz, {}", parts.join(" "))).unwrap();

        let combinations = filter.combinations(&name);
        assert_eq!(combinations.len(), 64);
        assert_eq!(combinations[0], "kurtz,");
        assert_eq!(combinations[1], format!("kurtz, {}", vec!["p"; 30].join(" ")));
        assert_eq!(
            combinations[2],
            format!("kurtz, {} part29", vec!["p"; 29].join(" "))
        );
        for combination in &combinations[1..] {
            let parsed = ParsedName::parse(combination.trim_end_matches(" *")).unwrap();
            assert_eq!(parsed.given.len(), 30);
        }
        assert_eq!(combinations, filter.combinations(&name));
    }

    #[test]
    fn test_truncated_middle_part_stays_truncated() {
        let filter = NameCombinationFilter::default();
        let combinations = combos(&filter, "huchra, j peter");
        assert_eq!(
            combinations,
            vec![
                "huchra,",
                "huchra, j",
                "huchra, j p",
                "huchra, j peter",
                "huchra, j peter *",
            ]
        );
    }

    #[test]
    fn test_expander_skips_combinations_and_wildcards() {
        let filter = NameCombinationFilter::default();
        let combination = Token::new("ortiz, david", TokenKind::Combination, Stage::Combination);
        assert!(filter.expand(&combination).is_empty());

        let wildcard = Token::new("ortiz, d*", TokenKind::Synonym, Stage::CuratedSynonyms);
        assert!(filter.expand(&wildcard).is_empty());
    }

    #[test]
    fn test_expander_excludes_source_text() {
        let filter = NameCombinationFilter::default();
        let expanded = filter.expand(&Token::plain("ortiz, david"));
        let texts: Vec<_> = expanded.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["ortiz,", "ortiz, d", "ortiz, david *"]);
        assert!(expanded.iter().all(|t| t.kind == TokenKind::Combination));
        assert!(expanded.iter().all(|t| t.position_increment == 0));
    }

    #[test]
    fn test_filter_keeps_source_first() {
        let filter = NameCombinationFilter::default();
        let tokens = filter.filter(vec![Token::plain("muller, h")]).unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["muller, h", "muller,", "muller, h*"]);
    }
}
