//! Term matcher: finds glossary terms in free text.
//!
//! Tokens are whole words only: no stemming, no fuzzy match, no multi-word
//! phrases.

use std::collections::HashSet;

use super::index::LookupIndex;

/// Characters that separate tokens, besides whitespace.
const SEPARATORS: &[char] = &[',', '.', ';', ':', '!', '?', '(', ')', '\'', '"', '-'];

fn is_separator(c: char) -> bool {
    c.is_whitespace() || SEPARATORS.contains(&c)
}

/// Split `text` into non-empty word tokens.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|t| !t.is_empty())
}

/// Slugs of every known term in `text`, in order of first appearance,
/// without duplicates.
pub fn match_terms(index: &LookupIndex, text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();
    for token in tokenize(text) {
        if let Some(slug) = index.resolve(token) {
            if seen.insert(slug) {
                found.push(slug.to_string());
            }
        }
    }
    found
}
