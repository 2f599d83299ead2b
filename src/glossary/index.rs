//! Surface-form lookup index.
//!
//! Two tiers, both built once from the store:
//!
//! - **raw**: lowercased slug, display name and every alias.
//! - **normalized**: the same keys after [`normalize`] (`ë → e`, `ç → c`).
//!
//! [`LookupIndex::resolve`] tries the raw tier first, then the normalized one,
//! so `fuge`, `fugë` and `FUGË` all land on the same slug.

use std::collections::HashMap;

use tracing::warn;

use super::store::GlossaryStore;

/// Lowercase and strip the two Albanian diacritics. Everything else is kept.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            'ë' => 'e',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Read-only `surface form → slug` map.
#[derive(Debug, Clone, Default)]
pub struct LookupIndex {
    raw: HashMap<String, String>,
    normalized: HashMap<String, String>,
}

impl LookupIndex {
    /// Index every entry in `store`.
    ///
    /// When two different slugs claim the same key the later entry wins and a
    /// warning is logged.
    pub fn build(store: &GlossaryStore) -> Self {
        let mut keys: Vec<(String, &str)> = Vec::new();
        for entry in store.entries() {
            let slug = entry.slug.as_str();
            keys.push((entry.slug.to_lowercase(), slug));
            keys.push((entry.display_name.to_lowercase(), slug));
            for alias in &entry.aliases {
                keys.push((alias.to_lowercase(), slug));
            }
        }

        let mut raw = HashMap::with_capacity(keys.len());
        for (key, slug) in &keys {
            register(&mut raw, key.clone(), slug);
        }

        let mut normalized = HashMap::with_capacity(keys.len());
        for (key, slug) in &keys {
            register(&mut normalized, normalize(key), slug);
        }

        Self { raw, normalized }
    }

    /// Slug for `surface`, or `None` when the form is unknown.
    pub fn resolve(&self, surface: &str) -> Option<&str> {
        let lower = surface.to_lowercase();
        self.raw
            .get(&lower)
            .or_else(|| self.normalized.get(&normalize(&lower)))
            .map(String::as_str)
    }

    /// Number of distinct raw keys.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

fn register(map: &mut HashMap<String, String>, key: String, slug: &str) {
    if let Some(prev) = map.insert(key.clone(), slug.to_string()) {
        if prev != slug {
            warn!(%key, previous = %prev, slug, "glossary surface form collision, later entry wins");
        }
    }
}
