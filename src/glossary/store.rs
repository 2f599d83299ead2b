//! Glossary store: the term table, loaded once at startup.
//!
//! Data lives in TOML (`[[terms]]` tables).  The default table is compiled
//! into the binary from `config/glossary.toml`; a different file can be
//! supplied through config.  There is no mutation API.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::GlossaryError;

const BUILTIN_GLOSSARY: &str = include_str!("../../config/glossary.toml");

/// One glossary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    /// Stable machine key, unique across the store.
    pub slug: String,
    /// Canonical Albanian name.
    #[serde(rename = "term")]
    pub display_name: String,
    /// English technical label.
    #[serde(rename = "en", default, skip_serializing_if = "Option::is_none")]
    pub english_label: Option<String>,
    /// One or two sentence plain-language definition.
    #[serde(rename = "short")]
    pub short_definition: String,
    #[serde(rename = "safety", default, skip_serializing_if = "Option::is_none")]
    pub safety_note: Option<String>,
    /// Synonyms, misspellings and loanwords users might type.
    #[serde(rename = "aka", default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

/// On-disk file shape.
#[derive(Deserialize)]
struct RawGlossary {
    #[serde(default)]
    terms: Vec<TermEntry>,
}

/// Owned term table with slug lookup. Registration order is preserved.
#[derive(Debug, Clone, Default)]
pub struct GlossaryStore {
    entries: Vec<TermEntry>,
    by_slug: HashMap<String, usize>,
}

impl GlossaryStore {
    /// Parse the glossary bundled into the binary.
    pub fn builtin() -> Result<Self, GlossaryError> {
        Self::from_toml_str(BUILTIN_GLOSSARY)
    }

    /// Read and parse a glossary TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, GlossaryError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, GlossaryError> {
        let raw: RawGlossary = toml::from_str(s)?;
        Self::from_entries(raw.terms)
    }

    /// Validate and index `entries`.
    ///
    /// Rejects empty slugs, names and definitions, and duplicate slugs.
    /// Surface-form collisions between different entries are left to the
    /// lookup index.
    pub fn from_entries(entries: Vec<TermEntry>) -> Result<Self, GlossaryError> {
        let mut by_slug = HashMap::with_capacity(entries.len());
        for (i, e) in entries.iter().enumerate() {
            if e.slug.trim().is_empty() {
                return Err(GlossaryError::Invalid(format!("entry #{i} has an empty slug")));
            }
            if e.display_name.trim().is_empty() {
                return Err(GlossaryError::Invalid(format!("'{}' has an empty term", e.slug)));
            }
            if e.short_definition.trim().is_empty() {
                return Err(GlossaryError::Invalid(format!("'{}' has an empty definition", e.slug)));
            }
            if by_slug.insert(e.slug.clone(), i).is_some() {
                return Err(GlossaryError::Invalid(format!("duplicate slug '{}'", e.slug)));
            }
        }
        Ok(Self { entries, by_slug })
    }

    pub fn get(&self, slug: &str) -> Option<&TermEntry> {
        self.by_slug.get(slug).map(|&i| &self.entries[i])
    }

    /// All entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &TermEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
