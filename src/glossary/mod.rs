//! Construction glossary: term data, surface-form index, matching and
//! context rendering.
//!
//! [`Glossary`] bundles the [`GlossaryStore`] with the [`LookupIndex`] derived
//! from it.  Both are immutable once built; share the bundle behind an `Arc`.
//!
//! ```text
//! question ──► match_terms(index) ──► [slug…] ──► build_context(store) ──► bullet list
//! ```

pub mod context;
pub mod index;
pub mod matcher;
pub mod store;

use std::path::Path;

use thiserror::Error;

pub use context::build_context;
pub use index::{LookupIndex, normalize};
pub use matcher::match_terms;
pub use store::{GlossaryStore, TermEntry};

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GlossaryError {
    #[error("glossary io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("glossary parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid glossary: {0}")]
    Invalid(String),
}

// ── Glossary ──────────────────────────────────────────────────────────────────

/// Term store plus the lookup index built from it.
#[derive(Debug)]
pub struct Glossary {
    store: GlossaryStore,
    index: LookupIndex,
}

impl Glossary {
    /// Build the index over `store`. The store is moved in; rebuilding means
    /// constructing a new `Glossary`.
    pub fn new(store: GlossaryStore) -> Self {
        let index = LookupIndex::build(&store);
        Self { store, index }
    }

    /// The glossary compiled into the binary.
    pub fn builtin() -> Result<Self, GlossaryError> {
        Ok(Self::new(GlossaryStore::builtin()?))
    }

    /// Load from `path` when given, otherwise fall back to the bundled data.
    pub fn load(path: Option<&Path>) -> Result<Self, GlossaryError> {
        let store = match path {
            Some(p) => GlossaryStore::load_from_file(p)?,
            None => GlossaryStore::builtin()?,
        };
        Ok(Self::new(store))
    }

    pub fn store(&self) -> &GlossaryStore {
        &self.store
    }

    pub fn index(&self) -> &LookupIndex {
        &self.index
    }

    /// Slugs of every known term in `text`, first-occurrence order.
    pub fn match_terms(&self, text: &str) -> Vec<String> {
        matcher::match_terms(&self.index, text)
    }

    /// Render the context block for `slugs` (empty string for no slugs).
    pub fn build_context(&self, slugs: &[String]) -> String {
        context::build_context(&self.store, slugs)
    }
}
