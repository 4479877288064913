//! Text lookup for buyer- and admin-facing strings.

use std::collections::HashMap;

use serde::Deserialize;

/// Text domain all gateway strings are looked up in.
pub const TEXT_DOMAIN: &str = "eanpay";

/// Maps a source string (plus domain) to its display string.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, domain: &str) -> String;
}

/// Returns every string unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str, _domain: &str) -> String {
        text.to_string()
    }
}

/// Flat source-to-display catalog for one text domain.
///
/// Strings missing from the catalog, or looked up in another domain, come
/// back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogTranslator {
    domain: String,
    entries: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn new(domain: impl Into<String>, entries: HashMap<String, String>) -> Self {
        Self {
            domain: domain.into(),
            entries,
        }
    }

    /// Parse `{"domain": "...", "entries": {"source": "display", ...}}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, text: &str, domain: &str) -> String {
        if domain != self.domain {
            return text.to_string();
        }
        self.entries
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}
