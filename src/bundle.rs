use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-locale output written to `translations/<locale>.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationBundle {
    /// Hash of the source file as reported by the service
    pub hash: String,
    /// Canonical locale code (after alias resolution)
    pub locale: String,
    /// Translation key → translated text
    pub phrases: BTreeMap<String, String>,
}

impl TranslationBundle {
    pub fn new(
        hash: impl Into<String>,
        locale: impl Into<String>,
        phrases: BTreeMap<String, String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            locale: locale.into(),
            phrases,
        }
    }

    /// File name the bundle is stored under
    pub fn file_name(&self) -> String {
        format!("{}.json", self.locale)
    }

    /// Serialize to JSON. Non-ASCII text is written as-is, not `\u` escaped.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
