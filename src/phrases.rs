//! Phrase extraction from PHP language files.
//!
//! The service exports each locale as a PHP file of assignments:
//!
//! ```php
//! $lang["greeting"] = "Hello";
//! $lang["farewell"] = "See \"you\"";
//! ```
//!
//! `extract_phrases` turns that text into a key → value map without touching
//! the network or the filesystem.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Archive entries ending with this suffix hold phrases
pub const PHRASE_SOURCE_SUFFIX: &str = "/alice.php";

static ASSIGNMENT_REGEX: OnceLock<Regex> = OnceLock::new();

fn assignment_regex() -> &'static Regex {
    ASSIGNMENT_REGEX.get_or_init(|| {
        Regex::new(r#"(?si)\$lang\["(?P<key>.*?)"\] = "(?P<value>.*?)";(?:\r?\n|\z)"#)
            .expect("assignment pattern is valid")
    })
}

/// Whether an archive entry name is a phrase source file.
pub fn is_phrase_source(name: &str) -> bool {
    name.ends_with(PHRASE_SOURCE_SUFFIX)
}

/// Extract all `$lang["key"] = "value";` assignments from `source`.
///
/// Escaped quotes are unescaped in keys and values. Empty keys are skipped,
/// an empty value falls back to its key, and a repeated key keeps the last
/// value.
pub fn extract_phrases(source: &str) -> BTreeMap<String, String> {
    let mut phrases = BTreeMap::new();

    for caps in assignment_regex().captures_iter(source) {
        let raw_key = &caps["key"];
        if raw_key.is_empty() {
            continue;
        }

        let key = unescape_quotes(raw_key);
        let value = unescape_quotes(&caps["value"]);
        let value = if value.is_empty() { key.clone() } else { value };

        phrases.insert(key, value);
    }

    phrases
}

fn unescape_quotes(text: &str) -> String {
    text.replace("\\\"", "\"")
}
