//! Locale code normalization.
//!
//! The translation service uses a few locale codes that differ from the ones
//! the application loads at runtime. Those are rewritten here before they end
//! up in an output file name.

use crate::error::FetchError;

/// Raw service code → canonical application code
const LOCALE_ALIASES: &[(&str, &str)] = &[
    ("en_en_VN", "en_VN"),
    ("en_en_TH", "en_TH"),
    ("en_en_ID", "en_ID"),
    ("ms", "ms_MY"),
];

/// Resolve a raw locale code through the alias table.
///
/// Codes without an alias are returned unchanged.
pub fn resolve(code: &str) -> &str {
    LOCALE_ALIASES
        .iter()
        .find(|(raw, _)| *raw == code)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(code)
}

/// Check that a resolved locale can be used as `<locale>.json` inside the
/// translations directory.
pub fn ensure_file_stem(locale: &str) -> Result<(), FetchError> {
    let escapes = locale.is_empty()
        || locale == "."
        || locale.contains("..")
        || locale.contains(['/', '\\', '\0']);

    if escapes {
        return Err(FetchError::InvalidLocale(locale.to_string()));
    }
    Ok(())
}
