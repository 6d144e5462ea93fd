//! Download pipeline: fetch, convert and store translation bundles.

use crate::archive::TranslationArchive;
use crate::bundle::TranslationBundle;
use crate::config::Config;
use crate::error::{FetchError, SyncError};
use crate::locale;
use crate::phrases::{extract_phrases, is_phrase_source};
use crate::retry::with_retry;
use crate::store::TranslationStore;
use crate::wti::WtiClient;
use tracing::{info, warn};

/// How a successful run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Fetching is turned off; nothing was done
    Disabled,
    /// Fresh bundles were written for these locales
    Downloaded { locales: Vec<String> },
    /// Every attempt failed; bundles from an earlier run are still in place
    KeptExisting { files: usize },
}

/// Run the download pipeline.
///
/// Returns an error only when no bundle file is present once all attempts
/// are over.
pub async fn run(config: &Config) -> Result<SyncOutcome, SyncError> {
    if !config.fetch_enabled {
        info!("Translation fetching is disabled (set TRANSLATIONS_FETCH_ENABLED=true to enable)");
        return Ok(SyncOutcome::Disabled);
    }

    let client = WtiClient::new(&config.api_url, &config.project_token, config.http_timeout)
        .map_err(SyncError::Client)?;
    let store = TranslationStore::for_destination(&config.destination);

    let client_ref = &client;
    let store_ref = &store;
    let result = with_retry(&config.retry, "Load translations", move || {
        download_once(client_ref, store_ref)
    })
    .await;

    let existing = store
        .existing_bundles()
        .map_err(|source| SyncError::Inspect {
            dir: store.dir().to_path_buf(),
            source,
        })?;

    if existing.is_empty() {
        warn!("Translations are not downloaded");
        return Err(SyncError::NoTranslations {
            dir: store.dir().to_path_buf(),
        });
    }

    match result {
        Ok(locales) => {
            info!("Translations are downloaded and written ({} locales)", locales.len());
            Ok(SyncOutcome::Downloaded { locales })
        }
        Err(e) => {
            warn!("Translation loading failed: {}", e);
            info!("Using {} existing translation files", existing.len());
            Ok(SyncOutcome::KeptExisting {
                files: existing.len(),
            })
        }
    }
}

/// One attempt: fetch metadata and archive, replace all bundles.
///
/// Old bundles are deleted only after both downloads succeeded. Returns the
/// locales written, in project file order.
async fn download_once(
    client: &WtiClient,
    store: &TranslationStore,
) -> Result<Vec<String>, FetchError> {
    let project = client.fetch_project().await?;
    let mut archive = TranslationArchive::from_bytes(client.fetch_zip().await?)?;

    store.clear()?;

    let mut locales = Vec::new();
    for file in project
        .project_files
        .iter()
        .filter(|file| is_phrase_source(&file.name))
    {
        let source = archive.read_text(&file.name)?;
        let locale = locale::resolve(&file.locale_code);
        let bundle = TranslationBundle::new(&file.hash_file, locale, extract_phrases(&source));

        store.write_bundle(&bundle)?;
        locales.push(bundle.locale);
    }

    Ok(locales)
}
