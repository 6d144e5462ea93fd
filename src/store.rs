//! The `translations/` directory under the destination path.

use crate::bundle::TranslationBundle;
use crate::error::FetchError;
use crate::locale;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const TRANSLATIONS_DIR: &str = "translations";

#[derive(Debug, Clone)]
pub struct TranslationStore {
    dir: PathBuf,
}

impl TranslationStore {
    /// Store rooted at `<destination>/translations`
    pub fn for_destination(destination: &Path) -> Self {
        Self {
            dir: destination.join(TRANSLATIONS_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Bundle files currently present (`*.json` regular files, hidden files
    /// excluded), sorted by path. A missing directory has no bundles.
    pub fn existing_bundles(&self) -> io::Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut bundles = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if is_bundle_file(&path) {
                bundles.push(path);
            }
        }
        bundles.sort();
        Ok(bundles)
    }

    /// Delete every bundle file. Returns how many were removed.
    pub fn clear(&self) -> Result<usize, FetchError> {
        let bundles = self.existing_bundles().map_err(|e| FetchError::Io {
            action: "failed to list",
            path: self.dir.clone(),
            source: e,
        })?;

        info!(
            "Removing {} old translation files from {}",
            bundles.len(),
            self.dir.display()
        );
        for path in &bundles {
            fs::remove_file(path).map_err(|e| FetchError::Io {
                action: "failed to remove",
                path: path.clone(),
                source: e,
            })?;
        }

        Ok(bundles.len())
    }

    /// Write `bundle` to `<locale>.json`, replacing any existing file
    pub fn write_bundle(&self, bundle: &TranslationBundle) -> Result<PathBuf, FetchError> {
        locale::ensure_file_stem(&bundle.locale)?;

        fs::create_dir_all(&self.dir).map_err(|e| FetchError::Io {
            action: "failed to create",
            path: self.dir.clone(),
            source: e,
        })?;

        let path = self.dir.join(bundle.file_name());
        let json = bundle.to_json().map_err(|e| FetchError::Encode {
            locale: bundle.locale.clone(),
            source: e,
        })?;

        info!("Writing translations into {}", path.display());
        fs::write(&path, json).map_err(|e| FetchError::Io {
            action: "failed to write",
            path: path.clone(),
            source: e,
        })?;
        debug!("{} phrases for {}", bundle.phrases.len(), bundle.locale);

        Ok(path)
    }
}

fn is_bundle_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(true);

    !hidden && path.extension().is_some_and(|ext| ext == "json") && path.is_file()
}
