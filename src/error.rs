//! Error types for the download pipeline.
//!
//! `FetchError` covers everything that can abort a single download attempt.
//! All of its variants are retried the same way. `SyncError` is what the
//! whole run reports once the attempt budget is spent.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of one download attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or timeout failure
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status code
    #[error("request to {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Project metadata was not valid JSON or lacked the expected fields
    #[error("malformed project metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    /// The downloaded archive could not be opened or an entry was missing
    #[error("invalid translation archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An archive entry was not UTF-8 text
    #[error("archive entry {name} is not valid UTF-8")]
    EntryEncoding { name: String },

    /// An archive entry decompressed to more than the read limit
    #[error("archive entry {name} exceeds {limit} bytes")]
    EntryTooLarge { name: String, limit: u64 },

    /// A bundle could not be serialized
    #[error("failed to encode bundle for {locale}: {source}")]
    Encode {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    /// A locale code that cannot be used as an output file name
    #[error("locale code {0:?} cannot be used as a file name")]
    InvalidLocale(String),

    /// Deleting or writing a translation file failed
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Terminal failure of a run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("no translation files available in {}", .dir.display())]
    NoTranslations { dir: PathBuf },

    #[error("failed to inspect {}: {source}", .dir.display())]
    Inspect {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
