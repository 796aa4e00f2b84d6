use std::path::PathBuf;

use chronicle_types::CollectionError;

/// Why a collection could not be loaded. Never fatal: the loader turns
/// it into a warning and an empty collection.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("cannot parse collection: {0}")]
    Parse(#[from] CollectionError),
}
