use std::io;

use routine_model::DuplicateIdError;
use thiserror::Error;

/// An error reading from or writing to a [`Storage`](crate::Storage).
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
    /// The selection could not be serialized.
    #[error("failed to encode selection: {0}")]
    Encode(#[from] serde_json::Error),
}

/// An error loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),
    /// The catalog could not be fetched over HTTP.
    #[error("failed to fetch catalog: {0}")]
    Http(#[from] reqwest::Error),
    /// The catalog document is not valid JSON of the expected shape.
    #[error("failed to decode catalog: {0}")]
    Decode(#[from] serde_json::Error),
    /// Two products share an id.
    #[error(transparent)]
    DuplicateId(#[from] DuplicateIdError),
}
