//! Gallery error types

use thiserror::Error;

/// Errors surfaced by the gallery service.
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("File system error: {0}")]
    Fs(#[from] galleria_fs::FsError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Root not allowed: {0}")]
    Forbidden(String),

    #[error("No serving roots configured")]
    NoRoots,
}
