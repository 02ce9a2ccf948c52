//! Galleria File System Layer
//!
//! Everything the gallery knows about the disk lives here:
//! - RelPath: normalized request paths that cannot escape the serving root
//! - Natural sorting: "img2.jpg" before "img10.jpg"
//! - Directory scanning with per-platform hidden-file rules

mod natural;
mod rel_path;
mod scan;

pub use natural::{natural_cmp, natural_key, natural_sort, NaturalKey};
pub use rel_path::{canonical_root, RelPath};
pub use scan::{is_image_name, scan_dir, FileRecord, ScannedDir};

use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Path escapes the serving root: {0}")]
    Traversal(String),
}

pub type Result<T> = std::result::Result<T, FsError>;
