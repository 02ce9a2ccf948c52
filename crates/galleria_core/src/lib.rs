//! Galleria Core Domain Logic
//!
//! This crate contains:
//! - Server configuration
//! - The shared gallery service: active root, allow-list, directory cache
//! - The listing/sort engine
//! - Error types

pub mod config;
pub mod error;
pub mod gallery;
pub mod listing;

pub use config::{
    CacheConfig, GalleriaConfig, GalleryConfig, ServerConfig, ViewMode, THUMB_MAX_PX, THUMB_MIN_PX,
};
pub use error::GalleryError;
pub use gallery::{Gallery, ListingKey};
pub use listing::{build_listing, image_sequence, sort_files, DirListing, SortDir, SortField, SortSpec};

pub type Result<T> = std::result::Result<T, GalleryError>;
