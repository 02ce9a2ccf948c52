//! Shared request state

use galleria_core::{Gallery, GalleryConfig};
use std::sync::Arc;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub gallery: Gallery,
    /// Fallback view parameters for requests that leave them out.
    pub defaults: GalleryConfig,
}

impl AppState {
    pub fn new(gallery: Gallery, defaults: GalleryConfig) -> Self {
        Self { gallery, defaults }
    }
}
