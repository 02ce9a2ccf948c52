//! Server configuration

use crate::listing::{SortDir, SortField};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Smallest selectable thumbnail edge, in pixels.
pub const THUMB_MIN_PX: u32 = 60;
/// Largest selectable thumbnail edge, in pixels.
pub const THUMB_MAX_PX: u32 = 480;

/// Main server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleriaConfig {
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub gallery: GalleryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Allow-listed serving roots; the first one is active at startup.
    pub roots: Vec<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            roots: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Distinct (path, visibility) keys kept in the directory cache.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 512 }
    }
}

/// Defaults for the browsing views; clients override these per device
/// through URL parameters and local storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub show_hidden: bool,
    pub sort_field: SortField,
    pub sort_dir: SortDir,
    pub thumbnail_size: u32,
    pub view_mode: ViewMode,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            sort_field: SortField::Name,
            sort_dir: SortDir::Asc,
            thumbnail_size: 140,
            view_mode: ViewMode::Thumbs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[serde(rename = "thumbs")]
    Thumbs,
    #[serde(rename = "list")]
    List,
}

impl GalleriaConfig {
    /// Load configuration from `path`, or from the default location
    /// when no path is given. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let mut config: Self = toml::from_str(&content)?;
            config.gallery.thumbnail_size =
                config.gallery.thumbnail_size.clamp(THUMB_MIN_PX, THUMB_MAX_PX);
            tracing::info!("Configuration loaded from {:?}", config_path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        tracing::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "Galleria", "Galleria")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}
