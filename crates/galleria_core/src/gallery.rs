//! The shared gallery service: active root, allow-list, directory cache

use crate::error::GalleryError;
use crate::listing::{image_sequence, SortSpec};
use crate::Result;
use galleria_fs::{canonical_root, scan_dir, RelPath, ScannedDir};
use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Cache key: one directory under one visibility setting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingKey {
    path: RelPath,
    show_hidden: bool,
}

/// Process-wide gallery state shared by all requests.
///
/// Holds the allow-listed roots, the active root, and two bounded
/// memo caches: raw directory scans, and the far more frequently
/// requested per-directory image lists. All methods are safe to call
/// from any number of request tasks at once.
pub struct Gallery {
    allowed_roots: Vec<PathBuf>,
    active_root: RwLock<PathBuf>,
    scans: Mutex<LruCache<ListingKey, Arc<ScannedDir>>>,
    images: Mutex<LruCache<ListingKey, Arc<Vec<String>>>>,
    /// Bumped on every invalidation; a scan that started under an
    /// older epoch must not repopulate the cache after a clear.
    epoch: AtomicU64,
}

impl Gallery {
    /// Build the service from allow-listed roots; the first root is
    /// active. Every root must exist and canonicalize cleanly.
    pub fn new(roots: &[PathBuf], capacity: usize) -> Result<Self> {
        let mut allowed = Vec::with_capacity(roots.len());
        for root in roots {
            allowed.push(canonical_root(root)?);
        }
        let active = allowed.first().cloned().ok_or(GalleryError::NoRoots)?;
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Ok(Self {
            allowed_roots: allowed,
            active_root: RwLock::new(active),
            scans: Mutex::new(LruCache::new(capacity)),
            images: Mutex::new(LruCache::new(capacity)),
            epoch: AtomicU64::new(0),
        })
    }

    pub fn allowed_roots(&self) -> &[PathBuf] {
        &self.allowed_roots
    }

    pub fn active_root(&self) -> PathBuf {
        self.active_root.read().clone()
    }

    /// Absolute directory behind a gallery path, under the current
    /// active root.
    pub fn resolve_dir(&self, path: &RelPath) -> Result<PathBuf> {
        let root = self.active_root.read();
        Ok(path.resolve(&root)?)
    }

    /// Scan a directory, memoized by `(path, show_hidden)`.
    ///
    /// A missing or unreadable directory scans as empty; the caller
    /// renders an empty folder rather than an error.
    pub fn scan(&self, path: &RelPath, show_hidden: bool) -> Result<Arc<ScannedDir>> {
        let key = ListingKey {
            path: path.clone(),
            show_hidden,
        };

        let (root, epoch) = {
            let root = self.active_root.read();
            (root.clone(), self.epoch.load(Ordering::Relaxed))
        };

        if let Some(hit) = self.scans.lock().get(&key) {
            return Ok(Arc::clone(hit));
        }

        let abs = path.resolve(&root)?;
        let scanned = Arc::new(scan_dir(&abs, show_hidden));

        let mut cache = self.scans.lock();
        if self.epoch.load(Ordering::Relaxed) == epoch {
            cache.put(key, Arc::clone(&scanned));
        }

        Ok(scanned)
    }

    /// Image names of a directory in natural order, memoized
    /// independently of the raw scan.
    pub fn images_of(&self, path: &RelPath, show_hidden: bool) -> Result<Arc<Vec<String>>> {
        let key = ListingKey {
            path: path.clone(),
            show_hidden,
        };

        let epoch = self.epoch.load(Ordering::Relaxed);
        if let Some(hit) = self.images.lock().get(&key) {
            return Ok(Arc::clone(hit));
        }

        let scanned = self.scan(path, show_hidden)?;
        let names: Vec<String> = scanned
            .files
            .iter()
            .filter(|f| f.is_image)
            .map(|f| f.name.clone())
            .collect();
        let names = Arc::new(names);

        let mut cache = self.images.lock();
        if self.epoch.load(Ordering::Relaxed) == epoch {
            cache.put(key, Arc::clone(&names));
        }

        Ok(names)
    }

    /// The viewer's ordered image sequence for a directory.
    pub fn image_sequence(
        &self,
        path: &RelPath,
        show_hidden: bool,
        sort: SortSpec,
    ) -> Result<Vec<String>> {
        let scanned = self.scan(path, show_hidden)?;
        Ok(image_sequence(&scanned.files, sort))
    }

    /// Absolute path of one image for raw byte serving.
    ///
    /// The name must be present in the directory's image listing;
    /// anything else is not found, so this endpoint can never disclose
    /// arbitrary files.
    pub fn raw_image_path(
        &self,
        path: &RelPath,
        name: &str,
        show_hidden: bool,
    ) -> Result<PathBuf> {
        let images = self.images_of(path, show_hidden)?;
        if !images.iter().any(|n| n == name) {
            return Err(GalleryError::NotFound(format!("{}/{}", path, name)));
        }

        let root = self.active_root.read();
        Ok(path.resolve_file(&root, name)?)
    }

    /// Drop every cached listing.
    pub fn invalidate(&self) {
        self.epoch.fetch_add(1, Ordering::Relaxed);
        self.scans.lock().clear();
        self.images.lock().clear();
        debug!("directory cache cleared");
    }

    /// Replace the active root.
    ///
    /// The candidate must live under one of the allow-listed roots.
    /// On success the whole cache is dropped, since relative paths now
    /// mean something else; on rejection nothing changes.
    pub fn set_root(&self, candidate: &Path) -> Result<()> {
        let canon = canonical_root(candidate)?;
        if !self.allowed_roots.iter().any(|root| canon.starts_with(root)) {
            return Err(GalleryError::Forbidden(canon.display().to_string()));
        }

        {
            let mut root = self.active_root.write();
            *root = canon.clone();
            self.epoch.fetch_add(1, Ordering::Relaxed);
            self.scans.lock().clear();
            self.images.lock().clear();
        }

        info!("active root changed to {}", canon.display());
        Ok(())
    }
}
