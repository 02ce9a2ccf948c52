//! Listing/sort engine: ordered, markup-free views of cached scans

use galleria_fs::{natural_key, natural_sort, FileRecord, RelPath, ScannedDir};
use serde::{Deserialize, Serialize};

/// Sort key for file listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "size")]
    Size,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDir {
    #[default]
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    Desc,
}

/// Request-scoped sort selection; never persisted server-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub dir: SortDir,
}

/// Ordered view of one folder, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DirListing {
    /// Target of the implicit parent entry; `None` at the root.
    pub up: Option<RelPath>,
    /// Subfolders, always in natural ascending order.
    pub folders: Vec<String>,
    /// Files ordered by the requested sort.
    pub files: Vec<FileRecord>,
}

/// Build the rendered view of a scanned folder.
pub fn build_listing(path: &RelPath, scanned: &ScannedDir, sort: SortSpec) -> DirListing {
    let mut folders = scanned.folders.clone();
    natural_sort(&mut folders);

    DirListing {
        up: path.parent(),
        folders,
        files: sort_files(&scanned.files, sort),
    }
}

/// Order files under a sort spec.
///
/// Name order is natural; size order breaks ties by natural name via
/// the stable sort. Descending is the exact reverse of ascending.
pub fn sort_files(files: &[FileRecord], sort: SortSpec) -> Vec<FileRecord> {
    let mut out = files.to_vec();
    out.sort_by_cached_key(|f| natural_key(&f.name));
    if sort.field == SortField::Size {
        out.sort_by_key(|f| f.size);
    }
    if sort.dir == SortDir::Desc {
        out.reverse();
    }
    out
}

/// The image names of a listing, in viewer order under `sort`.
///
/// This is the viewer's contract: index `i` resolves to the same file
/// for the whole viewing session.
pub fn image_sequence(files: &[FileRecord], sort: SortSpec) -> Vec<String> {
    sort_files(files, sort)
        .into_iter()
        .filter(|f| f.is_image)
        .map(|f| f.name)
        .collect()
}
