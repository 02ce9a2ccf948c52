//! Directory scanning

use crate::natural::natural_key;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Extensions served as gallery images.
const IMAGE_EXTS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif", "avif",
];

/// Check whether a file name carries an image extension.
pub fn is_image_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .map(|ext| IMAGE_EXTS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// A regular file found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    pub size: u64,
    pub is_image: bool,
}

/// Raw contents of one directory, folders and files each in natural
/// name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedDir {
    pub folders: Vec<String>,
    pub files: Vec<FileRecord>,
}

/// Scan a single directory level.
///
/// A directory that vanished (or never existed) scans as empty rather
/// than failing, and individual entries that cannot be stat'd are
/// skipped. The result is deterministic: folders and files come back
/// in natural name order.
pub fn scan_dir(abs: &Path, show_hidden: bool) -> ScannedDir {
    let reader = match fs::read_dir(abs) {
        Ok(r) => r,
        Err(err) => {
            debug!("scan of {} failed: {err}", abs.display());
            return ScannedDir::default();
        }
    };

    let mut folders = Vec::new();
    let mut files = Vec::new();

    for entry in reader {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(raw) => {
                debug!("skipping non-UTF-8 name {:?} in {}", raw, abs.display());
                continue;
            }
        };

        // Stat through symlinks so a linked directory lists as a folder.
        let meta = match fs::metadata(entry.path()) {
            Ok(m) => m,
            Err(_) => continue,
        };

        if !show_hidden && is_hidden_entry(&name, &meta) {
            continue;
        }

        if meta.is_dir() {
            folders.push(name);
        } else if meta.is_file() {
            let is_image = is_image_name(&name);
            files.push(FileRecord {
                name,
                size: meta.len(),
                is_image,
            });
        }
    }

    folders.sort_by_cached_key(|n| natural_key(n));
    files.sort_by_cached_key(|f| natural_key(&f.name));

    ScannedDir { folders, files }
}

/// Check if an entry is hidden
#[cfg(windows)]
fn is_hidden_entry(name: &str, meta: &fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    name.starts_with('.') || meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
fn is_hidden_entry(name: &str, _meta: &fs::Metadata) -> bool {
    name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn touch(path: &Path, bytes: usize) {
        let mut f = File::create(path).unwrap();
        f.write_all(&vec![0u8; bytes]).unwrap();
    }

    #[test]
    fn test_is_image_name() {
        assert!(is_image_name("photo.jpg"));
        assert!(is_image_name("PHOTO.JPG"));
        assert!(is_image_name("a.webp"));
        assert!(is_image_name("a.avif"));
        assert!(!is_image_name("notes.txt"));
        assert!(!is_image_name("archive.zip"));
        assert!(!is_image_name("noext"));
    }

    #[test]
    fn test_scan_orders_and_classifies() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::create_dir(root.join("b")).unwrap();
        fs::create_dir(root.join("2019")).unwrap();
        touch(&root.join("img10.jpg"), 10);
        touch(&root.join("img2.jpg"), 2);
        touch(&root.join("note.txt"), 1);

        let scanned = scan_dir(root, false);
        assert_eq!(scanned.folders, vec!["2019", "b"]);

        let names: Vec<&str> = scanned.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["img2.jpg", "img10.jpg", "note.txt"]);

        let images: Vec<&str> = scanned
            .files
            .iter()
            .filter(|f| f.is_image)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(images, vec!["img2.jpg", "img10.jpg"]);

        assert_eq!(scanned.files[0].size, 2);
        assert_eq!(scanned.files[1].size, 10);
    }

    #[test]
    fn test_scan_hides_dotfiles() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::create_dir(root.join(".git")).unwrap();
        touch(&root.join(".hidden.jpg"), 1);
        touch(&root.join("shown.jpg"), 1);

        let scanned = scan_dir(root, false);
        assert!(scanned.folders.is_empty());
        assert_eq!(scanned.files.len(), 1);
        assert_eq!(scanned.files[0].name, "shown.jpg");

        let scanned = scan_dir(root, true);
        assert_eq!(scanned.folders, vec![".git"]);
        assert_eq!(scanned.files.len(), 2);
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let scanned = scan_dir(&dir.path().join("gone"), false);
        assert_eq!(scanned, ScannedDir::default());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_broken_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        touch(&root.join("real.jpg"), 1);
        std::os::unix::fs::symlink(root.join("gone.jpg"), root.join("broken.jpg")).unwrap();

        let scanned = scan_dir(root, false);
        let names: Vec<&str> = scanned.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["real.jpg"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinked_dirs() {
        let outer = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        std::os::unix::fs::symlink(outer.path(), root.join("linked")).unwrap();

        let scanned = scan_dir(root, false);
        assert_eq!(scanned.folders, vec!["linked"]);
    }
}
