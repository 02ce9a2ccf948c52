//! Request path normalization and root containment

use crate::{FsError, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A normalized path relative to the serving root.
///
/// Always slash-separated with no leading or trailing slash; the empty
/// string is the root itself. Normalization can never produce a value
/// that climbs above the root: traversal attempts degrade to the root,
/// so a hostile query string gets the front page instead of a useful
/// probe response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RelPath(String);

impl RelPath {
    /// The serving root.
    pub fn root() -> Self {
        RelPath(String::new())
    }

    /// Normalize untrusted input into a root-relative path.
    ///
    /// Backslashes count as separators, empty and `.` segments are
    /// dropped, and `..` unwinds one level. A path that would unwind
    /// past the root collapses to the root.
    pub fn normalize(raw: &str) -> Self {
        let cleaned = raw.trim().replace('\\', "/");
        let mut segments: Vec<&str> = Vec::new();

        for segment in cleaned.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return RelPath::root();
                    }
                }
                other => segments.push(other),
            }
        }

        RelPath(segments.join("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Last path segment, or the empty string at the root.
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    /// Containing directory, or `None` at the root.
    pub fn parent(&self) -> Option<RelPath> {
        if self.is_root() {
            return None;
        }
        match self.0.rsplit_once('/') {
            Some((head, _)) => Some(RelPath(head.to_string())),
            None => Some(RelPath::root()),
        }
    }

    /// Append one child segment, renormalizing the result.
    pub fn join(&self, name: &str) -> RelPath {
        if self.is_root() {
            RelPath::normalize(name)
        } else {
            RelPath::normalize(&format!("{}/{}", self.0, name))
        }
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Resolve to an absolute path under `root`.
    ///
    /// Normalized segments cannot contain `..`, but platform quirks
    /// like drive-letter segments can still reroute a join on Windows,
    /// so the result is re-verified to stay inside the root.
    pub fn resolve(&self, root: &Path) -> Result<PathBuf> {
        let mut abs = root.to_path_buf();
        for segment in self.segments() {
            abs.push(segment);
        }

        if !abs.starts_with(root) {
            return Err(FsError::Traversal(self.0.clone()));
        }

        Ok(abs)
    }

    /// Resolve a single file name inside this directory.
    ///
    /// The name must be a plain component; anything that looks like a
    /// path is rejected outright.
    pub fn resolve_file(&self, root: &Path, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains('/') || name.contains('\\') {
            return Err(FsError::Traversal(name.to_string()));
        }

        let abs = self.resolve(root)?.join(name);
        if !abs.starts_with(root) {
            return Err(FsError::Traversal(name.to_string()));
        }

        Ok(abs)
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize a serving root supplied by configuration or CLI.
///
/// The root must exist and be a directory; everything else the server
/// does assumes both.
pub fn canonical_root(path: &Path) -> Result<PathBuf> {
    let canon = fs::canonicalize(path)?;
    if !canon.is_dir() {
        return Err(FsError::NotFound(format!(
            "not a directory: {}",
            canon.display()
        )));
    }
    Ok(canon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(RelPath::normalize("photos").as_str(), "photos");
        assert_eq!(RelPath::normalize("photos/2024").as_str(), "photos/2024");
        assert_eq!(RelPath::normalize("/photos/").as_str(), "photos");
        assert_eq!(RelPath::normalize(" photos ").as_str(), "photos");
        assert_eq!(RelPath::normalize("a//b/./c").as_str(), "a/b/c");
        assert_eq!(RelPath::normalize("a\\b\\c").as_str(), "a/b/c");
    }

    #[test]
    fn test_normalize_to_root() {
        assert_eq!(RelPath::normalize(""), RelPath::root());
        assert_eq!(RelPath::normalize("."), RelPath::root());
        assert_eq!(RelPath::normalize("/"), RelPath::root());
        assert_eq!(RelPath::normalize(".."), RelPath::root());
        assert_eq!(RelPath::normalize("../../etc/passwd"), RelPath::root());
        assert_eq!(RelPath::normalize("a/../../b"), RelPath::root());
    }

    #[test]
    fn test_normalize_interior_dotdot() {
        assert_eq!(RelPath::normalize("a/../b").as_str(), "b");
        assert_eq!(RelPath::normalize("a/b/../../c").as_str(), "c");
        // A name that merely starts with dots is not a traversal.
        assert_eq!(RelPath::normalize("..files").as_str(), "..files");
    }

    #[test]
    fn test_parent_and_name() {
        let p = RelPath::normalize("a/b/c");
        assert_eq!(p.name(), "c");
        assert_eq!(p.parent().unwrap().as_str(), "a/b");
        assert_eq!(RelPath::normalize("a").parent().unwrap(), RelPath::root());
        assert!(RelPath::root().parent().is_none());
        assert_eq!(RelPath::root().name(), "");
    }

    #[test]
    fn test_join() {
        let p = RelPath::normalize("photos");
        assert_eq!(p.join("2024").as_str(), "photos/2024");
        assert_eq!(RelPath::root().join("photos").as_str(), "photos");
        // Join renormalizes, so hostile names cannot climb.
        assert_eq!(p.join("..").as_str(), "");
    }

    #[test]
    fn test_resolve_stays_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let abs = RelPath::normalize("sub/child").resolve(root).unwrap();
        assert!(abs.starts_with(root));
        assert_eq!(abs, root.join("sub").join("child"));

        // Traversal input degrades to the root rather than erroring.
        let abs = RelPath::normalize("../../etc/passwd").resolve(root).unwrap();
        assert_eq!(abs, root);
    }

    #[test]
    fn test_resolve_file_rejects_path_names() {
        let dir = tempfile::tempdir().unwrap();
        let rel = RelPath::root();

        assert!(rel.resolve_file(dir.path(), "ok.jpg").is_ok());
        assert!(rel.resolve_file(dir.path(), "..").is_err());
        assert!(rel.resolve_file(dir.path(), "a/b.jpg").is_err());
        assert!(rel.resolve_file(dir.path(), "a\\b.jpg").is_err());
        assert!(rel.resolve_file(dir.path(), "").is_err());
    }

    #[test]
    fn test_canonical_root() {
        let dir = tempfile::tempdir().unwrap();
        let canon = canonical_root(dir.path()).unwrap();
        assert!(canon.is_dir());

        assert!(canonical_root(&dir.path().join("missing")).is_err());
    }
}
