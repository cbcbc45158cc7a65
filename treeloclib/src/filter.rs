//! File discovery and path classification.
//!
//! This module walks a source tree, prunes excluded directories and returns
//! the files that qualify for counting. It also provides [`PathPatterns`],
//! the separator-agnostic matcher used to tag files as platform or test code.
//!
//! Pruning looks at paths below the scan root. The exception substring and
//! the path categories look at a file's full path, so scanning from inside
//! `arch/` or `acpica/` behaves the same as scanning from above it.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::TreelocError;
use crate::options::ScanConfig;
use crate::Result;

/// Join the normal components of a path with `/`.
///
/// Backslashes inside components are folded to `/` as well, so a pattern
/// written for either separator style matches the same paths.
pub fn normalize_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().replace('\\', "/")),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Path of `path` below `root`, normalized. Falls back to the whole path.
pub fn relative_path(path: &Path, root: &Path) -> String {
    normalize_path(path.strip_prefix(root).unwrap_or(path))
}

/// The directory a scan starts from.
///
/// Keeps the root as given (walked paths are reported relative to it) next
/// to its canonical form (used to build each file's full path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRoot {
    path: PathBuf,
    canonical: PathBuf,
}

impl ScanRoot {
    /// Resolve a scan root. Fails if it is missing or not a directory.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(TreelocError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(TreelocError::NotADirectory(path.to_path_buf()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            canonical: fs::canonicalize(path)?,
        })
    }

    /// The root as given.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Normalized path of a walked entry below the root.
    pub fn relative(&self, path: &Path) -> String {
        relative_path(path, &self.path)
    }

    /// Normalized full path of a walked entry, from the filesystem root.
    pub fn full(&self, path: &Path) -> String {
        match path.strip_prefix(&self.path) {
            Ok(rest) => normalize_path(&self.canonical.join(rest)),
            Err(_) => normalize_path(path),
        }
    }
}

/// Directory patterns matched against the directory part of a path.
///
/// A pattern matches when the directory part contains `pattern/`, i.e. some
/// directory component ends with the pattern (`arch` matches `arch/` and
/// `myarch/` but not a file named `arch.c`). Patterns may span several
/// components (`kernel/arch`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathPatterns {
    needles: Vec<String>,
}

impl PathPatterns {
    /// Build from plain directory patterns.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let needles = patterns
            .into_iter()
            .map(|p| p.as_ref().replace('\\', "/"))
            .map(|p| p.trim_matches('/').to_string())
            .filter(|p| !p.is_empty())
            .map(|p| format!("{p}/"))
            .collect();
        Self { needles }
    }

    /// Whether the directory part of a normalized file path matches.
    pub fn matches(&self, normalized: &str) -> bool {
        let dir = match normalized.rfind('/') {
            Some(idx) => &normalized[..=idx],
            None => return false,
        };
        self.needles.iter().any(|n| dir.contains(n.as_str()))
    }
}

/// Check if a directory should be pruned during traversal.
///
/// `relative` is the directory's normalized path below the scan root; its
/// last component is the directory's own name.
fn should_skip_dir(relative: &str, config: &ScanConfig) -> bool {
    config.is_excluded(relative)
}

/// Discover qualifying files under `root`.
///
/// Walks the directory tree, never entering excluded directories, and
/// returns every file whose extension is allowed and whose full path does
/// not contain the exception substring. The root itself is never pruned.
pub fn discover_files(root: &ScanRoot, config: &ScanConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root.path()).follow_links(false).into_iter();

    for entry in walker.filter_entry(|e| {
        if e.depth() == 0 || !e.file_type().is_dir() {
            return true;
        }
        let relative = root.relative(e.path());
        if should_skip_dir(&relative, config) {
            debug!(dir = %relative, "pruned excluded directory");
            return false;
        }
        true
    }) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !config.has_allowed_extension(&name) {
            continue;
        }

        let full = root.full(path);
        if config.is_exception(&full) {
            debug!(file = %full, "skipped excepted file");
            continue;
        }

        files.push(path.to_path_buf());
    }

    // Sort for deterministic output
    files.sort();

    Ok(files)
}
