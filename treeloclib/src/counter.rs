//! High-level scan API.
//!
//! This module ties discovery, per-line heuristics and path classification
//! together into a single pass over a source tree.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, trace, warn};

use crate::filter::{discover_files, normalize_path, PathPatterns, ScanRoot};
use crate::options::ScanConfig;
use crate::stats::{FileStats, LineCounts, Summary};
use crate::visitor::parse_file;
use crate::Result;

/// Result of scanning a directory tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Aggregated counts across all files
    pub total: LineCounts,
    /// Per-file statistics (if requested)
    pub files: Vec<FileStats>,
    /// Files skipped because they could not be read
    pub skipped: Vec<std::path::PathBuf>,
}

impl ScanResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentages derived from the totals.
    pub fn summary(&self) -> Summary {
        Summary::from_counts(&self.total)
    }
}

/// Path categories applied to a file's line count.
#[derive(Debug, Clone)]
struct Classifier {
    platform: PathPatterns,
    tests: PathPatterns,
}

impl Classifier {
    fn new(config: &ScanConfig) -> Self {
        Self {
            platform: PathPatterns::new(&config.platform_dirs),
            tests: PathPatterns::new(&config.test_dirs),
        }
    }

    /// Fill in file count and path categories for one file's line stats.
    ///
    /// `full_path` is the file's normalized path from the filesystem root.
    fn classify(&self, full_path: &str, mut stats: LineCounts) -> LineCounts {
        stats.file_count = 1;
        if self.tests.matches(full_path) {
            stats.tests = stats.lines;
        }
        if self.platform.matches(full_path) {
            stats.platform = stats.lines;
        }
        stats
    }
}

/// Scan a directory tree.
///
/// This is the main entry point. It:
/// 1. Discovers qualifying files, pruning excluded directories
/// 2. Reads each file and applies the comment and assert heuristics
/// 3. Tags each file as platform and/or test code by its full path
/// 4. Folds everything into one set of counters
///
/// # Example
///
/// ```rust,ignore
/// use treeloclib::{scan_directory, ScanConfig};
///
/// let result = scan_directory(".", &ScanConfig::new())?;
/// println!("{} lines", result.total.lines);
/// ```
pub fn scan_directory(path: impl AsRef<Path>, config: &ScanConfig) -> Result<ScanResult> {
    let root = ScanRoot::new(path)?;
    let files = discover_files(&root, config)?;
    let classifier = Classifier::new(config);

    let mut result = ScanResult::new();

    for file_path in files {
        let stats = match parse_file(&file_path) {
            Ok(stats) => stats,
            Err(err) if config.skip_unreadable => {
                warn!(error = %err, "skipping unreadable file");
                result.skipped.push(file_path);
                continue;
            }
            Err(err) => return Err(err),
        };

        let full = root.full(&file_path);
        let stats = classifier.classify(&full, stats);
        trace!(file = %full, lines = stats.lines, "counted file");

        result.total += stats;
        if config.per_file_stats {
            result.files.push(FileStats::new(file_path, stats));
        }
    }

    if result.total.lines == 0 {
        warn!(root = %root.path().display(), "no qualifying lines found");
    }
    info!(
        files = result.total.file_count,
        lines = result.total.lines,
        "scan complete"
    );

    Ok(result)
}

/// Count a single file, tagging it by its full path.
///
/// The extension and exception filters are not applied; they only decide
/// which files a directory scan visits.
///
/// # Example
///
/// ```rust,ignore
/// use treeloclib::{count_file, ScanConfig};
///
/// let stats = count_file("kernel/arch/x86/cpu.c", &ScanConfig::new())?;
/// assert_eq!(stats.platform, stats.lines);
/// ```
pub fn count_file(path: impl AsRef<Path>, config: &ScanConfig) -> Result<LineCounts> {
    let path = path.as_ref();
    let stats = parse_file(path)?;
    let full = normalize_path(&fs::canonicalize(path)?);
    Ok(Classifier::new(config).classify(&full, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TreelocError;
    use std::fs;
    use tempfile::tempdir;

    fn create_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn create_kernel_tree(root: &Path) {
        // 3 lines, 1 comment, 1 assert
        create_file(
            root,
            "kernel/a.c",
            "int x;\n   * continued comment\nassert(x);",
        );
        // 3 lines (trailing newline), 1 comment
        create_file(root, "kernel/b.cpp", "* top\nnormal\n");
        // 2 lines, platform
        create_file(root, "kernel/arch/x86/cpu.c", "void cpu(void);\n");
        // 4 lines, test
        create_file(
            root,
            "kernel/test/sleep.c",
            "void t(void) {\n    assert(1);\n}\n",
        );
        // 1 line, excluded by exception
        create_file(root, "drivers/acpica/tbxface.c", "assert(0);");
        // pruned
        create_file(root, ".git/objects/x.c", "assert(0);\n");
        create_file(root, "build/out/gen.h", "assert(0);\n");
        // wrong extension
        create_file(root, "README.md", "* not counted\n");
    }

    #[test]
    fn test_scan_directory() {
        let temp = tempdir().unwrap();
        create_kernel_tree(temp.path());

        let result = scan_directory(temp.path(), &ScanConfig::new()).unwrap();

        assert_eq!(result.total.file_count, 4);
        assert_eq!(result.total.lines, 12);
        assert_eq!(result.total.platform, 2);
        assert_eq!(result.total.tests, 4);
        assert_eq!(result.total.comments, 2);
        assert_eq!(result.total.asserts, 2);
        assert!(result.files.is_empty());
    }

    #[test]
    fn test_scan_with_file_stats() {
        let temp = tempdir().unwrap();
        create_kernel_tree(temp.path());

        let config = ScanConfig::new().with_file_stats();
        let result = scan_directory(temp.path(), &config).unwrap();

        assert_eq!(result.files.len(), 4);
        let sum = result
            .files
            .iter()
            .fold(LineCounts::new(), |acc, f| acc + f.stats);
        assert_eq!(sum, result.total);
    }

    #[test]
    fn test_platform_and_test_overlap() {
        let temp = tempdir().unwrap();
        create_file(temp.path(), "arch/test/boot.s", "mov eax, 1\nret");

        let result = scan_directory(temp.path(), &ScanConfig::new()).unwrap();

        assert_eq!(result.total.lines, 2);
        assert_eq!(result.total.platform, 2);
        assert_eq!(result.total.tests, 2);
    }

    #[test]
    fn test_subsets_never_exceed_total() {
        let temp = tempdir().unwrap();
        create_kernel_tree(temp.path());
        create_file(temp.path(), "x86/test/arch/deep.h", "a\nb\nc");

        let result = scan_directory(temp.path(), &ScanConfig::new()).unwrap();

        assert!(result.total.platform <= result.total.lines);
        assert!(result.total.tests <= result.total.lines);
    }

    #[test]
    fn test_exception_contributes_nothing() {
        let temp = tempdir().unwrap();
        create_file(temp.path(), "drivers/acpica/a.c", "assert(1);\n * c\n");

        let result = scan_directory(temp.path(), &ScanConfig::new()).unwrap();

        assert_eq!(result.total, LineCounts::new());
    }

    #[test]
    fn test_scan_is_idempotent() {
        let temp = tempdir().unwrap();
        create_kernel_tree(temp.path());

        let config = ScanConfig::new();
        let first = scan_directory(temp.path(), &config).unwrap();
        let second = scan_directory(temp.path(), &config).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_tree() {
        let temp = tempdir().unwrap();

        let result = scan_directory(temp.path(), &ScanConfig::new()).unwrap();
        let summary = result.summary();

        assert_eq!(result.total.lines, 0);
        assert_eq!(summary.platform_pct, 0.0);
        assert_eq!(summary.test_pct, 0.0);
    }

    #[test]
    fn test_unreadable_file_aborts() {
        let temp = tempdir().unwrap();
        create_file(temp.path(), "ok.c", "int x;");
        fs::write(temp.path().join("bad.c"), [0xc3, 0x28]).unwrap();

        let result = scan_directory(temp.path(), &ScanConfig::new());
        assert!(matches!(result, Err(TreelocError::FileDecode { .. })));
    }

    #[test]
    fn test_unreadable_file_skipped_when_configured() {
        let temp = tempdir().unwrap();
        create_file(temp.path(), "ok.c", "int x;");
        fs::write(temp.path().join("bad.c"), [0xc3, 0x28]).unwrap();

        let config = ScanConfig::new().skip_unreadable(true);
        let result = scan_directory(temp.path(), &config).unwrap();

        assert_eq!(result.total.file_count, 1);
        assert_eq!(result.total.lines, 1);
        assert_eq!(result.skipped.len(), 1);
        assert!(result.skipped[0].ends_with("bad.c"));
    }

    #[test]
    fn test_custom_config() {
        let temp = tempdir().unwrap();
        create_file(temp.path(), "src/lib.rs", "fn a() {}\n");
        create_file(temp.path(), "tests/it.rs", "assert!(true);\n");
        create_file(temp.path(), "target/debug/gen.rs", "x\n");
        create_file(temp.path(), "src/main.c", "int main;\n");

        let config = ScanConfig::new()
            .extensions(["rs"])
            .exclude(["target"])
            .test_dirs(["tests"])
            .platform_dirs(Vec::<String>::new());
        let result = scan_directory(temp.path(), &config).unwrap();

        assert_eq!(result.total.file_count, 2);
        assert_eq!(result.total.lines, 4);
        assert_eq!(result.total.tests, 2);
        assert_eq!(result.total.platform, 0);
        assert_eq!(result.total.asserts, 1);
    }

    #[test]
    fn test_scan_from_inside_platform_directory() {
        let temp = tempdir().unwrap();
        create_file(temp.path(), "kernel/arch/cpu.c", "a\nb");

        let result = scan_directory(temp.path().join("kernel/arch"), &ScanConfig::new()).unwrap();

        assert_eq!(result.total.lines, 2);
        assert_eq!(result.total.platform, 2);
        assert_eq!(result.total.tests, 0);
    }

    #[test]
    fn test_scan_from_inside_test_directory() {
        let temp = tempdir().unwrap();
        create_file(temp.path(), "kernel/test/t.c", "assert(1);\n");

        let result = scan_directory(temp.path().join("kernel/test"), &ScanConfig::new()).unwrap();

        assert_eq!(result.total.lines, 2);
        assert_eq!(result.total.tests, 2);
    }

    #[test]
    fn test_scan_from_inside_excepted_directory() {
        let temp = tempdir().unwrap();
        create_file(temp.path(), "drivers/acpica/tb.c", "a\nb");

        let result =
            scan_directory(temp.path().join("drivers/acpica"), &ScanConfig::new()).unwrap();

        assert_eq!(result.total, LineCounts::new());
    }

    #[test]
    fn test_count_file() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("arch/x86/cpu.c");
        create_file(temp.path(), "arch/x86/cpu.c", "a\nb\n");

        let stats = count_file(&file, &ScanConfig::new()).unwrap();

        assert_eq!(stats.file_count, 1);
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.platform, 3);
        assert_eq!(stats.tests, 0);
    }

    #[test]
    fn test_count_missing_file() {
        let result = count_file("/nonexistent/cpu.c", &ScanConfig::new());
        assert!(matches!(result, Err(TreelocError::FileRead { .. })));
    }
}
