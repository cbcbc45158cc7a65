//! # treeloclib
//!
//! A source-tree line counter that reports how much of a tree is
//! platform-specific, commented, asserted and tested.
//!
//! ## Overview
//!
//! A scan walks a directory tree, skips excluded subtrees and counts every
//! file whose extension is allowed. Each counted file contributes:
//!
//! - **Lines**: the number of `\n`-separated segments in the file
//! - **Platform**: all of its lines, if it lives under an architecture directory
//! - **Tests**: all of its lines, if it lives under a test directory
//! - **Comments**: lines that look like block-comment continuations (` * ...`)
//! - **Asserts**: lines containing `assert`
//!
//! The heuristics are intentionally rough: nothing is parsed.
//!
//! ## Example
//!
//! ```rust
//! use treeloclib::{render_summary, scan_directory, ScanConfig};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::create_dir_all(dir.path().join("kernel/arch")).unwrap();
//! fs::write(dir.path().join("kernel/arch/cpu.c"), "int x;\nassert(x);").unwrap();
//!
//! let result = scan_directory(dir.path(), &ScanConfig::new()).unwrap();
//! assert_eq!(result.total.lines, 2);
//! assert_eq!(result.total.platform, 2);
//! assert_eq!(result.total.asserts, 1);
//!
//! let report = render_summary(&result.summary());
//! assert!(report.starts_with("2 lines (of those, 2, or 100.0% are platform specific)"));
//! ```

pub mod counter;
pub mod error;
pub mod filter;
pub mod options;
pub mod stats;
pub mod table;
pub mod visitor;

pub use counter::{count_file, scan_directory, ScanResult};
pub use error::TreelocError;
pub use filter::{discover_files, PathPatterns, ScanRoot};
pub use options::ScanConfig;
pub use stats::{percent, FileStats, LineCounts, Summary};
pub use table::{render_summary, FileTable, TableRow, EXCEPTION_NOTE};
pub use visitor::{gather_stats, is_assert_line, is_comment_line, parse_file};

/// Result type for treeloclib operations
pub type Result<T> = std::result::Result<T, TreelocError>;
