//! Core data structures for scan statistics

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

/// Counters accumulated over a scan.
///
/// `platform` and `tests` are independent subsets of `lines`: a file under
/// both an architecture and a test directory contributes to each.
/// `comments` and `asserts` count lines, not occurrences, and may overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    /// Number of files counted
    pub file_count: u64,
    /// Total lines
    pub lines: u64,
    /// Lines in platform-specific files
    pub platform: u64,
    /// Lines in test files
    pub tests: u64,
    /// Lines matching the comment heuristic
    pub comments: u64,
    /// Lines containing "assert"
    pub asserts: u64,
}

impl LineCounts {
    /// Create new empty counts
    pub fn new() -> Self {
        Self::default()
    }
}

impl Add for LineCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            file_count: self.file_count + other.file_count,
            lines: self.lines + other.lines,
            platform: self.platform + other.platform,
            tests: self.tests + other.tests,
            comments: self.comments + other.comments,
            asserts: self.asserts + other.asserts,
        }
    }
}

impl AddAssign for LineCounts {
    fn add_assign(&mut self, other: Self) {
        self.file_count += other.file_count;
        self.lines += other.lines;
        self.platform += other.platform;
        self.tests += other.tests;
        self.comments += other.comments;
        self.asserts += other.asserts;
    }
}

/// Statistics for a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    /// Path to the file
    pub path: PathBuf,
    /// Counts for this file
    pub stats: LineCounts,
}

impl FileStats {
    /// Create new file stats
    pub fn new(path: PathBuf, stats: LineCounts) -> Self {
        Self { path, stats }
    }
}

/// Percentage of `part` in `total`, rounded to one decimal place.
///
/// An empty total yields `0.0`.
pub fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = part as f64 * 100.0 / total as f64;
    // Round through the decimal formatter so the stored value is exactly
    // what the report prints.
    format!("{pct:.1}").parse().unwrap_or(pct)
}

/// Report-ready view of the counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Files counted
    pub files: u64,
    /// Total lines
    pub total_lines: u64,
    /// Lines in platform-specific files
    pub platform_lines: u64,
    /// Platform share of total, in percent
    pub platform_pct: f64,
    /// Assertion lines as a share of total, in percent
    pub assert_pct: f64,
    /// Comment lines as a share of total, in percent
    pub comment_pct: f64,
    /// Test lines as a share of total, in percent
    pub test_pct: f64,
}

impl Summary {
    /// Compute percentages from accumulated counts
    pub fn from_counts(counts: &LineCounts) -> Self {
        let total = counts.lines;
        Self {
            files: counts.file_count,
            total_lines: total,
            platform_lines: counts.platform,
            platform_pct: percent(counts.platform, total),
            assert_pct: percent(counts.asserts, total),
            comment_pct: percent(counts.comments, total),
            test_pct: percent(counts.tests, total),
        }
    }
}
