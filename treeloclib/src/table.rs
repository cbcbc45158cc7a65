//! Report-ready data structures.
//!
//! [`FileTable`] is a per-file breakdown with display-ready values that the
//! CLI lays out as text or serializes to JSON. [`render_summary`] produces the
//! fixed three-line text report.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::counter::ScanResult;
use crate::filter::relative_path;
use crate::stats::{LineCounts, Summary};

/// Note printed after every text summary.
pub const EXCEPTION_NOTE: &str = "(does not include ACPICA)";

/// Render the three-line text summary.
pub fn render_summary(summary: &Summary) -> String {
    format!(
        "{} lines (of those, {}, or {:.1}% are platform specific)\n\
         {:.1}% asserts,  {:.1}% comments,  {:.1}% tests\n\
         {}\n",
        summary.total_lines,
        summary.platform_lines,
        summary.platform_pct,
        summary.assert_pct,
        summary.comment_pct,
        summary.test_pct,
        EXCEPTION_NOTE,
    )
}

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Row label (file path or "Total (N files)")
    pub label: String,
    /// Values for each column, ready for display
    pub values: Vec<String>,
}

impl TableRow {
    fn from_counts(label: String, counts: &LineCounts) -> Self {
        let values = [
            counts.lines,
            counts.platform,
            counts.tests,
            counts.comments,
            counts.asserts,
        ]
        .iter()
        .map(|v| v.to_string())
        .collect();
        Self { label, values }
    }
}

/// Per-file breakdown of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTable {
    /// Column headers: [label_header, column1, column2, ...]
    pub headers: Vec<String>,
    /// Data rows, one per file
    pub rows: Vec<TableRow>,
    /// Summary/footer row
    pub footer: TableRow,
}

impl FileTable {
    /// Build a table from a scan result. Paths are shown relative to `root`.
    pub fn from_result(result: &ScanResult, root: &Path) -> Self {
        let headers = ["File", "Lines", "Platform", "Tests", "Comments", "Asserts"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = result
            .files
            .iter()
            .map(|f| TableRow::from_counts(relative_path(&f.path, root), &f.stats))
            .collect();

        let footer = TableRow::from_counts(
            format!("Total ({} files)", result.total.file_count),
            &result.total,
        );

        Self {
            headers,
            rows,
            footer,
        }
    }
}
