//! Per-line heuristics.
//!
//! Lines are classified with two deliberately loose checks rather than a
//! parser: a block-comment continuation check and an `assert` substring
//! check. Both run on every line independently.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::error::TreelocError;
use crate::stats::LineCounts;
use crate::Result;

/// Marker a comment-continuation line starts with once left-trimmed.
const COMMENT_PREFIX: &str = "* ";

/// Marker searched for anywhere in a tab-expanded line.
const COMMENT_INFIX: &str = "   * ";

const ASSERT_MARKER: &str = "assert";

const TAB_WIDTH: usize = 4;

/// Whether a line looks like a block-comment continuation (` * text`).
pub fn is_comment_line(line: &str) -> bool {
    if line.trim_start().starts_with(COMMENT_PREFIX) {
        return true;
    }
    if line.contains('\t') {
        line.replace('\t', &" ".repeat(TAB_WIDTH))
            .contains(COMMENT_INFIX)
    } else {
        line.contains(COMMENT_INFIX)
    }
}

/// Whether a line contains `assert` (case-sensitive, anywhere).
pub fn is_assert_line(line: &str) -> bool {
    line.contains(ASSERT_MARKER)
}

/// Gather line statistics from file content.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. The line count is the
/// number of segments between them, so a trailing newline adds one empty
/// line and empty content is one line. Only `lines`, `comments` and
/// `asserts` are filled in; path categories are applied by the caller.
pub fn gather_stats(content: &str) -> LineCounts {
    let mut stats = LineCounts::new();

    for line in normalize_newlines(content).split('\n') {
        stats.lines += 1;
        if is_comment_line(line) {
            stats.comments += 1;
        }
        if is_assert_line(line) {
            stats.asserts += 1;
        }
    }

    stats
}

fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

/// Read a file and gather its line statistics.
///
/// Fails if the file cannot be read or is not valid UTF-8.
pub fn parse_file(path: impl AsRef<Path>) -> Result<LineCounts> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| TreelocError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| TreelocError::FileDecode {
        path: path.to_path_buf(),
    })?;

    Ok(gather_stats(&content))
}
