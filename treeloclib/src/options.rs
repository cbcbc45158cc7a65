//! Input options for a scan.
//!
//! This module contains the configuration that controls which files are
//! visited and how their paths are classified. The defaults reproduce the
//! reference counting rules for a C/C++/assembly kernel tree.

use serde::{Deserialize, Serialize};

/// Directory-name substrings whose subtrees are never entered.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[".git", ".vs", "Debug", "build"];

/// File extensions that are counted.
pub const DEFAULT_EXTENSIONS: &[&str] = &["c", "h", "cpp", "hpp", "asm", "s"];

/// Path substring of the vendored subsystem left out of every count.
pub const DEFAULT_EXCEPTION: &str = "acpica";

/// Directory names marking architecture-specific code.
pub const DEFAULT_PLATFORM_DIRS: &[&str] = &["arch", "x86"];

/// Directory names marking test code.
pub const DEFAULT_TEST_DIRS: &[&str] = &["test"];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Configuration for a scan.
///
/// All pattern lists are plain substrings, checked in order. Builder methods
/// replace a list wholesale rather than appending to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Substrings that prune a directory when found in its name
    pub exclusions: Vec<String>,
    /// Allowed file extensions (without the leading dot)
    pub extensions: Vec<String>,
    /// Files whose path contains this substring are skipped (empty = none)
    pub exception: String,
    /// Directory patterns marking platform-specific code
    pub platform_dirs: Vec<String>,
    /// Directory patterns marking test code
    pub test_dirs: Vec<String>,
    /// Log and skip unreadable files instead of aborting
    pub skip_unreadable: bool,
    /// Keep per-file statistics in the result
    pub per_file_stats: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclusions: to_strings(DEFAULT_EXCLUSIONS),
            extensions: to_strings(DEFAULT_EXTENSIONS),
            exception: DEFAULT_EXCEPTION.to_string(),
            platform_dirs: to_strings(DEFAULT_PLATFORM_DIRS),
            test_dirs: to_strings(DEFAULT_TEST_DIRS),
            skip_unreadable: false,
            per_file_stats: false,
        }
    }
}

impl ScanConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the exclusion set.
    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the extension allow-list.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the exception substring.
    pub fn exception(mut self, pattern: impl Into<String>) -> Self {
        self.exception = pattern.into();
        self
    }

    /// Replace the platform directory patterns.
    pub fn platform_dirs<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platform_dirs = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the test directory patterns.
    pub fn test_dirs<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.test_dirs = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set per-file error recovery
    pub fn skip_unreadable(mut self, skip: bool) -> Self {
        self.skip_unreadable = skip;
        self
    }

    /// Include per-file statistics in results.
    pub fn with_file_stats(mut self) -> Self {
        self.per_file_stats = true;
        self
    }

    /// Whether a file name's extension is in the allow-list.
    ///
    /// The extension is everything after the last `.`; a name with no dot is
    /// treated as its own extension.
    pub fn has_allowed_extension(&self, file_name: &str) -> bool {
        let ext = file_name.rsplit('.').next().unwrap_or(file_name);
        self.extensions.iter().any(|e| e == ext)
    }

    /// Whether a path falls under the exception substring.
    pub fn is_exception(&self, path: &str) -> bool {
        !self.exception.is_empty() && path.contains(&self.exception)
    }

    /// Whether a directory name or path contains any exclusion substring.
    pub fn is_excluded(&self, dir: &str) -> bool {
        self.exclusions
            .iter()
            .any(|p| !p.is_empty() && dir.contains(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.exclusions, vec![".git", ".vs", "Debug", "build"]);
        assert_eq!(config.extensions, vec!["c", "h", "cpp", "hpp", "asm", "s"]);
        assert_eq!(config.exception, "acpica");
        assert_eq!(config.platform_dirs, vec!["arch", "x86"]);
        assert_eq!(config.test_dirs, vec!["test"]);
        assert!(!config.skip_unreadable);
        assert!(!config.per_file_stats);
    }

    #[test]
    fn test_extension_uses_last_segment() {
        let config = ScanConfig::new();
        assert!(config.has_allowed_extension("main.c"));
        assert!(config.has_allowed_extension("boot.S.s"));
        assert!(config.has_allowed_extension("vector.hpp"));
        assert!(!config.has_allowed_extension("main.c.orig"));
        assert!(!config.has_allowed_extension("README.md"));
        // Case-sensitive
        assert!(!config.has_allowed_extension("start.S"));
    }

    #[test]
    fn test_extension_without_dot_is_whole_name() {
        let config = ScanConfig::new();
        assert!(config.has_allowed_extension("h"));
        assert!(!config.has_allowed_extension("Makefile"));
    }

    #[test]
    fn test_exception() {
        let config = ScanConfig::new();
        assert!(config.is_exception("drivers/acpica/tbxface.c"));
        assert!(config.is_exception("./acpica_glue.c"));
        assert!(!config.is_exception("drivers/acpi/table.c"));

        let none = ScanConfig::new().exception("");
        assert!(!none.is_exception("drivers/acpica/tbxface.c"));
    }

    #[test]
    fn test_excluded_names() {
        let config = ScanConfig::new();
        assert!(config.is_excluded(".git"));
        assert!(config.is_excluded("Debug"));
        assert!(config.is_excluded("build-x86"));
        assert!(!config.is_excluded("kernel"));
        assert!(!config.is_excluded("debug"));
        assert!(config.is_excluded("proj/.vs/cache"));
    }

    #[test]
    fn test_builders_replace_lists() {
        let config = ScanConfig::new()
            .extensions(["rs"])
            .exclude(vec!["target".to_string()])
            .platform_dirs(["arm"])
            .test_dirs(["tests"])
            .skip_unreadable(true)
            .with_file_stats();

        assert_eq!(config.extensions, vec!["rs"]);
        assert_eq!(config.exclusions, vec!["target"]);
        assert_eq!(config.platform_dirs, vec!["arm"]);
        assert_eq!(config.test_dirs, vec!["tests"]);
        assert!(config.skip_unreadable);
        assert!(config.per_file_stats);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = ScanConfig::new().extensions(["c"]);
        let json = serde_json::to_string(&config).unwrap();
        let back: ScanConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
