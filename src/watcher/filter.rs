//! Base-name filter deciding which new files get uploaded.

use std::path::Path;

use regex::Regex;

use super::WatchError;

/// Regex applied to the base name of a created file.
///
/// Unanchored unless the pattern anchors itself.
#[derive(Debug, Clone)]
pub struct FileFilter {
    regex: Regex,
}

impl FileFilter {
    pub fn new(pattern: &str) -> Result<Self, WatchError> {
        let regex = Regex::new(pattern).map_err(|source| WatchError::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Match on the final component of `path`.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.matches_name(&name.to_string_lossy()))
            .unwrap_or(false)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
