//! Which remote files count as pages during sync

use crate::domain::ports::RepoEntry;

/// File names never imported as pages
pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &["index.html", "cms.html"];

/// Name fragments that mark a file as a non-page
pub const DEFAULT_EXCLUDED_FRAGMENTS: &[&str] = &["mockup"];

/// Exclusion rules applied to a repository listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFilter {
    pub excluded_names: Vec<String>,
    pub excluded_fragments: Vec<String>,
}

impl Default for SyncFilter {
    fn default() -> Self {
        Self {
            excluded_names: DEFAULT_EXCLUDED_NAMES.iter().map(|s| s.to_string()).collect(),
            excluded_fragments: DEFAULT_EXCLUDED_FRAGMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SyncFilter {
    /// An HTML file that is neither excluded by name nor by fragment
    pub fn is_syncable(&self, entry: &RepoEntry) -> bool {
        entry.is_file()
            && entry.name.ends_with(".html")
            && !self.excluded_names.iter().any(|n| n == &entry.name)
            && !self
                .excluded_fragments
                .iter()
                .any(|f| entry.name.contains(f.as_str()))
    }
}
