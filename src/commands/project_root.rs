use std::path::{Path, PathBuf};

use folio::config::PROJECT_CONFIG_FILE;

/// Directory whose `folio.toml` applies to an invocation from `start`.
///
/// Walks upward and stops at the first directory holding `folio.toml`, or
/// at a git root. Falls back to `start`.
pub(crate) fn discover_project_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(PROJECT_CONFIG_FILE).is_file() {
            return dir.to_path_buf();
        }
        if dir.join(".git").exists() {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}
