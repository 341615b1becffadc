//! GithubApi port - the slice of the GitHub REST API Folio relies on
//!
//! Every call takes the connection settings explicitly, so one client can
//! serve whatever configuration the store currently holds.
//!
//! Implementations:
//! - `HttpGithubClient` - blocking HTTP against api.github.com
//! - in-memory fakes in tests

use serde::{Deserialize, Serialize};

use crate::domain::entities::GithubConfig;

/// Result type for GitHub operations
pub type GithubResult<T> = Result<T, GithubError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GithubError {
    /// Non-success HTTP status; `message` is GitHub's error message when present
    #[error("GitHub API request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("could not reach GitHub: {0}")]
    Transport(String),

    #[error("unexpected GitHub response: {0}")]
    Decode(String),
}

impl GithubError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GithubError::Api { status: 404, .. })
    }
}

/// One entry of a repository directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub sha: String,
    /// `file`, `dir`, `symlink` or `submodule`
    #[serde(rename = "type", default = "default_entry_type")]
    pub kind: String,
}

fn default_entry_type() -> String {
    "file".to_string()
}

impl RepoEntry {
    pub fn file(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
            sha: String::new(),
            kind: default_entry_type(),
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == "file"
    }
}

/// A blob reference inside a new tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    pub path: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sha: String,
}

impl TreeEntry {
    /// Regular (non-executable) file blob
    pub fn blob(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: "100644".to_string(),
            kind: "blob".to_string(),
            sha: sha.into(),
        }
    }
}

/// Create-or-update request for the contents API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub path: String,
    pub message: String,
    /// Base64 encoded file body
    pub content_base64: String,
    pub branch: String,
    /// Current blob sha when replacing an existing file
    pub sha: Option<String>,
}

pub trait GithubApi {
    /// Confirm the repository is reachable with these credentials
    fn check_repository(&self, config: &GithubConfig) -> GithubResult<()>;

    /// List a directory (`""` for the repository root)
    fn list_contents(&self, config: &GithubConfig, path: &str) -> GithubResult<Vec<RepoEntry>>;

    /// Commit sha the branch points at
    fn branch_head(&self, config: &GithubConfig, branch: &str) -> GithubResult<String>;

    /// Tree sha of a commit
    fn commit_tree(&self, config: &GithubConfig, commit_sha: &str) -> GithubResult<String>;

    /// Store a UTF-8 blob and return its sha
    fn create_blob(&self, config: &GithubConfig, content: &str) -> GithubResult<String>;

    /// Create a tree layered over `base_tree`; returns the new tree sha
    fn create_tree(
        &self,
        config: &GithubConfig,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> GithubResult<String>;

    /// Create a commit; returns its sha
    fn create_commit(
        &self,
        config: &GithubConfig,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> GithubResult<String>;

    /// Fast-forward `branch` to `sha` (never forced)
    fn update_branch(&self, config: &GithubConfig, branch: &str, sha: &str) -> GithubResult<()>;

    /// Blob sha of a file on a branch, `None` when the file does not exist
    fn file_sha(
        &self,
        config: &GithubConfig,
        path: &str,
        branch: &str,
    ) -> GithubResult<Option<String>>;

    /// Create or replace a single file through the contents API
    fn put_file(&self, config: &GithubConfig, upload: &FileUpload) -> GithubResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_entry_parses_listing() {
        let entries: Vec<RepoEntry> = serde_json::from_str(
            r#"[
                {"name":"about.html","path":"about.html","sha":"abc","type":"file","size":10},
                {"name":"assets","path":"assets","sha":"def","type":"dir"}
            ]"#,
        )
        .unwrap();
        assert!(entries[0].is_file());
        assert!(!entries[1].is_file());
    }

    #[test]
    fn tree_entry_serializes_git_fields() {
        let json = serde_json::to_value(TreeEntry::blob("a.html", "123")).unwrap();
        assert_eq!(json["mode"], "100644");
        assert_eq!(json["type"], "blob");
    }

    #[test]
    fn not_found_detection() {
        let err = GithubError::Api {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!GithubError::Transport("x".to_string()).is_not_found());
    }
}
