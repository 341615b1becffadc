//! GitHub connection settings stored alongside the pages

use serde::{Deserialize, Serialize};

/// Branch used when none is configured
pub const DEFAULT_BRANCH: &str = "main";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubConfig {
    /// `owner/name`
    pub repo: String,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl GithubConfig {
    pub fn new(repo: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            token: token.into(),
            branch: None,
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn branch(&self) -> &str {
        self.branch
            .as_deref()
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_BRANCH)
    }

    pub fn owner(&self) -> &str {
        self.repo.split('/').next().unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.repo.split('/').nth(1).unwrap_or_default()
    }

    /// GitHub Pages base URL (`https://owner.github.io/name`)
    pub fn pages_url(&self) -> String {
        format!("https://{}.github.io/{}", self.owner(), self.name())
    }
}

// Keeps the token out of logs and debug output.
impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("repo", &self.repo)
            .field("token", &"***")
            .field("branch", &self.branch)
            .finish()
    }
}
