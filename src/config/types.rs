//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::GithubConfig;
use crate::domain::services::sync_filter::{DEFAULT_EXCLUDED_FRAGMENTS, DEFAULT_EXCLUDED_NAMES};
use crate::domain::services::{SiteMeta, SyncFilter};
use crate::error::FolioResult;
use crate::infrastructure::fs::{expand_home, folio_home_dir};

use super::loader::{self, ConfigWarning};

/// Site-wide settings baked into rendered pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_title")]
    pub title: String,

    #[serde(default)]
    pub author: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_site_title(),
            author: None,
        }
    }
}

fn default_site_title() -> String {
    "Portfolio".to_string()
}

/// Where the page store lives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store directory; `~` is expanded. Defaults to `~/.folio/store`
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Repository defaults; the token only ever comes from the environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubSection {
    #[serde(default)]
    pub repo: Option<String>,

    #[serde(default)]
    pub branch: Option<String>,

    /// `FOLIO_GITHUB_TOKEN`
    #[serde(skip)]
    pub token: Option<String>,
}

/// Which repository files sync treats as pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_exclude_names")]
    pub exclude_names: Vec<String>,

    #[serde(default = "default_exclude_containing")]
    pub exclude_containing: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            exclude_names: default_exclude_names(),
            exclude_containing: default_exclude_containing(),
        }
    }
}

fn default_exclude_names() -> Vec<String> {
    DEFAULT_EXCLUDED_NAMES.iter().map(|s| s.to_string()).collect()
}

fn default_exclude_containing() -> Vec<String> {
    DEFAULT_EXCLUDED_FRAGMENTS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub github: GithubSection,

    #[serde(default)]
    pub sync: SyncConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> FolioResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> FolioResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Project config, else user config, else defaults; env applied on top
    pub fn load_or_default(project_root: Option<&Path>) -> FolioResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (FOLIO_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Resolved store directory
    pub fn store_dir(&self) -> PathBuf {
        match &self.storage.dir {
            Some(dir) => expand_home(dir),
            None => folio_home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".folio")
                .join("store"),
        }
    }

    pub fn site_meta(&self) -> SiteMeta {
        SiteMeta::new(self.site.title.clone())
    }

    pub fn sync_filter(&self) -> SyncFilter {
        SyncFilter {
            excluded_names: self.sync.exclude_names.clone(),
            excluded_fragments: self.sync.exclude_containing.clone(),
        }
    }

    /// Connection from config and environment, when both repo and token are set
    pub fn github_connection(&self) -> Option<GithubConfig> {
        let repo = self.github.repo.clone().filter(|r| !r.is_empty())?;
        let token = self.github.token.clone().filter(|t| !t.is_empty())?;
        let mut config = GithubConfig::new(repo, token);
        config.branch = self.github.branch.clone();
        Some(config)
    }
}
