//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{FolioError, FolioResult};
use crate::infrastructure::fs::folio_home_dir;

use super::types::Config;

/// Project config file name, looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "folio.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> FolioResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| FolioError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let (section, key) = match path_str.rsplit_once('.') {
                Some((section, key)) => (Some(section), key),
                None => (None, path_str.as_str()),
            };
            ConfigWarning {
                key: key.to_string(),
                file: path.to_path_buf(),
                line: find_line_number(&content, key),
                suggestion: suggest_key(section, key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Project config, else user config, else defaults; env applied on top.
///
/// A config file that exists but does not parse is an error rather than
/// silently falling back.
pub fn load_or_default(project_root: Option<&Path>) -> FolioResult<(Config, Vec<ConfigWarning>)> {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .into_iter()
        .chain(user_config_path());

    for path in candidates {
        if path.is_file() {
            debug!(path = %path.display(), "loading config");
            let (config, warnings) = load_with_warnings(&path)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// Apply environment variable overrides (FOLIO_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    if let Some(dir) = env_value("FOLIO_STORE_DIR") {
        config.storage.dir = Some(PathBuf::from(dir));
    }
    if let Some(title) = env_value("FOLIO_SITE_TITLE") {
        config.site.title = title;
    }
    if let Some(repo) = env_value("FOLIO_GITHUB_REPO") {
        config.github.repo = Some(repo);
    }
    if let Some(branch) = env_value("FOLIO_GITHUB_BRANCH") {
        config.github.branch = Some(branch);
    }
    if let Some(token) = env_value("FOLIO_GITHUB_TOKEN") {
        config.github.token = Some(token);
    }
    config
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// `$XDG_CONFIG_HOME/folio/config.toml`, else `~/.config/folio/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| folio_home_dir().map(|h| h.join(".config")))
        .map(|dir| dir.join("folio").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

/// Keys accepted in each table of the config file
const SECTIONS: &[(&str, &[&str])] = &[
    ("site", &["title", "author"]),
    ("storage", &["dir"]),
    ("github", &["repo", "branch"]),
    ("sync", &["exclude_names", "exclude_containing"]),
];

/// Closest valid key at the same level: table names at the top, the
/// table's own keys inside `[section]`
fn suggest_key(section: Option<&str>, unknown: &str) -> Option<String> {
    let candidates: Vec<&str> = match section {
        None => SECTIONS.iter().map(|(name, _)| *name).collect(),
        Some(section) => SECTIONS
            .iter()
            .find(|(name, _)| *name == section)
            .map(|(_, keys)| keys.to_vec())
            .unwrap_or_default(),
    };

    candidates
        .into_iter()
        .map(|candidate| (candidate, levenshtein(unknown, candidate)))
        .filter(|(_, dist)| *dist <= 2)
        .min_by_key(|(_, dist)| *dist)
        .map(|(candidate, _)| candidate.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
