//! EditorSource value object - which front-end produced or last touched a page
//!
//! - `Cms` - the markdown editor
//! - `Edit` - the block editor
//! - `Github` - discovered in the remote repository by sync

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Origin of a page or of its latest edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EditorSource {
    /// Markdown editor
    #[default]
    Cms,
    /// Block editor
    Edit,
    /// Synced from GitHub
    Github,
}

impl EditorSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorSource::Cms => "cms",
            EditorSource::Edit => "edit",
            EditorSource::Github => "github",
        }
    }
}

impl std::fmt::Display for EditorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cms" | "markdown" => Ok(EditorSource::Cms),
            "edit" | "blocks" => Ok(EditorSource::Edit),
            "github" => Ok(EditorSource::Github),
            other => Err(format!(
                "unknown editor source '{}' (expected cms, edit or github)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EditorSource::Github).unwrap(),
            "\"github\""
        );
        let parsed: EditorSource = serde_json::from_str("\"edit\"").unwrap();
        assert_eq!(parsed, EditorSource::Edit);
    }

    #[test]
    fn from_str_accepts_aliases() {
        assert_eq!("Markdown".parse::<EditorSource>(), Ok(EditorSource::Cms));
        assert_eq!("blocks".parse::<EditorSource>(), Ok(EditorSource::Edit));
        assert!("word".parse::<EditorSource>().is_err());
    }

    #[test]
    fn default_is_cms() {
        assert_eq!(EditorSource::default(), EditorSource::Cms);
    }
}
