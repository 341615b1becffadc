//! Publish ledger - what was last pushed to GitHub
//!
//! A pure data structure keyed by published path. It plays the role a
//! lockfile plays for deployed files: comparing a fresh render against the
//! recorded hash tells whether a page has unpublished changes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ContentHash;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub files: BTreeMap<String, ContentHash>,
}

impl PublishState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&ContentHash> {
        self.files.get(path)
    }

    pub fn record(&mut self, path: impl Into<String>, hash: ContentHash, at: DateTime<Utc>) {
        self.files.insert(path.into(), hash);
        self.published_at = Some(at);
    }

    /// True when `path` was never published or was published with other content
    pub fn is_changed(&self, path: &str, hash: &ContentHash) -> bool {
        self.files.get(path) != Some(hash)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
