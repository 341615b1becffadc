//! Publish Result
//!
//! Result types for publish operations.

use serde::Serialize;

use crate::domain::value_objects::PageId;

/// Result of publishing every page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    /// Paths included in the commit (or that would be, on a dry run)
    pub published: Vec<String>,
    /// Paths whose content matches the ledger
    pub unchanged: Vec<String>,
    /// Paths left out because they are maintained separately
    pub reserved: Vec<String>,
    /// Paths that are not plain file names
    pub rejected: Vec<String>,
    /// Sha of the new commit; `None` when nothing was pushed
    pub commit: Option<String>,
    pub dry_run: bool,
}

impl PublishReport {
    pub fn has_changes(&self) -> bool {
        !self.published.is_empty()
    }
}

/// Result of publishing a single page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagePublish {
    pub id: PageId,
    pub path: String,
    /// True when the file did not exist on the branch before
    pub created: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Never published
    New,
    /// Published, but the rendered HTML has changed since
    Modified,
}

/// A page with unpublished changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageStatus {
    pub id: PageId,
    pub title: String,
    pub path: String,
    pub kind: StatusKind,
}
