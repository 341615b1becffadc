//! Page entity - one document shared by both editors
//!
//! Serialized with camelCase keys so the store stays readable by the
//! browser editors that wrote the same records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EditorDocument;
use crate::domain::value_objects::{generate_path, generate_slug, EditorSource, PageId};

/// Title used when a page is created without one
pub const DEFAULT_TITLE: &str = "Untitled";

/// Both editors' content for a page
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default)]
    pub markdown: String,
    #[serde(default)]
    pub editorjs: EditorDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub created_with: EditorSource,
    pub last_edited_with: EditorSource,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A file attached to a page, stored inline as a data URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
    pub data: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub slug: String,
    pub path: String,
    #[serde(default)]
    pub content: PageContent,
    pub metadata: PageMetadata,
    #[serde(default)]
    pub parent_id: Option<PageId>,
    #[serde(default)]
    pub children: Vec<PageId>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Page {
    /// Build a page with title-derived slug and path
    pub fn new(id: PageId, title: &str, source: EditorSource, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.to_string(),
            slug: generate_slug(title),
            path: generate_path(title),
            content: PageContent::default(),
            metadata: PageMetadata {
                created_with: source,
                last_edited_with: source,
                created_at: now,
                updated_at: now,
            },
            parent_id: None,
            children: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Replace the title along with its derived slug and path
    pub fn retitle(&mut self, title: &str) {
        self.title = title.to_string();
        self.slug = generate_slug(title);
        self.path = generate_path(title);
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether the block document is the page's authoritative body
    pub fn uses_blocks(&self) -> bool {
        self.metadata.last_edited_with == EditorSource::Edit
            || (self.content.markdown.trim().is_empty() && !self.content.editorjs.is_empty())
    }
}
