//! Domain Entities
//!
//! - `Page` - a document shared by the markdown and block editors
//! - `EditorDocument` - block editor content
//! - `GithubConfig` - connection settings for the remote repository
//! - `PublishState` - ledger of what was last pushed

mod editor_document;
mod github_config;
mod page;
mod publish_state;

pub use editor_document::{Block, BlockData, ChecklistItem, EditorDocument};
pub use github_config::{GithubConfig, DEFAULT_BRANCH};
pub use page::{Attachment, Page, PageContent, PageMetadata, DEFAULT_TITLE};
pub use publish_state::PublishState;
