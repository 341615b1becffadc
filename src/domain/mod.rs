//! Domain Layer
//!
//! Pure page-model logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Page, EditorDocument, GithubConfig, PublishState
//! - `value_objects/` - PageId, EditorSource, slugs, ContentHash
//! - `services/` - HTML rendering, sync filtering
//! - `ports/` - KeyValueStore and GithubApi interfaces
//!
//! All I/O goes through the traits in `ports/`.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
