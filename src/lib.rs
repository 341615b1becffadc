//! Folio - a personal portfolio content manager
//!
//! Pages are shared between a markdown editor and a block editor through one
//! unified store, rendered to static HTML and published to a GitHub Pages
//! repository.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{NewPage, PageFilter, PageUpdate, PublishUseCase, SharedPageStorage};
pub use config::Config;
pub use domain::entities::{EditorDocument, GithubConfig, Page};
pub use domain::value_objects::{EditorSource, PageId};
pub use error::{FolioError, FolioResult};
