//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain rendering or slug rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Core
//!
//! - `SharedPageStorage` - the page store both editors share, plus GitHub sync
//!
//! ## Use Cases
//!
//! - `PublishUseCase` - Push rendered pages to GitHub and track the publish ledger
//! - `build_site` - Render the site to a local directory
//! - `upload_asset` - Upload an image to the site repository
//! - `export_all` / `import_data` - JSON backups
//! - `migrate_legacy` - Fold per-editor legacy keys into the unified store
//! - `seed_starter_pages` - Outline pages for a new portfolio

pub mod assets;
pub mod build;
pub mod migration;
pub mod publish;
pub mod starter;
pub mod storage;
pub mod transfer;

pub use assets::{sanitize_file_name, upload_asset, UploadedAsset};
pub use build::{build_site, BuildReport};
pub use migration::{migrate_legacy, stage_legacy_dump, MigrationReport, LEGACY_KEYS};
pub use publish::{
    PagePublish, PageStatus, PublishOptions, PublishReport, PublishUseCase, StatusKind,
};
pub use starter::seed_starter_pages;
pub use storage::{
    NewPage, PageFilter, PageStats, PageUpdate, SharedPageStorage, SyncReport, GITHUB_CONFIG_KEY,
    PAGES_KEY, PUBLISH_STATE_KEY,
};
pub use transfer::{export_all, export_page_markdown, import_data, ExportBundle, MarkdownExport};
