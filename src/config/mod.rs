//! Configuration module for Folio
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (FOLIO_*)
//! 3. Project config (./folio.toml)
//! 4. User config (~/.config/folio/config.toml)
//! 5. Built-in defaults (lowest priority)
//!
//! The first config file found is used; files are not merged.

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{Config, GithubSection, SiteConfig, StorageConfig, SyncConfig};
