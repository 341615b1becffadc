//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `store/` - KeyValueStore implementations (JSON files, memory)
//! - `github/` - GithubApi over blocking HTTP
//! - `fs/` - Local file system, atomic writes, home directory

pub mod fs;
pub mod github;
pub mod store;

// Re-export for convenience
pub use fs::{folio_home_dir, LocalFs};
pub use github::HttpGithubClient;
pub use store::{JsonFileStore, MemoryStore};
