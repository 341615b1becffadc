//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod file_system;
pub mod github_api;
pub mod key_value_store;

pub use file_system::{FileSystem, FsError, FsResult};
pub use github_api::{FileUpload, GithubApi, GithubError, GithubResult, RepoEntry, TreeEntry};
pub use key_value_store::{is_valid_key, KeyValueStore, StoreError, StoreResult};
