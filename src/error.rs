//! Error types for Folio
//!
//! Library code returns `FolioError`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{FsError, GithubError, StoreError};
use crate::domain::value_objects::PageId;

/// Result type alias for Folio operations
pub type FolioResult<T> = Result<T, FolioError>;

/// Main error type for Folio operations
#[derive(Error, Debug)]
pub enum FolioError {
    /// Underlying key-value store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// GitHub API call failed
    #[error(transparent)]
    Github(#[from] GithubError),

    /// Writing site output failed
    #[error(transparent)]
    Fs(#[from] FsError),

    /// A stored value could not be decoded
    #[error("store key '{key}' is corrupted: {message}\n  → Fix: run 'folio reset --yes' or import a backup")]
    CorruptStore { key: String, message: String },

    /// No page with the given id
    #[error("page not found: {id}")]
    PageNotFound { id: PageId },

    /// A parent link would break the page tree
    #[error("cannot move page {id} under {parent}: {reason}")]
    InvalidParent {
        id: PageId,
        parent: PageId,
        reason: String,
    },

    /// Sync or publish requested without a GitHub connection
    #[error("GitHub not configured\n  → Run: folio github connect --repo owner/name --token <token>")]
    GithubNotConfigured,

    /// Path managed outside the page store
    #[error("refusing to publish '{path}': it is maintained separately")]
    ReservedPath { path: String },

    /// Page path that would land outside the site root
    #[error("invalid page path '{path}': expected a plain file name like 'about.html'")]
    InvalidPath { path: String },

    /// Import payload rejected
    #[error("invalid import data: {0}")]
    InvalidImport(String),

    /// Configuration file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
