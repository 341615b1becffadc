//! Image uploads to the site repository
//!
//! Files land under `assets/images/` with a millisecond prefix so repeated
//! uploads of the same name never collide.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use tracing::info;

use crate::domain::entities::GithubConfig;
use crate::domain::ports::{FileUpload, GithubApi};
use crate::error::FolioResult;

/// Repository directory for uploaded images
pub const ASSET_DIR: &str = "assets/images";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedAsset {
    /// Path inside the repository
    pub path: String,
    /// Public GitHub Pages URL
    pub url: String,
}

/// Replace anything outside `[A-Za-z0-9.-]` with `_`
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Upload `bytes` as a new file and return where it is served from
pub fn upload_asset(
    api: &dyn GithubApi,
    config: &GithubConfig,
    file_name: &str,
    bytes: &[u8],
    now_millis: i64,
) -> FolioResult<UploadedAsset> {
    let name = sanitize_file_name(file_name);
    let path = format!("{}/{}-{}", ASSET_DIR, now_millis, name);

    api.put_file(
        config,
        &FileUpload {
            path: path.clone(),
            message: format!("Upload image {}", name),
            content_base64: STANDARD.encode(bytes),
            branch: config.branch().to_string(),
            sha: None,
        },
    )?;

    let url = format!("{}/{}", config.pages_url(), path);
    info!(path = %path, size = bytes.len(), "uploaded asset");
    Ok(UploadedAsset { path, url })
}
