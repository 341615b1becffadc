//! Static site build
//!
//! Renders every page to `out_dir/{path}`, the same HTML `publish` pushes,
//! so a site can be previewed or hosted without GitHub.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::application::storage::SharedPageStorage;
use crate::domain::ports::{FileSystem, KeyValueStore};
use crate::domain::services::{render_index, render_page, SiteMeta};
use crate::domain::value_objects::is_page_file_name;
use crate::error::FolioResult;

use super::publish::INDEX_PATH;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub written: Vec<PathBuf>,
    pub index: Option<PathBuf>,
    /// Page paths that are not plain file names and were not written
    pub rejected: Vec<String>,
}

/// Write every page, plus `index.html` when `with_index` is set
pub fn build_site<S: KeyValueStore, F: FileSystem>(
    storage: &SharedPageStorage<S>,
    fs: &F,
    site: &SiteMeta,
    out_dir: &Path,
    with_index: bool,
) -> FolioResult<BuildReport> {
    let mut report = BuildReport::default();

    for page in storage.pages() {
        if with_index && page.path == INDEX_PATH {
            debug!(id = %page.id, "generated index replaces page at index.html");
            continue;
        }
        if !is_page_file_name(&page.path) {
            warn!(id = %page.id, path = %page.path, "page path leaves the output directory, skipping");
            report.rejected.push(page.path.clone());
            continue;
        }
        let target = out_dir.join(&page.path);
        fs.write(&target, &render_page(page, site))?;
        debug!(path = %target.display(), "wrote page");
        report.written.push(target);
    }

    if with_index {
        let target = out_dir.join(INDEX_PATH);
        fs.write(&target, &render_index(storage.root_pages(), site))?;
        report.index = Some(target);
    }

    info!(
        out = %out_dir.display(),
        pages = report.written.len(),
        index = with_index,
        "built site"
    );
    Ok(report)
}
