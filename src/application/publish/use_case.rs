//! Publish Use Case
//!
//! Two ways of pushing pages:
//! 1. `publish_all` - one commit through the git data API
//!    (head → base tree → blobs → tree → commit → fast-forward)
//! 2. `publish_page` - a single file through the contents API
//!
//! Both record what they pushed in the publish ledger so `status` can tell
//! which pages have unpublished changes.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{SecondsFormat, Utc};
use tracing::{debug, info, warn};

use crate::application::storage::SharedPageStorage;
use crate::domain::entities::{GithubConfig, Page};
use crate::domain::ports::{FileUpload, GithubApi, KeyValueStore, TreeEntry};
use crate::domain::services::{render_page, SiteMeta};
use crate::domain::value_objects::{is_page_file_name, ContentHash, PageId};
use crate::error::{FolioError, FolioResult};

use super::options::PublishOptions;
use super::result::{PagePublish, PageStatus, PublishReport, StatusKind};

/// Site landing page; maintained by hand, never overwritten by a publish
pub const INDEX_PATH: &str = "index.html";

struct Rendered<'p> {
    page: &'p Page,
    html: String,
    hash: ContentHash,
}

pub struct PublishUseCase<'a> {
    api: &'a dyn GithubApi,
    site: SiteMeta,
}

impl<'a> PublishUseCase<'a> {
    pub fn new(api: &'a dyn GithubApi, site: SiteMeta) -> Self {
        Self { api, site }
    }

    /// Commit every changed page in one go
    pub fn publish_all<S: KeyValueStore>(
        &self,
        storage: &SharedPageStorage<S>,
        options: PublishOptions,
    ) -> FolioResult<PublishReport> {
        let config = require_config(storage)?;
        let mut state = storage.load_publish_state()?;
        let mut report = PublishReport {
            dry_run: options.dry_run,
            ..PublishReport::default()
        };

        let rendered = self.render_all(storage.pages(), &mut report);
        let mut changed = Vec::new();
        for (path, page) in &rendered {
            if options.force || state.is_changed(path, &page.hash) {
                report.published.push(path.clone());
                changed.push((path, page));
            } else {
                report.unchanged.push(path.clone());
            }
        }

        if changed.is_empty() {
            info!(unchanged = report.unchanged.len(), "nothing to publish");
            return Ok(report);
        }
        if options.dry_run {
            info!(count = changed.len(), "dry run, skipping GitHub");
            return Ok(report);
        }

        let branch = config.branch();
        let head = self.api.branch_head(&config, branch)?;
        let base_tree = self.api.commit_tree(&config, &head)?;
        debug!(head = %head, base_tree = %base_tree, "resolved branch");

        let mut entries = Vec::with_capacity(changed.len());
        for (path, page) in &changed {
            let sha = self.api.create_blob(&config, &page.html)?;
            debug!(path = %path, blob = %sha, hash = %page.hash, "created blob");
            entries.push(TreeEntry::blob(path.as_str(), sha));
        }
        let tree = self.api.create_tree(&config, &base_tree, &entries)?;

        let now = Utc::now();
        let message = format!(
            "Update content - {}",
            now.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        let commit = self
            .api
            .create_commit(&config, &message, &tree, std::slice::from_ref(&head))?;
        self.api.update_branch(&config, branch, &commit)?;

        for (path, page) in changed {
            state.record(path.clone(), page.hash.clone(), now);
        }
        storage.save_publish_state(&state)?;

        info!(
            repo = %config.repo,
            commit = %commit,
            files = report.published.len(),
            "published pages"
        );
        report.commit = Some(commit);
        Ok(report)
    }

    /// Create or replace one page's file through the contents API
    pub fn publish_page<S: KeyValueStore>(
        &self,
        storage: &SharedPageStorage<S>,
        id: &PageId,
    ) -> FolioResult<PagePublish> {
        let page = storage
            .get_page(id)
            .ok_or_else(|| FolioError::PageNotFound { id: id.clone() })?;
        if page.path == INDEX_PATH {
            return Err(FolioError::ReservedPath {
                path: page.path.clone(),
            });
        }
        if !is_page_file_name(&page.path) {
            return Err(FolioError::InvalidPath {
                path: page.path.clone(),
            });
        }
        let config = require_config(storage)?;
        let branch = config.branch();

        let html = render_page(page, &self.site);
        let hash = ContentHash::from_content(&html);

        let existing = match self.api.file_sha(&config, &page.path, branch) {
            Ok(sha) => sha,
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e.into()),
        };

        let upload = FileUpload {
            path: page.path.clone(),
            message: format!("Update {}", page.title),
            content_base64: STANDARD.encode(html.as_bytes()),
            branch: branch.to_string(),
            sha: existing.clone(),
        };
        self.api.put_file(&config, &upload)?;

        let mut state = storage.load_publish_state()?;
        state.record(page.path.clone(), hash, Utc::now());
        storage.save_publish_state(&state)?;

        info!(id = %page.id, path = %page.path, created = existing.is_none(), "published page");
        Ok(PagePublish {
            id: page.id.clone(),
            path: page.path.clone(),
            created: existing.is_none(),
        })
    }

    /// Pages whose rendered HTML differs from what the ledger recorded
    pub fn status<S: KeyValueStore>(
        &self,
        storage: &SharedPageStorage<S>,
    ) -> FolioResult<Vec<PageStatus>> {
        let state = storage.load_publish_state()?;
        let mut report = PublishReport::default();
        let rendered = self.render_all(storage.pages(), &mut report);

        let statuses = rendered
            .into_iter()
            .filter_map(|(path, r)| {
                let kind = match state.get(&path) {
                    None => StatusKind::New,
                    Some(hash) if hash != &r.hash => StatusKind::Modified,
                    Some(_) => return None,
                };
                Some(PageStatus {
                    id: r.page.id.clone(),
                    title: r.page.title.clone(),
                    path,
                    kind,
                })
            })
            .collect();
        Ok(statuses)
    }

    /// Render each publishable page keyed by path; later pages win on a clash
    fn render_all<'p>(
        &self,
        pages: &'p [Page],
        report: &mut PublishReport,
    ) -> BTreeMap<String, Rendered<'p>> {
        let mut rendered = BTreeMap::new();
        for page in pages {
            if page.path == INDEX_PATH {
                warn!(id = %page.id, "page uses index.html, leaving it out");
                report.reserved.push(page.path.clone());
                continue;
            }
            if !is_page_file_name(&page.path) {
                warn!(id = %page.id, path = %page.path, "page path is not a plain file name, leaving it out");
                report.rejected.push(page.path.clone());
                continue;
            }
            let html = render_page(page, &self.site);
            let hash = ContentHash::from_content(&html);
            let previous = rendered.insert(page.path.clone(), Rendered { page, html, hash });
            if let Some(previous) = previous {
                warn!(
                    path = %page.path,
                    dropped = %previous.page.id,
                    kept = %page.id,
                    "two pages share a path, publishing the later one"
                );
            }
        }
        rendered
    }
}

fn require_config<S: KeyValueStore>(storage: &SharedPageStorage<S>) -> FolioResult<GithubConfig> {
    storage
        .github_config()
        .cloned()
        .ok_or(FolioError::GithubNotConfigured)
}
