//! Shared page storage
//!
//! Single source of truth for pages, used by both the markdown and the block
//! editor front-ends. All pages live in memory as a `Vec<Page>` and are
//! written as one JSON array under `unified_pages` after every mutation.
//!
//! The store also owns the GitHub connection and the publish ledger, and
//! implements the one-way merge of a repository listing into local pages.

mod tree;


use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::entities::{
    Attachment, EditorDocument, GithubConfig, Page, PublishState, DEFAULT_TITLE,
};
use crate::domain::ports::{GithubApi, KeyValueStore};
use crate::domain::services::SyncFilter;
use crate::domain::value_objects::{is_page_file_name, title_from_filename, EditorSource, PageId};
use crate::error::{FolioError, FolioResult};

/// Store key holding every page
pub const PAGES_KEY: &str = "unified_pages";
/// Store key holding the GitHub connection
pub const GITHUB_CONFIG_KEY: &str = "unified_github_config";
/// Store key holding the publish ledger
pub const PUBLISH_STATE_KEY: &str = "unified_publish_state";

/// Fields for a new page; everything is optional
#[derive(Debug, Clone, Default)]
pub struct NewPage {
    pub title: Option<String>,
    pub markdown: Option<String>,
    pub editorjs: Option<EditorDocument>,
    pub created_with: Option<EditorSource>,
    pub parent_id: Option<PageId>,
    /// Published path; derived from the title when absent
    pub path: Option<String>,
}

impl NewPage {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn markdown(mut self, markdown: impl Into<String>) -> Self {
        self.markdown = Some(markdown.into());
        self
    }

    pub fn blocks(mut self, doc: EditorDocument) -> Self {
        self.editorjs = Some(doc);
        self
    }

    pub fn created_with(mut self, source: EditorSource) -> Self {
        self.created_with = Some(source);
        self
    }

    pub fn under(mut self, parent: PageId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Changes to an existing page; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct PageUpdate {
    pub title: Option<String>,
    pub markdown: Option<String>,
    pub editorjs: Option<EditorDocument>,
    /// `Some(None)` moves the page to the root
    pub parent_id: Option<Option<PageId>>,
}

/// Filter for `get_all_pages`; set fields are ANDed
#[derive(Debug, Clone, Default)]
pub struct PageFilter {
    /// `Some(None)` selects root pages
    pub parent_id: Option<Option<PageId>>,
    pub created_with: Option<EditorSource>,
}

impl PageFilter {
    fn matches(&self, page: &Page) -> bool {
        let parent_ok = match &self.parent_id {
            Some(parent) => &page.parent_id == parent,
            None => true,
        };
        let source_ok = match self.created_with {
            Some(source) => page.metadata.created_with == source,
            None => true,
        };
        parent_ok && source_ok
    }
}

/// Page counts by origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PageStats {
    pub total: usize,
    pub cms: usize,
    pub edit: usize,
    pub github: usize,
}

/// Outcome of merging a repository listing into local pages
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SyncReport {
    /// Pages created for files not known locally
    pub added: Vec<PageId>,
    /// Page files that already had a local page
    pub already_known: usize,
    /// Entries that are not pages (non-HTML, excluded, directories)
    pub skipped: usize,
}

pub struct SharedPageStorage<S: KeyValueStore> {
    store: S,
    pages: Vec<Page>,
    github_config: Option<GithubConfig>,
    sync_filter: SyncFilter,
}

impl<S: KeyValueStore> SharedPageStorage<S> {
    /// Empty storage over `store`; nothing is read until `load_pages`
    pub fn new(store: S) -> Self {
        Self {
            store,
            pages: Vec::new(),
            github_config: None,
            sync_filter: SyncFilter::default(),
        }
    }

    /// Create storage and load pages and GitHub config from `store`
    pub fn open(store: S) -> FolioResult<Self> {
        let mut storage = Self::new(store);
        storage.load_pages()?;
        storage.load_github_config()?;
        Ok(storage)
    }

    pub fn with_sync_filter(mut self, filter: SyncFilter) -> Self {
        self.sync_filter = filter;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    // ---- page management -------------------------------------------------

    /// Load all pages from the store.
    ///
    /// An absent key leaves the current pages untouched. Tree links are
    /// repaired so records written without `children` lists are usable.
    /// Pages sharing an id get fresh ids, written back right away.
    pub fn load_pages(&mut self) -> FolioResult<&[Page]> {
        if let Some(raw) = self.store.get(PAGES_KEY)? {
            let mut pages: Vec<Page> =
                serde_json::from_str(&raw).map_err(|e| FolioError::CorruptStore {
                    key: PAGES_KEY.to_string(),
                    message: e.to_string(),
                })?;
            let (renamed, repaired) = normalize_pages(&mut pages);
            if repaired > 0 {
                debug!(repaired, "repaired page tree links on load");
            }
            self.pages = pages;
            if renamed > 0 {
                warn!(renamed, "stored pages shared ids, assigned new ones");
                self.save_pages()?;
            }
        }
        debug!(count = self.pages.len(), "loaded pages");
        Ok(&self.pages)
    }

    /// Write all pages to the store
    pub fn save_pages(&self) -> FolioResult<()> {
        let raw = serde_json::to_string(&self.pages)?;
        self.store.set(PAGES_KEY, &raw)?;
        debug!(count = self.pages.len(), "saved pages");
        Ok(())
    }

    pub fn get_page(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|p| &p.id == id)
    }

    pub fn get_page_by_path(&self, path: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.path == path)
    }

    /// Create a page and persist it
    pub fn create_page(&mut self, data: NewPage) -> FolioResult<Page> {
        let page = self.insert_page(data)?;
        self.save_pages()?;
        info!(id = %page.id, path = %page.path, "created page");
        Ok(page)
    }

    /// Update a page; `Ok(None)` when the id is unknown
    pub fn update_page(&mut self, id: &PageId, updates: PageUpdate) -> FolioResult<Option<Page>> {
        let Some(idx) = self.index_of(id) else {
            return Ok(None);
        };

        if let Some(Some(new_parent)) = &updates.parent_id {
            self.check_parent(id, new_parent)?;
        }

        let page = &mut self.pages[idx];
        if let Some(title) = updates.title.as_deref() {
            if !title.is_empty() && title != page.title {
                page.retitle(title);
            }
        }
        if let Some(markdown) = updates.markdown {
            page.content.markdown = markdown;
            page.metadata.last_edited_with = EditorSource::Cms;
        }
        if let Some(doc) = updates.editorjs {
            page.content.editorjs = doc;
            page.metadata.last_edited_with = EditorSource::Edit;
        }
        page.metadata.updated_at = Utc::now();

        if let Some(new_parent) = updates.parent_id {
            self.relink(idx, new_parent);
        }

        self.save_pages()?;
        Ok(Some(self.pages[idx].clone()))
    }

    /// Delete a page; its children move up to its parent.
    ///
    /// Returns false when the id is unknown.
    pub fn delete_page(&mut self, id: &PageId) -> FolioResult<bool> {
        let Some(idx) = self.index_of(id) else {
            return Ok(false);
        };
        let removed = self.pages.remove(idx);

        if let Some(parent_id) = &removed.parent_id {
            if let Some(parent) = self.page_mut(parent_id) {
                parent.children.retain(|c| c != id);
            }
        }

        let mut orphans = removed.children.clone();
        for page in &self.pages {
            if page.parent_id.as_ref() == Some(id) && !orphans.contains(&page.id) {
                orphans.push(page.id.clone());
            }
        }
        for child_id in &orphans {
            if let Some(child) = self.page_mut(child_id) {
                child.parent_id = removed.parent_id.clone();
            }
        }
        if let Some(grandparent_id) = &removed.parent_id {
            if let Some(grandparent) = self.page_mut(grandparent_id) {
                for child_id in &orphans {
                    if !grandparent.children.contains(child_id) {
                        grandparent.children.push(child_id.clone());
                    }
                }
            }
        }

        self.save_pages()?;
        info!(id = %id, reparented = orphans.len(), "deleted page");
        Ok(true)
    }

    /// Copy of all pages matching `filter`, in store order
    pub fn get_all_pages(&self, filter: &PageFilter) -> Vec<Page> {
        self.pages
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    /// Children of a page in their recorded order
    pub fn children_of(&self, id: &PageId) -> Vec<&Page> {
        self.get_page(id)
            .map(|page| {
                page.children
                    .iter()
                    .filter_map(|child| self.get_page(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether every parent link and children list agree
    pub fn tree_is_consistent(&self) -> bool {
        tree::is_consistent(&self.pages)
    }

    pub fn root_pages(&self) -> Vec<&Page> {
        self.pages.iter().filter(|p| p.is_root()).collect()
    }

    /// Case-insensitive search over titles, markdown and block text
    pub fn search(&self, query: &str) -> Vec<&Page> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.pages.iter().collect();
        }
        self.pages
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&query)
                    || p.content.markdown.to_lowercase().contains(&query)
                    || p.content
                        .editorjs
                        .plain_text()
                        .to_lowercase()
                        .contains(&query)
            })
            .collect()
    }

    pub fn add_attachment(&mut self, id: &PageId, attachment: Attachment) -> FolioResult<()> {
        let page = self
            .page_mut(id)
            .ok_or_else(|| FolioError::PageNotFound { id: id.clone() })?;
        page.attachments.push(attachment);
        page.metadata.updated_at = Utc::now();
        self.save_pages()
    }

    /// Remove an attachment; false when the page has no such attachment
    pub fn remove_attachment(&mut self, id: &PageId, attachment_id: &str) -> FolioResult<bool> {
        let page = self
            .page_mut(id)
            .ok_or_else(|| FolioError::PageNotFound { id: id.clone() })?;
        let before = page.attachments.len();
        page.attachments.retain(|a| a.id != attachment_id);
        if page.attachments.len() == before {
            return Ok(false);
        }
        page.metadata.updated_at = Utc::now();
        self.save_pages()?;
        Ok(true)
    }

    /// Replace every page (import); duplicate ids and tree links are fixed first
    pub fn replace_all(&mut self, mut pages: Vec<Page>) -> FolioResult<()> {
        let (renamed, repaired) = normalize_pages(&mut pages);
        if renamed > 0 {
            warn!(renamed, "imported pages shared ids, assigned new ones");
        }
        if repaired > 0 {
            warn!(repaired, "imported pages had inconsistent tree links");
        }
        self.pages = pages;
        self.save_pages()
    }

    // ---- GitHub integration ----------------------------------------------

    pub fn github_config(&self) -> Option<&GithubConfig> {
        self.github_config.as_ref()
    }

    pub fn load_github_config(&mut self) -> FolioResult<Option<&GithubConfig>> {
        if let Some(raw) = self.store.get(GITHUB_CONFIG_KEY)? {
            let config =
                serde_json::from_str(&raw).map_err(|e| FolioError::CorruptStore {
                    key: GITHUB_CONFIG_KEY.to_string(),
                    message: e.to_string(),
                })?;
            self.github_config = Some(config);
        }
        Ok(self.github_config.as_ref())
    }

    pub fn save_github_config(&mut self, config: GithubConfig) -> FolioResult<()> {
        let raw = serde_json::to_string(&config)?;
        self.store.set(GITHUB_CONFIG_KEY, &raw)?;
        info!(repo = %config.repo, branch = config.branch(), "saved GitHub config");
        self.github_config = Some(config);
        Ok(())
    }

    pub fn clear_github_config(&mut self) -> FolioResult<()> {
        self.github_config = None;
        self.store.remove(GITHUB_CONFIG_KEY)?;
        Ok(())
    }

    /// Use `config` for this session only; nothing is written
    pub fn use_github_config(&mut self, config: GithubConfig) {
        debug!(repo = %config.repo, "using GitHub connection from environment");
        self.github_config = Some(config);
    }

    /// Merge the repository's root listing into local pages.
    ///
    /// Each page file without a local page at the same path gets a new
    /// `github` page whose path is the remote file name, so a second run
    /// finds it and adds nothing.
    pub fn sync_from_github(&mut self, api: &dyn GithubApi) -> FolioResult<SyncReport> {
        let config = self
            .github_config
            .clone()
            .ok_or(FolioError::GithubNotConfigured)?;
        info!(repo = %config.repo, "syncing pages from GitHub");

        let entries = api.list_contents(&config, "")?;
        let mut report = SyncReport::default();

        for entry in entries {
            if !self.sync_filter.is_syncable(&entry) {
                report.skipped += 1;
                continue;
            }
            if self.get_page_by_path(&entry.name).is_some() {
                report.already_known += 1;
                continue;
            }

            let page = self.insert_page(
                NewPage::titled(title_from_filename(&entry.name))
                    .created_with(EditorSource::Github)
                    .at_path(entry.name.clone()),
            )?;
            debug!(id = %page.id, path = %page.path, "added page from GitHub");
            report.added.push(page.id);
        }

        self.save_pages()?;
        info!(
            added = report.added.len(),
            known = report.already_known,
            skipped = report.skipped,
            "sync complete"
        );
        Ok(report)
    }

    pub fn load_publish_state(&self) -> FolioResult<PublishState> {
        match self.store.get(PUBLISH_STATE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| FolioError::CorruptStore {
                key: PUBLISH_STATE_KEY.to_string(),
                message: e.to_string(),
            }),
            None => Ok(PublishState::new()),
        }
    }

    pub fn save_publish_state(&self, state: &PublishState) -> FolioResult<()> {
        let raw = serde_json::to_string(state)?;
        self.store.set(PUBLISH_STATE_KEY, &raw)?;
        Ok(())
    }

    // ---- utilities -------------------------------------------------------

    pub fn get_stats(&self) -> PageStats {
        let count = |source: EditorSource| {
            self.pages
                .iter()
                .filter(|p| p.metadata.created_with == source)
                .count()
        };
        PageStats {
            total: self.pages.len(),
            cms: count(EditorSource::Cms),
            edit: count(EditorSource::Edit),
            github: count(EditorSource::Github),
        }
    }

    /// Drop every page and the stored page list (config and ledger stay)
    pub fn clear_all(&mut self) -> FolioResult<()> {
        self.pages.clear();
        self.store.remove(PAGES_KEY)?;
        info!("cleared all pages");
        Ok(())
    }

    /// An id no existing page uses
    pub fn generate_id(&self) -> PageId {
        let mut rng = rand::rng();
        loop {
            let id = PageId::generate(now_millis(), &mut rng);
            if self.get_page(&id).is_none() {
                return id;
            }
        }
    }

    // ---- internals -------------------------------------------------------

    fn index_of(&self, id: &PageId) -> Option<usize> {
        self.pages.iter().position(|p| &p.id == id)
    }

    pub(crate) fn page_mut(&mut self, id: &PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| &p.id == id)
    }

    /// Build and link a page without persisting
    pub(crate) fn insert_page(&mut self, data: NewPage) -> FolioResult<Page> {
        if let Some(parent) = &data.parent_id {
            if self.get_page(parent).is_none() {
                return Err(FolioError::PageNotFound { id: parent.clone() });
            }
        }

        let title = data
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let source = data.created_with.unwrap_or_default();
        let mut page = Page::new(self.generate_id(), &title, source, Utc::now());
        if let Some(path) = data.path {
            if !is_page_file_name(&path) {
                return Err(FolioError::InvalidPath { path });
            }
            page.path = path;
        }
        page.content.markdown = data.markdown.unwrap_or_default();
        page.content.editorjs = data.editorjs.unwrap_or_default();
        page.parent_id = data.parent_id;

        if let Some(parent_id) = &page.parent_id {
            if let Some(parent) = self.page_mut(parent_id) {
                parent.children.push(page.id.clone());
            }
        }

        self.pages.push(page.clone());
        Ok(page)
    }

    /// Re-parent a page without persisting
    pub(crate) fn set_parent(&mut self, id: &PageId, parent: Option<PageId>) -> FolioResult<()> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| FolioError::PageNotFound { id: id.clone() })?;
        if let Some(new_parent) = &parent {
            self.check_parent(id, new_parent)?;
        }
        self.relink(idx, parent);
        Ok(())
    }

    fn check_parent(&self, id: &PageId, new_parent: &PageId) -> FolioResult<()> {
        if self.get_page(new_parent).is_none() {
            return Err(FolioError::PageNotFound {
                id: new_parent.clone(),
            });
        }
        if tree::is_descendant_or_self(&self.pages, id, new_parent) {
            return Err(FolioError::InvalidParent {
                id: id.clone(),
                parent: new_parent.clone(),
                reason: "a page cannot be moved under itself or its descendants".to_string(),
            });
        }
        Ok(())
    }

    /// Point the page at `idx` to `new_parent`, fixing both children lists
    fn relink(&mut self, idx: usize, new_parent: Option<PageId>) {
        let id = self.pages[idx].id.clone();
        let old_parent = self.pages[idx].parent_id.clone();
        if old_parent == new_parent {
            return;
        }

        if let Some(old) = &old_parent {
            if let Some(parent) = self.page_mut(old) {
                parent.children.retain(|c| c != &id);
            }
        }
        if let Some(new) = &new_parent {
            if let Some(parent) = self.page_mut(new) {
                parent.children.push(id.clone());
            }
        }
        self.pages[idx].parent_id = new_parent;
    }
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

/// Unique ids first, then tree links; returns (renamed, repaired)
fn normalize_pages(pages: &mut [Page]) -> (usize, usize) {
    let mut rng = rand::rng();
    let renamed = tree::dedupe_ids(pages, || PageId::generate(now_millis(), &mut rng));
    let repaired = tree::repair_tree(pages);
    (renamed, repaired)
}
