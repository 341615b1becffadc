//! Legacy store migration
//!
//! Before the unified store each editor kept its own keys:
//! - `contentManager` - markdown editor pages `{pages: [{id, title, content, parentId}]}`
//! - `editor_pages` - block editor pages `[{id, name, title, path, content, lastModified}]`
//! - `githubConfig` / `github_config_edit` - per-editor GitHub settings
//!
//! `migrate_legacy` folds whatever is present into the unified keys and
//! removes the legacy key once its content has been taken over. A legacy
//! value that cannot be decoded is left in place and reported.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::application::storage::{NewPage, SharedPageStorage};
use crate::domain::entities::{EditorDocument, GithubConfig};
use crate::domain::ports::KeyValueStore;
use crate::domain::value_objects::{generate_path, EditorSource, PageId};
use crate::error::{FolioError, FolioResult};

pub const CMS_PAGES_KEY: &str = "contentManager";
pub const EDITOR_PAGES_KEY: &str = "editor_pages";
pub const CMS_GITHUB_KEY: &str = "githubConfig";
pub const EDITOR_GITHUB_KEY: &str = "github_config_edit";

/// Every key `migrate_legacy` understands
pub const LEGACY_KEYS: &[&str] = &[
    CMS_PAGES_KEY,
    EDITOR_PAGES_KEY,
    CMS_GITHUB_KEY,
    EDITOR_GITHUB_KEY,
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Pages recreated from the markdown editor's store
    pub cms_pages: usize,
    /// Pages recreated from the block editor's store
    pub edit_pages: usize,
    /// Block editor pages whose path already had a page
    pub skipped_pages: usize,
    /// Legacy key the GitHub connection was taken from
    pub github_config_from: Option<String>,
    pub removed_keys: Vec<String>,
    /// Keys left in place because their value could not be decoded
    pub failed_keys: Vec<String>,
}

impl MigrationReport {
    pub fn is_empty(&self) -> bool {
        self.cms_pages == 0
            && self.edit_pages == 0
            && self.github_config_from.is_none()
            && self.removed_keys.is_empty()
            && self.failed_keys.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct LegacyCmsStore {
    #[serde(default)]
    pages: Vec<LegacyCmsPage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyCmsPage {
    #[serde(default)]
    id: serde_json::Value,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    parent_id: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct LegacyEditorPage {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    content: Option<EditorDocument>,
}

/// Old ids were numbers or strings
fn legacy_id(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Fold every legacy key present in the store into the unified keys
pub fn migrate_legacy<S: KeyValueStore>(
    storage: &mut SharedPageStorage<S>,
) -> FolioResult<MigrationReport> {
    let mut report = MigrationReport::default();

    migrate_cms_pages(storage, &mut report)?;
    migrate_editor_pages(storage, &mut report)?;
    for key in [CMS_GITHUB_KEY, EDITOR_GITHUB_KEY] {
        migrate_github_config(storage, key, &mut report)?;
    }

    if !report.is_empty() {
        info!(
            cms = report.cms_pages,
            edit = report.edit_pages,
            removed = report.removed_keys.len(),
            failed = report.failed_keys.len(),
            "migrated legacy data"
        );
    }
    Ok(report)
}

fn migrate_cms_pages<S: KeyValueStore>(
    storage: &mut SharedPageStorage<S>,
    report: &mut MigrationReport,
) -> FolioResult<()> {
    let Some(raw) = storage.store().get(CMS_PAGES_KEY)? else {
        return Ok(());
    };
    let legacy: LegacyCmsStore = match serde_json::from_str(&raw) {
        Ok(legacy) => legacy,
        Err(e) => {
            warn!(key = CMS_PAGES_KEY, error = %e, "legacy value is not readable");
            report.failed_keys.push(CMS_PAGES_KEY.to_string());
            return Ok(());
        }
    };

    if legacy.pages.is_empty() || !storage.pages().is_empty() {
        debug!(
            legacy = legacy.pages.len(),
            unified = storage.pages().len(),
            "leaving markdown editor pages alone"
        );
        return Ok(());
    }

    let mut id_map: HashMap<String, PageId> = HashMap::new();
    let mut links = Vec::new();
    for old in &legacy.pages {
        let mut data = NewPage::default()
            .markdown(old.content.clone().unwrap_or_default())
            .created_with(EditorSource::Cms);
        data.title = old.title.clone();
        let page = storage.insert_page(data)?;

        if let Some(old_id) = legacy_id(&old.id) {
            id_map.insert(old_id, page.id.clone());
        }
        if let Some(old_parent) = legacy_id(&old.parent_id) {
            links.push((page.id.clone(), old_parent));
        }
        report.cms_pages += 1;
    }

    for (id, old_parent) in links {
        let Some(parent) = id_map.get(&old_parent) else {
            warn!(id = %id, parent = %old_parent, "legacy parent not found, page becomes a root");
            continue;
        };
        if let Err(e) = storage.set_parent(&id, Some(parent.clone())) {
            warn!(id = %id, error = %e, "legacy parent link dropped");
        }
    }

    storage.save_pages()?;
    storage.store().remove(CMS_PAGES_KEY)?;
    report.removed_keys.push(CMS_PAGES_KEY.to_string());
    Ok(())
}

fn migrate_editor_pages<S: KeyValueStore>(
    storage: &mut SharedPageStorage<S>,
    report: &mut MigrationReport,
) -> FolioResult<()> {
    let Some(raw) = storage.store().get(EDITOR_PAGES_KEY)? else {
        return Ok(());
    };
    let legacy: Vec<LegacyEditorPage> = match serde_json::from_str(&raw) {
        Ok(legacy) => legacy,
        Err(e) => {
            warn!(key = EDITOR_PAGES_KEY, error = %e, "legacy value is not readable");
            report.failed_keys.push(EDITOR_PAGES_KEY.to_string());
            return Ok(());
        }
    };

    for old in legacy {
        let title = old
            .title
            .filter(|t| !t.is_empty())
            .or(old.name)
            .unwrap_or_default();
        let path = old.path.unwrap_or_else(|| generate_path(&title));
        if storage.get_page_by_path(&path).is_some() {
            report.skipped_pages += 1;
            continue;
        }

        let mut data = NewPage::default()
            .blocks(old.content.unwrap_or_default())
            .created_with(EditorSource::Edit)
            .at_path(path);
        data.title = Some(title);
        storage.insert_page(data)?;
        report.edit_pages += 1;
    }

    storage.save_pages()?;
    storage.store().remove(EDITOR_PAGES_KEY)?;
    report.removed_keys.push(EDITOR_PAGES_KEY.to_string());
    Ok(())
}

fn migrate_github_config<S: KeyValueStore>(
    storage: &mut SharedPageStorage<S>,
    key: &str,
    report: &mut MigrationReport,
) -> FolioResult<()> {
    let Some(raw) = storage.store().get(key)? else {
        return Ok(());
    };
    if storage.github_config().is_some() {
        debug!(key, "unified GitHub config exists, keeping legacy key");
        return Ok(());
    }
    let config: GithubConfig = match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            warn!(key, error = %e, "legacy value is not readable");
            report.failed_keys.push(key.to_string());
            return Ok(());
        }
    };

    storage.save_github_config(config)?;
    storage.store().remove(key)?;
    report.github_config_from = Some(key.to_string());
    report.removed_keys.push(key.to_string());
    Ok(())
}

/// Copy legacy entries from a browser storage dump into the store.
///
/// The dump is a JSON object of key → value. String values are stored as
/// they are (browser storage holds JSON text); anything else is re-encoded.
/// Keys other than the legacy ones are ignored. Returns the keys staged.
pub fn stage_legacy_dump<S: KeyValueStore>(store: &S, json: &str) -> FolioResult<Vec<String>> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| FolioError::InvalidImport(e.to_string()))?;
    let serde_json::Value::Object(entries) = value else {
        return Err(FolioError::InvalidImport(
            "expected an object of storage keys".to_string(),
        ));
    };

    let mut staged = Vec::new();
    for (key, value) in entries {
        if !LEGACY_KEYS.contains(&key.as_str()) {
            debug!(key = %key, "ignoring non-legacy key");
            continue;
        }
        let raw = match value {
            serde_json::Value::String(s) => s,
            other => serde_json::to_string(&other)?,
        };
        store.set(&key, &raw)?;
        staged.push(key);
    }
    Ok(staged)
}
