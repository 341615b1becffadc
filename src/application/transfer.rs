//! Backup export/import and single-page markdown export

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::storage::SharedPageStorage;
use crate::domain::entities::Page;
use crate::domain::ports::KeyValueStore;
use crate::error::{FolioError, FolioResult};

/// Format version written into every backup
pub const EXPORT_VERSION: &str = "1.0";

/// Full backup of the page store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub pages: Vec<Page>,
    pub exported_at: DateTime<Utc>,
    pub version: String,
}

/// A page rendered as a standalone markdown file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownExport {
    pub file_name: String,
    pub content: String,
}

/// Pretty-printed JSON backup of every page
pub fn export_all<S: KeyValueStore>(storage: &SharedPageStorage<S>) -> FolioResult<String> {
    let bundle = ExportBundle {
        pages: storage.pages().to_vec(),
        exported_at: Utc::now(),
        version: EXPORT_VERSION.to_string(),
    };
    Ok(serde_json::to_string_pretty(&bundle)?)
}

/// Replace every page with the ones in a backup.
///
/// Only `pages` is required; `exportedAt` and `version` are informational.
/// Returns the number of imported pages.
pub fn import_data<S: KeyValueStore>(
    storage: &mut SharedPageStorage<S>,
    json: &str,
) -> FolioResult<usize> {
    let mut value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| FolioError::InvalidImport(e.to_string()))?;

    let pages = match value.get_mut("pages") {
        Some(pages) if pages.is_array() => pages.take(),
        _ => {
            return Err(FolioError::InvalidImport(
                "expected an object with a 'pages' array".to_string(),
            ))
        }
    };
    let pages: Vec<Page> =
        serde_json::from_value(pages).map_err(|e| FolioError::InvalidImport(e.to_string()))?;

    let count = pages.len();
    storage.replace_all(pages)?;
    info!(count, "imported pages");
    Ok(count)
}

/// `# {title}` followed by the page markdown, named after the title
pub fn export_page_markdown(page: &Page) -> MarkdownExport {
    MarkdownExport {
        file_name: format!("{}.md", page.title.replace(['/', '\\'], "-")),
        content: format!("# {}\n\n{}", page.title, page.content.markdown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::storage::NewPage;
    use crate::infrastructure::store::MemoryStore;

    fn storage() -> SharedPageStorage<MemoryStore> {
        SharedPageStorage::new(MemoryStore::new())
    }

    #[test]
    fn export_wraps_pages_with_version() {
        let mut s = storage();
        s.create_page(NewPage::titled("A").markdown("a")).unwrap();

        let json = export_all(&s).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], "1.0");
        assert!(value["exportedAt"].is_string());
        assert_eq!(value["pages"][0]["title"], "A");
        assert!(json.contains('\n'), "pretty printed");
    }

    #[test]
    fn import_replaces_existing_pages() {
        let mut source = storage();
        let parent = source.create_page(NewPage::titled("Parent")).unwrap();
        source
            .create_page(NewPage::titled("Child").under(parent.id.clone()))
            .unwrap();
        let backup = export_all(&source).unwrap();

        let mut target = storage();
        target.create_page(NewPage::titled("Old")).unwrap();

        assert_eq!(import_data(&mut target, &backup).unwrap(), 2);
        assert!(target.get_page_by_path("old.html").is_none());
        assert_eq!(target.get_page(&parent.id).unwrap().children.len(), 1);
    }

    #[test]
    fn import_repairs_dangling_links() {
        let mut s = storage();
        let json = r#"{"pages":[
            {"id":"a","title":"A","slug":"a","path":"a.html",
             "metadata":{"createdWith":"cms","lastEditedWith":"cms",
                         "createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"},
             "parentId":"missing","children":["ghost"]}
        ]}"#;

        import_data(&mut s, json).unwrap();

        let page = &s.pages()[0];
        assert!(page.is_root());
        assert!(page.children.is_empty());
        assert!(s.tree_is_consistent());
    }

    #[test]
    fn import_requires_pages_array() {
        let mut s = storage();
        for bad in [r#"{"version":"1.0"}"#, r#"{"pages":{}}"#, "[]", "not json"] {
            let err = import_data(&mut s, bad).unwrap_err();
            assert!(matches!(err, FolioError::InvalidImport(_)), "{}", bad);
        }
    }

    #[test]
    fn import_rejects_malformed_page() {
        let mut s = storage();
        s.create_page(NewPage::titled("Keep")).unwrap();

        let err = import_data(&mut s, r#"{"pages":[{"title":"no id"}]}"#).unwrap_err();

        assert!(matches!(err, FolioError::InvalidImport(_)));
        assert_eq!(s.pages().len(), 1);
    }

    #[test]
    fn markdown_export_prefixes_title() {
        let mut s = storage();
        let page = s
            .create_page(NewPage::titled("Week 1/2").markdown("Body"))
            .unwrap();

        let export = export_page_markdown(&page);

        assert_eq!(export.file_name, "Week 1-2.md");
        assert_eq!(export.content, "# Week 1/2\n\nBody");
    }
}
