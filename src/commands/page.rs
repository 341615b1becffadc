//! Page command handlers

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;

use folio::application::{export_page_markdown, NewPage, PageFilter, PageUpdate};
use folio::config::Config;
use folio::domain::entities::{Attachment, EditorDocument, Page};
use folio::domain::value_objects::{EditorSource, PageId};
use folio::infrastructure::fs::atomic_write;
use folio::presentation::factory::open_storage;
use folio::presentation::output::{page_line, page_tree};

use super::print_json;

pub struct NewArgs {
    pub title: String,
    pub parent: Option<String>,
    pub markdown: Option<String>,
    pub blocks: Option<PathBuf>,
    pub editor: Option<EditorSource>,
    pub path: Option<String>,
}

pub fn cmd_new(config: &Config, args: NewArgs, json: bool) -> Result<()> {
    let mut storage = open_storage(config)?;

    let editor = args.editor.unwrap_or(if args.blocks.is_some() {
        EditorSource::Edit
    } else {
        EditorSource::Cms
    });
    let mut data = NewPage::titled(args.title).created_with(editor);
    if let Some(parent) = args.parent {
        data = data.under(PageId::from(parent));
    }
    if let Some(markdown) = args.markdown {
        data = data.markdown(markdown);
    }
    if let Some(file) = &args.blocks {
        data = data.blocks(read_document(file)?);
    }
    if let Some(path) = args.path {
        data = data.at_path(path);
    }

    let page = storage.create_page(data)?;
    if json {
        return print_json(&page);
    }
    println!("✓ Created {}", page_line(&page));
    Ok(())
}

pub fn cmd_list(
    config: &Config,
    parent: Option<String>,
    roots: bool,
    source: Option<EditorSource>,
    tree: bool,
    json: bool,
) -> Result<()> {
    let storage = open_storage(config)?;

    if tree && !json {
        print!("{}", page_tree(storage.pages()));
        return Ok(());
    }

    let filter = PageFilter {
        parent_id: match (parent, roots) {
            (Some(parent), _) => Some(Some(PageId::from(parent))),
            (None, true) => Some(None),
            (None, false) => None,
        },
        created_with: source,
    };
    let pages = storage.get_all_pages(&filter);

    if json {
        return emit_summaries(&pages);
    }
    if pages.is_empty() {
        println!("No pages");
    }
    for page in &pages {
        println!("{}", page_line(page));
    }
    Ok(())
}

pub fn cmd_show(config: &Config, id: &str, json: bool) -> Result<()> {
    let storage = open_storage(config)?;
    let page = find(storage.pages(), id)?;

    if json {
        return print_json(&page);
    }

    println!("{}", page.title);
    println!("  id:          {}", page.id);
    println!("  path:        {}", page.path);
    println!(
        "  created:     {} via {}",
        page.metadata.created_at.to_rfc3339(),
        page.metadata.created_with
    );
    println!(
        "  updated:     {} via {}",
        page.metadata.updated_at.to_rfc3339(),
        page.metadata.last_edited_with
    );
    if let Some(parent) = &page.parent_id {
        println!("  parent:      {}", parent);
    }
    for child in storage.children_of(&page.id) {
        println!("  child:       {}", page_line(child));
    }
    for att in &page.attachments {
        println!("  attachment:  {} {} ({} bytes)", att.id, att.name, att.size);
    }
    println!();
    if page.uses_blocks() {
        println!("{}", page.content.editorjs.plain_text());
    } else {
        println!("{}", page.content.markdown);
    }
    Ok(())
}

pub fn cmd_edit(
    config: &Config,
    id: &str,
    title: Option<String>,
    markdown: Option<String>,
    markdown_file: Option<PathBuf>,
    blocks: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let markdown = match (markdown, markdown_file) {
        (Some(text), _) => Some(text),
        (None, Some(file)) => Some(
            std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?,
        ),
        (None, None) => None,
    };
    let editorjs = blocks.as_deref().map(read_document).transpose()?;

    if title.is_none() && markdown.is_none() && editorjs.is_none() {
        bail!("nothing to change (use --title, --markdown, --markdown-file or --blocks)");
    }

    let mut storage = open_storage(config)?;
    let updates = PageUpdate {
        title,
        markdown,
        editorjs,
        parent_id: None,
    };
    let Some(page) = storage.update_page(&PageId::from(id), updates)? else {
        bail!("page not found: {}", id);
    };

    if json {
        return print_json(&page);
    }
    println!("✓ Updated {}", page_line(&page));
    Ok(())
}

pub fn cmd_rm(config: &Config, id: &str, json: bool) -> Result<()> {
    let mut storage = open_storage(config)?;
    if !storage.delete_page(&PageId::from(id))? {
        bail!("page not found: {}", id);
    }

    if json {
        return print_json(&serde_json::json!({ "deleted": id }));
    }
    println!("✓ Deleted {}", id);
    Ok(())
}

pub fn cmd_move(
    config: &Config,
    id: &str,
    parent: Option<String>,
    root: bool,
    json: bool,
) -> Result<()> {
    let new_parent = match (parent, root) {
        (Some(parent), false) => Some(PageId::from(parent)),
        (None, true) => None,
        _ => bail!("choose exactly one of --parent or --root"),
    };

    let mut storage = open_storage(config)?;
    let updates = PageUpdate {
        parent_id: Some(new_parent),
        ..PageUpdate::default()
    };
    let Some(page) = storage.update_page(&PageId::from(id), updates)? else {
        bail!("page not found: {}", id);
    };

    if json {
        return print_json(&page);
    }
    match &page.parent_id {
        Some(parent) => println!("✓ Moved {} under {}", page.id, parent),
        None => println!("✓ Moved {} to the root", page.id),
    }
    Ok(())
}

pub fn cmd_attach(
    config: &Config,
    id: &str,
    file: &Path,
    mime: Option<String>,
    json: bool,
) -> Result<()> {
    let bytes =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());
    let mime = mime.unwrap_or_else(|| guess_mime(file).to_string());

    let mut storage = open_storage(config)?;
    let attachment = Attachment {
        id: storage.generate_id().to_string(),
        name,
        data: format!("data:{};base64,{}", mime, STANDARD.encode(&bytes)),
        mime_type: mime,
        size: bytes.len() as u64,
        uploaded_at: Utc::now(),
    };
    storage.add_attachment(&PageId::from(id), attachment.clone())?;

    if json {
        #[derive(serde::Serialize)]
        struct JsonAttachment<'a> {
            page: &'a str,
            id: &'a str,
            name: &'a str,
            mime_type: &'a str,
            size: u64,
        }
        return print_json(&JsonAttachment {
            page: id,
            id: &attachment.id,
            name: &attachment.name,
            mime_type: &attachment.mime_type,
            size: attachment.size,
        });
    }
    println!("✓ Attached {} to {} as {}", attachment.name, id, attachment.id);
    Ok(())
}

pub fn cmd_detach(config: &Config, id: &str, attachment_id: &str, json: bool) -> Result<()> {
    let mut storage = open_storage(config)?;
    if !storage.remove_attachment(&PageId::from(id), attachment_id)? {
        bail!("page {} has no attachment {}", id, attachment_id);
    }

    if json {
        return print_json(&serde_json::json!({ "page": id, "removed": attachment_id }));
    }
    println!("✓ Removed attachment {}", attachment_id);
    Ok(())
}

pub fn cmd_search(config: &Config, query: &str, json: bool) -> Result<()> {
    let storage = open_storage(config)?;
    let hits: Vec<Page> = storage.search(query).into_iter().cloned().collect();

    if json {
        return emit_summaries(&hits);
    }
    if hits.is_empty() {
        println!("No pages match '{}'", query);
    }
    for page in &hits {
        println!("{}", page_line(page));
    }
    Ok(())
}

pub fn cmd_export(config: &Config, id: &str, out: Option<&Path>, json: bool) -> Result<()> {
    let storage = open_storage(config)?;
    let page = find(storage.pages(), id)?;
    let export = export_page_markdown(&page);

    let Some(dir) = out else {
        if json {
            return print_json(&export);
        }
        print!("{}", export.content);
        return Ok(());
    };

    let target = dir.join(&export.file_name);
    atomic_write(&target, export.content.as_bytes())
        .with_context(|| format!("failed to write {}", target.display()))?;
    if json {
        return print_json(&serde_json::json!({ "written": target.display().to_string() }));
    }
    println!("✓ Wrote {}", target.display());
    Ok(())
}

fn find(pages: &[Page], id: &str) -> Result<Page> {
    pages
        .iter()
        .find(|p| p.id.as_str() == id)
        .cloned()
        .with_context(|| format!("page not found: {}", id))
}

fn read_document(file: &Path) -> Result<EditorDocument> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a block document", file.display()))
}

fn guess_mime(file: &Path) -> &'static str {
    let ext = file
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain",
        _ => "application/octet-stream",
    }
}

fn emit_summaries(pages: &[Page]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonPage<'a> {
        id: &'a str,
        title: &'a str,
        path: &'a str,
        parent_id: Option<&'a str>,
        children: usize,
        created_with: EditorSource,
        updated_at: chrono::DateTime<Utc>,
    }

    let items: Vec<JsonPage> = pages
        .iter()
        .map(|p| JsonPage {
            id: p.id.as_str(),
            title: &p.title,
            path: &p.path,
            parent_id: p.parent_id.as_ref().map(PageId::as_str),
            children: p.children.len(),
            created_with: p.metadata.created_with,
            updated_at: p.metadata.updated_at,
        })
        .collect();
    print_json(&items)
}
