//! Rendering, static build and asset upload handlers

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use folio::application::{build_site, upload_asset};
use folio::config::Config;
use folio::domain::services::{render_index, render_page};
use folio::domain::value_objects::PageId;
use folio::presentation::factory::{create_file_system, create_github_client, open_storage};
use folio::FolioError;

use super::print_json;

pub fn cmd_render(config: &Config, id: Option<String>, index: bool) -> Result<()> {
    let storage = open_storage(config)?;
    let site = config.site_meta();

    let html = match id {
        Some(id) if !index => {
            let id = PageId::from(id);
            let page = storage
                .get_page(&id)
                .ok_or(FolioError::PageNotFound { id: id.clone() })?;
            render_page(page, &site)
        }
        _ => render_index(storage.root_pages(), &site),
    };
    print!("{}", html);
    Ok(())
}

pub fn cmd_build(config: &Config, out: &Path, index: bool, json: bool) -> Result<()> {
    let storage = open_storage(config)?;
    let fs = create_file_system();

    let report = build_site(&storage, &fs, &config.site_meta(), out, index)
        .with_context(|| format!("failed to build site into {}", out.display()))?;

    if json {
        return print_json(&report);
    }
    println!(
        "✓ Built {} pages into {}",
        report.written.len(),
        out.display()
    );
    if let Some(index) = &report.index {
        println!("  index: {}", index.display());
    }
    for path in &report.rejected {
        eprintln!("warning: skipped {}: not a plain file name", path);
    }
    Ok(())
}

pub fn cmd_upload(config: &Config, file: &Path, json: bool) -> Result<()> {
    let bytes =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let storage = open_storage(config)?;
    let connection = storage
        .github_config()
        .ok_or(FolioError::GithubNotConfigured)?;
    let client = create_github_client()?;

    let asset = upload_asset(
        &client,
        connection,
        &name,
        &bytes,
        Utc::now().timestamp_millis(),
    )?;

    if json {
        return print_json(&asset);
    }
    println!("✓ Uploaded {}", asset.path);
    println!("  {}", asset.url);
    Ok(())
}
