//! Backup, stats, migration and reset handlers

use std::path::Path;

use anyhow::{bail, Context, Result};

use folio::application::{
    export_all, import_data, migrate_legacy, seed_starter_pages, stage_legacy_dump,
};
use folio::config::Config;
use folio::infrastructure::fs::atomic_write;
use folio::presentation::factory::open_storage;
use folio::presentation::output;

use super::print_json;

/// The backup is JSON either way, so `--json` changes nothing here.
pub fn cmd_export(config: &Config, output: Option<&Path>) -> Result<()> {
    let storage = open_storage(config)?;
    let bundle = export_all(&storage)?;

    match output {
        Some(path) => {
            atomic_write(path, bundle.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "✓ Exported {} pages to {}",
                storage.pages().len(),
                path.display()
            );
        }
        None => println!("{}", bundle),
    }
    Ok(())
}

pub fn cmd_import(config: &Config, file: &Path, json: bool) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let mut storage = open_storage(config)?;
    let count = import_data(&mut storage, &raw)?;

    if json {
        return print_json(&serde_json::json!({ "imported": count }));
    }
    println!("✓ Imported {} pages", count);
    Ok(())
}

pub fn cmd_init(config: &Config, json: bool) -> Result<()> {
    let mut storage = open_storage(config)?;
    let created = seed_starter_pages(&mut storage, config.site.author.as_deref())?;

    if json {
        return print_json(&serde_json::json!({
            "created": created.iter().map(|p| &p.id).collect::<Vec<_>>(),
        }));
    }
    if created.is_empty() {
        println!(
            "Store already has {} pages, nothing to seed",
            storage.pages().len()
        );
        return Ok(());
    }
    println!("✓ Created {} starter pages", created.len());
    for page in &created {
        println!("  + {}", output::page_line(page));
    }
    Ok(())
}

pub fn cmd_stats(config: &Config, json: bool) -> Result<()> {
    let storage = open_storage(config)?;
    let stats = storage.get_stats();

    if json {
        return print_json(&stats);
    }
    println!("Pages: {}", stats.total);
    println!("  markdown editor: {}", stats.cms);
    println!("  block editor:    {}", stats.edit);
    println!("  from GitHub:     {}", stats.github);
    Ok(())
}

pub fn cmd_migrate(config: &Config, file: &Path, json: bool) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let mut storage = open_storage(config)?;
    let staged = stage_legacy_dump(storage.store(), &raw)?;
    if staged.is_empty() && !json {
        println!("No legacy keys found in {}", file.display());
    }
    let report = migrate_legacy(&mut storage)?;

    if json {
        return print_json(&report);
    }
    print!("{}", output::migration_report(&report));
    Ok(())
}

pub fn cmd_reset(config: &Config, yes: bool, json: bool) -> Result<()> {
    if !yes {
        bail!("this deletes every page\n  → Re-run with --yes to confirm");
    }

    let mut storage = open_storage(config)?;
    let count = storage.pages().len();
    storage.clear_all()?;

    if json {
        return print_json(&serde_json::json!({ "deleted": count }));
    }
    println!("✓ Deleted {} pages", count);
    Ok(())
}
