//! Sync, publish and status handlers

use anyhow::Result;

use folio::application::PublishOptions;
use folio::config::Config;
use folio::domain::value_objects::PageId;
use folio::presentation::factory::{create_github_client, create_publish_use_case, open_storage};
use folio::presentation::output;

use super::print_json;

pub fn cmd_sync(config: &Config, json: bool) -> Result<()> {
    let mut storage = open_storage(config)?;
    let client = create_github_client()?;
    let report = storage.sync_from_github(&client)?;

    if json {
        return print_json(&report);
    }
    print!("{}", output::sync_report(&report));
    for id in &report.added {
        if let Some(page) = storage.get_page(id) {
            println!("  + {}", output::page_line(page));
        }
    }
    Ok(())
}

pub fn cmd_publish(
    config: &Config,
    force: bool,
    dry_run: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let storage = open_storage(config)?;
    let client = create_github_client()?;
    let use_case = create_publish_use_case(&client, config);

    let options = PublishOptions::new()
        .with_force(force)
        .with_dry_run(dry_run);
    let report = use_case.publish_all(&storage, options)?;

    if json {
        return print_json(&report);
    }
    print!("{}", output::publish_report(&report, verbose));
    if let (Some(connection), false) = (storage.github_config(), report.dry_run) {
        if report.has_changes() {
            println!("  Site: {}", connection.pages_url());
        }
    }
    Ok(())
}

pub fn cmd_publish_page(config: &Config, id: &str, json: bool) -> Result<()> {
    let storage = open_storage(config)?;
    let client = create_github_client()?;
    let use_case = create_publish_use_case(&client, config);

    let result = use_case.publish_page(&storage, &PageId::from(id))?;

    if json {
        return print_json(&result);
    }
    let verb = if result.created { "Created" } else { "Updated" };
    println!("✓ {} {}", verb, result.path);
    Ok(())
}

pub fn cmd_status(config: &Config, json: bool) -> Result<()> {
    let storage = open_storage(config)?;
    let client = create_github_client()?;
    let use_case = create_publish_use_case(&client, config);

    let changes = use_case.status(&storage)?;

    if json {
        return print_json(&changes);
    }
    print!("{}", output::status_lines(&changes));
    Ok(())
}
