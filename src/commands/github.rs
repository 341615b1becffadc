//! GitHub connection handlers

use anyhow::{Context, Result};

use folio::application::GITHUB_CONFIG_KEY;
use folio::config::Config;
use folio::domain::entities::GithubConfig;
use folio::domain::ports::{GithubApi, KeyValueStore};
use folio::presentation::factory::{create_github_client, open_storage};

use super::print_json;

pub fn cmd_connect(
    config: &Config,
    repo: String,
    token: Option<String>,
    branch: Option<String>,
    no_verify: bool,
    json: bool,
) -> Result<()> {
    let token = token
        .or_else(|| config.github.token.clone())
        .filter(|t| !t.is_empty())
        .context("no token given\n  → Pass --token or set FOLIO_GITHUB_TOKEN")?;

    let mut connection = GithubConfig::new(repo, token);
    if let Some(branch) = branch.or_else(|| config.github.branch.clone()) {
        connection = connection.with_branch(branch);
    }

    if !no_verify {
        let client = create_github_client()?;
        client
            .check_repository(&connection)
            .with_context(|| format!("could not access {}", connection.repo))?;
    }

    let mut storage = open_storage(config)?;
    storage.save_github_config(connection.clone())?;

    if json {
        return emit_connection(Some(&connection), true);
    }
    println!(
        "✓ Connected to {} ({})",
        connection.repo,
        connection.branch()
    );
    Ok(())
}

pub fn cmd_disconnect(config: &Config, json: bool) -> Result<()> {
    let mut storage = open_storage(config)?;
    storage.clear_github_config()?;

    if json {
        return print_json(&serde_json::json!({ "connected": false }));
    }
    println!("✓ Disconnected");
    Ok(())
}

pub fn cmd_status(config: &Config, json: bool) -> Result<()> {
    let storage = open_storage(config)?;
    let saved = storage.store().get(GITHUB_CONFIG_KEY)?.is_some();
    let connection = storage.github_config();

    if json {
        return emit_connection(connection, saved);
    }
    match connection {
        Some(c) => {
            println!("Repository: {}", c.repo);
            println!("Branch:     {}", c.branch());
            println!("Site:       {}", c.pages_url());
            if !saved {
                println!("(from config/environment, not saved)");
            }
        }
        None => println!("Not connected"),
    }
    Ok(())
}

fn emit_connection(connection: Option<&GithubConfig>, saved: bool) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonConnection<'a> {
        connected: bool,
        saved: bool,
        repo: Option<&'a str>,
        branch: Option<&'a str>,
        site_url: Option<String>,
    }

    // never echo the token
    print_json(&JsonConnection {
        connected: connection.is_some(),
        saved: saved && connection.is_some(),
        repo: connection.map(|c| c.repo.as_str()),
        branch: connection.map(GithubConfig::branch),
        site_url: connection.map(GithubConfig::pages_url),
    })
}
