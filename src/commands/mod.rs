//! Command handlers for the `folio` binary

pub mod data;
pub mod github;
pub mod page;
pub mod publish;
pub mod site;

mod project_root;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use folio::config::Config;

/// Resolve configuration for this invocation.
///
/// Unknown-key warnings go to stderr; `--store-dir` beats every other source.
pub fn load_config(store_dir: Option<&Path>, json: bool) -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let root = project_root::discover_project_root(&cwd);
    let (mut config, warnings) = Config::load_or_default(Some(&root))?;

    if !json {
        for warning in &warnings {
            eprintln!("warning: {}", warning);
        }
    }

    if let Some(dir) = store_dir {
        config.storage.dir = Some(dir.to_path_buf());
    }
    Ok(config)
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
