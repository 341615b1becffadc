//! Folio CLI - manage portfolio pages and publish them to GitHub Pages
//!
//! Usage: folio <COMMAND>
//!
//! Commands:
//!   page     Create, edit and organize pages
//!   github   Manage the GitHub connection
//!   sync     Import page files from the repository
//!   publish  Push rendered pages to the repository
//!   build    Render the whole site into a directory

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use folio::presentation::cli::{Cli, Commands, GithubCommand, PageCommand};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = commands::load_config(cli.store_dir.as_deref(), cli.json)?;
    let json = cli.json;

    match cli.command {
        Commands::Page { action } => match action {
            PageCommand::New {
                title,
                parent,
                markdown,
                blocks,
                editor,
                path,
            } => commands::page::cmd_new(
                &config,
                commands::page::NewArgs {
                    title,
                    parent,
                    markdown,
                    blocks,
                    editor,
                    path,
                },
                json,
            ),
            PageCommand::List {
                parent,
                roots,
                source,
                tree,
            } => commands::page::cmd_list(&config, parent, roots, source, tree, json),
            PageCommand::Show { id } => commands::page::cmd_show(&config, &id, json),
            PageCommand::Edit {
                id,
                title,
                markdown,
                markdown_file,
                blocks,
            } => commands::page::cmd_edit(
                &config,
                &id,
                title,
                markdown,
                markdown_file,
                blocks,
                json,
            ),
            PageCommand::Rm { id } => commands::page::cmd_rm(&config, &id, json),
            PageCommand::Move { id, parent, root } => {
                commands::page::cmd_move(&config, &id, parent, root, json)
            }
            PageCommand::Attach { id, file, mime } => {
                commands::page::cmd_attach(&config, &id, &file, mime, json)
            }
            PageCommand::Detach { id, attachment_id } => {
                commands::page::cmd_detach(&config, &id, &attachment_id, json)
            }
            PageCommand::Search { query } => commands::page::cmd_search(&config, &query, json),
            PageCommand::Export { id, out } => {
                commands::page::cmd_export(&config, &id, out.as_deref(), json)
            }
        },
        Commands::Github { action } => match action {
            GithubCommand::Connect {
                repo,
                token,
                branch,
                no_verify,
            } => commands::github::cmd_connect(&config, repo, token, branch, no_verify, json),
            GithubCommand::Disconnect => commands::github::cmd_disconnect(&config, json),
            GithubCommand::Status => commands::github::cmd_status(&config, json),
        },
        Commands::Sync => commands::publish::cmd_sync(&config, json),
        Commands::Publish {
            page,
            force,
            dry_run,
        } => match page {
            Some(id) => commands::publish::cmd_publish_page(&config, &id, json),
            None => commands::publish::cmd_publish(&config, force, dry_run, json, cli.verbose),
        },
        Commands::Status => commands::publish::cmd_status(&config, json),
        Commands::Render { id, index } => commands::site::cmd_render(&config, id, index),
        Commands::Build { out, index } => commands::site::cmd_build(&config, &out, index, json),
        Commands::Export { output } => commands::data::cmd_export(&config, output.as_deref()),
        Commands::Import { file } => commands::data::cmd_import(&config, &file, json),
        Commands::Init => commands::data::cmd_init(&config, json),
        Commands::Stats => commands::data::cmd_stats(&config, json),
        Commands::Migrate { file } => commands::data::cmd_migrate(&config, &file, json),
        Commands::Reset { yes } => commands::data::cmd_reset(&config, yes, json),
        Commands::Upload { file } => commands::site::cmd_upload(&config, &file, json),
    }
}

/// Logs go to stderr so `--json` output stays parseable.
///
/// `FOLIO_LOG` (or `RUST_LOG`) overrides the level chosen by `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("FOLIO_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
