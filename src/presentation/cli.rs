//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose, --store-dir) are inherited by all subcommands
//! - `page edit --markdown` edits like the markdown editor, `--blocks` like the block editor

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

use crate::domain::value_objects::EditorSource;

/// Folio - portfolio pages shared by two editors and published to GitHub Pages
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for scripts
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Store directory (overrides config and FOLIO_STORE_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Seed starter pages into an empty store
    Init,

    /// Create, edit and organize pages
    Page {
        #[command(subcommand)]
        action: PageCommand,
    },

    /// Manage the GitHub connection
    Github {
        #[command(subcommand)]
        action: GithubCommand,
    },

    /// Import page files from the repository root that are not known locally
    Sync,

    /// Push rendered pages to the repository
    Publish {
        /// Publish a single page via the contents API
        #[arg(long, value_name = "ID")]
        page: Option<String>,

        /// Publish every page, even when unchanged since the last publish
        #[arg(short, long, conflicts_with = "page")]
        force: bool,

        /// Show what would be published without touching the repository
        #[arg(long, conflicts_with = "page")]
        dry_run: bool,
    },

    /// List pages changed since the last publish
    Status,

    /// Print the HTML for a page or the site index
    #[command(group(ArgGroup::new("what").required(true).args(["id", "index"])))]
    Render {
        /// Page id
        id: Option<String>,

        /// Render the site index instead of a page
        #[arg(long)]
        index: bool,
    },

    /// Render the whole site into a directory
    Build {
        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: PathBuf,

        /// Also write index.html linking the root pages
        #[arg(long)]
        index: bool,
    },

    /// Export every page as a JSON backup
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Replace all pages with a JSON backup
    Import {
        /// Backup file produced by `folio export`
        file: PathBuf,
    },

    /// Page counts by origin
    Stats,

    /// Fold a legacy per-editor store dump into the unified store
    Migrate {
        /// JSON object of legacy key → value
        file: PathBuf,
    },

    /// Delete every page (the GitHub connection is kept)
    Reset {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Upload an image to assets/images in the repository
    Upload {
        /// Image file
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum PageCommand {
    /// Create a page
    New {
        /// Page title
        title: String,

        /// Parent page id
        #[arg(long, value_name = "ID")]
        parent: Option<String>,

        /// Markdown body
        #[arg(long, conflicts_with = "blocks")]
        markdown: Option<String>,

        /// Block document (JSON file)
        #[arg(long, value_name = "FILE")]
        blocks: Option<PathBuf>,

        /// Editor recorded as the creator (cms, edit)
        #[arg(long)]
        editor: Option<EditorSource>,

        /// Publish path (defaults to the slug + .html)
        #[arg(long)]
        path: Option<String>,
    },

    /// List pages
    List {
        /// Only children of this page
        #[arg(long, value_name = "ID")]
        parent: Option<String>,

        /// Only root pages
        #[arg(long, conflicts_with = "parent")]
        roots: bool,

        /// Only pages created by this editor (cms, edit, github)
        #[arg(long)]
        source: Option<EditorSource>,

        /// Print as an indented tree
        #[arg(long, conflicts_with_all = ["parent", "roots", "source"])]
        tree: bool,
    },

    /// Show one page
    Show {
        id: String,
    },

    /// Edit a page
    Edit {
        id: String,

        /// New title (slug and path follow)
        #[arg(long)]
        title: Option<String>,

        /// Replace the markdown body
        #[arg(long, conflicts_with_all = ["markdown_file", "blocks"])]
        markdown: Option<String>,

        /// Replace the markdown body from a file
        #[arg(long, value_name = "FILE", conflicts_with = "blocks")]
        markdown_file: Option<PathBuf>,

        /// Replace the block document (JSON file)
        #[arg(long, value_name = "FILE")]
        blocks: Option<PathBuf>,
    },

    /// Delete a page; its children move up a level
    Rm {
        id: String,
    },

    /// Move a page under another page or to the root
    #[command(group(ArgGroup::new("dest").required(true).args(["parent", "root"])))]
    Move {
        id: String,

        /// New parent id
        #[arg(long, value_name = "ID")]
        parent: Option<String>,

        /// Move to the root
        #[arg(long)]
        root: bool,
    },

    /// Attach a file to a page
    Attach {
        id: String,

        file: PathBuf,

        /// MIME type (guessed from the extension otherwise)
        #[arg(long)]
        mime: Option<String>,
    },

    /// Remove an attachment
    Detach {
        id: String,

        attachment_id: String,
    },

    /// Case-insensitive search over titles and bodies
    Search {
        query: String,
    },

    /// Export one page as a markdown file
    Export {
        id: String,

        /// Directory to write into (stdout when omitted)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GithubCommand {
    /// Verify and save repository credentials
    Connect {
        /// Repository as owner/name
        #[arg(long)]
        repo: String,

        /// Personal access token (FOLIO_GITHUB_TOKEN when omitted)
        #[arg(long)]
        token: Option<String>,

        /// Branch to publish to
        #[arg(long)]
        branch: Option<String>,

        /// Save without checking the repository
        #[arg(long)]
        no_verify: bool,
    },

    /// Forget the saved connection
    Disconnect,

    /// Show the active connection
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["folio"]).is_err());
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["folio", "stats", "--json", "-vv", "--store-dir", "/tmp/s"])
                .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.store_dir, Some(PathBuf::from("/tmp/s")));
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn test_cli_parse_page_new() {
        let cli = Cli::try_parse_from([
            "folio",
            "page",
            "new",
            "Week 1",
            "--parent",
            "abc",
            "--editor",
            "edit",
        ])
        .unwrap();
        if let Commands::Page {
            action:
                PageCommand::New {
                    title,
                    parent,
                    editor,
                    markdown,
                    ..
                },
        } = cli.command
        {
            assert_eq!(title, "Week 1");
            assert_eq!(parent.as_deref(), Some("abc"));
            assert_eq!(editor, Some(EditorSource::Edit));
            assert_eq!(markdown, None);
        } else {
            panic!("Expected page new");
        }
    }

    #[test]
    fn test_cli_page_new_rejects_unknown_editor() {
        let result = Cli::try_parse_from(["folio", "page", "new", "x", "--editor", "vim"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_edit_markdown_conflicts_with_blocks() {
        let result = Cli::try_parse_from([
            "folio",
            "page",
            "edit",
            "id1",
            "--markdown",
            "# hi",
            "--blocks",
            "doc.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_move_needs_destination() {
        assert!(Cli::try_parse_from(["folio", "page", "move", "id1"]).is_err());
        assert!(
            Cli::try_parse_from(["folio", "page", "move", "id1", "--parent", "p", "--root"])
                .is_err()
        );

        let cli = Cli::try_parse_from(["folio", "page", "move", "id1", "--root"]).unwrap();
        if let Commands::Page {
            action: PageCommand::Move { root, parent, .. },
        } = cli.command
        {
            assert!(root);
            assert_eq!(parent, None);
        } else {
            panic!("Expected page move");
        }
    }

    #[test]
    fn test_cli_parse_publish() {
        let cli = Cli::try_parse_from(["folio", "publish", "--force", "--dry-run"]).unwrap();
        if let Commands::Publish {
            page,
            force,
            dry_run,
        } = cli.command
        {
            assert_eq!(page, None);
            assert!(force);
            assert!(dry_run);
        } else {
            panic!("Expected publish");
        }
    }

    #[test]
    fn test_cli_publish_page_conflicts_with_force() {
        let result = Cli::try_parse_from(["folio", "publish", "--page", "a", "--force"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_render_needs_id_or_index() {
        assert!(Cli::try_parse_from(["folio", "render"]).is_err());
        assert!(Cli::try_parse_from(["folio", "render", "--index"]).is_ok());
        assert!(Cli::try_parse_from(["folio", "render", "abc"]).is_ok());
    }

    #[test]
    fn test_cli_parse_github_connect() {
        let cli = Cli::try_parse_from([
            "folio",
            "github",
            "connect",
            "--repo",
            "jane/site",
            "--branch",
            "gh-pages",
        ])
        .unwrap();
        if let Commands::Github {
            action:
                GithubCommand::Connect {
                    repo,
                    token,
                    branch,
                    no_verify,
                },
        } = cli.command
        {
            assert_eq!(repo, "jane/site");
            assert_eq!(token, None);
            assert_eq!(branch.as_deref(), Some("gh-pages"));
            assert!(!no_verify);
        } else {
            panic!("Expected github connect");
        }
    }

    #[test]
    fn test_cli_build_requires_out() {
        assert!(Cli::try_parse_from(["folio", "build"]).is_err());
        let cli = Cli::try_parse_from(["folio", "build", "--out", "site", "--index"]).unwrap();
        assert!(matches!(cli.command, Commands::Build { index: true, .. }));
    }
}
