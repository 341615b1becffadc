//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating storage and use cases with infrastructure dependencies
//! - Text rendering of reports
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Creates storage and use cases (dependency injection)
//! - `output` - Text output for pages and reports

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, Commands, GithubCommand, PageCommand};
pub use factory::{open_storage, FileStorage};
