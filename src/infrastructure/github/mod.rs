//! GitHub API adapters

mod http;

pub use http::{HttpGithubClient, GITHUB_API_BASE};
