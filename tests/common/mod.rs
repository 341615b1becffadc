//! Common test utilities for Folio CLI and integration tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated test environment with temp directories
//! - Assertion macros: `assert_output_contains!`, `assert_success!`
//! - Fixtures: Reusable test content constants
//! - `FakeGithub`: in-memory `GithubApi`

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fake_github;
pub mod fixtures;

pub use env::*;
pub use fake_github::*;
pub use fixtures::*;
