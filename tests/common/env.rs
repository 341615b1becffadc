//! Test environment builder for isolated Folio testing.
//!
//! Provides `TestEnv` - an isolated test environment with temp directories
//! for the working directory and home, plus helpers to run the CLI.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a Folio CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as JSON; panics with the output on failure
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap_or_else(|e| {
            panic!(
                "stdout is not JSON ({}):\n{}\nstderr:\n{}",
                e, self.stdout, self.stderr
            )
        })
    }
}

/// Isolated test environment.
///
/// The store lives under the temp home (`~/.folio/store`), which the binary
/// finds through `FOLIO_TEST_HOME`.
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    folio_bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("Failed to create project temp dir"),
            home_dir: TempDir::new().expect("Failed to create home temp dir"),
            folio_bin: PathBuf::from(env!("CARGO_BIN_EXE_folio")),
        }
    }

    /// Environment with `folio.toml` in the working directory
    pub fn with_project_config(toml: &str) -> Self {
        let env = Self::new();
        env.write_project_file("folio.toml", toml);
        env
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home_dir.path().join(relative)
    }

    /// Directory the binary stores pages in
    pub fn store_dir(&self) -> PathBuf {
        self.home_path(".folio/store")
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.folio_bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("FOLIO_TEST_HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env_remove("FOLIO_STORE_DIR")
            .env_remove("FOLIO_GITHUB_TOKEN")
            .env_remove("FOLIO_GITHUB_REPO")
            .env_remove("FOLIO_GITHUB_BRANCH")
            .env_remove("FOLIO_SITE_TITLE")
            .env_remove("FOLIO_LOG")
            .env_remove("RUST_LOG");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute folio");
        to_result(output)
    }

    /// Create a page and return its id
    pub fn create_page(&self, args: &[&str]) -> String {
        let mut full = vec!["--json", "page", "new"];
        full.extend_from_slice(args);
        let result = self.run(&full);
        assert!(result.success, "page new failed: {}", result.stderr);
        result.json()["id"]
            .as_str()
            .expect("page JSON has an id")
            .to_string()
    }

    pub fn write_project_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    pub fn read_project_file(&self, relative_path: &str) -> String {
        std::fs::read_to_string(self.project_path(relative_path))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
    }

    pub fn project_file_exists(&self, relative_path: &str) -> bool {
        Path::new(&self.project_path(relative_path)).exists()
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
