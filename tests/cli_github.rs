//! GitHub connection handling that needs no network.

mod common;

use common::*;

#[test]
fn status_when_not_connected() {
    let env = TestEnv::new();

    let result = env.run(&["--json", "github", "status"]);
    assert_success!(result);
    assert_eq!(result.json()["connected"], false);
}

#[test]
fn sync_and_publish_need_a_connection() {
    let env = TestEnv::new();
    env.create_page(&["About"]);

    for args in [&["sync"][..], &["publish"][..], &["upload", "missing.png"][..]] {
        let result = env.run(args);
        assert_failure!(result);
        if args[0] != "upload" {
            assert_output_contains!(result, "GitHub not configured");
        }
    }
}

#[test]
fn connect_without_verification_saves_the_connection() {
    let env = TestEnv::new();

    let connect = env.run(&[
        "--json",
        "github",
        "connect",
        "--repo",
        "jane/portfolio",
        "--token",
        "t0k",
        "--branch",
        "gh-pages",
        "--no-verify",
    ]);
    assert_success!(connect);
    assert!(!connect.stdout.contains("t0k"), "token must not be printed");

    let status = env.run(&["--json", "github", "status"]);
    let status = status.json();
    assert_eq!(status["connected"], true);
    assert_eq!(status["saved"], true);
    assert_eq!(status["repo"], "jane/portfolio");
    assert_eq!(status["branch"], "gh-pages");
    assert_eq!(status["site_url"], "https://jane.github.io/portfolio");

    let disconnect = env.run(&["github", "disconnect"]);
    assert_success!(disconnect);
    let status = env.run(&["--json", "github", "status"]);
    assert_eq!(status.json()["connected"], false);
}

#[test]
fn connect_needs_a_token() {
    let env = TestEnv::new();

    let result = env.run(&["github", "connect", "--repo", "jane/site", "--no-verify"]);
    assert_failure!(result);
    assert_output_contains!(result, "FOLIO_GITHUB_TOKEN");
}

#[test]
fn environment_connection_is_not_saved() {
    let env = TestEnv::new();
    let vars = [
        ("FOLIO_GITHUB_REPO", "jane/site"),
        ("FOLIO_GITHUB_TOKEN", "t0k"),
    ];

    let status = env.run_with_env(&["--json", "github", "status"], &vars);
    assert_success!(status);
    let status = status.json();
    assert_eq!(status["connected"], true);
    assert_eq!(status["saved"], false);

    assert!(!env.store_dir().join("unified_github_config.json").exists());
}

#[test]
fn publish_dry_run_lists_new_pages_without_network() {
    let env = TestEnv::new();
    env.create_page(&["About"]);
    env.create_page(&["CV"]);
    let vars = [
        ("FOLIO_GITHUB_REPO", "jane/site"),
        ("FOLIO_GITHUB_TOKEN", "t0k"),
    ];

    let result = env.run_with_env(&["--json", "publish", "--dry-run"], &vars);
    assert_success!(result);
    let report = result.json();
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["published"].as_array().unwrap().len(), 2);
    assert!(report["commit"].is_null());

    let status = env.run_with_env(&["--json", "status"], &vars);
    assert_success!(status);
    assert_eq!(status.json().as_array().unwrap().len(), 2);
}
