//! Configuration sources seen from the CLI.

mod common;

use common::*;

#[test]
fn unknown_config_key_warns_with_suggestion() {
    let env = TestEnv::with_project_config("[site]\ntitel = \"Typo\"\n");

    let result = env.run(&["stats"]);
    assert_success!(result);
    assert!(
        result.stderr.contains("titel"),
        "expected a warning on stderr; got:\n{}",
        result.stderr
    );
    assert_output_contains!(result, "title");
}

#[test]
fn invalid_config_is_an_error() {
    let env = TestEnv::with_project_config("[site\ntitle = 1");

    let result = env.run(&["stats"]);
    assert_failure!(result);
    assert_output_contains!(result, "invalid config");
}

#[test]
fn storage_dir_from_config() {
    let env = TestEnv::with_project_config("[storage]\ndir = \"pages-store\"\n");
    env.create_page(&["About"]);

    assert!(env.project_file_exists("pages-store/unified_pages.json"));
    assert!(!env.store_dir().exists());
}

#[test]
fn store_dir_flag_beats_environment() {
    let env = TestEnv::new();
    let flag_dir = env.project_path("flag");
    let env_dir = env.project_path("from-env");

    let result = env.run_with_env(
        &["page", "new", "About", "--store-dir", flag_dir.to_str().unwrap()],
        &[("FOLIO_STORE_DIR", env_dir.to_str().unwrap())],
    );
    assert_success!(result);
    assert!(flag_dir.join("unified_pages.json").exists());
    assert!(!env_dir.exists());
}

#[test]
fn user_config_applies_without_project_config() {
    let env = TestEnv::new();
    let user_config = env.home_path(".config/folio/config.toml");
    std::fs::create_dir_all(user_config.parent().unwrap()).unwrap();
    std::fs::write(&user_config, "[site]\ntitle = \"From Home\"\n").unwrap();
    let id = env.create_page(&["About"]);

    let result = env.run(&["render", &id]);
    assert_success!(result);
    assert_output_contains!(result, "About - From Home");
}

#[test]
fn json_output_keeps_warnings_off_stdout() {
    let env = TestEnv::with_project_config("[site]\ntitel = \"Typo\"\n");

    let result = env.run(&["--json", "stats"]);
    assert_success!(result);
    assert_eq!(result.json()["total"], 0);
}
