//! Export, import, stats and reset.

mod common;

use common::*;

#[test]
fn export_then_import_into_a_fresh_store() {
    let env = TestEnv::new();
    let course = env.create_page(&["Course"]);
    env.create_page(&["Week 1", "--parent", &course]);

    let export = env.run(&["export", "--output", "backup.json"]);
    assert_success!(export);
    let backup: serde_json::Value =
        serde_json::from_str(&env.read_project_file("backup.json")).unwrap();
    assert_eq!(backup["version"], "1.0");
    assert!(backup["exportedAt"].is_string());
    assert_eq!(backup["pages"].as_array().unwrap().len(), 2);

    let other = TestEnv::new();
    let backup_path = env.project_path("backup.json");
    let import = other.run(&["--json", "import", backup_path.to_str().unwrap()]);
    assert_success!(import);
    assert_eq!(import.json()["imported"], 2);

    let list = other.run(&["--json", "page", "list", "--parent", &course]);
    assert_eq!(list.json()[0]["title"], "Week 1");
}

#[test]
fn import_rejects_payload_without_pages() {
    let env = TestEnv::new();
    env.create_page(&["Keep me"]);
    let file = env.write_project_file("bad.json", r#"{"version":"1.0"}"#);

    let result = env.run(&["import", file.to_str().unwrap()]);
    assert_failure!(result);
    assert_output_contains!(result, "invalid import data");

    let stats = env.run(&["--json", "stats"]);
    assert_eq!(stats.json()["total"], 1);
}

#[test]
fn stats_count_by_origin() {
    let env = TestEnv::new();
    env.create_page(&["A"]);
    env.create_page(&["B", "--editor", "edit"]);
    env.create_page(&["C", "--editor", "edit"]);

    let stats = env.run(&["--json", "stats"]);
    assert_success!(stats);
    let stats = stats.json();
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["cms"], 1);
    assert_eq!(stats["edit"], 2);
    assert_eq!(stats["github"], 0);
}

#[test]
fn reset_requires_confirmation() {
    let env = TestEnv::new();
    env.create_page(&["A"]);

    let refused = env.run(&["reset"]);
    assert_failure!(refused);
    assert_output_contains!(refused, "--yes");

    let reset = env.run(&["--json", "reset", "--yes"]);
    assert_success!(reset);
    assert_eq!(reset.json()["deleted"], 1);

    let list = env.run(&["--json", "page", "list"]);
    assert!(list.json().as_array().unwrap().is_empty());
}

#[test]
fn corrupt_store_is_reported() {
    let env = TestEnv::new();
    std::fs::create_dir_all(env.store_dir()).unwrap();
    std::fs::write(env.store_dir().join("unified_pages.json"), "{not json").unwrap();

    let result = env.run(&["page", "list"]);
    assert_failure!(result);
    assert_output_contains!(result, "unified_pages");
    assert_output_contains!(result, "corrupted");
}
