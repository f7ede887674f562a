//! CLI end-to-end tests that invoke the compiled `dsync` binary.
//!
//! None of these reach the network: they either use local definitions files
//! or fail before a request would be made.

use assert_cmd::Command;
use dsync_test_utils::TestProject;
use predicates::prelude::*;

/// A `dsync` command running in `project`, isolated from the caller's env.
fn dsync(project: &TestProject) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dsync"));
    cmd.current_dir(project.root())
        .env_remove("DSYNC_ENDPOINT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let project = TestProject::new();
    dsync(&project)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("style"))
        .stdout(predicate::str::contains("theme"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("css"));
}

#[test]
fn test_version_flag() {
    let project = TestProject::new();
    dsync(&project)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dsync"));
}

#[test]
fn test_style_without_project_id_fails() {
    let project = TestProject::new();
    dsync(&project)
        .arg("style")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "If no definitions file is specified, the --project-id option must be set",
        ));
}

#[test]
fn test_config_without_endpoint_fails() {
    let project = TestProject::new();
    dsync(&project)
        .args(["config", "-a", "my-app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No design service endpoint configured"));
}

#[test]
fn test_style_from_local_definitions() {
    let project = TestProject::new();
    project.write_component(
        "src/card/card.sf.ts",
        "createStyle",
        "card",
        r#"{"root":{"padding":{"top":0},"color":"red"}}"#,
    );
    project.write_file("defs.json", r#"{"card-root": {"padding": {"top": 5}}}"#);

    dsync(&project)
        .args(["style", "defs.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UPDATED"))
        .stdout(predicate::str::contains("card"));

    project.assert_file_contains("src/card/card.sf.ts", "\"top\": 5");
    project.assert_file_contains("src/card/card.sf.ts", "\"color\": \"red\"");
}

#[test]
fn test_missing_file_is_a_warning() {
    let project = TestProject::new();
    project.write_file("defs.json", r#"{"badge": {"size": "small"}}"#);

    dsync(&project)
        .args(["config", "defs.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("badge.sfc.(ts|js)"));

    project.assert_file_not_exists("badge.sfc.ts");
}

#[test]
fn test_dry_run_leaves_files_untouched() {
    let project = TestProject::new();
    project.write_component("main.sft.ts", "createTheme", "main", "{}");
    let before = project.read_file("main.sft.ts");
    project.write_file("theme.json", r#"{"main": {"primary": "blue"}}"#);

    dsync(&project)
        .args(["theme", "theme.json", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WOULD UPDATE"));

    assert_eq!(project.read_file("main.sft.ts"), before);
}

#[test]
fn test_json_report() {
    let project = TestProject::new();
    project.write_component("menu.sfc.ts", "createConfig", "menu", "{size: 'small'}");
    project.write_file("config.json", r#"{"menu": {"size": null}}"#);

    let output = dsync(&project)
        .args(["config", "config.json", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["kind"], "config");
    assert_eq!(report["updated"], serde_json::json!(["menu"]));
    assert_eq!(report["failed"], serde_json::json!([]));
}

#[test]
fn test_failed_file_exits_non_zero() {
    let project = TestProject::new();
    project.write_component("card.sf.ts", "createStyle", "card", "{root: {padding: }}");
    project.write_file("defs.json", r#"{"card-root": {"gap": 1}}"#);

    dsync(&project)
        .args(["style", "defs.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAILED"))
        .stderr(predicate::str::contains("1 component file(s) failed to update"));
}

#[test]
fn test_svelte_framework_flag() {
    let project = TestProject::new();
    project.write_component("menu.sfc.ts", "createConfig", "menu", "{}");
    project.write_file("config.json", r#"{"menu": {"size": "large"}}"#);

    dsync(&project)
        .args(["config", "config.json", "--framework", "svelte"])
        .assert()
        .success();

    project.assert_file_contains("menu.sfc.ts", "from '@splitflow/designer/svelte'");
    project.assert_file_contains("menu.sfc.ts", "_createConfig('menu'");
}

#[test]
fn test_config_file_package_and_root_option() {
    let project = TestProject::new();
    project.write_component("app/card.sf.ts", "createStyle", "card", "{}");
    project.write_file("app/defs.json", r#"{"card-root": {"gap": 1}}"#);
    project.write_file("app/designsync.config.json", r#"{"package": "@acme/design"}"#);

    dsync(&project)
        .args(["style", "defs.json", "--root", "app"])
        .assert()
        .success();

    project.assert_file_contains("app/card.sf.ts", "from '@acme/design/style'");
}

#[test]
fn test_unreadable_config_is_reported() {
    let project = TestProject::new();
    dsync(&project)
        .args(["style", "--config", "missing.toml", "-p", "p1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration not found"));
}
