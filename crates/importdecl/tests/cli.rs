//! End-to-end tests for the `importdecl` binary.

use assert_cmd::Command;
use std::fs;

fn importdecl(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("importdecl").unwrap();
    cmd.current_dir(dir.path()).env_remove("IMPORTDECL_LOG");
    cmd
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn encode_builtin_flag() {
    let dir = tempfile::tempdir().unwrap();
    let output = importdecl(&dir)
        .args(["encode", "FeedXmlIncludeFlags", "CFExtensions"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "FeedXmlIncludeFlags.CFExtensions = 1\n");
}

#[test]
fn encode_combined_flags_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = importdecl(&dir)
        .args(["encode", "FeedXmlIncludeFlags", "None", "CFExtensions", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["value"], 1);
    assert_eq!(json["projected"], "FeedXmlIncludeFlags");
    assert_eq!(json["symbol"], "Platform.Feeds.FeedXmlIncludeFlags");
}

#[test]
fn resolve_json_reports_projection() {
    let dir = tempfile::tempdir().unwrap();
    let output = importdecl(&dir)
        .args(["resolve", "Platform.Feeds.FeedXmlIncludeFlags", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["projected"], "FeedXmlIncludeFlags");
    assert_eq!(json["linkage"], "external");
    assert_eq!(json["members"][1]["name"], "CFExtensions");
    assert_eq!(json["members"][1]["value"], 1);
}

#[test]
fn no_builtin_leaves_table_empty() {
    let dir = tempfile::tempdir().unwrap();
    let output = importdecl(&dir)
        .args(["--no-builtin", "resolve", "FeedXmlIncludeFlags"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unknown symbol `FeedXmlIncludeFlags`"), "{stderr}");
}

#[test]
fn check_reports_every_invalid_declaration() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("decls")).unwrap();
    fs::write(
        dir.path().join("decls/app.toml"),
        r#"
namespace = "Platform.Feeds"

[[declaration]]
name = "FeedXmlIncludeFlags"
attributes = ["imported", "numeric-values"]
members = [{ name = "None" }]

[[declaration]]
name = "App.Broken"
members = [{ name = "A", value = 1 }, { name = "B", value = 1 }]
"#,
    )
    .unwrap();

    let output = importdecl(&dir)
        .args(["check", "-m", "decls"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("2 error(s); 8 declaration(s) from 1 manifest file(s)"), "{text}");
    assert!(text.contains("duplicate symbol `Platform.Feeds.FeedXmlIncludeFlags`"), "{text}");
    assert!(text.contains("value 1 is already used by `A`"), "{text}");
}

#[test]
fn config_file_adds_manifests() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".importdecl")).unwrap();
    fs::create_dir_all(dir.path().join("decls")).unwrap();
    fs::write(
        dir.path().join(".importdecl/config.toml"),
        "[manifests]\npaths = [\"decls\"]\nbuiltin = false\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("decls/mode.toml"),
        r#"
[[declaration]]
name = "App.Mode"
attributes = ["lower-case-name-values"]
members = [{ name = "Light" }, { name = "Dark" }]
"#,
    )
    .unwrap();

    let output = importdecl(&dir).args(["plan", "App.Mode"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "define App.Mode (App.Mode)\n  Light => \"light\"\n  Dark => \"dark\"\n"
    );
}

#[test]
fn schema_flag_prints_every_schema() {
    let dir = tempfile::tempdir().unwrap();
    let output = importdecl(&dir).arg("--schema").output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["config_path"], ".importdecl/config.toml");
    assert!(json["schema"].is_object());
    assert!(json["manifest_schema"].is_object());
    for command in ["check", "list", "resolve", "encode", "plan"] {
        assert!(json["output_schemas"][command].is_object(), "{command}");
    }
    assert!(json["output_schemas"]["encode"]["properties"]["value"].is_object());
}
