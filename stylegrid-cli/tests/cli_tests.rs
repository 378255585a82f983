//! End-to-end tests for the `stylegrid` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary style library with a config file pointing at it.
struct Library {
    temp: TempDir,
    config: PathBuf,
}

impl Library {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(
            root.join("styles.csv"),
            "name,prompt,negative_prompt\nBASE_photo,photo,blurry\nSHARED,root version,\n",
        )
        .unwrap();
        fs::create_dir(root.join("ext")).unwrap();
        fs::write(root.join("ext").join("mine.csv"), "SHARED,ext version,\n").unwrap();
        fs::write(
            root.join("user.csv"),
            "name,prompt,negative_prompt\nSTYLE_oil,\"oil painting of {prompt}\",photo\n",
        )
        .unwrap();

        let config = root.join("stylegrid.toml");
        fs::write(
            &config,
            format!(
                "root_file = '{}'\nstyles_dir = '{}'\nstate_dir = '{}'\nuser_sources = ['{}']\n",
                root.join("styles.csv").display(),
                root.join("ext").display(),
                root.join("state").display(),
                root.join("user.csv").display(),
            ),
        )
        .unwrap();

        Self { temp, config }
    }

    fn root(&self) -> &Path {
        self.temp.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("stylegrid").unwrap();
        cmd.current_dir(self.root())
            .env("HOME", self.root())
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config);
        cmd
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.cmd().arg("--json").args(args).output().unwrap();
        assert!(
            output.status.success(),
            "command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

#[test]
fn test_list_json_returns_sources_and_merged_categories() {
    let lib = Library::new();
    let value = lib.json(&["list"]);

    let sources: Vec<&str> = value["sources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap())
        .collect();
    assert_eq!(sources, vec!["styles.csv", "mine.csv", "user.csv"]);
    assert_eq!(value["styles"].as_array().unwrap().len(), 4);

    let categories = value["categories"].as_array().unwrap();
    assert_eq!(categories[0]["name"], "BASE");
    let shared = categories
        .iter()
        .flat_map(|c| c["styles"].as_array().unwrap())
        .find(|s| s["name"] == "SHARED")
        .unwrap();
    assert_eq!(shared["source"], "mine.csv");
}

#[test]
fn test_list_table_output() {
    let lib = Library::new();
    lib.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("BASE_photo"))
        .stdout(predicate::str::contains("4 style(s)").not())
        .stdout(predicate::str::contains("3 style(s)"));
}

#[test]
fn test_list_unknown_source_fails() {
    let lib = Library::new();
    lib.cmd()
        .args(["list", "--source", "nope.csv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("source 'nope.csv' not found"));
}

#[test]
fn test_save_then_list_shows_style() {
    let lib = Library::new();
    lib.cmd()
        .args(["save", "SCENE_city", "--prompt", "neon, rain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'SCENE_city'"));

    let written = fs::read_to_string(lib.root().join("ext").join("styles.csv")).unwrap();
    assert_eq!(
        written,
        "name,prompt,negative_prompt\nSCENE_city,\"neon, rain\",\n"
    );

    let value = lib.json(&["list", "--category", "scene"]);
    let categories = value["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["styles"][0]["display_name"], "city");
}

#[test]
fn test_save_empty_name_reports_json_error() {
    let lib = Library::new();
    let output = lib
        .cmd()
        .args(["--json", "save", "   "])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["success"], false);
    assert!(value["error"].as_str().unwrap().contains("name"));
}

#[test]
fn test_delete_defaults_to_merge_winner() {
    let lib = Library::new();
    let value = lib.json(&["delete", "SHARED"]);
    assert_eq!(value["source"], "mine.csv");

    let value = lib.json(&["search", "shared"]);
    assert_eq!(value["styles"][0]["prompt"], "root version");

    lib.cmd()
        .args(["delete", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("style 'ghost' not found"));
}

#[test]
fn test_apply_rewrites_prompt_and_tracks_usage() {
    let lib = Library::new();
    lib.cmd()
        .args(["apply", "STYLE_oil", "BASE_photo", "--prompt", "a cat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("oil painting of a cat, photo"))
        .stdout(predicate::str::contains("Negative prompt: photo, blurry"));

    let value = lib.json(&["usage"]);
    let usage = value["usage"].as_array().unwrap();
    assert_eq!(usage.len(), 2);
    assert_eq!(usage[0]["count"], 1);
}

#[test]
fn test_apply_silent_and_no_track() {
    let lib = Library::new();
    let value = lib.json(&[
        "apply", "STYLE_oil", "missing", "--prompt", "a cat", "--mode", "silent", "--no-track",
    ]);
    assert_eq!(value["prompt"], "a cat");
    assert_eq!(value["applied"][0], "STYLE_oil");
    assert_eq!(value["skipped"][0], "missing");

    let value = lib.json(&["usage"]);
    assert!(value["usage"].as_array().unwrap().is_empty());
}

#[test]
fn test_conflicts_json() {
    let lib = Library::new();
    let value = lib.json(&["conflicts", "BASE_photo", "STYLE_oil"]);
    let conflicts = value["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["style"], "BASE_photo");
    assert_eq!(conflicts[0]["conflicts_with"], "STYLE_oil");
    assert_eq!(conflicts[0]["tokens"][0], "photo");
}

#[test]
fn test_search_syntax() {
    let lib = Library::new();
    let value = lib.json(&["search", "@base"]);
    assert_eq!(value["count"], 1);

    let value = lib.json(&["search", "-blur"]);
    let names: Vec<&str> = value["styles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert!(!names.contains(&"BASE_photo"));
    assert!(names.contains(&"STYLE_oil"));
}

#[test]
fn test_presets_round_trip_through_apply() {
    let lib = Library::new();
    lib.cmd()
        .args(["preset", "save", "painted", "STYLE_oil"])
        .assert()
        .success();

    let value = lib.json(&["preset", "list"]);
    assert!(value["presets"]["painted"].is_object());

    lib.cmd()
        .args(["preset", "show", "painted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STYLE_oil"));

    lib.cmd()
        .args(["apply", "--preset", "painted", "--prompt", "a dog", "--no-track"])
        .assert()
        .success()
        .stdout(predicate::str::contains("oil painting of a dog"));

    lib.cmd()
        .args(["preset", "delete", "painted"])
        .assert()
        .success();
    lib.cmd()
        .args(["preset", "show", "painted"])
        .assert()
        .failure();
}

#[test]
fn test_reload_detects_changes_between_runs() {
    let lib = Library::new();
    assert_eq!(lib.json(&["reload"])["changed"], true);
    assert_eq!(lib.json(&["reload"])["changed"], false);

    fs::write(lib.root().join("ext").join("new.csv"), "POSE_sit,sitting\n").unwrap();
    let value = lib.json(&["reload"]);
    assert_eq!(value["changed"], true);
    assert_eq!(value["styles"], 5);
}

#[test]
fn test_user_source_under_home() {
    let lib = Library::new();
    fs::write(lib.root().join("portraits.csv"), "PORTRAIT_soft,soft light\n").unwrap();
    let config = lib.root().join("home.toml");
    fs::write(
        &config,
        format!(
            "root_file = '{}'\nstyles_dir = '{}'\nstate_dir = '{}'\nuser_sources = ['~/portraits.csv']\n",
            lib.root().join("none.csv").display(),
            lib.root().join("empty").display(),
            lib.root().join("state").display(),
        ),
    )
    .unwrap();

    let output = Command::cargo_bin("stylegrid")
        .unwrap()
        .current_dir(lib.root())
        .env("HOME", lib.root())
        .arg("--config")
        .arg(&config)
        .args(["--json", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["sources"], serde_json::json!(["portraits.csv"]));
    assert_eq!(value["styles"][0]["name"], "PORTRAIT_soft");
}

#[test]
fn test_missing_config_file_fails() {
    let lib = Library::new();
    Command::cargo_bin("stylegrid")
        .unwrap()
        .current_dir(lib.root())
        .env("HOME", lib.root())
        .args(["--config", "does-not-exist.toml", "list"])
        .assert()
        .failure()
        .code(1);
}
