//! End-to-end tests for the gearstash binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gearstash(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gearstash").unwrap();
    cmd.env("HOME", home)
        .env_remove("GEARSTASH_SYNC_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn add_tent(home: &Path, user: &str) {
    gearstash(home)
        .args([
            "add", user, "--name", "Tent", "--weight", "2.5 kg", "--category", "Shelter",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added #1 Tent (2.5 kg)"));
}

fn json_output(home: &Path, args: &[&str]) -> serde_json::Value {
    let output = gearstash(home).args(["-o", "json"]).args(args).output().unwrap();
    assert!(output.status.success(), "command {args:?} failed");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_add_then_list() {
    let home = TempDir::new().unwrap();
    add_tent(home.path(), "u1");

    let value = json_output(home.path(), &["list", "u1"]);

    assert_eq!(value["count"], 1);
    assert_eq!(
        value["items"][0],
        serde_json::json!({"id": 1, "name": "Tent", "weight": "2.5 kg", "category": "Shelter"})
    );
}

#[test]
fn test_unknown_user_is_empty() {
    let home = TempDir::new().unwrap();

    let value = json_output(home.path(), &["list", "unknown-user"]);

    assert_eq!(value["count"], 0);
}

#[test]
fn test_save_from_stdin_mirrors_backup() {
    let home = TempDir::new().unwrap();

    gearstash(home.path())
        .args(["save", "u1"])
        .write_stdin(r#"[{"id":1,"name":"Tent","weight":"2.5 kg","category":"Shelter"}]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 1 items for u1"));

    let backup = std::fs::read_to_string(home.path().join(".gearstash/backup.json")).unwrap();
    let cache: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&backup).unwrap();
    let cached: serde_json::Value =
        serde_json::from_str(cache["gearList_backup_u1"].as_str().unwrap()).unwrap();

    assert_eq!(cached[0]["name"], "Tent");
}

#[test]
fn test_unsynced_entry_dropped_after_three_attempts() {
    let home = TempDir::new().unwrap();
    add_tent(home.path(), "u1");

    // The save itself made the first attempt
    let status = json_output(home.path(), &["sync", "status"]);
    assert_eq!(status["pending"], 1);

    let second = json_output(home.path(), &["sync", "run"]);
    assert_eq!(second["retrying"], 1);

    let third = json_output(home.path(), &["sync", "run"]);
    assert_eq!(third["dropped"], 1);

    let status = json_output(home.path(), &["sync", "status"]);
    assert_eq!(status["pending"], 0);
}

#[test]
fn test_fallback_only_when_database_unusable() {
    let home = TempDir::new().unwrap();
    // A directory where the database file should be
    std::fs::create_dir_all(home.path().join(".gearstash/gearstash.db")).unwrap();

    add_tent(home.path(), "u1");

    let value = json_output(home.path(), &["list", "u1"]);
    assert_eq!(value["items"][0]["name"], "Tent");

    let status = json_output(home.path(), &["sync", "status"]);
    assert_eq!(status["fallback_only"], true);
}

#[test]
fn test_summary() {
    let home = TempDir::new().unwrap();
    add_tent(home.path(), "u1");

    gearstash(home.path())
        .args(["summary", "u1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total weight: 2.50 kg"));
}

#[test]
fn test_remove_missing_item_fails() {
    let home = TempDir::new().unwrap();

    gearstash(home.path())
        .args(["remove", "u1", "42"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Item #42 not found"));
}

#[test]
fn test_clear_requires_force() {
    let home = TempDir::new().unwrap();

    gearstash(home.path())
        .args(["sync", "clear"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_degraded_mode_warns_by_default() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join(".gearstash/gearstash.db")).unwrap();

    gearstash(home.path())
        .args(["list", "u1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("using fallback cache only"));
}

#[test]
fn test_packing_list_summary_counts_quantities() {
    let home = TempDir::new().unwrap();
    add_tent(home.path(), "u1");
    gearstash(home.path())
        .args([
            "add", "u1", "--name", "Gas canister", "--weight", "350 g", "--category", "Kitchen",
        ])
        .assert()
        .success();

    let list = gearstash(home.path())
        .args(["-o", "json", "pack", "new", "u1", "--name", "Weekend", "-i", "1", "-i", "2:2"])
        .output()
        .unwrap();
    assert!(list.status.success());

    gearstash(home.path())
        .args(["pack", "summary"])
        .write_stdin(list.stdout)
        .assert()
        .success()
        .stdout(predicate::str::contains("(3 items, 3.20 kg)"))
        .stdout(predicate::str::contains("Total weight: 3.20 kg"));
}

#[test]
fn test_packing_list_unknown_gear_fails() {
    let home = TempDir::new().unwrap();

    gearstash(home.path())
        .args(["pack", "new", "u1", "--name", "Trip", "-i", "5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Gear item #5 not found"));
}

#[test]
fn test_config_set_endpoint_persists() {
    let home = TempDir::new().unwrap();

    gearstash(home.path())
        .args(["config", "set-endpoint", "http://127.0.0.1:9/"])
        .assert()
        .success();

    let value = json_output(home.path(), &["config", "show"]);
    assert_eq!(value["sync"]["endpoint"], "http://127.0.0.1:9/");
    assert!(home.path().join(".gearstash/config.yaml").exists());
}
