//! Integration tests for the tasker CLI

use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the tasker binary, rooted in `dir`
fn tasker(dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("tasker"));
    cmd.env_remove("TASKER_FILE")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir.path());
    cmd
}

fn tasks_file(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join("tasks.txt")).unwrap_or_default()
}

#[test]
fn test_help() {
    let temp = TempDir::new().unwrap();
    tasker(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Track personal tasks"));
}

#[test]
fn test_version() {
    let temp = TempDir::new().unwrap();
    tasker(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_add_and_list() {
    let temp = TempDir::new().unwrap();

    tasker(&temp)
        .args(["add", "Buy milk", "-d", "two litres"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added with ID: 1"));

    tasker(&temp)
        .args(["add", "Call mom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added with ID: 2"));

    tasker(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("two litres"))
        .stdout(predicate::str::contains("Call mom"));

    assert_eq!(tasks_file(&temp).lines().count(), 2);
}

#[test]
fn test_list_empty() {
    let temp = TempDir::new().unwrap();
    tasker(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_add_rejects_blank_title() {
    let temp = TempDir::new().unwrap();
    tasker(&temp)
        .args(["add", "   "])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("title must not be empty"));

    assert!(!temp.path().join("tasks.txt").exists());
}

#[test]
fn test_add_rejects_long_description() {
    let temp = TempDir::new().unwrap();
    let long = "d".repeat(501);
    tasker(&temp)
        .args(["add", "Title", "-d", &long])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("500"));
}

#[test]
fn test_status_with_russian_answer() {
    let temp = TempDir::new().unwrap();
    tasker(&temp).args(["add", "A"]).assert().success();

    tasker(&temp)
        .args(["status", "1", "да"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1 marked completed"));

    assert!(tasks_file(&temp).starts_with("1|A||true|"));

    tasker(&temp)
        .args(["status", "1", "нет"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not completed"));
}

#[test]
fn test_status_rejects_bad_answer() {
    let temp = TempDir::new().unwrap();
    tasker(&temp).args(["add", "A"]).assert().success();

    tasker(&temp)
        .args(["status", "1", "maybe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("yes/no"));
}

#[test]
fn test_done_missing_task_is_not_found() {
    let temp = TempDir::new().unwrap();
    tasker(&temp)
        .args(["done", "99"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Task with ID 99 not found"));
}

#[test]
fn test_invalid_id_rejected() {
    let temp = TempDir::new().unwrap();
    for bad in ["0", "-1", "abc"] {
        tasker(&temp)
            .args(["done", "--", bad])
            .assert()
            .failure()
            .stderr(predicate::str::contains("positive numeric ID"));
    }
}

#[test]
fn test_pending_and_completed_filters() {
    let temp = TempDir::new().unwrap();
    tasker(&temp).args(["add", "Open task"]).assert().success();
    tasker(&temp).args(["add", "Finished task"]).assert().success();
    tasker(&temp).args(["done", "2"]).assert().success();

    tasker(&temp)
        .args(["list", "--pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Open task"))
        .stdout(predicate::str::contains("Finished task").not());

    tasker(&temp)
        .args(["list", "--completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished task"))
        .stdout(predicate::str::contains("Open task").not());
}

#[test]
fn test_list_json_newest_first() {
    let temp = TempDir::new().unwrap();
    tasker(&temp).args(["add", "A"]).assert().success();
    tasker(&temp).args(["add", "B"]).assert().success();

    let output = tasker(&temp).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let tasks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let titles: Vec<&str> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["B", "A"]);
}

#[test]
fn test_show_json() {
    let temp = TempDir::new().unwrap();
    tasker(&temp)
        .args(["add", "Pipe | title", "-d", "notes"])
        .assert()
        .success();

    tasker(&temp)
        .args(["show", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Pipe | title\""))
        .stdout(predicate::str::contains("\"description\": \"notes\""));
}

#[test]
fn test_edit_changes_title() {
    let temp = TempDir::new().unwrap();
    tasker(&temp).args(["add", "Old", "-d", "keep"]).assert().success();

    tasker(&temp)
        .args(["edit", "1", "--title", "New"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1 updated"));

    assert!(tasks_file(&temp).starts_with("1|New|keep|false|"));
}

#[test]
fn test_edit_without_changes_fails() {
    let temp = TempDir::new().unwrap();
    tasker(&temp).args(["add", "Old"]).assert().success();

    tasker(&temp)
        .args(["edit", "1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn test_delete_with_yes_flag() {
    let temp = TempDir::new().unwrap();
    tasker(&temp).args(["add", "A"]).assert().success();
    tasker(&temp).args(["add", "B"]).assert().success();

    tasker(&temp)
        .args(["delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1 deleted"));

    let content = tasks_file(&temp);
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("2|B|"));
}

#[test]
fn test_delete_confirmation_declined() {
    let temp = TempDir::new().unwrap();
    tasker(&temp).args(["add", "A"]).assert().success();

    tasker(&temp)
        .args(["delete", "1"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deletion cancelled."));

    assert_eq!(tasks_file(&temp).lines().count(), 1);
}

#[test]
fn test_delete_confirmation_accepted() {
    let temp = TempDir::new().unwrap();
    tasker(&temp).args(["add", "A"]).assert().success();

    tasker(&temp)
        .args(["delete", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1 deleted"));

    assert_eq!(tasks_file(&temp).lines().count(), 0);
}

#[test]
fn test_delete_missing_task() {
    let temp = TempDir::new().unwrap();
    tasker(&temp)
        .args(["delete", "5", "--yes"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_ids_not_reused_after_deleting_newest() {
    let temp = TempDir::new().unwrap();
    tasker(&temp).args(["add", "A"]).assert().success();
    tasker(&temp).args(["add", "B"]).assert().success();
    tasker(&temp).args(["delete", "2", "--yes"]).assert().success();

    tasker(&temp)
        .args(["add", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added with ID: 3"));
}

#[test]
fn test_file_flag_and_env_override() {
    let temp = TempDir::new().unwrap();

    tasker(&temp)
        .args(["--file", "custom.txt", "add", "A"])
        .assert()
        .success();
    assert!(temp.path().join("custom.txt").exists());

    tasker(&temp)
        .env("TASKER_FILE", "from-env.txt")
        .args(["add", "B"])
        .assert()
        .success();
    assert!(temp.path().join("from-env.txt").exists());
    assert!(!temp.path().join("tasks.txt").exists());
}

#[test]
fn test_config_file_sets_tasks_file() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("tasker.toml"),
        "tasks_file = \"data/todo.txt\"\n",
    )
    .unwrap();

    tasker(&temp)
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("todo.txt"));

    tasker(&temp).args(["add", "A"]).assert().success();
    assert!(temp.path().join("data").join("todo.txt").exists());
}

#[test]
fn test_invalid_config_reports_error() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("tasker.toml"), "tasks_file = [").unwrap();

    tasker(&temp)
        .arg("list")
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_corrupt_file_starts_empty_and_keeps_backup() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("tasks.txt"), "1|A||notabool|2024-01-01T00:00:00Z\n")
        .unwrap();

    tasker(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."))
        .stderr(predicate::str::contains("Failed to load tasks"));

    assert!(temp.path().join("tasks.txt.corrupt").exists());
}
