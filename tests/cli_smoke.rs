mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// A server that has the task routes but no profile endpoint, so any
/// profile fetch fails with a 404.
fn spawn_tasks_only_server() -> String {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("runtime");
        rt.block_on(async move {
            let app = Router::new().route(
                "/api/tasks",
                get(|| async { Json(json!([])) }).post(
                    |Json(mut draft): Json<Value>| async move {
                        draft["id"] = json!("1756600000000");
                        draft["status"] = json!("pending");
                        draft["createdAt"] = json!("2026-08-31T00:00:00Z");
                        (StatusCode::CREATED, Json(draft))
                    },
                ),
            );
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind test listener");
            let addr = listener.local_addr().expect("listener addr");
            tx.send(addr).expect("report addr");
            axum::serve(listener, app).await.expect("serve");
        });
    });
    format!("http://{}", rx.recv().expect("server addr"))
}

fn taskdeck(api: &str, cache: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("taskdeck").expect("binary");
    cmd.env("TASKDECK_API", api)
        .env("TASKDECK_CACHE_DIR", cache.path())
        .env_remove("TASKDECK_CONFIG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("taskdeck")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("serve")
                .and(predicate::str::contains("task"))
                .and(predicate::str::contains("profile"))
                .and(predicate::str::contains("stats")),
        );
}

#[test]
fn add_then_list_round_trips() {
    let api = support::spawn_server_thread();
    let cache = TempDir::new().expect("tempdir");

    let output = taskdeck(&api, &cache)
        .args(["task", "add", "Buy milk", "--priority", "low", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let envelope: Value = serde_json::from_slice(&output).expect("task add json");
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["data"]["title"], "Buy milk");
    assert_eq!(envelope["data"]["status"], "pending");

    let output = taskdeck(&api, &cache)
        .args(["task", "list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let envelope: Value = serde_json::from_slice(&output).expect("task list json");
    let tasks = envelope["data"].as_array().expect("task array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Buy milk");
}

#[test]
fn edit_changes_fields_and_preserves_completion() {
    let api = support::spawn_server_thread();
    let cache = TempDir::new().expect("tempdir");

    let output = taskdeck(&api, &cache)
        .args(["task", "add", "Draft report", "--priority", "low", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let envelope: Value = serde_json::from_slice(&output).expect("task add json");
    let id = envelope["data"]["id"].as_str().expect("id").to_string();

    taskdeck(&api, &cache)
        .args(["task", "done", &id])
        .assert()
        .success();

    let output = taskdeck(&api, &cache)
        .args([
            "task",
            "edit",
            &id,
            "--title",
            "Final report",
            "--priority",
            "high",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let envelope: Value = serde_json::from_slice(&output).expect("task edit json");
    assert_eq!(envelope["data"]["title"], "Final report");
    assert_eq!(envelope["data"]["priority"], "high");
    assert_eq!(envelope["data"]["status"], "completed");
    assert!(envelope["data"]["completedAt"].is_string());
}

#[test]
fn edit_requires_a_field() {
    let cache = TempDir::new().expect("tempdir");
    taskdeck("http://127.0.0.1:1", &cache)
        .args(["task", "edit", "123"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn edit_unknown_id_exits_not_found() {
    let api = support::spawn_server_thread();
    let cache = TempDir::new().expect("tempdir");
    taskdeck(&api, &cache)
        .args(["task", "edit", "0", "--title", "Ghost story"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn add_without_priority_survives_a_missing_profile() {
    let api = spawn_tasks_only_server();
    let cache = TempDir::new().expect("tempdir");

    let output = taskdeck(&api, &cache)
        .args(["task", "add", "Buy milk", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let envelope: Value = serde_json::from_slice(&output).expect("task add json");
    assert_eq!(envelope["data"]["priority"], "medium");
}

#[test]
fn short_titles_are_rejected_before_any_request() {
    let cache = TempDir::new().expect("tempdir");
    // No server is running; validation must fail first.
    taskdeck("http://127.0.0.1:1", &cache)
        .args(["task", "add", "ab"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("at least 3 characters"));
}

#[test]
fn stats_counts_completions() {
    let api = support::spawn_server_thread();
    let cache = TempDir::new().expect("tempdir");

    let output = taskdeck(&api, &cache)
        .args(["task", "add", "Water plants", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let envelope: Value = serde_json::from_slice(&output).expect("task add json");
    let id = envelope["data"]["id"].as_str().expect("id").to_string();

    taskdeck(&api, &cache)
        .args(["task", "done", &id])
        .assert()
        .success();

    let output = taskdeck(&api, &cache)
        .args(["stats", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let envelope: Value = serde_json::from_slice(&output).expect("stats json");
    assert_eq!(envelope["data"]["total"], 1);
    assert_eq!(envelope["data"]["completed"], 1);
    assert_eq!(envelope["data"]["completed_today"], 1);
}

#[test]
fn profile_show_and_set() {
    let api = support::spawn_server_thread();
    let cache = TempDir::new().expect("tempdir");

    let output = taskdeck(&api, &cache)
        .args(["profile", "show", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let envelope: Value = serde_json::from_slice(&output).expect("profile json");
    assert_eq!(envelope["data"]["name"], "John Doe");

    let output = taskdeck(&api, &cache)
        .args(["profile", "set", "--theme", "dark", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let envelope: Value = serde_json::from_slice(&output).expect("profile json");
    assert_eq!(envelope["data"]["theme"], "dark");
}

#[test]
fn bad_email_is_rejected() {
    let cache = TempDir::new().expect("tempdir");
    taskdeck("http://127.0.0.1:1", &cache)
        .args(["profile", "set", "--email", "not-an-email"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("email"));
}

#[test]
fn profile_set_requires_a_field() {
    let cache = TempDir::new().expect("tempdir");
    taskdeck("http://127.0.0.1:1", &cache)
        .args(["profile", "set"])
        .assert()
        .failure()
        .code(2);
}
