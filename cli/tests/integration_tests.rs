use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_command-match"))
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_builtin_catalog_emits_json_lines() {
    let output = bin()
        .args(["check", "view task 12", "good morning"])
        .output()
        .expect("failed to run command-match");
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(first["input"], "view task 12");
    assert_eq!(first["matched"], true);
    assert_eq!(first["command"], "view task");
    assert_eq!(first["values"]["view task"], "12");
    assert_eq!(first["typed"]["view task"], 12);

    let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(second["matched"], false);
    assert!(second.get("command").is_none());
}

#[test]
fn check_reads_stdin_lines() {
    let mut child = bin()
        .args(["check", "--format", "text"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to run command-match");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"create task buy milk\nview tasks\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    assert_eq!(
        stdout_lines(&output),
        vec![
            "create task buy milk => create task",
            "  create task = buy milk",
            "view tasks => view tasks",
        ]
    );
}

#[test]
fn check_with_custom_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ping.yml");
    fs::write(
        &path,
        r#"
commands:
  - name: ping
    help_text: send an ICMP request
    no_args: true
    children:
      - name: -c
        help_text: how many to send
        value_type: int
        pattern: '\d+'
"#,
    )
    .unwrap();

    let output = bin()
        .args(["check", "--catalog", path.to_str().unwrap(), "ping -c 3 -A 1.1.1.1"])
        .output()
        .expect("failed to run command-match");
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_str(&stdout_lines(&output)[0]).unwrap();
    assert_eq!(result["command"], "ping");
    assert_eq!(result["values"]["-c"], "3");
    assert_eq!(result["residual"], "   -A 1.1.1.1");
}

#[test]
fn check_with_missing_catalog_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = bin()
        .args([
            "check",
            "--catalog",
            dir.path().join("missing.yml").to_str().unwrap(),
            "ping",
        ])
        .output()
        .expect("failed to run command-match");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load catalog"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// help-text / dump-builtin
// ---------------------------------------------------------------------------

#[test]
fn help_text_lists_builtin_commands() {
    let output = bin()
        .arg("help-text")
        .output()
        .expect("failed to run command-match");
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[2], "view tasks: View all tasks in this group");
}

#[test]
fn dump_builtin_round_trips_through_check() {
    let dir = tempfile::tempdir().unwrap();
    let output = bin()
        .args(["dump-builtin", "--format", "json"])
        .output()
        .expect("failed to run command-match");
    assert!(output.status.success());

    let path = dir.path().join("builtin.json");
    fs::write(&path, &output.stdout).unwrap();

    let output = bin()
        .args([
            "check",
            "--catalog",
            path.to_str().unwrap(),
            "--format",
            "text",
            "delete task 4",
        ])
        .output()
        .expect("failed to run command-match");
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["delete task 4 => delete task", "  delete task = 4"]
    );
}
