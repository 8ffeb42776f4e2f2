use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::Value;

fn asc_bin() -> String {
    env!("CARGO_BIN_EXE_asc").to_string()
}

#[test]
fn version_and_help() {
    let out = Command::new(asc_bin()).arg("--version").output().unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("asc "));

    let out = Command::new(asc_bin()).arg("--help").output().unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("COMMANDS:"));
}

#[test]
fn unknown_command_fails() {
    let out = Command::new(asc_bin()).arg("frobnicate").output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Unknown command"));
}

#[test]
fn bad_history_is_rejected_before_building() {
    let out = Command::new(asc_bin())
        .args(["query", "--history", "4s"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid --history"));
}

#[test]
fn query_json_reports_fresh_stone() {
    let out = Command::new(asc_bin())
        .args(["query", "--json", "--preset", "14"])
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let v: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["preset"], "total_fourteen");
    assert_eq!(v["pity_tier"], 5);
    assert_eq!(v["headline_probability"], "75%");
    assert_eq!(v["per_track_probability"][0], "5.92%");
    assert_eq!(v["per_track_probability"][2], "3.54%");
    assert_eq!(v["recommended"], serde_json::json!([true, true, false]));
}

#[test]
fn tables_writes_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("tables.json");
    let out = Command::new(asc_bin())
        .args(["tables", "--config", "../configs/default.yaml", "--manifest"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let bytes = std::fs::read(&manifest).unwrap();
    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["build_manifest_version"], 1);
    assert_eq!(v["num_attempts"], 10);
    assert_eq!(v["default_preset"], "total_fourteen");
    assert_eq!(v["tables"].as_array().unwrap().len(), 2);
    assert_eq!(v["tables"][0]["preset"], "total_sixteen");
    assert_eq!(v["tables"][1]["cells"], 3_162_456);
    assert!(v["config_hash"].as_str().unwrap().len() == 64);
}

#[test]
fn play_reads_commands_from_stdin() {
    let mut child = Command::new(asc_bin())
        .arg("play")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(b"1s\nbogus\nundo\n3f\ngrid\nquit\n").unwrap();
    }
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    // Initial snapshot, then 1s, undo and 3f.
    assert_eq!(stdout.matches("preset total_fourteen").count(), 4);
    assert!(stdout.contains("success rate 65%"));
    assert!(stdout.contains("◈◇◇◇◇◇◇◇◇◇"));
    assert!(stdout.contains('★'));
    assert!(String::from_utf8_lossy(&out.stderr).contains("type `help` for commands"));
}

#[test]
fn sim_caps_history_per_track() {
    let table_value = |count: usize| {
        let history = vec!["1s"; count].join(" ");
        let out = Command::new(asc_bin())
            .args(["sim", "--games", "200", "--history", &history])
            .output()
            .unwrap();
        assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
        let stdout = String::from_utf8_lossy(&out.stdout).into_owned();
        assert!(stdout.contains("Games: 200"), "{stdout}");
        stdout
            .lines()
            .find(|l| l.contains("Table value"))
            .map(str::to_string)
            .unwrap()
    };
    assert_eq!(table_value(11), table_value(10));
}
