//! CLI contract tests
//!
//! Drives the `ngender` binary end to end: output formats, modes, share
//! tokens, batch input, and fatal handling of bad reference data.

use std::path::Path;
use std::process::{Command, Output, Stdio};

fn ngender_bin() -> String {
    env!("CARGO_BIN_EXE_ngender").to_string()
}

/// Command isolated from the user's config and environment
fn ngender(dir: &Path) -> Command {
    let mut cmd = Command::new(ngender_bin());
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("NGENDER_CHARFREQ")
        .env_remove("NGENDER_TIPS")
        .env_remove("RUST_LOG");
    cmd
}

fn run(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output: Output = ngender(dir).args(args).output().expect("Failed to run ngender");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn parse_json(s: &str) -> serde_json::Value {
    serde_json::from_str(s).expect("Invalid JSON")
}

// ============================================================================
// guess
// ============================================================================

#[test]
fn test_guess_json_normal() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["guess", "王伟", "--format", "json"]);
    assert_eq!(code, 0);

    let v = parse_json(&stdout);
    assert_eq!(v["code"], 200);
    assert_eq!(v["data"]["name"], "王伟");
    assert_eq!(v["data"]["gender"], "male");
    assert_eq!(v["data"]["gender_cn"], "男");
    assert_eq!(v["data"]["mode"], 0);
    assert_eq!(v["data"]["nolimit_used"], false);
    let prob = v["data"]["probability"].as_f64().unwrap();
    assert!(prob > 0.6 && prob <= 1.0, "prob={prob}");
    assert!(!v["data"]["fun_tip"].as_str().unwrap().is_empty());
}

#[test]
fn test_guess_modes_relate_to_normal() {
    let dir = tempfile::tempdir().unwrap();
    let data = |mode: &str| {
        let (code, stdout, _) = run(
            dir.path(),
            &["guess", "王芳", "--format", "json", "--mode", mode],
        );
        assert_eq!(code, 0, "mode={mode}");
        parse_json(&stdout)["data"].clone()
    };

    let normal = data("normal");
    let reverse = data("1");
    let opposite = data("opposite");

    assert_eq!(normal["gender"], "female");
    assert_eq!(reverse["gender"], "male");
    assert_eq!(reverse["mode"], 1);
    assert!(reverse["probability"].as_f64().unwrap() <= 0.4);
    assert_eq!(opposite["gender"], "male");
    assert_eq!(opposite["probability"], normal["probability"]);
}

#[test]
fn test_guess_invalid_name_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["guess", "Alice", "--format", "json"]);
    assert_eq!(code, 1);
    let v = parse_json(&stdout);
    assert_eq!(v["code"], 400);
    assert!(v["data"].is_null());

    let (code, _, stderr) = run(dir.path(), &["guess", "伟"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("2-4"), "stderr: {stderr}");
}

#[test]
fn test_guess_nolimit_accepts_single_character() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(
        dir.path(),
        &["guess", "伟", "--nolimit", "--format", "json"],
    );
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    assert_eq!(v["data"]["nolimit_used"], true);
}

#[test]
fn test_guess_unknown_mode_rejected_by_cli() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run(dir.path(), &["guess", "王伟", "--mode", "sideways"]);
    assert_ne!(code, 0);
}

#[test]
fn test_guess_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["guess", "李娜"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("李娜"));
    assert!(stdout.contains("female"));
    assert!(stdout.contains("正常"));
}

// ============================================================================
// share tokens
// ============================================================================

#[test]
fn test_share_token_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["share", "王芳", "--mode", "opposite"]);
    assert_eq!(code, 0);
    let token = stdout.trim().to_string();
    assert_eq!(token, "@王芳");

    let (code, stdout, _) = run(
        dir.path(),
        &["guess", "--share", &token, "--format", "json"],
    );
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    assert_eq!(v["data"]["mode"], 2);
    assert_eq!(v["data"]["name"], "王芳");
}

#[test]
fn test_share_rejects_invalid_name() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run(dir.path(), &["share", "Bob"]);
    assert_ne!(code, 0);
}

// ============================================================================
// batch
// ============================================================================

#[test]
fn test_batch_continues_past_invalid_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("names.txt");
    std::fs::write(&input, "王伟\n\nnot-a-name\n李娜\n").unwrap();

    let (code, stdout, _) = run(
        dir.path(),
        &["batch", "--input", input.to_str().unwrap(), "--mode", "2"],
    );
    assert_eq!(code, 0);

    let lines: Vec<serde_json::Value> = stdout.lines().map(parse_json).collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["data"]["gender"], "female");
    assert_eq!(lines[1]["code"], 400);
    assert_eq!(lines[2]["data"]["gender"], "male");
}

#[test]
fn test_batch_reads_stdin() {
    use std::io::Write;

    let dir = tempfile::tempdir().unwrap();
    let mut child = ngender(dir.path())
        .arg("batch")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all("赵本山\n宋丹丹\n".as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2);
}

// ============================================================================
// reference data and config
// ============================================================================

#[test]
fn test_check_bundled_data_passes() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["check"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("bundled"));
    assert!(stdout.contains("female_reverse="));
}

#[test]
fn test_zero_total_table_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("charfreq.json"),
        r#"{"伟": {"male": 12, "female": 0}}"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("ngender.toml"),
        "[data]\ncharfreq = \"charfreq.json\"\n",
    )
    .unwrap();

    let (code, stdout, _) = run(dir.path(), &["check"]);
    assert_ne!(code, 0);
    assert!(stdout.contains("✗"));

    let (code, stdout, stderr) = run(dir.path(), &["guess", "王伟", "--format", "json"]);
    assert_ne!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("reference data"), "stderr: {stderr}");
}

#[test]
fn test_incomplete_caption_bank_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let tips = dir.path().join("tips.json");
    std::fs::write(&tips, r#"{"male_sure": ["{targetG}"]}"#).unwrap();

    let output = ngender(dir.path())
        .env("NGENDER_TIPS", &tips)
        .args(["guess", "王伟"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_explicit_config_sets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "[request]\nnolimit = true\n\n[output]\nformat = \"json\"\n").unwrap();

    let (code, stdout, _) = run(
        dir.path(),
        &["--config", config.to_str().unwrap(), "guess", "爱新觉罗玄烨"],
    );
    assert_eq!(code, 0);
    let v = parse_json(&stdout);
    assert_eq!(v["data"]["nolimit_used"], true);
}

#[test]
fn test_init_writes_example_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ngender.toml");
    let (code, stdout, _) = run(dir.path(), &["init", "--path", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Created"));
    assert!(path.exists());

    // The example parses and the CLI still works with it in place
    let (code, _, _) = run(dir.path(), &["guess", "王伟"]);
    assert_eq!(code, 0);
}
