//! Exit behaviour of the `keyval` binary: success, success with a warning,
//! and hard failure.

use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

const NUMBER_X: &str = r#"{"type":"object","properties":{"x":{"type":"number"}},"required":["x"]}"#;

fn keyval(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_keyval"))
        .args(args)
        .current_dir(dir)
        .env_remove("GITHUB_ACTIONS")
        .env_remove("INPUT_KEY-AND-FILE")
        .env_remove("INPUT_KEY-AND-SCHEMA")
        .env_remove("INPUT_KEY_AND_FILE")
        .env_remove("INPUT_KEY_AND_SCHEMA")
        .env_remove("INPUT_BASE-DIR")
        .env_remove("INPUT_BASE_DIR")
        .env("RUST_LOG", "info")
        .output()
        .expect("spawn keyval")
}

fn fixtures() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("s.json"), NUMBER_X).unwrap();
    fs::write(tmp.path().join("a.json"), r#"{"x":1}"#).unwrap();
    fs::write(tmp.path().join("b.json"), r#"{"x":"nope"}"#).unwrap();
    fs::write(tmp.path().join("broken.json"), "{").unwrap();
    tmp
}

fn stdout(out: &Output) -> String { String::from_utf8_lossy(&out.stdout).into_owned() }

#[test]
fn all_valid_exits_zero() {
    let tmp = fixtures();
    let out = keyval(tmp.path(), &["--key-and-file", "t:a.json", "--key-and-schema", "t:s.json", "--format", "actions"]);
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.contains("All JSON files were valid against schemas"), "{text}");
    assert!(!text.contains("::warning::"), "{text}");
    assert!(!text.contains("::error::"), "{text}");
}

#[test]
fn invalid_document_exits_zero_with_warning() {
    let tmp = fixtures();
    let out = keyval(
        tmp.path(),
        &["--key-and-file", "t:a.json t:b.json", "--key-and-schema", "t:s.json", "--format", "actions"],
    );
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.contains("::warning::Some of your JSON files are not valid against the schema used"), "{text}");
    assert!(!text.contains("::error::"), "{text}");
}

#[test]
fn hard_failure_exits_non_zero_with_error_annotation() {
    let tmp = fixtures();
    let out = keyval(
        tmp.path(),
        &["--key-and-file", "t:a.json t:broken.json", "--key-and-schema", "t:s.json", "--format", "actions"],
    );
    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.contains("::error::Failed build: failed to parse JSON in"), "{text}");
    assert!(text.contains("broken.json"), "{text}");
}

#[test]
fn malformed_token_fails_under_log_format() {
    let tmp = fixtures();
    let out = keyval(tmp.path(), &["--key-and-file", "noseparator", "--key-and-schema", "t:s.json"]);
    assert_eq!(out.status.code(), Some(1));
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("Failed build: malformed token 'noseparator'"), "{err}");
}

#[test]
fn settings_file_supplies_inputs() {
    let tmp = fixtures();
    fs::write(
        tmp.path().join("keyval.toml"),
        "key_and_file = \"t:a.json\"\nkey_and_schema = \"t:s.json\"\nformat = \"actions\"\n",
    )
    .unwrap();
    let out = keyval(tmp.path(), &[]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("All JSON files were valid against schemas"));
}
