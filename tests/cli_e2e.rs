//! End-to-end tests for the chatmap binary.

use assert_cmd::Command;
use predicates::prelude::*;

const TRANSCRIPT: &str = "\
[9/12/24, 08:54:40] Messages and calls are end-to-end encrypted.
[9/12/24, 08:54:43] ~ Bob: <Media omitted>
[9/12/24, 08:55:00] Alice: hello
everyone";

fn chatmap() -> Command {
    Command::cargo_bin("chatmap").unwrap()
}

#[test]
fn no_args_shows_usage_error() {
    chatmap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_transcript_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    chatmap()
        .current_dir(&dir)
        .arg("does-not-exist.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn converts_transcript_file_to_html() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("_chat.txt"), TRANSCRIPT).unwrap();

    chatmap()
        .current_dir(&dir)
        .args(["_chat.txt", "-o", "out.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done!"));

    let html = std::fs::read_to_string(dir.path().join("out.html")).unwrap();
    assert!(html.contains(r#"<span class="sender">Alice</span>"#));
    assert!(html.contains("hello<br>everyone"));
    assert!(html.contains(r#"<div class="message notice">"#));
    assert!(html.contains(r#"<ul class="summary">"#));
}

#[test]
fn accepts_export_directory_argument() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("_chat.txt"), TRANSCRIPT).unwrap();
    let out = dir.path().join("chat.html");

    chatmap()
        .arg(dir.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    assert!(out.is_file());
}

#[test]
fn directory_without_chat_txt_fails() {
    let dir = tempfile::tempdir().unwrap();
    chatmap()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("_chat.txt"));
}

#[test]
fn no_summary_flag_drops_summary_block() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("_chat.txt"), TRANSCRIPT).unwrap();

    chatmap()
        .current_dir(&dir)
        .args(["_chat.txt", "-o", "out.html", "--no-summary"])
        .assert()
        .success();

    let html = std::fs::read_to_string(dir.path().join("out.html")).unwrap();
    assert!(!html.contains(r#"<ul class="summary">"#));
}

#[test]
fn skip_notices_flag_drops_notices() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("_chat.txt"), TRANSCRIPT).unwrap();

    chatmap()
        .current_dir(&dir)
        .args(["_chat.txt", "-o", "out.html", "--skip-notices"])
        .assert()
        .success();

    let html = std::fs::read_to_string(dir.path().join("out.html")).unwrap();
    assert!(!html.contains(r#"<div class="message notice">"#));
}

#[test]
fn custom_title_lands_in_document() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("_chat.txt"), TRANSCRIPT).unwrap();

    chatmap()
        .current_dir(&dir)
        .args(["_chat.txt", "-o", "out.html", "--title", "Holiday group"])
        .assert()
        .success();

    let html = std::fs::read_to_string(dir.path().join("out.html")).unwrap();
    assert!(html.contains("<title>Holiday group</title>"));
}

#[test]
fn unrecognized_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "just some notes\nnothing else").unwrap();

    chatmap()
        .current_dir(&dir)
        .args(["notes.txt", "-o", "out.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized export format"));

    assert!(!dir.path().join("out.html").exists());
}
