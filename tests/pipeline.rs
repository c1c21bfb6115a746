// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn ack2vim(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ack2vim"));
    cmd.current_dir(dir.path()).env("HOME", dir.path());
    cmd
}

#[test]
fn whole_word_search_opens_all_files() {
    let dir = TempDir::new().expect("tempdir");
    ack2vim(&dir)
        .args(["--files-from", "-", "-v", "-w", "main"])
        .write_stdin("a.py\nb.py\n")
        .assert()
        .success()
        .stdout("vim -p a.py b.py '+/\\<main\\>'\n");
}

#[test]
fn import_preset_searches_for_both_import_forms() {
    let dir = TempDir::new().expect("tempdir");
    ack2vim(&dir)
        .args(["--files-from", "-", "-v", "--import", "sys"])
        .write_stdin("mod.py\n")
        .assert()
        .success()
        .stdout("vim -p mod.py '+/\\(import sys\\|from sys import\\)'\n");
}

#[test]
fn literal_mode_escapes_backslash() {
    let dir = TempDir::new().expect("tempdir");
    ack2vim(&dir)
        .args(["--files-from", "-", "-v", "-Q", "a\\b"])
        .write_stdin("x.txt\n")
        .assert()
        .success()
        .stdout("vim -p x.txt '+/\\Va\\\\b'\n");
}

#[test]
fn duplicate_paths_are_opened_once() {
    let dir = TempDir::new().expect("tempdir");
    ack2vim(&dir)
        .args(["--files-from", "-", "-v", "x"])
        .write_stdin("a.py\nb.py\na.py\n")
        .assert()
        .success()
        .stdout("vim -p a.py b.py +/x\n");
}

#[test]
fn no_matches_prints_nothing_and_succeeds() {
    let dir = TempDir::new().expect("tempdir");
    ack2vim(&dir)
        .args(["--files-from", "-", "-v", "x"])
        .write_stdin("")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn missing_pattern_fails_without_output() {
    let dir = TempDir::new().expect("tempdir");
    ack2vim(&dir)
        .args(["--files-from", "-", "-v", "-w"])
        .write_stdin("a.py\n")
        .assert()
        .code(64)
        .stdout("")
        .stderr(predicate::str::contains("No search pattern given"));
}

#[test]
fn listing_mode_prints_one_command_per_file() {
    let dir = TempDir::new().expect("tempdir");
    ack2vim(&dir)
        .args(["--files-from", "-", "-i", "todo"])
        .write_stdin("a.rs\nb.rs\n")
        .assert()
        .code(75)
        .stdout("vim a.rs '+/\\ctodo'\nvim b.rs '+/\\ctodo'\n");
}

#[test]
fn file_list_can_be_read_from_a_file() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("hits.txt"), "src/lib.rs\n").expect("write list");
    ack2vim(&dir)
        .args(["--files-from", "hits.txt", "--no-tabs", "-v", "lib"])
        .assert()
        .success()
        .stdout("vim src/lib.rs +/lib\n");
}

#[test]
fn json_report_includes_translation() {
    let dir = TempDir::new().expect("tempdir");
    let assert = ack2vim(&dir)
        .args(["--format", "json", "--files-from", "-", "--py", "foo|bar"])
        .write_stdin("a.py\na.py\n")
        .assert()
        .success();

    let out = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let report: Value = serde_json::from_str(&out).expect("json");
    assert_eq!(report["translated"], "foo\\|bar");
    assert_eq!(report["files"], serde_json::json!(["a.py"]));
    assert_eq!(report["search_args"]["flags"], serde_json::json!(["--python"]));
    assert_eq!(report["pattern"]["pattern"], "foo|bar");
    assert_eq!(report["command"], "vim -p a.py '+/foo\\|bar'");

    let mut keys: Vec<&str> = report
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["command", "files", "pattern", "search_args", "translated"]
    );
}

#[test]
fn non_utf8_file_name_is_rejected_not_mangled() {
    let dir = TempDir::new().expect("tempdir");
    ack2vim(&dir)
        .args(["--files-from", "-", "-v", "x"])
        .write_stdin(b"caf\xe9.txt\n".to_vec())
        .assert()
        .code(65)
        .stdout("")
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn verbose_flag_logs_even_when_pattern_is_missing() {
    let dir = TempDir::new().expect("tempdir");
    ack2vim(&dir)
        .args(["--files-from", "-", "-V", "-w"])
        .write_stdin("a.py\n")
        .assert()
        .code(64)
        .stdout("")
        .stderr(predicate::str::contains("interpreting passthrough arguments"));
}

#[test]
fn perl_only_escapes_are_rewritten_for_vim() {
    let dir = TempDir::new().expect("tempdir");
    ack2vim(&dir)
        .args(["--files-from", "-", "-v", "(?i:x)\\x41\\h"])
        .write_stdin("a.c\n")
        .assert()
        .success()
        .stdout("vim -p a.c '+/\\c\\%(x\\)\\%x41[ \\t]'\n");
}

#[test]
fn value_of_type_flag_is_not_taken_as_pattern() {
    let dir = TempDir::new().expect("tempdir");
    let assert = ack2vim(&dir)
        .args(["--format", "json", "--files-from", "-", "--type", "perl", "main"])
        .write_stdin("a.pl\n")
        .assert()
        .success();

    let out = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let report: Value = serde_json::from_str(&out).expect("json");
    assert_eq!(report["translated"], "main");
    assert_eq!(
        report["search_args"]["flags"],
        serde_json::json!(["--type", "perl"])
    );
}

#[test]
fn config_file_sets_editor() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join(".ack2vimrc.toml"),
        "editor = \"nvim\"\ntab_pages = false\n",
    )
    .expect("write config");

    ack2vim(&dir)
        .args(["--files-from", "-", "-v", "x"])
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout("nvim a +/x\n");
}

#[test]
fn cli_editor_overrides_config() {
    let dir = TempDir::new().expect("tempdir");
    let cfg = dir.path().join("custom.toml");
    fs::write(&cfg, "editor = \"nvim\"\n").expect("write config");

    ack2vim(&dir)
        .args(["--config"])
        .arg(&cfg)
        .args(["--editor", "gvim", "--files-from", "-", "-v", "x"])
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout("gvim -p a +/x\n");
}

#[test]
fn print_aliases_emits_shell_functions() {
    let dir = TempDir::new().expect("tempdir");
    ack2vim(&dir)
        .arg("--print-aliases")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "vapy() { eval \"$(ack2vim -v --py \"$@\")\"; }",
        ));
}
