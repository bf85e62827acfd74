//! End-to-end tests for the token-select command set

use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::tempdir;
use token_selection::cli::{run, CliArgs};

fn run_args(args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec!["token-select"];
    argv.extend_from_slice(args);
    run(&CliArgs::try_parse_from(argv)?)
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is not UTF-8")
}

#[test]
fn test_indent_prints_result() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("a.txt");
    fs::write(&file, "ab\ncd\nef").expect("Failed to write file");

    let output = run_args(&["indent", path_str(&file), "--range", "1:4"]).unwrap();

    assert_eq!(output, "  ab\n  cd\nef");
    // Not in place: the file is untouched
    assert_eq!(fs::read_to_string(&file).unwrap(), "ab\ncd\nef");
}

#[test]
fn test_outdent_in_place_with_tab_unit() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("a.txt");
    fs::write(&file, "\tx\n\ty\n").expect("Failed to write file");

    let output = run_args(&[
        "--unit",
        "\\t",
        "outdent",
        path_str(&file),
        "--range",
        "0:6",
        "--in-place",
    ])
    .unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "x\ny\n");
    assert_eq!(output, "0:3");
}

#[test]
fn test_indent_json_report() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("a.txt");
    fs::write(&file, "x").expect("Failed to write file");

    let output = run_args(&["--json", "indent", path_str(&file)]).unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(report["text"], "  x");
    assert_eq!(report["changed"], true);
    assert_eq!(report["selection"]["ranges"][0]["location"], 2);
}

#[test]
fn test_invalid_range_is_an_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("a.txt");
    fs::write(&file, "abc").expect("Failed to write file");

    let err = run_args(&["indent", path_str(&file), "--range", "2:9"]).unwrap_err();

    assert!(format!("{:#}", err).contains("Invalid --range"));
}

#[test]
fn test_select_word_forward() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("a.txt");
    fs::write(&file, "one two").expect("Failed to write file");

    let output = run_args(&[
        "select",
        path_str(&file),
        "--range",
        "0:0",
        "--motion",
        "word-forward",
        "--extend",
    ])
    .unwrap();

    assert_eq!(output, "0:3");
}

#[test]
fn test_lines_lists_spans() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("a.txt");
    fs::write(&file, "ab\r\ncd\n").expect("Failed to write file");

    let output = run_args(&["lines", path_str(&file)]).unwrap();

    assert_eq!(output, "0\t0\t2\t4\n1\t4\t6\t7");
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("missing.txt");

    assert!(run_args(&["lines", path_str(&file)]).is_err());
}
