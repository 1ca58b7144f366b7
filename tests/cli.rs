//! End-to-end tests of the scripture-index binary.
//!
//! Every run writes its index as UTF-16LE, so outputs are decoded before
//! comparison.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_scripture-index"))
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Write `content` into `dir/name` and return the path
fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &[&str], inputs: &[&Path]) -> Output {
    bin()
        .args(args)
        .args(inputs)
        .output()
        .expect("failed to run scripture-index")
}

fn decode(bytes: &[u8]) -> String {
    assert_eq!(&bytes[..2], &[0xFF, 0xFE], "missing UTF-16LE byte order mark");
    let units: Vec<u16> = bytes[2..]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).unwrap()
}

fn stdout_index(output: &Output) -> String {
    assert!(
        output.status.success(),
        "scripture-index failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    decode(&output.stdout)
}

#[test]
fn test_scripture_index_merges_locations() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "a.csv", "page,text\n12,John 3:16\n45,Jn 3:16\n");

    let output = run(&["-m", "scripture", "-q"], &[&input]);
    assert_eq!(stdout_index(&output), "John\n3:16\t12,45\n");
}

#[test]
fn test_fixture_keeps_footnote_distinct() {
    let output = run(&["-m", "scripture", "-q"], &[&fixture("scripture.csv")]);
    assert_eq!(
        stdout_index(&output),
        "Genesis\n1:1\t45\n\nJohn\n3:16\t12,45,45n2\n"
    );
}

#[test]
fn test_semicolon_list_expands_to_entries() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "a.csv", "page,text\n7,\"John 3:16; 4:1\"\n");

    let output = run(&["-m", "scripture", "-q"], &[&input]);
    assert_eq!(stdout_index(&output), "John\n3:16\t7\n4:1\t7\n");
}

#[test]
fn test_subject_index_nests_subentries() {
    let output = run(&["-m", "subject", "-q"], &[&fixture("subjects.tsv")]);
    assert_eq!(
        stdout_index(&output),
        "F\nFaith\n\tworks\t8\n\nG\nGrace\t1\n\tmeans of\t3\n"
    );
}

#[test]
fn test_scripture_keyword_rows_feed_scripture_index() {
    let output = run(&["-m", "scripture", "-q"], &[&fixture("subjects.tsv")]);
    assert_eq!(stdout_index(&output), "Romans\n8:28\t9\n");
}

#[test]
fn test_bad_page_skips_only_that_file() {
    let dir = TempDir::new().unwrap();
    let good = write_input(&dir, "good.csv", "page,text\n3,Gen 1:1\n");
    let bad = write_input(&dir, "bad.csv", "page,text\n4,John 3:16\nabc,Rom 1:1\n");

    let output = run(&["-m", "scripture", "--no-color"], &[&good, &bad]);
    assert_eq!(stdout_index(&output), "Genesis\n1:1\t3\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bad.csv"), "stderr: {}", stderr);
    assert!(stderr.contains("line 3"), "stderr: {}", stderr);
    assert!(stderr.contains("from 1 of 2 files"), "stderr: {}", stderr);
}

#[test]
fn test_no_readable_input_writes_empty_index() {
    let dir = TempDir::new().unwrap();
    let bad = write_input(&dir, "bad.csv", "page,text\nabc,Rom 1:1\n");
    let missing = dir.path().join("missing.csv");

    let output = run(&["-m", "scripture", "--no-color"], &[&bad, &missing]);
    assert_eq!(stdout_index(&output), "");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipped"), "{stderr}");
    assert!(stderr.contains("bad.csv"), "{stderr}");
    assert!(stderr.contains("missing.csv"), "{stderr}");
    assert!(stderr.contains("from 0 of 2 files"), "{stderr}");
}

#[test]
fn test_arabic_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "a.csv", "page,text\n12,John 3:16\n");

    let output = run(&["-m", "scripture", "-l", "ar", "-q"], &[&input]);
    assert_eq!(stdout_index(&output), "يوحنا\n٣:\u{200F}١٦\t١٢\n");
}

#[test]
fn test_latex_template() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "a.csv", "page,text\n12,John 3:16\n");

    let output = run(&["-m", "scripture", "-t", "latex", "-q"], &[&input]);
    assert_eq!(
        stdout_index(&output),
        "\\begin{theindex}\n\\item John\n  \\subitem 3:16, 12\n\\end{theindex}\n"
    );
}

#[test]
fn test_fodt_template() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "a.csv", "page,text\n12,John 3:16\n45,Rom 8:28\n");

    let output = run(&["-m", "scripture", "-t", "fodt", "-q"], &[&input]);
    let document = stdout_index(&output);
    assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"UTF-16\"?>\n"));
    assert!(document.contains("<text:p text:style-name=\"INDEX_HEADING\">John</text:p>"));
    assert!(document.contains("<text:p text:style-name=\"INDEX_ENTRY\">3:16<text:tab/>12</text:p>"));
    assert!(document.contains("<text:p text:style-name=\"INDEX_HEADING\">Romans</text:p>"));
    assert!(document.trim_end().ends_with("</office:document>"));
}

#[test]
fn test_json_template_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "a.csv", "page,text\n12,John 3:16\n");
    let out_path = dir.path().join("index.json");

    let output = run(
        &["-m", "scripture", "-t", "json", "-q", "-o", out_path.to_str().unwrap()],
        &[&input],
    );
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let json = decode(&fs::read(&out_path).unwrap());
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["headings"][0]["title"], "John");
    assert_eq!(value["headings"][0]["items"][0]["pages"], "12");
}

#[test]
fn test_config_file_sets_keyword_and_template() {
    let dir = TempDir::new().unwrap();
    let config = write_input(
        &dir,
        "index.json",
        r#"{"scripture_keyword": "bible", "template": "latex"}"#,
    );
    let input = write_input(&dir, "a.csv", "page,entry\n5,Bible|John 3:16\n5,Grace\n");

    let output = run(
        &["-m", "scripture", "-q", "-c", config.to_str().unwrap()],
        &[&input],
    );
    assert_eq!(
        stdout_index(&output),
        "\\begin{theindex}\n\\item John\n  \\subitem 3:16, 5\n\\end{theindex}\n"
    );
}

#[test]
fn test_cli_template_overrides_config() {
    let dir = TempDir::new().unwrap();
    let config = write_input(&dir, "index.json", r#"{"template": "latex"}"#);
    let input = write_input(&dir, "a.csv", "page,text\n5,Jude 3\n");

    let output = run(
        &["-m", "scripture", "-q", "-t", "scripture", "-c", config.to_str().unwrap()],
        &[&input],
    );
    assert_eq!(stdout_index(&output), "Jude\n3\t5\n");
}

#[test]
fn test_unknown_template_is_usage_error() {
    let output = run(&["-m", "scripture", "-t", "html"], &[&fixture("scripture.csv")]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
