//! Runs the compiled `pdftext` binary and checks stdout and exit codes.

use std::path::Path;
use std::process::{Command, Output};

use pdftext_core::DIAGNOSTIC_PREFIX;
use pdftext_core::mock::pdf_bytes;

/// Run the binary inside `dir` with no user config or env overrides.
fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pdftext"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("PDFTEXT_LOG")
        .env_remove("PDFTEXT_HEADER_EXCLUSION")
        .env_remove("PDFTEXT_FOOTER_EXCLUSION")
        .output()
        .expect("failed to run pdftext")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn no_argument_prints_usage_and_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).starts_with("Usage:"));
}

#[test]
fn missing_file_names_path_and_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.pdf");
    let missing = missing.to_str().unwrap();

    let out = run(dir.path(), &[missing]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), format!("File not found: {missing}\n"));
}

#[test]
fn corrupt_file_prints_diagnostic_and_exits_0() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.pdf");
    std::fs::write(&path, b"%PDF-1.7\n\x00\x01garbage with no objects").unwrap();

    let out = run(dir.path(), &[path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).starts_with(DIAGNOSTIC_PREFIX), "got {:?}", stdout(&out));
}

#[test]
fn valid_pdf_prints_text_and_exits_0() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    std::fs::write(&path, pdf_bytes(&["Page one", "Page two"])).unwrap();

    let out = run(dir.path(), &[path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0));

    let text = stdout(&out);
    let one = text.find("Page one").unwrap();
    let two = text.find("Page two").unwrap();
    assert!(one < two);
    assert!(text.ends_with("\n\n"));
}

#[test]
fn output_is_stable_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    std::fs::write(&path, pdf_bytes(&["repeatable"])).unwrap();
    let arg = path.to_str().unwrap();

    let first = run(dir.path(), &[arg]);
    let second = run(dir.path(), &[arg]);
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn explicit_config_file_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    std::fs::write(&path, pdf_bytes(&["x"])).unwrap();

    let out = run(
        dir.path(),
        &["--config", "no-such-config.toml", path.to_str().unwrap()],
    );
    assert!(!out.status.success());
    assert!(stdout(&out).is_empty());
}

#[test]
fn cwd_config_applies_exclusion() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".pdftext.toml"),
        "[backend]\nheader_exclusion_ratio = 0.5\n",
    )
    .unwrap();
    let path = dir.path().join("doc.pdf");
    std::fs::write(&path, pdf_bytes(&["top of page"])).unwrap();

    let out = run(dir.path(), &[path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "\n\n");
}

#[test]
fn broken_cwd_config_is_reported_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".pdftext.toml"), "[backend\nheader = ").unwrap();
    let path = dir.path().join("doc.pdf");
    std::fs::write(&path, pdf_bytes(&["still extracted"])).unwrap();

    let out = run(dir.path(), &[path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("still extracted"));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("ignoring config file"), "stderr: {stderr:?}");
}

#[test]
fn extra_arguments_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    std::fs::write(&path, pdf_bytes(&["only the first"])).unwrap();

    let out = run(dir.path(), &[path.to_str().unwrap(), "surplus"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("only the first"));
}

#[test]
fn hyphenated_missing_path_reaches_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["-draft.pdf"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "File not found: -draft.pdf\n");
}
