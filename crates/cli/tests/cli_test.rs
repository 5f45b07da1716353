//! End-to-end tests for the ansi2pdf and ansi2ps binaries.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use ansi2pdf_core::document::verify_xref;

const INPUT: &str = "\x1b[01;31merror\x1b[0m: build failed\n\tsee log\n";

fn run_with_stdin(bin: &str, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // The child may exit before reading everything.
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    child.wait_with_output().unwrap()
}

#[test]
fn test_stdin_to_stdout_pdf() {
    let out = run_with_stdin(env!("CARGO_BIN_EXE_ansi2pdf"), &[], INPUT);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stdout.starts_with(b"%PDF-1.4\n"));
    let table = verify_xref(&out.stdout).unwrap();
    assert_eq!(table.size, 6);
}

#[test]
fn test_file_to_file_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("build.log");
    let output = dir.path().join("build.pdf");
    fs::write(&input, INPUT).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_ansi2pdf"))
        .arg(&input)
        .arg(&output)
        .args(["--header", "Nightly"])
        .status()
        .unwrap();
    assert!(status.success());

    let pdf = fs::read(&output).unwrap();
    verify_xref(&pdf).unwrap();
    assert!(pdf.windows(10).any(|w| w == b"(Nightly) "));
}

#[test]
fn test_format_inferred_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.ps");
    fs::write(&input, INPUT).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_ansi2pdf"))
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    let ps = fs::read_to_string(&output).unwrap();
    assert!(ps.starts_with("%!PS-Adobe-3.0\n"));
}

#[test]
fn test_ansi2ps_writes_postscript() {
    let out = run_with_stdin(env!("CARGO_BIN_EXE_ansi2ps"), &["-", "-"], INPUT);
    assert!(out.status.success());
    let ps = String::from_utf8(out.stdout).unwrap();
    assert!(ps.contains("%%Pages: 1\n"));
    assert!(ps.contains("(error) show\n"));
    assert!(ps.ends_with("%%EOF\n"));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.pdf");
    let out = Command::new(env!("CARGO_BIN_EXE_ansi2pdf"))
        .arg(dir.path().join("nope.log"))
        .arg(&output)
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("cannot open input"), "{stderr}");
    assert!(!output.exists());
}

#[test]
fn test_zero_width_rejected() {
    let out = run_with_stdin(env!("CARGO_BIN_EXE_ansi2pdf"), &["--width", "0"], INPUT);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("line width"));
}
