//! Integration tests for the pal-check CLI.

use chrono as _;
use pal_checker as _;
use proptest as _;
use rstest::rstest;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use thiserror as _;
use tracing as _;
use tracing_subscriber as _;

fn binary_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.join("pal-check")
}

fn create_temp_file(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run pal-check")
}

const CLEAN_PROGRAM: &str = "; counts down from ten ELO
 SRT
 DEF CNT, R1
 MOVE 10, R1
TOP: DEC R1
 BGT R1, 0, TOP
 END
";

const FAULTY_PROGRAM: &str = " SRT
LONGER: INC R1
 JMP DONE
 ADD R1, R2
 INC R1 ; no terminator
DONE: BR NOWHERE
 END
 BOGUS
";

#[test]
fn clean_program_reports_success() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "count.pal", CLEAN_PROGRAM);

    let output = run(&[source.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Checked "), "{stdout}");
    assert!(stdout.contains("(0 errors, 0 warnings)"), "{stdout}");

    let report = fs::read_to_string(temp_dir.path().join("count.log")).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "PAL Compiler");
    assert_eq!(lines[1], "Matt Kline");
    assert_eq!(lines[2].len(), "MM-DD-YYYY".len());
    assert_eq!(lines[3], "CS 3210");
    assert_eq!(lines[4], "");
    assert_eq!(
        lines[5],
        format!("Program was read from {}", source.display())
    );
    assert_eq!(lines[6], "1.  SRT");
    assert_eq!(lines[7], "2.  DEF CNT, R1");
    assert_eq!(lines[11], "6.  END");
    assert!(report.contains("Total Errors: 0.\n"));
    assert!(report.ends_with("\nPAL Compile completed successfully.\n"));
}

#[test]
fn faulty_program_lists_every_diagnostic() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "bad.pal", FAULTY_PROGRAM);

    let output = run(&[source.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("(5 errors, 2 warnings)"), "{stdout}");

    let report = fs::read_to_string(temp_dir.path().join("bad.log")).unwrap();
    assert!(report.contains("\n1.  SRT\n2. LONGER"));
    assert!(report.contains(
        "2. LONGER: INC R1\n   **Ill Formed Label. Limit of 5 characters.\n"
    ));
    assert!(report.contains("3.  JMP DONE\n   **Invalid Opcode. JMP was not found.\n"));
    assert!(report.contains(
        "4.  ADD R1, R2\n   **Invalid number of operands. This command should have exactly 3 operands.\n"
    ));
    assert!(report.contains(
        "5.  INC R1 ; no terminator\n   **End line operator is required following a comment.\n"
    ));
    assert!(report.contains(
        "6. DONE: BR NOWHERE\n   **Label Error. NOWHERE is not a recognized label.\n"
    ));
    assert!(report.contains("7.  END\n\nSummary\n"));
    assert!(!report.contains("BOGUS"));

    assert!(report.contains(
        "Total Errors: 5.\n    \
         1 Ill Formed Label Errors.\n    \
         1 Invalid Opcode Errors.\n    \
         2 Too Few Operands Errors.\n    \
         1 Label Problem Errors.\n"
    ));
    assert!(report.contains(
        "Total warnings: 2.\n    LONGER is never accessed.\n    DONE is never accessed.\n"
    ));
    assert!(report.ends_with("\nPAL Compile completed with errors.\n"));
}

#[test]
fn carriage_return_line_endings() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "mac.pal", " SRT\r INC R1\r END\r");

    let output = run(&[source.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("(0 errors, 0 warnings)"), "{stdout}");

    let report = fs::read_to_string(temp_dir.path().join("mac.log")).unwrap();
    assert!(report.contains("\n1.  SRT\n2.  INC R1\n3.  END\n"), "{report}");
}

#[test]
fn output_and_header_overrides() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "prog.pal", " SRT\n END\n");
    let report_path = temp_dir.path().join("custom.txt");

    let output = run(&[
        source.to_str().unwrap(),
        "-o",
        report_path.to_str().unwrap(),
        "--author",
        "Grace Hopper",
        "--course",
        "CS 1000",
    ]);
    assert!(output.status.success());
    assert!(!temp_dir.path().join("prog.log").exists());

    let report = fs::read_to_string(&report_path).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[1], "Grace Hopper");
    assert_eq!(lines[3], "CS 1000");
}

#[test]
fn prompts_for_input_when_omitted() {
    let temp_dir = tempfile::tempdir().unwrap();
    create_temp_file(temp_dir.path(), "asked.pal", " INC R1\n");

    let mut child = Command::new(binary_path())
        .current_dir(temp_dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to run pal-check");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"asked.pal\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Enter the filename of the file to check\n"));
    assert!(temp_dir.path().join("asked.log").exists());
}

#[test]
fn missing_input_exits_zero_without_report() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = temp_dir.path().join("absent.pal");

    let output = run(&[source.to_str().unwrap()]);
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("was not found"), "{stderr}");
    assert!(!temp_dir.path().join("absent.log").exists());
}

#[test]
fn unwritable_report_exits_zero() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "prog.pal", " END\n");
    let report_path = temp_dir.path().join("no-such-dir").join("prog.log");

    let output = run(&[
        source.to_str().unwrap(),
        "-o",
        report_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to write report"), "{stderr}");
}

#[rstest]
#[case(&["--bogus"], "unknown option")]
#[case(&["a.pal", "b.pal"], "multiple input paths")]
#[case(&["a.pal", "-o"], "missing value for -o")]
fn invalid_arguments_exit_one(#[case] args: &[&str], #[case] message: &str) {
    let output = run(args);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains(message), "{stderr}");
    assert!(stderr.contains("Usage: pal-check"));
}

#[test]
fn help_prints_usage() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Usage: pal-check"));
}
