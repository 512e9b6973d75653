use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::{contains, diff};

const MEMORY: &str = "tests/files/memory.txt";
const INSTRUCTIONS: &str = "tests/files/instructions.txt";

fn expected_table() -> String {
    include_str!("expected/table").replace("\r\n", "\n")
}

#[test]
fn runs_without_arguments() {
    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.assert().success().stdout(contains("sicld"));
}

#[test]
fn runs_instruction_file() {
    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.arg("run").arg(MEMORY).arg(INSTRUCTIONS).arg("--minimal");

    cmd.assert()
        .success()
        .stdout(diff(expected_table()))
        .stderr("");
}

#[test]
fn positional_shorthand_matches_run() {
    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.arg(MEMORY).arg(INSTRUCTIONS);

    cmd.assert()
        .success()
        .stdout(diff(expected_table()))
        .stderr(contains("Finished"));
}

#[test]
fn registers_can_be_overridden() {
    // PC=0x1E turns `000010 02` into a read of 0x20
    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.arg("resolve")
        .arg("000010")
        .arg("02")
        .arg("--memory")
        .arg(MEMORY)
        .arg("--pc")
        .arg("1E");

    cmd.assert()
        .success()
        .stdout(contains("PC-relative    0007"));

    // X is only applied with the x bit set
    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.arg("resolve")
        .arg("111000")
        .arg("10")
        .arg("--memory")
        .arg(MEMORY)
        .arg("--x")
        .arg("10");

    cmd.assert().success().stdout(contains("Direct         0007"));
}

#[test]
fn resolve_without_memory_reads_zero() {
    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.arg("resolve").arg("100000").arg("0A");

    cmd.assert()
        .success()
        .stdout(contains("Indirect       0000"));
}

#[test]
fn bad_flags_abort_after_printed_rows() {
    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.arg("run")
        .arg(MEMORY)
        .arg("tests/files/bad_flags.txt")
        .arg("--minimal");

    cmd.assert()
        .failure()
        .stdout(contains("010000   05"))
        .stdout(contains("110000   0A"))
        .stdout(contains("06").not())
        .stderr(contains("Invalid flag bit `x` at position 3"));
}

#[test]
fn bad_memory_literal_is_fatal() {
    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.arg("run")
        .arg("tests/files/bad_memory.txt")
        .arg(INSTRUCTIONS)
        .arg("--minimal");

    cmd.assert()
        .failure()
        .stdout("")
        .stderr(contains("invalid hex literal"));
}

#[test]
fn check_counts_records() {
    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.arg("check").arg(MEMORY).arg(INSTRUCTIONS);

    cmd.assert()
        .success()
        .stdout("")
        .stderr(contains("3 words, 5 instructions"));

    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.arg("check").arg(MEMORY).arg("tests/files/bad_flags.txt");
    cmd.assert().failure();
}

#[test]
fn trace_describes_resolution() {
    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.arg("run")
        .arg(MEMORY)
        .arg(INSTRUCTIONS)
        .arg("--minimal")
        .arg("--trace");

    cmd.assert()
        .success()
        .stdout(diff(expected_table()))
        .stderr(contains("line 3: 100000 0A -> Indirect TA=000A ptr=1000 value=0055"))
        .stderr(contains("line 4: 000010 FE -> PC-relative TA=0100 value=0000"));
}

#[test]
fn dumps_memory_in_order() {
    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.arg("dump").arg(MEMORY);

    cmd.assert()
        .success()
        .stdout("000A 1000\n0020 0007\n1000 0055\n");
}

#[test]
fn falls_back_to_default_file_names() {
    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.current_dir("tests/files/defaults");

    cmd.assert()
        .success()
        .stdout(diff(expected_table()))
        .stderr(contains("memoria.txt"))
        .stderr(contains("banderas_dir.txt"));
}

#[test]
fn shorthand_accepts_registers() {
    // Base=0x1A moves `110100 06` onto 0x20
    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.arg("--base")
        .arg("1A")
        .arg(MEMORY)
        .arg("tests/files/base_only.txt");

    cmd.assert()
        .success()
        .stdout(contains("110100   06         Base-relative  0007"));
}

#[test]
fn fatal_errors_report_abort() {
    let mut cmd = Command::cargo_bin("sicld").unwrap();
    cmd.arg("run")
        .arg("tests/files/bad_memory.txt")
        .arg(INSTRUCTIONS);

    cmd.assert()
        .failure()
        .stderr(contains("Aborted"))
        .stderr(contains("invalid hex literal"));
}
