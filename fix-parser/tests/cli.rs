use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn fix_parser() -> Command {
    let mut cmd = Command::cargo_bin("fix-parser").unwrap();
    cmd.env("RUST_LOG", "info");
    cmd
}

#[test]
fn parses_valid_file() {
    fix_parser()
        .args(["parse", "--quiet"])
        .arg(data("example-fix-data.bin"))
        .assert()
        .success()
        .stdout(predicate::str::contains("read=10 parsed=10 failed=0"))
        .stderr(predicate::str::contains("Total messages parsed = 10"));
}

#[test]
fn one_wrong_checksum_in_every_mode() {
    for mode in ["sync", "work-stealing", "fixed"] {
        fix_parser()
            .args(["parse", "--quiet", "--mode", mode, "--threads", "2"])
            .arg(data("example-fix-data-with-1-wrong-checksum.bin"))
            .assert()
            .success()
            .stdout(predicate::str::contains("read=10 parsed=9 failed=1"))
            .stderr(predicate::str::contains("checksum mismatch"));
    }
}

#[test]
fn logs_projection_of_each_message() {
    fix_parser()
        .arg("parse")
        .arg(data("example-fix-data.bin"))
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "EURUSD B 1.31678;100000.0 S 1.31667;100000.0 20180206-21:43:36.000",
        ));
}

#[test]
fn fast_path_with_bounded_queue() {
    fix_parser()
        .args([
            "parse",
            "--quiet",
            "--fast",
            "--mode",
            "fixed",
            "--queue-capacity",
            "2",
        ])
        .arg(data("example-fix-data-with-1-wrong-checksum.bin"))
        .assert()
        .success()
        .stdout(predicate::str::contains("read=10 parsed=9 failed=1"));
}

#[test]
fn no_checksum_accepts_corrupted_record() {
    fix_parser()
        .args(["parse", "--quiet", "--no-checksum"])
        .arg(data("example-fix-data-with-1-wrong-checksum.bin"))
        .assert()
        .success()
        .stdout(predicate::str::contains("read=10 parsed=10 failed=0"));
}

#[test]
fn missing_file_fails_with_context() {
    let dir = tempfile::tempdir().unwrap();
    fix_parser()
        .arg("parse")
        .arg(dir.path().join("nope.bin"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("open input file"));
}

#[test]
fn generated_file_roundtrips_through_parse() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("gen.bin");

    fix_parser()
        .args(["generate", "--count", "25", "--corrupt", "2", "--symbols", "eurusd,usdjpy"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    fix_parser()
        .args(["parse", "--quiet", "--strict-syntax", "--mode", "work-stealing"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("read=25 parsed=23 failed=2"));
}

#[test]
fn generate_rejects_empty_symbols() {
    let dir = tempfile::tempdir().unwrap();
    fix_parser()
        .args(["generate", "--symbols", " , "])
        .arg("--out")
        .arg(dir.path().join("gen.bin"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("symbols list is empty"));
}
