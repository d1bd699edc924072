#[allow(deprecated)]
use assert_cmd::{Command, cargo::cargo_bin};
use predicates::prelude::*;
use std::process;

fn vouch() -> Command {
    let mut cmd = Command::from_std(process::Command::new(cargo_bin!("vouch")));
    cmd.env_remove("VOUCH_ITERATIONS")
        .env_remove("VOUCH_SEED")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_property_passes() {
    let mut cmd = vouch();
    cmd.args(["property", "--iterations", "500", "--seed", "42", "--quiet"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("property"))
        .stdout(predicate::str::contains("PASSED"))
        .stdout(predicate::str::contains("500 cases"))
        .stdout(predicate::str::contains("seed: 42"));
}

#[test]
fn test_property_fails_on_666() {
    let mut cmd = vouch();
    cmd.args([
        "property",
        "--iterations",
        "50000",
        "--seed",
        "7",
        "--fail-on-666",
        "--quiet",
    ]);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("number: 666"))
        .stdout(predicate::str::contains("The power of Christ compels thee!"))
        .stdout(predicate::str::contains("Seed: 7"));
}

#[test]
fn test_property_iterations_from_env() {
    let mut cmd = vouch();
    cmd.env("VOUCH_ITERATIONS", "3").args(["property", "--quiet"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("3 cases"));
}

#[test]
fn test_property_single_iteration() {
    let mut cmd = vouch();
    cmd.args(["property", "-n", "1", "--quiet"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(1 case)"));
}

#[test]
fn test_property_zero_iterations_passes() {
    let mut cmd = vouch();
    cmd.args(["property", "--iterations", "0"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("PASSED"))
        .stdout(predicate::str::contains("0 cases"));
}

#[test]
fn test_table_passes_by_default() {
    let mut cmd = vouch();
    cmd.arg("table");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("table"))
        .stdout(predicate::str::contains("PASSED"))
        .stdout(predicate::str::contains("1000 entries"));
}

#[test]
fn test_table_reports_cursed_entry() {
    let mut cmd = vouch();
    cmd.args(["table", "--fail-on-666"]);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("1 of 1000 entries failed"))
        .stdout(predicate::str::contains("entry 666"))
        .stdout(predicate::str::contains("The power of Christ compels thee!"))
        .stdout(predicate::str::contains("entry 665").not());
}

#[test]
fn test_table_parallel_matches_sequential() {
    let mut cmd = vouch();
    cmd.args(["table", "--fail-on-666", "--parallel", "--threads", "3"]);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("1 of 1000 entries failed"))
        .stdout(predicate::str::contains("entry 666"));
}

#[test]
fn test_table_range_without_cursed_number() {
    let mut cmd = vouch();
    cmd.args(["table", "--from", "10", "--to", "20", "--fail-on-666"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("10 entries"));
}

#[test]
fn test_table_rejects_inverted_range() {
    let mut cmd = vouch();
    cmd.args(["table", "--from", "20", "--to", "10"]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("must not be greater than"));
}

#[test]
fn test_table_rejects_zero_threads() {
    let mut cmd = vouch();
    cmd.args(["table", "--parallel", "--threads", "0"]);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid --threads value"));
}

#[test]
fn test_all_runs_both_suites() {
    let mut cmd = vouch();
    cmd.env("VOUCH_ITERATIONS", "200").arg("all");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("property"))
        .stdout(predicate::str::contains("200 cases"))
        .stdout(predicate::str::contains("1000 entries"));
}

#[test]
fn test_all_rejects_bad_env() {
    let mut cmd = vouch();
    cmd.env("VOUCH_ITERATIONS", "lots").arg("all");

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("VOUCH_ITERATIONS"));
}

#[test]
fn test_info_logging_shows_iterations() {
    let mut cmd = vouch();
    cmd.args(["--log-level", "info", "property", "-n", "3", "--seed", "1"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("iteration"));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let mut cmd = vouch();
    cmd.arg("bogus");

    cmd.assert().code(2);
}

#[test]
fn test_help() {
    let mut cmd = vouch();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("property"))
        .stdout(predicate::str::contains("table"))
        .stdout(predicate::str::contains("--log-level"));
}
