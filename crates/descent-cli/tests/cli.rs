//! End-to-end tests of the `descent` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn descent() -> Command {
    let mut cmd = Command::cargo_bin("descent").unwrap();
    cmd.env_remove("DESCENT_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

/// A system LU cannot handle without row swaps.
fn pivoting_system(dir: &Path) -> (String, String) {
    (
        write(dir, "A.txt", "3 9 6\n4 12 12\n1 -1 1\n"),
        write(dir, "b.txt", "12\n12\n1\n"),
    )
}

#[test]
fn test_linsys_solve_with_pivoting() {
    let dir = TempDir::new().unwrap();
    let (a, b) = pivoting_system(dir.path());

    descent()
        .args(["--format", "json", "linsys", "solve", "--matrix", &a, "--rhs", &b])
        .assert()
        .success()
        .stdout(predicate::str::contains("3.000000"))
        .stdout(predicate::str::contains("1.000000"))
        .stdout(predicate::str::contains("-1.000000"));
}

#[test]
fn test_linsys_lu_reports_singular_pivot() {
    let dir = TempDir::new().unwrap();
    let (a, b) = pivoting_system(dir.path());

    descent()
        .args(["linsys", "solve", "--method", "lu", "--matrix", &a, "--rhs", &b])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Singular matrix"));
}

#[test]
fn test_linsys_solve_needs_rhs() {
    let dir = TempDir::new().unwrap();
    let (a, _) = pivoting_system(dir.path());

    descent()
        .args(["linsys", "solve", "--matrix", &a])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--rhs"));
}

#[test]
fn test_linsys_determinant() {
    let dir = TempDir::new().unwrap();
    let (a, _) = pivoting_system(dir.path());

    descent()
        .args(["--format", "json", "linsys", "det", "--matrix", &a])
        .assert()
        .success()
        .stdout(predicate::str::contains("48.000000"));
}

#[test]
fn test_linsys_inverse_csv() {
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "A.txt", "4 -5 -2\n5 -6 -2\n-8 9 3\n");

    descent()
        .args(["--format", "csv", "linsys", "inverse", "--matrix", &a])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("row,values"))
        .stdout(predicate::str::contains("-3.000000"));
}

#[test]
fn test_linsys_malformed_matrix() {
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "A.txt", "1 2\n3\n");

    descent()
        .args(["linsys", "det", "--matrix", &a])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_minimize_nelder_mead() {
    descent()
        .args([
            "--format",
            "json",
            "minimize",
            "--problem",
            "shifted-quadratic",
            "--algorithm",
            "nelder-mead",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outcome\": \"converged\""));
}

#[test]
fn test_minimize_explicit_start() {
    descent()
        .args([
            "--format",
            "minimal",
            "minimize",
            "--problem",
            "offset-paraboloid",
            "--algorithm",
            "newton",
            "--start",
            "-5,7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("(-5, 7)"))
        .stdout(predicate::str::contains("(2.000000, -3.000000)"));
}

#[test]
fn test_minimize_missing_capability_is_reported() {
    descent()
        .args(["--format", "json", "minimize", "--problem", "schaffer", "--algorithm", "newton"])
        .assert()
        .success()
        .stdout(predicate::str::contains("does not support gradient"));
}

#[test]
fn test_minimize_rejects_start_of_wrong_dimension() {
    for start in ["1", "1,2,3"] {
        descent()
            .args(["minimize", "-p", "rosenbrock", "-a", "hooke-jeeves", "-s", start])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Invalid argument"))
            .stderr(predicate::str::contains("2-dimensional"));
    }
}

#[test]
fn test_minimize_any_dimension_problem_takes_any_start() {
    descent()
        .args(["--format", "json", "minimize", "-p", "indexed-paraboloid", "-s", "0,0,0"])
        .assert()
        .success();
}

#[test]
fn test_minimize_unknown_problem() {
    descent()
        .args(["minimize", "--problem", "banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown problem"));
}

#[test]
fn test_lab1_runs_every_task() {
    descent()
        .args(["--format", "json", "lab", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"determinant\""))
        .stdout(predicate::str::contains("\"inverse\""))
        .stdout(predicate::str::contains("error: "));
}

#[test]
fn test_lab1_reads_data_directory() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("task1")).unwrap();
    write(&dir.path().join("task1"), "task1.txt", "1 2\n3 4\n");

    // Only task 1 is present; every other task reports its missing file.
    descent()
        .args(["--format", "json", "lab", "1", "--data"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cannot read"));
}

#[test]
fn test_lab_number_out_of_range() {
    descent().args(["lab", "5"]).assert().failure();
}

#[test]
fn test_config_file_sets_format() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "descent.toml", "format = \"csv\"\n");
    let a = write(dir.path(), "A.txt", "2 0\n0 2\n");

    descent()
        .args(["--config", &config, "linsys", "det", "--matrix", &a])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("key,value"));
}

#[test]
fn test_config_file_rejects_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "descent.toml", "colour = true\n");
    let a = write(dir.path(), "A.txt", "1\n");

    descent()
        .args(["--config", &config, "linsys", "det", "--matrix", &a])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_seeded_lab4_is_reproducible() {
    let run = || {
        descent()
            .args(["--format", "json", "--seed", "7", "lab", "4"])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}
