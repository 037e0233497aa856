#![forbid(unsafe_code)]

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(suffix: &str) -> PathBuf {
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    let dir = std::env::temp_dir().join(format!(
        "slae_cli_{suffix}_{}_{}",
        std::process::id(),
        nonce
    ));
    fs::create_dir_all(&dir).unwrap_or_else(|error| {
        panic!("failed to create {}: {error}", dir.display());
    });
    dir
}

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap_or_else(|error| {
        panic!("failed to write {}: {error}", path.display());
    });
}

fn slae(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slae"))
        .args(args)
        .output()
        .expect("failed to execute slae")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const SCENARIO: &str = "3\n2 1 -1 8\n-3 -1 2 -11\n-2 1 2 -3\n";
const DOMINANT: &str = "2\n10 1 11\n2 8 10\n";

#[test]
fn solves_file_and_prints_report() {
    let dir = unique_temp_dir("report");
    let input = dir.join("system.txt");
    write_file(&input, SCENARIO);

    let output = slae(&[input.to_str().unwrap(), "--method", "gaussJordan"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let report = stdout(&output);
    assert!(report.starts_with("Method: gaussJordan"));
    assert!(report.contains("x1 = "));
    assert!(report.contains("Solution is valid: AX ≈ B"));
}

#[test]
fn json_output_carries_iterations() {
    let dir = unique_temp_dir("json");
    let input = dir.join("system.txt");
    write_file(&input, DOMINANT);

    let output = slae(&[
        input.to_str().unwrap(),
        "--method",
        "seidel",
        "--epsilon",
        "1e-8",
        "--max-iterations",
        "200",
        "--json",
    ]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let json: Value = serde_json::from_str(&stdout(&output)).expect("stdout is JSON");
    assert_eq!(json["method"], "seidel");
    assert_eq!(json["is_valid"], true);
    let count = json["iteration_count"].as_u64().expect("iteration count");
    assert_eq!(json["iterations"].as_array().map(Vec::len), Some(count as usize));
    for (value, expected) in json["solution"].as_array().unwrap().iter().zip([1.0, 1.0]) {
        assert!((value.as_f64().unwrap() - expected).abs() < 1e-5);
    }
}

#[test]
fn legacy_split_layout_is_accepted() {
    let dir = unique_temp_dir("split");
    let input = dir.join("system.txt");
    write_file(&input, "2\n10 1\n2 8\n11\n10\n");

    let output = slae(&[input.to_str().unwrap(), "--layout", "split", "--json"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let json: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["method"], "gauss");
}

#[test]
fn initial_guess_accepts_negative_values() {
    let dir = unique_temp_dir("guess");
    let input = dir.join("system.txt");
    write_file(&input, DOMINANT);

    let output = slae(&[
        input.to_str().unwrap(),
        "--method",
        "jacobi",
        "--initial-guess",
        "-1,2.5",
        "--json",
    ]);
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let mismatched = slae(&[
        input.to_str().unwrap(),
        "--method",
        "jacobi",
        "--initial-guess",
        "1,2,3",
    ]);
    assert_eq!(mismatched.status.code(), Some(1));
    assert!(stderr(&mismatched).contains("initial guess"));
}

#[test]
fn solver_failure_exits_with_one() {
    let dir = unique_temp_dir("singular");
    let input = dir.join("system.txt");
    write_file(&input, "2\n1 2 3\n2 4 6\n");

    let output = slae(&[input.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("gauss solve failed"), "stderr={err}");
    assert!(err.contains("singular"), "stderr={err}");
}

#[test]
fn parse_failure_exits_with_one() {
    let dir = unique_temp_dir("parse");
    let input = dir.join("system.txt");
    write_file(&input, "12\n");

    let output = slae(&[input.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to parse"));
}

#[test]
fn missing_file_exits_with_one() {
    let dir = unique_temp_dir("missing");
    let output = slae(&[dir.join("absent.txt").to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to read"));
}

#[test]
fn usage_errors_exit_with_two() {
    assert_eq!(slae(&[]).status.code(), Some(2));
    assert_eq!(
        slae(&["system.txt", "--method", "lu"]).status.code(),
        Some(2)
    );
    assert_eq!(
        slae(&["system.txt", "--layout", "csv"]).status.code(),
        Some(2)
    );
}

#[test]
fn evidence_log_appends_one_line_per_run() {
    let dir = unique_temp_dir("evidence");
    let input = dir.join("system.txt");
    let evidence = dir.join("evidence.jsonl");
    write_file(&input, SCENARIO);

    let evidence_arg = evidence.to_str().unwrap();
    let ok = slae(&[input.to_str().unwrap(), "--evidence", evidence_arg]);
    assert!(ok.status.success(), "stderr={}", stderr(&ok));
    let failed = slae(&[
        input.to_str().unwrap(),
        "--method",
        "jacobi",
        "--max-iterations",
        "3",
        "--evidence",
        evidence_arg,
    ]);
    assert_eq!(failed.status.code(), Some(1));

    let raw = fs::read_to_string(&evidence).expect("evidence written");
    let lines: Vec<Value> = raw
        .lines()
        .map(|line| serde_json::from_str(line).expect("line is JSON"))
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["method"], "gauss");
    assert_eq!(lines[0]["outcome"], "solved");
    assert_eq!(lines[0]["dimension"], 3);
    assert_eq!(lines[1]["method"], "jacobi");
    assert_eq!(lines[1]["outcome"], "failed");
}
