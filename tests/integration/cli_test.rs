use anyhow::Result;
use std::process::Command;

#[path = "../common/mod.rs"]
mod common;

use common::{write_workload, ABC_WORKLOAD};

fn joinorder() -> Command {
    Command::new(env!("CARGO_BIN_EXE_joinorder"))
}

/// Test that `plan` prints the ordered joins
#[test]
fn test_cli_plan_command() -> Result<()> {
    let file = write_workload(ABC_WORKLOAD)?;

    let output = joinorder()
        .arg("plan")
        .arg(file.path())
        .output()?;

    assert!(output.status.success(), "CLI plan command failed");

    let output_str = String::from_utf8(output.stdout)?;
    assert!(output_str.contains("Query: SELECT * FROM a, b, c"), "Query not echoed");
    assert!(output_str.contains("Join order (dynamic programming):"), "Strategy header not found");
    assert!(output_str.contains("1. b.a_id = a.id (cost = 2010, card = 10)"), "First join not found");
    assert!(output_str.contains("2. b.id = c.b_id (cost = 3010, card = 50)"), "Second join not found");
    assert!(output_str.contains("Total cost: 3010"), "Total cost not found");

    Ok(())
}

/// Test that global flags override the workload configuration
#[test]
fn test_cli_strategy_override() -> Result<()> {
    let file = write_workload(ABC_WORKLOAD)?;

    let output = joinorder()
        .args(["--strategy", "greedy", "plan"])
        .arg(file.path())
        .output()?;
    assert!(output.status.success(), "CLI greedy plan failed");
    let output_str = String::from_utf8(output.stdout)?;
    assert!(output_str.contains("Join order (greedy):"));
    assert!(output_str.contains("Total cost: 11010"));

    // two joins exceed a threshold of one, so auto falls back to greedy
    let output = joinorder()
        .arg("plan")
        .arg(file.path())
        .args(["--greedy-threshold", "1"])
        .output()?;
    assert!(output.status.success(), "CLI threshold plan failed");
    let output_str = String::from_utf8(output.stdout)?;
    assert!(output_str.contains("Join order (greedy):"));

    Ok(())
}

/// Test that `explain` prints the plan tree
#[test]
fn test_cli_explain_command() -> Result<()> {
    let file = write_workload(ABC_WORKLOAD)?;

    let output = joinorder()
        .arg("explain")
        .arg(file.path())
        .output()?;

    assert!(output.status.success(), "CLI explain command failed");

    let output_str = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = output_str.lines().collect();
    assert_eq!(lines[0], "Join b.id = c.b_id (cost = 3010, card = 50)");
    assert_eq!(lines[1], "├── Join b.a_id = a.id (cost = 2010, card = 10)");
    assert_eq!(lines[4], "└── c (cost = 50, card = 50)");

    Ok(())
}

/// Test that failures exit with a non-zero status and a message on stderr
#[test]
fn test_cli_errors() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("missing.json");

    let output = joinorder()
        .arg("plan")
        .arg(&missing)
        .output()?;
    assert!(!output.status.success(), "missing file should fail");
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Failed to load workload"), "unexpected stderr: {}", stderr);

    let disconnected = write_workload(
        r#"{
            "tables": [
                { "name": "a", "tuples": 1, "pages": 1 }, { "name": "b", "tuples": 1, "pages": 1 },
                { "name": "c", "tuples": 1, "pages": 1 }, { "name": "d", "tuples": 1, "pages": 1 }
            ],
            "joins": [ { "left": "a.x", "right": "b.x" }, { "left": "c.x", "right": "d.x" } ]
        }"#,
    )?;
    let output = joinorder()
        .arg("plan")
        .arg(disconnected.path())
        .output()?;
    assert!(!output.status.success(), "disconnected joins should fail");
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Join ordering failed"), "unexpected stderr: {}", stderr);

    let output = joinorder()
        .args(["--strategy", "random", "plan"])
        .arg(disconnected.path())
        .output()?;
    assert!(!output.status.success(), "unknown strategy should be rejected");

    Ok(())
}
