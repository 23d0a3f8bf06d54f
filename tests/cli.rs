use std::process::{Command, Stdio};

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_ballistic_range"))
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command")
}

#[test]
fn prints_summary_and_history_for_one_shot() {
    let output = run_cli(&["--speed", "100", "--angle", "45"]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ideal trajectory"));
    assert!(stdout.contains("Shot history:"));
    assert!(stdout.contains("Shot 1"));
}

#[test]
fn csv_report_has_header_and_row() {
    let output = run_cli(&[
        "--speed", "300", "--angle", "35", "--cd", "0.3", "--mass", "43", "--caliber", "152",
        "--format", "csv",
    ]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("shot,recorded_at,model"));
    assert!(stdout.lines().any(|line| line.starts_with("1,") && line.contains(",drag,")));
}

#[test]
fn rejects_invalid_speed() {
    let output = run_cli(&["--speed", "0", "--angle", "45"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid speed"));
}

#[test]
fn missing_values_without_input_fail_cleanly() {
    let output = run_cli(&["--angle", "45"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("EOF"));
}
