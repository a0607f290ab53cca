use std::process::Command;

#[test]
fn cli_smoke_help() {
    let exe = env!("CARGO_BIN_EXE_pawplanner");
    let output = Command::new(exe)
        .arg("--help")
        .output()
        .expect("failed to run pawplanner --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("today"));
    assert!(stdout.contains("week"));
}

#[test]
fn unknown_command_reports_invalid_input() {
    let exe = env!("CARGO_BIN_EXE_pawplanner");
    let output = Command::new(exe)
        .arg("groom")
        .output()
        .expect("failed to run pawplanner groom");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}
