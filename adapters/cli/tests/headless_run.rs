use std::process::Command;

#[test]
fn short_session_prints_a_summary() {
    let output = Command::new(env!("CARGO_BIN_EXE_wave-arena"))
        .args(["--seed", "3", "--seconds", "6", "--fps", "50"])
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch wave-arena");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("frames"));
    assert!(stdout.contains("wave 1 reached"));
}

#[test]
fn missing_tuning_file_fails_with_context() {
    let output = Command::new(env!("CARGO_BIN_EXE_wave-arena"))
        .args(["--config", "/nonexistent/tuning.toml", "--seconds", "1"])
        .output()
        .expect("failed to launch wave-arena");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read tuning file"));
}
