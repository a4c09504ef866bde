use std::process::Command;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_root_length_rust_cli"))
}

#[test]
fn missing_image_path_prints_usage_to_stdout() {
    let output = cli().output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.trim().is_empty());
    assert!(stdout.contains("Usage"), "stdout was: {}", stdout);
}

#[test]
fn unreadable_image_fails_after_banner() {
    let missing = std::env::temp_dir().join(format!("root_length_cli_missing_{}.png", std::process::id()));
    let output = cli().arg(&missing).output().unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Copyright (C) 2022 Johannes Fahr"));
    assert!(stdout.contains("ABSOLUTELY NO WARRANTY"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ImageLoad"), "stderr was: {}", stderr);
}

#[test]
fn help_still_succeeds() {
    let output = cli().arg("--help").output().unwrap();
    assert!(output.status.success());
}
