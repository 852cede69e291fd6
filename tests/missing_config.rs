use std::process::Command;

#[test]
fn exits_with_status_one_without_credentials() {
    let output = Command::new(env!("CARGO_BIN_EXE_xsmb-tally"))
        .env_clear()
        .env("RUST_LOG", "info")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("TELEGRAM_BOT_TOKEN"));
    assert!(!stdout.contains("Collecting results"));
    assert!(!stdout.contains("Sending result to Telegram"));
    assert!(!stdout.contains("Run finished"));
    assert!(!stdout.contains("🔮"));
}

#[test]
fn exits_with_status_one_with_only_the_token() {
    let output = Command::new(env!("CARGO_BIN_EXE_xsmb-tally"))
        .env_clear()
        .env("TELEGRAM_BOT_TOKEN", "123:abc")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}
