use assert_cmd::Command;

#[test]
fn test_lookup_rejects_malformed_inn_without_network() {
    let output = Command::cargo_bin("reestr")
        .unwrap()
        .env("RUST_LOG", "off")
        .args(["lookup", "abc"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), r#"{"outcome":"invalid_input","inn":"abc"}"#);
}

#[test]
fn test_lookup_requires_inn() {
    Command::cargo_bin("reestr")
        .unwrap()
        .arg("lookup")
        .assert()
        .failure();
}

#[test]
fn test_missing_config_file_fails() {
    Command::cargo_bin("reestr")
        .unwrap()
        .env("RUST_LOG", "off")
        .args(["--config", "/nonexistent/reestr.yaml", "status"])
        .assert()
        .failure();
}

#[test]
fn test_help_lists_subcommands() {
    let output = Command::cargo_bin("reestr").unwrap().arg("--help").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("lookup"));
    assert!(stdout.contains("status"));
}
