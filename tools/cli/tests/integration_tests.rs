use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

const ADMIN: &str = "GCKFBEIYTKP6RCZEKMGL2QAPLGKUBGE5UAHRQJRXGCQHKPQM6CHCM4K4";
const TOKEN: &str = "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAE";

fn contract_id(suffix: char) -> String {
    format!("C{}{}", "B".repeat(54), suffix)
}

/// Command isolated from the user's home directory.
fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("smartwill-cli").unwrap();
    cmd.arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("--deployments")
        .arg(deployments_path(dir));
    cmd
}

fn deployments_path(dir: &TempDir) -> PathBuf {
    dir.path().join("deployments.json")
}

fn record(dir: &TempDir, id: &str, network: &str) {
    cli(dir)
        .args(["record", "--contract-id", id, "--network", network])
        .assert()
        .success();
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("smartwill-cli").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Operator CLI for Smart Will contracts"));
}

#[test]
fn test_cli_status() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Smart Will CLI Status"))
        .stdout(predicate::str::contains("Deployments: 0 recorded"));
}

#[test]
fn test_config_file_creation() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    cli(&dir).arg("status").assert().success();

    assert!(config_path.exists());
    let config_content = std::fs::read_to_string(&config_path).unwrap();
    assert!(config_content.contains("rpc_url"));
    assert!(config_content.contains("network_passphrase"));
    assert!(config_content.contains("deployments.json"));
}

#[test]
fn test_record_then_last() {
    let dir = TempDir::new().unwrap();
    let first = contract_id('1');
    let second = contract_id('2');

    record(&dir, &first, "testnet");
    record(&dir, &second, "testnet");

    cli(&dir)
        .arg("last")
        .assert()
        .success()
        .stdout(predicate::str::contains(second.as_str()))
        .stdout(predicate::str::contains(first.as_str()).not());

    let content = std::fs::read_to_string(deployments_path(&dir)).unwrap();
    assert!(content.contains("\"type\": \"smart_will\""));
    assert!(content.contains("\"deployed_at\""));
}

#[test]
fn test_last_with_filters() {
    let dir = TempDir::new().unwrap();
    let testnet = contract_id('1');
    let mainnet = contract_id('2');

    record(&dir, &testnet, "testnet");
    record(&dir, &mainnet, "mainnet");

    cli(&dir)
        .args(["last", "--network", "testnet"])
        .assert()
        .success()
        .stdout(predicate::str::contains(testnet.as_str()));

    cli(&dir)
        .args(["last", "--type", "token"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No deployments recorded"));
}

#[test]
fn test_last_without_records() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .arg("last")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No deployments recorded"));
}

#[test]
fn test_record_rejects_invalid_contract_id() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["record", "--contract-id", ADMIN])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Contract ID must start with 'C'"));

    assert!(!deployments_path(&dir).exists());
}

#[test]
fn test_list() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No deployments recorded"));

    record(&dir, &contract_id('1'), "testnet");
    record(&dir, &contract_id('2'), "mainnet");

    cli(&dir)
        .args(["list", "--network", "mainnet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mainnet"))
        .stdout(predicate::str::contains("testnet").not());
}

#[test]
fn test_schedule_preview() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args([
            "schedule",
            "--deposit", "500",
            "--amount", "100",
            "--frequency", "300",
            "--waiting-period", "10m",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 payouts of 100 every 5m 0s"))
        .stdout(predicate::str::contains("10m 0s"))
        .stdout(predicate::str::contains("30m 0s"))
        .stdout(predicate::str::contains("Reclaimable by the owner: 0"));
}

#[test]
fn test_schedule_with_limit_and_decimals() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args([
            "schedule",
            "--deposit", "10",
            "--amount", "2.5",
            "--limit", "5",
            "--frequency", "1d",
            "--waiting-period", "180d",
            "--decimals", "7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 payouts of 2.5"))
        .stdout(predicate::str::contains("180d 0h 0m 0s"))
        .stdout(predicate::str::contains("Reclaimable by the owner: 5"));
}

#[test]
fn test_schedule_surplus_excludes_limit_remainder() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args([
            "schedule",
            "--deposit", "1000",
            "--amount", "300",
            "--limit", "700",
            "--frequency", "300",
            "--waiting-period", "600",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 payouts of 300"))
        .stdout(predicate::str::contains("Reclaimable by the owner: 300"));
}

#[test]
fn test_schedule_rejects_negative_amount() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args([
            "schedule",
            "--deposit", "10",
            "--amount=-0.5",
            "--frequency", "300",
            "--waiting-period", "600",
            "--decimals", "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount cannot be negative"));
}

#[test]
fn test_schedule_rejects_invalid_terms() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args([
            "schedule",
            "--deposit", "500",
            "--amount", "100",
            "--limit", "50",
            "--frequency", "300",
            "--waiting-period", "600",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit 50 is below the transfer amount 100"));
}

#[test]
fn test_deploy_without_admin() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_deploy_with_invalid_admin() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["deploy", "--admin", "invalid_address", "--token", TOKEN])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Address must start with 'G'"));
}

#[test]
fn test_deploy_without_token() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["deploy", "--admin", ADMIN])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No token contract provided"));
}

#[test]
fn test_deploy_with_missing_wasm() {
    let dir = TempDir::new().unwrap();
    let wasm = dir.path().join("missing.wasm");

    cli(&dir)
        .args(["deploy", "--admin", ADMIN, "--token", TOKEN, "--wasm"])
        .arg(&wasm)
        .assert()
        .failure()
        .stderr(predicate::str::contains("WASM file not found"));

    assert!(!deployments_path(&dir).exists());
}

#[test]
fn test_info_without_contract_id() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No contract ID provided"));
}

#[test]
fn test_info_falls_back_to_last_deployment() {
    let dir = TempDir::new().unwrap();
    let id = contract_id('7');
    record(&dir, &id, "testnet");

    // The stellar CLI lookup may fail here; that is only a warning
    cli(&dir)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Contract ID: {}", id)));
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("smartwill-cli").unwrap();
    cmd.arg("invalid_command");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("smartwill-cli").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("smartwill-cli"));
}

#[test]
fn test_cli_with_short_verbose_flag() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["-v", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Smart Will CLI Status"));
}
