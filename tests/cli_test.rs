use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("tests/fixtures/purchases.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "order_id,transaction_reference,successful,redirect,message",
        ))
        .stdout(predicate::str::contains(
            "1,TXN-1,true,false,Simulated payment approved",
        ))
        .stdout(predicate::str::contains(
            "2,TXN-3,true,false,Simulated payment approved",
        ))
        // No transaction id: the order id becomes the reference
        .stdout(predicate::str::contains(
            "3,3,true,false,Simulated payment approved",
        ));

    Ok(())
}

#[test]
fn test_cli_generated_batch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.csv");
    common::generate_purchases_csv(&path, 25).expect("Failed to generate CSV");

    let output = Command::new(cargo_bin!("localpay"))
        .arg(&path)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    // Header + 25 rows
    assert_eq!(stdout.lines().count(), 26);
    assert!(stdout.contains("25,TXN-25,true,false,Simulated payment approved"));
}

#[test]
fn test_cli_rejects_non_whitelisted_driver() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(
        &mut config,
        br#"{"default_driver": "LocalDummy", "drivers": ["Stripe"]}"#,
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("localpay"));
    cmd.arg("tests/fixtures/purchases.csv")
        .arg("--config")
        .arg(config.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "Error processing purchase 1: Driver LocalDummy is not whitelisted",
        ))
        .stdout(predicate::str::contains("TXN-1").not());
}

#[test]
fn test_cli_missing_input_fails() {
    let mut cmd = Command::new(cargo_bin!("localpay"));
    cmd.arg("tests/fixtures/does_not_exist.csv");

    cmd.assert().failure();
}
