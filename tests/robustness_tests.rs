use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_missing_fields_are_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("robustness_test.csv");
    let mut wtr = csv::Writer::from_path(&output_path).unwrap();
    wtr.write_record(["order_id", "amount", "transaction_id", "return_url", "cancel_url"])
        .unwrap();

    // Valid purchase
    wtr.write_record(["1", "10.0", "TXN-1", "", ""]).unwrap();
    // Missing amount
    wtr.write_record(["2", "", "TXN-2", "", ""]).unwrap();
    // Valid purchase again
    wtr.write_record(["3", "20.0", "TXN-3", "", ""]).unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("localpay"));
    cmd.arg(&output_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "Error processing purchase 2: Validation error: missing required field(s): amount",
        ))
        .stdout(predicate::str::contains("1,TXN-1,true,false"))
        .stdout(predicate::str::contains("TXN-2").not())
        .stdout(predicate::str::contains("3,TXN-3,true,false"));
}

#[test]
fn test_invalid_data_types() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("data_type_test.csv");
    let mut wtr = csv::Writer::from_path(&output_path).unwrap();
    wtr.write_record(["order_id", "amount", "transaction_id", "return_url", "cancel_url"])
        .unwrap();

    // Text in amount field
    wtr.write_record(["1", "not_a_number", "TXN-1", "", ""])
        .unwrap();
    // Negative amount
    wtr.write_record(["2", "-5.0", "TXN-2", "", ""]).unwrap();
    // Valid purchase
    wtr.write_record(["3", "5.0", "TXN-3", "", ""]).unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("localpay"));
    cmd.arg(&output_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading purchase"))
        .stderr(predicate::str::contains("Error processing purchase 2: Invalid amount"))
        .stdout(predicate::str::contains("3,TXN-3,true,false"));
}
