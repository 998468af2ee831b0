use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

#[test]
fn test_zero_and_large_amounts_settle() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "order_id, amount, transaction_id").unwrap();
    writeln!(file, "1, 0, TXN-ZERO").unwrap();
    writeln!(file, "2, 1000000000.0001, TXN-MAX").unwrap();

    let mut cmd = Command::new(cargo_bin!("localpay"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,TXN-ZERO,true,false"))
        .stdout(predicate::str::contains("2,TXN-MAX,true,false"));
}

#[test]
fn test_missing_optional_columns() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "order_id, amount").unwrap();
    writeln!(file, "INV-7, 1.5").unwrap();

    let mut cmd = Command::new(cargo_bin!("localpay"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("INV-7,INV-7,true,false"));
}
