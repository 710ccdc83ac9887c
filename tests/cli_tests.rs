// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn ledger(db: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("ledgerline").unwrap();
    cmd.env("LEDGERLINE_DB", db).env_remove("RUST_LOG");
    cmd
}

#[test]
fn demo_flow_from_initdb_to_balance() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("ledger.sqlite");

    ledger(&db)
        .args(["initdb", "--demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 10 categories"));

    ledger(&db)
        .args(["getbalance", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("34.50"));

    // Category 1 is the seeded "Food" expense; a positive amount is flipped.
    ledger(&db)
        .args(["addtransaction", "1", "1", "20", "Lunch", "--date", "2025-11-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-20.00"));

    ledger(&db)
        .args(["getbalance", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"balance\": \"14.50\""));
}

#[test]
fn failures_exit_non_zero_with_a_message() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("ledger.sqlite");
    ledger(&db).arg("initdb").assert().success();

    ledger(&db)
        .args(["addtransaction", "1", "1", "-5", "Snack", "--date", "2025/11/02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));

    ledger(&db)
        .args(["addtransaction", "42", "1", "-5", "Snack"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown account 42"));

    ledger(&db)
        .args(["getbalance", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.00"));
}
