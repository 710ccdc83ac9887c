// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerline::models::CategoryKind;
use ledgerline::{db, engine, store, LedgerError};
use rusqlite::Connection;
use rust_decimal_macros::dec;

fn setup() -> (Connection, i64) {
    let mut conn = db::open_in_memory().unwrap();
    let user = store::create_user(&mut conn, "Ana", "ana@example.com", "$argon2id$test").unwrap();
    (conn, user.id)
}

fn archive_rows(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM account_archive", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn deleting_an_account_archives_exactly_one_snapshot() {
    let (mut conn, user) = setup();
    let account =
        store::create_account(&mut conn, user, "Old card", "credit", dec!(-120.75)).unwrap();

    let archived = engine::delete_account(&mut conn, account.id, false).unwrap();
    assert_eq!(archived.account_id, account.id);

    let rows = store::archived_accounts(&conn, user).unwrap();
    assert_eq!(rows.len(), 1);
    let snap = &rows[0];
    assert_eq!(snap.account_id, account.id);
    assert_eq!(snap.user_id, user);
    assert_eq!(snap.name, "Old card");
    assert_eq!(snap.kind, "credit");
    assert_eq!(snap.initial_balance, dec!(-120.75));
    assert!(!snap.deleted_at.is_empty());

    assert!(matches!(
        store::find_account(&conn, account.id),
        Err(LedgerError::UnknownAccount(_))
    ));
    assert!(store::list_accounts(&conn, user).unwrap().is_empty());
}

#[test]
fn account_with_transactions_needs_cascade() {
    let (mut conn, user) = setup();
    let account = store::create_account(&mut conn, user, "Wallet", "checking", dec!(50)).unwrap();
    let food = store::create_category(&mut conn, "Food", CategoryKind::Expense).unwrap();
    let t =
        engine::add_transaction(&mut conn, account.id, food.id, dec!(10), "Lunch", None).unwrap();
    store::tag_transaction(&mut conn, t.id, "work").unwrap();

    let err = engine::delete_account(&mut conn, account.id, false).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::AccountInUse {
            transactions: 1,
            investments: 0,
            ..
        }
    ));
    assert_eq!(archive_rows(&conn), 0);
    assert!(store::find_account(&conn, account.id).is_ok());

    engine::delete_account(&mut conn, account.id, true).unwrap();
    assert_eq!(archive_rows(&conn), 1);
    assert_eq!(store::count_transactions_for_user(&conn, user).unwrap(), 0);
    assert_eq!(engine::balance(&conn, user).unwrap(), dec!(0));
}

#[test]
fn cascade_also_removes_investments() {
    let (mut conn, user) = setup();
    let broker = store::create_account(&mut conn, user, "Broker", "brokerage", dec!(0)).unwrap();
    let stock = store::create_investment_kind(&mut conn, "Stock").unwrap();
    store::create_investment(&mut conn, broker.id, stock.id, "petr4", dec!(10), dec!(31.5))
        .unwrap();

    assert!(matches!(
        engine::delete_account(&mut conn, broker.id, false),
        Err(LedgerError::AccountInUse { investments: 1, .. })
    ));
    engine::delete_account(&mut conn, broker.id, true).unwrap();
    assert!(store::list_investments(&conn, user).unwrap().is_empty());
}

#[test]
fn deleting_unknown_account_writes_no_archive() {
    let (mut conn, _) = setup();
    let err = engine::delete_account(&mut conn, 31337, true).unwrap_err();
    assert!(matches!(err, LedgerError::UnknownAccount(31337)));
    assert_eq!(archive_rows(&conn), 0);
}

#[test]
fn foreign_keys_block_raw_account_deletes() {
    let (mut conn, user) = setup();
    let account = store::create_account(&mut conn, user, "Wallet", "checking", dec!(0)).unwrap();
    let salary = store::create_category(&mut conn, "Salary", CategoryKind::Income).unwrap();
    engine::add_transaction(&mut conn, account.id, salary.id, dec!(1), "Pay", None).unwrap();
    let res = conn.execute("DELETE FROM accounts WHERE id=?1", [account.id]);
    assert!(res.is_err());
}

#[test]
fn failed_delete_keeps_no_archive_snapshot() {
    let (mut conn, user) = setup();
    let account = store::create_account(&mut conn, user, "Wallet", "checking", dec!(5)).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER accounts_frozen BEFORE DELETE ON accounts
         BEGIN SELECT RAISE(ABORT, 'accounts are frozen'); END;",
    )
    .unwrap();

    let err = engine::delete_account(&mut conn, account.id, false).unwrap_err();
    assert!(matches!(err, LedgerError::ConstraintViolation(msg) if msg.contains("frozen")));
    assert_eq!(archive_rows(&conn), 0);
    assert!(store::find_account(&conn, account.id).is_ok());
}

#[test]
fn failed_cascade_restores_removed_transactions() {
    let (mut conn, user) = setup();
    let account = store::create_account(&mut conn, user, "Wallet", "checking", dec!(50)).unwrap();
    let food = store::create_category(&mut conn, "Food", CategoryKind::Expense).unwrap();
    engine::add_transaction(&mut conn, account.id, food.id, dec!(10), "Lunch", None).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER accounts_frozen BEFORE DELETE ON accounts
         BEGIN SELECT RAISE(ABORT, 'accounts are frozen'); END;",
    )
    .unwrap();

    assert!(engine::delete_account(&mut conn, account.id, true).is_err());
    assert_eq!(archive_rows(&conn), 0);
    assert_eq!(store::count_transactions_for_user(&conn, user).unwrap(), 1);
    assert_eq!(engine::balance(&conn, user).unwrap(), dec!(40));
}
