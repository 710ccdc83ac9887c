// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerline::models::CategoryKind;
use ledgerline::{db, engine, store, LedgerError};
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn setup() -> (Connection, i64) {
    let mut conn = db::open_in_memory().unwrap();
    let user =
        store::create_user(&mut conn, "Julius", "julius@example.com", "$argon2id$test").unwrap();
    (conn, user.id)
}

#[test]
fn balance_sums_initial_balances_and_normalized_transactions() {
    let (mut conn, user) = setup();
    let wallet =
        store::create_account(&mut conn, user, "Wallet", "checking", dec!(50.0)).unwrap();
    let savings =
        store::create_account(&mut conn, user, "Savings", "savings", dec!(1000.0)).unwrap();
    let food = store::create_category(&mut conn, "Food", CategoryKind::Expense).unwrap();
    let salary = store::create_category(&mut conn, "Salary", CategoryKind::Income).unwrap();

    engine::add_transaction(
        &mut conn,
        wallet.id,
        food.id,
        dec!(-15.50),
        "Snack",
        Some("2025-11-01"),
    )
    .unwrap();
    engine::add_transaction(
        &mut conn,
        savings.id,
        salary.id,
        dec!(3000.00),
        "Pay",
        Some("2025-11-05"),
    )
    .unwrap();

    assert_eq!(store::sum_initial_balances(&conn, user).unwrap(), dec!(1050));
    assert_eq!(store::sum_transactions(&conn, user).unwrap(), dec!(2984.50));
    assert_eq!(engine::balance(&conn, user).unwrap(), dec!(4034.50));
}

#[test]
fn balance_uses_the_stored_sign_not_the_input_sign() {
    let (mut conn, user) = setup();
    let wallet = store::create_account(&mut conn, user, "Wallet", "checking", dec!(100)).unwrap();
    let food = store::create_category(&mut conn, "Food", CategoryKind::Expense).unwrap();
    engine::add_transaction(&mut conn, wallet.id, food.id, dec!(30), "Dinner", None).unwrap();
    assert_eq!(engine::balance(&conn, user).unwrap(), dec!(70));
}

#[test]
fn balance_is_idempotent() {
    let (mut conn, user) = setup();
    let wallet =
        store::create_account(&mut conn, user, "Wallet", "checking", dec!(12.34)).unwrap();
    let food = store::create_category(&mut conn, "Food", CategoryKind::Expense).unwrap();
    engine::add_transaction(&mut conn, wallet.id, food.id, dec!(2.34), "Tea", None).unwrap();

    let first = engine::balance(&conn, user).unwrap();
    for _ in 0..5 {
        assert_eq!(engine::balance(&conn, user).unwrap(), first);
    }
    assert_eq!(store::count_transactions_for_user(&conn, user).unwrap(), 1);
}

#[test]
fn user_without_accounts_has_zero_balance() {
    let (conn, user) = setup();
    assert_eq!(engine::balance(&conn, user).unwrap(), Decimal::ZERO);
    assert_eq!(engine::balance(&conn, 4242).unwrap(), Decimal::ZERO);
}

#[test]
fn balances_do_not_leak_between_users() {
    let (mut conn, user) = setup();
    let other =
        store::create_user(&mut conn, "Rochelle", "rochelle@example.com", "$argon2id$test")
            .unwrap();
    store::create_account(&mut conn, user, "Mine", "checking", dec!(10)).unwrap();
    let theirs =
        store::create_account(&mut conn, other.id, "Theirs", "checking", dec!(500)).unwrap();
    let salary = store::create_category(&mut conn, "Salary", CategoryKind::Income).unwrap();
    engine::add_transaction(&mut conn, theirs.id, salary.id, dec!(99), "Pay", None).unwrap();

    assert_eq!(engine::balance(&conn, user).unwrap(), dec!(10));
    assert_eq!(engine::balance(&conn, other.id).unwrap(), dec!(599));
}

#[test]
fn balance_past_decimal_range_is_an_error() {
    let (mut conn, user) = setup();
    let wallet =
        store::create_account(&mut conn, user, "Wallet", "checking", Decimal::MAX).unwrap();
    let salary = store::create_category(&mut conn, "Salary", CategoryKind::Income).unwrap();
    engine::add_transaction(&mut conn, wallet.id, salary.id, Decimal::MAX, "Jackpot", None)
        .unwrap();

    let err = engine::balance(&conn, user).unwrap_err();
    assert!(matches!(err, LedgerError::AmountOverflow("balance")));

    store::create_account(&mut conn, user, "Vault", "savings", Decimal::MAX).unwrap();
    assert!(matches!(
        store::sum_initial_balances(&conn, user),
        Err(LedgerError::AmountOverflow(_))
    ));
}
