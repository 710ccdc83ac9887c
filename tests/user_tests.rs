// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerline::{db, engine, store, LedgerError};
use rusqlite::Connection;

fn setup() -> Connection {
    db::open_in_memory().unwrap()
}

#[test]
fn duplicate_email_fails_and_keeps_user_count() {
    let mut conn = setup();
    store::create_user(&mut conn, "Ana", "ana@example.com", "$argon2id$test").unwrap();
    let before = store::count_users(&conn).unwrap();

    let err = store::create_user(&mut conn, "Other Ana", "ana@example.com", "$argon2id$test")
        .unwrap_err();
    assert!(matches!(err, LedgerError::DuplicateEmail(e) if e == "ana@example.com"));
    assert_eq!(store::count_users(&conn).unwrap(), before);

    let err = engine::register_user(&mut conn, "Again", " ana@example.com ", "pw").unwrap_err();
    assert!(matches!(err, LedgerError::DuplicateEmail(_)));
    assert_eq!(store::count_users(&conn).unwrap(), before);
}

#[test]
fn registered_user_stores_a_hash_and_can_authenticate() {
    let mut conn = setup();
    let user =
        engine::register_user(&mut conn, "Julius", "julius@example.com", "senha123").unwrap();
    assert_ne!(user.password_hash, "senha123");
    assert!(user.password_hash.starts_with("$argon2id$"));

    assert!(engine::authenticate(&conn, "julius@example.com", "senha123").unwrap());
    assert!(!engine::authenticate(&conn, "julius@example.com", "senha124").unwrap());
    assert!(!engine::authenticate(&conn, "nobody@example.com", "senha123").unwrap());
}

#[test]
fn malformed_stored_credential_does_not_authenticate() {
    let mut conn = setup();
    store::create_user(&mut conn, "Broken", "broken@example.com", "plaintext?").unwrap();
    assert!(!engine::authenticate(&conn, "broken@example.com", "plaintext?").unwrap());
}

#[test]
fn email_change_is_logged_with_old_and_new() {
    let mut conn = setup();
    let user = store::create_user(&mut conn, "Ana", "ana@old.com", "$argon2id$test").unwrap();

    let updated = engine::change_email(&mut conn, user.id, "ana@new.com").unwrap();
    assert_eq!(updated.email, "ana@new.com");
    assert_eq!(store::find_user(&conn, user.id).unwrap().email, "ana@new.com");

    let log = store::email_changes(&conn, user.id).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].old_email, "ana@old.com");
    assert_eq!(log[0].new_email, "ana@new.com");
    assert!(!log[0].changed_at.is_empty());
}

#[test]
fn unchanged_email_writes_no_log() {
    let mut conn = setup();
    let user = store::create_user(&mut conn, "Ana", "ana@example.com", "$argon2id$test").unwrap();
    engine::change_email(&mut conn, user.id, "ana@example.com").unwrap();
    assert!(store::email_changes(&conn, user.id).unwrap().is_empty());
}

#[test]
fn email_change_to_taken_address_rolls_back() {
    let mut conn = setup();
    let ana = store::create_user(&mut conn, "Ana", "ana@example.com", "$argon2id$test").unwrap();
    store::create_user(&mut conn, "Bia", "bia@example.com", "$argon2id$test").unwrap();

    let err = engine::change_email(&mut conn, ana.id, "bia@example.com").unwrap_err();
    assert!(matches!(err, LedgerError::DuplicateEmail(_)));
    assert_eq!(store::find_user(&conn, ana.id).unwrap().email, "ana@example.com");
    assert!(store::email_changes(&conn, ana.id).unwrap().is_empty());

    let err = engine::change_email(&mut conn, 77, "x@example.com").unwrap_err();
    assert!(matches!(err, LedgerError::UnknownUser(77)));
}

#[test]
fn failed_email_update_discards_the_log_entry() {
    let mut conn = setup();
    let user = store::create_user(&mut conn, "Ana", "ana@old.com", "$argon2id$test").unwrap();
    conn.execute_batch(
        "CREATE TRIGGER emails_frozen BEFORE UPDATE OF email ON users
         BEGIN SELECT RAISE(ABORT, 'emails are frozen'); END;",
    )
    .unwrap();

    let err = engine::change_email(&mut conn, user.id, "ana@new.com").unwrap_err();
    assert!(matches!(err, LedgerError::ConstraintViolation(_)));
    assert_eq!(store::find_user(&conn, user.id).unwrap().email, "ana@old.com");
    assert!(store::email_changes(&conn, user.id).unwrap().is_empty());
}

#[test]
fn account_for_unknown_user_is_rejected() {
    let mut conn = setup();
    let err = store::create_account(&mut conn, 5, "Wallet", "checking", rust_decimal::Decimal::ZERO)
        .unwrap_err();
    assert!(matches!(err, LedgerError::UnknownUser(5)));
    let accounts: i64 = conn
        .query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))
        .unwrap();
    assert_eq!(accounts, 0);
}
