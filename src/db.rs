// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::LedgerResult;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.ledgerline", "Ledgerline", "ledgerline"));

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Database location: the explicit override when given, otherwise the
/// platform data directory.
pub fn db_path(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = override_path {
        if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        return Ok(p.to_path_buf());
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("ledgerline.sqlite"))
}

pub fn open(path: &Path) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    conn.busy_timeout(busy_timeout())?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database opened");
    Ok(conn)
}

pub fn open_in_memory() -> LedgerResult<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

fn busy_timeout() -> Duration {
    let ms = std::env::var("LEDGERLINE_BUSY_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_BUSY_TIMEOUT_MS);
    Duration::from_millis(ms)
}

/// Runs `f` inside an immediate write transaction. Commits when `f` returns
/// `Ok`, rolls back otherwise; nothing `f` wrote is visible after an error.
pub fn write_tx<T, F>(conn: &mut Connection, f: F) -> LedgerResult<T>
where
    F: FnOnce(&Transaction<'_>) -> LedgerResult<T>,
{
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    match f(&tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rb) = tx.rollback() {
                tracing::warn!(error = %rb, "rollback failed");
            }
            Err(err)
        }
    }
}

fn init_schema(conn: &Connection) -> LedgerResult<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS users(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        kind TEXT NOT NULL,
        initial_balance TEXT NOT NULL DEFAULT '0',
        FOREIGN KEY(user_id) REFERENCES users(id)
    );
    CREATE INDEX IF NOT EXISTS idx_accounts_user ON accounts(user_id);

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        kind TEXT NOT NULL CHECK(kind IN ('income','expense'))
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_id INTEGER NOT NULL,
        category_id INTEGER NOT NULL,
        amount TEXT NOT NULL,
        description TEXT NOT NULL,
        date TEXT NOT NULL,
        FOREIGN KEY(account_id) REFERENCES accounts(id),
        FOREIGN KEY(category_id) REFERENCES categories(id)
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_id);
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS tags(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS transaction_tags(
        transaction_id INTEGER NOT NULL,
        tag_id INTEGER NOT NULL,
        PRIMARY KEY(transaction_id, tag_id),
        FOREIGN KEY(transaction_id) REFERENCES transactions(id),
        FOREIGN KEY(tag_id) REFERENCES tags(id)
    );

    CREATE TABLE IF NOT EXISTS budgets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        category_id INTEGER NOT NULL,
        month INTEGER NOT NULL CHECK(month BETWEEN 1 AND 12),
        year INTEGER NOT NULL,
        planned TEXT NOT NULL,
        UNIQUE(user_id, category_id, month, year),
        FOREIGN KEY(user_id) REFERENCES users(id),
        FOREIGN KEY(category_id) REFERENCES categories(id)
    );

    CREATE TABLE IF NOT EXISTS goals(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        target TEXT NOT NULL,
        current TEXT NOT NULL DEFAULT '0',
        deadline TEXT,
        FOREIGN KEY(user_id) REFERENCES users(id)
    );

    CREATE TABLE IF NOT EXISTS investment_kinds(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS investments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_id INTEGER NOT NULL,
        kind_id INTEGER NOT NULL,
        ticker TEXT NOT NULL,
        quantity TEXT NOT NULL,
        average_price TEXT NOT NULL,
        FOREIGN KEY(account_id) REFERENCES accounts(id),
        FOREIGN KEY(kind_id) REFERENCES investment_kinds(id)
    );

    -- Append-only audit tables
    CREATE TABLE IF NOT EXISTS email_change_log(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        old_email TEXT NOT NULL,
        new_email TEXT NOT NULL,
        changed_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS account_archive(
        archive_id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_id INTEGER NOT NULL,
        user_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        kind TEXT NOT NULL,
        initial_balance TEXT NOT NULL,
        deleted_at TEXT NOT NULL
    );

    -- Last line of defence for writers that bypass the store.
    CREATE TRIGGER IF NOT EXISTS transactions_sign_guard_insert
    BEFORE INSERT ON transactions
    FOR EACH ROW
    WHEN ((SELECT kind FROM categories WHERE id = NEW.category_id) = 'expense'
            AND CAST(NEW.amount AS REAL) > 0)
      OR ((SELECT kind FROM categories WHERE id = NEW.category_id) = 'income'
            AND CAST(NEW.amount AS REAL) < 0)
    BEGIN
        SELECT RAISE(ABORT, 'transaction amount sign does not match category kind');
    END;

    CREATE TRIGGER IF NOT EXISTS transactions_sign_guard_update
    BEFORE UPDATE OF amount, category_id ON transactions
    FOR EACH ROW
    WHEN ((SELECT kind FROM categories WHERE id = NEW.category_id) = 'expense'
            AND CAST(NEW.amount AS REAL) > 0)
      OR ((SELECT kind FROM categories WHERE id = NEW.category_id) = 'income'
            AND CAST(NEW.amount AS REAL) < 0)
    BEGIN
        SELECT RAISE(ABORT, 'transaction amount sign does not match category kind');
    END;
    "#,
    )?;
    Ok(())
}
