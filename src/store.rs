// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger store: entity CRUD, referential checks and aggregate queries.
//!
//! Functions taking `&mut Connection` are complete units of work and run in
//! their own write transaction. The `*_row` helpers take `&Connection` so the
//! engine can compose several of them inside one transaction.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::db::write_tx;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, ArchivedAccount, Budget, Category, CategoryKind, EmailChange, Goal, Investment,
    InvestmentKind, StatementLine, Tag, Transaction, User,
};
use crate::utils::{date_column, decimal_column, now_timestamp};

fn user_from_row(r: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: r.get(0)?,
        name: r.get(1)?,
        email: r.get(2)?,
        password_hash: r.get(3)?,
        created_at: r.get(4)?,
    })
}

fn account_from_row(r: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        kind: r.get(3)?,
        initial_balance: decimal_column(r, 4)?,
    })
}

fn category_from_row(r: &Row<'_>) -> rusqlite::Result<Category> {
    let kind: String = r.get(2)?;
    let kind = kind.parse::<CategoryKind>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Category {
        id: r.get(0)?,
        name: r.get(1)?,
        kind,
    })
}

fn goal_from_row(r: &Row<'_>) -> rusqlite::Result<Goal> {
    let deadline = match r.get::<_, Option<String>>(5)? {
        Some(_) => Some(date_column(r, 5)?),
        None => None,
    };
    Ok(Goal {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        target: decimal_column(r, 3)?,
        current: decimal_column(r, 4)?,
        deadline,
    })
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub fn create_user(
    conn: &mut Connection,
    name: &str,
    email: &str,
    password_hash: &str,
) -> LedgerResult<User> {
    write_tx(conn, |tx| insert_user_row(tx, name, email, password_hash))
}

pub(crate) fn insert_user_row(
    conn: &Connection,
    name: &str,
    email: &str,
    password_hash: &str,
) -> LedgerResult<User> {
    let email = email.trim();
    if find_user_by_email(conn, email)?.is_some() {
        return Err(LedgerError::DuplicateEmail(email.to_string()));
    }
    let created_at = now_timestamp();
    conn.execute(
        "INSERT INTO users(name, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![name, email, password_hash, created_at],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(user_id = id, "user created");
    Ok(User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        created_at,
    })
}

/// Fails with `UnknownUser` when no such user exists.
pub fn find_user(conn: &Connection, id: i64) -> LedgerResult<User> {
    conn.query_row(
        "SELECT id, name, email, password_hash, created_at FROM users WHERE id=?1",
        params![id],
        user_from_row,
    )
    .optional()?
    .ok_or(LedgerError::UnknownUser(id))
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> LedgerResult<Option<User>> {
    Ok(conn
        .query_row(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email=?1",
            params![email.trim()],
            user_from_row,
        )
        .optional()?)
}

pub fn list_users(conn: &Connection) -> LedgerResult<Vec<User>> {
    let mut stmt =
        conn.prepare("SELECT id, name, email, password_hash, created_at FROM users ORDER BY id")?;
    let rows = stmt.query_map([], user_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn count_users(conn: &Connection) -> LedgerResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?)
}

pub(crate) fn update_email_row(conn: &Connection, user_id: i64, email: &str) -> LedgerResult<()> {
    conn.execute(
        "UPDATE users SET email=?1 WHERE id=?2",
        params![email, user_id],
    )?;
    Ok(())
}

pub(crate) fn log_email_change_row(
    conn: &Connection,
    user_id: i64,
    old_email: &str,
    new_email: &str,
) -> LedgerResult<i64> {
    conn.execute(
        "INSERT INTO email_change_log(user_id, old_email, new_email, changed_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![user_id, old_email, new_email, now_timestamp()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn email_changes(conn: &Connection, user_id: i64) -> LedgerResult<Vec<EmailChange>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, old_email, new_email, changed_at FROM email_change_log
         WHERE user_id=?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok(EmailChange {
            id: r.get(0)?,
            user_id: r.get(1)?,
            old_email: r.get(2)?,
            new_email: r.get(3)?,
            changed_at: r.get(4)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

pub fn create_account(
    conn: &mut Connection,
    user_id: i64,
    name: &str,
    kind: &str,
    initial_balance: Decimal,
) -> LedgerResult<Account> {
    write_tx(conn, |tx| {
        insert_account_row(tx, user_id, name, kind, initial_balance)
    })
}

pub(crate) fn insert_account_row(
    conn: &Connection,
    user_id: i64,
    name: &str,
    kind: &str,
    initial_balance: Decimal,
) -> LedgerResult<Account> {
    find_user(conn, user_id)?;
    conn.execute(
        "INSERT INTO accounts(user_id, name, kind, initial_balance) VALUES (?1, ?2, ?3, ?4)",
        params![user_id, name, kind, initial_balance.to_string()],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(account_id = id, user_id, "account created");
    Ok(Account {
        id,
        user_id,
        name: name.to_string(),
        kind: kind.to_string(),
        initial_balance,
    })
}

/// Fails with `UnknownAccount` when no such account exists.
pub fn find_account(conn: &Connection, id: i64) -> LedgerResult<Account> {
    conn.query_row(
        "SELECT id, user_id, name, kind, initial_balance FROM accounts WHERE id=?1",
        params![id],
        account_from_row,
    )
    .optional()?
    .ok_or(LedgerError::UnknownAccount(id))
}

pub fn list_accounts(conn: &Connection, user_id: i64) -> LedgerResult<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, kind, initial_balance FROM accounts
         WHERE user_id=?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![user_id], account_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Number of transactions and investments still pointing at the account.
pub(crate) fn account_dependents(conn: &Connection, account_id: i64) -> LedgerResult<(i64, i64)> {
    let transactions: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE account_id=?1",
        params![account_id],
        |r| r.get(0),
    )?;
    let investments: i64 = conn.query_row(
        "SELECT COUNT(*) FROM investments WHERE account_id=?1",
        params![account_id],
        |r| r.get(0),
    )?;
    Ok((transactions, investments))
}

pub(crate) fn delete_account_dependents(conn: &Connection, account_id: i64) -> LedgerResult<()> {
    conn.execute(
        "DELETE FROM transaction_tags WHERE transaction_id IN
            (SELECT id FROM transactions WHERE account_id=?1)",
        params![account_id],
    )?;
    conn.execute(
        "DELETE FROM transactions WHERE account_id=?1",
        params![account_id],
    )?;
    conn.execute(
        "DELETE FROM investments WHERE account_id=?1",
        params![account_id],
    )?;
    Ok(())
}

pub(crate) fn archive_account_row(
    conn: &Connection,
    account: &Account,
    deleted_at: &str,
) -> LedgerResult<i64> {
    conn.execute(
        "INSERT INTO account_archive(account_id, user_id, name, kind, initial_balance, deleted_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            account.id,
            account.user_id,
            account.name,
            account.kind,
            account.initial_balance.to_string(),
            deleted_at
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub(crate) fn delete_account_row(conn: &Connection, account_id: i64) -> LedgerResult<()> {
    conn.execute("DELETE FROM accounts WHERE id=?1", params![account_id])?;
    Ok(())
}

pub fn archived_accounts(conn: &Connection, user_id: i64) -> LedgerResult<Vec<ArchivedAccount>> {
    let mut stmt = conn.prepare(
        "SELECT archive_id, account_id, user_id, name, kind, initial_balance, deleted_at
         FROM account_archive WHERE user_id=?1 ORDER BY archive_id",
    )?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok(ArchivedAccount {
            archive_id: r.get(0)?,
            account_id: r.get(1)?,
            user_id: r.get(2)?,
            name: r.get(3)?,
            kind: r.get(4)?,
            initial_balance: decimal_column(r, 5)?,
            deleted_at: r.get(6)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub fn create_category(
    conn: &mut Connection,
    name: &str,
    kind: CategoryKind,
) -> LedgerResult<Category> {
    write_tx(conn, |tx| insert_category_row(tx, name, kind))
}

pub(crate) fn insert_category_row(
    conn: &Connection,
    name: &str,
    kind: CategoryKind,
) -> LedgerResult<Category> {
    let name = name.trim();
    if find_category_by_name(conn, name)?.is_some() {
        return Err(LedgerError::duplicate_name("Category", name));
    }
    conn.execute(
        "INSERT INTO categories(name, kind) VALUES (?1, ?2)",
        params![name, kind.as_str()],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(category_id = id, %kind, "category created");
    Ok(Category {
        id,
        name: name.to_string(),
        kind,
    })
}

/// Fails with `NotFound` when no such category exists.
pub fn find_category(conn: &Connection, id: i64) -> LedgerResult<Category> {
    conn.query_row(
        "SELECT id, name, kind FROM categories WHERE id=?1",
        params![id],
        category_from_row,
    )
    .optional()?
    .ok_or_else(|| LedgerError::not_found("Category", id))
}

pub fn find_category_by_name(conn: &Connection, name: &str) -> LedgerResult<Option<Category>> {
    Ok(conn
        .query_row(
            "SELECT id, name, kind FROM categories WHERE name=?1",
            params![name.trim()],
            category_from_row,
        )
        .optional()?)
}

pub fn list_categories(conn: &Connection) -> LedgerResult<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name, kind FROM categories ORDER BY kind, name")?;
    let rows = stmt.query_map([], category_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn count_categories(conn: &Connection) -> LedgerResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?)
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

pub fn insert_transaction(
    conn: &mut Connection,
    account_id: i64,
    category_id: i64,
    amount: Decimal,
    description: &str,
    date: NaiveDate,
) -> LedgerResult<Transaction> {
    write_tx(conn, |tx| {
        insert_transaction_row(tx, account_id, category_id, amount, description, date)
    })
}

/// Inserts one transaction, normalizing the amount sign against the kind of
/// the category as read in the same transaction.
pub(crate) fn insert_transaction_row(
    conn: &Connection,
    account_id: i64,
    category_id: i64,
    amount: Decimal,
    description: &str,
    date: NaiveDate,
) -> LedgerResult<Transaction> {
    find_account(conn, account_id)?;
    let category = find_category(conn, category_id).map_err(|e| {
        if e.is_not_found() {
            LedgerError::UnknownCategory(category_id)
        } else {
            e
        }
    })?;
    let stored = category.kind.normalize(amount);
    if stored != amount {
        tracing::debug!(%amount, %stored, kind = %category.kind, "amount sign normalized");
    }
    conn.execute(
        "INSERT INTO transactions(account_id, category_id, amount, description, date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            account_id,
            category_id,
            stored.to_string(),
            description,
            date.to_string()
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(transaction_id = id, account_id, amount = %stored, "transaction recorded");
    Ok(Transaction {
        id,
        account_id,
        category_id,
        amount: stored,
        description: description.to_string(),
        date,
    })
}

pub fn find_transaction(conn: &Connection, id: i64) -> LedgerResult<Transaction> {
    conn.query_row(
        "SELECT id, account_id, category_id, amount, description, date FROM transactions
         WHERE id=?1",
        params![id],
        |r| {
            Ok(Transaction {
                id: r.get(0)?,
                account_id: r.get(1)?,
                category_id: r.get(2)?,
                amount: decimal_column(r, 3)?,
                description: r.get(4)?,
                date: date_column(r, 5)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| LedgerError::not_found("Transaction", id))
}

/// Transactions of one account with their category names, newest first.
pub fn account_transactions(
    conn: &Connection,
    account_id: i64,
) -> LedgerResult<Vec<StatementLine>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.date, t.description, t.amount, c.name
         FROM transactions t JOIN categories c ON t.category_id=c.id
         WHERE t.account_id=?1
         ORDER BY t.date DESC, t.id DESC",
    )?;
    let rows = stmt.query_map(params![account_id], |r| {
        Ok(StatementLine {
            id: r.get(0)?,
            date: date_column(r, 1)?,
            description: r.get(2)?,
            amount: decimal_column(r, 3)?,
            category: r.get(4)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn count_transactions_for_user(conn: &Connection, user_id: i64) -> LedgerResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM transactions t JOIN accounts a ON t.account_id=a.id
         WHERE a.user_id=?1",
        params![user_id],
        |r| r.get(0),
    )?)
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

fn sum_decimal_column(
    conn: &Connection,
    what: &'static str,
    sql: &str,
    id: i64,
) -> LedgerResult<Decimal> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params![id])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        total = total
            .checked_add(decimal_column(r, 0)?)
            .ok_or(LedgerError::AmountOverflow(what))?;
    }
    Ok(total)
}

/// Sum of `initial_balance` over the user's accounts; zero when there are none.
pub fn sum_initial_balances(conn: &Connection, user_id: i64) -> LedgerResult<Decimal> {
    sum_decimal_column(
        conn,
        "initial balances",
        "SELECT initial_balance FROM accounts WHERE user_id=?1",
        user_id,
    )
}

/// Sum of stored (already normalized) amounts over the user's transactions.
pub fn sum_transactions(conn: &Connection, user_id: i64) -> LedgerResult<Decimal> {
    sum_decimal_column(
        conn,
        "transaction total",
        "SELECT t.amount FROM transactions t JOIN accounts a ON t.account_id=a.id
         WHERE a.user_id=?1",
        user_id,
    )
}

/// Stored amounts of one user's transactions in a category for a month.
pub(crate) fn category_amounts(
    conn: &Connection,
    user_id: i64,
    category_id: i64,
    month: u32,
    year: i32,
) -> LedgerResult<Vec<Decimal>> {
    let prefix = format!("{:04}-{:02}", year, month);
    let mut stmt = conn.prepare(
        "SELECT t.amount FROM transactions t JOIN accounts a ON t.account_id=a.id
         WHERE a.user_id=?1 AND t.category_id=?2 AND substr(t.date,1,7)=?3",
    )?;
    let rows = stmt.query_map(params![user_id, category_id, prefix], |r| {
        decimal_column(r, 0)
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

pub fn create_tag(conn: &mut Connection, name: &str) -> LedgerResult<Tag> {
    write_tx(conn, |tx| {
        let name = name.trim();
        if find_tag_by_name(tx, name)?.is_some() {
            return Err(LedgerError::duplicate_name("Tag", name));
        }
        insert_tag_row(tx, name)
    })
}

fn insert_tag_row(conn: &Connection, name: &str) -> LedgerResult<Tag> {
    conn.execute("INSERT INTO tags(name) VALUES (?1)", params![name])?;
    Ok(Tag {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

pub fn find_tag_by_name(conn: &Connection, name: &str) -> LedgerResult<Option<Tag>> {
    Ok(conn
        .query_row(
            "SELECT id, name FROM tags WHERE name=?1",
            params![name.trim()],
            |r| {
                Ok(Tag {
                    id: r.get(0)?,
                    name: r.get(1)?,
                })
            },
        )
        .optional()?)
}

/// Attaches a tag (created on first use) to a transaction. Tagging twice is a
/// no-op.
pub fn tag_transaction(conn: &mut Connection, transaction_id: i64, tag: &str) -> LedgerResult<Tag> {
    write_tx(conn, |tx| {
        find_transaction(tx, transaction_id)?;
        let tag = match find_tag_by_name(tx, tag)? {
            Some(t) => t,
            None => insert_tag_row(tx, tag.trim())?,
        };
        tx.execute(
            "INSERT OR IGNORE INTO transaction_tags(transaction_id, tag_id) VALUES (?1, ?2)",
            params![transaction_id, tag.id],
        )?;
        Ok(tag)
    })
}

pub fn transaction_tags(conn: &Connection, transaction_id: i64) -> LedgerResult<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT g.id, g.name FROM tags g JOIN transaction_tags tt ON tt.tag_id=g.id
         WHERE tt.transaction_id=?1 ORDER BY g.name",
    )?;
    let rows = stmt.query_map(params![transaction_id], |r| {
        Ok(Tag {
            id: r.get(0)?,
            name: r.get(1)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Budgets
// ---------------------------------------------------------------------------

/// Creates or replaces the planned amount for a user/category/month.
pub fn set_budget(
    conn: &mut Connection,
    user_id: i64,
    category_id: i64,
    month: u32,
    year: i32,
    planned: Decimal,
) -> LedgerResult<Budget> {
    if !(1..=12).contains(&month) {
        return Err(LedgerError::InvalidMonth(month));
    }
    write_tx(conn, |tx| {
        find_user(tx, user_id)?;
        find_category(tx, category_id)?;
        tx.execute(
            "INSERT INTO budgets(user_id, category_id, month, year, planned)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(user_id, category_id, month, year) DO UPDATE SET planned=excluded.planned",
            params![user_id, category_id, month, year, planned.to_string()],
        )?;
        let id: i64 = tx.query_row(
            "SELECT id FROM budgets WHERE user_id=?1 AND category_id=?2 AND month=?3 AND year=?4",
            params![user_id, category_id, month, year],
            |r| r.get(0),
        )?;
        Ok(Budget {
            id,
            user_id,
            category_id,
            month,
            year,
            planned,
        })
    })
}

pub fn list_budgets(
    conn: &Connection,
    user_id: i64,
    month: u32,
    year: i32,
) -> LedgerResult<Vec<Budget>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, category_id, month, year, planned FROM budgets
         WHERE user_id=?1 AND month=?2 AND year=?3 ORDER BY category_id",
    )?;
    let rows = stmt.query_map(params![user_id, month, year], |r| {
        Ok(Budget {
            id: r.get(0)?,
            user_id: r.get(1)?,
            category_id: r.get(2)?,
            month: r.get(3)?,
            year: r.get(4)?,
            planned: decimal_column(r, 5)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

pub fn create_goal(
    conn: &mut Connection,
    user_id: i64,
    name: &str,
    target: Decimal,
    deadline: Option<NaiveDate>,
) -> LedgerResult<Goal> {
    write_tx(conn, |tx| {
        find_user(tx, user_id)?;
        tx.execute(
            "INSERT INTO goals(user_id, name, target, current, deadline)
             VALUES (?1, ?2, ?3, '0', ?4)",
            params![
                user_id,
                name,
                target.to_string(),
                deadline.map(|d| d.to_string())
            ],
        )?;
        Ok(Goal {
            id: tx.last_insert_rowid(),
            user_id,
            name: name.to_string(),
            target,
            current: Decimal::ZERO,
            deadline,
        })
    })
}

pub fn find_goal(conn: &Connection, id: i64) -> LedgerResult<Goal> {
    conn.query_row(
        "SELECT id, user_id, name, target, current, deadline FROM goals WHERE id=?1",
        params![id],
        goal_from_row,
    )
    .optional()?
    .ok_or_else(|| LedgerError::not_found("Goal", id))
}

/// `current += delta`, read and written under the same write lock.
pub fn add_goal_progress(
    conn: &mut Connection,
    goal_id: i64,
    delta: Decimal,
) -> LedgerResult<Goal> {
    write_tx(conn, |tx| {
        let mut goal = find_goal(tx, goal_id)?;
        goal.current = goal
            .current
            .checked_add(delta)
            .ok_or(LedgerError::AmountOverflow("goal progress"))?;
        tx.execute(
            "UPDATE goals SET current=?1 WHERE id=?2",
            params![goal.current.to_string(), goal_id],
        )?;
        Ok(goal)
    })
}

pub fn list_goals(conn: &Connection, user_id: i64) -> LedgerResult<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, target, current, deadline FROM goals
         WHERE user_id=?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![user_id], goal_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Investments
// ---------------------------------------------------------------------------

pub fn create_investment_kind(conn: &mut Connection, name: &str) -> LedgerResult<InvestmentKind> {
    write_tx(conn, |tx| insert_investment_kind_row(tx, name))
}

pub(crate) fn insert_investment_kind_row(
    conn: &Connection,
    name: &str,
) -> LedgerResult<InvestmentKind> {
    let name = name.trim();
    if find_investment_kind_by_name(conn, name)?.is_some() {
        return Err(LedgerError::duplicate_name("Investment kind", name));
    }
    conn.execute(
        "INSERT INTO investment_kinds(name) VALUES (?1)",
        params![name],
    )?;
    Ok(InvestmentKind {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

pub fn find_investment_kind_by_name(
    conn: &Connection,
    name: &str,
) -> LedgerResult<Option<InvestmentKind>> {
    Ok(conn
        .query_row(
            "SELECT id, name FROM investment_kinds WHERE name=?1",
            params![name.trim()],
            |r| {
                Ok(InvestmentKind {
                    id: r.get(0)?,
                    name: r.get(1)?,
                })
            },
        )
        .optional()?)
}

pub fn list_investment_kinds(conn: &Connection) -> LedgerResult<Vec<InvestmentKind>> {
    let mut stmt = conn.prepare("SELECT id, name FROM investment_kinds ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok(InvestmentKind {
            id: r.get(0)?,
            name: r.get(1)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn create_investment(
    conn: &mut Connection,
    account_id: i64,
    kind_id: i64,
    ticker: &str,
    quantity: Decimal,
    average_price: Decimal,
) -> LedgerResult<Investment> {
    write_tx(conn, |tx| {
        find_account(tx, account_id)?;
        let kind_exists: Option<i64> = tx
            .query_row(
                "SELECT id FROM investment_kinds WHERE id=?1",
                params![kind_id],
                |r| r.get(0),
            )
            .optional()?;
        if kind_exists.is_none() {
            return Err(LedgerError::not_found("Investment kind", kind_id));
        }
        let ticker = ticker.trim().to_uppercase();
        tx.execute(
            "INSERT INTO investments(account_id, kind_id, ticker, quantity, average_price)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                account_id,
                kind_id,
                ticker,
                quantity.to_string(),
                average_price.to_string()
            ],
        )?;
        Ok(Investment {
            id: tx.last_insert_rowid(),
            account_id,
            kind_id,
            ticker,
            quantity,
            average_price,
        })
    })
}

pub fn list_investments(conn: &Connection, user_id: i64) -> LedgerResult<Vec<Investment>> {
    let mut stmt = conn.prepare(
        "SELECT i.id, i.account_id, i.kind_id, i.ticker, i.quantity, i.average_price
         FROM investments i JOIN accounts a ON i.account_id=a.id
         WHERE a.user_id=?1 ORDER BY i.ticker",
    )?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok(Investment {
            id: r.get(0)?,
            account_id: r.get(1)?,
            kind_id: r.get(2)?,
            ticker: r.get(3)?,
            quantity: decimal_column(r, 4)?,
            average_price: decimal_column(r, 5)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

pub fn get_setting(conn: &Connection, key: &str) -> LedgerResult<Option<String>> {
    Ok(conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> LedgerResult<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}
