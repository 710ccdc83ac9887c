// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction engine: date resolution, sign normalization, balances, and the
//! multi-write operations (archival, email audit, transfers) that must commit
//! or roll back as one unit.

use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::credentials::{hash_password, verify_password};
use crate::db::write_tx;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{ArchivedAccount, CategoryKind, Goal, Transaction, User};
use crate::store;
use crate::utils::{now_timestamp, parse_date};

pub const TRANSFER_OUT_KEY: &str = "transfer.out_category";
pub const TRANSFER_IN_KEY: &str = "transfer.in_category";
pub const DEFAULT_TRANSFER_OUT: &str = "Transfer Out";
pub const DEFAULT_TRANSFER_IN: &str = "Transfer In";

pub fn normalize_amount(kind: CategoryKind, amount: Decimal) -> Decimal {
    kind.normalize(amount)
}

/// Today's local date when `raw` is `None`, otherwise a strict `YYYY-MM-DD`.
pub fn resolve_date(raw: Option<&str>) -> LedgerResult<NaiveDate> {
    match raw {
        None => Ok(Local::now().date_naive()),
        Some(s) => parse_date(s),
    }
}

/// Records a transaction. The date is resolved before the write transaction
/// is opened, so a malformed date never touches the store.
pub fn add_transaction(
    conn: &mut Connection,
    account_id: i64,
    category_id: i64,
    amount: Decimal,
    description: &str,
    date: Option<&str>,
) -> LedgerResult<Transaction> {
    let date = resolve_date(date)?;
    store::insert_transaction(conn, account_id, category_id, amount, description, date)
}

/// Total balance of a user: initial balances plus every stored transaction
/// amount. Read-only; zero for a user without accounts.
pub fn balance(conn: &Connection, user_id: i64) -> LedgerResult<Decimal> {
    let initial = store::sum_initial_balances(conn, user_id)?;
    let movements = store::sum_transactions(conn, user_id)?;
    initial
        .checked_add(movements)
        .ok_or(LedgerError::AmountOverflow("balance"))
}

pub fn register_user(
    conn: &mut Connection,
    name: &str,
    email: &str,
    password: &str,
) -> LedgerResult<User> {
    // Fail on a taken email before paying for the hash.
    if store::find_user_by_email(conn, email)?.is_some() {
        return Err(LedgerError::DuplicateEmail(email.trim().to_string()));
    }
    let hash = hash_password(password)?;
    store::create_user(conn, name, email, &hash)
}

pub fn authenticate(conn: &Connection, email: &str, password: &str) -> LedgerResult<bool> {
    Ok(match store::find_user_by_email(conn, email)? {
        Some(user) => verify_password(password, &user.password_hash),
        None => false,
    })
}

/// Changes a user's email and appends the old/new pair to the audit log in
/// the same transaction. Setting the current email again writes nothing.
pub fn change_email(conn: &mut Connection, user_id: i64, new_email: &str) -> LedgerResult<User> {
    let new_email = new_email.trim();
    write_tx(conn, |tx| {
        let mut user = store::find_user(tx, user_id)?;
        if user.email == new_email {
            return Ok(user);
        }
        if let Some(other) = store::find_user_by_email(tx, new_email)? {
            if other.id != user_id {
                return Err(LedgerError::DuplicateEmail(new_email.to_string()));
            }
        }
        store::log_email_change_row(tx, user_id, &user.email, new_email)?;
        store::update_email_row(tx, user_id, new_email)?;
        tracing::info!(user_id, "email changed");
        user.email = new_email.to_string();
        Ok(user)
    })
}

/// Archives and deletes an account. Without `cascade` an account that still
/// has transactions or investments is refused; with it they are removed in
/// the same transaction.
pub fn delete_account(
    conn: &mut Connection,
    account_id: i64,
    cascade: bool,
) -> LedgerResult<ArchivedAccount> {
    write_tx(conn, |tx| {
        let account = store::find_account(tx, account_id)?;
        let (transactions, investments) = store::account_dependents(tx, account_id)?;
        if transactions + investments > 0 {
            if !cascade {
                return Err(LedgerError::AccountInUse {
                    account_id,
                    transactions,
                    investments,
                });
            }
            store::delete_account_dependents(tx, account_id)?;
        }
        let deleted_at = now_timestamp();
        let archive_id = store::archive_account_row(tx, &account, &deleted_at)?;
        store::delete_account_row(tx, account_id)?;
        tracing::info!(account_id, archive_id, cascade, "account archived and deleted");
        Ok(ArchivedAccount {
            archive_id,
            account_id: account.id,
            user_id: account.user_id,
            name: account.name,
            kind: account.kind,
            initial_balance: account.initial_balance,
            deleted_at,
        })
    })
}

fn transfer_category(
    conn: &Connection,
    key: &str,
    default: &str,
    expected: CategoryKind,
) -> LedgerResult<i64> {
    let name = store::get_setting(conn, key)?.unwrap_or_else(|| default.to_string());
    let category = store::find_category_by_name(conn, &name)?.ok_or_else(|| {
        LedgerError::Config(format!(
            "transfer category '{}' does not exist (setting '{}')",
            name, key
        ))
    })?;
    if category.kind != expected {
        return Err(LedgerError::Config(format!(
            "transfer category '{}' is {}, expected {} (setting '{}')",
            name, category.kind, expected, key
        )));
    }
    Ok(category.id)
}

#[derive(Debug, Clone, Serialize)]
pub struct Transfer {
    pub outgoing: Transaction,
    pub incoming: Transaction,
}

/// Moves `|amount|` between two accounts as an expense on the source and an
/// income on the destination, both or neither.
pub fn transfer(
    conn: &mut Connection,
    from_account: i64,
    to_account: i64,
    amount: Decimal,
    description: &str,
    date: Option<&str>,
) -> LedgerResult<Transfer> {
    if from_account == to_account {
        return Err(LedgerError::InvalidTransfer(
            "source and destination are the same account".into(),
        ));
    }
    if amount.is_zero() {
        return Err(LedgerError::InvalidTransfer("amount must be non-zero".into()));
    }
    let date = resolve_date(date)?;
    let amount = amount.abs();
    write_tx(conn, |tx| {
        let out_category = transfer_category(
            tx,
            TRANSFER_OUT_KEY,
            DEFAULT_TRANSFER_OUT,
            CategoryKind::Expense,
        )?;
        let in_category = transfer_category(
            tx,
            TRANSFER_IN_KEY,
            DEFAULT_TRANSFER_IN,
            CategoryKind::Income,
        )?;
        let from = store::find_account(tx, from_account)?;
        let to = store::find_account(tx, to_account)?;
        let outgoing = store::insert_transaction_row(
            tx,
            from.id,
            out_category,
            -amount,
            &format!("Transfer to {}: {}", to.name, description),
            date,
        )?;
        let incoming = store::insert_transaction_row(
            tx,
            to.id,
            in_category,
            amount,
            &format!("Transfer from {}: {}", from.name, description),
            date,
        )?;
        Ok(Transfer { outgoing, incoming })
    })
}

/// Amount spent (as a positive number) by a user on an expense category in
/// one month. Income categories spend nothing.
pub fn category_spending(
    conn: &Connection,
    user_id: i64,
    category_id: i64,
    month: u32,
    year: i32,
) -> LedgerResult<Decimal> {
    if !(1..=12).contains(&month) {
        return Err(LedgerError::InvalidMonth(month));
    }
    let category = store::find_category(conn, category_id)?;
    if category.kind != CategoryKind::Expense {
        return Ok(Decimal::ZERO);
    }
    let total = store::category_amounts(conn, user_id, category_id, month, year)?
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or(LedgerError::AmountOverflow("category spending"))?;
    // expense rows are stored non-positive
    Ok(total.abs())
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetLine {
    pub category: String,
    pub planned: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

pub fn budget_report(
    conn: &Connection,
    user_id: i64,
    month: u32,
    year: i32,
) -> LedgerResult<Vec<BudgetLine>> {
    let mut lines = Vec::new();
    for budget in store::list_budgets(conn, user_id, month, year)? {
        let category = store::find_category(conn, budget.category_id)?;
        let spent = category_spending(conn, user_id, category.id, month, year)?;
        let remaining = budget
            .planned
            .checked_sub(spent)
            .ok_or(LedgerError::AmountOverflow("budget remaining"))?;
        lines.push(BudgetLine {
            category: category.name,
            planned: budget.planned,
            spent,
            remaining,
        });
    }
    Ok(lines)
}

pub fn contribute_to_goal(
    conn: &mut Connection,
    goal_id: i64,
    amount: Decimal,
) -> LedgerResult<Goal> {
    let goal = store::add_goal_progress(conn, goal_id, amount)?;
    tracing::info!(goal_id, current = %goal.current, "goal progress updated");
    Ok(goal)
}
