// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error types for the ledger core.
//!
//! The store and the engine return [`LedgerResult`]; the command handlers wrap
//! these in `anyhow` with extra context.

use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("email '{0}' is already registered")]
    DuplicateEmail(String),

    /// A unique name (category, tag, investment kind) is already taken.
    #[error("{entity} '{name}' already exists")]
    DuplicateName { entity: &'static str, name: String },

    #[error("unknown user {0}")]
    UnknownUser(i64),

    #[error("unknown account {0}")]
    UnknownAccount(i64),

    #[error("unknown category {0}")]
    UnknownCategory(i64),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("invalid category kind '{0}', expected income or expense")]
    InvalidKind(String),

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("invalid month {0}, expected 1-12")]
    InvalidMonth(u32),

    #[error("invalid transfer: {0}")]
    InvalidTransfer(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Account still has transactions or investments and no cascade was asked for.
    #[error(
        "account {account_id} still has {transactions} transaction(s) and \
         {investments} investment(s); use cascade to remove them"
    )]
    AccountInUse {
        account_id: i64,
        transactions: i64,
        investments: i64,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("credential error: {0}")]
    Credential(String),

    /// A money computation left the range of `Decimal`.
    #[error("amount overflow while computing {0}")]
    AmountOverflow(&'static str),

    /// The store refused a write: a CHECK, UNIQUE, foreign key or trigger guard.
    #[error("constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] rusqlite::Error),
}

impl From<rusqlite::Error> for LedgerError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Self::ConstraintViolation(msg.unwrap_or_else(|| e.to_string()))
            }
            other => Self::StoreUnavailable(other),
        }
    }
}

impl LedgerError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn duplicate_name(entity: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            entity,
            name: name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_display() {
        let err = LedgerError::duplicate_name("Category", "Food");
        assert_eq!(err.to_string(), "Category 'Food' already exists");
    }

    #[test]
    fn not_found_display() {
        let err = LedgerError::not_found("Goal", 7);
        assert_eq!(err.to_string(), "Goal not found: 7");
        assert!(err.is_not_found());
    }

    #[test]
    fn sqlite_errors_surface_as_store_unavailable() {
        let err: LedgerError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, LedgerError::StoreUnavailable(_)));
        assert!(err.to_string().starts_with("store unavailable"));
    }

    #[test]
    fn constraint_failures_are_not_reported_as_unavailable() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t(x INTEGER UNIQUE); INSERT INTO t VALUES (1);")
            .unwrap();
        let err: LedgerError = conn
            .execute("INSERT INTO t VALUES (1)", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, LedgerError::ConstraintViolation(_)), "{err:?}");
        assert!(err.to_string().starts_with("constraint violated"));
    }

    #[test]
    fn overflow_display() {
        let err = LedgerError::AmountOverflow("balance");
        assert_eq!(err.to_string(), "amount overflow while computing balance");
    }
}
