// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
        }
    }

    /// Forces the sign of `amount` to agree with this kind: expenses are
    /// stored non-positive, income non-negative.
    pub fn normalize(self, amount: Decimal) -> Decimal {
        match self {
            CategoryKind::Expense if amount > Decimal::ZERO => -amount,
            CategoryKind::Income if amount < Decimal::ZERO => -amount,
            _ => amount,
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            _ => Err(LedgerError::InvalidKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub kind: String,
    pub initial_balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub kind: CategoryKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub month: u32,
    pub year: i32,
    pub planned: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentKind {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: i64,
    pub account_id: i64,
    pub kind_id: i64,
    pub ticker: String,
    pub quantity: Decimal,
    pub average_price: Decimal,
}

/// Snapshot of an account taken right before it is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedAccount {
    pub archive_id: i64,
    pub account_id: i64,
    pub user_id: i64,
    pub name: String,
    pub kind: String,
    pub initial_balance: Decimal,
    pub deleted_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailChange {
    pub id: i64,
    pub user_id: i64,
    pub old_email: String,
    pub new_email: String,
    pub changed_at: String,
}

/// A transaction row joined with its category name, as shown in statements.
#[derive(Debug, Clone, Serialize)]
pub struct StatementLine {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn expense_amounts_become_non_positive() {
        assert_eq!(CategoryKind::Expense.normalize(dec!(15.50)), dec!(-15.50));
        assert_eq!(CategoryKind::Expense.normalize(dec!(-15.50)), dec!(-15.50));
        assert_eq!(CategoryKind::Expense.normalize(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn income_amounts_become_non_negative() {
        assert_eq!(CategoryKind::Income.normalize(dec!(-3000)), dec!(3000));
        assert_eq!(CategoryKind::Income.normalize(dec!(3000)), dec!(3000));
    }

    #[test]
    fn kind_parsing_is_case_insensitive() {
        assert_eq!("Expense".parse::<CategoryKind>().unwrap(), CategoryKind::Expense);
        assert_eq!(" INCOME ".parse::<CategoryKind>().unwrap(), CategoryKind::Income);
        let err = "transfer".parse::<CategoryKind>().unwrap_err();
        assert!(matches!(err, LedgerError::InvalidKind(k) if k == "transfer"));
    }
}
