// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::credentials::hash_password;
use crate::db::write_tx;
use crate::engine::{DEFAULT_TRANSFER_IN, DEFAULT_TRANSFER_OUT, TRANSFER_IN_KEY, TRANSFER_OUT_KEY};
use crate::error::LedgerResult;
use crate::models::CategoryKind;
use crate::store;
use crate::utils::parse_date;

const DEFAULT_CATEGORIES: &[(&str, CategoryKind)] = &[
    ("Food", CategoryKind::Expense),
    ("Transport", CategoryKind::Expense),
    ("Housing", CategoryKind::Expense),
    ("Leisure", CategoryKind::Expense),
    ("Health", CategoryKind::Expense),
    (DEFAULT_TRANSFER_OUT, CategoryKind::Expense),
    ("Salary", CategoryKind::Income),
    ("Freelance", CategoryKind::Income),
    ("Investments", CategoryKind::Income),
    (DEFAULT_TRANSFER_IN, CategoryKind::Income),
];

const DEFAULT_INVESTMENT_KINDS: &[&str] = &["Stock", "REIT", "Bond", "Fund"];

pub const DEMO_EMAIL: &str = "demo@ledgerline.local";
pub const DEMO_PASSWORD: &str = "demo1234";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub investment_kinds: usize,
    pub demo_user: Option<i64>,
}

/// Seeds default categories, investment kinds and transfer settings, each
/// only when its table is still empty. With `demo`, also creates a demo user
/// with one wallet account and one expense when there are no users yet.
pub fn seed(conn: &mut Connection, demo: bool) -> LedgerResult<SeedReport> {
    let demo_hash = if demo && store::count_users(conn)? == 0 {
        Some(hash_password(DEMO_PASSWORD)?)
    } else {
        None
    };

    write_tx(conn, |tx| {
        let mut report = SeedReport::default();

        if store::count_categories(tx)? == 0 {
            for (name, kind) in DEFAULT_CATEGORIES {
                store::insert_category_row(tx, name, *kind)?;
                report.categories += 1;
            }
        }

        if store::list_investment_kinds(tx)?.is_empty() {
            for name in DEFAULT_INVESTMENT_KINDS {
                store::insert_investment_kind_row(tx, name)?;
                report.investment_kinds += 1;
            }
        }

        for (key, value) in [
            (TRANSFER_OUT_KEY, DEFAULT_TRANSFER_OUT),
            (TRANSFER_IN_KEY, DEFAULT_TRANSFER_IN),
        ] {
            if store::get_setting(tx, key)?.is_none() {
                store::set_setting(tx, key, value)?;
            }
        }

        if let Some(hash) = &demo_hash {
            let user = store::insert_user_row(tx, "Demo User", DEMO_EMAIL, hash)?;
            let wallet =
                store::insert_account_row(tx, user.id, "Wallet", "checking", Decimal::new(50, 0))?;
            if let Some(food) = store::find_category_by_name(tx, "Food")? {
                let date = parse_date("2025-11-01")?;
                store::insert_transaction_row(
                    tx,
                    wallet.id,
                    food.id,
                    Decimal::new(-1550, 2),
                    "Snack",
                    date,
                )?;
            }
            report.demo_user = Some(user.id);
        }

        tracing::info!(?report, "seed complete");
        Ok(report)
    })
}
