// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use super::id;
use crate::engine;
use crate::utils::{fmt_money, maybe_print_json};

#[derive(Serialize)]
struct BalanceOut {
    user_id: i64,
    balance: rust_decimal::Decimal,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let user_id = id(m, "user_id")?;
    let balance = engine::balance(conn, user_id)?;
    let out = BalanceOut { user_id, balance };
    if !maybe_print_json(m.get_flag("json"), &out)? {
        println!("Balance for user {}: {}", user_id, fmt_money(&balance));
    }
    Ok(())
}
