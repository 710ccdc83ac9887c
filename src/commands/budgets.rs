// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::{arg, id};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use crate::{engine, store};

fn period(m: &clap::ArgMatches) -> Result<(i64, u32, i32)> {
    let user_id = id(m, "user")?;
    let month = m.get_one::<u32>("month").copied().unwrap_or_default();
    let year = m.get_one::<i32>("year").copied().unwrap_or_default();
    Ok((user_id, month, year))
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let (user_id, month, year) = period(sub)?;
            let category_id = id(sub, "category")?;
            let amount = parse_decimal(arg(sub, "amount")?)?;
            let budget = store::set_budget(conn, user_id, category_id, month, year, amount)?;
            println!(
                "Budget for category {} in {:02}/{} set to {}",
                budget.category_id,
                budget.month,
                budget.year,
                fmt_money(&budget.planned)
            );
        }
        Some(("report", sub)) => {
            let (user_id, month, year) = period(sub)?;
            let lines = engine::budget_report(conn, user_id, month, year)?;
            if !maybe_print_json(sub.get_flag("json"), &lines)? {
                let data = lines
                    .into_iter()
                    .map(|l| {
                        vec![
                            l.category,
                            fmt_money(&l.planned),
                            fmt_money(&l.spent),
                            fmt_money(&l.remaining),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Category", "Planned", "Spent", "Remaining"], data)
                );
            }
        }
        _ => {}
    }
    Ok(())
}
