// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::{arg, id};
use crate::{store, LedgerError};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("kind", sub)) => {
            let kind = store::create_investment_kind(conn, arg(sub, "name")?)?;
            println!("Added investment kind '{}' (id {})", kind.name, kind.id);
        }
        Some(("kinds", _)) => {
            let data = store::list_investment_kinds(conn)?
                .into_iter()
                .map(|k| vec![k.id.to_string(), k.name])
                .collect();
            println!("{}", pretty_table(&["Id", "Kind"], data));
        }
        Some(("add", sub)) => {
            let kind_name = arg(sub, "kind")?;
            let kind = store::find_investment_kind_by_name(conn, kind_name)?
                .with_context(|| format!("Investment kind '{}' not found", kind_name))?;
            let quantity = parse_decimal(arg(sub, "quantity")?)?;
            let price = parse_decimal(arg(sub, "price")?)?;
            let inv = store::create_investment(
                conn,
                id(sub, "account")?,
                kind.id,
                arg(sub, "ticker")?,
                quantity,
                price,
            )?;
            println!(
                "Added {} x {} at {} (id {})",
                inv.quantity,
                inv.ticker,
                fmt_money(&inv.average_price),
                inv.id
            );
        }
        Some(("list", sub)) => {
            let positions = store::list_investments(conn, id(sub, "user")?)?;
            if !maybe_print_json(sub.get_flag("json"), &positions)? {
                let mut data = Vec::with_capacity(positions.len());
                for p in positions {
                    let cost = p
                        .quantity
                        .checked_mul(p.average_price)
                        .ok_or(LedgerError::AmountOverflow("position cost"))?;
                    data.push(vec![
                        p.ticker,
                        p.account_id.to_string(),
                        p.quantity.to_string(),
                        fmt_money(&p.average_price),
                        fmt_money(&cost),
                    ]);
                }
                println!(
                    "{}",
                    pretty_table(&["Ticker", "Account", "Quantity", "Avg price", "Cost"], data)
                );
            }
        }
        _ => {}
    }
    Ok(())
}
