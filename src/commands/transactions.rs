// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::{arg, id};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use crate::{engine, store};

/// `addtransaction <account_id> <category_id> <amount> <description> [--date]`
pub fn add(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let account_id = id(m, "account_id")?;
    let category_id = id(m, "category_id")?;
    let amount = parse_decimal(arg(m, "amount")?)?;
    let description = arg(m, "description")?;
    let date = m.get_one::<String>("date").map(|s| s.as_str());

    let t = engine::add_transaction(conn, account_id, category_id, amount, description, date)
        .with_context(|| format!("Could not record transaction on account {}", account_id))?;
    println!(
        "Recorded {} on {} ('{}', id {})",
        fmt_money(&t.amount),
        t.date,
        t.description,
        t.id
    );
    Ok(())
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("transfer", sub)) => transfer(conn, sub)?,
        Some(("tag", sub)) => {
            let transaction_id = id(sub, "transaction_id")?;
            let tag = store::tag_transaction(conn, transaction_id, arg(sub, "tag")?)?;
            println!("Tagged transaction {} with '{}'", transaction_id, tag.name);
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let lines = store::account_transactions(conn, id(sub, "account")?)?;
    if !maybe_print_json(sub.get_flag("json"), &lines)? {
        let mut data = Vec::with_capacity(lines.len());
        for l in lines {
            let tags = store::transaction_tags(conn, l.id)?
                .into_iter()
                .map(|t| t.name)
                .collect::<Vec<_>>()
                .join(", ");
            data.push(vec![
                l.id.to_string(),
                l.date.to_string(),
                l.description,
                fmt_money(&l.amount),
                l.category,
                tags,
            ]);
        }
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Amount", "Category", "Tags"],
                data
            )
        );
    }
    Ok(())
}

fn transfer(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let from = id(sub, "from")?;
    let to = id(sub, "to")?;
    let amount = parse_decimal(arg(sub, "amount")?)?;
    let description = arg(sub, "description")?;
    let date = sub.get_one::<String>("date").map(|s| s.as_str());
    let t = engine::transfer(conn, from, to, amount, description, date)?;
    println!(
        "Transferred {} from account {} to account {} on {}",
        fmt_money(&t.incoming.amount),
        from,
        to,
        t.incoming.date
    );
    Ok(())
}
