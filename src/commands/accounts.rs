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

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let user_id = id(sub, "user")?;
            let name = arg(sub, "name")?;
            let kind = arg(sub, "kind")?;
            let initial = parse_decimal(arg(sub, "initial")?)?;
            let account = store::create_account(conn, user_id, name, kind, initial)?;
            println!(
                "Added account '{}' ({}, id {}) with initial balance {}",
                account.name,
                account.kind,
                account.id,
                fmt_money(&account.initial_balance)
            );
        }
        Some(("list", sub)) => {
            let accounts = store::list_accounts(conn, id(sub, "user")?)?;
            if !maybe_print_json(sub.get_flag("json"), &accounts)? {
                let data = accounts
                    .into_iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.name,
                            a.kind,
                            fmt_money(&a.initial_balance),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Name", "Kind", "Initial balance"], data)
                );
            }
        }
        Some(("rm", sub)) => {
            let account_id = id(sub, "account_id")?;
            let archived = engine::delete_account(conn, account_id, sub.get_flag("cascade"))?;
            println!(
                "Removed account '{}' (archived as #{})",
                archived.name, archived.archive_id
            );
        }
        Some(("archive", sub)) => {
            let data = store::archived_accounts(conn, id(sub, "user")?)?
                .into_iter()
                .map(|a| {
                    vec![
                        a.account_id.to_string(),
                        a.name,
                        a.kind,
                        fmt_money(&a.initial_balance),
                        a.deleted_at,
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Account", "Name", "Kind", "Initial", "Deleted"], data)
            );
        }
        _ => {}
    }
    Ok(())
}
