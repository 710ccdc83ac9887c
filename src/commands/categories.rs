// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::arg;
use crate::models::CategoryKind;
use crate::store;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = arg(sub, "name")?;
            let kind = arg(sub, "kind")?.parse::<CategoryKind>()?;
            let category = store::create_category(conn, name, kind)?;
            println!(
                "Added category '{}' ({}, id {})",
                category.name, category.kind, category.id
            );
        }
        Some(("list", sub)) => {
            let categories = store::list_categories(conn)?;
            if !maybe_print_json(sub.get_flag("json"), &categories)? {
                let data = categories
                    .into_iter()
                    .map(|c| vec![c.id.to_string(), c.name, c.kind.to_string()])
                    .collect();
                println!("{}", pretty_table(&["Id", "Category", "Kind"], data));
            }
        }
        _ => {}
    }
    Ok(())
}
