// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::{arg, id};
use crate::utils::{fmt_money, parse_date, parse_decimal, pretty_table};
use crate::{engine, store};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let user_id = id(sub, "user")?;
            let target = parse_decimal(arg(sub, "target")?)?;
            let deadline = sub
                .get_one::<String>("deadline")
                .map(|d| parse_date(d))
                .transpose()?;
            let goal = store::create_goal(conn, user_id, arg(sub, "name")?, target, deadline)?;
            println!("Added goal '{}' (id {})", goal.name, goal.id);
        }
        Some(("contribute", sub)) => {
            let amount = parse_decimal(arg(sub, "amount")?)?;
            let goal = engine::contribute_to_goal(conn, id(sub, "goal_id")?, amount)?;
            println!(
                "Goal '{}': {} of {}",
                goal.name,
                fmt_money(&goal.current),
                fmt_money(&goal.target)
            );
        }
        Some(("list", sub)) => {
            let data = store::list_goals(conn, id(sub, "user")?)?
                .into_iter()
                .map(|g| {
                    vec![
                        g.id.to_string(),
                        g.name,
                        fmt_money(&g.current),
                        fmt_money(&g.target),
                        g.deadline.map(|d| d.to_string()).unwrap_or_default(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Id", "Goal", "Current", "Target", "Deadline"], data)
            );
        }
        _ => {}
    }
    Ok(())
}
