// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::{arg, id};
use crate::utils::pretty_table;
use crate::{engine, store};

/// `adduser <name> <email> <password>`
pub fn add(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let name = arg(m, "name")?;
    let email = arg(m, "email")?;
    let password = arg(m, "password")?;
    let user = engine::register_user(conn, name, email, password)
        .with_context(|| format!("Could not create user '{}'", email))?;
    println!("Created user '{}' (id {})", user.name, user.id);
    Ok(())
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => {
            let data = store::list_users(conn)?
                .into_iter()
                .map(|u| vec![u.id.to_string(), u.name, u.email, u.created_at])
                .collect();
            println!("{}", pretty_table(&["Id", "Name", "Email", "Created"], data));
        }
        Some(("email", sub)) => {
            let user_id = id(sub, "user_id")?;
            let user = engine::change_email(conn, user_id, arg(sub, "email")?)?;
            println!("User {} email is now {}", user.id, user.email);
        }
        Some(("history", sub)) => {
            let data = store::email_changes(conn, id(sub, "user_id")?)?
                .into_iter()
                .map(|c| vec![c.changed_at, c.old_email, c.new_email])
                .collect();
            println!("{}", pretty_table(&["Changed", "Old", "New"], data));
        }
        Some(("login", sub)) => {
            let email = arg(sub, "email")?;
            if engine::authenticate(conn, email, arg(sub, "password")?)? {
                println!("Credentials valid for {}", email);
            } else {
                anyhow::bail!("Invalid email or password");
            }
        }
        _ => {}
    }
    Ok(())
}
