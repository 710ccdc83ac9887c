// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::ArgMatches;

use ledgerline::{cli, commands, db, logging};

fn run(matches: &ArgMatches) -> Result<()> {
    let path = db::db_path(matches.get_one::<PathBuf>("db").map(PathBuf::as_path))?;
    // Dropped on every exit path; an open transaction rolls back on drop.
    let mut conn = db::open(&path)?;

    match matches.subcommand() {
        Some(("initdb", sub)) => {
            println!("Database at {}", path.display());
            commands::init::handle(&mut conn, sub)?
        }
        Some(("adduser", sub)) => commands::users::add(&mut conn, sub)?,
        Some(("addtransaction", sub)) => commands::transactions::add(&mut conn, sub)?,
        Some(("getbalance", sub)) => commands::balance::handle(&conn, sub)?,
        Some(("user", sub)) => commands::users::handle(&mut conn, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&mut conn, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut conn, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut conn, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut conn, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut conn, sub)?,
        Some(("invest", sub)) => commands::investments::handle(&mut conn, sub)?,
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    logging::init();
    let matches = cli::build_cli().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
