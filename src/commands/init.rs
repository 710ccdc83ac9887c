// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::seed;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let demo = m.get_flag("demo");
    let report = seed::seed(conn, demo)?;
    if report.categories > 0 {
        println!("Seeded {} categories", report.categories);
    } else {
        println!("Categories already present, skipping");
    }
    if report.investment_kinds > 0 {
        println!("Seeded {} investment kinds", report.investment_kinds);
    }
    match report.demo_user {
        Some(id) => println!(
            "Demo user {} created (login: {} / {})",
            id,
            seed::DEMO_EMAIL,
            seed::DEMO_PASSWORD
        ),
        None if demo => println!("Users already present, skipping demo data"),
        None => {}
    }
    println!("Database ready");
    Ok(())
}
