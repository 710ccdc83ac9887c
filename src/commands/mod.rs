// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::ArgMatches;

pub mod accounts;
pub mod balance;
pub mod budgets;
pub mod categories;
pub mod config;
pub mod goals;
pub mod init;
pub mod investments;
pub mod transactions;
pub mod users;

pub(crate) fn arg<'a>(m: &'a ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.as_str())
        .with_context(|| format!("missing argument '{}'", name))
}

pub(crate) fn id(m: &ArgMatches, name: &str) -> Result<i64> {
    m.get_one::<i64>(name)
        .copied()
        .with_context(|| format!("missing argument '{}'", name))
}
