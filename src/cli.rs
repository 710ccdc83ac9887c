// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

fn id_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .value_parser(value_parser!(i64))
}

fn id_flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .required(true)
        .value_parser(value_parser!(i64))
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print JSON instead of a table")
        .action(ArgAction::SetTrue)
}

fn date_flag() -> Arg {
    Arg::new("date")
        .short('d')
        .long("date")
        .help("Date as YYYY-MM-DD (defaults to today)")
}

fn period_args(cmd: Command) -> Command {
    cmd.arg(id_flag("user", "User id"))
        .arg(
            Arg::new("month")
                .long("month")
                .required(true)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("year")
                .long("year")
                .required(true)
                .value_parser(value_parser!(i32)),
        )
}

pub fn build_cli() -> Command {
    Command::new("ledgerline")
        .about("Personal finance ledger")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("LEDGERLINE_DB")
                .help("Path to the SQLite database")
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand(
            Command::new("initdb")
                .about("Create tables and seed default categories")
                .arg(
                    Arg::new("demo")
                        .long("demo")
                        .help("Also create a demo user with sample data")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("adduser")
                .about("Register a new user")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("email").required(true))
                .arg(Arg::new("password").required(true)),
        )
        .subcommand(
            Command::new("addtransaction")
                .about("Record an income or expense")
                .allow_negative_numbers(true)
                .arg(id_arg("account_id", "Account id"))
                .arg(id_arg("category_id", "Category id"))
                .arg(Arg::new("amount").required(true))
                .arg(Arg::new("description").required(true))
                .arg(date_flag()),
        )
        .subcommand(
            Command::new("getbalance")
                .about("Total balance of a user")
                .arg(id_arg("user_id", "User id"))
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("user")
                .about("Users")
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("email")
                        .about("Change a user's email (audited)")
                        .arg(id_arg("user_id", "User id"))
                        .arg(Arg::new("email").required(true)),
                )
                .subcommand(
                    Command::new("history")
                        .about("Email change log of a user")
                        .arg(id_arg("user_id", "User id")),
                )
                .subcommand(
                    Command::new("login")
                        .about("Check a user's credentials")
                        .arg(Arg::new("email").required(true))
                        .arg(Arg::new("password").required(true)),
                ),
        )
        .subcommand(
            Command::new("account")
                .about("Accounts")
                .subcommand(
                    Command::new("add")
                        .allow_negative_numbers(true)
                        .arg(id_flag("user", "Owning user id"))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("kind").long("kind").default_value("checking"))
                        .arg(Arg::new("initial").long("initial").default_value("0")),
                )
                .subcommand(
                    Command::new("list")
                        .arg(id_flag("user", "Owning user id"))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Archive and delete an account")
                        .arg(id_arg("account_id", "Account id"))
                        .arg(
                            Arg::new("cascade")
                                .long("cascade")
                                .help("Also delete its transactions and investments")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("archive")
                        .about("Deleted accounts of a user")
                        .arg(id_flag("user", "Owning user id")),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("kind").required(true).help("income or expense")),
                )
                .subcommand(Command::new("list").arg(json_flag())),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("list")
                        .arg(id_flag("account", "Account id"))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("transfer")
                        .about("Move money between two accounts")
                        .arg(id_flag("from", "Source account id"))
                        .arg(id_flag("to", "Destination account id"))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_negative_numbers(true),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .default_value("transfer"),
                        )
                        .arg(date_flag()),
                )
                .subcommand(
                    Command::new("tag")
                        .arg(id_arg("transaction_id", "Transaction id"))
                        .arg(Arg::new("tag").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budgets")
                .subcommand(
                    period_args(Command::new("set"))
                        .arg(id_flag("category", "Category id"))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(period_args(Command::new("report")).arg(json_flag())),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(id_flag("user", "Owning user id"))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("deadline").long("deadline")),
                )
                .subcommand(
                    Command::new("contribute")
                        .allow_negative_numbers(true)
                        .arg(id_arg("goal_id", "Goal id"))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(Command::new("list").arg(id_flag("user", "Owning user id"))),
        )
        .subcommand(
            Command::new("invest")
                .about("Investment positions")
                .subcommand(Command::new("kind").arg(Arg::new("name").required(true)))
                .subcommand(Command::new("kinds"))
                .subcommand(
                    Command::new("add")
                        .arg(id_flag("account", "Account id"))
                        .arg(Arg::new("kind").long("kind").required(true))
                        .arg(Arg::new("ticker").long("ticker").required(true))
                        .arg(Arg::new("quantity").long("quantity").required(true))
                        .arg(Arg::new("price").long("price").required(true)),
                )
                .subcommand(
                    Command::new("list")
                        .arg(id_flag("user", "Owning user id"))
                        .arg(json_flag()),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Runtime settings")
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
}
