// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn window_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .help("First day, YYYY-MM-DD (default: 30 days before --to)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .help("Last day, YYYY-MM-DD (default: today)"),
    )
}

fn fields_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("amount")
            .long("amount")
            .required(true)
            .allow_hyphen_values(true),
    )
    .arg(Arg::new("category").long("category").required(true))
    .arg(Arg::new("description").long("description"))
    .arg(
        Arg::new("date")
            .long("date")
            .help("YYYY-MM-DD (default: today)"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

pub fn build_cli() -> Command {
    Command::new("expense-tracker")
        .version(clap::crate_version!())
        .about("Record expenses and summarize them by category and by day")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env(crate::db::DB_ENV)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("SQLite database file (default: platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the database and default categories"))
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(Command::new("list").about("List categories")),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(fields_args(Command::new("add").about("Record an expense")))
                .subcommand(fields_args(
                    Command::new("edit")
                        .about("Replace every field of an expense")
                        .arg(id_arg()),
                ))
                .subcommand(Command::new("rm").about("Delete an expense").arg(id_arg()))
                .subcommand(json_args(
                    Command::new("show").about("Show one expense").arg(id_arg()),
                ))
                .subcommand(json_args(
                    Command::new("list").about("List expenses with running total").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries")
                .subcommand(json_args(
                    Command::new("categories").about("Totals per category"),
                ))
                .subcommand(json_args(window_args(
                    Command::new("daily").about("Totals per day"),
                )))
                .subcommand(json_args(window_args(
                    Command::new("period").about("Expenses, total and breakdown for a window"),
                ))),
        )
}
