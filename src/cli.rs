// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

use crate::period::PERIOD_VALUES;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .value_parser(PERIOD_VALUES)
        .default_value("this-month")
        .help("Reporting window")
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .version(crate_version!())
        .about("Personal income/expense tracking, monthly goals, and reports")
        .subcommand(Command::new("init").about("Initialize the local store and print its path"))
        .subcommand(
            Command::new("account")
                .about("Registration, login, profile, and theme")
                .subcommand(
                    Command::new("register")
                        .about("Create an account (seeds sample data) and log in")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(
                    Command::new("login")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("logout").about("End the session; account data is kept"))
                .subcommand(json_flags(
                    Command::new("whoami").about("Show the active account"),
                ))
                .subcommand(
                    Command::new("profile")
                        .about("Update profile fields of the active account")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("avatar").long("avatar").help("Avatar blob or reference")),
                )
                .subcommand(
                    Command::new("theme").arg(
                        Arg::new("theme")
                            .required(true)
                            .value_parser(["light", "dark"]),
                    ),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage income/expense categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("icon").long("icon").required(true))
                        .arg(Arg::new("color").long("color").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("color").long("color"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        ),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true)))
                .subcommand(json_flags(Command::new("list").arg(
                    Arg::new("type").long("type").value_parser(["income", "expense"]),
                ))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_negative_numbers(true),
                        )
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("card").long("card")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .allow_negative_numbers(true),
                        )
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("card").long("card")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true)))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("period").long("period").value_parser(PERIOD_VALUES))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("card").long("card"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("card")
                .about("Manage credit cards")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("holder").long("holder").required(true))
                        .arg(
                            Arg::new("due-day")
                                .long("due-day")
                                .required(true)
                                .value_parser(value_parser!(u32).range(1..=31)),
                        )
                        .arg(Arg::new("limit").long("limit")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("holder").long("holder"))
                        .arg(
                            Arg::new("due-day")
                                .long("due-day")
                                .value_parser(value_parser!(u32).range(1..=31)),
                        )
                        .arg(Arg::new("limit").long("limit")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a card and every transaction charged to it")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("goal")
                .about("Monthly spending ceiling")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current")),
                )
                .subcommand(json_flags(
                    Command::new("show").about("Utilization against this month's spend"),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregate figures for a period")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Totals, balance, deltas vs previous period")
                        .arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("by-category")
                        .about("Expense breakdown per category")
                        .arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("timeline")
                        .about("Cumulative income/expense series")
                        .arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("monthly")
                        .about("Per-month income vs expense")
                        .arg(period_arg()),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write data to CSV or JSON files")
                .subcommand(
                    Command::new("transactions")
                        .arg(Arg::new("format").long("format").required(true))
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("summary")
                        .about("Income/expense/balance per reporting period")
                        .arg(Arg::new("format").long("format").required(true))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import").about("Bulk-load data").subcommand(
                Command::new("card-transactions")
                    .about("Attach statement rows from a CSV to a card")
                    .arg(Arg::new("card").long("card").required(true))
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
}
