// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::models::MonthlyGoal;
use crate::period::{Period, month_key};
use crate::report;
use crate::store;
use crate::utils::{self, fmt_amount, maybe_print_json, parse_amount, parse_month, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// One goal per account; setting a new one replaces the old, no history.
fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut account = store::require_login(conn)?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => month_key(utils::today()),
    };
    account.set_goal(MonthlyGoal {
        month: month.clone(),
        amount,
    });
    store::save_account(conn, &account)?;
    println!("Goal set: {} for {}", fmt_amount(&amount), month);
    Ok(())
}

#[derive(Serialize)]
struct GoalStatus {
    month: String,
    goal: String,
    spent: String,
    percent: i64,
    band: report::GoalBand,
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let account = store::require_login(conn)?;
    let today = utils::today();
    let range = Period::ThisMonth.window(today);
    let in_scope = report::filter_by_range(&account.transactions, &range);
    let spent = report::totals(&in_scope).expense;
    let (percent, band) = report::goal_utilization(spent, account.goal.amount);
    let status = GoalStatus {
        month: account.goal.month.clone(),
        goal: fmt_amount(&account.goal.amount),
        spent: fmt_amount(&spent),
        percent,
        band,
    };
    if !maybe_print_json(json_flag, jsonl_flag, &status)? {
        println!(
            "{}",
            pretty_table(
                &["Month", "Goal", "Spent", "Used", "Status"],
                vec![vec![
                    status.month,
                    status.goal,
                    status.spent,
                    format!("{}%", status.percent),
                    band.as_str().to_string(),
                ]],
            )
        );
    }
    Ok(())
}
