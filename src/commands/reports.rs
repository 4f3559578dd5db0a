// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::period::Period;
use crate::report;
use crate::store;
use crate::utils::{self, fmt_amount, maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("by-category", sub)) => by_category(conn, sub)?,
        Some(("timeline", sub)) => timeline(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn period_of(sub: &clap::ArgMatches) -> Result<Period> {
    Period::parse(sub.get_one::<String>("period").unwrap())
}

#[derive(Serialize)]
pub struct Summary {
    pub period: String,
    pub start: String,
    pub end: String,
    pub income: String,
    pub expense: String,
    pub balance: String,
    pub income_change_pct: i64,
    pub expense_change_pct: i64,
    pub savings_rate_pct: i64,
}

/// Totals for the window plus percent deltas against the immediately
/// preceding window of equal length.
pub fn build_summary(
    account: &crate::models::UserAccount,
    period: Period,
    today: chrono::NaiveDate,
) -> Summary {
    let range = period.window(today);
    let current = report::totals(&report::filter_by_range(&account.transactions, &range));
    let prev_range = period.previous_window(today);
    let previous = report::totals(&report::filter_by_range(&account.transactions, &prev_range));
    Summary {
        period: period.as_str().to_string(),
        start: range.start.to_string(),
        end: range.end.to_string(),
        income: fmt_amount(&current.income),
        expense: fmt_amount(&current.expense),
        balance: fmt_amount(&current.balance()),
        income_change_pct: report::pct_change(current.income, previous.income),
        expense_change_pct: report::pct_change(current.expense, previous.expense),
        savings_rate_pct: report::savings_rate(&current),
    }
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let account = store::require_login(conn)?;
    let s = build_summary(&account, period_of(sub)?, utils::today());
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let rows = vec![
            vec!["Window".to_string(), format!("{} .. {}", s.start, s.end)],
            vec!["Income".to_string(), format!("{} ({:+}%)", s.income, s.income_change_pct)],
            vec!["Expense".to_string(), format!("{} ({:+}%)", s.expense, s.expense_change_pct)],
            vec!["Balance".to_string(), s.balance.clone()],
            vec!["Savings rate".to_string(), format!("{}%", s.savings_rate_pct)],
        ];
        println!("{}", pretty_table(&[s.period.as_str(), "Value"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct CategoryShare {
    category_id: String,
    name: String,
    color: String,
    amount: String,
    share_pct: i64,
}

fn by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let account = store::require_login(conn)?;
    let range = period_of(sub)?.window(utils::today());
    let in_scope = report::filter_by_range(&account.transactions, &range);
    let total = report::totals(&in_scope).expense;
    let data: Vec<CategoryShare> = report::expenses_by_category(&in_scope, &account.categories)
        .into_iter()
        .map(|s| CategoryShare {
            share_pct: report::percent_of(s.amount, total),
            category_id: s.category_id,
            name: s.name,
            color: s.color,
            amount: fmt_amount(&s.amount),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|s| vec![s.name, s.color, s.amount, format!("{}%", s.share_pct)])
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Color", "Spent", "Share"], rows)
        );
    }
    Ok(())
}

fn timeline(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let account = store::require_login(conn)?;
    let today = utils::today();
    let range = period_of(sub)?.window(today);
    let in_scope = report::filter_by_range(&account.transactions, &range);
    let series = report::running_series(&in_scope, &range, today);
    if !maybe_print_json(json_flag, jsonl_flag, &series)? {
        let rows = series
            .iter()
            .map(|p| {
                vec![
                    p.label.clone(),
                    fmt_amount(&p.income),
                    fmt_amount(&p.expense),
                    fmt_amount(&p.balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Bucket", "Income", "Expense", "Balance"], rows)
        );
    }
    Ok(())
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let account = store::require_login(conn)?;
    let range = period_of(sub)?.window(utils::today());
    let in_scope = report::filter_by_range(&account.transactions, &range);
    let buckets = report::monthly_breakdown(&in_scope);
    if !maybe_print_json(json_flag, jsonl_flag, &buckets)? {
        let rows = buckets
            .iter()
            .map(|b| {
                vec![
                    b.month.clone(),
                    fmt_amount(&b.income),
                    fmt_amount(&b.expense),
                    fmt_amount(&b.net),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net"], rows)
        );
    }
    Ok(())
}
