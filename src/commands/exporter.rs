// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

use crate::models::Transaction;
use crate::period::Period;
use crate::report;
use crate::store;
use crate::utils::{self, fmt_amount};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        Some(("summary", sub)) => export_summary(conn, sub),
        _ => Ok(()),
    }
}

fn check_format(fmt: &str) -> Result<()> {
    match fmt {
        "csv" | "json" => Ok(()),
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    check_format(&fmt)?;
    let account = store::require_login(conn)?;

    let mut txs: Vec<&Transaction> = account.transactions.iter().collect();
    txs.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    let category_name = |t: &Transaction| {
        account
            .category(&t.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| report::FALLBACK_CATEGORY_NAME.to_string())
    };

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "type", "category", "description", "amount", "card"])?;
            for t in txs {
                wtr.write_record([
                    t.date.to_string(),
                    t.kind.as_str().to_string(),
                    category_name(t),
                    t.description.clone(),
                    fmt_amount(&t.amount),
                    t.card_id.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<serde_json::Value> = txs
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date.to_string(),
                        "type": t.kind.as_str(),
                        "category": category_name(t),
                        "description": t.description,
                        "amount": fmt_amount(&t.amount),
                        "card": t.card_id,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    println!("Exported {} transactions to {}", account.transactions.len(), out);
    Ok(())
}

/// One row per reporting period: the figures a spreadsheet summary sheet
/// would carry.
fn export_summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    check_format(&fmt)?;
    let account = store::require_login(conn)?;
    let today = utils::today();

    let rows: Vec<(String, report::Totals)> =
        [Period::ThisMonth, Period::LastMonth, Period::Last3Months]
            .into_iter()
            .map(|p| {
                let range = p.window(today);
                let t = report::totals(&report::filter_by_range(&account.transactions, &range));
                (p.as_str().to_string(), t)
            })
            .collect();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["period", "income", "expense", "balance"])?;
            for (period, t) in rows {
                wtr.write_record([
                    period,
                    fmt_amount(&t.income),
                    fmt_amount(&t.expense),
                    fmt_amount(&t.balance()),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<serde_json::Value> = rows
                .iter()
                .map(|(period, t)| {
                    json!({
                        "period": period,
                        "income": fmt_amount(&t.income),
                        "expense": fmt_amount(&t.expense),
                        "balance": fmt_amount(&t.balance()),
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    println!("Exported summary to {}", out);
    Ok(())
}
