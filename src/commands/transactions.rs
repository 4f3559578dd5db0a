// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rusqlite::Connection;
use serde::Serialize;

use crate::models::{Transaction, TxKind, UserAccount};
use crate::period::Period;
use crate::report;
use crate::store;
use crate::utils::{self, maybe_print_json, parse_amount, parse_date, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Category and card references are validated when a transaction is
/// composed; they may still dangle later if the target is deleted.
fn check_refs(account: &UserAccount, tx: &Transaction) -> Result<()> {
    let Some(cat) = account.category(&tx.category_id) else {
        bail!("Category '{}' not found", tx.category_id);
    };
    if cat.kind != tx.kind {
        bail!(
            "Category '{}' is for {} transactions, not {}",
            cat.name,
            cat.kind.as_str(),
            tx.kind.as_str()
        );
    }
    if let Some(card_id) = &tx.card_id {
        if account.card(card_id).is_none() {
            bail!("Card '{}' not found", card_id);
        }
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut account = store::require_login(conn)?;
    let tx = Transaction {
        id: account.mint_tx_id(),
        kind: TxKind::parse(sub.get_one::<String>("type").unwrap())?,
        category_id: sub.get_one::<String>("category").unwrap().clone(),
        description: sub.get_one::<String>("description").unwrap().clone(),
        amount: parse_amount(sub.get_one::<String>("amount").unwrap())?,
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        card_id: sub.get_one::<String>("card").cloned(),
    };
    check_refs(&account, &tx)?;
    println!(
        "Recorded {} of {} on {} ({})",
        tx.kind.as_str(),
        utils::fmt_amount(&tx.amount),
        tx.date,
        tx.id
    );
    account.add_transaction(tx);
    store::save_account(conn, &account)?;
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut account = store::require_login(conn)?;
    let id = sub.get_one::<String>("id").unwrap();
    let Some(existing) = account.transaction(id).cloned() else {
        bail!("Transaction '{}' not found", id);
    };
    let tx = Transaction {
        id: existing.id,
        kind: match sub.get_one::<String>("type") {
            Some(t) => TxKind::parse(t)?,
            None => existing.kind,
        },
        category_id: sub
            .get_one::<String>("category")
            .cloned()
            .unwrap_or(existing.category_id),
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or(existing.description),
        amount: match sub.get_one::<String>("amount") {
            Some(a) => parse_amount(a)?,
            None => existing.amount,
        },
        date: match sub.get_one::<String>("date") {
            Some(d) => parse_date(d)?,
            None => existing.date,
        },
        card_id: sub.get_one::<String>("card").cloned().or(existing.card_id),
    };
    check_refs(&account, &tx)?;
    account.update_transaction(tx);
    store::save_account(conn, &account)?;
    println!("Updated transaction '{}'", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut account = store::require_login(conn)?;
    let id = sub.get_one::<String>("id").unwrap();
    if !account.delete_transaction(id) {
        bail!("Transaction '{}' not found", id);
    }
    store::save_account(conn, &account)?;
    println!("Removed transaction '{}'", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let account = store::require_login(conn)?;
    let data = query_rows(&account, sub, utils::today())?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.card.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Category", "Description", "Amount", "Card"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub card: String,
}

/// Newest-first listing with optional period/category/card filters.
pub fn query_rows(
    account: &UserAccount,
    sub: &clap::ArgMatches,
    today: chrono::NaiveDate,
) -> Result<Vec<TransactionRow>> {
    let mut txs: Vec<&Transaction> = match sub.get_one::<String>("period") {
        Some(p) => {
            let range = Period::parse(p)?.window(today);
            report::filter_by_range(&account.transactions, &range)
        }
        None => account.transactions.iter().collect(),
    };
    if let Some(cat) = sub.get_one::<String>("category") {
        txs.retain(|t| &t.category_id == cat);
    }
    if let Some(card) = sub.get_one::<String>("card") {
        txs.retain(|t| t.card_id.as_deref() == Some(card.as_str()));
    }
    txs.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }

    Ok(txs
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            kind: t.kind.as_str().to_string(),
            category: account
                .category(&t.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| report::FALLBACK_CATEGORY_NAME.to_string()),
            description: t.description.clone(),
            amount: utils::fmt_signed(t.kind, &t.amount),
            card: t.card_id.clone().unwrap_or_default(),
        })
        .collect())
}
