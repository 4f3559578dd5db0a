// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use rusqlite::Connection;

use crate::models::{Transaction, TxKind, UserAccount};
use crate::store;
use crate::utils::{parse_amount, parse_date};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("card-transactions", sub)) => import_card_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// CSV columns: date, description, amount, category (optional, id or name),
/// type (optional, defaults to expense). Every row lands on the given card.
fn import_card_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let card_id = sub.get_one::<String>("card").unwrap();
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut account = store::require_login(conn)?;
    if account.card(card_id).is_none() {
        bail!("Card '{}' not found", card_id);
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let mut drafts = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        let date_raw = rec.get(0).context("date missing")?.trim();
        let description = rec.get(1).context("description missing")?.trim().to_string();
        let amount_raw = rec.get(2).context("amount missing")?.trim();
        let category_raw = rec.get(3).unwrap_or("").trim();
        let kind_raw = rec.get(4).unwrap_or("").trim();

        let date = parse_date(date_raw)
            .with_context(|| format!("Invalid transaction date '{}'", date_raw))?;
        let amount = parse_amount(amount_raw)
            .with_context(|| format!("Invalid amount '{}' for {}", amount_raw, description))?;
        let kind = if kind_raw.is_empty() {
            TxKind::Expense
        } else {
            TxKind::parse(kind_raw)?
        };
        let category_id = resolve_category(&account, category_raw, kind)?;

        drafts.push(Transaction {
            // Ids and the card link are assigned when the batch is attached.
            id: String::new(),
            kind,
            category_id,
            description,
            amount,
            date,
            card_id: None,
        });
    }

    let count = account.import_card_transactions(card_id, drafts);
    store::save_account(conn, &account)?;
    println!("Imported {} transaction(s) onto card '{}'", count, card_id);
    Ok(())
}

/// Accepts a category id or name; blank rows stay uncategorized and report
/// under "Other".
fn resolve_category(account: &UserAccount, raw: &str, kind: TxKind) -> Result<String> {
    if raw.is_empty() {
        return Ok(String::new());
    }
    let found = account
        .categories
        .iter()
        .find(|c| c.id == raw || c.name.eq_ignore_ascii_case(raw));
    match found {
        Some(cat) if cat.kind == kind => Ok(cat.id.clone()),
        Some(cat) => bail!(
            "Category '{}' is for {} transactions, not {}",
            cat.name,
            cat.kind.as_str(),
            kind.as_str()
        ),
        None => bail!("Category '{}' not found", raw),
    }
}
