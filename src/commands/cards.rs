// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rusqlite::Connection;
use serde::Serialize;

use crate::models::CreditCard;
use crate::store;
use crate::utils::{fmt_amount, maybe_print_json, parse_amount, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let mut account = store::require_login(conn)?;
            let card = CreditCard {
                id: account.mint_card_id(),
                name: sub.get_one::<String>("name").unwrap().clone(),
                holder: sub.get_one::<String>("holder").unwrap().clone(),
                due_day: *sub.get_one::<u32>("due-day").unwrap(),
                limit: match sub.get_one::<String>("limit") {
                    Some(l) => Some(parse_amount(l)?),
                    None => None,
                },
            };
            let id = card.id.clone();
            let name = card.name.clone();
            account.add_card(card);
            store::save_account(conn, &account)?;
            println!("Added card '{}' ({})", name, id);
        }
        Some(("edit", sub)) => {
            let mut account = store::require_login(conn)?;
            let id = sub.get_one::<String>("id").unwrap();
            let Some(existing) = account.card(id).cloned() else {
                bail!("Card '{}' not found", id);
            };
            let card = CreditCard {
                id: existing.id,
                name: sub
                    .get_one::<String>("name")
                    .cloned()
                    .unwrap_or(existing.name),
                holder: sub
                    .get_one::<String>("holder")
                    .cloned()
                    .unwrap_or(existing.holder),
                due_day: sub
                    .get_one::<u32>("due-day")
                    .copied()
                    .unwrap_or(existing.due_day),
                limit: match sub.get_one::<String>("limit") {
                    Some(l) => Some(parse_amount(l)?),
                    None => existing.limit,
                },
            };
            account.update_card(card);
            store::save_account(conn, &account)?;
            println!("Updated card '{}'", id);
        }
        Some(("rm", sub)) => {
            let mut account = store::require_login(conn)?;
            let id = sub.get_one::<String>("id").unwrap();
            let (removed, cascaded) = account.delete_card(id);
            if !removed {
                bail!("Card '{}' not found", id);
            }
            store::save_account(conn, &account)?;
            println!(
                "Removed card '{}' and {} transaction(s) charged to it",
                id, cascaded
            );
        }
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct CardRow {
    pub id: String,
    pub name: String,
    pub holder: String,
    pub due_day: u32,
    pub limit: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let account = store::require_login(conn)?;
    let data: Vec<CardRow> = account
        .cards
        .iter()
        .map(|c| CardRow {
            id: c.id.clone(),
            name: c.name.clone(),
            holder: c.holder.clone(),
            due_day: c.due_day,
            limit: c.limit.as_ref().map(fmt_amount).unwrap_or_default(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.id, r.name, r.holder, r.due_day.to_string(), r.limit])
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Holder", "Due day", "Limit"], rows)
        );
    }
    Ok(())
}
