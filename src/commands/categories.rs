// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rusqlite::Connection;
use serde::Serialize;

use crate::models::{Category, TxKind};
use crate::store;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let mut account = store::require_login(conn)?;
            let cat = Category {
                id: account.mint_category_id(),
                name: sub.get_one::<String>("name").unwrap().clone(),
                icon: sub.get_one::<String>("icon").unwrap().clone(),
                color: sub.get_one::<String>("color").unwrap().clone(),
                kind: TxKind::parse(sub.get_one::<String>("type").unwrap())?,
            };
            let id = cat.id.clone();
            let name = cat.name.clone();
            account.add_category(cat);
            store::save_account(conn, &account)?;
            println!("Added category '{}' ({})", name, id);
        }
        Some(("edit", sub)) => {
            let mut account = store::require_login(conn)?;
            let id = sub.get_one::<String>("id").unwrap();
            let Some(existing) = account.category(id).cloned() else {
                bail!("Category '{}' not found", id);
            };
            let cat = Category {
                id: existing.id,
                name: sub
                    .get_one::<String>("name")
                    .cloned()
                    .unwrap_or(existing.name),
                icon: sub
                    .get_one::<String>("icon")
                    .cloned()
                    .unwrap_or(existing.icon),
                color: sub
                    .get_one::<String>("color")
                    .cloned()
                    .unwrap_or(existing.color),
                kind: match sub.get_one::<String>("type") {
                    Some(t) => TxKind::parse(t)?,
                    None => existing.kind,
                },
            };
            // A kind change does not reclassify transactions already
            // referencing this category.
            account.update_category(cat);
            store::save_account(conn, &account)?;
            println!("Updated category '{}'", id);
        }
        Some(("rm", sub)) => {
            let mut account = store::require_login(conn)?;
            let id = sub.get_one::<String>("id").unwrap();
            if !account.delete_category(id) {
                bail!("Category '{}' not found", id);
            }
            store::save_account(conn, &account)?;
            println!("Removed category '{}'; its transactions now report under 'Other'", id);
        }
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub kind: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let account = store::require_login(conn)?;
    let kind = match sub.get_one::<String>("type") {
        Some(t) => Some(TxKind::parse(t)?),
        None => None,
    };
    let data: Vec<CategoryRow> = account
        .categories
        .iter()
        .filter(|c| kind.is_none_or(|k| c.kind == k))
        .map(|c| CategoryRow {
            id: c.id.clone(),
            name: c.name.clone(),
            icon: c.icon.clone(),
            color: c.color.clone(),
            kind: c.kind.as_str().to_string(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.id, r.name, r.icon, r.color, r.kind])
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Icon", "Color", "Type"], rows)
        );
    }
    Ok(())
}
