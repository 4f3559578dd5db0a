// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::models::Theme;
use crate::store;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let account = store::register(conn, name, email, password)?;
            println!(
                "Registered '{}' <{}> with {} starter transactions; you are now logged in",
                account.name,
                account.email,
                account.transactions.len()
            );
        }
        Some(("login", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let account = store::login(conn, email, password)?;
            println!("Logged in as '{}' <{}>", account.name, account.email);
        }
        Some(("logout", _)) => {
            store::logout(conn)?;
            println!("Logged out; your data is kept for the next login");
        }
        Some(("whoami", sub)) => whoami(conn, sub)?,
        Some(("profile", sub)) => profile(conn, sub)?,
        Some(("theme", sub)) => {
            let mut account = store::require_login(conn)?;
            let theme = Theme::parse(sub.get_one::<String>("theme").unwrap())?;
            account.theme = theme;
            store::save_account(conn, &account)?;
            println!("Theme set to {}", theme.as_str());
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct WhoamiRow {
    id: String,
    name: String,
    email: String,
    theme: String,
    transactions: usize,
    categories: usize,
    cards: usize,
}

fn whoami(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let account = store::require_login(conn)?;
    let row = WhoamiRow {
        id: account.id.clone(),
        name: account.name.clone(),
        email: account.email.clone(),
        theme: account.theme.as_str().to_string(),
        transactions: account.transactions.len(),
        categories: account.categories.len(),
        cards: account.cards.len(),
    };
    if !maybe_print_json(json_flag, jsonl_flag, &row)? {
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Email", "Theme", "Txs", "Categories", "Cards"],
                vec![vec![
                    row.id,
                    row.name,
                    row.email,
                    row.theme,
                    row.transactions.to_string(),
                    row.categories.to_string(),
                    row.cards.to_string(),
                ]],
            )
        );
    }
    Ok(())
}

fn profile(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut account = store::require_login(conn)?;
    if let Some(name) = sub.get_one::<String>("name") {
        account.name = name.clone();
    }
    if let Some(email) = sub.get_one::<String>("email") {
        if let Some(other) = store::find_by_email(conn, email)? {
            if other.id != account.id {
                return Err(store::AuthError::EmailTaken(email.clone()).into());
            }
        }
        account.email = email.clone();
    }
    if let Some(avatar) = sub.get_one::<String>("avatar") {
        account.avatar = Some(avatar.clone());
    }
    store::save_account(conn, &account)?;
    println!("Profile updated for '{}'", account.name);
    Ok(())
}
