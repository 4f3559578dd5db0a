// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Account/session store over the injected SQLite connection. Accounts are
//! whole JSON blobs; the session table holds the single active-account id.
//! Logout only clears the session, it never touches account data.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use crate::models::{UserAccount, mint_id};
use crate::seed;
use crate::utils;

const ACTIVE_ACCOUNT_KEY: &str = "active_account";

/// Rejections at the account/session boundary. These are user-facing
/// messages, not internal failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("An account with email '{0}' already exists")]
    EmailTaken(String),
    #[error("No account found for '{0}'")]
    UnknownUser(String),
    #[error("Incorrect password")]
    WrongPassword,
    #[error("Not logged in; run 'fintrack account login' first")]
    NotLoggedIn,
}

/// Non-cryptographic rolling hash over UTF-16 code units. Gates the CLI the
/// same way the stored blobs expect; real password hashing is out of scope.
pub fn password_verifier(password: &str) -> String {
    let mut h: i32 = 0;
    for unit in password.encode_utf16() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit));
    }
    format!("h_{}", to_base36(h.unsigned_abs()))
}

pub fn verify_password(password: &str, verifier: &str) -> bool {
    password_verifier(password) == verifier
}

fn to_base36(mut n: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn decode(data: &str) -> Result<UserAccount> {
    serde_json::from_str(data).context("Corrupt account record in store")
}

pub fn load_accounts(conn: &Connection) -> Result<Vec<UserAccount>> {
    let mut stmt = conn.prepare("SELECT data FROM accounts ORDER BY created_at, id")?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
    let mut accounts = Vec::new();
    for row in rows {
        accounts.push(decode(&row?)?);
    }
    Ok(accounts)
}

pub fn find_account(conn: &Connection, id: &str) -> Result<Option<UserAccount>> {
    let data: Option<String> = conn
        .query_row("SELECT data FROM accounts WHERE id=?1", params![id], |r| {
            r.get(0)
        })
        .optional()?;
    data.as_deref().map(decode).transpose()
}

pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<UserAccount>> {
    let data: Option<String> = conn
        .query_row(
            "SELECT data FROM accounts WHERE email=?1",
            params![email.to_lowercase()],
            |r| r.get(0),
        )
        .optional()?;
    data.as_deref().map(decode).transpose()
}

/// Insert-or-replace the whole account blob; the email column mirrors the
/// blob (lowercased) so uniqueness is enforced by the store.
pub fn save_account(conn: &Connection, account: &UserAccount) -> Result<()> {
    let data = serde_json::to_string(account)?;
    conn.execute(
        "INSERT INTO accounts(id, email, data) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET email=excluded.email, data=excluded.data",
        params![account.id, account.email.to_lowercase(), data],
    )?;
    Ok(())
}

/// Create an account with the seeded starter dataset and open its session.
pub fn register(conn: &Connection, name: &str, email: &str, password: &str) -> Result<UserAccount> {
    if find_by_email(conn, email)?.is_some() {
        return Err(AuthError::EmailTaken(email.to_string()).into());
    }
    let today = utils::today();
    let existing: Vec<String> =
        load_accounts(conn)?.into_iter().map(|a| a.id).collect();
    let account = UserAccount {
        id: mint_id("user", existing.iter().map(String::as_str)),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: password_verifier(password),
        avatar: None,
        transactions: seed::seed_transactions(today),
        categories: seed::default_categories(),
        goal: seed::default_goal(today),
        cards: Vec::new(),
        theme: crate::models::Theme::Light,
    };
    save_account(conn, &account)?;
    set_active(conn, Some(&account.id))?;
    Ok(account)
}

pub fn login(conn: &Connection, email: &str, password: &str) -> Result<UserAccount> {
    let account = find_by_email(conn, email)?
        .ok_or_else(|| AuthError::UnknownUser(email.to_string()))?;
    if !verify_password(password, &account.password_hash) {
        return Err(AuthError::WrongPassword.into());
    }
    set_active(conn, Some(&account.id))?;
    Ok(account)
}

/// Session end only; the account blob stays intact.
pub fn logout(conn: &Connection) -> Result<()> {
    set_active(conn, None)
}

pub fn set_active(conn: &Connection, id: Option<&str>) -> Result<()> {
    match id {
        Some(id) => {
            conn.execute(
                "INSERT INTO session(key, value) VALUES(?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                params![ACTIVE_ACCOUNT_KEY, id],
            )?;
        }
        None => {
            conn.execute(
                "DELETE FROM session WHERE key=?1",
                params![ACTIVE_ACCOUNT_KEY],
            )?;
        }
    }
    Ok(())
}

pub fn active_account(conn: &Connection) -> Result<Option<UserAccount>> {
    let id: Option<String> = conn
        .query_row(
            "SELECT value FROM session WHERE key=?1",
            params![ACTIVE_ACCOUNT_KEY],
            |r| r.get(0),
        )
        .optional()?;
    match id {
        Some(id) => find_account(conn, &id),
        None => Ok(None),
    }
}

pub fn require_login(conn: &Connection) -> Result<UserAccount> {
    active_account(conn)?.ok_or_else(|| AuthError::NotLoggedIn.into())
}
