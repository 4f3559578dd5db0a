// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;

use fintrack::models::{CreditCard, Transaction, TxKind, mint_id};
use fintrack::{db, store};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn register_seeds_the_starter_dataset_and_opens_a_session() {
    let conn = setup();
    let account = store::register(&conn, "Ana", "ana@example.com", "hunter2").unwrap();
    assert_eq!(account.id, "user-1");
    assert_eq!(account.categories.len(), 10);
    assert_eq!(account.transactions.len(), 25);
    assert_eq!(account.goal.amount, Decimal::from(6000));
    assert!(account.cards.is_empty());

    let active = store::active_account(&conn).unwrap().unwrap();
    assert_eq!(active.id, account.id);
}

#[test]
fn duplicate_email_is_rejected_case_insensitively() {
    let conn = setup();
    store::register(&conn, "Ana", "ana@example.com", "pw").unwrap();
    let err = store::register(&conn, "Other", "ANA@Example.COM", "pw").unwrap_err();
    assert!(err.to_string().contains("already exists"), "{}", err);
}

#[test]
fn login_rejections_are_human_readable() {
    let conn = setup();
    store::register(&conn, "Ana", "ana@example.com", "hunter2").unwrap();
    store::logout(&conn).unwrap();

    let err = store::login(&conn, "nobody@example.com", "pw").unwrap_err();
    assert!(err.to_string().contains("No account found"), "{}", err);

    let err = store::login(&conn, "ana@example.com", "wrong").unwrap_err();
    assert_eq!(err.to_string(), "Incorrect password");

    let logged_in = store::login(&conn, "Ana@Example.com", "hunter2").unwrap();
    assert_eq!(logged_in.id, "user-1");
}

#[test]
fn logout_ends_the_session_but_keeps_account_data() {
    let conn = setup();
    let mut account = store::register(&conn, "Ana", "ana@example.com", "pw").unwrap();
    account.transactions.clear();
    store::save_account(&conn, &account).unwrap();

    store::logout(&conn).unwrap();
    assert!(store::active_account(&conn).unwrap().is_none());
    let err = store::require_login(&conn).unwrap_err();
    assert!(err.to_string().contains("Not logged in"), "{}", err);

    let back = store::login(&conn, "ana@example.com", "pw").unwrap();
    assert!(back.transactions.is_empty());
    assert_eq!(back.categories.len(), 10);
}

#[test]
fn account_blobs_round_trip_losslessly() {
    let conn = setup();
    let mut account = store::register(&conn, "Ana", "ana@example.com", "pw").unwrap();
    account.cards.push(CreditCard {
        id: "card-1".to_string(),
        name: "Platinum".to_string(),
        holder: "ANA L".to_string(),
        due_day: 31,
        limit: Some(Decimal::new(1234_56, 2)),
    });
    account.transactions.push(Transaction {
        id: account.mint_tx_id(),
        kind: TxKind::Expense,
        category_id: "cat-4".to_string(),
        description: "Dinner".to_string(),
        amount: Decimal::new(99_90, 2),
        date: chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        card_id: Some("card-1".to_string()),
    });
    account.avatar = Some("blob:abc".to_string());
    store::save_account(&conn, &account).unwrap();

    let reloaded = store::find_account(&conn, &account.id).unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(&reloaded).unwrap(),
        serde_json::to_value(&account).unwrap()
    );
}

#[test]
fn serialized_shape_uses_the_legacy_field_names() {
    let conn = setup();
    let account = store::register(&conn, "Ana", "ana@example.com", "pw").unwrap();
    let value = serde_json::to_value(&account).unwrap();
    assert!(value.get("passwordHash").is_some());
    let tx = &value["transactions"][0];
    assert!(tx.get("categoryId").is_some());
    assert_eq!(tx["type"], "income");
    assert!(tx.get("cardId").is_none()); // absent, not null
}

#[test]
fn password_verifier_matches_the_legacy_scheme() {
    // Known vectors for the rolling hash over UTF-16 code units
    assert_eq!(store::password_verifier("password"), "h_k4k87v");
    assert_eq!(store::password_verifier("hunter2"), "h_kxnp9u");
    assert_eq!(store::password_verifier("correct horse"), "h_wyv2ah");
    assert!(store::verify_password("password", "h_k4k87v"));
    assert!(!store::verify_password("Password", "h_k4k87v"));
}

#[test]
fn card_removal_cascades_to_its_transactions() {
    let conn = setup();
    let mut account = store::register(&conn, "Ana", "ana@example.com", "pw").unwrap();
    account.cards.push(CreditCard {
        id: "card-1".to_string(),
        name: "Gold".to_string(),
        holder: "ANA L".to_string(),
        due_day: 10,
        limit: None,
    });
    let on_card = Transaction {
        id: account.mint_tx_id(),
        kind: TxKind::Expense,
        category_id: "cat-4".to_string(),
        description: "Card charge".to_string(),
        amount: Decimal::from(50),
        date: chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        card_id: Some("card-1".to_string()),
    };
    account.add_transaction(on_card);
    let before = account.transactions.len();

    let (removed, cascaded) = account.delete_card("card-1");
    assert!(removed);
    assert_eq!(cascaded, 1);
    assert_eq!(account.transactions.len(), before - 1);

    let (removed, cascaded) = account.delete_card("card-404");
    assert!(!removed);
    assert_eq!(cascaded, 0);
}

#[test]
fn goal_replacement_keeps_no_history() {
    let conn = setup();
    let mut account = store::register(&conn, "Ana", "ana@example.com", "pw").unwrap();
    account.set_goal(fintrack::models::MonthlyGoal {
        month: "2024-03".to_string(),
        amount: Decimal::from(500),
    });
    account.set_goal(fintrack::models::MonthlyGoal {
        month: "2024-04".to_string(),
        amount: Decimal::from(750),
    });
    assert_eq!(account.goal.month, "2024-04");
    assert_eq!(account.goal.amount, Decimal::from(750));
}

#[test]
fn id_minting_continues_past_the_highest_suffix() {
    assert_eq!(mint_id("tx", ["tx-1", "tx-9", "tx-3"].into_iter()), "tx-10");
    assert_eq!(mint_id("cat", std::iter::empty()), "cat-1");
    // Non-numeric suffixes are ignored
    assert_eq!(mint_id("tx", ["tx-abc", "tx-2"].into_iter()), "tx-3");
}

#[test]
fn second_account_is_isolated_from_the_first() {
    let conn = setup();
    let mut first = store::register(&conn, "Ana", "ana@example.com", "pw").unwrap();
    first.transactions.clear();
    store::save_account(&conn, &first).unwrap();
    store::logout(&conn).unwrap();

    let second = store::register(&conn, "Bea", "bea@example.com", "pw").unwrap();
    assert_eq!(second.id, "user-2");
    assert_eq!(second.transactions.len(), 25);

    let first_again = store::find_account(&conn, "user-1").unwrap().unwrap();
    assert!(first_again.transactions.is_empty());
}
