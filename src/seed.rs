// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Starter dataset given to every new account: a category palette plus
//! sample transactions spread over the current and two prior months, so
//! reports have something to show before the first real entry.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{Category, MonthlyGoal, Transaction, TxKind};
use crate::period::month_key;

pub fn default_categories() -> Vec<Category> {
    let palette: [(&str, &str, &str, TxKind); 10] = [
        ("Salary", "Briefcase", "hsl(152, 60%, 42%)", TxKind::Income),
        ("Freelance", "Laptop", "hsl(170, 55%, 40%)", TxKind::Income),
        ("Investments", "TrendingUp", "hsl(200, 60%, 45%)", TxKind::Income),
        ("Food", "UtensilsCrossed", "hsl(0, 72%, 51%)", TxKind::Expense),
        ("Transport", "Car", "hsl(30, 80%, 50%)", TxKind::Expense),
        ("Housing", "Home", "hsl(260, 55%, 55%)", TxKind::Expense),
        ("Leisure", "Gamepad2", "hsl(320, 60%, 50%)", TxKind::Expense),
        ("Health", "Heart", "hsl(350, 70%, 55%)", TxKind::Expense),
        ("Education", "GraduationCap", "hsl(220, 70%, 50%)", TxKind::Expense),
        ("Shopping", "ShoppingBag", "hsl(38, 92%, 50%)", TxKind::Expense),
    ];
    palette
        .into_iter()
        .enumerate()
        .map(|(i, (name, icon, color, kind))| Category {
            id: format!("cat-{}", i + 1),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            kind,
        })
        .collect()
}

pub fn default_goal(today: NaiveDate) -> MonthlyGoal {
    MonthlyGoal {
        month: month_key(today),
        amount: Decimal::from(6000),
    }
}

pub fn seed_transactions(today: NaiveDate) -> Vec<Transaction> {
    // (kind, category, description, amount, day-of-month)
    type Row = (TxKind, &'static str, &'static str, i64, u32);

    const CURRENT: [Row; 11] = [
        (TxKind::Income, "cat-1", "Monthly salary", 8500, 5),
        (TxKind::Income, "cat-2", "Website project", 2200, 12),
        (TxKind::Income, "cat-3", "Dividends", 450, 8),
        (TxKind::Expense, "cat-6", "Rent", 2800, 1),
        (TxKind::Expense, "cat-4", "Groceries", 890, 3),
        (TxKind::Expense, "cat-5", "Fuel", 320, 6),
        (TxKind::Expense, "cat-7", "Movies and dinner", 180, 9),
        (TxKind::Expense, "cat-8", "Health insurance", 650, 10),
        (TxKind::Expense, "cat-9", "Online course", 197, 7),
        (TxKind::Expense, "cat-10", "Clothes", 430, 11),
        (TxKind::Expense, "cat-4", "Restaurant", 245, 13),
    ];
    const ONE_BACK: [Row; 8] = [
        (TxKind::Income, "cat-1", "Monthly salary", 8500, 5),
        (TxKind::Income, "cat-2", "Consulting", 1800, 15),
        (TxKind::Expense, "cat-6", "Rent", 2800, 1),
        (TxKind::Expense, "cat-4", "Groceries", 750, 4),
        (TxKind::Expense, "cat-5", "Rides", 280, 8),
        (TxKind::Expense, "cat-7", "Concert", 350, 20),
        (TxKind::Expense, "cat-8", "Health insurance", 650, 10),
        (TxKind::Expense, "cat-10", "Electronics", 1200, 18),
    ];
    const TWO_BACK: [Row; 6] = [
        (TxKind::Income, "cat-1", "Monthly salary", 8200, 5),
        (TxKind::Income, "cat-3", "Interest", 380, 12),
        (TxKind::Expense, "cat-6", "Rent", 2800, 1),
        (TxKind::Expense, "cat-4", "Groceries", 680, 6),
        (TxKind::Expense, "cat-5", "Fuel", 350, 10),
        (TxKind::Expense, "cat-9", "Books", 120, 14),
    ];

    let mut txs = Vec::new();
    let mut next = 1u64;
    let months: [(NaiveDate, &[Row]); 3] = [
        (today, &CURRENT),
        (shift_back(today, 1), &ONE_BACK),
        (shift_back(today, 2), &TWO_BACK),
    ];
    for (anchor, rows) in months {
        for (kind, category_id, description, amount, day) in rows.iter().copied() {
            if let Some(date) = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), day) {
                txs.push(Transaction {
                    id: format!("tx-{}", next),
                    kind,
                    category_id: category_id.to_string(),
                    description: description.to_string(),
                    amount: Decimal::from(amount),
                    date,
                    card_id: None,
                });
                next += 1;
            }
        }
    }
    txs
}

fn shift_back(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}
