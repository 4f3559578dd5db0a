// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use fintrack::commands::reports::build_summary;
use fintrack::models::{MonthlyGoal, Theme, Transaction, TxKind, UserAccount};
use fintrack::period::Period;
use fintrack::seed;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn account_with(transactions: Vec<Transaction>) -> UserAccount {
    UserAccount {
        id: "user-1".to_string(),
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        password_hash: "h_0".to_string(),
        avatar: None,
        transactions,
        categories: seed::default_categories(),
        goal: MonthlyGoal {
            month: "2024-03".to_string(),
            amount: Decimal::from(500),
        },
        cards: Vec::new(),
        theme: Theme::Light,
    }
}

fn tx(id: &str, kind: TxKind, amount: i64, date: NaiveDate) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind,
        category_id: "cat-4".to_string(),
        description: id.to_string(),
        amount: Decimal::from(amount),
        date,
        card_id: None,
    }
}

#[test]
fn summary_compares_against_the_previous_window() {
    let account = account_with(vec![
        tx("tx-1", TxKind::Income, 1000, d(2024, 3, 5)),
        tx("tx-2", TxKind::Expense, 400, d(2024, 3, 10)),
        tx("tx-3", TxKind::Income, 800, d(2024, 2, 5)),
        tx("tx-4", TxKind::Expense, 500, d(2024, 2, 12)),
    ]);
    let s = build_summary(&account, Period::ThisMonth, d(2024, 3, 15));
    assert_eq!(s.period, "this-month");
    assert_eq!(s.start, "2024-03-01");
    assert_eq!(s.end, "2024-03-31");
    assert_eq!(s.income, "1000.00");
    assert_eq!(s.expense, "400.00");
    assert_eq!(s.balance, "600.00");
    assert_eq!(s.income_change_pct, 25); // 800 -> 1000
    assert_eq!(s.expense_change_pct, -20); // 500 -> 400
    assert_eq!(s.savings_rate_pct, 60);
}

#[test]
fn summary_deltas_are_zero_without_a_previous_period() {
    let account = account_with(vec![
        tx("tx-1", TxKind::Income, 1000, d(2024, 3, 5)),
        tx("tx-2", TxKind::Expense, 400, d(2024, 3, 10)),
    ]);
    let s = build_summary(&account, Period::ThisMonth, d(2024, 3, 15));
    assert_eq!(s.income_change_pct, 0);
    assert_eq!(s.expense_change_pct, 0);
}

#[test]
fn three_month_summary_spans_the_rolling_window() {
    let account = account_with(vec![
        tx("tx-1", TxKind::Income, 100, d(2024, 1, 10)),
        tx("tx-2", TxKind::Income, 100, d(2024, 2, 10)),
        tx("tx-3", TxKind::Income, 100, d(2024, 3, 10)),
        tx("tx-4", TxKind::Income, 100, d(2023, 12, 10)), // previous window
    ]);
    let s = build_summary(&account, Period::Last3Months, d(2024, 3, 15));
    assert_eq!(s.income, "300.00");
    assert_eq!(s.income_change_pct, 200); // 100 -> 300
}
