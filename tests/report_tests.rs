// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use fintrack::models::{Category, Transaction, TxKind};
use fintrack::period::Period;
use fintrack::report::{
    self, FALLBACK_CATEGORY_COLOR, FALLBACK_CATEGORY_NAME, GoalBand,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

fn tx(id: &str, kind: TxKind, category: &str, amount: i64, date: NaiveDate) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind,
        category_id: category.to_string(),
        description: format!("{} entry", id),
        amount: dec(amount),
        date,
        card_id: None,
    }
}

fn cat(id: &str, name: &str, color: &str, kind: TxKind) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: "Tag".to_string(),
        color: color.to_string(),
        kind,
    }
}

#[test]
fn totals_and_balance_for_this_month() {
    let txs = vec![
        tx("tx-1", TxKind::Income, "cat-1", 1000, d(2024, 3, 5)),
        tx("tx-2", TxKind::Expense, "cat-4", 400, d(2024, 3, 10)),
    ];
    let range = Period::ThisMonth.window(d(2024, 3, 15));
    let in_scope = report::filter_by_range(&txs, &range);
    let t = report::totals(&in_scope);
    assert_eq!(t.income, dec(1000));
    assert_eq!(t.expense, dec(400));
    assert_eq!(t.balance(), dec(600));
    assert_eq!(t.income - t.expense, t.balance());
}

#[test]
fn filtering_is_inclusive_and_non_mutating() {
    let txs = vec![
        tx("tx-1", TxKind::Expense, "cat-4", 10, d(2024, 3, 1)),
        tx("tx-2", TxKind::Expense, "cat-4", 20, d(2024, 3, 31)),
        tx("tx-3", TxKind::Expense, "cat-4", 30, d(2024, 4, 1)),
    ];
    let range = Period::ThisMonth.window(d(2024, 3, 15));
    let in_scope = report::filter_by_range(&txs, &range);
    assert_eq!(in_scope.len(), 2);
    assert_eq!(txs.len(), 3);
}

#[test]
fn current_and_previous_windows_partition_transactions() {
    let txs: Vec<Transaction> = (1..=28)
        .map(|day| tx(&format!("tx-{}", day), TxKind::Expense, "c", 1, d(2024, 2, day)))
        .chain((1..=31).map(|day| {
            tx(&format!("tx-m{}", day), TxKind::Expense, "c", 1, d(2024, 3, day))
        }))
        .collect();
    let today = d(2024, 3, 15);
    let current = Period::ThisMonth.window(today);
    let previous = Period::ThisMonth.previous_window(today);
    let in_current = report::filter_by_range(&txs, &current);
    let in_previous = report::filter_by_range(&txs, &previous);
    for t in &in_current {
        assert!(!in_previous.iter().any(|p| p.id == t.id));
    }
    assert_eq!(in_current.len() + in_previous.len(), txs.len());
}

#[test]
fn expenses_group_by_category_sorted_descending() {
    let categories = vec![
        cat("cat-a", "Food", "hsl(0, 72%, 51%)", TxKind::Expense),
        cat("cat-b", "Transport", "hsl(30, 80%, 50%)", TxKind::Expense),
    ];
    let txs = vec![
        tx("tx-1", TxKind::Expense, "cat-b", 50, d(2024, 3, 2)),
        tx("tx-2", TxKind::Expense, "cat-a", 100, d(2024, 3, 3)),
        tx("tx-3", TxKind::Expense, "cat-a", 200, d(2024, 3, 4)),
        tx("tx-4", TxKind::Income, "cat-x", 999, d(2024, 3, 5)),
    ];
    let in_scope: Vec<&Transaction> = txs.iter().collect();
    let slices = report::expenses_by_category(&in_scope, &categories);
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].name, "Food");
    assert_eq!(slices[0].amount, dec(300));
    assert_eq!(slices[1].name, "Transport");
    assert_eq!(slices[1].amount, dec(50));

    let bucket_sum: Decimal = slices.iter().map(|s| s.amount).sum();
    assert_eq!(bucket_sum, report::totals(&in_scope).expense);
    for pair in slices.windows(2) {
        assert!(pair[0].amount >= pair[1].amount);
    }
}

#[test]
fn grouping_ties_keep_first_encountered_order() {
    let categories = vec![
        cat("cat-a", "A", "c1", TxKind::Expense),
        cat("cat-b", "B", "c2", TxKind::Expense),
    ];
    let txs = vec![
        tx("tx-1", TxKind::Expense, "cat-b", 75, d(2024, 3, 1)),
        tx("tx-2", TxKind::Expense, "cat-a", 75, d(2024, 3, 2)),
    ];
    let in_scope: Vec<&Transaction> = txs.iter().collect();
    let slices = report::expenses_by_category(&in_scope, &categories);
    assert_eq!(slices[0].name, "B");
    assert_eq!(slices[1].name, "A");
}

#[test]
fn dangling_category_degrades_to_other() {
    let categories = vec![cat("cat-a", "Food", "c1", TxKind::Expense)];
    let txs = vec![
        tx("tx-1", TxKind::Expense, "cat-a", 100, d(2024, 3, 2)),
        tx("tx-2", TxKind::Expense, "cat-gone", 40, d(2024, 3, 3)),
    ];
    let in_scope: Vec<&Transaction> = txs.iter().collect();
    let slices = report::expenses_by_category(&in_scope, &categories);
    let other = slices.iter().find(|s| s.name == FALLBACK_CATEGORY_NAME).unwrap();
    assert_eq!(other.color, FALLBACK_CATEGORY_COLOR);
    assert_eq!(other.amount, dec(40));
    assert_eq!(report::totals(&in_scope).expense, dec(140));
}

#[test]
fn running_series_is_cumulative_and_ends_at_totals() {
    let txs = vec![
        tx("tx-1", TxKind::Income, "cat-1", 1000, d(2024, 3, 5)),
        tx("tx-2", TxKind::Expense, "cat-4", 400, d(2024, 3, 10)),
        tx("tx-3", TxKind::Expense, "cat-4", 100, d(2024, 3, 12)),
    ];
    let today = d(2024, 3, 15);
    let range = Period::ThisMonth.window(today);
    let in_scope = report::filter_by_range(&txs, &range);
    let series = report::running_series(&in_scope, &range, today);

    // Daily buckets, clamped at today
    assert_eq!(series.len(), 15);
    assert_eq!(series[0].label, "01");
    assert_eq!(series[4].income, dec(1000)); // salary landed on the 5th
    let last = series.last().unwrap();
    let t = report::totals(&in_scope);
    assert_eq!(last.income, t.income);
    assert_eq!(last.expense, t.expense);
    assert_eq!(last.balance, t.balance());
    for pair in series.windows(2) {
        assert!(pair[1].income >= pair[0].income);
        assert!(pair[1].expense >= pair[0].expense);
    }
}

#[test]
fn three_month_series_uses_weekly_buckets() {
    let txs = vec![
        tx("tx-1", TxKind::Income, "cat-1", 300, d(2024, 1, 2)),
        tx("tx-2", TxKind::Expense, "cat-4", 120, d(2024, 2, 20)),
        tx("tx-3", TxKind::Expense, "cat-4", 30, d(2024, 3, 14)),
    ];
    let today = d(2024, 3, 15);
    let range = Period::Last3Months.window(today);
    let in_scope = report::filter_by_range(&txs, &range);
    let series = report::running_series(&in_scope, &range, today);

    // 2024-01-01..2024-03-15 is 75 days -> 11 seven-day buckets
    assert_eq!(series.len(), 11);
    assert_eq!(series[0].label, "01/01");
    let last = series.last().unwrap();
    assert_eq!(last.income, dec(300));
    assert_eq!(last.expense, dec(150));
}

#[test]
fn series_is_empty_when_window_is_entirely_in_the_future() {
    let range = Period::ThisMonth.window(d(2024, 3, 15));
    let series = report::running_series(&[], &range, d(2024, 2, 1));
    assert!(series.is_empty());
}

#[test]
fn pct_change_has_no_signal_without_a_previous_total() {
    assert_eq!(report::pct_change(dec(400), dec(0)), 0);
    assert_eq!(report::pct_change(dec(0), dec(0)), 0);
    assert_eq!(report::pct_change(dec(150), dec(100)), 50);
    assert_eq!(report::pct_change(dec(50), dec(100)), -50);
    assert_eq!(report::pct_change(dec(100), dec(300)), -67);
}

#[test]
fn goal_utilization_bands() {
    assert_eq!(
        report::goal_utilization(dec(400), dec(500)),
        (80, GoalBand::Warning)
    );
    assert_eq!(
        report::goal_utilization(dec(100), dec(500)),
        (20, GoalBand::Nominal)
    );
    assert_eq!(
        report::goal_utilization(dec(500), dec(500)),
        (100, GoalBand::OverBudget)
    );
    assert_eq!(
        report::goal_utilization(dec(495), dec(500)),
        (99, GoalBand::Warning)
    );
}

#[test]
fn zero_goal_reads_as_zero_regardless_of_spend() {
    assert_eq!(
        report::goal_utilization(dec(9999), dec(0)),
        (0, GoalBand::Nominal)
    );
}

#[test]
fn savings_rate_degrades_to_zero_without_income() {
    let t = report::totals(&[]);
    assert_eq!(report::savings_rate(&t), 0);

    let txs = vec![
        tx("tx-1", TxKind::Income, "c", 1000, d(2024, 3, 1)),
        tx("tx-2", TxKind::Expense, "c", 250, d(2024, 3, 2)),
    ];
    let in_scope: Vec<&Transaction> = txs.iter().collect();
    assert_eq!(report::savings_rate(&report::totals(&in_scope)), 75);
}

#[test]
fn monthly_breakdown_groups_by_calendar_month() {
    let txs = vec![
        tx("tx-1", TxKind::Income, "c", 100, d(2024, 1, 5)),
        tx("tx-2", TxKind::Expense, "c", 40, d(2024, 1, 20)),
        tx("tx-3", TxKind::Expense, "c", 10, d(2024, 2, 3)),
    ];
    let in_scope: Vec<&Transaction> = txs.iter().collect();
    let buckets = report::monthly_breakdown(&in_scope);
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].month, "2024-01");
    assert_eq!(buckets[0].net, dec(60));
    assert_eq!(buckets[1].month, "2024-02");
    assert_eq!(buckets[1].expense, dec(10));
}
