// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregation engine: pure functions from a transaction slice and a date
//! range to reportable figures. Nothing here mutates or fails; degenerate
//! inputs degrade to zeros, empty groupings, or fallback labels.

use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Category, Transaction, TxKind};
use crate::period::{DateRange, month_key};

/// Display fallbacks for transactions whose category no longer exists.
pub const FALLBACK_CATEGORY_NAME: &str = "Other";
pub const FALLBACK_CATEGORY_COLOR: &str = "hsl(0, 0%, 50%)";

/// Windows longer than this many days chart in weekly buckets.
const DAILY_BUCKET_LIMIT: i64 = 31;

pub fn filter_by_range<'a>(txs: &'a [Transaction], range: &DateRange) -> Vec<&'a Transaction> {
    txs.iter().filter(|t| range.contains(t.date)).collect()
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

pub fn totals(txs: &[&Transaction]) -> Totals {
    let mut t = Totals::default();
    for tx in txs {
        match tx.kind {
            TxKind::Income => t.income += tx.amount,
            TxKind::Expense => t.expense += tx.amount,
        }
    }
    t
}

pub fn sum_by_kind(txs: &[&Transaction], kind: TxKind) -> Decimal {
    txs.iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySlice {
    pub category_id: String,
    pub name: String,
    pub color: String,
    pub amount: Decimal,
}

/// Expense totals per category, resolved to display name/color and sorted
/// descending by amount. The sort is stable, so equal buckets keep
/// first-encountered order. Dangling category ids land in "Other".
pub fn expenses_by_category(txs: &[&Transaction], categories: &[Category]) -> Vec<CategorySlice> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, Decimal> = HashMap::new();
    for tx in txs.iter().filter(|t| t.kind == TxKind::Expense) {
        if !sums.contains_key(&tx.category_id) {
            order.push(tx.category_id.clone());
        }
        *sums.entry(tx.category_id.clone()).or_insert(Decimal::ZERO) += tx.amount;
    }

    let mut slices: Vec<CategorySlice> = order
        .into_iter()
        .map(|cat_id| {
            let cat = categories.iter().find(|c| c.id == cat_id);
            CategorySlice {
                amount: sums.get(&cat_id).copied().unwrap_or(Decimal::ZERO),
                name: cat
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| FALLBACK_CATEGORY_NAME.to_string()),
                color: cat
                    .map(|c| c.color.clone())
                    .unwrap_or_else(|| FALLBACK_CATEGORY_COLOR.to_string()),
                category_id: cat_id,
            }
        })
        .collect();
    slices.sort_by(|a, b| b.amount.cmp(&a.amount));
    slices
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Cumulative income/expense curve over the range, clamped at `today`.
/// Daily buckets for month-sized windows, 7-day buckets for longer ones;
/// each point carries the running totals up to and including its bucket.
pub fn running_series(
    txs: &[&Transaction],
    range: &DateRange,
    today: NaiveDate,
) -> Vec<SeriesPoint> {
    let end = range.end.min(today);
    if end < range.start {
        return Vec::new();
    }
    let weekly = range.num_days() > DAILY_BUCKET_LIMIT;
    let step = if weekly { 7 } else { 1 };

    let mut points = Vec::new();
    let mut acc_income = Decimal::ZERO;
    let mut acc_expense = Decimal::ZERO;
    let mut cursor = range.start;
    while cursor <= end {
        let bucket_end = (cursor + Duration::days(step - 1)).min(end);
        for tx in txs {
            if tx.date >= cursor && tx.date <= bucket_end {
                match tx.kind {
                    TxKind::Income => acc_income += tx.amount,
                    TxKind::Expense => acc_expense += tx.amount,
                }
            }
        }
        let label = if weekly {
            cursor.format("%d/%m").to_string()
        } else {
            cursor.format("%d").to_string()
        };
        points.push(SeriesPoint {
            label,
            income: acc_income,
            expense: acc_expense,
            balance: acc_income - acc_expense,
        });
        cursor = cursor + Duration::days(step);
    }
    points
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthBucket {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Per-month income/expense totals within the filtered set, oldest first.
pub fn monthly_breakdown(txs: &[&Transaction]) -> Vec<MonthBucket> {
    let mut sums: HashMap<String, (Decimal, Decimal)> = HashMap::new();
    for tx in txs {
        let entry = sums
            .entry(month_key(tx.date))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match tx.kind {
            TxKind::Income => entry.0 += tx.amount,
            TxKind::Expense => entry.1 += tx.amount,
        }
    }
    let mut buckets: Vec<MonthBucket> = sums
        .into_iter()
        .map(|(month, (income, expense))| MonthBucket {
            month,
            income,
            expense,
            net: income - expense,
        })
        .collect();
    buckets.sort_by(|a, b| a.month.cmp(&b.month));
    buckets
}

/// round(numer / denom * 100) as an integer percent; 0 when denom is not
/// positive. Rounds half away from zero.
pub fn percent_of(numer: Decimal, denom: Decimal) -> i64 {
    if denom > Decimal::ZERO {
        (numer / denom * Decimal::from(100))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0)
    } else {
        0
    }
}

/// Period-over-period percentage change; 0 (no signal) when the previous
/// period has no total, never NaN or infinite.
pub fn pct_change(current: Decimal, previous: Decimal) -> i64 {
    percent_of(current - previous, previous)
}

/// Share of income kept after expenses, as a rounded percent.
pub fn savings_rate(t: &Totals) -> i64 {
    percent_of(t.balance(), t.income)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalBand {
    Nominal,
    Warning,
    OverBudget,
}

impl GoalBand {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nominal => "on track",
            Self::Warning => "warning",
            Self::OverBudget => "over budget",
        }
    }
}

/// Spend against the monthly ceiling as a rounded percent plus a severity
/// band. A zero goal reads as 0% regardless of spend.
pub fn goal_utilization(expense_total: Decimal, goal_amount: Decimal) -> (i64, GoalBand) {
    let percent = percent_of(expense_total, goal_amount);
    let band = if percent >= 100 {
        GoalBand::OverBudget
    } else if percent >= 80 {
        GoalBand::Warning
    } else {
        GoalBand::Nominal
    };
    (percent, band)
}
