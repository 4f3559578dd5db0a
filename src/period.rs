// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::{Datelike, Months, NaiveDate};

/// Inclusive calendar-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Named reporting window, resolved against "today" at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    ThisMonth,
    LastMonth,
    Last3Months,
}

pub const PERIOD_VALUES: [&str; 3] = ["this-month", "last-month", "last-3-months"];

impl Period {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "this-month" => Ok(Self::ThisMonth),
            "last-month" => Ok(Self::LastMonth),
            "last-3-months" => Ok(Self::Last3Months),
            other => Err(anyhow!(
                "Invalid period '{}', expected one of {}",
                other,
                PERIOD_VALUES.join("|")
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThisMonth => "this-month",
            Self::LastMonth => "last-month",
            Self::Last3Months => "last-3-months",
        }
    }

    /// Concrete interval for this selector, anchored to `today`.
    pub fn window(self, today: NaiveDate) -> DateRange {
        match self {
            Self::ThisMonth => month_range(today),
            Self::LastMonth => month_range(shift_months(today, 1)),
            Self::Last3Months => DateRange {
                start: month_start(shift_months(today, 2)),
                end: month_end(today),
            },
        }
    }

    /// The immediately preceding window of equal length, non-overlapping
    /// with `window`; used for period-over-period comparison.
    pub fn previous_window(self, today: NaiveDate) -> DateRange {
        match self {
            Self::ThisMonth => month_range(shift_months(today, 1)),
            Self::LastMonth => month_range(shift_months(today, 2)),
            Self::Last3Months => DateRange {
                start: month_start(shift_months(today, 5)),
                end: month_end(shift_months(today, 3)),
            },
        }
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

fn month_range(date: NaiveDate) -> DateRange {
    DateRange {
        start: month_start(date),
        end: month_end(date),
    }
}

fn shift_months(date: NaiveDate, back: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(back)).unwrap_or(date)
}

/// YYYY-MM key of a date, the granularity goals and monthly buckets use.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
