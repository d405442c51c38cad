//! Recurring expense templates and their calendar cadence.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expense::{Category, Expense};
use crate::money::Money;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Enumerates the cadences a recurring expense can follow.
pub enum RecurringFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurringFrequency {
    /// Calculates the next occurrence one interval after `from`.
    ///
    /// Month and year steps clamp to the end of shorter months, so a
    /// Jan 31 monthly cadence lands on Feb 28 (or 29).
    pub fn next_date(self, from: NaiveDate) -> NaiveDate {
        match self {
            RecurringFrequency::Daily => from + Duration::days(1),
            RecurringFrequency::Weekly => from + Duration::weeks(1),
            RecurringFrequency::Monthly => shift_month(from, 1),
            RecurringFrequency::Yearly => shift_year(from, 1),
        }
    }
}

impl fmt::Display for RecurringFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecurringFrequency::Daily => "Daily",
            RecurringFrequency::Weekly => "Weekly",
            RecurringFrequency::Monthly => "Monthly",
            RecurringFrequency::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

/// A periodic expense pattern that materializes into ledger expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurringExpenseTemplate {
    pub id: Uuid,
    pub amount: Money,
    pub description: String,
    pub category: Category,
    pub start_date: NaiveDate,
    /// Inclusive; the template stops generating once today passes this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub frequency: RecurringFrequency,
    pub account_id: Uuid,
    /// Date of the most recently materialized occurrence. `None` means the
    /// template has never produced an expense.
    #[serde(default)]
    pub last_processed: Option<NaiveDate>,
}

impl RecurringExpenseTemplate {
    pub fn new(
        amount: Money,
        description: impl Into<String>,
        category: Category,
        start_date: NaiveDate,
        frequency: RecurringFrequency,
        account_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            description: description.into(),
            category,
            start_date,
            end_date: None,
            frequency,
            account_id,
            last_processed: None,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.end_date.map_or(true, |end| today <= end)
    }

    /// Builds the concrete expense for one occurrence of this template.
    pub fn materialize(&self, occurrence: NaiveDate) -> Expense {
        let mut expense = Expense::new(
            self.amount,
            self.description.clone(),
            self.category,
            occurrence,
            self.account_id,
        );
        expense.recurring = true;
        expense
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day)
        .unwrap_or(date)
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| (first_next - Duration::days(1)).day())
        .unwrap_or(28)
}
