//! Budget definitions and evaluation results.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expense::Category;
use crate::money::Money;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Enumerates budgeting cadences with fixed day counts.
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    /// Nominal day count; deliberately not calendar-aware.
    pub const fn days(self) -> i64 {
        match self {
            BudgetPeriod::Weekly => 7,
            BudgetPeriod::Monthly => 30,
            BudgetPeriod::Yearly => 365,
        }
    }

    pub fn window(self, start: NaiveDate) -> BudgetWindow {
        BudgetWindow {
            start,
            end: start + Duration::days(self.days()),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetPeriod::Weekly => "Weekly",
            BudgetPeriod::Monthly => "Monthly",
            BudgetPeriod::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Evaluation window for a budget, inclusive on both ends.
pub struct BudgetWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BudgetWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// A spending cap over a rolling window, optionally scoped to one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Budget {
    pub id: Uuid,
    pub name: String,
    pub amount: Money,
    pub period: BudgetPeriod,
    /// `None` covers every category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub start_date: NaiveDate,
    pub active: bool,
}

impl Budget {
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        period: BudgetPeriod,
        category: Option<Category>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            period,
            category,
            start_date,
            active: true,
        }
    }

    pub fn window(&self) -> BudgetWindow {
        self.period.window(self.start_date)
    }

    pub fn daily_limit(&self) -> Money {
        self.amount.per_day(self.period.days())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Describes whether spending is aligned with the budgeted amount.
pub enum BudgetStatus {
    UnderBudget,
    OnTrack,
    OverBudget,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::UnderBudget => "Under Budget",
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::OverBudget => "Over Budget",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Aggregated spending against one budget's window.
pub struct BudgetProgress {
    pub spent: Money,
    pub remaining: Money,
    /// `spent / amount`, for display; may exceed 1.0 when over budget.
    pub ratio: f64,
    pub status: BudgetStatus,
}

impl BudgetProgress {
    /// Derives progress from the budgeted amount and the exact spent total.
    ///
    /// Callers guarantee `amount > 0`; zero-amount budgets are rejected at
    /// creation time.
    pub fn from_parts(amount: Money, spent: Money) -> Self {
        let status = match spent.cmp(&amount) {
            Ordering::Less => BudgetStatus::UnderBudget,
            Ordering::Equal => BudgetStatus::OnTrack,
            Ordering::Greater => BudgetStatus::OverBudget,
        };
        Self {
            spent,
            remaining: amount - spent,
            ratio: spent.ratio_of(amount),
            status,
        }
    }
}
