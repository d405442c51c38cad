//! Budget maintenance and read-only progress evaluation.

use chrono::NaiveDate;
use uuid::Uuid;

use outlay_domain::{Budget, BudgetProgress, Expense};

use crate::error::{CoreError, Result};
use crate::ledger::Ledger;

/// Stateless budgeting utilities; evaluation never mutates the ledger.
pub struct BudgetService;

impl BudgetService {
    /// Adds a budget. Zero or negative amounts are rejected here so the
    /// progress ratio can never divide by zero.
    pub fn add(ledger: &mut Ledger, budget: Budget) -> Result<Uuid> {
        Self::validate(&budget)?;
        let id = budget.id;
        ledger.budgets.push(budget);
        ledger.touch();
        Ok(id)
    }

    /// Rewrites a budget's definition in place.
    pub fn edit(ledger: &mut Ledger, id: Uuid, changes: Budget) -> Result<()> {
        Self::validate(&changes)?;
        let budget = ledger.budget_mut(id).ok_or(CoreError::BudgetNotFound(id))?;
        budget.name = changes.name;
        budget.amount = changes.amount;
        budget.period = changes.period;
        budget.category = changes.category;
        budget.start_date = changes.start_date;
        budget.active = changes.active;
        ledger.touch();
        Ok(())
    }

    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<()> {
        let before = ledger.budgets.len();
        ledger.budgets.retain(|budget| budget.id != id);
        if ledger.budgets.len() == before {
            return Err(CoreError::BudgetNotFound(id));
        }
        ledger.touch();
        Ok(())
    }

    /// Computes spent/remaining/ratio for one budget over its window.
    ///
    /// An expense counts when its date falls inside the inclusive window
    /// and the budget's category filter (when set) matches.
    pub fn progress(budget: &Budget, expenses: &[Expense]) -> BudgetProgress {
        let window = budget.window();
        let spent = expenses
            .iter()
            .filter(|expense| window.contains(expense.date))
            .filter(|expense| {
                budget
                    .category
                    .map_or(true, |category| category == expense.category)
            })
            .map(|expense| expense.amount)
            .sum();
        BudgetProgress::from_parts(budget.amount, spent)
    }

    /// Whether the budget is flagged active *and* its window still covers
    /// `today`. The flag alone does not imply in-window.
    pub fn is_active(budget: &Budget, today: NaiveDate) -> bool {
        budget.active && today <= budget.window().end
    }

    /// Lists budgets whose flag is set and whose window has not expired.
    pub fn active(ledger: &Ledger, today: NaiveDate) -> Vec<&Budget> {
        ledger
            .budgets
            .iter()
            .filter(|budget| Self::is_active(budget, today))
            .collect()
    }

    fn validate(budget: &Budget) -> Result<()> {
        if !budget.amount.is_positive() {
            return Err(CoreError::InvalidAmount(budget.amount));
        }
        if budget.name.trim().is_empty() {
            return Err(CoreError::Validation("budget name must not be empty".into()));
        }
        Ok(())
    }
}
