//! Read-only spending aggregation for reporting collaborators.

use std::collections::HashMap;

use uuid::Uuid;

use outlay_domain::{Category, Money};

use crate::ledger::Ledger;

/// Aggregate queries over the expense set. Everything here is a snapshot
/// read; no method mutates the ledger.
pub struct SummaryService;

impl SummaryService {
    pub fn total_spent(ledger: &Ledger) -> Money {
        ledger.expenses.iter().map(|expense| expense.amount).sum()
    }

    pub fn total_for_account(ledger: &Ledger, account_id: Uuid) -> Money {
        ledger
            .expenses
            .iter()
            .filter(|expense| expense.account_id == account_id)
            .map(|expense| expense.amount)
            .sum()
    }

    /// Spending per category, optionally scoped to one account.
    pub fn spent_by_category(ledger: &Ledger, account: Option<Uuid>) -> HashMap<Category, Money> {
        let mut totals: HashMap<Category, Money> = HashMap::new();
        for expense in &ledger.expenses {
            if account.is_some_and(|id| expense.account_id != id) {
                continue;
            }
            *totals.entry(expense.category).or_default() += expense.amount;
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account_service::AccountService;
    use crate::expense_service::ExpenseService;
    use chrono::NaiveDate;
    use outlay_domain::Expense;

    #[test]
    fn totals_split_by_account_and_category() {
        let mut ledger = Ledger::new("Test");
        let checking =
            AccountService::create(&mut ledger, "Checking", "CHK", Money::from_cents(10_000))
                .expect("create succeeds");
        let savings =
            AccountService::create(&mut ledger, "Savings", "SAV", Money::from_cents(10_000))
                .expect("create succeeds");
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        for (account, cents, category) in [
            (checking, 1_000, Category::Food),
            (checking, 500, Category::Food),
            (savings, 2_000, Category::Shopping),
        ] {
            let expense = Expense::new(Money::from_cents(cents), "Spend", category, day, account);
            ExpenseService::post(&mut ledger, expense).expect("post succeeds");
        }

        assert_eq!(
            SummaryService::total_spent(&ledger),
            Money::from_cents(3_500)
        );
        assert_eq!(
            SummaryService::total_for_account(&ledger, checking),
            Money::from_cents(1_500)
        );

        let everywhere = SummaryService::spent_by_category(&ledger, None);
        assert_eq!(everywhere.get(&Category::Food), Some(&Money::from_cents(1_500)));
        assert_eq!(
            everywhere.get(&Category::Shopping),
            Some(&Money::from_cents(2_000))
        );

        let scoped = SummaryService::spent_by_category(&ledger, Some(checking));
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped.get(&Category::Food), Some(&Money::from_cents(1_500)));
    }
}
