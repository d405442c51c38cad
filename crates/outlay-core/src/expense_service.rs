//! Expense posting, reversal, and atomic updates against account balances.

use uuid::Uuid;

use outlay_domain::{Category, Expense, Money};

use crate::error::{CoreError, Result};
use crate::ledger::Ledger;

/// Posts and reverses expenses while preserving the funds invariant: an
/// account's balance always equals its opening balance minus the sum of its
/// currently posted expenses.
pub struct ExpenseService;

impl ExpenseService {
    /// Posts an expense: validates it, decrements the owning account's
    /// balance, and records the expense as a single in-memory mutation.
    ///
    /// Fails with `InvalidAmount` for non-positive amounts,
    /// `AccountNotFound` for dangling account references, and
    /// `InsufficientFunds` when the amount exceeds the balance. On failure
    /// neither the balance nor the expense set changes.
    pub fn post(ledger: &mut Ledger, expense: Expense) -> Result<Uuid> {
        if !expense.amount.is_positive() {
            return Err(CoreError::InvalidAmount(expense.amount));
        }
        let account = ledger
            .account_mut(expense.account_id)
            .ok_or(CoreError::AccountNotFound(expense.account_id))?;
        if expense.amount > account.balance {
            return Err(CoreError::InsufficientFunds {
                account: account.id,
                balance: account.balance,
                requested: expense.amount,
            });
        }
        account.balance -= expense.amount;
        let id = expense.id;
        ledger.expenses.push(expense);
        ledger.touch();
        Ok(id)
    }

    /// Deletes an expense and restores the owning account's balance.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<Expense> {
        let index = ledger
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(CoreError::ExpenseNotFound(id))?;
        let expense = ledger.expenses.remove(index);
        if let Some(account) = ledger.account_mut(expense.account_id) {
            account.balance += expense.amount;
        }
        ledger.touch();
        Ok(expense)
    }

    /// Rewrites an expense, moving its posting to the (possibly different)
    /// target account.
    ///
    /// The funds check runs against the post-reversal balance of the target
    /// account before either side commits, so a failed update leaves every
    /// balance and the stored expense untouched.
    pub fn update(ledger: &mut Ledger, id: Uuid, changes: Expense) -> Result<()> {
        if !changes.amount.is_positive() {
            return Err(CoreError::InvalidAmount(changes.amount));
        }
        let expense_index = ledger
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(CoreError::ExpenseNotFound(id))?;
        let old_amount = ledger.expenses[expense_index].amount;
        let old_account_id = ledger.expenses[expense_index].account_id;

        let source_index = ledger
            .accounts
            .iter()
            .position(|account| account.id == old_account_id)
            .ok_or(CoreError::AccountNotFound(old_account_id))?;
        let target_index = ledger
            .accounts
            .iter()
            .position(|account| account.id == changes.account_id)
            .ok_or(CoreError::AccountNotFound(changes.account_id))?;

        // Balance the target would hold once the old posting is reversed.
        let mut available = ledger.accounts[target_index].balance;
        if source_index == target_index {
            available += old_amount;
        }
        if changes.amount > available {
            return Err(CoreError::InsufficientFunds {
                account: changes.account_id,
                balance: available,
                requested: changes.amount,
            });
        }

        ledger.accounts[source_index].balance += old_amount;
        ledger.accounts[target_index].balance -= changes.amount;
        let stored = &mut ledger.expenses[expense_index];
        stored.amount = changes.amount;
        stored.description = changes.description;
        stored.category = changes.category;
        stored.date = changes.date;
        stored.recurring = changes.recurring;
        stored.account_id = changes.account_id;
        stored.receipt = changes.receipt;
        ledger.touch();
        Ok(())
    }

    /// Removes every expense, reversing each posting so balances return to
    /// their pre-posting values.
    pub fn clear(ledger: &mut Ledger) {
        let drained: Vec<Expense> = ledger.expenses.drain(..).collect();
        for expense in drained {
            if let Some(account) = ledger.account_mut(expense.account_id) {
                account.balance += expense.amount;
            }
        }
        ledger.touch();
    }

    pub fn for_account(ledger: &Ledger, account_id: Uuid) -> Vec<&Expense> {
        ledger
            .expenses
            .iter()
            .filter(|expense| expense.account_id == account_id)
            .collect()
    }

    pub fn total_for_account(ledger: &Ledger, account_id: Uuid) -> Money {
        Self::for_account(ledger, account_id)
            .into_iter()
            .map(|expense| expense.amount)
            .sum()
    }

    pub fn by_category<'a>(ledger: &'a Ledger, category: Category) -> Vec<&'a Expense> {
        ledger
            .expenses
            .iter()
            .filter(|expense| expense.category == category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account_service::AccountService;
    use chrono::NaiveDate;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    fn funded_ledger(cents: i64) -> (Ledger, Uuid) {
        let mut ledger = Ledger::new("Test");
        let id = AccountService::create(&mut ledger, "Checking", "CHK", Money::from_cents(cents))
            .expect("create succeeds");
        (ledger, id)
    }

    #[test]
    fn post_decrements_the_balance() {
        let (mut ledger, account) = funded_ledger(10_000);
        let expense = Expense::new(
            Money::from_cents(2_500),
            "Groceries",
            Category::Food,
            sample_date(),
            account,
        );
        ExpenseService::post(&mut ledger, expense).expect("post succeeds");
        assert_eq!(
            ledger.account(account).expect("account exists").balance,
            Money::from_cents(7_500)
        );
        assert_eq!(ledger.expenses.len(), 1);
    }

    #[test]
    fn post_rejects_overdrafts_without_partial_state() {
        let (mut ledger, account) = funded_ledger(1_000);
        let expense = Expense::new(
            Money::from_cents(1_001),
            "Too big",
            Category::Shopping,
            sample_date(),
            account,
        );
        let err = ExpenseService::post(&mut ledger, expense).expect_err("must fail");
        assert!(matches!(err, CoreError::InsufficientFunds { .. }));
        assert_eq!(
            ledger.account(account).expect("account exists").balance,
            Money::from_cents(1_000)
        );
        assert!(ledger.expenses.is_empty());
    }

    #[test]
    fn post_allows_spending_the_exact_balance() {
        let (mut ledger, account) = funded_ledger(1_000);
        let expense = Expense::new(
            Money::from_cents(1_000),
            "Everything",
            Category::Other,
            sample_date(),
            account,
        );
        ExpenseService::post(&mut ledger, expense).expect("post succeeds");
        assert_eq!(
            ledger.account(account).expect("account exists").balance,
            Money::zero()
        );
    }

    #[test]
    fn post_rejects_non_positive_amounts() {
        let (mut ledger, account) = funded_ledger(1_000);
        for cents in [0, -100] {
            let expense = Expense::new(
                Money::from_cents(cents),
                "Bad",
                Category::Other,
                sample_date(),
                account,
            );
            let err = ExpenseService::post(&mut ledger, expense).expect_err("must fail");
            assert!(matches!(err, CoreError::InvalidAmount(_)));
        }
    }

    #[test]
    fn post_validates_the_account_reference() {
        let (mut ledger, _) = funded_ledger(1_000);
        let expense = Expense::new(
            Money::from_cents(100),
            "Orphan",
            Category::Other,
            sample_date(),
            Uuid::new_v4(),
        );
        let err = ExpenseService::post(&mut ledger, expense).expect_err("must fail");
        assert!(matches!(err, CoreError::AccountNotFound(_)));
    }

    #[test]
    fn remove_restores_the_balance_exactly() {
        let (mut ledger, account) = funded_ledger(10_000);
        let expense = Expense::new(
            Money::from_cents(3_333),
            "Dinner",
            Category::Food,
            sample_date(),
            account,
        );
        let id = ExpenseService::post(&mut ledger, expense).expect("post succeeds");
        ExpenseService::remove(&mut ledger, id).expect("remove succeeds");
        assert_eq!(
            ledger.account(account).expect("account exists").balance,
            Money::from_cents(10_000)
        );
        assert!(ledger.expenses.is_empty());
    }

    #[test]
    fn failed_update_leaves_everything_untouched() {
        let (mut ledger, account) = funded_ledger(1_000);
        let expense = Expense::new(
            Money::from_cents(400),
            "Lunch",
            Category::Food,
            sample_date(),
            account,
        );
        let id = ExpenseService::post(&mut ledger, expense.clone()).expect("post succeeds");

        // 400 refunded leaves 1000 available; 1500 must still fail.
        let mut changes = expense;
        changes.amount = Money::from_cents(1_500);
        let err = ExpenseService::update(&mut ledger, id, changes).expect_err("must fail");
        assert!(matches!(err, CoreError::InsufficientFunds { .. }));

        assert_eq!(
            ledger.account(account).expect("account exists").balance,
            Money::from_cents(600)
        );
        let stored = ledger.expense(id).expect("expense exists");
        assert_eq!(stored.amount, Money::from_cents(400));
    }

    #[test]
    fn update_validates_against_the_post_reversal_balance() {
        let (mut ledger, account) = funded_ledger(1_000);
        let expense = Expense::new(
            Money::from_cents(900),
            "Rent share",
            Category::Utilities,
            sample_date(),
            account,
        );
        let id = ExpenseService::post(&mut ledger, expense.clone()).expect("post succeeds");
        assert_eq!(
            ledger.account(account).expect("account exists").balance,
            Money::from_cents(100)
        );

        // Only 100 left, but reversing the 900 makes 1000 available.
        let mut changes = expense;
        changes.amount = Money::from_cents(950);
        ExpenseService::update(&mut ledger, id, changes).expect("update succeeds");
        assert_eq!(
            ledger.account(account).expect("account exists").balance,
            Money::from_cents(50)
        );
        assert_eq!(
            ledger.expense(id).expect("expense exists").amount,
            Money::from_cents(950)
        );
    }

    #[test]
    fn update_can_move_an_expense_between_accounts() {
        let (mut ledger, first) = funded_ledger(1_000);
        let second = AccountService::create(&mut ledger, "Savings", "SAV", Money::from_cents(500))
            .expect("create succeeds");

        let expense = Expense::new(
            Money::from_cents(300),
            "Subscription",
            Category::Entertainment,
            sample_date(),
            first,
        );
        let id = ExpenseService::post(&mut ledger, expense.clone()).expect("post succeeds");

        let mut changes = expense;
        changes.account_id = second;
        ExpenseService::update(&mut ledger, id, changes).expect("update succeeds");

        assert_eq!(
            ledger.account(first).expect("account exists").balance,
            Money::from_cents(1_000)
        );
        assert_eq!(
            ledger.account(second).expect("account exists").balance,
            Money::from_cents(200)
        );
    }

    #[test]
    fn clear_reverses_every_posting() {
        let (mut ledger, account) = funded_ledger(5_000);
        for cents in [1_000, 2_000] {
            let expense = Expense::new(
                Money::from_cents(cents),
                "Spend",
                Category::Other,
                sample_date(),
                account,
            );
            ExpenseService::post(&mut ledger, expense).expect("post succeeds");
        }
        ExpenseService::clear(&mut ledger);
        assert!(ledger.expenses.is_empty());
        assert_eq!(
            ledger.account(account).expect("account exists").balance,
            Money::from_cents(5_000)
        );
    }
}
