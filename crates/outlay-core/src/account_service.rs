//! Validated mutations for accounts.

use uuid::Uuid;

use outlay_domain::{Account, Money};

use crate::error::{CoreError, Result};
use crate::ledger::Ledger;

/// Name and code of the account created when a ledger has none.
const DEFAULT_ACCOUNT_NAME: &str = "Main Account";
const DEFAULT_ACCOUNT_CODE: &str = "MAIN";

/// Provides validated mutations for [`Account`] entities.
///
/// Balances are only touched by [`crate::ExpenseService`] postings and the
/// explicit [`AccountService::set_balance`] correction.
pub struct AccountService;

impl AccountService {
    /// Adds a new account after validating its name and code.
    pub fn create(
        ledger: &mut Ledger,
        name: &str,
        code: &str,
        opening_balance: Money,
    ) -> Result<Uuid> {
        let account = Account::new(name, code, opening_balance);
        Self::validate(ledger, None, &account.name, &account.code)?;
        let id = account.id;
        ledger.accounts.push(account);
        ledger.touch();
        Ok(id)
    }

    /// Creates the default account when the ledger has none yet.
    pub fn ensure_default(ledger: &mut Ledger) -> Result<Option<Uuid>> {
        if !ledger.accounts.is_empty() {
            return Ok(None);
        }
        Self::create(
            ledger,
            DEFAULT_ACCOUNT_NAME,
            DEFAULT_ACCOUNT_CODE,
            Money::zero(),
        )
        .map(Some)
    }

    /// Updates an account's name and code. The balance is not editable here.
    pub fn edit(ledger: &mut Ledger, id: Uuid, name: &str, code: &str) -> Result<()> {
        let code = code.trim().to_uppercase();
        Self::validate(ledger, Some(id), name, &code)?;
        let account = ledger
            .account_mut(id)
            .ok_or(CoreError::AccountNotFound(id))?;
        account.name = name.to_string();
        account.code = code;
        ledger.touch();
        Ok(())
    }

    /// Direct balance correction; replaces the balance unconditionally.
    ///
    /// This is a calibration operation, not a transaction, so no funds
    /// check applies.
    pub fn set_balance(ledger: &mut Ledger, id: Uuid, new_balance: Money) -> Result<()> {
        let account = ledger
            .account_mut(id)
            .ok_or(CoreError::AccountNotFound(id))?;
        account.balance = new_balance;
        ledger.touch();
        Ok(())
    }

    /// Removes an account when nothing references it. Never cascades.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<()> {
        if ledger.account(id).is_none() {
            return Err(CoreError::AccountNotFound(id));
        }
        if ledger.expenses.iter().any(|expense| expense.account_id == id) {
            return Err(CoreError::AccountHasExpenses(id));
        }
        if ledger
            .templates
            .iter()
            .any(|template| template.account_id == id)
        {
            return Err(CoreError::Validation(
                "account is referenced by recurring templates".into(),
            ));
        }
        ledger.accounts.retain(|account| account.id != id);
        ledger.touch();
        Ok(())
    }

    /// Looks an account up by its user-facing code, case-insensitively.
    pub fn find_by_code<'a>(ledger: &'a Ledger, code: &str) -> Option<&'a Account> {
        let wanted = code.trim();
        ledger
            .accounts
            .iter()
            .find(|account| account.code.eq_ignore_ascii_case(wanted))
    }

    pub fn list(ledger: &Ledger) -> Vec<&Account> {
        ledger.accounts.iter().collect()
    }

    fn validate(ledger: &Ledger, exclude: Option<Uuid>, name: &str, code: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(CoreError::Validation("account name must not be empty".into()));
        }
        if code.trim().is_empty() {
            return Err(CoreError::Validation("account code must not be empty".into()));
        }
        let duplicate = ledger.accounts.iter().any(|account| {
            account.code.eq_ignore_ascii_case(code.trim()) && exclude != Some(account.id)
        });
        if duplicate {
            return Err(CoreError::Validation(format!(
                "account code `{}` already exists",
                code.trim().to_uppercase()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_duplicate_codes_case_insensitively() {
        let mut ledger = Ledger::new("Test");
        AccountService::create(&mut ledger, "Checking", "MAIN", Money::zero())
            .expect("first create succeeds");

        let err = AccountService::create(&mut ledger, "Other", "main", Money::zero())
            .expect_err("duplicate code must fail");
        assert!(
            matches!(err, CoreError::Validation(ref message) if message.contains("already exists")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn ensure_default_only_fires_on_an_empty_ledger() {
        let mut ledger = Ledger::new("Test");
        let created = AccountService::ensure_default(&mut ledger).expect("ensure succeeds");
        assert!(created.is_some());
        assert_eq!(ledger.accounts.len(), 1);
        assert_eq!(ledger.accounts[0].code, "MAIN");

        let repeat = AccountService::ensure_default(&mut ledger).expect("ensure succeeds");
        assert!(repeat.is_none());
        assert_eq!(ledger.accounts.len(), 1);
    }

    #[test]
    fn set_balance_replaces_without_a_funds_check() {
        let mut ledger = Ledger::new("Test");
        let id = AccountService::create(&mut ledger, "Checking", "CHK", Money::from_cents(100))
            .expect("create succeeds");

        AccountService::set_balance(&mut ledger, id, Money::from_cents(-500))
            .expect("correction succeeds");
        assert_eq!(
            ledger.account(id).expect("account exists").balance,
            Money::from_cents(-500)
        );
    }

    #[test]
    fn find_by_code_ignores_case() {
        let mut ledger = Ledger::new("Test");
        let id = AccountService::create(&mut ledger, "Savings", "SAV", Money::zero())
            .expect("create succeeds");
        assert_eq!(
            AccountService::find_by_code(&ledger, "sav").map(|a| a.id),
            Some(id)
        );
        assert!(AccountService::find_by_code(&ledger, "NOPE").is_none());
    }

    #[test]
    fn remove_fails_for_missing_accounts() {
        let mut ledger = Ledger::new("Test");
        let err = AccountService::remove(&mut ledger, Uuid::new_v4()).expect_err("must fail");
        assert!(matches!(err, CoreError::AccountNotFound(_)));
    }
}
