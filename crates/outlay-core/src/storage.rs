//! Persistence abstraction and snapshot integrity checks.

use std::collections::HashSet;

use crate::error::Result;
use crate::ledger::Ledger;

/// Abstraction over persistence backends capable of storing ledgers.
///
/// A ledger snapshot is the atomic unit: every multi-record mutation
/// (balance plus expense) is already committed in memory before a snapshot
/// is saved, so the store never observes partial postings. Failures surface
/// as `CoreError::Storage` and are the caller's to retry.
pub trait LedgerStorage: Send + Sync {
    fn save(&self, name: &str, ledger: &Ledger) -> Result<()>;
    fn load(&self, name: &str) -> Result<Ledger>;
    fn list(&self) -> Result<Vec<String>>;
    fn delete(&self, name: &str) -> Result<()>;
}

/// Detects dangling references and other anomalies within a ledger snapshot.
pub fn ledger_warnings(ledger: &Ledger) -> Vec<String> {
    let account_ids: HashSet<_> = ledger.accounts.iter().map(|account| account.id).collect();
    let mut warnings = Vec::new();

    for expense in &ledger.expenses {
        if !account_ids.contains(&expense.account_id) {
            warnings.push(format!(
                "expense {} references unknown account {}",
                expense.id, expense.account_id
            ));
        }
    }
    for template in &ledger.templates {
        if !account_ids.contains(&template.account_id) {
            warnings.push(format!(
                "template {} references unknown account {}",
                template.id, template.account_id
            ));
        }
        if let Some(last) = template.last_processed {
            if last < template.start_date {
                warnings.push(format!(
                    "template {} processed marker {} predates its start {}",
                    template.id, last, template.start_date
                ));
            }
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use outlay_domain::{Category, Expense, Money, RecurringExpenseTemplate, RecurringFrequency};
    use uuid::Uuid;

    #[test]
    fn warnings_flag_dangling_references() {
        let mut ledger = Ledger::new("Test");
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let ghost = Uuid::new_v4();

        ledger.expenses.push(Expense::new(
            Money::from_cents(100),
            "Orphan",
            Category::Other,
            day,
            ghost,
        ));
        ledger.templates.push(RecurringExpenseTemplate::new(
            Money::from_cents(100),
            "Orphan",
            Category::Other,
            day,
            RecurringFrequency::Monthly,
            ghost,
        ));

        let warnings = ledger_warnings(&ledger);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("unknown account"));
    }

    #[test]
    fn warnings_are_empty_for_a_consistent_ledger() {
        let ledger = Ledger::new("Test");
        assert!(ledger_warnings(&ledger).is_empty());
    }
}
