//! The in-memory ledger aggregate that services operate on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use outlay_domain::{Account, Budget, Expense, RecurringExpenseTemplate};

/// Owns every account, expense, template, and budget for one book of record.
///
/// Constructed explicitly by the caller and passed into each service; there
/// is no process-wide instance. All mutations go through services, which
/// keep the funds invariant: an account's balance always equals its opening
/// balance minus the sum of its currently posted expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub accounts: Vec<Account>,
    pub expenses: Vec<Expense>,
    pub templates: Vec<RecurringExpenseTemplate>,
    pub budgets: Vec<Budget>,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            created_at: now,
            updated_at: now,
            accounts: Vec::new(),
            expenses: Vec::new(),
            templates: Vec::new(),
            budgets: Vec::new(),
        }
    }

    /// Records that the ledger changed; storage uses this for snapshots.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn template(&self, id: Uuid) -> Option<&RecurringExpenseTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    pub fn template_mut(&mut self, id: Uuid) -> Option<&mut RecurringExpenseTemplate> {
        self.templates.iter_mut().find(|template| template.id == id)
    }

    pub fn budget(&self, id: Uuid) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    pub fn budget_mut(&mut self, id: Uuid) -> Option<&mut Budget> {
        self.budgets.iter_mut().find(|budget| budget.id == id)
    }
}
