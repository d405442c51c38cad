use std::result::Result as StdResult;

use outlay_domain::{Money, MoneyParseError, UnknownCategory};
use thiserror::Error;
use uuid::Uuid;

/// Unified error type for ledger, scheduling, and storage operations.
///
/// Validation errors are returned to the immediate caller and never retried
/// automatically; `Storage` is an opaque pass-through from the durable store.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: Uuid,
        balance: Money,
        requested: Money,
    },
    #[error("Account has linked expenses: {0}")]
    AccountHasExpenses(Uuid),
    #[error("Invalid amount: {0}")]
    InvalidAmount(Money),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("Recurring template not found: {0}")]
    TemplateNotFound(Uuid),
    #[error("Budget not found: {0}")]
    BudgetNotFound(Uuid),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = StdResult<T, CoreError>;

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}

impl From<UnknownCategory> for CoreError {
    fn from(err: UnknownCategory) -> Self {
        CoreError::InvalidCategory(err.0)
    }
}

impl From<MoneyParseError> for CoreError {
    fn from(err: MoneyParseError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
