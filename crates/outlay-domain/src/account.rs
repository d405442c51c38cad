//! Account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// A spending account with a user-facing short code and a running balance.
///
/// The balance is only ever changed by ledger operations (posting an
/// expense, reversing one, or a direct correction); callers never write it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    /// Short identifier such as `MAIN` or `SAV`; stored uppercase.
    pub code: String,
    pub balance: Money,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(name: impl Into<String>, code: impl Into<String>, balance: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            code: code.into().trim().to_uppercase(),
            balance,
            created_at: Utc::now(),
        }
    }
}
