//! outlay-core
//!
//! Business logic and services for outlay: the ledger aggregate, validated
//! account and expense mutations, recurring-expense catch-up, and budget
//! evaluation. Depends on outlay-domain. No CLI, no terminal I/O, no direct
//! storage interactions.

pub mod account_service;
pub mod budget_service;
pub mod error;
pub mod expense_service;
pub mod ledger;
pub mod recurrence_service;
pub mod schedule;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use account_service::*;
pub use budget_service::*;
pub use error::{CoreError, Result};
pub use expense_service::*;
pub use ledger::*;
pub use recurrence_service::*;
pub use schedule::*;
pub use storage::*;
pub use summary_service::*;
pub use time::*;
