//! outlay-domain
//!
//! Pure domain models (Money, Account, Expense, RecurringExpenseTemplate,
//! Budget, calendar arithmetic). No I/O, no storage. Only data types and
//! core enums.

pub mod account;
pub mod budget;
pub mod expense;
pub mod money;
pub mod recurring;

pub use account::*;
pub use budget::*;
pub use expense::*;
pub use money::*;
pub use recurring::*;
