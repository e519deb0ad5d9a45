//! Expense management for the expense tracker.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and the types it is built from
//! - `NewExpense`, the validated form every store write goes through
//! - The route handlers for creating, listing and aggregating expenses
//! - The sample data used to seed an empty store

mod by_category_endpoint;
mod core;
mod create_endpoint;
mod list_endpoint;
mod seed;
mod total_endpoint;
mod validation;

pub use by_category_endpoint::get_totals_by_category_endpoint;
pub use self::core::{CategoryTotal, Expense, ExpenseDate, ExpenseId, RangeTotal};
pub use create_endpoint::create_expense_endpoint;
pub use list_endpoint::list_expenses_endpoint;
pub use seed::{SAMPLE_EXPENSES, seed_if_empty};
pub use total_endpoint::get_total_endpoint;
pub use validation::{ExpenseDraft, NewExpense};

pub(crate) use self::core::created_now;
