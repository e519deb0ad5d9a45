//! Defines the expense store trait.

use std::fmt::Debug;

use crate::{
    Error,
    expense::{CategoryTotal, Expense, ExpenseDate, NewExpense},
};

/// Handles the creation, retrieval and aggregation of expenses.
///
/// Implementations assign the ID and creation time of each expense. They
/// never mutate or remove an expense once it has been created.
pub trait ExpenseStore: Debug + Send + Sync {
    /// Save a validated expense and return it with its assigned ID and
    /// creation time.
    fn create(&self, expense: NewExpense) -> Result<Expense, Error>;

    /// Retrieve the expenses matching `filter`, newest date first.
    ///
    /// Expenses sharing a date are ordered most recently created first.
    fn list(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, Error>;

    /// The sum of the amounts of all expenses dated within `range`.
    fn total_in_range(&self, range: &DateRange) -> Result<f64, Error>;

    /// The total and count of expenses for every category in the store,
    /// largest total first.
    ///
    /// Categories with equal totals are ordered by name.
    fn totals_by_category(&self) -> Result<Vec<CategoryTotal>, Error>;

    /// Get the total number of expenses in the store.
    fn count(&self) -> Result<usize, Error>;
}

/// Defines which expenses should be returned by [ExpenseStore::list].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    /// Only include expenses with exactly this category (case-sensitive).
    pub category: Option<String>,
    /// Only include expenses dated on this day.
    pub date: Option<ExpenseDate>,
}

impl ExpenseFilter {
    /// Whether `expense` passes the filter.
    pub fn matches(&self, expense: &Expense) -> bool {
        self.category
            .as_ref()
            .is_none_or(|category| *category == expense.category)
            && self.date.is_none_or(|date| date == expense.date)
    }
}

/// An inclusive range of dates.
///
/// A range whose start is after its end contains no dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    /// The first date in the range.
    pub start: ExpenseDate,
    /// The last date in the range.
    pub end: ExpenseDate,
}

impl DateRange {
    /// Whether `date` falls within the range.
    pub fn contains(&self, date: ExpenseDate) -> bool {
        self.start <= date && date <= self.end
    }
}
