//! Checks on the expenses fetched from the API.
//!
//! The API is not trusted to only return well formed expenses, so every
//! element of a fetched list is checked before it is shown or summed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An expense as the client sees it.
///
/// Dates and timestamps are kept as the strings the API sent since the
/// client only displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    /// The identifier assigned by the store.
    #[serde(alias = "_id")]
    pub id: String,
    /// How much money was spent.
    pub amount: f64,
    /// What kind of expense this was.
    pub category: String,
    /// When the money was spent.
    pub date: String,
    /// A free text note.
    #[serde(default)]
    pub description: Option<String>,
    /// When the record was created.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ExpenseRecord {
    fn problem(&self) -> Option<&'static str> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            Some("amount must be a positive number")
        } else if self.category.trim().is_empty() {
            Some("category is empty")
        } else if self.date.trim().is_empty() {
            Some("date is empty")
        } else {
            None
        }
    }
}

/// Keep the elements of `raw` that are well formed expenses.
///
/// Invalid elements are dropped and logged at the `warn` level, they never
/// cause an error.
pub fn keep_valid_expenses(raw: Vec<Value>) -> Vec<ExpenseRecord> {
    raw.into_iter()
        .enumerate()
        .filter_map(
            |(index, value)| match serde_json::from_value::<ExpenseRecord>(value) {
                Ok(record) => match record.problem() {
                    None => Some(record),
                    Some(problem) => {
                        tracing::warn!("discarding expense {} at index {index}: {problem}", record.id);
                        None
                    }
                },
                Err(error) => {
                    tracing::warn!("discarding malformed expense at index {index}: {error}");
                    None
                }
            },
        )
        .collect()
}

/// The sum of the amounts of `expenses`.
pub fn sum_amounts(expenses: &[ExpenseRecord]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}
