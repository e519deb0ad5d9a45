//! The rules every expense must pass before it may be written to a store.

use serde::{Deserialize, Serialize};

use crate::{Error, expense::core::ExpenseDate};

/// The fields submitted to create an expense, before they have been checked.
///
/// All fields are optional so that a missing field can be reported by name
/// instead of as a generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    /// How much money was spent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// What kind of expense this was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// When the money was spent, as `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// A free text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An expense that has passed validation and is ready to be stored.
///
/// The only way to get a `NewExpense` is through [NewExpense::validate] (or
/// the [TryFrom] impl that calls it), and stores only accept `NewExpense`,
/// so every store enforces the same rules:
/// - `amount` is a finite number greater than zero,
/// - `category` is not blank,
/// - `date` is a real date in the `YYYY-MM-DD` form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    amount: f64,
    category: String,
    date: ExpenseDate,
    description: String,
}

impl NewExpense {
    /// Check `draft` and convert it into an expense that can be stored.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingField] if amount, category or date is absent, or category or date is blank,
    /// - [Error::NonPositiveAmount] if the amount is zero, negative or not finite,
    /// - or [Error::InvalidDate] if the date is not in the `YYYY-MM-DD` form.
    pub fn validate(draft: ExpenseDraft) -> Result<Self, Error> {
        let amount = draft.amount.ok_or(Error::MissingField("amount"))?;
        let category = non_blank(draft.category).ok_or(Error::MissingField("category"))?;
        let date = non_blank(draft.date).ok_or(Error::MissingField("date"))?;

        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::NonPositiveAmount(amount));
        }

        let date = ExpenseDate::parse(&date)?;

        Ok(Self {
            amount,
            category,
            date,
            description: draft.description.unwrap_or_default(),
        })
    }

    /// How much money was spent.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// What kind of expense this was.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// When the money was spent.
    pub fn date(&self) -> ExpenseDate {
        self.date
    }

    /// A free text note, empty if none was given.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl TryFrom<ExpenseDraft> for NewExpense {
    type Error = Error;

    fn try_from(draft: ExpenseDraft) -> Result<Self, Self::Error> {
        Self::validate(draft)
    }
}

/// The trimmed value of `field`, or `None` if it is absent or blank.
fn non_blank(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
