//! The fields a user fills in before a request is made.

use crate::{
    ExpenseDraft,
    client::{CATEGORIES, ClientError, ListFilter},
};

/// The raw text of the add expense form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddExpenseForm {
    /// The amount as typed by the user.
    pub amount: String,
    /// One of [CATEGORIES].
    pub category: String,
    /// The date as `YYYY-MM-DD`.
    pub date: String,
    /// An optional note.
    pub description: String,
}

impl AddExpenseForm {
    /// Check the form and convert it into a request body.
    ///
    /// # Errors
    /// Returns a [ClientError::Validation] with a message for the user if the
    /// amount is not a positive number, the category is not one of
    /// [CATEGORIES] or the date is empty.
    pub fn validate(&self) -> Result<ExpenseDraft, ClientError> {
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite() && *amount > 0.0)
            .ok_or_else(|| ClientError::Validation("Please enter a valid positive amount".to_owned()))?;

        let category = self.category.trim();
        if !CATEGORIES.contains(&category) {
            return Err(ClientError::Validation("Please select a category".to_owned()));
        }

        let date = self.date.trim();
        if date.is_empty() {
            return Err(ClientError::Validation("Please select a date".to_owned()));
        }

        let description = self.description.trim();

        Ok(ExpenseDraft {
            amount: Some(amount),
            category: Some(category.to_owned()),
            date: Some(date.to_owned()),
            description: (!description.is_empty()).then(|| description.to_owned()),
        })
    }
}

/// The raw text of the filter form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterForm {
    /// Only show this category, empty for all categories.
    pub category: String,
    /// Only show this date, empty for all dates.
    pub date: String,
    /// The first date of the range total.
    pub start: String,
    /// The last date of the range total.
    pub end: String,
}

impl FilterForm {
    /// The list filter for the category and date fields, skipping empty ones.
    pub fn list_filter(&self) -> ListFilter {
        let present = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_owned())
        };

        ListFilter {
            category: present(&self.category),
            date: present(&self.date),
        }
    }

    /// The start and end of the range total.
    ///
    /// # Errors
    /// Returns [ClientError::MissingRange] if either bound is empty.
    pub fn range(&self) -> Result<(&str, &str), ClientError> {
        match (self.start.trim(), self.end.trim()) {
            ("", _) | (_, "") => Err(ClientError::MissingRange),
            (start, end) => Ok((start, end)),
        }
    }
}
