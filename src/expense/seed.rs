//! Sample expenses inserted into an empty store on start up.

use crate::{
    Error,
    expense::{ExpenseDraft, NewExpense},
    stores::ExpenseStore,
};

/// The sample expenses as `(amount, category, date, description)`.
pub const SAMPLE_EXPENSES: [(f64, &str, &str, &str); 7] = [
    (45.99, "Food", "2025-01-15", "Grocery shopping"),
    (12.50, "Transportation", "2025-01-14", "Bus fare"),
    (89.00, "Bills", "2025-01-13", "Electricity bill"),
    (25.00, "Entertainment", "2025-01-12", "Movie tickets"),
    (150.00, "Shopping", "2025-01-10", "Winter jacket"),
    (30.00, "Healthcare", "2025-01-08", "Pharmacy"),
    (60.00, "Education", "2025-01-05", "Online course"),
];

/// Insert [SAMPLE_EXPENSES] into `store` if it holds no expenses.
///
/// Returns the number of expenses inserted.
///
/// # Errors
/// Returns an error if the store cannot be counted or written to.
pub fn seed_if_empty(store: &dyn ExpenseStore) -> Result<usize, Error> {
    if store.count()? > 0 {
        return Ok(0);
    }

    for (amount, category, date, description) in SAMPLE_EXPENSES {
        let expense = NewExpense::validate(ExpenseDraft {
            amount: Some(amount),
            category: Some(category.to_owned()),
            date: Some(date.to_owned()),
            description: Some(description.to_owned()),
        })?;

        store.create(expense)?;
    }

    tracing::info!("Seeded the store with {} sample expenses", SAMPLE_EXPENSES.len());

    Ok(SAMPLE_EXPENSES.len())
}
