//! Defines the endpoint for expense totals grouped by category.
use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{Error, expense::CategoryTotal, stores::ExpenseStore};

/// A route handler for the total and count of expenses in each category,
/// largest total first.
pub async fn get_totals_by_category_endpoint(
    State(store): State<Arc<dyn ExpenseStore>>,
) -> Result<Json<Vec<CategoryTotal>>, Error> {
    store.totals_by_category().map(Json).inspect_err(|error| {
        tracing::error!("could not aggregate expenses by category: {error}");
    })
}
