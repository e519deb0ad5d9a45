//! Defines the endpoint for creating a new expense.
use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    expense::{ExpenseDraft, NewExpense},
    stores::ExpenseStore,
};

/// A route handler for creating a new expense, responds with the stored
/// expense and the status code 201 on success.
///
/// A missing field, a non-positive amount or a malformed date is rejected with
/// the status code 400.
pub async fn create_expense_endpoint(
    State(store): State<Arc<dyn ExpenseStore>>,
    payload: Result<Json<ExpenseDraft>, JsonRejection>,
) -> Response {
    let draft = match payload {
        Ok(Json(draft)) => draft,
        Err(rejection) => {
            tracing::debug!("rejected expense body: {}", rejection.body_text());
            return Error::InvalidRequest(rejection.body_text()).into_response();
        }
    };

    let expense = match NewExpense::validate(draft) {
        Ok(expense) => expense,
        Err(error) => {
            tracing::debug!("rejected expense: {error}");
            return error.into_response();
        }
    };

    match store.create(expense) {
        Ok(expense) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(error) => {
            tracing::error!("could not create expense: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Json,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
    };

    use crate::{
        ErrorMessage,
        expense::{Expense, ExpenseDraft},
        stores::{ExpenseFilter, ExpenseStore, InMemoryExpenseStore},
    };

    use super::create_expense_endpoint;

    fn get_test_store() -> Arc<dyn ExpenseStore> {
        Arc::new(InMemoryExpenseStore::new())
    }

    fn draft(amount: Option<f64>, category: Option<&str>, date: Option<&str>) -> ExpenseDraft {
        ExpenseDraft {
            amount,
            category: category.map(str::to_owned),
            date: date.map(str::to_owned),
            description: None,
        }
    }

    async fn body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn can_create_expense() {
        let store = get_test_store();

        let response = create_expense_endpoint(
            State(store.clone()),
            Ok(Json(draft(Some(45.99), Some("Food"), Some("2025-01-15")))),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Expense = body(response).await;
        assert_eq!(created.amount, 45.99);
        assert_eq!(created.category, "Food");
        assert_eq!(created.date.to_string(), "2025-01-15");

        // Verify the expense was actually stored.
        let stored = store.list(&ExpenseFilter::default()).unwrap();
        assert_eq!(stored, vec![created]);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let cases = [
            (draft(None, Some("Food"), Some("2025-01-15")), "amount is required"),
            (draft(Some(1.0), None, Some("2025-01-15")), "category is required"),
            (draft(Some(1.0), Some("Food"), None), "date is required"),
        ];

        for (input, want_message) in cases {
            let store = get_test_store();

            let response = create_expense_endpoint(State(store.clone()), Ok(Json(input)))
                .await
                .into_response();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let got: ErrorMessage = body(response).await;
            assert_eq!(got.message, want_message);
            assert_eq!(store.count().unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let store = get_test_store();

        let response = create_expense_endpoint(
            State(store.clone()),
            Ok(Json(draft(Some(0.0), Some("Food"), Some("2025-01-15")))),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.count().unwrap(), 0);
    }
}
