//! Defines the endpoint for listing expenses.
use std::sync::Arc;

use axum::{Json, extract::State};
// axum_extra's Query parses an empty value such as `?category=` as None.
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;

use crate::{
    Error,
    expense::{Expense, ExpenseDate},
    stores::{ExpenseFilter, ExpenseStore},
};

/// The query parameters accepted when listing expenses.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Only return expenses in this category.
    pub category: Option<String>,
    /// Only return expenses on this date, as `YYYY-MM-DD`.
    pub date: Option<String>,
}

impl TryFrom<ListQuery> for ExpenseFilter {
    type Error = Error;

    fn try_from(query: ListQuery) -> Result<Self, Self::Error> {
        let category = query.category.filter(|category| !category.is_empty());
        let date = query
            .date
            .filter(|date| !date.trim().is_empty())
            .map(|date| ExpenseDate::parse(&date))
            .transpose()?;

        Ok(Self { category, date })
    }
}

/// A route handler for listing the expenses matching the optional `category`
/// and `date` query parameters, newest date first.
pub async fn list_expenses_endpoint(
    State(store): State<Arc<dyn ExpenseStore>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Expense>>, Error> {
    let Query(query) = query.map_err(|rejection| Error::InvalidRequest(rejection.to_string()))?;
    let filter = ExpenseFilter::try_from(query)?;

    store.list(&filter).map(Json).inspect_err(|error| {
        tracing::error!("could not list expenses: {error}");
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Json, extract::State};
    use axum_extra::extract::Query;

    use crate::{
        Error, ExpenseDraft, NewExpense,
        expense::ExpenseDate,
        stores::{ExpenseFilter, ExpenseStore, InMemoryExpenseStore},
    };

    use super::{ListQuery, list_expenses_endpoint};

    fn get_test_store() -> Arc<dyn ExpenseStore> {
        let store = InMemoryExpenseStore::new();
        for (amount, category, date) in [
            (45.99, "Food", "2025-01-15"),
            (12.50, "Transportation", "2025-01-14"),
            (8.0, "Food", "2025-01-14"),
        ] {
            store
                .create(
                    NewExpense::validate(ExpenseDraft {
                        amount: Some(amount),
                        category: Some(category.to_owned()),
                        date: Some(date.to_owned()),
                        description: None,
                    })
                    .unwrap(),
                )
                .unwrap();
        }

        Arc::new(store)
    }

    fn query(category: Option<&str>, date: Option<&str>) -> ListQuery {
        ListQuery {
            category: category.map(str::to_owned),
            date: date.map(str::to_owned),
        }
    }

    #[tokio::test]
    async fn lists_everything_without_filters() {
        let store = get_test_store();

        let Json(got) = list_expenses_endpoint(State(store), Ok(Query(ListQuery::default())))
            .await
            .unwrap();

        assert_eq!(got.len(), 3);
        assert_eq!(got[0].date.to_string(), "2025-01-15");
    }

    #[tokio::test]
    async fn filters_by_category() {
        let store = get_test_store();

        let Json(got) = list_expenses_endpoint(State(store), Ok(Query(query(Some("Food"), None))))
            .await
            .unwrap();

        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|expense| expense.category == "Food"));
    }

    #[tokio::test]
    async fn rejects_malformed_date() {
        let store = get_test_store();

        let result =
            list_expenses_endpoint(State(store), Ok(Query(query(None, Some("14/01/2025"))))).await;

        assert_eq!(
            result.err(),
            Some(Error::InvalidDate("14/01/2025".to_owned()))
        );
    }

    #[test]
    fn empty_values_are_ignored() {
        let filter = ExpenseFilter::try_from(query(Some(""), Some(" "))).unwrap();

        assert_eq!(filter, ExpenseFilter::default());
    }

    #[test]
    fn date_value_is_parsed() {
        let filter = ExpenseFilter::try_from(query(None, Some("2025-01-14"))).unwrap();

        assert_eq!(filter.date, Some(ExpenseDate::parse("2025-01-14").unwrap()));
    }
}
