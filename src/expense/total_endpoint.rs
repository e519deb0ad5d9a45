//! Defines the endpoint for the total spent within a date range.
use std::sync::Arc;

use axum::{Json, extract::State};
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;

use crate::{
    Error,
    expense::{ExpenseDate, RangeTotal},
    stores::{DateRange, ExpenseStore},
};

/// The query parameters for a range total. Both bounds are inclusive.
#[derive(Debug, Default, Deserialize)]
pub struct TotalQuery {
    /// The first date of the range, as `YYYY-MM-DD`.
    pub start: Option<String>,
    /// The last date of the range, as `YYYY-MM-DD`.
    pub end: Option<String>,
}

impl TryFrom<TotalQuery> for DateRange {
    type Error = Error;

    fn try_from(query: TotalQuery) -> Result<Self, Self::Error> {
        let present = |bound: Option<String>| bound.filter(|value| !value.trim().is_empty());

        let (Some(start), Some(end)) = (present(query.start), present(query.end)) else {
            return Err(Error::MissingRangeBound);
        };

        Ok(Self {
            start: ExpenseDate::parse(&start)?,
            end: ExpenseDate::parse(&end)?,
        })
    }
}

/// A route handler for the sum of the amounts of all expenses dated between
/// the `start` and `end` query parameters.
///
/// Responds with the status code 400 if either bound is missing.
pub async fn get_total_endpoint(
    State(store): State<Arc<dyn ExpenseStore>>,
    query: Result<Query<TotalQuery>, QueryRejection>,
) -> Result<Json<RangeTotal>, Error> {
    let Query(query) = query.map_err(|rejection| Error::InvalidRequest(rejection.to_string()))?;
    let range = DateRange::try_from(query)?;

    let total = store.total_in_range(&range).inspect_err(|error| {
        tracing::error!("could not compute total for {range:?}: {error}");
    })?;

    Ok(Json(RangeTotal { total }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Json, extract::State};
    use axum_extra::extract::Query;

    use crate::{
        Error, ExpenseDraft, NewExpense,
        stores::{DateRange, ExpenseStore, InMemoryExpenseStore},
    };

    use super::{TotalQuery, get_total_endpoint};

    fn get_test_store() -> Arc<dyn ExpenseStore> {
        let store = InMemoryExpenseStore::new();
        for (amount, category, date) in [
            (45.99, "Food", "2025-01-15"),
            (12.50, "Transportation", "2025-01-14"),
            (100.0, "Bills", "2025-01-13"),
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

    fn query(start: Option<&str>, end: Option<&str>) -> TotalQuery {
        TotalQuery {
            start: start.map(str::to_owned),
            end: end.map(str::to_owned),
        }
    }

    #[tokio::test]
    async fn sums_amounts_in_range() {
        let store = get_test_store();

        let Json(got) = get_total_endpoint(
            State(store),
            Ok(Query(query(Some("2025-01-14"), Some("2025-01-15")))),
        )
        .await
        .unwrap();

        assert_eq!(got.total, 58.49);
    }

    #[tokio::test]
    async fn missing_bound_is_rejected() {
        for input in [
            query(None, Some("2025-01-15")),
            query(Some("2025-01-14"), None),
            query(Some(""), Some("2025-01-15")),
        ] {
            let result = get_total_endpoint(State(get_test_store()), Ok(Query(input))).await;

            assert_eq!(result.err(), Some(Error::MissingRangeBound));
        }
    }

    #[test]
    fn malformed_bound_is_rejected() {
        assert_eq!(
            DateRange::try_from(query(Some("2025-01-14"), Some("soon"))),
            Err(Error::InvalidDate("soon".to_owned()))
        );
    }
}
