//! Runs requests against the API and feeds their results into the state.

use std::sync::{Mutex, PoisonError};

use crate::{
    CategoryTotal,
    client::{
        Action, ClientError, DashboardState, ExpenseApi, ListFilter, RequestId, RequestKind,
        keep_valid_expenses, reduce,
    },
};

/// Drives a [DashboardState] from an [ExpenseApi].
///
/// Every operation records its outcome in the state, including errors, so
/// none of them return a `Result`. Operations take `&self` and may overlap.
#[derive(Debug)]
pub struct Dashboard<A> {
    api: A,
    state: Mutex<DashboardState>,
}

impl<A: ExpenseApi> Dashboard<A> {
    /// Create a dashboard with an empty state.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(DashboardState::default()),
        }
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> DashboardState {
        self.lock_state().clone()
    }

    /// Apply `action` to the state and return the new state.
    pub fn dispatch(&self, action: Action) -> DashboardState {
        let mut state = self.lock_state();
        let current = std::mem::take(&mut *state);
        *state = reduce(current, action);

        state.clone()
    }

    /// Fetch the full list of expenses.
    pub async fn load(&self) {
        let request = self.begin_request(RequestKind::Load);

        let action = match self.api.list_expenses(&ListFilter::default()).await {
            Ok(raw) => Action::Loaded {
                request,
                expenses: keep_valid_expenses(raw),
            },
            Err(error) => failed(request, "load expenses", error),
        };

        self.dispatch(action);
    }

    /// Submit the add expense form, then reload the list if it was stored.
    ///
    /// An invalid form is reported without making a request.
    pub async fn add(&self) {
        let draft = match self.state().add_form.validate() {
            Ok(draft) => draft,
            Err(error) => {
                self.dispatch(Action::ValidationFailed(error.to_string()));
                return;
            }
        };

        let request = self.begin_request(RequestKind::Create);

        match self.api.create_expense(&draft).await {
            Ok(expense) => {
                tracing::info!("created expense {}", expense.id);
                self.dispatch(Action::Created { request });
                self.load().await;
            }
            Err(error) => {
                self.dispatch(failed(request, "add expense", error));
            }
        }
    }

    /// Show the expenses matching the category and date of the filter form.
    pub async fn apply_filter(&self) {
        let filter = self.state().filter_form.list_filter();
        let request = self.begin_request(RequestKind::Filter);

        let action = match self.api.list_expenses(&filter).await {
            Ok(raw) => Action::Filtered {
                request,
                expenses: keep_valid_expenses(raw),
            },
            Err(error) => failed(request, "filter expenses", error),
        };

        self.dispatch(action);
    }

    /// Show the full list again.
    pub fn reset_filter(&self) {
        self.dispatch(Action::FilterReset);
    }

    /// Replace the shown total with the total for the range in the filter form.
    ///
    /// The shown list is not changed.
    pub async fn compute_range_total(&self) {
        let filter_form = self.state().filter_form;
        let (start, end) = match filter_form.range() {
            Ok(range) => range,
            Err(error) => {
                self.dispatch(Action::ValidationFailed(error.to_string()));
                return;
            }
        };

        let request = self.begin_request(RequestKind::RangeTotal);

        let action = match self.api.range_total(start, end).await {
            Ok(total) => Action::RangeTotalComputed { request, total },
            Err(error) => failed(request, "compute range total", error),
        };

        self.dispatch(action);
    }

    /// Fetch the totals for each category. The state is not changed.
    pub async fn category_breakdown(&self) -> Result<Vec<CategoryTotal>, ClientError> {
        self.api.totals_by_category().await
    }

    fn begin_request(&self, kind: RequestKind) -> RequestId {
        self.dispatch(Action::RequestStarted(kind)).requests.issued()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, DashboardState> {
        // The state is only ever replaced whole, so a panic elsewhere cannot
        // leave it half written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn failed(request: RequestId, operation: &str, error: ClientError) -> Action {
    tracing::error!("could not {operation}: {error}");

    let message = match error {
        ClientError::Api { message, .. } => message,
        error => error.to_string(),
    };

    Action::RequestFailed { request, message }
}
