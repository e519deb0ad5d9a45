//! The dashboard state and the actions that change it.

use crate::client::{AddExpenseForm, ExpenseRecord, FilterForm, sum_amounts};

/// The sequence number given to each request, increasing by one per request.
pub type RequestId = u64;

/// What a request fetches or changes, which decides the parts of the state
/// its completion may replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// The unfiltered list. Replaces the full list, the shown list and the total.
    Load,
    /// A filtered list. Replaces the shown list and the total.
    Filter,
    /// A range total. Replaces the total.
    RangeTotal,
    /// A new expense. Replaces nothing, a load follows it.
    Create,
}

/// Tracks the requests issued by the dashboard.
///
/// Each part of the state follows the most recently issued request that
/// targets it, so when requests overlap every part reflects the one issued
/// last, whatever order they finish in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestLog {
    issued: RequestId,
    pending: usize,
    latest_load: RequestId,
    latest_list: RequestId,
    latest_total: RequestId,
    latest_create: RequestId,
    applied_load: RequestId,
}

impl RequestLog {
    /// The id of the most recently issued request, 0 if there has been none.
    pub fn issued(&self) -> RequestId {
        self.issued
    }

    /// The number of requests that have not finished.
    pub fn pending(&self) -> usize {
        self.pending
    }

    fn start(mut self, kind: RequestKind) -> Self {
        self.issued += 1;
        self.pending += 1;

        let request = self.issued;
        match kind {
            RequestKind::Load => {
                self.latest_load = request;
                self.latest_list = request;
                self.latest_total = request;
            }
            RequestKind::Filter => {
                self.latest_list = request;
                self.latest_total = request;
            }
            RequestKind::RangeTotal => self.latest_total = request,
            RequestKind::Create => self.latest_create = request,
        }

        self
    }

    fn finish(mut self) -> Self {
        self.pending = self.pending.saturating_sub(1);
        self
    }

    fn shows_list_of(&self, request: RequestId) -> bool {
        request == self.latest_list
    }

    fn shows_total_of(&self, request: RequestId) -> bool {
        request == self.latest_total
    }

    /// Whether `request` is still the latest for any part of the state.
    fn is_current(&self, request: RequestId) -> bool {
        request == self.latest_list || request == self.latest_total || request == self.latest_create
    }
}

/// Everything needed to draw the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Every expense from the most recently issued load that has finished.
    pub all: Vec<ExpenseRecord>,
    /// The expenses currently shown, which may be filtered.
    pub visible: Vec<ExpenseRecord>,
    /// Whether any request is in flight.
    pub loading: bool,
    /// A message for the user about the last thing that went wrong.
    pub error: Option<String>,
    /// The total shown next to the list.
    pub total: f64,
    /// The add expense form.
    pub add_form: AddExpenseForm,
    /// The filter and range total form.
    pub filter_form: FilterForm,
    /// Whether the add expense dialog is shown.
    pub add_dialog_open: bool,
    /// Whether the filter dialog is shown.
    pub filter_dialog_open: bool,
    /// The requests issued so far.
    pub requests: RequestLog,
}

/// A change to [DashboardState].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A request was issued. Its id is the new `requests.issued()`.
    RequestStarted(RequestKind),
    /// The unfiltered list arrived.
    Loaded {
        /// The request that fetched the list.
        request: RequestId,
        /// The valid expenses in the response.
        expenses: Vec<ExpenseRecord>,
    },
    /// A filtered list arrived.
    Filtered {
        /// The request that fetched the list.
        request: RequestId,
        /// The valid expenses in the response.
        expenses: Vec<ExpenseRecord>,
    },
    /// A range total arrived.
    RangeTotalComputed {
        /// The request that computed the total.
        request: RequestId,
        /// The sum of the expenses in the range.
        total: f64,
    },
    /// An expense was stored.
    Created {
        /// The request that created the expense.
        request: RequestId,
    },
    /// A request failed.
    RequestFailed {
        /// The request that failed.
        request: RequestId,
        /// A message for the user.
        message: String,
    },
    /// Show the full list again and clear the filter form.
    FilterReset,
    /// A form was rejected before any request was made.
    ValidationFailed(String),
    /// The user changed the add expense form.
    EditAddForm(AddExpenseForm),
    /// The user changed the filter form.
    EditFilterForm(FilterForm),
    /// Show the add expense dialog.
    OpenAddDialog,
    /// Hide the add expense dialog.
    CloseAddDialog,
    /// Show the filter dialog.
    OpenFilterDialog,
    /// Hide the filter dialog.
    CloseFilterDialog,
}

/// Apply `action` to `state`.
///
/// A completion only replaces the parts of the state for which its request
/// is still the latest one, see [RequestLog].
pub fn reduce(mut state: DashboardState, action: Action) -> DashboardState {
    match action {
        Action::RequestStarted(kind) => {
            state.requests = state.requests.start(kind);
            state.error = None;
        }
        Action::Loaded { request, expenses } => {
            state.requests = state.requests.finish();

            let shows_list = state.requests.shows_list_of(request);
            let shows_total = state.requests.shows_total_of(request);

            if shows_list {
                state.visible = expenses.clone();
            }
            if shows_total {
                state.total = sum_amounts(&expenses);
            }
            if shows_list || shows_total {
                state.error = None;
            }

            // The full list is kept for a reset even when a newer filter or
            // range total is shown.
            if request > state.requests.applied_load {
                state.all = expenses;
                state.requests.applied_load = request;
            } else {
                tracing::debug!("ignoring full list from superseded request {request}");
            }
        }
        Action::Filtered { request, expenses } => {
            state.requests = state.requests.finish();

            if state.requests.shows_list_of(request) {
                state.total = sum_amounts(&expenses);
                state.visible = expenses;
                state.error = None;
                state.filter_dialog_open = false;
            } else {
                tracing::debug!("ignoring filtered list from superseded request {request}");
            }
        }
        Action::RangeTotalComputed { request, total } => {
            state.requests = state.requests.finish();

            if state.requests.shows_total_of(request) {
                state.total = total;
                state.error = None;
            } else {
                tracing::debug!("ignoring range total from superseded request {request}");
            }
        }
        // The expense is stored whether or not a newer request has started,
        // so the form is always cleared.
        Action::Created { .. } => {
            state.requests = state.requests.finish();
            state.add_form = AddExpenseForm::default();
            state.add_dialog_open = false;
        }
        Action::RequestFailed { request, message } => {
            state.requests = state.requests.finish();

            if state.requests.is_current(request) {
                state.error = Some(message);
            } else {
                tracing::debug!("ignoring failure of superseded request {request}: {message}");
            }
        }
        Action::FilterReset => {
            state.total = sum_amounts(&state.all);
            state.visible = state.all.clone();
            state.filter_form = FilterForm::default();
            state.error = None;
            // Filters and range totals still in flight must not replace the
            // reset list, but a load still in flight brings a newer full list.
            state.requests.latest_list = state.requests.latest_load;
            state.requests.latest_total = state.requests.latest_load;
        }
        Action::ValidationFailed(message) => state.error = Some(message),
        Action::EditAddForm(add_form) => state.add_form = add_form,
        Action::EditFilterForm(filter_form) => state.filter_form = filter_form,
        Action::OpenAddDialog => state.add_dialog_open = true,
        Action::CloseAddDialog => state.add_dialog_open = false,
        Action::OpenFilterDialog => state.filter_dialog_open = true,
        Action::CloseFilterDialog => state.filter_dialog_open = false,
    }

    state.loading = state.requests.pending() > 0;

    state
}
