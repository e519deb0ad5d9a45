//! A client for the expense API.
//!
//! The client keeps everything a view needs in a single [DashboardState],
//! which only changes through the pure [reduce] function. [Dashboard] issues
//! requests through an [ExpenseApi] and dispatches the matching actions as
//! they complete.

mod api;
mod dashboard;
mod forms;
mod render;
mod state;
mod validation;

pub use api::{ApiClientConfig, DEFAULT_BASE_URL, ExpenseApi, HttpExpenseApi, ListFilter};
pub use dashboard::Dashboard;
pub use forms::{AddExpenseForm, FilterForm};
pub use render::{format_currency, render_category_table, render_expense_table};
pub use state::{Action, DashboardState, RequestId, RequestKind, RequestLog, reduce};
pub use validation::{ExpenseRecord, keep_valid_expenses, sum_amounts};

/// The categories a user may pick from when adding an expense.
pub const CATEGORIES: [&str; 8] = [
    "Food",
    "Transportation",
    "Entertainment",
    "Shopping",
    "Bills",
    "Healthcare",
    "Education",
    "Other",
];

/// The errors that may occur in the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A form was submitted with a value the user needs to fix.
    #[error("{0}")]
    Validation(String),

    /// A range total was requested without both a start and an end date.
    #[error("Please select both a start and an end date")]
    MissingRange,

    /// The request could not be sent or its response could not be read.
    #[error("could not reach the expense API: {0}")]
    Http(#[from] reqwest::Error),

    /// The API responded with an error status.
    #[error("the expense API responded with {status}: {message}")]
    Api {
        /// The HTTP status code of the response.
        status: u16,
        /// The message from the error body, or the raw body if it was not JSON.
        message: String,
    },

    /// The API responded with a body that does not have the expected shape.
    #[error("unexpected response from the expense API: {0}")]
    InvalidResponse(String),
}
