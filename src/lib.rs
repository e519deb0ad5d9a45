//! Expense Tracker is a small web service for recording personal expenses.
//!
//! This library provides a JSON REST API for creating and listing expenses and
//! for two aggregations over them (a total for a date range and a breakdown by
//! category), along with a client that drives that API from a typed state
//! container.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use tokio::signal;

mod app_state;
mod config;
mod endpoints;
mod expense;
mod logging;
mod not_found;
mod routing;

pub mod client;
pub mod stores;

pub use app_state::AppState;
pub use config::ServerConfig;
pub use endpoints::{EXPENSES_API, EXPENSES_BY_CATEGORY, EXPENSES_TOTAL};
pub use expense::{
    CategoryTotal, Expense, ExpenseDate, ExpenseDraft, ExpenseId, NewExpense, RangeTotal,
    SAMPLE_EXPENSES, seed_if_empty,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, MAX_BODY_SIZE, init_tracing, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field was missing from a request body, or was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// An expense was submitted with an amount that is zero, negative or not
    /// a finite number.
    #[error("amount must be a positive number, got {0}")]
    NonPositiveAmount(f64),

    /// A date string was not in the `YYYY-MM-DD` form.
    ///
    /// Callers should pass in the date string that caused the error.
    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A date range query was missing its start or end bound.
    #[error("start and end query parameters are required")]
    MissingRangeBound,

    /// The request body or query string could not be parsed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request body was larger than [MAX_BODY_SIZE] bytes.
    #[error("the request body is larger than {} bytes", MAX_BODY_SIZE)]
    PayloadTooLarge,

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the lock guarding a store.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent with every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// A human readable description of what went wrong.
    pub message: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingField(_)
            | Error::NonPositiveAmount(_)
            | Error::InvalidDate(_)
            | Error::MissingRangeBound
            | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            // Store errors are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "Server error".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(ErrorMessage { message })).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let response = Error::MissingField("amount").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"message":"amount is required"}"#);
    }

    #[tokio::test]
    async fn store_errors_hide_details() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"message":"Server error"}"#);
    }

    #[test]
    fn oversized_body_is_payload_too_large() {
        let response = Error::PayloadTooLarge.into_response();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn query_returned_no_rows_maps_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }
}
