//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    Error,
    expense::seed_if_empty,
    stores::{ExpenseStore, open_store},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store that holds every expense.
    pub store: Arc<dyn ExpenseStore>,
}

impl AppState {
    /// Create a new [AppState] around an already opened `store`.
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    /// Open the store for `database_url` and create an [AppState] for it.
    ///
    /// Falls back to an in-memory store if `database_url` is `None` or the
    /// database cannot be opened. When `seed` is true and the store is empty,
    /// it is filled with sample expenses.
    ///
    /// # Errors
    /// Returns an error if the sample expenses cannot be written.
    pub fn open(database_url: Option<&str>, seed: bool) -> Result<Self, Error> {
        let store = open_store(database_url);

        if seed {
            seed_if_empty(store.as_ref())?;
        }

        Ok(Self::new(store))
    }
}

// this impl tells the expense handlers how to access the store from our state
impl FromRef<AppState> for Arc<dyn ExpenseStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
