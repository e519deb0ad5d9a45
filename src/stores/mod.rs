//! Contains the expense store trait and its implementations.
//!
//! A durable SQLite store is used when one is configured and can be opened,
//! otherwise a transient in-memory store takes its place. Everything outside
//! this module sees `Arc<dyn ExpenseStore>` and never knows which it got.

mod expense;
mod memory;

pub mod sqlite;

use std::sync::Arc;

pub use expense::{DateRange, ExpenseFilter, ExpenseStore};
pub use memory::InMemoryExpenseStore;
pub use sqlite::SQLiteExpenseStore;

/// Open the store for `database_url`, falling back to an in-memory store.
///
/// The fallback is taken when `database_url` is `None` or the database cannot
/// be opened, in which case the reason is logged as a warning.
pub fn open_store(database_url: Option<&str>) -> Arc<dyn ExpenseStore> {
    let Some(database_url) = database_url else {
        tracing::warn!("No database configured, expenses will only be kept in memory.");
        return Arc::new(InMemoryExpenseStore::new());
    };

    match sqlite::connect(database_url) {
        Ok(store) => {
            tracing::info!("Connected to database at {database_url}");
            Arc::new(store)
        }
        Err(error) => {
            tracing::warn!(
                "Could not open database at {database_url}: {error}. \
                Falling back to an in-memory store, expenses will not be saved."
            );
            Arc::new(InMemoryExpenseStore::new())
        }
    }
}
