//! Contains the SQLite backed store and the function for opening one from a
//! connection string.

pub mod expense;

use std::path::Path;

use rusqlite::Connection;

pub use expense::SQLiteExpenseStore;

use crate::Error;

/// The prefix that may be put in front of a database path, e.g. `sqlite://expenses.db`.
const URL_SCHEME: &str = "sqlite://";

/// Open the SQLite database named by `database_url` and prepare it for storing expenses.
///
/// `database_url` is a file path, optionally prefixed with `sqlite://`. The
/// special path `:memory:` opens a private in-memory database.
///
/// # Errors
/// Returns an [Error::SqlError] if the database cannot be opened or the
/// expense table cannot be created.
pub fn connect(database_url: &str) -> Result<SQLiteExpenseStore, Error> {
    let path = database_url
        .strip_prefix(URL_SCHEME)
        .unwrap_or(database_url);

    let connection = if path == ":memory:" {
        Connection::open_in_memory()?
    } else {
        Connection::open(Path::new(path))?
    };

    SQLiteExpenseStore::new(connection)
}
