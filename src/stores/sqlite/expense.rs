//! Implements a SQLite backed expense store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row, params_from_iter, types::Value};

use crate::{
    Error,
    expense::{CategoryTotal, Expense, ExpenseId, NewExpense, created_now},
    stores::{DateRange, ExpenseFilter, ExpenseStore},
};

/// Stores expenses in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new store for the SQLite `connection`, creating the expense
    /// table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_expense_table(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    /// Insert a new expense into the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is some SQL error,
    /// or [Error::DatabaseLockError] if the connection lock is poisoned.
    fn create(&self, expense: NewExpense) -> Result<Expense, Error> {
        let connection = self.lock()?;

        let expense = connection
            .prepare(
                "INSERT INTO expense (id, amount, category, date, description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING id, amount, category, date, description, created_at",
            )?
            .query_row(
                (
                    ExpenseId::generate(),
                    expense.amount(),
                    expense.category(),
                    expense.date(),
                    expense.description(),
                    created_now(),
                ),
                map_expense_row,
            )?;

        Ok(expense)
    }

    /// Query for expenses in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn list(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, Error> {
        let mut query_string_parts = vec![
            "SELECT id, amount, category, date, description, created_at FROM expense".to_string(),
        ];
        let mut where_clause_parts = vec![];
        let mut query_parameters = vec![];

        if let Some(category) = &filter.category {
            where_clause_parts.push(format!("category = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(category.clone()));
        }

        if let Some(date) = filter.date {
            where_clause_parts.push(format!("date = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(date.to_string()));
        }

        if !where_clause_parts.is_empty() {
            query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        }

        // Sort by date, and then insertion order to keep the order stable between calls.
        query_string_parts.push("ORDER BY date DESC, rowid DESC".to_string());

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        self.lock()?
            .prepare(&query_string)?
            .query_map(params, map_expense_row)?
            .map(|maybe_expense| maybe_expense.map_err(Error::SqlError))
            .collect()
    }

    fn total_in_range(&self, range: &DateRange) -> Result<f64, Error> {
        self.lock()?
            .query_row(
                "SELECT COALESCE(SUM(amount), 0.0) FROM expense WHERE date BETWEEN ?1 AND ?2",
                (range.start, range.end),
                |row| row.get(0),
            )
            .map_err(|error| error.into())
    }

    fn totals_by_category(&self) -> Result<Vec<CategoryTotal>, Error> {
        self.lock()?
            .prepare(
                "SELECT category, SUM(amount) AS total, COUNT(id) FROM expense
                 GROUP BY category
                 ORDER BY total DESC, category ASC",
            )?
            .query_map([], |row| {
                Ok(CategoryTotal {
                    category: row.get(0)?,
                    total: row.get(1)?,
                    count: row.get::<_, i64>(2)? as u64,
                })
            })?
            .map(|maybe_total| maybe_total.map_err(Error::SqlError))
            .collect()
    }

    /// Get the total number of expenses in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    fn count(&self) -> Result<usize, Error> {
        self.lock()?
            .query_row("SELECT COUNT(id) FROM expense;", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count as usize)
            .map_err(|error| error.into())
    }
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id TEXT PRIMARY KEY,
                amount REAL NOT NULL CHECK (amount > 0),
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    // Used by the list filters and the range total.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date_category ON expense(date, category);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let category = row.get(2)?;
    let date = row.get(3)?;
    let description = row.get(4)?;
    let created_at = row.get(5)?;

    Ok(Expense {
        id,
        amount,
        category,
        date,
        description,
        created_at,
    })
}
