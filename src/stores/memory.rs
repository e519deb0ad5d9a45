//! Implements a transient expense store that lives in process memory.
use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{
    Error,
    expense::{CategoryTotal, Expense, ExpenseId, NewExpense, created_now},
    stores::{DateRange, ExpenseFilter, ExpenseStore},
};

/// Keeps expenses in memory for the lifetime of the process.
///
/// Used when no durable store is configured or the configured one cannot be
/// opened.
#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    /// Expenses in insertion order.
    expenses: RwLock<Vec<Expense>>,
}

impl InMemoryExpenseStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Expense>>, Error> {
        self.expenses.read().map_err(|error| {
            tracing::error!("could not acquire store lock: {error}");
            Error::DatabaseLockError
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Expense>>, Error> {
        self.expenses.write().map_err(|error| {
            tracing::error!("could not acquire store lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl ExpenseStore for InMemoryExpenseStore {
    fn create(&self, expense: NewExpense) -> Result<Expense, Error> {
        let expense = Expense {
            id: ExpenseId::generate(),
            amount: expense.amount(),
            category: expense.category().to_owned(),
            date: expense.date(),
            description: expense.description().to_owned(),
            created_at: created_now(),
        };

        self.write()?.push(expense.clone());

        Ok(expense)
    }

    fn list(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, Error> {
        // Walk newest first so the stable sort keeps later insertions ahead on equal dates.
        let mut expenses: Vec<Expense> = self
            .read()?
            .iter()
            .rev()
            .filter(|expense| filter.matches(expense))
            .cloned()
            .collect();

        expenses.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(expenses)
    }

    fn total_in_range(&self, range: &DateRange) -> Result<f64, Error> {
        Ok(self
            .read()?
            .iter()
            .filter(|expense| range.contains(expense.date))
            .map(|expense| expense.amount)
            .sum())
    }

    fn totals_by_category(&self) -> Result<Vec<CategoryTotal>, Error> {
        let expenses = self.read()?;
        let mut totals: HashMap<&str, (f64, u64)> = HashMap::new();

        for expense in expenses.iter() {
            let entry = totals.entry(expense.category.as_str()).or_insert((0.0, 0));
            entry.0 += expense.amount;
            entry.1 += 1;
        }

        let mut totals: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, (total, count))| CategoryTotal {
                category: category.to_owned(),
                total,
                count,
            })
            .collect();

        totals.sort_by(|a, b| {
            b.total
                .total_cmp(&a.total)
                .then_with(|| a.category.cmp(&b.category))
        });

        Ok(totals)
    }

    fn count(&self) -> Result<usize, Error> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        ExpenseDraft, NewExpense,
        expense::ExpenseDate,
        stores::{DateRange, ExpenseFilter, ExpenseStore, SQLiteExpenseStore},
    };

    use super::InMemoryExpenseStore;

    fn new_expense(amount: f64, category: &str, date: &str) -> NewExpense {
        NewExpense::validate(ExpenseDraft {
            amount: Some(amount),
            category: Some(category.to_owned()),
            date: Some(date.to_owned()),
            description: Some(format!("{category} on {date}")),
        })
        .unwrap()
    }

    fn fixtures() -> Vec<NewExpense> {
        vec![
            // Amounts are exact in binary so sums do not depend on addition order.
            new_expense(45.5, "Food", "2025-01-15"),
            new_expense(12.50, "Transportation", "2025-01-14"),
            new_expense(8.25, "Food", "2025-01-14"),
            new_expense(120.0, "Bills", "2025-01-01"),
            new_expense(3.75, "Food", "2024-12-31"),
            new_expense(12.50, "Transportation", "2025-01-15"),
        ]
    }

    #[test]
    fn create_assigns_id_and_timestamp() {
        let store = InMemoryExpenseStore::new();

        let expense = store.create(new_expense(45.99, "Food", "2025-01-15")).unwrap();

        assert!(!expense.id.as_str().is_empty());
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.list(&ExpenseFilter::default()).unwrap(), vec![expense]);
    }

    #[test]
    fn repeated_list_is_identical() {
        let store = InMemoryExpenseStore::new();
        for expense in fixtures() {
            store.create(expense).unwrap();
        }
        let filter = ExpenseFilter {
            category: Some("Food".to_owned()),
            date: None,
        };

        assert_eq!(store.list(&filter).unwrap(), store.list(&filter).unwrap());
    }

    // The fallback store must be indistinguishable from the durable one.
    #[test]
    fn agrees_with_sqlite_store() {
        let memory = InMemoryExpenseStore::new();
        let sqlite = SQLiteExpenseStore::new(Connection::open_in_memory().unwrap()).unwrap();
        for expense in fixtures() {
            memory.create(expense.clone()).unwrap();
            sqlite.create(expense).unwrap();
        }

        let summarise = |store: &dyn ExpenseStore, filter: &ExpenseFilter| {
            store
                .list(filter)
                .unwrap()
                .into_iter()
                .map(|expense| (expense.amount, expense.category, expense.description))
                .collect::<Vec<_>>()
        };

        for filter in [
            ExpenseFilter::default(),
            ExpenseFilter {
                category: Some("Food".to_owned()),
                date: None,
            },
            ExpenseFilter {
                category: None,
                date: Some(ExpenseDate::parse("2025-01-14").unwrap()),
            },
        ] {
            assert_eq!(summarise(&memory, &filter), summarise(&sqlite, &filter));
        }

        let range = DateRange {
            start: ExpenseDate::parse("2025-01-01").unwrap(),
            end: ExpenseDate::parse("2025-01-14").unwrap(),
        };
        assert_eq!(
            memory.total_in_range(&range).unwrap(),
            sqlite.total_in_range(&range).unwrap()
        );
        assert_eq!(
            memory.totals_by_category().unwrap(),
            sqlite.totals_by_category().unwrap()
        );
        assert_eq!(memory.count().unwrap(), sqlite.count().unwrap());
    }
}
