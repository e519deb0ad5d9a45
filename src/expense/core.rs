//! Defines the core data models for expenses.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};
use uuid::Uuid;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// An opaque identifier assigned to an expense by the store that saved it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Generate a new, random ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing ID string.
    pub fn new_unchecked(id: &str) -> Self {
        Self(id.to_owned())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for ExpenseId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for ExpenseId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        String::column_result(value).map(Self)
    }
}

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The calendar date an expense happened on.
///
/// Always written in the fixed-width `YYYY-MM-DD` form, so comparing the
/// text of two dates gives the same answer as comparing the dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpenseDate(Date);

impl ExpenseDate {
    /// Parse a date in the `YYYY-MM-DD` form.
    ///
    /// Leading and trailing whitespace is ignored.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if `text` is not a real date in that form.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Date::parse(text.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| Error::InvalidDate(text.to_owned()))
    }

    /// The underlying calendar date.
    pub fn date(&self) -> Date {
        self.0
    }
}

impl From<Date> for ExpenseDate {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl FromStr for ExpenseDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for ExpenseDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let formatted = self.0.format(DATE_FORMAT).map_err(|_| std::fmt::Error)?;
        write!(f, "{formatted}")
    }
}

impl Serialize for ExpenseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExpenseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

impl ToSql for ExpenseDate {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for ExpenseDate {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Self::parse(text).map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// A record of money spent.
///
/// Expenses are created through [NewExpense](crate::NewExpense) and never
/// change once they have been stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// The ID the store assigned to the expense.
    #[serde(alias = "_id")]
    pub id: ExpenseId,
    /// How much money was spent, always greater than zero.
    pub amount: f64,
    /// What kind of expense this was, e.g. "Food".
    pub category: String,
    /// When the money was spent.
    pub date: ExpenseDate,
    /// A free text note about the expense.
    #[serde(default)]
    pub description: String,
    /// When the expense was saved.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The total and number of expenses recorded under one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The sum of the amounts in the category.
    pub total: f64,
    /// How many expenses are in the category.
    pub count: u64,
}

/// The body returned for a date range total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeTotal {
    /// The sum of the amounts in the range.
    pub total: f64,
}

/// The current UTC time truncated to whole milliseconds, the precision kept
/// by every store.
pub(crate) fn created_now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(now.millisecond() as u32 * 1_000_000)
        .unwrap_or(now)
}
